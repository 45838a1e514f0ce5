//! Shared error types for the services crate.

use path_core::model::{QuestionId, TileStatus};
use storage::StorageError;
use thiserror::Error;

/// Errors emitted while building the learning path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PathServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted when starting or finishing a lesson.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonError {
    #[error("no exercise with id {0} in the learning path")]
    UnknownTile(QuestionId),
    #[error("exercise {id} is {status}, only the active exercise can be entered")]
    NotActive { id: QuestionId, status: TileStatus },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<PathServiceError> for LessonError {
    fn from(err: PathServiceError) -> Self {
        match err {
            PathServiceError::Storage(e) => LessonError::Storage(e),
        }
    }
}
