use std::sync::Arc;

use path_core::assembler::{duplicate_question_ids, orphaned_questions};
use path_core::model::{QuestionId, Tile, TileStatus, UnitId};
use path_core::{Clock, LearningPath, build_learning_path};
use storage::{CatalogRepository, CompletionRepository, Storage};
use tracing::{debug, info, warn};

use crate::error::{LessonError, PathServiceError};
use crate::overview::PathOverview;

/// Permission to start one exercise, issued only for the active tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonTicket {
    pub unit_id: UnitId,
    pub tile: Tile,
}

/// Result of recording a finished exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// False when the exercise had already been completed.
    pub newly_completed: bool,
    /// Path recomputed after the completion was recorded.
    pub path: LearningPath,
}

/// Builds the learning path from the collaborator repositories and guards
/// lesson entry against it.
#[derive(Clone)]
pub struct LearningPathService {
    clock: Clock,
    catalog: Arc<dyn CatalogRepository>,
    completions: Arc<dyn CompletionRepository>,
}

impl LearningPathService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<dyn CatalogRepository>,
        completions: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            completions,
        }
    }

    #[must_use]
    pub fn from_storage(clock: Clock, storage: &Storage) -> Self {
        Self::new(
            clock,
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.completions),
        )
    }

    /// Fetch a fresh snapshot and derive the full path.
    ///
    /// # Errors
    ///
    /// Returns `PathServiceError::Storage` if either repository fails.
    pub async fn load_path(&self) -> Result<LearningPath, PathServiceError> {
        let units = self.catalog.list_units().await?;
        let questions = self.catalog.list_questions().await?;
        let completed = self.completions.completion_set().await?;

        if units.is_empty() || questions.is_empty() {
            debug!(
                units = units.len(),
                questions = questions.len(),
                "catalog empty, returning empty path"
            );
            return Ok(build_learning_path(&units, &questions, &completed));
        }

        let orphans = orphaned_questions(&units, &questions);
        if !orphans.is_empty() {
            warn!(
                count = orphans.len(),
                first = %orphans[0].id,
                "questions reference unknown units and were left out"
            );
        }

        let duplicates = duplicate_question_ids(&questions);
        if !duplicates.is_empty() {
            warn!(
                count = duplicates.len(),
                first = %duplicates[0],
                "question ids repeat; lookups resolve to the first occurrence"
            );
        }

        let path = build_learning_path(&units, &questions, &completed);

        let unknown = completed.unknown_to(path.tiles().map(|(_, tile)| tile.id()));
        if !unknown.is_empty() {
            debug!(count = unknown.len(), "completed ids not present in catalog");
        }

        debug!(
            units = path.units().len(),
            tiles = path.tile_count(),
            active = path.tiles().filter(|(_, t)| t.status.is_active()).count(),
            "learning path rebuilt"
        );
        Ok(path)
    }

    /// # Errors
    ///
    /// Returns `PathServiceError::Storage` if either repository fails.
    pub async fn overview(&self) -> Result<PathOverview, PathServiceError> {
        let path = self.load_path().await?;
        Ok(PathOverview::from_path(&path))
    }

    /// Check that `id` is the active exercise of its unit and issue a ticket.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::UnknownTile` if the id is not in the path,
    /// `LessonError::NotActive` if its tile is locked or already complete, and
    /// `LessonError::Storage` for repository failures.
    pub async fn enter_lesson(&self, id: &QuestionId) -> Result<LessonTicket, LessonError> {
        let path = self.load_path().await?;
        let (unit, tile) = path
            .find_tile(id)
            .ok_or_else(|| LessonError::UnknownTile(id.clone()))?;

        if !tile.can_enter() {
            info!(%id, status = %tile.status, "lesson entry rejected");
            return Err(LessonError::NotActive {
                id: id.clone(),
                status: tile.status,
            });
        }

        Ok(LessonTicket {
            unit_id: unit.id().clone(),
            tile: tile.tile.clone(),
        })
    }

    /// Record that the learner finished exercise `id` and return the new path.
    ///
    /// Completing an already complete exercise is a no-op. A locked exercise
    /// cannot be completed.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::UnknownTile` if the id is not in the path,
    /// `LessonError::NotActive` if its tile is locked, and
    /// `LessonError::Storage` for repository failures.
    pub async fn complete(&self, id: &QuestionId) -> Result<CompletionOutcome, LessonError> {
        let path = self.load_path().await?;
        let status = path
            .find_tile(id)
            .map(|(_, tile)| tile.status)
            .ok_or_else(|| LessonError::UnknownTile(id.clone()))?;

        match status {
            TileStatus::Complete => Ok(CompletionOutcome {
                newly_completed: false,
                path,
            }),
            TileStatus::Locked => Err(LessonError::NotActive {
                id: id.clone(),
                status,
            }),
            TileStatus::Active => {
                let newly_completed = self.completions.mark_completed(id, self.clock.now()).await?;
                info!(%id, "exercise completed");
                let path = self.load_path().await?;
                Ok(CompletionOutcome {
                    newly_completed,
                    path,
                })
            }
        }
    }
}
