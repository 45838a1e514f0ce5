#![forbid(unsafe_code)]

pub mod error;
pub mod overview;
pub mod path_service;

pub use path_core::Clock;

pub use error::{LessonError, PathServiceError};
pub use overview::PathOverview;
pub use path_service::{CompletionOutcome, LearningPathService, LessonTicket};
