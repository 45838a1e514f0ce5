//! Progression engine for a unit/exercise skill tree.
//!
//! Takes a flat catalog of units and questions plus the identifiers a learner
//! has completed, and derives for every exercise tile whether it is locked,
//! the active one of its unit, or complete. All functions are pure and
//! synchronous.

#![forbid(unsafe_code)]

pub mod assembler;
pub mod completion;
pub mod mapper;
pub mod model;
pub mod path;
pub mod progression;
pub mod time;

pub use completion::CompletionSet;
pub use path::{LearningPath, PathTile, PathUnit, UnitProgress, build_learning_path};
pub use progression::{can_enter, status_of};
pub use time::Clock;
