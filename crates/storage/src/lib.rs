//! External collaborators of the progression engine: where the catalog and
//! the learner's completions come from.

#![forbid(unsafe_code)]

mod mapping;
pub mod repository;
pub mod snapshot;

pub use repository::{
    CatalogRepository, CompletionRecord, CompletionRepository, InMemoryRepository, Storage,
    StorageError,
};
pub use snapshot::CatalogSnapshot;
