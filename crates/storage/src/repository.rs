use async_trait::async_trait;
use chrono::{DateTime, Utc};
use path_core::CompletionSet;
use path_core::model::{Question, QuestionId, UnitRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

/// One finished exercise as held by the completion store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub question_id: QuestionId,
    /// Unknown for completions imported from a snapshot.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Catalog loader contract: units (without tiles) and questions.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List all units in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_units(&self) -> Result<Vec<UnitRecord>, StorageError>;

    /// List all questions in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;
}

/// Completion store contract.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// All completion records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_completions(&self) -> Result<Vec<CompletionRecord>, StorageError>;

    /// Record a finished exercise.
    ///
    /// Returns `false` when the id was already recorded; the original timestamp is kept.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn mark_completed(
        &self,
        id: &QuestionId,
        at: DateTime<Utc>,
    ) -> Result<bool, StorageError>;

    /// Snapshot of completed ids for one progression computation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn completion_set(&self) -> Result<CompletionSet, StorageError> {
        let records = self.list_completions().await?;
        Ok(records.into_iter().map(|r| r.question_id).collect())
    }
}

#[derive(Default)]
struct CatalogState {
    units: Vec<UnitRecord>,
    questions: Vec<Question>,
}

#[derive(Default)]
struct CompletionState {
    order: Vec<QuestionId>,
    records: HashMap<QuestionId, Option<DateTime<Utc>>>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Mutex<CatalogState>>,
    completions: Arc<Mutex<CompletionState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog wholesale, as a reload from the backend would.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn replace_catalog(
        &self,
        units: Vec<UnitRecord>,
        questions: Vec<Question>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.units = units;
        guard.questions = questions;
        Ok(())
    }

    /// Seed completions that carry no timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn import_completions<I>(&self, ids: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = QuestionId>,
    {
        let mut guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        for id in ids {
            if !guard.records.contains_key(&id) {
                guard.records.insert(id.clone(), None);
                guard.order.push(id);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn list_units(&self) -> Result<Vec<UnitRecord>, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.units.clone())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.questions.clone())
    }
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn list_completions(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        let guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .order
            .iter()
            .map(|id| CompletionRecord {
                question_id: id.clone(),
                completed_at: guard.records.get(id).copied().flatten(),
            })
            .collect())
    }

    async fn mark_completed(
        &self,
        id: &QuestionId,
        at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let mut guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.records.contains_key(id) {
            return Ok(false);
        }
        guard.records.insert(id.clone(), Some(at));
        guard.order.push(id.clone());
        Ok(true)
    }
}

/// Aggregates the collaborator repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogRepository>,
    pub completions: Arc<dyn CompletionRepository>,
}

impl Storage {
    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        let catalog: Arc<dyn CatalogRepository> = Arc::new(repo.clone());
        let completions: Arc<dyn CompletionRepository> = Arc::new(repo);
        Self {
            catalog,
            completions,
        }
    }
}
