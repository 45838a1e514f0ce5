//! Catalog snapshots exported by the backend.
//!
//! The JSON uses the backend's document field names:
//!
//! ```json
//! {
//!   "units":     [{ "_id": "u1", "title": "Intro", "level": 1, "backgroundColor": "bg-[#58cc02]" }],
//!   "questions": [{ "_id": "q1", "type": "Choice", "body": "…", "exp": 10, "unit_id": "u1" }],
//!   "completed": ["q1"]
//! }
//! ```

use std::path::Path;

use path_core::model::{Question, QuestionId, UnitRecord};
use serde::Deserialize;
use tracing::debug;

use crate::mapping::{map_question_doc, map_unit_doc};
use crate::repository::{InMemoryRepository, StorageError};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UnitDoc {
    #[serde(rename = "_id")]
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) level: f64,
    #[serde(rename = "backgroundColor", default)]
    pub(crate) background_color: Option<String>,
    #[serde(rename = "borderColor", default)]
    pub(crate) border_color: Option<String>,
    #[serde(rename = "textColor", default)]
    pub(crate) text_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct QuestionDoc {
    #[serde(rename = "_id")]
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub(crate) exercise_type: String,
    #[serde(default)]
    pub(crate) body: String,
    #[serde(default)]
    pub(crate) exp: f64,
    pub(crate) unit_id: String,
}

#[derive(Debug, Deserialize)]
struct SnapshotDoc {
    #[serde(default)]
    units: Vec<UnitDoc>,
    #[serde(default)]
    questions: Vec<QuestionDoc>,
    #[serde(default)]
    completed: Vec<String>,
}

/// A validated catalog plus completion list, ready to seed a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub units: Vec<UnitRecord>,
    pub questions: Vec<Question>,
    pub completed: Vec<QuestionId>,
}

impl CatalogSnapshot {
    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON, blank ids, or
    /// levels and rewards that are not whole non-negative numbers.
    pub fn from_json_str(json: &str) -> Result<Self, StorageError> {
        let doc: SnapshotDoc =
            serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;

        let units = doc
            .units
            .into_iter()
            .map(map_unit_doc)
            .collect::<Result<Vec<_>, _>>()?;
        let questions = doc
            .questions
            .into_iter()
            .map(map_question_doc)
            .collect::<Result<Vec<_>, _>>()?;
        let completed = doc
            .completed
            .into_iter()
            .filter(|id| !id.trim().is_empty())
            .map(QuestionId::new)
            .collect();

        Ok(Self {
            units,
            questions,
            completed,
        })
    }

    /// Read and parse a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the file is missing, `StorageError::Io`
    /// for other read failures, and parsing errors as in [`Self::from_json_str`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound
            } else {
                StorageError::Io(format!("{}: {e}", path.display()))
            }
        })?;
        let snapshot = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            units = snapshot.units.len(),
            questions = snapshot.questions.len(),
            completed = snapshot.completed.len(),
            "loaded catalog snapshot"
        );
        Ok(snapshot)
    }

    /// Seed an in-memory repository with this snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the repository lock is poisoned.
    pub fn into_repository(self) -> Result<InMemoryRepository, StorageError> {
        let repo = InMemoryRepository::new();
        repo.replace_catalog(self.units, self.questions)?;
        repo.import_completions(self.completed)?;
        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "units": [
            { "_id": "u2", "title": "Loops", "level": 2 },
            { "_id": "u1", "title": "Basics", "level": 1, "borderColor": "border-[#46a302]" }
        ],
        "questions": [
            { "_id": "q1", "type": "Choice", "body": "Pick", "exp": 10, "unit_id": "u1" },
            { "_id": "q2", "type": "Code", "body": "Write", "unit_id": "u1" }
        ],
        "completed": ["q1", " "]
    }"#;

    #[test]
    fn parses_backend_field_names() {
        let snapshot = CatalogSnapshot::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.units.len(), 2);
        assert_eq!(
            snapshot.units[1].style.border_color.as_deref(),
            Some("border-[#46a302]")
        );
        assert_eq!(snapshot.questions[0].exercise_type, "Choice");
        assert_eq!(snapshot.questions[1].reward, 0);
        assert_eq!(snapshot.completed, vec![QuestionId::new("q1")]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let snapshot = CatalogSnapshot::from_json_str("{}").unwrap();
        assert_eq!(snapshot, CatalogSnapshot::default());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = CatalogSnapshot::from_json_str("{ units: ").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
