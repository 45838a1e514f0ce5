use serde::{Deserialize, Serialize};

use crate::model::ids::{QuestionId, UnitId};

/// Exercise type string the catalog uses for multiple-choice questions.
pub const CHOICE_EXERCISE: &str = "Choice";

/// A raw question as supplied by the catalog.
///
/// Questions reference their owning unit through `unit_id`. A reference that
/// matches no known unit is not an error; the assembler drops the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub exercise_type: String,
    pub body: String,
    pub reward: u32,
    pub unit_id: UnitId,
}

impl Question {
    #[must_use]
    pub fn new(
        id: impl Into<QuestionId>,
        exercise_type: impl Into<String>,
        body: impl Into<String>,
        reward: u32,
        unit_id: impl Into<UnitId>,
    ) -> Self {
        Self {
            id: id.into(),
            exercise_type: exercise_type.into(),
            body: body.into(),
            reward,
            unit_id: unit_id.into(),
        }
    }
}
