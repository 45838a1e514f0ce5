use path_core::model::{Question, QuestionId, UnitId, UnitRecord, UnitStyle};

use crate::repository::StorageError;
use crate::snapshot::{QuestionDoc, UnitDoc};

fn non_empty(field: &'static str, raw: String) -> Result<String, StorageError> {
    if raw.trim().is_empty() {
        return Err(StorageError::Serialization(format!("{field} is empty")));
    }
    Ok(raw)
}

/// Backend numbers may arrive as `10` or `10.0`; only whole values in `u32` range pass.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_u32(field: &'static str, v: f64) -> Result<u32, StorageError> {
    if !v.is_finite() || v.fract() != 0.0 || v < 0.0 || v > f64::from(u32::MAX) {
        return Err(StorageError::Serialization(format!(
            "{field} is not a whole non-negative number: {v}"
        )));
    }
    Ok(v as u32)
}

pub(crate) fn map_unit_doc(doc: UnitDoc) -> Result<UnitRecord, StorageError> {
    let style = UnitStyle {
        background_color: doc.background_color,
        border_color: doc.border_color,
        text_color: doc.text_color,
    };
    Ok(UnitRecord {
        id: UnitId::new(non_empty("unit _id", doc.id)?),
        title: doc.title,
        level: whole_u32("unit level", doc.level)?,
        style,
    })
}

pub(crate) fn map_question_doc(doc: QuestionDoc) -> Result<Question, StorageError> {
    Ok(Question {
        id: QuestionId::new(non_empty("question _id", doc.id)?),
        exercise_type: doc.exercise_type,
        body: doc.body,
        reward: whole_u32("question exp", doc.exp)?,
        unit_id: UnitId::new(non_empty("question unit_id", doc.unit_id)?),
    })
}
