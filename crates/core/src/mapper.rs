//! Question to tile mapping.

use crate::model::{CHOICE_EXERCISE, Question, Tile, TileKind};

/// Kind for an exercise type string. Anything other than `"Choice"` is a star.
#[must_use]
pub fn kind_for(exercise_type: &str) -> TileKind {
    if exercise_type == CHOICE_EXERCISE {
        TileKind::Book
    } else {
        TileKind::Star
    }
}

/// Map a raw question to its tile descriptor. Total: never fails.
#[must_use]
pub fn map_to_tile(question: &Question) -> Tile {
    Tile {
        id: question.id.clone(),
        kind: kind_for(&question.exercise_type),
        description: question.body.clone(),
        reward: question.reward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;

    #[test]
    fn choice_questions_become_books() {
        let q = Question::new("q1", "Choice", "Pick one", 10, "u1");
        let tile = map_to_tile(&q);
        assert_eq!(tile.id, QuestionId::new("q1"));
        assert_eq!(tile.kind, TileKind::Book);
        assert_eq!(tile.description, "Pick one");
        assert_eq!(tile.reward, 10);
    }

    #[test]
    fn other_exercise_types_become_stars() {
        let open = Question::new("q2", "Open", "Explain", 5, "u1");
        assert_eq!(map_to_tile(&open).kind, TileKind::Star);
    }

    #[test]
    fn unknown_and_differently_cased_types_default_to_star() {
        assert_eq!(kind_for(""), TileKind::Star);
        assert_eq!(kind_for("choice"), TileKind::Star);
        assert_eq!(kind_for("Matching"), TileKind::Star);
    }
}
