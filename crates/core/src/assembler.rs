//! Grouping tiles under their units and ordering units for display.

use std::collections::{HashMap, HashSet};

use crate::mapper::map_to_tile;
use crate::model::{Question, QuestionId, Tile, Unit, UnitId, UnitRecord};

/// Attach each unit's tiles and order units by ascending level.
///
/// Tiles keep the order their questions have in `questions`. Units with equal
/// levels keep their input order (stable sort). Questions pointing at an
/// unknown unit are dropped.
#[must_use]
pub fn assemble(units: &[UnitRecord], questions: &[Question]) -> Vec<Unit> {
    let mut by_unit: HashMap<&UnitId, Vec<Tile>> = HashMap::new();
    for question in questions {
        by_unit
            .entry(&question.unit_id)
            .or_default()
            .push(map_to_tile(question));
    }

    let mut assembled: Vec<Unit> = units
        .iter()
        .map(|record| {
            let tiles = by_unit.get(&record.id).cloned().unwrap_or_default();
            Unit::from_record(record.clone(), tiles)
        })
        .collect();

    assembled.sort_by_key(Unit::level);
    assembled
}

/// Questions whose unit reference matches none of `units`, in input order.
#[must_use]
pub fn orphaned_questions<'a>(units: &[UnitRecord], questions: &'a [Question]) -> Vec<&'a Question> {
    let known: HashSet<&UnitId> = units.iter().map(|u| &u.id).collect();
    questions
        .iter()
        .filter(|q| !known.contains(&q.unit_id))
        .collect()
}

/// Question ids that occur more than once, in order of first repeat.
///
/// Tiles are looked up by id across the whole path, so only the first
/// occurrence of a repeated id can be found.
#[must_use]
pub fn duplicate_question_ids(questions: &[Question]) -> Vec<&QuestionId> {
    let mut seen: HashSet<&QuestionId> = HashSet::new();
    let mut reported: HashSet<&QuestionId> = HashSet::new();
    let mut duplicates = Vec::new();
    for question in questions {
        if !seen.insert(&question.id) && reported.insert(&question.id) {
            duplicates.push(&question.id);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(unit: &Unit) -> Vec<&str> {
        unit.tiles().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn orders_units_by_ascending_level() {
        let units = vec![
            UnitRecord::new("u2", "Second", 2),
            UnitRecord::new("u1", "First", 1),
        ];
        let out = assemble(&units, &[]);
        let levels: Vec<u32> = out.iter().map(Unit::level).collect();
        assert_eq!(levels, vec![1, 2]);
    }

    #[test]
    fn equal_levels_keep_input_order() {
        let units = vec![
            UnitRecord::new("b", "B", 1),
            UnitRecord::new("a", "A", 1),
            UnitRecord::new("c", "C", 0),
        ];
        let out = assemble(&units, &[]);
        let order: Vec<&str> = out.iter().map(|u| u.id().as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn tiles_follow_question_order_within_unit() {
        let units = vec![UnitRecord::new("u1", "One", 1), UnitRecord::new("u2", "Two", 2)];
        let questions = vec![
            Question::new("q3", "Choice", "", 1, "u1"),
            Question::new("x1", "Open", "", 1, "u2"),
            Question::new("q1", "Open", "", 1, "u1"),
            Question::new("q2", "Choice", "", 1, "u1"),
        ];
        let out = assemble(&units, &questions);
        assert_eq!(ids(&out[0]), vec!["q3", "q1", "q2"]);
        assert_eq!(ids(&out[1]), vec!["x1"]);
    }

    #[test]
    fn unit_without_questions_gets_empty_sequence() {
        let units = vec![UnitRecord::new("u1", "Lonely", 1)];
        let questions = vec![Question::new("q1", "Choice", "", 1, "elsewhere")];
        let out = assemble(&units, &questions);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_empty());
    }

    #[test]
    fn orphaned_questions_are_dropped_and_reported() {
        let units = vec![UnitRecord::new("u1", "One", 1)];
        let questions = vec![
            Question::new("q1", "Choice", "", 1, "u1"),
            Question::new("q2", "Choice", "", 1, "ghost"),
        ];
        let out = assemble(&units, &questions);
        assert_eq!(ids(&out[0]), vec!["q1"]);

        let orphans = orphaned_questions(&units, &questions);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, QuestionId::new("q2"));
    }

    #[test]
    fn repeated_question_ids_are_reported_once() {
        let questions = vec![
            Question::new("q1", "Choice", "", 1, "u1"),
            Question::new("q2", "Choice", "", 1, "u1"),
            Question::new("q1", "Open", "", 1, "u2"),
            Question::new("q1", "Open", "", 1, "u3"),
        ];
        assert_eq!(duplicate_question_ids(&questions), vec![&QuestionId::new("q1")]);
        assert!(duplicate_question_ids(&questions[..2]).is_empty());
    }
}
