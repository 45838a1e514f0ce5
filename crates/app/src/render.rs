use std::fmt::Write;

use path_core::model::{TileKind, TileStatus};
use path_core::{LearningPath, PathTile, PathUnit};
use services::PathOverview;

fn marker(tile: &PathTile) -> &'static str {
    match (tile.status, tile.tile.kind) {
        (TileStatus::Complete, _) => "[x]",
        (TileStatus::Active, TileKind::Book) => "[>]",
        (TileStatus::Active, TileKind::Star) => "[*]",
        (TileStatus::Locked, _) => "[ ]",
    }
}

fn render_unit(out: &mut String, unit: &PathUnit) {
    let progress = unit.progress();
    let _ = writeln!(
        out,
        "{} - {} ({}/{})",
        unit.heading(),
        unit.title(),
        progress.completed,
        progress.total
    );
    if unit.tiles().is_empty() {
        let _ = writeln!(out, "    (no exercises yet)");
    }
    for tile in unit.tiles() {
        let _ = writeln!(
            out,
            "    {} {:<6} {:<8} {:>4} xp  {}",
            marker(tile),
            tile.tile.kind,
            tile.status,
            tile.tile.reward,
            tile.id()
        );
    }
}

/// Plain-text rendering of the whole path plus a summary footer.
pub(crate) fn render_path(path: &LearningPath) -> String {
    let mut out = String::new();
    if path.is_empty() {
        out.push_str("No content available yet.\n");
        return out;
    }
    for unit in path.units() {
        render_unit(&mut out, unit);
    }
    let overview = PathOverview::from_path(path);
    let _ = writeln!(
        out,
        "\n{}/{} exercises complete, {} of {} xp earned",
        overview.completed_tiles,
        overview.tiles,
        overview.earned_experience,
        overview.available_experience
    );
    out
}

pub(crate) fn render_next(path: &LearningPath) -> String {
    match path.next_tile() {
        Some((unit, tile)) => format!(
            "{} - {}: {} ({} xp)\n",
            unit.heading(),
            unit.title(),
            tile.tile.description,
            tile.tile.reward
        ),
        None if path.is_empty() => "No content available yet.\n".to_owned(),
        None => "Every exercise is complete.\n".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_core::model::{Question, UnitRecord};
    use path_core::{CompletionSet, build_learning_path};

    fn path(completed: &[&str]) -> LearningPath {
        let units = vec![UnitRecord::new("u1", "Basics", 1), UnitRecord::new("u2", "Empty", 2)];
        let questions = vec![
            Question::new("q1", "Choice", "Pick one", 10, "u1"),
            Question::new("q2", "Open", "Explain", 20, "u1"),
        ];
        let completed: CompletionSet = completed.iter().copied().collect();
        build_learning_path(&units, &questions, &completed)
    }

    #[test]
    fn renders_markers_and_footer() {
        let text = render_path(&path(&["q1"]));
        assert!(text.contains("Unit 1 - Basics (1/2)"));
        assert!(text.contains("[x] book"));
        assert!(text.contains("[*] star   ACTIVE"));
        assert!(text.contains("(no exercises yet)"));
        assert!(text.contains("1/2 exercises complete, 10 of 30 xp earned"));
    }

    #[test]
    fn next_reports_completion_of_everything() {
        assert_eq!(render_next(&path(&["q1", "q2"])), "Every exercise is complete.\n");
        assert_eq!(render_next(&path(&[])), "Unit 1 - Basics: Pick one (10 xp)\n");
    }

    #[test]
    fn empty_path_renders_placeholder() {
        assert_eq!(render_path(&LearningPath::default()), "No content available yet.\n");
    }
}
