use path_core::LearningPath;
use path_core::model::QuestionId;
use serde::Serialize;

/// Aggregated view of the learner's position, useful for headers and summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathOverview {
    pub units: usize,
    pub completed_units: usize,
    pub tiles: usize,
    pub completed_tiles: usize,
    pub earned_experience: u64,
    pub available_experience: u64,
    pub next: Option<QuestionId>,
}

impl PathOverview {
    #[must_use]
    pub fn from_path(path: &LearningPath) -> Self {
        let completed_units = path
            .units()
            .iter()
            .filter(|u| u.progress().is_complete)
            .count();
        let completed_tiles = path
            .tiles()
            .filter(|(_, tile)| tile.status.is_complete())
            .count();

        Self {
            units: path.units().len(),
            completed_units,
            tiles: path.tile_count(),
            completed_tiles,
            earned_experience: path.earned_experience(),
            available_experience: path.available_experience(),
            next: path.next_tile().map(|(_, tile)| tile.id().clone()),
        }
    }

    /// True once every tile of a non-empty path is complete.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.tiles > 0 && self.completed_tiles == self.tiles
    }
}
