use serde::{Deserialize, Serialize};

use crate::assembler::assemble;
use crate::completion::CompletionSet;
use crate::model::{Question, QuestionId, Tile, TileStatus, Unit, UnitId, UnitRecord, UnitStyle};
use crate::progression::{can_enter, unit_statuses};

//
// ─── ANNOTATED TILES AND UNITS ─────────────────────────────────────────────────
//

/// A tile together with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTile {
    pub tile: Tile,
    pub status: TileStatus,
}

impl PathTile {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.tile.id
    }

    #[must_use]
    pub fn can_enter(&self) -> bool {
        can_enter(&self.tile.id, self.status)
    }
}

/// Aggregated completion counts for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitProgress {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    /// False for a unit with no tiles.
    pub is_complete: bool,
}

/// A unit in display order with every tile annotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathUnit {
    id: UnitId,
    title: String,
    level: u32,
    style: UnitStyle,
    tiles: Vec<PathTile>,
}

impl PathUnit {
    /// Derive statuses for every tile of `unit` against `completed`.
    #[must_use]
    pub fn annotate(unit: &Unit, completed: &CompletionSet) -> Self {
        let statuses = unit_statuses(unit.tiles(), completed);
        let tiles = unit
            .tiles()
            .iter()
            .cloned()
            .zip(statuses)
            .map(|(tile, status)| PathTile { tile, status })
            .collect();

        Self {
            id: unit.id().clone(),
            title: unit.title().to_owned(),
            level: unit.level(),
            style: unit.style().clone(),
            tiles,
        }
    }

    #[must_use]
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn style(&self) -> &UnitStyle {
        &self.style
    }

    #[must_use]
    pub fn tiles(&self) -> &[PathTile] {
        &self.tiles
    }

    /// Header label shown above the unit, e.g. `Unit 3`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Unit {}", self.level)
    }

    /// The single active tile of this unit, if any.
    #[must_use]
    pub fn active_tile(&self) -> Option<&PathTile> {
        self.tiles.iter().find(|t| t.status.is_active())
    }

    #[must_use]
    pub fn progress(&self) -> UnitProgress {
        let total = self.tiles.len();
        let completed = self.tiles.iter().filter(|t| t.status.is_complete()).count();
        UnitProgress {
            total,
            completed,
            remaining: total - completed,
            is_complete: total > 0 && completed == total,
        }
    }
}

//
// ─── LEARNING PATH ─────────────────────────────────────────────────────────────
//

/// The full ordered path handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    units: Vec<PathUnit>,
}

impl LearningPath {
    #[must_use]
    pub fn from_units(units: &[Unit], completed: &CompletionSet) -> Self {
        Self {
            units: units
                .iter()
                .map(|unit| PathUnit::annotate(unit, completed))
                .collect(),
        }
    }

    #[must_use]
    pub fn units(&self) -> &[PathUnit] {
        &self.units
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = (&PathUnit, &PathTile)> {
        self.units
            .iter()
            .flat_map(|unit| unit.tiles.iter().map(move |tile| (unit, tile)))
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.units.iter().map(|u| u.tiles.len()).sum()
    }

    /// Locate a tile and its owning unit by question id.
    ///
    /// Question ids are expected to be unique across the catalog. If one
    /// repeats, the occurrence in the earliest unit wins.
    #[must_use]
    pub fn find_tile(&self, id: &QuestionId) -> Option<(&PathUnit, &PathTile)> {
        self.tiles().find(|(_, tile)| tile.id() == id)
    }

    /// First active tile walking units in display order.
    #[must_use]
    pub fn next_tile(&self) -> Option<(&PathUnit, &PathTile)> {
        self.tiles().find(|(_, tile)| tile.status.is_active())
    }

    /// Sum of rewards over completed tiles.
    #[must_use]
    pub fn earned_experience(&self) -> u64 {
        self.tiles()
            .filter(|(_, tile)| tile.status.is_complete())
            .map(|(_, tile)| u64::from(tile.tile.reward))
            .sum()
    }

    /// Sum of rewards over every tile in the path.
    #[must_use]
    pub fn available_experience(&self) -> u64 {
        self.tiles().map(|(_, tile)| u64::from(tile.tile.reward)).sum()
    }
}

/// Build the annotated, ordered learning path from raw catalog data.
///
/// An empty unit list or an empty question list yields an empty path; showing
/// a loading or empty state is up to the caller.
#[must_use]
pub fn build_learning_path(
    units: &[UnitRecord],
    questions: &[Question],
    completed: &CompletionSet,
) -> LearningPath {
    if units.is_empty() || questions.is_empty() {
        return LearningPath::default();
    }
    LearningPath::from_units(&assemble(units, questions), completed)
}
