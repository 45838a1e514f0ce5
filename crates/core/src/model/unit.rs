use serde::{Deserialize, Serialize};

use crate::model::ids::UnitId;
use crate::model::tile::Tile;

/// Optional presentation hints carried through from the catalog.
///
/// Never read by the progression logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStyle {
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub text_color: Option<String>,
}

/// A unit as supplied by the catalog, before tiles are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub id: UnitId,
    pub title: String,
    pub level: u32,
    #[serde(default)]
    pub style: UnitStyle,
}

impl UnitRecord {
    #[must_use]
    pub fn new(id: impl Into<UnitId>, title: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
            style: UnitStyle::default(),
        }
    }
}

/// An assembled unit owning its ordered tile sequence.
///
/// Built by the assembler and immutable afterwards; rebuilt whenever the
/// catalog is reloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    title: String,
    level: u32,
    style: UnitStyle,
    tiles: Vec<Tile>,
}

impl Unit {
    #[must_use]
    pub fn from_record(record: UnitRecord, tiles: Vec<Tile>) -> Self {
        Self {
            id: record.id,
            title: record.title,
            level: record.level,
            style: record.style,
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

    /// Tiles in catalog order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
