//! Tile status derivation.
//!
//! Everything here is a pure function of a unit's tile sequence and a
//! completion snapshot. Nothing is cached; callers recompute whenever either
//! input changes.
//!
//! Rules, in order:
//!
//! 1. A tile whose id is in the completion set is `Complete`, wherever it sits.
//! 2. Otherwise the first tile of the sequence whose id is not completed is `Active`.
//! 3. Every other tile is `Locked`.
//!
//! Completion data is allowed to be out of sequence order: with `{q2}` completed
//! in `[q1, q2, q3]` the result is `[Active, Complete, Locked]`.

use crate::completion::CompletionSet;
use crate::model::{QuestionId, Tile, TileStatus};

/// Status of `tile` within `unit_tiles`.
#[must_use]
pub fn status_of(tile: &Tile, completed: &CompletionSet, unit_tiles: &[Tile]) -> TileStatus {
    if completed.contains(&tile.id) {
        return TileStatus::Complete;
    }
    match first_uncompleted(unit_tiles, completed) {
        Some(first) if first.id == tile.id => TileStatus::Active,
        _ => TileStatus::Locked,
    }
}

/// First tile in sequence order whose id is not completed.
#[must_use]
pub fn first_uncompleted<'a>(unit_tiles: &'a [Tile], completed: &CompletionSet) -> Option<&'a Tile> {
    unit_tiles.iter().find(|t| !completed.contains(&t.id))
}

/// Statuses for a whole sequence in one pass, index-aligned with `unit_tiles`.
///
/// Agrees with [`status_of`] for every tile when ids are unique within the
/// unit. The active slot is positional, so a repeated id can never produce a
/// second `Active`.
#[must_use]
pub fn unit_statuses(unit_tiles: &[Tile], completed: &CompletionSet) -> Vec<TileStatus> {
    let mut active_taken = false;
    unit_tiles
        .iter()
        .map(|tile| {
            if completed.contains(&tile.id) {
                TileStatus::Complete
            } else if active_taken {
                TileStatus::Locked
            } else {
                active_taken = true;
                TileStatus::Active
            }
        })
        .collect()
}

/// Navigation guard: an exercise may be started only while its tile is `Active`.
///
/// The identifier does not influence the outcome.
#[must_use]
pub fn can_enter(_tile_id: &QuestionId, status: TileStatus) -> bool {
    status.is_active()
}
