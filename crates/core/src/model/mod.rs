mod ids;
mod question;
mod tile;
mod unit;

pub use ids::{IdError, QuestionId, UnitId};
pub use question::{CHOICE_EXERCISE, Question};
pub use tile::{Tile, TileKind, TileStatus};
pub use unit::{Unit, UnitRecord, UnitStyle};
