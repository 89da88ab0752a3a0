pub mod player;
pub mod roster;
pub mod zone;

pub use player::{parse_probability, PlayerRecord, Role, ZoneProbabilities, SHOOTER_DEFAULT_PROBABILITY};
pub use roster::{RoleCounts, Roster};
pub use zone::{to_grid, ZoneGrid, ZoneId, COL_LABELS, GRID_COLS, GRID_ROWS, ROW_LABELS, ZONE_COUNT};
