//! Goal-mouth zone definitions
//!
//! The goal mouth is split into 18 zones on a 3x6 grid, numbered row-major
//! from the top-left corner as the shooter sees it:
//!
//! ```text
//!            Far Left  Left  Centre L  Centre R  Right  Far Right
//! Top           Z1      Z2      Z3        Z4      Z5      Z6
//! Middle        Z7      Z8      Z9        Z10     Z11     Z12
//! Bottom        Z13     Z14     Z15       Z16     Z17     Z18
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub const ZONE_COUNT: usize = 18;
pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 6;

pub const ROW_LABELS: [&str; GRID_ROWS] = ["Top", "Middle", "Bottom"];
pub const COL_LABELS: [&str; GRID_COLS] =
    ["Far Left", "Left", "Centre Left", "Centre Right", "Right", "Far Right"];

/// Values laid out as the goal mouth: `grid[row][col]`.
pub type ZoneGrid<T> = [[T; GRID_COLS]; GRID_ROWS];

/// Zone identifier, always within 1..=18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ZoneId(u8);

impl ZoneId {
    pub const FIRST: ZoneId = ZoneId(1);
    pub const LAST: ZoneId = ZoneId(ZONE_COUNT as u8);

    /// Zone from its 1-based number.
    pub fn new(number: u8) -> Option<Self> {
        if (1..=ZONE_COUNT as u8).contains(&number) {
            Some(ZoneId(number))
        } else {
            None
        }
    }

    /// Zone from a 0-based array index.
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx < ZONE_COUNT {
            Some(ZoneId(idx as u8 + 1))
        } else {
            None
        }
    }

    /// Zone at a grid cell.
    pub fn from_cell(row: usize, col: usize) -> Option<Self> {
        if row < GRID_ROWS && col < GRID_COLS {
            Self::from_index(row * GRID_COLS + col)
        } else {
            None
        }
    }

    /// 1-based zone number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// 0-based index into per-zone arrays.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn row(self) -> usize {
        self.index() / GRID_COLS
    }

    pub fn col(self) -> usize {
        self.index() % GRID_COLS
    }

    /// Tabular column header for this zone ("Z1".."Z18").
    pub fn column_name(self) -> String {
        format!("Z{}", self.0)
    }

    pub fn row_label(self) -> &'static str {
        ROW_LABELS[self.row()]
    }

    pub fn col_label(self) -> &'static str {
        COL_LABELS[self.col()]
    }

    /// All zones in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = ZoneId> + ExactSizeIterator + Clone {
        (1..=ZONE_COUNT as u8).map(ZoneId)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z{}", self.0)
    }
}

impl TryFrom<u8> for ZoneId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ZoneId::new(value).ok_or_else(|| format!("zone must be 1..=18, got {value}"))
    }
}

impl From<ZoneId> for u8 {
    fn from(zone: ZoneId) -> u8 {
        zone.0
    }
}

/// Reshape a flat per-zone array into the 3x6 goal-mouth grid.
pub fn to_grid<T: Copy + Default>(values: &[T; ZONE_COUNT]) -> ZoneGrid<T> {
    let mut grid = [[T::default(); GRID_COLS]; GRID_ROWS];
    for zone in ZoneId::all() {
        grid[zone.row()][zone.col()] = values[zone.index()];
    }
    grid
}
