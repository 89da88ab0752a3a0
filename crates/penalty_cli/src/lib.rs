//! penalty_cli library
//!
//! CSV / XLSX roster import and plain-text report rendering used by the
//! `penalty_sim` binary.

pub mod report;
pub mod roster_import;

pub use report::{render_goal_map, render_grid, render_heatmap_panel, render_results, RunRecord};
pub use roster_import::{import_into, load_roster, parse_roster, parse_workbook, ImportError};
