//! Plain-text rendering of simulation output and the JSON run record.

use penalty_core::engine::HeatmapPanel;
use penalty_core::models::{ZoneGrid, COL_LABELS, ROW_LABELS};
use penalty_core::{GoalZoneMap, SimulationReport, SimulationResult};
use serde::Serialize;
use std::fmt::Write;

const ROW_LABEL_WIDTH: usize = 8;
const CELL_WIDTH: usize = 13;

/// Results table: shooter, goals, non-goals, effectiveness.
pub fn render_results(results: &[SimulationResult]) -> String {
    let name_width = results
        .iter()
        .map(|r| r.shooter.chars().count())
        .max()
        .unwrap_or(0)
        .max("Shooter".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>6}  {:>10}  {:>13}",
        "Shooter", "Goals", "Non-goals", "Effectiveness"
    );
    let _ = writeln!(out, "{}", "-".repeat(name_width + 2 + 6 + 2 + 10 + 2 + 13));
    for r in results {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>6}  {:>10}  {:>12.2}%",
            r.shooter, r.goals, r.non_goals, r.effectiveness
        );
    }
    out
}

fn grid_header(out: &mut String) {
    let _ = write!(out, "{:<ROW_LABEL_WIDTH$}", "");
    for label in COL_LABELS {
        let _ = write!(out, "{:>CELL_WIDTH$}", label);
    }
    out.push('\n');
}

/// 3x6 grid of probabilities with row and column labels.
pub fn render_grid(title: &str, grid: &ZoneGrid<f64>) -> String {
    let mut out = format!("{title}\n");
    grid_header(&mut out);
    for (label, row) in ROW_LABELS.iter().zip(grid.iter()) {
        let _ = write!(out, "{:<ROW_LABEL_WIDTH$}", label);
        for cell in row {
            let _ = write!(out, "{:>CELL_WIDTH$.2}", cell);
        }
        out.push('\n');
    }
    out
}

/// Goals per zone across every shooter.
pub fn render_goal_map(map: &GoalZoneMap) -> String {
    let mut out = format!("Goals by zone (total {})\n", map.total());
    grid_header(&mut out);
    for (label, row) in ROW_LABELS.iter().zip(map.as_grid().iter()) {
        let _ = write!(out, "{:<ROW_LABEL_WIDTH$}", label);
        for cell in row {
            let _ = write!(out, "{:>CELL_WIDTH$}", cell);
        }
        out.push('\n');
    }
    out
}

/// Goalkeeper save grid followed by each displayed shooter's
/// expected-goal grid; unused slots are noted.
pub fn render_heatmap_panel(panel: &HeatmapPanel) -> String {
    let mut out = render_grid(&format!("Save probability: {}", panel.goalkeeper), &panel.save_grid);

    for shooter in &panel.shooters {
        out.push('\n');
        out.push_str(&render_grid(
            &format!(
                "Expected goal probability: {} ({:.2}% per attempt)",
                shooter.name,
                shooter.expected_per_attempt * 100.0
            ),
            &shooter.grid,
        ));
    }

    for _ in 0..panel.empty_slots() {
        out.push_str("\n(no more shooters to display)\n");
    }
    if panel.hidden_shooters > 0 {
        let _ = writeln!(out, "\n{} more shooter(s) not displayed", panel.hidden_shooters);
    }
    out
}

/// JSON record written by `simulate --json-out`.
#[derive(Debug, Serialize)]
pub struct RunRecord<'a> {
    /// RFC3339 creation time
    pub created_at: String,
    pub roster_file: String,
    pub report: &'a SimulationReport,
    pub heatmap: &'a HeatmapPanel,
}

impl<'a> RunRecord<'a> {
    pub fn new(roster_file: String, report: &'a SimulationReport, heatmap: &'a HeatmapPanel) -> Self {
        Self { created_at: chrono::Utc::now().to_rfc3339(), roster_file, report, heatmap }
    }
}
