//! Roster import - CSV / XLSX → Vec<PlayerRecord>
//!
//! Expected header (order free, extra columns ignored, header cells trimmed):
//!
//! ```text
//! Name, Role, Z1, Z2, ..., Z18
//! ```
//!
//! The Spanish headers `Nombre` / `Rol` are accepted as well. `.xlsx` files
//! are read from their first worksheet; anything else is read as CSV. Both
//! go through the same header lookup and per-cell checks. Loading is
//! all-or-nothing: the first missing column or bad cell rejects the whole
//! file, and the caller's roster is only replaced after every row parsed.

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use penalty_core::models::{
    parse_probability, PlayerRecord, Role, Roster, ZoneId, ZoneProbabilities, ZONE_COUNT,
};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to open roster file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("Workbook has no worksheet")]
    NoWorksheet,

    #[error("Missing required column '{0}' (file must have Name, Role and Z1..Z18)")]
    MissingColumn(String),

    #[error("Line {line}, column {column}: {reason}")]
    InvalidCell { line: u64, column: String, value: String, reason: String },
}

impl ImportError {
    /// Column the error names, if it is about a specific column.
    pub fn column(&self) -> Option<&str> {
        match self {
            ImportError::MissingColumn(column) | ImportError::InvalidCell { column, .. } => {
                Some(column)
            }
            _ => None,
        }
    }
}

const NAME_HEADERS: [&str; 2] = ["name", "nombre"];
const ROLE_HEADERS: [&str; 2] = ["role", "rol"];

/// Column positions of the 20 required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnLayout {
    name: usize,
    role: usize,
    zones: [usize; ZONE_COUNT],
}

impl ColumnLayout {
    fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, ImportError> {
        let normalized: Vec<String> = headers
            .into_iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();

        let name = position_of(&normalized, &NAME_HEADERS)
            .ok_or_else(|| ImportError::MissingColumn("Name".to_string()))?;
        let role = position_of(&normalized, &ROLE_HEADERS)
            .ok_or_else(|| ImportError::MissingColumn("Role".to_string()))?;

        let mut zones = [0usize; ZONE_COUNT];
        for zone in ZoneId::all() {
            let column = zone.column_name();
            let wanted = column.to_lowercase();
            zones[zone.index()] =
                position_of(&normalized, &[wanted.as_str()]).ok_or(ImportError::MissingColumn(column))?;
        }

        Ok(Self { name, role, zones })
    }
}

fn position_of(headers: &[String], candidates: &[&str]) -> Option<usize> {
    headers.iter().position(|h| candidates.iter().any(|c| *c == h.as_str()))
}

/// Trimmed cell text; cells past the end of a short row read as blank.
fn cell<'a>(cells: &[&'a str], idx: usize) -> &'a str {
    cells.get(idx).copied().unwrap_or("").trim()
}

fn parse_row(cells: &[&str], layout: &ColumnLayout, line: u64) -> Result<PlayerRecord, ImportError> {
    let name = cell(cells, layout.name);
    if name.is_empty() {
        return Err(ImportError::InvalidCell {
            line,
            column: "Name".to_string(),
            value: String::new(),
            reason: "Name is empty".to_string(),
        });
    }

    let raw_role = cell(cells, layout.role);
    let role = raw_role.parse::<Role>().map_err(|reason| ImportError::InvalidCell {
        line,
        column: "Role".to_string(),
        value: raw_role.to_string(),
        reason,
    })?;

    let mut values = [0.0; ZONE_COUNT];
    for zone in ZoneId::all() {
        let column = zone.column_name();
        let raw = cell(cells, layout.zones[zone.index()]);
        values[zone.index()] =
            parse_probability(&column, raw).map_err(|e| ImportError::InvalidCell {
                line,
                column: column.clone(),
                value: raw.to_string(),
                reason: e.to_string(),
            })?;
    }

    let zones = ZoneProbabilities::new(values).map_err(|e| ImportError::InvalidCell {
        line,
        column: e.fields.first().and_then(|f| f.field()).unwrap_or("Z?").to_string(),
        value: String::new(),
        reason: e.to_string(),
    })?;

    Ok(PlayerRecord::new(name, role, zones))
}

/// Parse every row of a CSV roster table.
pub fn parse_roster<R: io::Read>(reader: R) -> Result<Vec<PlayerRecord>, ImportError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

    let layout = ColumnLayout::from_headers(reader.headers()?.iter())?;

    let mut players = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let cells: Vec<&str> = record.iter().collect();
        players.push(parse_row(&cells, &layout, line)?);
    }

    tracing::debug!(players = players.len(), "roster table parsed");
    Ok(players)
}

fn cell_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Parse the first worksheet of an Excel roster.
pub fn parse_workbook(path: &Path) -> Result<Vec<PlayerRecord>, ImportError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| match e {
        XlsxError::Io(source) => ImportError::Io { path: path.display().to_string(), source },
        other => ImportError::Xlsx(other),
    })?;
    let range = workbook.worksheet_range_at(0).ok_or(ImportError::NoWorksheet)??;

    let first_line = range.start().map(|(row, _)| row as u64 + 1).unwrap_or(1);
    let mut rows = range.rows().map(|row| row.iter().map(cell_text).collect::<Vec<_>>());

    let headers = rows.next().unwrap_or_default();
    let layout = ColumnLayout::from_headers(headers.iter().map(String::as_str))?;

    let mut players = Vec::new();
    for (offset, row) in rows.enumerate() {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        players.push(parse_row(&cells, &layout, first_line + offset as u64 + 1)?);
    }

    tracing::debug!(players = players.len(), "roster worksheet parsed");
    Ok(players)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("xlsx"))
}

/// Parse a roster file; `.xlsx` is read as a workbook, anything else as CSV.
pub fn load_roster(path: &Path) -> Result<Vec<PlayerRecord>, ImportError> {
    let parsed = if is_workbook(path) {
        parse_workbook(path)
    } else {
        let file = File::open(path)
            .map_err(|source| ImportError::Io { path: path.display().to_string(), source })?;
        parse_roster(file)
    };

    parsed.map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "roster import rejected");
        e
    })
}

/// Replace `roster` with the players in `path`. On error `roster` is left
/// exactly as it was. Returns the number of players loaded.
pub fn import_into(roster: &mut Roster, path: &Path) -> Result<usize, ImportError> {
    let players = load_roster(path)?;
    let count = players.len();
    roster.replace_with(players);
    tracing::info!(path = %path.display(), players = count, "roster imported");
    Ok(count)
}
