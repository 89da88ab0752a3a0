use thiserror::Error;

/// A single rejected input field (a zone cell, the name or the role).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{field} is empty")]
    Empty { field: String },

    #[error("{field}: '{value}' is not a number")]
    NotNumeric { field: String, value: String },

    #[error("{field}: {value} is outside 0.0..=1.0")]
    OutOfRange { field: String, value: f64 },

    #[error("{field}: unknown role '{value}'")]
    UnknownRole { field: String, value: String },

    #[error("missing zone {field}")]
    MissingZone { field: String },

    #[error("expected 18 zone values, got {found}")]
    ExtraZones { found: usize },
}

impl FieldError {
    /// Column / field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            FieldError::Empty { field }
            | FieldError::NotNumeric { field, .. }
            | FieldError::OutOfRange { field, .. }
            | FieldError::UnknownRole { field, .. }
            | FieldError::MissingZone { field } => Some(field),
            FieldError::ExtraZones { .. } => None,
        }
    }
}

/// Player entry rejected; every offending field is listed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid player entry: {}", join_fields(.fields))]
pub struct EntryError {
    pub fields: Vec<FieldError>,
}

impl EntryError {
    pub fn single(error: FieldError) -> Self {
        Self { fields: vec![error] }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Roster composition is not simulatable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("exactly 1 goalkeeper required, found {goalkeepers} goalkeepers")]
    GoalkeeperCount { goalkeepers: usize, shooters: usize },

    #[error("at least 1 shooter required, found {shooters} shooters")]
    NoShooters { goalkeepers: usize, shooters: usize },
}

impl RosterError {
    /// (goalkeepers, shooters) counted at validation time.
    pub fn counts(&self) -> (usize, usize) {
        match *self {
            RosterError::GoalkeeperCount { goalkeepers, shooters }
            | RosterError::NoShooters { goalkeepers, shooters } => (goalkeepers, shooters),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("shots per shooter must be a positive integer, got '{0}'")]
    InvalidShotCount(String),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("simulation cancelled after {completed} of {total} shooters")]
    Cancelled { completed: usize, total: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Umbrella error for the public API.
#[derive(Error, Debug)]
pub enum PenaltyError {
    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PenaltyError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            PenaltyError::Deserialization(err.to_string())
        } else {
            PenaltyError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, PenaltyError>;
