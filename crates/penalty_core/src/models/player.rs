use super::zone::{to_grid, ZoneGrid, ZoneId, ZONE_COUNT};
use crate::error::{EntryError, FieldError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value used for blank shooter fields on manual entry.
pub const SHOOTER_DEFAULT_PROBABILITY: f64 = 0.5;

/// Serialized lowercase; deserialized through [`FromStr`], so every label
/// the importer accepts is accepted here too.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Goalkeeper,
    Shooter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "Goalkeeper",
            Role::Shooter => "Shooter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goalkeeper" | "gk" | "keeper" | "portero" => Ok(Role::Goalkeeper),
            "shooter" | "taker" | "tirador" => Ok(Role::Shooter),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse one probability cell. Blank, non-numeric, non-finite and
/// out-of-range text are all rejected.
pub fn parse_probability(field: &str, raw: &str) -> Result<f64, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Empty { field: field.to_string() });
    }
    let value = match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            return Err(FieldError::NotNumeric {
                field: field.to_string(),
                value: raw.to_string(),
            })
        }
    };
    check_probability(field, value)
}

fn check_probability(field: &str, value: f64) -> Result<f64, FieldError> {
    if !value.is_finite() {
        return Err(FieldError::NotNumeric { field: field.to_string(), value: value.to_string() });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(FieldError::OutOfRange { field: field.to_string(), value });
    }
    Ok(value)
}

/// Per-zone probabilities, all 18 present and within [0.0, 1.0].
///
/// For a goalkeeper each value is the chance of saving an on-target shot
/// into that zone; for a shooter it is the chance that an attempt at that
/// zone lands on target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ZoneProbabilities([f64; ZONE_COUNT]);

impl ZoneProbabilities {
    pub fn new(values: [f64; ZONE_COUNT]) -> Result<Self, EntryError> {
        let errors: Vec<FieldError> = ZoneId::all()
            .filter_map(|zone| {
                check_probability(&zone.column_name(), values[zone.index()]).err()
            })
            .collect();

        if errors.is_empty() {
            Ok(Self(values))
        } else {
            Err(EntryError { fields: errors })
        }
    }

    /// Build from a slice that must hold exactly 18 values.
    pub fn from_slice(values: &[f64]) -> Result<Self, EntryError> {
        if values.len() > ZONE_COUNT {
            return Err(EntryError::single(FieldError::ExtraZones { found: values.len() }));
        }
        if values.len() < ZONE_COUNT {
            let missing = ZoneId::all()
                .skip(values.len())
                .map(|zone| FieldError::MissingZone { field: zone.column_name() })
                .collect();
            return Err(EntryError { fields: missing });
        }

        let mut array = [0.0; ZONE_COUNT];
        array.copy_from_slice(values);
        Self::new(array)
    }

    /// Same probability in every zone. `p` must be within [0.0, 1.0].
    pub fn uniform(p: f64) -> Result<Self, EntryError> {
        Self::new([p; ZONE_COUNT])
    }

    pub fn get(&self, zone: ZoneId) -> f64 {
        self.0[zone.index()]
    }

    pub fn as_array(&self) -> &[f64; ZONE_COUNT] {
        &self.0
    }

    pub fn as_grid(&self) -> ZoneGrid<f64> {
        to_grid(&self.0)
    }
}

impl TryFrom<Vec<f64>> for ZoneProbabilities {
    type Error = EntryError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<ZoneProbabilities> for Vec<f64> {
    fn from(zones: ZoneProbabilities) -> Vec<f64> {
        zones.0.to_vec()
    }
}

/// A goalkeeper or shooter with its 18 zone probabilities.
///
/// Every constructor validates, so a `PlayerRecord` in hand is always
/// simulatable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub role: Role,
    pub zones: ZoneProbabilities,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, role: Role, zones: ZoneProbabilities) -> Self {
        Self { name: name.into(), role, zones }
    }

    pub fn from_values(
        name: impl Into<String>,
        role: Role,
        values: &[f64],
    ) -> Result<Self, EntryError> {
        Ok(Self::new(name, role, ZoneProbabilities::from_slice(values)?))
    }

    /// Build a record from raw form text, one string per zone (Z1..Z18).
    ///
    /// Goalkeeper fields must all be filled in. Blank shooter fields take
    /// [`SHOOTER_DEFAULT_PROBABILITY`]. All rejected fields are reported
    /// together.
    pub fn from_manual_entry(name: &str, role: Role, fields: &[&str]) -> Result<Self, EntryError> {
        let mut errors = Vec::new();

        let name = name.trim();
        if name.is_empty() {
            errors.push(FieldError::Empty { field: "Name".to_string() });
        }

        if fields.len() > ZONE_COUNT {
            errors.push(FieldError::ExtraZones { found: fields.len() });
        }

        let mut values = [0.0; ZONE_COUNT];
        for zone in ZoneId::all() {
            let column = zone.column_name();
            let raw = fields.get(zone.index()).map(|s| s.trim()).unwrap_or("");

            if raw.is_empty() && role == Role::Shooter {
                values[zone.index()] = SHOOTER_DEFAULT_PROBABILITY;
                continue;
            }

            match parse_probability(&column, raw) {
                Ok(v) => values[zone.index()] = v,
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            tracing::warn!(name, role = %role, rejected = errors.len(), "manual entry rejected");
            return Err(EntryError { fields: errors });
        }

        Ok(Self::new(name, role, ZoneProbabilities::new(values)?))
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.role == Role::Goalkeeper
    }

    pub fn is_shooter(&self) -> bool {
        self.role == Role::Shooter
    }

    pub fn probability(&self, zone: ZoneId) -> f64 {
        self.zones.get(zone)
    }
}
