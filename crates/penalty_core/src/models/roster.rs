//! Roster store
//!
//! Ordered player records. Insertion order is the order shooters are
//! simulated, reported and assigned heatmap slots.

use super::player::{PlayerRecord, Role};
use crate::error::RosterError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<PlayerRecord>,
}

/// Goalkeeper and shooter counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleCounts {
    pub goalkeepers: usize,
    pub shooters: usize,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player. Names need not be unique.
    pub fn add_player(&mut self, record: PlayerRecord) {
        tracing::debug!(name = %record.name, role = %record.role, "player added");
        self.players.push(record);
    }

    /// Drop every player.
    pub fn clear(&mut self) {
        self.players.clear();
    }

    /// Swap in a freshly loaded set of players.
    ///
    /// Loaders build the whole `Vec` first, so a failed load never reaches
    /// this point and the existing roster stays untouched.
    pub fn replace_with(&mut self, players: Vec<PlayerRecord>) {
        self.players = players;
    }

    pub fn counts(&self) -> RoleCounts {
        self.players.iter().fold(RoleCounts::default(), |mut acc, p| {
            match p.role {
                Role::Goalkeeper => acc.goalkeepers += 1,
                Role::Shooter => acc.shooters += 1,
            }
            acc
        })
    }

    /// Exactly one goalkeeper and at least one shooter.
    pub fn validate_for_simulation(&self) -> Result<(), RosterError> {
        let RoleCounts { goalkeepers, shooters } = self.counts();
        if goalkeepers != 1 {
            return Err(RosterError::GoalkeeperCount { goalkeepers, shooters });
        }
        if shooters == 0 {
            return Err(RosterError::NoShooters { goalkeepers, shooters });
        }
        Ok(())
    }

    /// The single goalkeeper, if the roster holds exactly one.
    pub fn goalkeeper(&self) -> Option<&PlayerRecord> {
        let mut keepers = self.players.iter().filter(|p| p.is_goalkeeper());
        match (keepers.next(), keepers.next()) {
            (Some(gk), None) => Some(gk),
            _ => None,
        }
    }

    /// Shooters in insertion order.
    pub fn shooters(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|p| p.is_shooter())
    }

    /// One-line readiness summary.
    pub fn status(&self) -> String {
        let RoleCounts { goalkeepers, shooters } = self.counts();
        if self.validate_for_simulation().is_ok() {
            format!("Ready: 1 goalkeeper vs {} shooters", shooters)
        } else {
            format!(
                "Missing: need exactly 1 goalkeeper (found {}) and at least 1 shooter (found {})",
                goalkeepers, shooters
            )
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl FromIterator<PlayerRecord> for Roster {
    fn from_iter<I: IntoIterator<Item = PlayerRecord>>(iter: I) -> Self {
        Self { players: iter.into_iter().collect() }
    }
}
