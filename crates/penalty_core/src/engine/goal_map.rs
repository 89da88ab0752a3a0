use crate::models::{to_grid, ZoneGrid, ZoneId, ZONE_COUNT};
use serde::{Deserialize, Serialize};

/// Goals scored per zone across every shooter of one run.
///
/// Built fresh for each simulation; never carried between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoalZoneMap {
    counts: [u64; ZONE_COUNT],
}

impl GoalZoneMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, zone: ZoneId) {
        self.counts[zone.index()] += 1;
    }

    pub fn get(&self, zone: ZoneId) -> u64 {
        self.counts[zone.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Add another map's counts into this one.
    pub fn merge(&mut self, other: &GoalZoneMap) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    /// Fraction of all goals that went into `zone` (0.0 when no goals).
    pub fn share(&self, zone: ZoneId) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(zone) as f64 / total as f64
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, u64)> + '_ {
        ZoneId::all().map(move |zone| (zone, self.counts[zone.index()]))
    }

    pub fn as_grid(&self) -> ZoneGrid<u64> {
        to_grid(&self.counts)
    }
}
