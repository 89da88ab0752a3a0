//! Single penalty trial.

use crate::models::{ZoneId, ZoneProbabilities, ZONE_COUNT};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotOutcome {
    Goal,
    /// On target, stopped by the goalkeeper.
    Saved,
    /// Missed the frame.
    OffTarget,
}

impl ShotOutcome {
    pub fn is_goal(self) -> bool {
        self == ShotOutcome::Goal
    }
}

/// Zone the shot went to and how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotResolution {
    pub zone: ZoneId,
    pub outcome: ShotOutcome,
}

/// Bernoulli draw: uniform [0, 1) below `p`.
#[inline]
fn bernoulli<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Resolve one shot.
///
/// The zone is drawn uniformly from 1..=18 regardless of either player's
/// probabilities. The shooter's value for that zone decides whether the
/// shot is on target; only then is a third draw made against the
/// goalkeeper's save probability for the same zone.
pub fn resolve_shot<R: Rng + ?Sized>(
    rng: &mut R,
    shooter: &ZoneProbabilities,
    goalkeeper: &ZoneProbabilities,
) -> ShotResolution {
    let number = rng.gen_range(1..=ZONE_COUNT as u8);
    let zone = ZoneId::new(number).unwrap_or(ZoneId::FIRST);

    let outcome = if !bernoulli(rng, shooter.get(zone)) {
        ShotOutcome::OffTarget
    } else if bernoulli(rng, goalkeeper.get(zone)) {
        ShotOutcome::Saved
    } else {
        ShotOutcome::Goal
    };

    ShotResolution { zone, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn uniform(p: f64) -> ZoneProbabilities {
        ZoneProbabilities::uniform(p).unwrap()
    }

    #[test]
    fn certain_shooter_against_absent_keeper_always_scores() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let shooter = uniform(1.0);
        let keeper = uniform(0.0);
        for _ in 0..500 {
            assert_eq!(resolve_shot(&mut rng, &shooter, &keeper).outcome, ShotOutcome::Goal);
        }
    }

    #[test]
    fn zero_accuracy_is_always_off_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let shooter = uniform(0.0);
        let keeper = uniform(0.0);
        for _ in 0..500 {
            assert_eq!(resolve_shot(&mut rng, &shooter, &keeper).outcome, ShotOutcome::OffTarget);
        }
    }

    #[test]
    fn perfect_keeper_saves_every_on_target_shot() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let shooter = uniform(1.0);
        let keeper = uniform(1.0);
        for _ in 0..500 {
            assert_eq!(resolve_shot(&mut rng, &shooter, &keeper).outcome, ShotOutcome::Saved);
        }
    }

    #[test]
    fn zone_draw_covers_every_zone() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let shooter = uniform(0.5);
        let keeper = uniform(0.5);
        let mut seen = [0u32; ZONE_COUNT];
        for _ in 0..18_000 {
            let shot = resolve_shot(&mut rng, &shooter, &keeper);
            seen[shot.zone.index()] += 1;
        }
        // Uniform draw: ~1000 per zone.
        for count in seen {
            assert!((800..1200).contains(&count), "zone count {count} far from uniform");
        }
    }

    #[test]
    fn off_target_only_outside_accurate_zone() {
        let mut values = [0.0; ZONE_COUNT];
        values[0] = 1.0;
        let shooter = ZoneProbabilities::new(values).unwrap();
        let keeper = uniform(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        for _ in 0..1000 {
            let shot = resolve_shot(&mut rng, &shooter, &keeper);
            if shot.zone == ZoneId::FIRST {
                assert_eq!(shot.outcome, ShotOutcome::Goal);
            } else {
                assert_eq!(shot.outcome, ShotOutcome::OffTarget);
            }
        }
    }
}
