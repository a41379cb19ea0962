//! Melee arc hit-testing
//!
//! A melee swing is a cone check against the living roster: targets
//! must be inside both the range and the angular threshold, and the
//! strictly closest qualifying target takes the hit.

use ember_core::error::validate_command;
use ember_core::ActorId;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Melee swing tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeleeParams {
    /// Maximum reach in meters
    pub range: f32,
    /// Cone threshold in radians. The candidate angle is compared
    /// against this full value rather than the half-angle, so the
    /// effective cone is twice the nominal 60 degrees. Narrowing it
    /// would change gameplay; see DESIGN.md.
    pub cone: f32,
    /// Damage per swing
    pub damage: f32,
    /// Knockback displacement for ordinary targets
    pub grunt_knockback: f32,
    /// Knockback displacement for bosses, which are harder to move
    pub boss_knockback: f32,
}

impl Default for MeleeParams {
    fn default() -> Self {
        Self {
            range: 7.0,
            cone: std::f32::consts::FRAC_PI_3,
            damage: 20.0,
            grunt_knockback: 2.0,
            boss_knockback: 0.5,
        }
    }
}

/// Outcome of a resolved melee swing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeHit {
    /// The selected target
    pub target: ActorId,
    /// Distance from the attack origin at resolution time
    pub distance: f32,
    /// Displacement to push the target away from the attacker
    pub knockback: Vec3,
}

/// Resolve a melee swing against a set of candidates
///
/// `candidates` yields `(id, position, is_boss)` for every living
/// actor, in roster order; ties in distance resolve to the first
/// candidate seen, which keeps selection deterministic for a fixed
/// roster order. Malformed input degrades to no hit.
pub fn resolve(
    params: &MeleeParams,
    origin: Vec3,
    facing: Vec3,
    candidates: impl IntoIterator<Item = (ActorId, Vec3, bool)>,
) -> Option<MeleeHit> {
    let facing = match validate_command(origin, facing) {
        Ok(dir) => dir,
        Err(err) => {
            log::warn!("melee swing rejected: {err}");
            return None;
        }
    };

    let mut closest: Option<MeleeHit> = None;

    for (id, pos, is_boss) in candidates {
        let distance = origin.distance(pos);
        if distance > params.range {
            continue;
        }

        let to_target = (pos - origin).normalize_or_zero();
        let angle = facing.angle_between(to_target);
        if !(angle < params.cone) {
            continue;
        }

        if closest.map_or(true, |hit| distance < hit.distance) {
            let strength = if is_boss {
                params.boss_knockback
            } else {
                params.grunt_knockback
            };
            closest = Some(MeleeHit {
                target: id,
                distance,
                knockback: to_target * strength,
            });
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> MeleeParams {
        MeleeParams::default()
    }

    #[test]
    fn test_closest_candidate_wins() {
        let hit = resolve(
            &params(),
            Vec3::ZERO,
            Vec3::Z,
            [
                (ActorId(0), Vec3::new(0.0, 1.0, 5.0), false),
                (ActorId(1), Vec3::new(0.0, 1.0, 3.0), false),
                (ActorId(2), Vec3::new(0.0, 1.0, 6.0), false),
            ],
        )
        .unwrap();
        assert_eq!(hit.target, ActorId(1));
    }

    #[test]
    fn test_outside_cone_never_selected_even_if_closest() {
        // Boss at 4m directly behind, grunt at 5m dead ahead.
        let hit = resolve(
            &params(),
            Vec3::ZERO,
            Vec3::Z,
            [
                (ActorId(9), Vec3::new(0.0, 1.0, -4.0), true),
                (ActorId(1), Vec3::new(0.0, 1.0, 5.0), false),
            ],
        )
        .unwrap();
        assert_eq!(hit.target, ActorId(1));
    }

    #[test]
    fn test_out_of_range_misses() {
        let hit = resolve(
            &params(),
            Vec3::ZERO,
            Vec3::Z,
            [(ActorId(0), Vec3::new(0.0, 1.0, 7.5), false)],
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_tie_breaks_to_first_in_roster_order() {
        let targets = [
            (ActorId(4), Vec3::new(1.0, 1.0, 4.0), false),
            (ActorId(5), Vec3::new(-1.0, 1.0, 4.0), false),
        ];
        let hit = resolve(&params(), Vec3::ZERO, Vec3::Z, targets).unwrap();
        assert_eq!(hit.target, ActorId(4));
    }

    #[test]
    fn test_boss_knockback_is_weaker() {
        let hit = resolve(
            &params(),
            Vec3::ZERO,
            Vec3::Z,
            [(ActorId(0), Vec3::new(0.0, 0.0, 4.0), true)],
        )
        .unwrap();
        assert!((hit.knockback.length() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_malformed_swing_is_no_hit() {
        let hit = resolve(
            &params(),
            Vec3::ZERO,
            Vec3::ZERO,
            [(ActorId(0), Vec3::new(0.0, 0.0, 2.0), false)],
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_full_angle_quirk_accepts_wide_targets() {
        // 45 degrees off axis: outside a true 60-degree cone
        // (half-angle 30), inside the preserved full-angle check.
        let angle = 45f32.to_radians();
        let pos = Vec3::new(angle.sin() * 5.0, 0.0, angle.cos() * 5.0);
        let hit = resolve(&params(), Vec3::ZERO, Vec3::Z, [(ActorId(0), pos, false)]);
        assert!(hit.is_some());
    }
}
