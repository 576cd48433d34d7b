//! Shot solver
//!
//! Turns charge power plus an aim (nearest hoop, or the camera's facing)
//! into a launch velocity. Close shots get a steep arc, long shots a flat
//! one; the launch speed always equals the charged power.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::court::{Court, HoopSide};
use crate::consts::{ARC_FLAT, ARC_FLAT_DISTANCE, ARC_STEEP};
use crate::settings::Tuning;
use crate::{horizontal, remap};

/// Source of the 50/50 auto-aim tie break
pub trait RandomSource {
    fn coin_flip(&mut self) -> bool;
}

impl RandomSource for Pcg32 {
    fn coin_flip(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Always returns the same flip (for tests and replays)
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub bool);

impl RandomSource for FixedSource {
    fn coin_flip(&mut self) -> bool {
        self.0
    }
}

/// How the shot picks its direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimMode {
    /// Toward the nearest hoop
    Auto,
    /// Along the camera's horizontal facing
    Manual { camera_forward: Vec3 },
}

/// Everything the solver decided for one shot
#[derive(Debug, Clone, PartialEq)]
pub struct ShotPlan {
    /// Hoop aimed at (auto-aim only)
    pub target: Option<HoopSide>,
    /// Horizontal unit direction
    pub direction: Vec3,
    /// Horizontal distance to the hoop used for the arc
    pub distance: f32,
    /// Arc steepness (vy / vh)
    pub arc: f32,
    pub velocity: Vec3,
}

/// Nearest hoop by horizontal distance; near-ties go to a coin flip
pub fn nearest_hoop(
    court: &Court,
    pos: Vec3,
    tie_epsilon: f32,
    rng: &mut dyn RandomSource,
) -> HoopSide {
    let home = court.hoop(HoopSide::Home).horizontal_distance(pos);
    let away = court.hoop(HoopSide::Away).horizontal_distance(pos);

    if (home - away).abs() < tie_epsilon {
        if rng.coin_flip() {
            HoopSide::Home
        } else {
            HoopSide::Away
        }
    } else if home < away {
        HoopSide::Home
    } else {
        HoopSide::Away
    }
}

/// Arc steepness for a shot from `distance` away
///
/// Maps [0, 15] onto [1.5, 0.6] and clamps.
pub fn arc_steepness(distance: f32) -> f32 {
    remap(distance, 0.0, ARC_FLAT_DISTANCE, ARC_STEEP, ARC_FLAT).clamp(ARC_FLAT, ARC_STEEP)
}

/// Split `power` into horizontal and vertical speed with slope `k`
///
/// Returns (vh, vy) with vh² + vy² = power² and vy / vh = k.
pub fn split_speed(power: f32, k: f32) -> (f32, f32) {
    let vh = power / (1.0 + k * k).sqrt();
    (vh, k * vh)
}

/// Launch velocity along a horizontal unit `direction`
pub fn launch_velocity(power: f32, direction: Vec3, k: f32) -> Vec3 {
    let (vh, vy) = split_speed(power, k);
    let mut velocity = direction * vh;
    velocity.y = vy;
    velocity
}

/// Solve a shot from `ball_pos`
pub fn plan_shot(
    court: &Court,
    tuning: &Tuning,
    ball_pos: Vec3,
    power: f32,
    aim: AimMode,
    rng: &mut dyn RandomSource,
) -> ShotPlan {
    let (target, hoop_side) = match aim {
        AimMode::Auto => {
            let side = nearest_hoop(court, ball_pos, tuning.tie_epsilon, rng);
            (Some(side), side)
        }
        // Arc still comes from the nearest hoop; exact ties don't matter here
        AimMode::Manual { .. } => (None, nearest_hoop_strict(court, ball_pos)),
    };

    let hoop = court.hoop(hoop_side);
    let to_hoop = horizontal(hoop.rim_center() - ball_pos);
    let distance = to_hoop.length();

    let fallback = to_hoop
        .try_normalize()
        .unwrap_or_else(|| Vec3::new(hoop.center.x.signum(), 0.0, 0.0));
    let direction = match aim {
        AimMode::Auto => fallback,
        AimMode::Manual { camera_forward } => {
            horizontal(camera_forward).try_normalize().unwrap_or(fallback)
        }
    };

    let arc = arc_steepness(distance);
    ShotPlan {
        target,
        direction,
        distance,
        arc,
        velocity: launch_velocity(power, direction, arc),
    }
}

fn nearest_hoop_strict(court: &Court, pos: Vec3) -> HoopSide {
    let home = court.hoop(HoopSide::Home).horizontal_distance(pos);
    let away = court.hoop(HoopSide::Away).horizontal_distance(pos);
    if home <= away {
        HoopSide::Home
    } else {
        HoopSide::Away
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RngState;

    #[test]
    fn test_arc_steepness_clamps() {
        assert!((arc_steepness(0.0) - 1.5).abs() < 1e-6);
        assert!((arc_steepness(15.0) - 0.6).abs() < 1e-6);
        assert!((arc_steepness(30.0) - 0.6).abs() < 1e-6);
        assert!((arc_steepness(-2.0) - 1.5).abs() < 1e-6);
        let mid = arc_steepness(7.5);
        assert!(mid > 0.6 && mid < 1.5);
    }

    #[test]
    fn test_speed_conserved_across_arcs() {
        let power = 10.0;
        for dist in [0.0, 15.0] {
            let (vh, vy) = split_speed(power, arc_steepness(dist));
            assert!((vh * vh + vy * vy - power * power).abs() < 1e-3);
        }
        let (vh, vy) = split_speed(power, arc_steepness(15.0));
        assert!((vy / vh - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_hoop() {
        let court = Court::standard();
        let mut rng = FixedSource(false);
        assert_eq!(
            nearest_hoop(&court, Vec3::new(5.0, 0.4, 0.0), 0.05, &mut rng),
            HoopSide::Home
        );
        assert_eq!(
            nearest_hoop(&court, Vec3::new(-0.5, 0.4, 3.0), 0.05, &mut rng),
            HoopSide::Away
        );
    }

    #[test]
    fn test_tie_break_uses_random_source() {
        let court = Court::standard();
        let centre = Vec3::new(0.0, 0.4, 2.0);
        assert_eq!(
            nearest_hoop(&court, centre, 0.05, &mut FixedSource(true)),
            HoopSide::Home
        );
        assert_eq!(
            nearest_hoop(&court, centre, 0.05, &mut FixedSource(false)),
            HoopSide::Away
        );
    }

    #[test]
    fn test_seeded_tie_break_is_deterministic() {
        let court = Court::standard();
        let centre = Vec3::new(0.0, 0.4, 0.0);
        let mut a = RngState::new(42).to_rng();
        let mut b = RngState::new(42).to_rng();
        for _ in 0..16 {
            assert_eq!(
                nearest_hoop(&court, centre, 0.05, &mut a),
                nearest_hoop(&court, centre, 0.05, &mut b)
            );
        }
    }

    #[test]
    fn test_auto_aim_points_at_hoop() {
        let court = Court::standard();
        let tuning = Tuning::default();
        let pos = Vec3::new(10.0, 0.4, 3.0);
        let plan = plan_shot(&court, &tuning, pos, 10.0, AimMode::Auto, &mut FixedSource(true));

        assert_eq!(plan.target, Some(HoopSide::Home));
        let expected = Vec3::new(4.0, 0.0, -3.0).normalize();
        assert!((plan.direction - expected).length() < 1e-5);
        assert!((plan.distance - 5.0).abs() < 1e-5);
        assert!((plan.velocity.length() - 10.0).abs() < 1e-3);
        assert!((plan.arc - arc_steepness(5.0)).abs() < 1e-6);
    }

    #[test]
    fn test_manual_aim_uses_camera() {
        let court = Court::standard();
        let tuning = Tuning::default();
        let pos = Vec3::new(10.0, 0.4, 0.0);
        // Camera looking down and along -Z; only the horizontal part counts
        let aim = AimMode::Manual {
            camera_forward: Vec3::new(0.0, -0.8, -0.6),
        };
        let plan = plan_shot(&court, &tuning, pos, 10.0, aim, &mut FixedSource(true));

        assert_eq!(plan.target, None);
        assert!((plan.direction - Vec3::NEG_Z).length() < 1e-5);
        assert!(plan.velocity.x.abs() < 1e-5);
        assert!(plan.velocity.z < 0.0);
        // Arc from distance to the home hoop
        assert!((plan.arc - arc_steepness(4.0)).abs() < 1e-6);
    }

    #[test]
    fn test_manual_aim_straight_down_falls_back() {
        let court = Court::standard();
        let tuning = Tuning::default();
        let pos = Vec3::new(-6.0, 0.4, 0.0);
        let aim = AimMode::Manual {
            camera_forward: Vec3::NEG_Y,
        };
        let plan = plan_shot(&court, &tuning, pos, 10.0, aim, &mut FixedSource(true));
        assert!((plan.direction - Vec3::NEG_X).length() < 1e-5);
    }
}
