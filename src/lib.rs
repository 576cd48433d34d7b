//! Hoop Court - basketball court ball simulation
//!
//! Core modules:
//! - `sim`: Ball physics, collisions, shot solver and hoop scoring
//! - `settings`: Data-driven physics tuning (JSON)
//! - `hud`: Presentation-side model fed by simulation events

pub mod hud;
pub mod settings;
pub mod sim;

pub use hud::Hud;
pub use settings::{ConfigError, Tuning};

use glam::Vec3;

/// Game configuration constants
///
/// Court and obstacle geometry is fixed for the lifetime of the process.
/// Physics values here are the defaults for [`Tuning`].
pub mod consts {
    /// Gravity along Y (world units/s²)
    pub const GRAVITY: f32 = -9.81;
    /// Energy kept after any bounce
    pub const RESTITUTION: f32 = 0.8;
    /// Horizontal velocity multiplier per frame while rolling on the floor
    pub const FRICTION: f32 = 0.99;
    /// Largest dt a single step will integrate (stalls are clamped to this)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Floor surface height
    pub const FLOOR_Y: f32 = 0.1;
    /// Ball radius
    pub const BALL_RADIUS: f32 = 0.3;
    /// Height above resting position where a reset drops the ball
    pub const DROP_HEIGHT: f32 = 5.0;
    /// Ball counts as grounded within this distance of its resting height
    pub const GROUND_EPSILON: f32 = 0.01;
    /// Rebounds slower than this are killed so the ball can come to rest
    pub const SETTLE_SPEED: f32 = 0.25;

    /// Court extents (30 x 15 court centred on the origin)
    pub const COURT_MIN_X: f32 = -15.0;
    pub const COURT_MAX_X: f32 = 15.0;
    pub const COURT_MIN_Z: f32 = -7.5;
    pub const COURT_MAX_Z: f32 = 7.5;

    /// Hoop rims - home hoop at +X, away hoop at -X
    pub const HOOP_X: f32 = 14.0;
    pub const RIM_Y: f32 = 3.05;
    pub const RIM_RADIUS: f32 = 0.45;
    pub const RIM_TUBE_RADIUS: f32 = 0.025;
    /// Scoring plane sits just below the rim
    pub const DETECT_OFFSET: f32 = 0.05;
    /// Ball must rise this far above the scoring plane to re-arm a hoop
    pub const REARM_MARGIN: f32 = 0.2;

    /// Backboards (thin slabs facing the court)
    pub const BACKBOARD_X: f32 = 14.5;
    pub const BACKBOARD_Y: f32 = 3.4;
    pub const BACKBOARD_WIDTH: f32 = 1.8;
    pub const BACKBOARD_HEIGHT: f32 = 1.2;
    pub const BACKBOARD_THICKNESS: f32 = 0.05;

    /// Support poles behind each backboard
    pub const POLE_X: f32 = 14.8;
    pub const POLE_CENTER_Y: f32 = 1.4;
    pub const POLE_HEIGHT: f32 = 2.8;
    pub const POLE_RADIUS: f32 = 0.075;

    /// Movement acceleration from held direction input
    pub const MOVE_ACCEL: f32 = 5.0;
    /// Cap on horizontal ball speed after input
    pub const MAX_SPEED: f32 = 8.0;

    /// Shot power range and charge speed (power units per second)
    pub const MIN_POWER: f32 = 0.0;
    pub const MAX_POWER: f32 = 15.0;
    pub const DEFAULT_POWER: f32 = 7.5;
    pub const CHARGE_RATE: f32 = 10.0;

    /// Arc steepness range for the shot solver
    pub const ARC_STEEP: f32 = 1.5;
    pub const ARC_FLAT: f32 = 0.6;
    /// Distance at which shots reach the flattest arc
    pub const ARC_FLAT_DISTANCE: f32 = 15.0;
    /// Hoop distances closer than this are a tie for auto-aim
    pub const TIE_EPSILON: f32 = 0.05;
}

/// Project onto the XZ plane
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between two points ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal(a - b).length()
}

/// Linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]` (unclamped)
#[inline]
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = (value - in_min) / (in_max - in_min);
    out_min + (out_max - out_min) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(3.0, 10.0, 0.0);
        let b = Vec3::new(0.0, -2.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_remap_endpoints() {
        assert!((remap(0.0, 0.0, 15.0, 1.5, 0.6) - 1.5).abs() < 1e-6);
        assert!((remap(15.0, 0.0, 15.0, 1.5, 0.6) - 0.6).abs() < 1e-6);
        assert!((remap(7.5, 0.0, 15.0, 1.5, 0.6) - 1.05).abs() < 1e-6);
    }
}
