//! Court and obstacle geometry
//!
//! All obstacles are fixed for the lifetime of a simulation:
//! - floor plane at `floor_y`
//! - four court walls (axis-aligned bounds)
//! - per hoop: a torus rim, a thin backboard slab and a vertical pole

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which hoop (and which side's score) an obstacle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoopSide {
    /// Hoop at +X, scores for home
    Home,
    /// Hoop at -X, scores for away
    Away,
}

impl HoopSide {
    pub const ALL: [HoopSide; 2] = [HoopSide::Home, HoopSide::Away];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            HoopSide::Home => 0,
            HoopSide::Away => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HoopSide::Home => "home",
            HoopSide::Away => "away",
        }
    }
}

/// Horizontal court extents (walls)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl CourtBounds {
    pub fn contains(&self, pos: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&pos.x) && (self.min_z..=self.max_z).contains(&pos.z)
    }
}

/// Thin rectangular slab standing at fixed X, spanning Z (width) and Y (height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backboard {
    pub center: Vec3,
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
    /// Unit normal of the playing face (points back toward the court)
    pub normal: Vec3,
}

/// Solid vertical cylinder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    /// Axis position on the XZ plane
    pub axis: Vec2,
    pub center_y: f32,
    pub height: f32,
    pub radius: f32,
}

/// A hoop: horizontal torus rim plus its backboard and pole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    pub side: HoopSide,
    /// Rim axis on the XZ plane
    pub center: Vec2,
    pub rim_y: f32,
    /// Radius of the rim ring (axis to tube centre)
    pub rim_radius: f32,
    /// Radius of the rim tube
    pub tube_radius: f32,
    pub backboard: Backboard,
    pub pole: Pole,
}

impl Hoop {
    /// Hoop on the given side, mirrored across X = 0
    pub fn standard(side: HoopSide) -> Self {
        let sign = match side {
            HoopSide::Home => 1.0,
            HoopSide::Away => -1.0,
        };
        Self {
            side,
            center: Vec2::new(sign * HOOP_X, 0.0),
            rim_y: RIM_Y,
            rim_radius: RIM_RADIUS,
            tube_radius: RIM_TUBE_RADIUS,
            backboard: Backboard {
                center: Vec3::new(sign * BACKBOARD_X, BACKBOARD_Y, 0.0),
                width: BACKBOARD_WIDTH,
                height: BACKBOARD_HEIGHT,
                thickness: BACKBOARD_THICKNESS,
                normal: Vec3::new(-sign, 0.0, 0.0),
            },
            pole: Pole {
                axis: Vec2::new(sign * POLE_X, 0.0),
                center_y: POLE_CENTER_Y,
                height: POLE_HEIGHT,
                radius: POLE_RADIUS,
            },
        }
    }

    /// Height of the scoring plane
    #[inline]
    pub fn detect_y(&self) -> f32 {
        self.rim_y - DETECT_OFFSET
    }

    /// Height the ball must exceed to re-arm this hoop
    #[inline]
    pub fn rearm_y(&self) -> f32 {
        self.detect_y() + REARM_MARGIN
    }

    /// Rim centre in world space
    #[inline]
    pub fn rim_center(&self) -> Vec3 {
        Vec3::new(self.center.x, self.rim_y, self.center.y)
    }

    /// Distance from `pos` to the rim axis, ignoring height
    #[inline]
    pub fn horizontal_distance(&self, pos: Vec3) -> f32 {
        Vec2::new(pos.x - self.center.x, pos.z - self.center.y).length()
    }
}

/// Static court description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub floor_y: f32,
    pub bounds: CourtBounds,
    /// Indexed by [`HoopSide::index`]
    pub hoops: [Hoop; 2],
}

impl Default for Court {
    fn default() -> Self {
        Self::standard()
    }
}

impl Court {
    /// The 30 x 15 court with a hoop at each end
    pub fn standard() -> Self {
        Self {
            floor_y: FLOOR_Y,
            bounds: CourtBounds {
                min_x: COURT_MIN_X,
                max_x: COURT_MAX_X,
                min_z: COURT_MIN_Z,
                max_z: COURT_MAX_Z,
            },
            hoops: [Hoop::standard(HoopSide::Home), Hoop::standard(HoopSide::Away)],
        }
    }

    #[inline]
    pub fn hoop(&self, side: HoopSide) -> &Hoop {
        &self.hoops[side.index()]
    }

    /// Ball centre height when resting on the floor
    #[inline]
    pub fn resting_height(&self, ball_radius: f32) -> f32 {
        self.floor_y + ball_radius
    }

    /// Where a reset drops the ball (centre court, `DROP_HEIGHT` above rest)
    pub fn drop_point(&self, ball_radius: f32) -> Vec3 {
        Vec3::new(0.0, self.resting_height(ball_radius) + DROP_HEIGHT, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hoops_mirror() {
        let court = Court::standard();
        let home = court.hoop(HoopSide::Home);
        let away = court.hoop(HoopSide::Away);
        assert_eq!(home.center.x, -away.center.x);
        assert_eq!(home.backboard.normal, Vec3::NEG_X);
        assert_eq!(away.backboard.normal, Vec3::X);
        // Backboard sits behind the rim, pole behind the backboard
        assert!(home.backboard.center.x > home.center.x);
        assert!(home.pole.axis.x > home.backboard.center.x);
    }

    #[test]
    fn test_detection_heights() {
        let hoop = Hoop::standard(HoopSide::Home);
        assert!((hoop.detect_y() - 3.0).abs() < 1e-6);
        assert!((hoop.rearm_y() - 3.2).abs() < 1e-6);
    }

    #[test]
    fn test_drop_point() {
        let court = Court::standard();
        let p = court.drop_point(BALL_RADIUS);
        assert!((p.y - 5.4).abs() < 1e-6);
        assert!(court.bounds.contains(p));
    }
}
