//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - Caller-supplied dt only (no internal clock)
//! - Seeded RNG only
//! - Presentation learns about changes through returned [`SimEvent`]s

pub mod collision;
pub mod court;
pub mod scoring;
pub mod shot;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Contact, reflect_with_restitution};
pub use court::{Backboard, Court, CourtBounds, Hoop, HoopSide, Pole};
pub use scoring::{HoopScoreGuard, Scoreboard};
pub use shot::{AimMode, FixedSource, RandomSource, ShotPlan, plan_shot};
pub use state::{
    Ball, BallPose, POINTS_PER_MAKE, RngState, Score, ShotState, ShotStats, SimEvent, Simulation,
    Spin,
};
pub use tick::{TickInput, tick};
