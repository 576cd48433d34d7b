//! Simulation state and core types
//!
//! Everything a frame step mutates lives in [`Simulation`]. Rendering and
//! HUD code only read it through the accessors and the returned events.

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::court::{Court, HoopSide};
use super::scoring::Scoreboard;
use super::shot::{self, AimMode, RandomSource, ShotPlan};
use crate::consts::*;
use crate::horizontal;
use crate::settings::Tuning;

/// Cosmetic roll applied during the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    /// Unit rotation axis (zero when the ball isn't rolling)
    pub axis: Vec3,
    /// Radians rotated this frame
    pub angle: f32,
}

/// The ball - a point mass with a radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    /// Visual orientation, never fed back into physics
    pub orientation: Quat,
    pub spin: Spin,
}

impl Ball {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            radius: BALL_RADIUS,
            orientation: Quat::IDENTITY,
            spin: Spin::default(),
        }
    }

    /// Put the ball back at `pos`, at rest and unrotated
    pub fn reset(&mut self, pos: Vec3) {
        self.pos = pos;
        self.vel = Vec3::ZERO;
        self.orientation = Quat::IDENTITY;
        self.spin = Spin::default();
    }

    /// Horizontal speed (XZ plane)
    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        horizontal(self.vel).length()
    }

    /// Roll the visual orientation by this frame's horizontal travel
    pub fn roll(&mut self, dt: f32) {
        let displacement = horizontal(self.vel) * dt;
        let dist = displacement.length();
        if dist > 1e-6 {
            let axis = Vec3::Y.cross(displacement).normalize();
            let angle = dist / self.radius;
            self.orientation = (Quat::from_axis_angle(axis, angle) * self.orientation).normalize();
            self.spin = Spin { axis, angle };
        } else {
            self.spin = Spin::default();
        }
    }
}

/// What a renderer needs to draw the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallPose {
    pub position: Vec3,
    pub orientation: Quat,
    pub spin: Spin,
}

/// Charge level and shot bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotState {
    pub power: f32,
    /// A launched shot that hasn't been scored or missed yet
    pub in_progress: bool,
    pub attempts: u32,
    pub made: u32,
}

impl ShotState {
    pub fn new(power: f32) -> Self {
        Self {
            power,
            in_progress: false,
            attempts: 0,
            made: 0,
        }
    }

    /// Make percentage (0 with no attempts)
    pub fn percentage(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.made as f32 / self.attempts as f32 * 100.0
        }
    }

    pub fn stats(&self) -> ShotStats {
        ShotStats {
            attempts: self.attempts,
            made: self.made,
            percentage: self.percentage(),
        }
    }
}

/// Shooting stats readout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotStats {
    pub attempts: u32,
    pub made: u32,
    pub percentage: f32,
}

/// Points per made shot
pub const POINTS_PER_MAKE: u32 = 2;

/// Home/away score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn add(&mut self, side: HoopSide, points: u32) {
        match side {
            HoopSide::Home => self.home += points,
            HoopSide::Away => self.away += points,
        }
    }
}

/// Things the presentation layer reacts to (sounds, flashes, HUD pulses)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Shot left the hand. `target` is set when auto-aim picked a hoop.
    ShotLaunched {
        target: Option<HoopSide>,
        power: f32,
    },
    /// Made shot through the given hoop
    Scored(HoopSide),
    /// The shot in progress ended without a make
    Missed,
    AutoAimToggled(bool),
    BallReset,
}

/// Seed wrapper so a run can be reproduced
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) court: Court,
    pub(crate) tuning: Tuning,
    pub(crate) ball: Ball,
    pub(crate) shot: ShotState,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) auto_aim: bool,
    pub(crate) rng: Pcg32,
    rng_state: RngState,
    /// Steps taken
    pub(crate) time_ticks: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Tuning::default(), 0)
    }
}

impl Simulation {
    /// New session on the standard court with the ball at the drop point
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let court = Court::standard();
        let ball = Ball::new(court.drop_point(BALL_RADIUS));
        let rng_state = RngState::new(seed);
        Self {
            scoreboard: Scoreboard::new(ball.pos.y),
            shot: ShotState::new(tuning.default_power),
            court,
            tuning,
            ball,
            auto_aim: true,
            rng: rng_state.to_rng(),
            rng_state,
            time_ticks: 0,
        }
    }

    // === Accessors ===

    pub fn court(&self) -> &Court {
        &self.court
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn pose(&self) -> BallPose {
        BallPose {
            position: self.ball.pos,
            orientation: self.ball.orientation,
            spin: self.ball.spin,
        }
    }

    pub fn shot(&self) -> &ShotState {
        &self.shot
    }

    pub fn power(&self) -> f32 {
        self.shot.power
    }

    /// Power as 0-1 of the maximum, for the charge bar
    pub fn power_fraction(&self) -> f32 {
        if self.tuning.max_power <= 0.0 {
            0.0
        } else {
            (self.shot.power / self.tuning.max_power).clamp(0.0, 1.0)
        }
    }

    pub fn stats(&self) -> ShotStats {
        self.shot.stats()
    }

    pub fn score(&self) -> Score {
        self.scoreboard.score()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn auto_aim(&self) -> bool {
        self.auto_aim
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Ball height at or below which a shot in progress counts as missed
    pub fn floor_threshold(&self) -> f32 {
        self.court.resting_height(self.ball.radius) + GROUND_EPSILON
    }

    // === Commands ===

    /// Drop the ball at centre court and restore default power.
    ///
    /// Attempts, makes and score are kept.
    pub fn reset(&mut self) -> Vec<SimEvent> {
        let drop = self.court.drop_point(self.ball.radius);
        self.ball.reset(drop);
        self.shot.power = self.tuning.default_power;
        self.scoreboard.set_prev_height(drop.y);
        log::info!("Ball reset to {drop}");
        vec![SimEvent::BallReset]
    }

    pub fn toggle_auto_aim(&mut self) -> SimEvent {
        self.auto_aim = !self.auto_aim;
        log::info!("Auto-aim {}", if self.auto_aim { "on" } else { "off" });
        SimEvent::AutoAimToggled(self.auto_aim)
    }

    /// Shoot with the simulation's own tie-break RNG
    pub fn shoot(&mut self, camera_forward: Vec3) -> Vec<SimEvent> {
        let aim = self.aim_mode(camera_forward);
        let plan = shot::plan_shot(
            &self.court,
            &self.tuning,
            self.ball.pos,
            self.shot.power,
            aim,
            &mut self.rng,
        );
        self.launch(plan)
    }

    /// Shoot with an injected random source for the auto-aim tie break
    pub fn shoot_with(
        &mut self,
        camera_forward: Vec3,
        rng: &mut dyn RandomSource,
    ) -> Vec<SimEvent> {
        let aim = self.aim_mode(camera_forward);
        let plan = shot::plan_shot(
            &self.court,
            &self.tuning,
            self.ball.pos,
            self.shot.power,
            aim,
            rng,
        );
        self.launch(plan)
    }

    fn aim_mode(&self, camera_forward: Vec3) -> AimMode {
        if self.auto_aim {
            AimMode::Auto
        } else {
            AimMode::Manual { camera_forward }
        }
    }

    fn launch(&mut self, plan: ShotPlan) -> Vec<SimEvent> {
        let mut events = Vec::with_capacity(2);
        if self.shot.in_progress {
            // Previous shot still airborne: it can no longer be scored
            log::info!(
                "Shot {} unresolved when next shot fired, counting as a miss",
                self.shot.attempts
            );
            events.push(SimEvent::Missed);
        }

        self.ball.vel = plan.velocity;
        self.shot.attempts += 1;
        self.shot.in_progress = true;

        log::debug!(
            "Shot {} launched: power {:.2}, dist {:.2}, arc {:.2}, vel {}",
            self.shot.attempts,
            self.shot.power,
            plan.distance,
            plan.arc,
            plan.velocity
        );
        events.push(SimEvent::ShotLaunched {
            target: plan.target,
            power: self.shot.power,
        });
        events
    }
}
