//! Variable timestep simulation step
//!
//! One call advances the simulation by the caller's frame time. Order:
//! 1. discrete commands (reset, aim toggle, shoot)
//! 2. integrate under gravity
//! 3. floor bounce / rolling friction / court walls
//! 4. rims, backboards, poles
//! 5. scoring
//! 6. held movement and charge input
//! 7. horizontal speed cap
//! 8. cosmetic roll

use glam::Vec3;

use super::collision::{apply_rolling_friction, resolve_floor, resolve_obstacles, resolve_walls};
use super::state::{Ball, SimEvent, Simulation};

/// Input for a single step
///
/// Held inputs stay set while the key is down. `shoot`, `reset` and
/// `toggle_auto_aim` are edge-triggered: the caller clears them after the
/// step that consumed them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_forward: bool,
    pub move_back: bool,
    pub charge_up: bool,
    pub charge_down: bool,
    pub shoot: bool,
    pub reset: bool,
    pub toggle_auto_aim: bool,
    /// Camera facing, used to aim when auto-aim is off
    pub camera_forward: Vec3,
}

impl TickInput {
    /// Drop the one-shot commands, keep held state
    pub fn clear_one_shots(&mut self) {
        self.shoot = false;
        self.reset = false;
        self.toggle_auto_aim = false;
    }
}

impl Simulation {
    /// Advance by `dt` seconds. See [`tick`].
    pub fn step(&mut self, input: &TickInput, dt: f32) -> Vec<SimEvent> {
        tick(self, input, dt)
    }
}

/// Advance the simulation by one frame, returning the events it produced
pub fn tick(sim: &mut Simulation, input: &TickInput, dt: f32) -> Vec<SimEvent> {
    let mut events = Vec::new();

    if input.reset {
        events.extend(sim.reset());
    }
    if input.toggle_auto_aim {
        events.push(sim.toggle_auto_aim());
    }
    if input.shoot {
        events.extend(sim.shoot(input.camera_forward));
    }

    let dt = clamp_dt(dt, sim.tuning.max_frame_dt);
    let tuning = &sim.tuning;
    let court = &sim.court;
    let ball = &mut sim.ball;

    // Integrate
    ball.vel.y += tuning.gravity * dt;
    ball.pos += ball.vel * dt;

    // Floor and walls
    resolve_floor(ball, court.floor_y, tuning.restitution, tuning.gravity, dt);
    apply_rolling_friction(ball, court.floor_y, tuning.friction);
    resolve_walls(ball, &court.bounds, tuning.restitution);

    // Fixed obstacles
    for contact in resolve_obstacles(ball, court, tuning.restitution) {
        log::trace!("Contact {:?} at {}", contact, ball.pos);
    }

    // Scoring (a zero-length frame moves nothing to score)
    if dt > 0.0 {
        let floor_threshold = sim.floor_threshold();
        events.extend(sim.scoreboard.evaluate(
            &sim.court,
            sim.ball.pos,
            sim.ball.vel,
            &mut sim.shot,
            floor_threshold,
        ));
    }

    // Held input
    apply_movement(&mut sim.ball, input, sim.tuning.move_accel, dt);
    if input.charge_up || input.charge_down {
        let mut delta = 0.0;
        if input.charge_up {
            delta += sim.tuning.charge_rate * dt;
        }
        if input.charge_down {
            delta -= sim.tuning.charge_rate * dt;
        }
        sim.shot.power = sim.tuning.clamp_power(sim.shot.power + delta);
    }
    clamp_horizontal_speed(&mut sim.ball, sim.tuning.max_speed);

    sim.ball.roll(dt);
    sim.time_ticks += 1;

    events
}

/// Clamp frame time into `[0, max_dt]`; stalls integrate as one max step
fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    if dt > max_dt {
        log::warn!("Frame dt {dt:.3}s clamped to {max_dt:.3}s");
        return max_dt;
    }
    dt
}

/// Accelerate horizontally for each held direction (forward is -Z)
fn apply_movement(ball: &mut Ball, input: &TickInput, accel: f32, dt: f32) {
    let dv = accel * dt;
    if input.move_forward {
        ball.vel.z -= dv;
    }
    if input.move_back {
        ball.vel.z += dv;
    }
    if input.move_left {
        ball.vel.x -= dv;
    }
    if input.move_right {
        ball.vel.x += dv;
    }
}

/// Rescale XZ velocity so horizontal speed doesn't exceed `max_speed`
pub fn clamp_horizontal_speed(ball: &mut Ball, max_speed: f32) {
    let speed = ball.horizontal_speed();
    if speed > max_speed {
        let scale = max_speed / speed;
        ball.vel.x *= scale;
        ball.vel.z *= scale;
    }
}
