//! Collision detection and response
//!
//! Floor and walls clamp the ball back into the court. Obstacles (rims,
//! backboards, poles) are detected separately from the response so each
//! shape's overlap test can be checked on its own:
//! - rim: torus around a vertical axis, normal is horizontal and radial
//! - backboard: thin slab, normal is the fixed face normal
//! - pole: vertical cylinder, normal is horizontal and radial

use glam::{Vec2, Vec3};

use super::court::{Backboard, Court, CourtBounds, Hoop, HoopSide, Pole};
use super::state::Ball;
use crate::consts::{GROUND_EPSILON, SETTLE_SPEED};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit surface normal used for the response
    pub normal: Vec3,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec3::ZERO,
            penetration: 0.0,
        }
    }

    fn hit(normal: Vec3, penetration: f32) -> Self {
        Self {
            hit: true,
            normal,
            penetration,
        }
    }
}

/// Obstacle that the ball touched this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Rim(HoopSide),
    Backboard(HoopSide),
    Pole(HoopSide),
}

/// Reflect velocity off a static surface with restitution
///
/// v' = v - (1 + e)(v·n)n
///
/// The normal component is reversed and scaled by `e`; the tangential
/// component is untouched.
#[inline]
pub fn reflect_with_restitution(velocity: Vec3, normal: Vec3, restitution: f32) -> Vec3 {
    velocity - (1.0 + restitution) * velocity.dot(normal) * normal
}

/// Whether the ball is resting on (or rolling along) the floor
#[inline]
pub fn is_grounded(ball: &Ball, floor_y: f32) -> bool {
    (ball.pos.y - (floor_y + ball.radius)).abs() <= GROUND_EPSILON
}

/// Clamp the ball above the floor and bounce it. Returns true on a bounce.
///
/// A rebound slower than the settle speed is dropped to zero so a resting
/// ball stops instead of hopping by one frame of gravity forever.
pub fn resolve_floor(ball: &mut Ball, floor_y: f32, restitution: f32, gravity: f32, dt: f32) -> bool {
    let rest = floor_y + ball.radius;
    if ball.pos.y >= rest {
        return false;
    }

    ball.pos.y = rest;
    if ball.vel.y >= 0.0 {
        return false;
    }

    let rebound = -ball.vel.y * restitution;
    let settle_speed = SETTLE_SPEED.max(gravity.abs() * dt * 1.5);
    if rebound < settle_speed {
        ball.vel.y = 0.0;
        false
    } else {
        ball.vel.y = rebound;
        true
    }
}

/// Rolling resistance, only while grounded
pub fn apply_rolling_friction(ball: &mut Ball, floor_y: f32, friction: f32) {
    if is_grounded(ball, floor_y) {
        ball.vel.x *= friction;
        ball.vel.z *= friction;
    }
}

/// Keep the ball inside the four court walls. Returns true if any wall bounced it.
///
/// Velocity is only reflected while moving further out; a ball already
/// heading back in is just clamped.
pub fn resolve_walls(ball: &mut Ball, bounds: &CourtBounds, restitution: f32) -> bool {
    let r = ball.radius;
    let mut bounced = false;

    if ball.pos.x > bounds.max_x - r {
        ball.pos.x = bounds.max_x - r;
        if ball.vel.x > 0.0 {
            ball.vel.x = -ball.vel.x * restitution;
            bounced = true;
        }
    } else if ball.pos.x < bounds.min_x + r {
        ball.pos.x = bounds.min_x + r;
        if ball.vel.x < 0.0 {
            ball.vel.x = -ball.vel.x * restitution;
            bounced = true;
        }
    }

    if ball.pos.z > bounds.max_z - r {
        ball.pos.z = bounds.max_z - r;
        if ball.vel.z > 0.0 {
            ball.vel.z = -ball.vel.z * restitution;
            bounced = true;
        }
    } else if ball.pos.z < bounds.min_z + r {
        ball.pos.z = bounds.min_z + r;
        if ball.vel.z < 0.0 {
            ball.vel.z = -ball.vel.z * restitution;
            bounced = true;
        }
    }

    bounced
}

/// Check ball overlap with a hoop's rim tube
///
/// The normal points horizontally away from the rim axis.
pub fn ball_rim_collision(ball_pos: Vec3, ball_radius: f32, hoop: &Hoop) -> CollisionResult {
    let reach = ball_radius + hoop.tube_radius;
    if (ball_pos.y - hoop.rim_y).abs() >= reach {
        return CollisionResult::miss();
    }

    let offset = Vec2::new(ball_pos.x - hoop.center.x, ball_pos.z - hoop.center.y);
    let horiz_dist = offset.length();
    let dist_to_tube = (horiz_dist - hoop.rim_radius).abs();
    if dist_to_tube >= reach {
        return CollisionResult::miss();
    }

    let radial = offset.normalize_or_zero();
    CollisionResult::hit(Vec3::new(radial.x, 0.0, radial.y), reach - dist_to_tube)
}

/// Check ball overlap with a backboard slab
pub fn ball_backboard_collision(
    ball_pos: Vec3,
    ball_radius: f32,
    board: &Backboard,
) -> CollisionResult {
    let d = ball_pos - board.center;
    let half_thickness = board.thickness / 2.0 + ball_radius;
    if d.x.abs() < half_thickness
        && d.z.abs() < board.width / 2.0 + ball_radius
        && d.y.abs() < board.height / 2.0 + ball_radius
    {
        CollisionResult::hit(board.normal, half_thickness - d.x.abs())
    } else {
        CollisionResult::miss()
    }
}

/// Check ball overlap with a pole
///
/// The normal points horizontally from the pole axis toward the ball.
pub fn ball_pole_collision(ball_pos: Vec3, ball_radius: f32, pole: &Pole) -> CollisionResult {
    if (ball_pos.y - pole.center_y).abs() > pole.height / 2.0 + ball_radius {
        return CollisionResult::miss();
    }

    let offset = Vec2::new(ball_pos.x - pole.axis.x, ball_pos.z - pole.axis.y);
    let dist = offset.length();
    let reach = pole.radius + ball_radius;
    if dist >= reach {
        return CollisionResult::miss();
    }

    // Centre exactly on the axis: push back toward mid-court
    let radial = if dist > 1e-6 {
        offset / dist
    } else {
        Vec2::new(-pole.axis.x.signum(), 0.0)
    };
    CollisionResult::hit(Vec3::new(radial.x, 0.0, radial.y), reach - dist)
}

/// Resolve rim, backboard and pole contacts for every hoop
pub fn resolve_obstacles(ball: &mut Ball, court: &Court, restitution: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for hoop in &court.hoops {
        // Rim: reflect only, tunneling through the thin tube is accepted
        let rim = ball_rim_collision(ball.pos, ball.radius, hoop);
        if rim.hit {
            ball.vel = reflect_with_restitution(ball.vel, rim.normal, restitution);
            contacts.push(Contact::Rim(hoop.side));
        }

        // Backboard: one-sided, only the court-facing side reflects
        let board = ball_backboard_collision(ball.pos, ball.radius, &hoop.backboard);
        if board.hit && ball.vel.dot(board.normal) < 0.0 {
            ball.vel = reflect_with_restitution(ball.vel, board.normal, restitution);
            contacts.push(Contact::Backboard(hoop.side));
        }

        // Pole: solid, so push out as well as reflect
        let pole = ball_pole_collision(ball.pos, ball.radius, &hoop.pole);
        if pole.hit {
            if ball.vel.dot(pole.normal) < 0.0 {
                ball.vel = reflect_with_restitution(ball.vel, pole.normal, restitution);
            }
            ball.pos += pole.normal * pole.penetration;
            contacts.push(Contact::Pole(hoop.side));
        }
    }

    contacts
}
