//! Hoop scoring state machine
//!
//! Each hoop has a guard that is either ARMED or DISARMED:
//! - ARMED -> DISARMED when the ball crosses the detection plane downward,
//!   inside the rim, while a shot is in progress. That records the make.
//! - DISARMED -> ARMED once the ball rises above the plane plus
//!   `REARM_MARGIN`, whatever the shot state.
//!
//! The hysteresis band stops a ball hovering at the rim from scoring twice.
//! A shot still in progress when the ball comes down onto the floor is a
//! miss. A ball still climbing off the floor after launch is not.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::court::{Court, HoopSide};
use super::state::{POINTS_PER_MAKE, Score, ShotState, SimEvent};

/// Per-hoop double-count guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoopScoreGuard {
    pub armed: bool,
}

impl Default for HoopScoreGuard {
    fn default() -> Self {
        Self { armed: true }
    }
}

/// Score plus the frame-to-frame state the scoring checks need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    guards: [HoopScoreGuard; 2],
    score: Score,
    /// Ball height at the end of the previous evaluation
    prev_y: f32,
}

impl Scoreboard {
    pub fn new(ball_y: f32) -> Self {
        Self {
            guards: [HoopScoreGuard::default(); 2],
            score: Score::default(),
            prev_y: ball_y,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub(crate) fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    pub fn guard(&self, side: HoopSide) -> HoopScoreGuard {
        self.guards[side.index()]
    }

    pub fn prev_height(&self) -> f32 {
        self.prev_y
    }

    /// Forget the last height (after the ball is teleported)
    pub fn set_prev_height(&mut self, y: f32) {
        self.prev_y = y;
    }

    /// Run one frame of scoring against the post-physics ball state
    pub fn evaluate(
        &mut self,
        court: &Court,
        ball_pos: Vec3,
        ball_vel: Vec3,
        shot: &mut ShotState,
        floor_threshold: f32,
    ) -> Vec<SimEvent> {
        let mut events = Vec::new();
        let y = ball_pos.y;
        let mut scored = false;

        for hoop in &court.hoops {
            let guard = &mut self.guards[hoop.side.index()];
            let detect_y = hoop.detect_y();

            if guard.armed
                && shot.in_progress
                && self.prev_y > detect_y
                && y <= detect_y
                && hoop.horizontal_distance(ball_pos) < hoop.rim_radius
            {
                guard.armed = false;
                shot.made += 1;
                shot.in_progress = false;
                self.score.add(hoop.side, POINTS_PER_MAKE);
                scored = true;
                log::info!(
                    "Score through {} hoop: {} - {} ({}/{})",
                    hoop.side.as_str(),
                    self.score.home,
                    self.score.away,
                    shot.made,
                    shot.attempts
                );
                events.push(SimEvent::Scored(hoop.side));
            }

            if !guard.armed && y > hoop.rearm_y() {
                guard.armed = true;
                log::debug!("{} hoop re-armed", hoop.side.as_str());
            }
        }

        // Arrival from above, or a rebound off the floor within this frame
        let descending = ball_vel.y <= 0.0 || self.prev_y > floor_threshold;
        if shot.in_progress && !scored && y <= floor_threshold && descending {
            shot.in_progress = false;
            log::info!("Miss ({}/{})", shot.made, shot.attempts);
            events.push(SimEvent::Missed);
        }

        self.prev_y = y;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    const FLOOR_THRESHOLD: f32 = FLOOR_Y + BALL_RADIUS + GROUND_EPSILON;
    const FALLING: Vec3 = Vec3::new(0.0, -3.0, 0.0);
    const RISING: Vec3 = Vec3::new(0.0, 3.0, 0.0);

    fn shot_in_progress() -> ShotState {
        let mut shot = ShotState::new(DEFAULT_POWER);
        shot.attempts = 1;
        shot.in_progress = true;
        shot
    }

    fn home_at(y: f32) -> Vec3 {
        Vec3::new(HOOP_X + 0.1, y, 0.0)
    }

    #[test]
    fn test_downward_crossing_scores_once() {
        let court = Court::standard();
        let mut board = Scoreboard::new(3.1);
        let mut shot = shot_in_progress();

        let events = board.evaluate(&court, home_at(2.95), FALLING, &mut shot, FLOOR_THRESHOLD);
        assert_eq!(events, vec![SimEvent::Scored(HoopSide::Home)]);
        assert_eq!(shot.made, 1);
        assert!(!shot.in_progress);
        assert_eq!(board.score(), Score { home: 2, away: 0 });
        assert!(!board.guard(HoopSide::Home).armed);
        assert!(board.guard(HoopSide::Away).armed);
    }

    #[test]
    fn test_no_double_count_without_rearm() {
        let court = Court::standard();
        let mut board = Scoreboard::new(3.1);
        let mut shot = shot_in_progress();
        board.evaluate(&court, home_at(2.95), FALLING, &mut shot, FLOOR_THRESHOLD);

        // New shot, ball bobs up inside the hysteresis band and crosses again
        shot.attempts += 1;
        shot.in_progress = true;
        board.evaluate(&court, home_at(3.15), FALLING, &mut shot, FLOOR_THRESHOLD);
        assert!(!board.guard(HoopSide::Home).armed);
        let events = board.evaluate(&court, home_at(2.9), FALLING, &mut shot, FLOOR_THRESHOLD);

        assert!(events.is_empty());
        assert_eq!(shot.made, 1);
        assert_eq!(board.score().home, 2);
    }

    #[test]
    fn test_rearm_above_margin() {
        let court = Court::standard();
        let mut board = Scoreboard::new(3.1);
        let mut shot = shot_in_progress();
        board.evaluate(&court, home_at(2.95), FALLING, &mut shot, FLOOR_THRESHOLD);

        // Rises above detect + 0.2 with no shot in progress: re-arms anyway
        board.evaluate(&court, home_at(3.25), FALLING, &mut shot, FLOOR_THRESHOLD);
        assert!(board.guard(HoopSide::Home).armed);

        shot.attempts += 1;
        shot.in_progress = true;
        let events = board.evaluate(&court, home_at(2.99), FALLING, &mut shot, FLOOR_THRESHOLD);
        assert_eq!(events, vec![SimEvent::Scored(HoopSide::Home)]);
        assert_eq!(shot.made, 2);
        assert_eq!(board.score().home, 4);
    }

    #[test]
    fn test_no_score_without_shot() {
        let court = Court::standard();
        let mut board = Scoreboard::new(3.1);
        let mut shot = ShotState::new(DEFAULT_POWER);
        let events = board.evaluate(&court, home_at(2.95), FALLING, &mut shot, FLOOR_THRESHOLD);
        assert!(events.is_empty());
        assert!(board.guard(HoopSide::Home).armed);
        assert_eq!(board.score(), Score::default());
    }

    #[test]
    fn test_no_score_outside_rim() {
        let court = Court::standard();
        let mut board = Scoreboard::new(3.1);
        let mut shot = shot_in_progress();
        let pos = Vec3::new(HOOP_X - 0.5, 2.95, 0.0);
        assert!(board.evaluate(&court, pos, FALLING, &mut shot, FLOOR_THRESHOLD).is_empty());
        assert!(shot.in_progress);
    }

    #[test]
    fn test_upward_crossing_does_not_score() {
        let court = Court::standard();
        let mut board = Scoreboard::new(2.9);
        let mut shot = shot_in_progress();
        assert!(board.evaluate(&court, home_at(3.1), RISING, &mut shot, FLOOR_THRESHOLD).is_empty());
        assert_eq!(shot.made, 0);
    }

    #[test]
    fn test_away_hoop_scores_for_away() {
        let court = Court::standard();
        let mut board = Scoreboard::new(3.1);
        let mut shot = shot_in_progress();
        let pos = Vec3::new(-HOOP_X, 2.95, 0.2);
        let events = board.evaluate(&court, pos, FALLING, &mut shot, FLOOR_THRESHOLD);
        assert_eq!(events, vec![SimEvent::Scored(HoopSide::Away)]);
        assert_eq!(board.score(), Score { home: 0, away: 2 });
    }

    #[test]
    fn test_floor_ends_shot_as_miss() {
        let court = Court::standard();
        let mut board = Scoreboard::new(1.0);
        let mut shot = shot_in_progress();
        let pos = Vec3::new(5.0, FLOOR_Y + BALL_RADIUS, 0.0);
        let events = board.evaluate(&court, pos, FALLING, &mut shot, FLOOR_THRESHOLD);
        assert_eq!(events, vec![SimEvent::Missed]);
        assert!(!shot.in_progress);
        assert_eq!(shot.attempts, 1);
        assert_eq!(shot.made, 0);

        // Nothing further once resolved
        assert!(board.evaluate(&court, pos, FALLING, &mut shot, FLOOR_THRESHOLD).is_empty());
    }

    #[test]
    fn test_rising_off_floor_is_not_a_miss() {
        let court = Court::standard();
        let rest = FLOOR_Y + BALL_RADIUS;
        let mut board = Scoreboard::new(rest);
        let mut shot = shot_in_progress();

        // Launched from rest, not yet above the threshold
        let pos = Vec3::new(5.0, rest + 0.005, 0.0);
        assert!(board.evaluate(&court, pos, RISING, &mut shot, FLOOR_THRESHOLD).is_empty());
        assert!(shot.in_progress);

        // Apex below the threshold, then coming back down
        let events = board.evaluate(&court, pos, Vec3::new(0.0, -0.1, 0.0), &mut shot, FLOOR_THRESHOLD);
        assert_eq!(events, vec![SimEvent::Missed]);
    }

    #[test]
    fn test_rebound_from_above_is_a_miss() {
        let court = Court::standard();
        let mut board = Scoreboard::new(0.8);
        let mut shot = shot_in_progress();
        let pos = Vec3::new(5.0, FLOOR_Y + BALL_RADIUS, 0.0);
        let events = board.evaluate(&court, pos, RISING, &mut shot, FLOOR_THRESHOLD);
        assert_eq!(events, vec![SimEvent::Missed]);
    }

    #[test]
    fn test_prev_height_tracks_ball() {
        let court = Court::standard();
        let mut board = Scoreboard::new(5.0);
        let mut shot = ShotState::new(DEFAULT_POWER);
        board.evaluate(&court, Vec3::new(0.0, 4.2, 0.0), FALLING, &mut shot, FLOOR_THRESHOLD);
        assert_eq!(board.prev_height(), 4.2);
    }
}
