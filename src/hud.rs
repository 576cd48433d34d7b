//! HUD model
//!
//! Presentation-side state built from simulation outputs: score line with a
//! pop on change, shooting stats, charge bar and flash messages. A renderer
//! polls this (or its JSON form) each frame; the simulation never sees it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::{SimEvent, Simulation};

/// How long the score pop lasts (seconds)
pub const SCORE_PULSE_DURATION: f32 = 0.2;
/// Peak score text scale during the pop
pub const SCORE_PULSE_SCALE: f32 = 1.5;
/// Resting score colour (linear RGB)
pub const SCORE_COLOR: Vec3 = Vec3::ONE;
/// Score colour at the peak of the pop
pub const SCORE_PULSE_COLOR: Vec3 = Vec3::new(0.0, 0.0, 1.0);
/// Flash message lifetime (seconds)
pub const FLASH_DURATION: f32 = 0.8;
/// Oldest flashes are dropped past this many
pub const MAX_FLASHES: usize = 4;

/// Transient centre-screen message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub text: String,
    /// Seconds left on screen
    pub ttl: f32,
}

/// Charge bar hue in degrees: 0 (red) when empty up to 120 (green) when full
#[inline]
pub fn power_bar_hue(fraction: f32) -> f32 {
    fraction.clamp(0.0, 1.0) * 120.0
}

/// Text for an event's flash, if it gets one
pub fn flash_text(event: &SimEvent) -> Option<String> {
    match event {
        SimEvent::Scored(_) => Some("+2".to_string()),
        SimEvent::Missed => Some("MISS".to_string()),
        SimEvent::AutoAimToggled(true) => Some("AUTO-AIM ON".to_string()),
        SimEvent::AutoAimToggled(false) => Some("AUTO-AIM OFF".to_string()),
        SimEvent::ShotLaunched { .. } | SimEvent::BallReset => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hud {
    pub score_text: String,
    pub stats_text: String,
    pub power_fraction: f32,
    pub power_hue: f32,
    pub auto_aim: bool,
    pub flashes: Vec<FlashMessage>,
    /// Seconds left on the score pop
    score_pulse: f32,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            score_text: "0 - 0".to_string(),
            stats_text: format_stats(0, 0, 0.0),
            auto_aim: true,
            ..Default::default()
        }
    }

    /// React to this frame's events
    pub fn handle_events(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::Scored(_) => self.score_pulse = SCORE_PULSE_DURATION,
                SimEvent::AutoAimToggled(enabled) => self.auto_aim = *enabled,
                _ => {}
            }
            if let Some(text) = flash_text(event) {
                self.flashes.push(FlashMessage {
                    text,
                    ttl: FLASH_DURATION,
                });
            }
        }
        if self.flashes.len() > MAX_FLASHES {
            let excess = self.flashes.len() - MAX_FLASHES;
            self.flashes.drain(..excess);
        }
    }

    /// Copy the current readouts from the simulation
    pub fn sync(&mut self, sim: &Simulation) {
        let score = sim.score();
        self.score_text = format!("{} - {}", score.home, score.away);
        let stats = sim.stats();
        self.stats_text = format_stats(stats.attempts, stats.made, stats.percentage);
        self.power_fraction = sim.power_fraction();
        self.power_hue = power_bar_hue(self.power_fraction);
        self.auto_aim = sim.auto_aim();
    }

    /// Age timers by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.score_pulse = (self.score_pulse - dt).max(0.0);
        for flash in &mut self.flashes {
            flash.ttl -= dt;
        }
        self.flashes.retain(|f| f.ttl > 0.0);
    }

    /// Pop strength: 1 right after a score, 0 at rest
    pub fn score_tint(&self) -> f32 {
        (self.score_pulse / SCORE_PULSE_DURATION).clamp(0.0, 1.0)
    }

    /// Score text scale: pops to `SCORE_PULSE_SCALE` then eases back to 1
    pub fn score_scale(&self) -> f32 {
        1.0 + (SCORE_PULSE_SCALE - 1.0) * self.score_tint()
    }

    /// Score text colour, blue at the pop fading back to white
    pub fn score_color(&self) -> Vec3 {
        SCORE_COLOR.lerp(SCORE_PULSE_COLOR, self.score_tint())
    }

    pub fn score_pulsing(&self) -> bool {
        self.score_pulse > 0.0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn format_stats(attempts: u32, made: u32, percentage: f32) -> String {
    format!("Shots: {made}/{attempts} ({percentage:.0}%)")
}
