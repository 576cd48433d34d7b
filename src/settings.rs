//! Physics tuning
//!
//! Every gameplay constant the simulation reads at runtime. Loaded from JSON;
//! missing fields fall back to the defaults in [`crate::consts`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error loading or validating a tuning file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Parsed fine but a value is out of range
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse tuning JSON: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Runtime physics/gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Vertical acceleration (negative = down)
    pub gravity: f32,
    /// Bounce energy retention (0-1)
    pub restitution: f32,
    /// Rolling friction multiplier per grounded frame (0-1)
    pub friction: f32,
    /// Frame dt cap in seconds
    pub max_frame_dt: f32,

    // === Movement ===
    pub move_accel: f32,
    pub max_speed: f32,

    // === Shooting ===
    pub min_power: f32,
    pub max_power: f32,
    /// Power after a reset
    pub default_power: f32,
    /// Power units per second while charging
    pub charge_rate: f32,
    /// Auto-aim treats hoops closer than this in distance as equally near
    pub tie_epsilon: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            restitution: RESTITUTION,
            friction: FRICTION,
            max_frame_dt: MAX_FRAME_DT,

            move_accel: MOVE_ACCEL,
            max_speed: MAX_SPEED,

            min_power: MIN_POWER,
            max_power: MAX_POWER,
            default_power: DEFAULT_POWER,
            charge_rate: CHARGE_RATE,
            tie_epsilon: TIE_EPSILON,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults if it can't be used
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all_finite = [
            self.gravity,
            self.restitution,
            self.friction,
            self.max_frame_dt,
            self.move_accel,
            self.max_speed,
            self.min_power,
            self.max_power,
            self.default_power,
            self.charge_rate,
            self.tie_epsilon,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::Invalid("values must be finite".into()));
        }
        if self.gravity >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gravity must pull down, got {}",
                self.gravity
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::Invalid(format!(
                "restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::Invalid(format!(
                "friction must be in [0, 1], got {}",
                self.friction
            )));
        }
        if self.max_frame_dt <= 0.0 {
            return Err(ConfigError::Invalid("max_frame_dt must be positive".into()));
        }
        if self.max_speed <= 0.0 || self.move_accel < 0.0 || self.charge_rate < 0.0 {
            return Err(ConfigError::Invalid(
                "max_speed must be positive, move_accel and charge_rate non-negative".into(),
            ));
        }
        if self.min_power < 0.0 || self.min_power > self.max_power {
            return Err(ConfigError::Invalid(format!(
                "power range [{}, {}] is empty or negative",
                self.min_power, self.max_power
            )));
        }
        if !(self.min_power..=self.max_power).contains(&self.default_power) {
            return Err(ConfigError::Invalid(format!(
                "default_power {} outside [{}, {}]",
                self.default_power, self.min_power, self.max_power
            )));
        }
        if self.tie_epsilon < 0.0 {
            return Err(ConfigError::Invalid("tie_epsilon must be non-negative".into()));
        }
        Ok(())
    }

    /// Clamp a power value into the configured range
    #[inline]
    pub fn clamp_power(&self, power: f32) -> f32 {
        power.clamp(self.min_power, self.max_power)
    }
}
