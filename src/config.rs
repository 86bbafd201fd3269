//! Run-time settings shared by the viewer and the headless commands.

use std::time::Duration;

use crate::cubes::DEFAULT_SPACING;
use crate::error::ConfigError;
use crate::moves::DEFAULT_TURN_DURATION;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// How long one turn takes to animate.
    pub turn_duration: Duration,
    /// Distance between neighbouring cube centres.
    pub spacing: f32,
}

impl Settings {
    /// Validates raw values, typically straight from the command line.
    pub fn new(turn_duration_secs: f32, spacing: f32) -> Result<Self, ConfigError> {
        if !turn_duration_secs.is_finite() || turn_duration_secs < 0.0 {
            return Err(ConfigError::TurnDuration(turn_duration_secs));
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(ConfigError::Spacing(spacing));
        }
        Ok(Self {
            turn_duration: Duration::from_secs_f32(turn_duration_secs),
            spacing,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            turn_duration: DEFAULT_TURN_DURATION,
            spacing: DEFAULT_SPACING,
        }
    }
}
