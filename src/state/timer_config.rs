//! Immutable timer configuration

use crate::{error::ConfigError, render::Rgb};

/// Default bar color while counting down
pub const DEFAULT_START_COLOR: Rgb = Rgb::new(0x00, 0x88, 0x3A);
/// Default bar color once the fade zone has been crossed
pub const DEFAULT_END_COLOR: Rgb = Rgb::new(0xBB, 0x22, 0x22);

/// Timer duration and overtime color ramp, fixed for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerConfig {
    pub total_seconds: f64,
    /// Overtime after which the color starts moving away from `start_color`
    pub start_fade_seconds: f64,
    /// Overtime at which the color reaches `end_color`
    pub end_fade_seconds: f64,
    pub start_color: Rgb,
    pub end_color: Rgb,
}

impl TimerConfig {
    /// Validate and build a configuration
    pub fn new(
        total_seconds: f64,
        start_fade_seconds: f64,
        end_fade_seconds: f64,
        start_color: Rgb,
        end_color: Rgb,
    ) -> Result<Self, ConfigError> {
        if !total_seconds.is_finite() || total_seconds <= 0.0 {
            return Err(ConfigError::InvalidDuration(total_seconds));
        }
        if !start_fade_seconds.is_finite() || start_fade_seconds < 0.0 {
            return Err(ConfigError::InvalidStartFade(start_fade_seconds));
        }
        if !end_fade_seconds.is_finite() || end_fade_seconds <= start_fade_seconds {
            return Err(ConfigError::FadeOrder {
                start: start_fade_seconds,
                end: end_fade_seconds,
            });
        }

        Ok(Self {
            total_seconds,
            start_fade_seconds,
            end_fade_seconds,
            start_color,
            end_color,
        })
    }

    /// Configuration with the default colors
    pub fn with_default_colors(
        total_seconds: f64,
        start_fade_seconds: f64,
        end_fade_seconds: f64,
    ) -> Result<Self, ConfigError> {
        Self::new(
            total_seconds,
            start_fade_seconds,
            end_fade_seconds,
            DEFAULT_START_COLOR,
            DEFAULT_END_COLOR,
        )
    }
}
