//! Overtime color ramp

use std::{fmt, str::FromStr};

use crate::{error::ConfigError, state::TimerConfig};

/// An opaque 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Interpolate each channel towards `other` by `factor`, truncating.
    ///
    /// The factor is clamped to `[0, 1]`, so `lerp(x, 0.0)` is `self` and
    /// `lerp(x, 1.0)` is `other` exactly.
    pub fn lerp(self, other: Rgb, factor: f64) -> Rgb {
        let f = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
        let channel = |start: u8, end: u8| -> u8 {
            let start = f64::from(start);
            let end = f64::from(end);
            (start + (end - start) * f) as u8
        };
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidColor {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("expected six hex digits"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| invalid(&e.to_string()))
        };

        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

/// Bar color for the given remaining time.
///
/// Before expiry this is always the start color. In overtime it stays at the
/// start color until `start_fade_seconds`, reaches the end color at
/// `end_fade_seconds`, and interpolates linearly in between.
pub fn color_for(remaining_seconds: f64, config: &TimerConfig) -> Rgb {
    if remaining_seconds >= 0.0 {
        return config.start_color;
    }

    let overtime = -remaining_seconds;
    if overtime <= config.start_fade_seconds {
        return config.start_color;
    }
    if overtime >= config.end_fade_seconds {
        return config.end_color;
    }

    let span = config.end_fade_seconds - config.start_fade_seconds;
    let factor = (overtime - config.start_fade_seconds) / span;
    config.start_color.lerp(config.end_color, factor)
}
