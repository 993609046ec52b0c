//! Per-display frame computation
//!
//! Every display shows the same fraction, color and label; only the pixel
//! width of the fill depends on the display.

use std::{fmt, str::FromStr};

use super::{color_for, Rgb};
use crate::{
    error::ConfigError,
    state::{TimerConfig, TimerSnapshot},
};

/// Size and position of one connected display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl DisplayGeometry {
    pub const fn new(width: u32, height: u32, x_offset: i32, y_offset: i32) -> Self {
        Self { width, height, x_offset, y_offset }
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new(1920, 1080, 0, 0)
    }
}

impl fmt::Display for DisplayGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x_offset, self.y_offset)
    }
}

/// Parses X11-style geometry: `1920x1080+0+0`, `1280x1024-1280+0`
impl FromStr for DisplayGeometry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidDisplay(s.to_string());
        let text = s.trim();

        let (width, rest) = text.split_once(['x', 'X']).ok_or_else(invalid)?;
        let offset_start = rest.find(['+', '-']).ok_or_else(invalid)?;
        let (height, offsets) = rest.split_at(offset_start);
        let y_start = offsets[1..].find(['+', '-']).map(|i| i + 1).ok_or_else(invalid)?;
        let (x_offset, y_offset) = offsets.split_at(y_start);

        let geometry = DisplayGeometry {
            width: width.parse().map_err(|_| invalid())?,
            height: height.parse().map_err(|_| invalid())?,
            x_offset: x_offset.parse().map_err(|_| invalid())?,
            y_offset: y_offset.parse().map_err(|_| invalid())?,
        };
        if geometry.width == 0 || geometry.height == 0 {
            return Err(invalid());
        }
        Ok(geometry)
    }
}

/// What one display's bar should show this tick
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Index into the startup display list
    pub display: usize,
    pub fill_fraction: f64,
    /// Filled width in the same units as the width the frame was rendered for
    pub fill_width: u32,
    pub color: Rgb,
    pub label: String,
    pub paused: bool,
    pub overtime: bool,
}

/// Share of the bar that is filled. Full once the timer has expired.
pub fn fill_fraction(snapshot: &TimerSnapshot) -> f64 {
    if snapshot.remaining_seconds < 0.0 {
        return 1.0;
    }
    let elapsed = snapshot.total_seconds - snapshot.remaining_seconds;
    (elapsed / snapshot.total_seconds).clamp(0.0, 1.0)
}

/// `MM:SS` of the whole seconds left, `-MM:SS` of the whole seconds over
pub fn format_label(remaining_seconds: f64) -> String {
    let sign = if remaining_seconds < 0.0 { "-" } else { "" };
    let whole = remaining_seconds.abs().trunc() as u64;
    format!("{}{:02}:{:02}", sign, whole / 60, whole % 60)
}

/// Frame for one display of the given width
pub fn render_frame(
    snapshot: &TimerSnapshot,
    config: &TimerConfig,
    display: usize,
    width: u32,
) -> RenderFrame {
    let fraction = fill_fraction(snapshot);
    let fill_width = ((fraction * f64::from(width)) as u32).min(width);

    RenderFrame {
        display,
        fill_fraction: fraction,
        fill_width,
        color: color_for(snapshot.remaining_seconds, config),
        label: format_label(snapshot.remaining_seconds),
        paused: snapshot.is_paused,
        overtime: snapshot.is_overtime(),
    }
}

/// One frame per display, in display order
pub fn render(
    snapshot: &TimerSnapshot,
    config: &TimerConfig,
    displays: &[DisplayGeometry],
) -> Vec<RenderFrame> {
    displays
        .iter()
        .enumerate()
        .map(|(index, geometry)| render_frame(snapshot, config, index, geometry.width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TimerConfig {
        TimerConfig::with_default_colors(600.0, 15.0, 45.0).unwrap()
    }

    fn snapshot(remaining: f64) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: remaining,
            total_seconds: 600.0,
            is_paused: false,
        }
    }

    #[test]
    fn labels_count_down_by_whole_seconds() {
        assert_eq!(format_label(600.0), "10:00");
        assert_eq!(format_label(599.9), "09:59");
        assert_eq!(format_label(61.0), "01:01");
        assert_eq!(format_label(0.4), "00:00");
    }

    #[test]
    fn overtime_labels_carry_a_minus() {
        assert_eq!(format_label(-7.0), "-00:07");
        assert_eq!(format_label(-7.8), "-00:07");
        assert_eq!(format_label(-0.2), "-00:00");
        assert_eq!(format_label(-3725.0), "-62:05");
    }

    #[test]
    fn long_durations_do_not_wrap_minutes() {
        assert_eq!(format_label(125.0 * 60.0), "125:00");
    }

    #[test]
    fn fill_tracks_elapsed_share() {
        assert_eq!(fill_fraction(&snapshot(600.0)), 0.0);
        assert_eq!(fill_fraction(&snapshot(150.0)), 0.75);
        assert_eq!(fill_fraction(&snapshot(0.0)), 1.0);
    }

    #[test]
    fn fill_is_full_in_overtime() {
        assert_eq!(fill_fraction(&snapshot(-0.5)), 1.0);
        assert_eq!(fill_fraction(&snapshot(-1000.0)), 1.0);
    }

    #[test]
    fn fill_is_clamped() {
        // Only reachable through a hand-built snapshot
        assert_eq!(fill_fraction(&snapshot(900.0)), 0.0);
    }

    #[test]
    fn frames_are_mirrored_across_displays() {
        let displays = [
            DisplayGeometry::new(1920, 1080, 0, 0),
            DisplayGeometry::new(1280, 1024, 1920, 0),
        ];
        let frames = render(&snapshot(300.0), &config(), &displays);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].display, 0);
        assert_eq!(frames[1].display, 1);
        assert_eq!(frames[0].fill_width, 960);
        assert_eq!(frames[1].fill_width, 640);
        assert_eq!(frames[0].label, frames[1].label);
        assert_eq!(frames[0].color, frames[1].color);
        assert_eq!(frames[0].fill_fraction, frames[1].fill_fraction);
    }

    #[test]
    fn overtime_frame_uses_ramp_color() {
        let cfg = config();
        let frame = render_frame(&snapshot(-60.0), &cfg, 0, 100);
        assert!(frame.overtime);
        assert_eq!(frame.fill_width, 100);
        assert_eq!(frame.color, cfg.end_color);
        assert_eq!(frame.label, "-01:00");
    }

    #[test]
    fn no_displays_no_frames() {
        assert!(render(&snapshot(10.0), &config(), &[]).is_empty());
    }

    #[test]
    fn parses_geometry() {
        assert_eq!(
            "1920x1080+0+0".parse::<DisplayGeometry>().unwrap(),
            DisplayGeometry::new(1920, 1080, 0, 0)
        );
        assert_eq!(
            "1280x1024-1280+20".parse::<DisplayGeometry>().unwrap(),
            DisplayGeometry::new(1280, 1024, -1280, 20)
        );
        assert_eq!(
            DisplayGeometry::new(1280, 1024, -1280, 20).to_string(),
            "1280x1024-1280+20"
        );
    }

    #[test]
    fn rejects_malformed_geometry() {
        for bad in ["1920x1080", "1920+0+0", "x1080+0+0", "0x1080+0+0", "axb+0+0", "1920x1080+0"] {
            assert!(bad.parse::<DisplayGeometry>().is_err(), "{bad} should be rejected");
        }
    }
}
