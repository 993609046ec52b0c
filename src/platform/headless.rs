//! Display-less binding that reports frames through the log

use std::io;

use tracing::info;

use super::BarWidget;
use crate::render::{DisplayGeometry, RenderFrame};

/// Logs one line whenever the visible label or run state changes
#[derive(Debug)]
pub struct HeadlessBar {
    geometry: DisplayGeometry,
    last: Option<(String, bool)>,
}

impl HeadlessBar {
    pub fn new(geometry: DisplayGeometry) -> Self {
        Self { geometry, last: None }
    }

    /// Remember what `frame` shows; true if that differs from the last frame
    fn note(&mut self, frame: &RenderFrame) -> bool {
        let shown = (frame.label.clone(), frame.paused);
        if self.last.as_ref() == Some(&shown) {
            return false;
        }
        self.last = Some(shown);
        true
    }
}

impl BarWidget for HeadlessBar {
    fn current_width(&self) -> Option<u32> {
        None
    }

    fn apply(&mut self, frame: &RenderFrame) -> io::Result<()> {
        if !self.note(frame) {
            return Ok(());
        }

        info!(
            display = frame.display,
            geometry = %self.geometry,
            label = %frame.label,
            color = %frame.color,
            fill = frame.fill_width,
            paused = frame.paused,
            "bar"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Rgb;

    fn frame(label: &str, paused: bool, fill_width: u32) -> RenderFrame {
        RenderFrame {
            display: 0,
            fill_fraction: 0.0,
            fill_width,
            color: Rgb::new(0x00, 0x88, 0x3A),
            label: label.to_string(),
            paused,
            overtime: false,
        }
    }

    #[test]
    fn reports_only_on_change() {
        let mut bar = HeadlessBar::new(DisplayGeometry::default());
        assert!(bar.note(&frame("10:00", true, 0)));
        assert!(!bar.note(&frame("10:00", true, 0)));

        // Fill moves every tick; only label and run state count
        assert!(!bar.note(&frame("10:00", true, 3)));
        assert!(bar.note(&frame("10:00", false, 3)));
        assert!(bar.note(&frame("09:59", false, 4)));
        assert!(!bar.note(&frame("09:59", false, 5)));
    }

    #[test]
    fn apply_records_what_was_shown() {
        let mut bar = HeadlessBar::new(DisplayGeometry::default());
        assert_eq!(bar.current_width(), None);
        bar.apply(&frame("00:05", false, 10)).unwrap();
        bar.apply(&frame("00:05", false, 10)).unwrap();
        assert_eq!(bar.last, Some(("00:05".to_string(), false)));
    }
}
