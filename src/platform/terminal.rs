//! Terminal binding: one bar row per display, drawn with crossterm

use std::{
    io::{self, Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::warn;

use super::{BarWidget, LocalAction, LocalControls};
use crate::{
    render::{RenderFrame, Rgb},
    state::Command,
};

/// Unfilled part of the bar
const TRACK_COLOR: Rgb = Rgb::new(0x11, 0x11, 0x11);
const RUNNING_MARK: &str = "> ";
const PAUSED_MARK: &str = "||";

/// Where the time label sits on the bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelAnchor {
    #[default]
    Left,
    Center,
}

/// RAII guard for raw mode, alternate screen and hidden cursor
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen) {
            warn!("Failed to restore terminal screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to leave raw mode: {}", e);
        }
    }
}

/// Build the characters of one bar row, `columns` wide
pub fn compose_row(
    frame: &RenderFrame,
    columns: usize,
    anchor: LabelAnchor,
    show_status: bool,
) -> Vec<char> {
    let mut cells = vec![' '; columns];
    let mut place = |start: usize, text: &str| {
        for (offset, ch) in text.chars().enumerate() {
            if let Some(cell) = cells.get_mut(start + offset) {
                *cell = ch;
            }
        }
    };

    let mark = if frame.paused { PAUSED_MARK } else { RUNNING_MARK };
    let label_len = frame.label.chars().count();

    match anchor {
        LabelAnchor::Left if show_status => {
            place(1, mark);
            place(1 + mark.len() + 1, &frame.label);
        }
        LabelAnchor::Left => place(1, &frame.label),
        LabelAnchor::Center => {
            if show_status {
                place(1, mark);
            }
            place(columns.saturating_sub(label_len) / 2, &frame.label);
        }
    }
    cells
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }
}

/// One display's bar drawn on a terminal row
pub struct TerminalBar<W: Write = Stdout> {
    out: W,
    row: u16,
    anchor: LabelAnchor,
    show_status: bool,
    fixed_columns: Option<u16>,
    last: Option<(Vec<char>, usize, Rgb)>,
}

impl TerminalBar<Stdout> {
    /// Bar on `row` of the terminal, sized to the terminal width.
    ///
    /// Only the primary display's bar carries the run/pause mark.
    pub fn new(row: u16, anchor: LabelAnchor) -> Self {
        Self::with_writer(io::stdout(), row, anchor, None)
    }
}

impl<W: Write> TerminalBar<W> {
    pub fn with_writer(out: W, row: u16, anchor: LabelAnchor, fixed_columns: Option<u16>) -> Self {
        Self {
            out,
            row,
            anchor,
            show_status: row == 0,
            fixed_columns,
            last: None,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn columns(&self) -> Option<u16> {
        self.fixed_columns.or_else(|| terminal::size().ok().map(|(cols, _)| cols))
    }
}

impl<W: Write> BarWidget for TerminalBar<W> {
    fn current_width(&self) -> Option<u32> {
        self.columns().map(u32::from)
    }

    fn apply(&mut self, frame: &RenderFrame) -> io::Result<()> {
        let columns = usize::from(self.columns().unwrap_or(80));
        let cells = compose_row(frame, columns, self.anchor, self.show_status);
        let fill = (frame.fill_width as usize).min(columns);

        let drawn = (cells, fill, frame.color);
        if self.last.as_ref() == Some(&drawn) {
            return Ok(());
        }

        let (filled, rest) = drawn.0.split_at(fill);
        queue!(
            self.out,
            MoveTo(0, self.row),
            SetAttribute(Attribute::Bold),
            SetForegroundColor(Color::White),
            SetBackgroundColor(to_color(frame.color)),
            Print(filled.iter().collect::<String>()),
            SetBackgroundColor(to_color(TRACK_COLOR)),
            Print(rest.iter().collect::<String>()),
            ResetColor,
            SetAttribute(Attribute::Reset),
        )?;
        self.out.flush()?;

        self.last = Some(drawn);
        Ok(())
    }
}

/// Keyboard controls read from the terminal without blocking
#[derive(Debug, Default)]
pub struct TerminalControls;

impl TerminalControls {
    pub fn new() -> Self {
        Self
    }
}

/// Space/Enter toggles, `r` resets, `q`/Esc/Ctrl-C quits
pub fn key_to_action(key: KeyEvent) -> Option<LocalAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(LocalAction::Quit);
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(LocalAction::Command(Command::Toggle)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(LocalAction::Command(Command::Reset)),
        KeyCode::Char('q') | KeyCode::Esc => Some(LocalAction::Quit),
        _ => None,
    }
}

impl LocalControls for TerminalControls {
    fn poll(&mut self) -> io::Result<Vec<LocalAction>> {
        let mut actions = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (not releases)
                if key.kind == KeyEventKind::Press {
                    actions.extend(key_to_action(key));
                }
            }
        }
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn frame(label: &str, paused: bool, fill_width: u32) -> RenderFrame {
        RenderFrame {
            display: 0,
            fill_fraction: 0.5,
            fill_width,
            color: Rgb::new(0x00, 0x88, 0x3A),
            label: label.to_string(),
            paused,
            overtime: label.starts_with('-'),
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn row_text(cells: &[char]) -> String {
        cells.iter().collect()
    }

    #[test]
    fn left_anchored_label_with_status_mark() {
        let cells = compose_row(&frame("09:59", false, 10), 20, LabelAnchor::Left, true);
        assert_eq!(cells.len(), 20);
        assert_eq!(row_text(&cells), " >  09:59           ");
    }

    #[test]
    fn paused_mark_on_primary_display() {
        let cells = compose_row(&frame("10:00", true, 0), 16, LabelAnchor::Left, true);
        assert_eq!(row_text(&cells), " || 10:00       ");
    }

    #[test]
    fn secondary_display_has_no_mark() {
        let cells = compose_row(&frame("-00:07", false, 10), 10, LabelAnchor::Left, false);
        assert_eq!(row_text(&cells), " -00:07   ");
    }

    #[test]
    fn centered_label() {
        let cells = compose_row(&frame("01:00", false, 0), 15, LabelAnchor::Center, false);
        assert_eq!(row_text(&cells), "     01:00     ");
    }

    #[test]
    fn narrow_terminal_truncates_label() {
        let cells = compose_row(&frame("10:00", false, 0), 4, LabelAnchor::Left, false);
        assert_eq!(row_text(&cells), " 10:");
    }

    #[test]
    fn redraws_only_on_change() {
        let mut bar = TerminalBar::with_writer(Vec::new(), 1, LabelAnchor::Left, Some(20));
        assert_eq!(bar.current_width(), Some(20));

        bar.apply(&frame("05:00", false, 10)).unwrap();
        let first = bar.writer().len();
        assert!(first > 0);
        assert!(String::from_utf8_lossy(bar.writer()).contains("05:00"));

        bar.apply(&frame("05:00", false, 10)).unwrap();
        assert_eq!(bar.writer().len(), first);

        bar.apply(&frame("04:59", false, 10)).unwrap();
        assert!(bar.writer().len() > first);
    }

    #[test]
    fn key_bindings() {
        assert_eq!(
            key_to_action(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(LocalAction::Command(Command::Toggle))
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(LocalAction::Command(Command::Reset))
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(LocalAction::Quit)
        );
        assert_eq!(key_to_action(key(KeyCode::Esc, KeyModifiers::NONE)), Some(LocalAction::Quit));
        assert_eq!(key_to_action(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }
}
