//! Theming and color definitions.
//!
//! Uses ANSI colors so highlighting follows the terminal's own palette.

use ratatui::style::{Color, Style};

use crate::app::StatusLevel;
use crate::highlight::Highlight;

/// Get the style for a byte classification.
pub fn style_for_highlight(class: Highlight) -> Style {
    match class {
        Highlight::Normal => Style::default(),
        Highlight::LineComment | Highlight::BlockComment => Style::default().fg(Color::DarkGray),
        Highlight::String => Style::default().fg(Color::Green),
        Highlight::Number => Style::default().fg(Color::Cyan),
        Highlight::Keyword => Style::default().fg(Color::Yellow),
    }
}

/// Style of the rows past the end of the buffer.
pub fn filler_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Style of the line-number gutter.
pub fn gutter_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style of the status bar, by the level of the message it shows.
pub fn status_bar_style(level: Option<StatusLevel>) -> Style {
    match level {
        None | Some(StatusLevel::Info) => Style::default().bg(Color::DarkGray).fg(Color::White),
        Some(StatusLevel::Warning) => Style::default().bg(Color::Yellow).fg(Color::Black),
        Some(StatusLevel::Error) => Style::default().bg(Color::Red).fg(Color::White),
    }
}
