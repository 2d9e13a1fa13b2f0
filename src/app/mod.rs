//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod command;
mod event_loop;
mod input;
mod model;
mod update;

pub use command::{Command, CommandError, parse as parse_command};
pub use model::{Mode, Model, StatusLevel};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    line_numbers: bool,
    highlight_enabled: bool,
}

impl App {
    /// Create a new application, optionally editing `file_path`.
    pub const fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            line_numbers: false,
            highlight_enabled: true,
        }
    }

    /// Show the line-number gutter.
    pub const fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    /// Enable or disable syntax highlighting.
    pub const fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests;
