use std::path::PathBuf;

use crate::app::Model;
use crate::app::command::{self, Command};
use crate::app::model::{Mode, StatusLevel};
use crate::editor::Direction;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Insert a byte at the cursor
    InsertByte(u8),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Delete the byte before the cursor (Backspace)
    DeleteBackward,
    /// Delete the byte under the cursor (`x`)
    DeleteUnderCursor,
    /// Delete the cursor's line (`dd`)
    DeleteLine,
    /// Move the cursor to a 1-based line number
    GoToLine(usize),

    // Modes
    EnterInsertMode,
    EnterNormalMode,
    EnterCommandMode,
    /// Append a character to the command line
    CommandInput(char),
    /// Remove the last command character, leaving command mode when empty
    CommandBackspace,
    CommandCancel,
    /// Run the typed command
    CommandSubmit,
    /// Start a two-key operator such as `d`
    BeginOperator(char),
    /// Abandon a pending operator
    CancelOperator,

    // Files
    /// Write the buffer, optionally to a new path
    Save(Option<PathBuf>),
    /// Write, then quit if the write succeeded
    SaveAndQuit,

    // System
    /// Terminal resized
    Resize(u16, u16),
    /// Quit unless there are unsaved changes
    Quit,
    /// Quit discarding changes
    ForceQuit,
}

impl Message {
    /// Whether this message comes from a key press (as opposed to the terminal).
    const fn is_keypress(&self) -> bool {
        !matches!(self, Self::Resize(..))
    }
}

/// Update the model based on a message.
///
/// This is the core state transition function. A key press outside
/// command mode clears the previous status message, and every message
/// leaves the cursor visible.
pub fn update(mut model: Model, msg: Message) -> Model {
    if msg.is_keypress() && !matches!(model.mode, Mode::Command(_)) {
        model.clear_status();
    }

    match msg {
        Message::MoveCursor(direction) => model.editor.move_cursor(direction),
        Message::InsertByte(byte) => model.editor.insert_byte(byte),
        Message::InsertNewline => model.editor.insert_newline(),
        Message::DeleteBackward => model.editor.delete_backward(),
        Message::DeleteUnderCursor => model.editor.delete_under_cursor(),
        Message::DeleteLine => {
            model.pending = None;
            model.editor.delete_line();
        }
        Message::GoToLine(line) => model.editor.move_to(line.saturating_sub(1), 0),

        Message::EnterInsertMode => model.mode = Mode::Insert,
        Message::EnterNormalMode => model.mode = Mode::Normal,
        Message::EnterCommandMode => model.mode = Mode::Command(String::new()),
        Message::CommandInput(c) => {
            if let Mode::Command(text) = &mut model.mode {
                text.push(c);
            }
        }
        Message::CommandBackspace => {
            if let Mode::Command(text) = &mut model.mode
                && text.pop().is_none()
            {
                model.mode = Mode::Normal;
            }
        }
        Message::CommandCancel => model.mode = Mode::Normal,
        Message::CommandSubmit => {
            if let Mode::Command(text) = std::mem::take(&mut model.mode) {
                model = run_command(model, &text);
            }
        }
        Message::BeginOperator(op) => model.pending = Some(op),
        Message::CancelOperator => model.pending = None,

        Message::Save(path) => {
            model.save(path);
        }
        Message::SaveAndQuit => {
            if model.save(None) {
                model.should_quit = true;
            }
        }

        Message::Resize(width, height) => {
            tracing::debug!(width, height, "resize");
            model.resize(width, height);
        }
        Message::Quit => {
            if model.editor.is_dirty() {
                model.show_status(
                    StatusLevel::Warning,
                    "No write since last change (use :q!)",
                );
            } else {
                model.should_quit = true;
            }
        }
        Message::ForceQuit => model.should_quit = true,
    }

    model.scroll_to_cursor();
    model
}

fn run_command(mut model: Model, text: &str) -> Model {
    let msg = match command::parse(text) {
        Ok(Some(cmd)) => match cmd {
            Command::Quit => Message::Quit,
            Command::ForceQuit => Message::ForceQuit,
            Command::Write(path) => Message::Save(path),
            Command::WriteQuit => Message::SaveAndQuit,
            Command::GoToLine(line) => Message::GoToLine(line),
        },
        Ok(None) => return model,
        Err(err) => {
            tracing::warn!(command = text, error = %err, "rejected command");
            model.show_status(StatusLevel::Error, err.to_string());
            return model;
        }
    };
    update(model, msg)
}
