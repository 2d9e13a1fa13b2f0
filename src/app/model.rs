use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::editor::{Buffer, Editor};
use crate::highlight::Syntax;
use crate::ui::line_number_width;
use crate::ui::screen;
use crate::ui::viewport::Viewport;

/// How long a status message stays up if no key is pressed.
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Input mode of the editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    /// Text typed so far on the `:` line.
    Command(String),
}

impl Mode {
    /// Label shown in the status line.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Command(_) => "COMMAND",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Buffer, cursor and dirty flag
    pub editor: Editor,
    /// First visible wrapped row and text-area size
    pub viewport: Viewport,
    /// File the buffer is written to, if named
    pub file_path: Option<PathBuf>,
    pub mode: Mode,
    /// Operator key waiting for its second key (`d` of `dd`)
    pub pending: Option<char>,
    /// Whether the line-number gutter is shown
    pub line_numbers: bool,
    /// Whether syntax highlighting is applied
    pub highlight_enabled: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    status: Option<StatusMessage>,
    terminal_size: (u16, u16),
}

impl Model {
    /// Create a model around an existing editor.
    pub fn new(file_path: Option<PathBuf>, editor: Editor, terminal_size: (u16, u16)) -> Self {
        let highlight_enabled = editor.syntax().is_some();
        let mut model = Self {
            editor,
            viewport: Viewport::new(terminal_size.0, terminal_size.1.saturating_sub(1)),
            file_path,
            mode: Mode::Normal,
            pending: None,
            line_numbers: false,
            highlight_enabled,
            should_quit: false,
            status: None,
            terminal_size,
        };
        model.scroll_to_cursor();
        model
    }

    /// Load `file_path` into a new model.
    ///
    /// A missing file starts an empty buffer bound to that name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(
        file_path: Option<PathBuf>,
        highlight_enabled: bool,
        terminal_size: (u16, u16),
    ) -> Result<Self> {
        let (buffer, status) = match &file_path {
            None => (Buffer::new(), Some("No file (use :w <path>)")),
            Some(path) => match Buffer::read_file(path) {
                Ok(buffer) => (buffer, None),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    tracing::info!(path = %path.display(), "new file");
                    (Buffer::new(), Some("New file"))
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Failed to read {}", path.display()));
                }
            },
        };

        let syntax = if highlight_enabled {
            file_path.as_deref().and_then(Syntax::for_path)
        } else {
            None
        };
        let mut model = Self::new(file_path, Editor::new(buffer, syntax), terminal_size);
        model.highlight_enabled = highlight_enabled;
        if let Some(text) = status {
            model.show_status(StatusLevel::Info, text);
        }
        Ok(model)
    }

    /// Show or hide the line-number gutter.
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self.scroll_to_cursor();
        self
    }

    pub const fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Columns taken by the line-number gutter, including its trailing space.
    pub fn gutter_width(&self) -> u16 {
        if self.line_numbers {
            line_number_width(self.editor.buffer().line_count()) + 1
        } else {
            0
        }
    }

    /// Columns available for text.
    pub fn text_width(&self) -> u16 {
        self.terminal_size
            .0
            .saturating_sub(self.gutter_width())
            .max(1)
    }

    /// Rows available for text; the last terminal row is the status line.
    pub fn text_rows(&self) -> u16 {
        self.terminal_size.1.saturating_sub(1).max(1)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.scroll_to_cursor();
    }

    /// Sync the viewport with the layout and scroll the cursor into view.
    pub fn scroll_to_cursor(&mut self) {
        let (width, rows) = (self.text_width(), self.text_rows());
        let buffer = self.editor.buffer();
        self.viewport.resize(buffer, width, rows);
        self.viewport.ensure_visible(buffer, self.editor.cursor());
    }

    /// Terminal cell of the cursor, or `None` when it is off screen.
    ///
    /// A one-row terminal has no text area, only the status line.
    pub fn cursor_screen_position(&self) -> Option<(u16, u16)> {
        if self.terminal_size.1 < 2 {
            return None;
        }
        let cursor = self.editor.cursor();
        let (row, col) =
            screen::to_visible_screen(self.editor.buffer(), &self.viewport, cursor.row, cursor.col)?;
        let x = u16::try_from(col).ok()?.checked_add(self.gutter_width())?;
        let y = u16::try_from(row).ok()?;
        Some((x, y))
    }

    /// Name shown in the status line.
    pub fn display_name(&self) -> String {
        self.file_path.as_deref().map_or_else(
            || "[No Name]".to_string(),
            |path| path.display().to_string(),
        )
    }

    pub fn show_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
            expires_at: Instant::now() + STATUS_TIMEOUT,
        });
    }

    /// Drop the status message once it has timed out. Returns whether it did.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.expires_at <= now)
        {
            self.status = None;
            return true;
        }
        false
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn active_status(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    /// Write the buffer, optionally rebinding it to `path` first.
    ///
    /// Reports the outcome through the status line and returns whether the
    /// write succeeded.
    pub fn save(&mut self, path: Option<PathBuf>) -> bool {
        if let Some(path) = path {
            self.rebind(path);
        }
        let Some(path) = self.file_path.clone() else {
            self.show_status(StatusLevel::Error, "No file name (use :w <path>)");
            return false;
        };

        match self.editor.save(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "wrote file");
                self.show_status(StatusLevel::Info, format!("Wrote {}", path.display()));
                true
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "write failed");
                self.show_status(StatusLevel::Error, format!("Write failed: {err}"));
                false
            }
        }
    }

    fn rebind(&mut self, path: PathBuf) {
        if self.highlight_enabled {
            let syntax = Syntax::for_path(&path);
            if syntax != self.editor.syntax() {
                self.editor.set_syntax(syntax);
            }
        }
        self.file_path = Some(path);
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(None, Editor::empty(), (80, 24))
    }
}
