//! Viewport management for scrolling.
//!
//! The [`Viewport`] tracks the first visible wrapped row of the buffer and
//! the size of the text area, and handles all scroll operations.

use crate::editor::{Buffer, Cursor};

use super::screen::{self, wrapped_row_count};

/// The visible window onto a buffer.
///
/// Because one logical line can wrap onto several screen rows, the top of
/// the window is a `(top_line, top_rowoff)` pair: a buffer row plus the
/// wrapped row within it.
///
/// # Example
///
/// ```
/// use mpad::editor::Buffer;
/// use mpad::ui::viewport::Viewport;
///
/// let buffer = Buffer::from_text("0123456789\nnext");
/// let mut vp = Viewport::new(4, 2);
///
/// vp.scroll_down(&buffer, 2);
/// assert_eq!((vp.top_line(), vp.top_rowoff()), (0, 2));
///
/// vp.scroll_down(&buffer, 1);
/// assert_eq!((vp.top_line(), vp.top_rowoff()), (1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    top_line: usize,
    top_rowoff: usize,
}

impl Viewport {
    /// Create a viewport at the top of the buffer.
    ///
    /// # Arguments
    ///
    /// * `width` - Columns available for text
    /// * `height` - Rows available for text
    pub const fn new(width: u16, height: u16) -> Self {
        Self::at(width, height, 0, 0)
    }

    /// Create a viewport anchored at a specific wrapped row.
    pub const fn at(width: u16, height: u16, top_line: usize, top_rowoff: usize) -> Self {
        Self {
            width,
            height,
            top_line,
            top_rowoff,
        }
    }

    /// Buffer row shown at the top of the text area.
    pub const fn top_line(&self) -> usize {
        self.top_line
    }

    /// Wrapped row of `top_line` shown at the top of the text area.
    pub const fn top_rowoff(&self) -> usize {
        self.top_rowoff
    }

    /// Column count lines wrap at, never zero.
    pub fn wrap_width(&self) -> usize {
        usize::from(self.width.max(1))
    }

    /// Number of text rows.
    pub fn text_rows(&self) -> usize {
        usize::from(self.height)
    }

    /// Move the window by `delta` wrapped rows, positive meaning down.
    ///
    /// Steps through the wrapped rows of the current top line before moving
    /// to the adjacent line, and stops at the first row of the buffer or the
    /// last wrapped row of its last line.
    pub fn scroll_by(&mut self, buffer: &Buffer, delta: isize) {
        if delta >= 0 {
            self.scroll_down(buffer, delta.unsigned_abs());
        } else {
            self.scroll_up(buffer, delta.unsigned_abs());
        }
    }

    /// Scroll down by `n` wrapped rows.
    pub fn scroll_down(&mut self, buffer: &Buffer, n: usize) {
        let width = self.wrap_width();
        for _ in 0..n {
            let rows = buffer
                .line(self.top_line)
                .map_or(1, |line| wrapped_row_count(line, width));
            if self.top_rowoff + 1 < rows {
                self.top_rowoff += 1;
            } else if self.top_line + 1 < buffer.line_count() {
                self.top_line += 1;
                self.top_rowoff = 0;
            } else {
                break;
            }
        }
    }

    /// Scroll up by `n` wrapped rows.
    pub fn scroll_up(&mut self, buffer: &Buffer, n: usize) {
        let width = self.wrap_width();
        for _ in 0..n {
            if self.top_rowoff > 0 {
                self.top_rowoff -= 1;
            } else if self.top_line > 0 {
                self.top_line -= 1;
                self.top_rowoff = buffer
                    .line(self.top_line)
                    .map_or(0, |line| wrapped_row_count(line, width) - 1);
            } else {
                break;
            }
        }
    }

    /// Scroll just enough to bring the cursor's cell into the text area.
    pub fn ensure_visible(&mut self, buffer: &Buffer, cursor: Cursor) {
        self.clamp(buffer);
        let Some((row, _)) = screen::rows_from_top(buffer, self, cursor.row, cursor.col) else {
            return;
        };
        let last = isize::try_from(self.text_rows()).unwrap_or(isize::MAX) - 1;
        if row < 0 {
            self.scroll_by(buffer, row);
        } else if row > last {
            self.scroll_by(buffer, row - last.max(0));
        }
    }

    /// Resize the text area, keeping the anchor valid for the new wrap width.
    pub fn resize(&mut self, buffer: &Buffer, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp(buffer);
    }

    /// Pull the anchor back inside the buffer after it shrank.
    pub fn clamp(&mut self, buffer: &Buffer) {
        let last = buffer.line_count().saturating_sub(1);
        if self.top_line > last {
            self.top_line = last;
            self.top_rowoff = 0;
        }
        let rows = buffer
            .line(self.top_line)
            .map_or(1, |line| wrapped_row_count(line, self.wrap_width()));
        self.top_rowoff = self.top_rowoff.min(rows - 1);
    }
}
