use std::path::Path;

use crate::highlight::{self, Syntax};

use super::buffer::{Buffer, Cursor, Direction};
use super::error::DumpError;

/// Buffer, cursor and dirty flag for one open document.
///
/// Every editing operation mutates the buffer and then re-highlights from
/// the row it touched, so the classification is always current by the
/// time a frame is drawn.
#[derive(Debug, Clone)]
pub struct Editor {
    buffer: Buffer,
    cursor: Cursor,
    dirty: bool,
    syntax: Option<&'static Syntax>,
}

impl Editor {
    /// Wrap a loaded buffer, highlighting it completely if `syntax` is set.
    pub fn new(buffer: Buffer, syntax: Option<&'static Syntax>) -> Self {
        let mut editor = Self {
            buffer,
            cursor: Cursor::new(),
            dirty: false,
            syntax: None,
        };
        editor.set_syntax(syntax);
        editor
    }

    /// An editor holding a single empty line.
    pub fn empty() -> Self {
        Self::new(Buffer::new(), None)
    }

    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer has been modified since load or the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// Switch the highlighting language, recomputing every row.
    pub fn set_syntax(&mut self, syntax: Option<&'static Syntax>) {
        self.syntax = syntax;
        match syntax {
            Some(syntax) => {
                highlight::highlight_all(&mut self.buffer, syntax);
            }
            None => self.buffer.reset_highlight(),
        }
    }

    /// Insert a byte at the cursor.
    pub fn insert_byte(&mut self, value: u8) {
        self.cursor = self.buffer.insert_byte(self.cursor, value);
        self.edited(self.cursor.row);
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let row = self.cursor.row;
        self.cursor = self.buffer.split_line(self.cursor);
        self.edited(row);
    }

    /// Delete the byte before the cursor, joining with the previous line at column 0.
    pub fn delete_backward(&mut self) {
        let before = self.cursor;
        self.cursor = self.buffer.delete_backward(self.cursor);
        if self.cursor != before {
            self.edited(self.cursor.row);
        }
    }

    /// Delete the byte under the cursor.
    pub fn delete_under_cursor(&mut self) {
        let cursor = self.buffer.clamp_cursor(self.cursor);
        if cursor.col >= self.buffer.line_len(cursor.row) {
            return;
        }
        self.cursor = self.buffer.delete_at(cursor);
        self.edited(self.cursor.row);
    }

    /// Delete the cursor's line.
    pub fn delete_line(&mut self) {
        let row = self.cursor.row;
        self.buffer.delete_line(row);
        self.cursor = self.buffer.clamp_cursor(Cursor::at(row, self.cursor.col));
        self.edited(self.cursor.row.min(row));
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor = self.buffer.move_cursor(self.cursor, direction);
    }

    /// Move the cursor to a specific row and column, clamped to the buffer.
    pub fn move_to(&mut self, row: usize, col: usize) {
        self.cursor = self.buffer.clamp_cursor(Cursor::at(row, col));
    }

    /// Write the buffer to `path` and mark it clean on success.
    ///
    /// # Errors
    ///
    /// Returns the [`DumpError`] from the write; the dirty flag is left as is.
    pub fn save(&mut self, path: &Path) -> Result<(), DumpError> {
        self.buffer.save(path)?;
        self.dirty = false;
        Ok(())
    }

    fn edited(&mut self, row: usize) {
        self.dirty = true;
        if let Some(syntax) = self.syntax {
            highlight::update_from(&mut self.buffer, syntax, row);
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::empty()
    }
}
