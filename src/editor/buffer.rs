use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::error::DumpError;
use super::line::Line;

/// Cursor position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based byte offset within the row.
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at row 0, column 0.
    pub const fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// An ordered sequence of lines. Always holds at least one line.
///
/// Editing operations take the cursor by value and return where it ends up,
/// leaving cursor ownership with the caller.
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<Line>,
}

impl Buffer {
    /// Create a buffer holding a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
        }
    }

    /// Build a buffer from records, one line per record.
    ///
    /// A single trailing `\n` is stripped from each record. No records at all
    /// still produce one empty line.
    pub fn load<I, R>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut lines: Vec<Line> = records
            .into_iter()
            .map(|record| {
                let bytes = record.as_ref();
                let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
                Line::from_bytes(bytes)
            })
            .collect();
        if lines.is_empty() {
            lines.push(Line::new());
        }
        Self { lines }
    }

    /// Build a buffer from text where every `\n` separates two lines.
    pub fn from_text(text: &str) -> Self {
        Self::load(text.split('\n'))
    }

    /// Read newline-delimited records from `reader`.
    ///
    /// A final newline does not start an extra empty line.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying reader.
    pub fn read_from<R: BufRead>(reader: R) -> io::Result<Self> {
        let records = reader.split(b'\n').collect::<io::Result<Vec<_>>>()?;
        Ok(Self::load(records))
    }

    /// Read a buffer from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn read_file(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let buffer = Self::read_from(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            lines = buffer.line_count(),
            "loaded file"
        );
        Ok(buffer)
    }

    /// Write all lines to `sink`, separated by `\n`, without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::ShortWrite`] if the sink rejects any part of the content.
    pub fn dump<W: Write>(&self, sink: &mut W) -> Result<(), DumpError> {
        for (idx, line) in self.lines.iter().enumerate() {
            sink.write_all(line.as_bytes())
                .map_err(DumpError::ShortWrite)?;
            if idx + 1 < self.lines.len() {
                sink.write_all(b"\n").map_err(DumpError::ShortWrite)?;
            }
        }
        sink.flush().map_err(DumpError::ShortWrite)
    }

    /// Write the buffer to `path`, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::Open`] if the file cannot be created and
    /// [`DumpError::ShortWrite`] if writing fails part way.
    pub fn save(&self, path: &Path) -> Result<(), DumpError> {
        let file = File::create(path).map_err(|source| DumpError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.dump(&mut writer)
    }

    /// The full content as bytes, in the same format [`Buffer::dump`] writes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                out.push(b'\n');
            }
            out.extend_from_slice(line.as_bytes());
        }
        out
    }

    /// Total number of lines in the buffer.
    pub const fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    pub(crate) fn line_mut(&mut self, row: usize) -> Option<&mut Line> {
        self.lines.get_mut(row)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Length of a row in bytes, 0 for rows past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, Line::len)
    }

    /// Insert an empty line at `at`, clamped to `[0, line_count]`.
    pub fn insert_line(&mut self, at: usize) {
        let at = at.min(self.lines.len());
        let mut line = Line::new();
        if let Some(above) = at.checked_sub(1).and_then(|row| self.lines.get(row)) {
            line.set_continues_block_comment(above.continues_block_comment());
        }
        self.lines.insert(at, line);
    }

    /// Remove the line at `at`. The last remaining line is cleared instead.
    pub fn delete_line(&mut self, at: usize) {
        if at >= self.lines.len() {
            return;
        }
        if self.lines.len() == 1 {
            self.lines[0].clear();
            return;
        }
        self.lines.remove(at);
    }

    /// Split the cursor's row at the cursor (Enter key).
    pub fn split_line(&mut self, cursor: Cursor) -> Cursor {
        let cursor = self.clamp_cursor(cursor);
        let tail = self.lines[cursor.row].split_off(cursor.col);
        self.lines.insert(cursor.row + 1, tail);
        Cursor::at(cursor.row + 1, 0)
    }

    /// Append the cursor's row to the previous row and remove it.
    ///
    /// The cursor ends up where the two rows were joined. No-op on row 0.
    pub fn join_with_previous(&mut self, cursor: Cursor) -> Cursor {
        let cursor = self.clamp_cursor(cursor);
        if cursor.row == 0 {
            return cursor;
        }
        let current = self.lines.remove(cursor.row);
        let prev = &mut self.lines[cursor.row - 1];
        let prev_len = prev.len();
        prev.append_bytes(current.as_bytes());
        // The row below was scanned from the removed row's exit state.
        prev.set_continues_block_comment(current.continues_block_comment());
        Cursor::at(cursor.row - 1, prev_len)
    }

    /// Insert a byte at the cursor and advance past it.
    pub fn insert_byte(&mut self, cursor: Cursor, value: u8) -> Cursor {
        let cursor = self.clamp_cursor(cursor);
        self.lines[cursor.row].insert_byte(cursor.col, value);
        Cursor::at(cursor.row, cursor.col + 1)
    }

    /// Delete the byte before the cursor (Backspace), joining rows at column 0.
    pub fn delete_backward(&mut self, cursor: Cursor) -> Cursor {
        let cursor = self.clamp_cursor(cursor);
        if cursor.col == 0 {
            return self.join_with_previous(cursor);
        }
        self.lines[cursor.row].delete_byte(cursor.col - 1);
        Cursor::at(cursor.row, cursor.col - 1)
    }

    /// Delete the byte under the cursor. The cursor stays on a valid column.
    pub fn delete_at(&mut self, cursor: Cursor) -> Cursor {
        let cursor = self.clamp_cursor(cursor);
        self.lines[cursor.row].delete_byte(cursor.col);
        self.clamp_cursor(cursor)
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&self, cursor: Cursor, direction: Direction) -> Cursor {
        let mut cursor = self.clamp_cursor(cursor);
        match direction {
            Direction::Left => {
                if cursor.col > 0 {
                    cursor.set_col(cursor.col - 1);
                } else if cursor.row > 0 {
                    cursor.row -= 1;
                    cursor.set_col(self.line_len(cursor.row));
                }
            }
            Direction::Right => {
                if cursor.col < self.line_len(cursor.row) {
                    cursor.set_col(cursor.col + 1);
                } else if cursor.row + 1 < self.line_count() {
                    cursor.row += 1;
                    cursor.set_col(0);
                }
            }
            Direction::Up => {
                if cursor.row > 0 {
                    cursor.row -= 1;
                    cursor.col = cursor.col_memory.min(self.line_len(cursor.row));
                }
            }
            Direction::Down => {
                if cursor.row + 1 < self.line_count() {
                    cursor.row += 1;
                    cursor.col = cursor.col_memory.min(self.line_len(cursor.row));
                }
            }
        }
        cursor
    }

    /// Clamp a cursor onto an existing row and column.
    pub fn clamp_cursor(&self, cursor: Cursor) -> Cursor {
        let row = cursor.row.min(self.lines.len() - 1);
        let col = cursor.col.min(self.line_len(row));
        Cursor {
            row,
            col,
            col_memory: cursor.col_memory,
        }
    }

    /// Mark every line's classification as missing.
    pub(crate) fn reset_highlight(&mut self) {
        for line in &mut self.lines {
            line.reset_highlight();
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}
