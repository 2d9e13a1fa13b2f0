//! Mapping between logical buffer positions and terminal cells.
//!
//! Everything here is computed on demand from the buffer, the viewport and
//! the wrap width. Nothing is cached, since all three change between frames.

use crate::editor::{Buffer, Line};
use crate::highlight::Highlight;

use super::viewport::Viewport;

/// Tabs advance to the next multiple of this many columns.
pub const TAB_STOP: usize = 4;

/// Terminal columns occupied by the first `col` bytes of `line`.
pub fn visual_width_upto(line: &Line, col: usize) -> usize {
    line.as_bytes()
        .iter()
        .take(col)
        .fold(0, |width, &byte| advance(width, byte))
}

/// Terminal columns occupied by the whole line.
pub fn visual_width(line: &Line) -> usize {
    visual_width_upto(line, line.len())
}

/// Screen rows a line wraps onto. Never less than one.
pub fn wrapped_row_count(line: &Line, width: usize) -> usize {
    visual_width(line).div_ceil(width.max(1)).max(1)
}

/// Wrapped row and column of byte `col` inside its own line.
///
/// A cursor sitting just past a line that exactly fills its last row stays
/// on that row, in the final column.
pub fn position_in_line(line: &Line, col: usize, width: usize) -> (usize, usize) {
    let width = width.max(1);
    let vcol = visual_width_upto(line, col);
    let rows = wrapped_row_count(line, width);
    let sub_row = vcol / width;
    if sub_row >= rows {
        (rows - 1, width - 1)
    } else {
        (sub_row, vcol % width)
    }
}

const fn advance(width: usize, byte: u8) -> usize {
    if byte == b'\t' {
        width + TAB_STOP - width % TAB_STOP
    } else {
        width + 1
    }
}

/// Where a logical position lands relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPosition {
    /// Screen row (possibly past the bottom of the text area) and column.
    At { row: isize, col: usize },
    /// The row is above `top_line`.
    AboveViewport,
    /// The row does not exist.
    BeyondBuffer,
}

/// Map `(row, col)` to a screen position, without clipping to the text area.
///
/// Walks from the viewport's top line down to `row`, so the cost grows with
/// the distance between them.
pub fn to_screen(buffer: &Buffer, viewport: &Viewport, row: usize, col: usize) -> ScreenPosition {
    if row < viewport.top_line() {
        return ScreenPosition::AboveViewport;
    }
    match rows_from_top(buffer, viewport, row, col) {
        Some((screen_row, screen_col)) => ScreenPosition::At {
            row: screen_row,
            col: screen_col,
        },
        None => ScreenPosition::BeyondBuffer,
    }
}

/// Like [`to_screen`], but `None` unless the cell is inside the text area.
pub fn to_visible_screen(
    buffer: &Buffer,
    viewport: &Viewport,
    row: usize,
    col: usize,
) -> Option<(usize, usize)> {
    let ScreenPosition::At { row, col } = to_screen(buffer, viewport, row, col) else {
        return None;
    };
    let row = usize::try_from(row).ok()?;
    (row < viewport.text_rows()).then_some((row, col))
}

/// Signed wrapped-row distance from the viewport's first visible row, plus
/// the column, for any existing logical position.
///
/// Positions above the viewport yield a negative row. `None` when `row` is
/// past the end of the buffer.
pub fn rows_from_top(
    buffer: &Buffer,
    viewport: &Viewport,
    row: usize,
    col: usize,
) -> Option<(isize, usize)> {
    let width = viewport.wrap_width();
    let line = buffer.line(row)?;
    let top = viewport.top_line();

    let between = |range: std::ops::Range<usize>| -> usize {
        range
            .filter_map(|r| buffer.line(r))
            .map(|l| wrapped_row_count(l, width))
            .sum()
    };

    let (sub_row, sub_col) = position_in_line(line, col, width);
    let offset = to_isize(sub_row) - to_isize(viewport.top_rowoff());
    let screen_row = if row >= top {
        offset + to_isize(between(top..row))
    } else {
        offset - to_isize(between(row..top))
    };
    Some((screen_row, sub_col))
}

#[allow(clippy::cast_possible_wrap)]
const fn to_isize(n: usize) -> isize {
    // Row counts are bounded by the buffer's in-memory size.
    n as isize
}

/// A span of display text sharing one classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub class: Highlight,
    pub text: String,
}

/// One row of the text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRow {
    /// Wrapped row `wrap_row` of buffer line `line`.
    Text {
        line: usize,
        wrap_row: usize,
        runs: Vec<StyledRun>,
    },
    /// Past the end of the buffer.
    Filler,
}

/// The cells of one wrapped row of `line`, tabs expanded to spaces.
///
/// Columns are counted across the whole line, so a tab that straddles a
/// wrap boundary continues on the next row.
pub fn wrapped_slice(line: &Line, width: usize, wrap_row: usize) -> Vec<StyledRun> {
    let width = width.max(1);
    let start = wrap_row.saturating_mul(width);
    let end = start.saturating_add(width);

    let mut runs: Vec<StyledRun> = Vec::new();
    let mut vcol = 0;
    for (idx, &byte) in line.as_bytes().iter().enumerate() {
        if vcol >= end {
            break;
        }
        let next = advance(vcol, byte);
        let glyph = display_char(byte);
        let class = line.class_at(idx);
        for cell in vcol..next {
            if (start..end).contains(&cell) {
                push_cell(&mut runs, class, glyph);
            }
        }
        vcol = next;
    }
    runs
}

fn push_cell(runs: &mut Vec<StyledRun>, class: Highlight, glyph: char) {
    if let Some(last) = runs.last_mut()
        && last.class == class
    {
        last.text.push(glyph);
        return;
    }
    runs.push(StyledRun {
        class,
        text: glyph.to_string(),
    });
}

// Every byte occupies exactly one cell, so anything that is not printable
// ASCII is shown as a placeholder.
fn display_char(byte: u8) -> char {
    match byte {
        b'\t' => ' ',
        b' '..=b'~' => char::from(byte),
        _ => '?',
    }
}

/// The text area's rows from the viewport's top, followed by filler rows.
pub fn visible_rows(buffer: &Buffer, viewport: &Viewport) -> Vec<ScreenRow> {
    let width = viewport.wrap_width();
    let mut rows = Vec::with_capacity(viewport.text_rows());
    let mut line_idx = viewport.top_line();
    let mut wrap_row = viewport.top_rowoff();

    while rows.len() < viewport.text_rows() {
        let Some(line) = buffer.line(line_idx) else {
            rows.push(ScreenRow::Filler);
            continue;
        };
        rows.push(ScreenRow::Text {
            line: line_idx,
            wrap_row,
            runs: wrapped_slice(line, width, wrap_row),
        });
        if wrap_row + 1 < wrapped_row_count(line, width) {
            wrap_row += 1;
        } else {
            line_idx += 1;
            wrap_row = 0;
        }
    }
    rows
}
