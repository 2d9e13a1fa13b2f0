use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::{Mode, Model};

use super::screen::{self, ScreenRow};
use super::{status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let text_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };

    render_text(model, frame, text_area);
    status::render_status_bar(model, frame, status_area);

    if let Mode::Command(text) = &model.mode {
        let col = u16::try_from(text.len() + 1).unwrap_or(u16::MAX);
        frame.set_cursor_position((status_area.x.saturating_add(col), status_area.y));
    } else if let Some((x, y)) = model.cursor_screen_position() {
        frame.set_cursor_position((text_area.x + x, text_area.y + y));
    }
}

fn render_text(model: &Model, frame: &mut Frame, area: Rect) {
    let gutter = usize::from(model.gutter_width());
    let rows = screen::visible_rows(model.editor.buffer(), &model.viewport);

    let content: Vec<Line> = rows
        .into_iter()
        .take(usize::from(area.height))
        .map(|row| match row {
            ScreenRow::Filler => Line::styled("~", style::filler_style()),
            ScreenRow::Text {
                line,
                wrap_row,
                runs,
            } => {
                let mut spans = Vec::with_capacity(runs.len() + 1);
                if gutter > 0 {
                    let label = if wrap_row == 0 {
                        format!("{:>width$} ", line + 1, width = gutter - 1)
                    } else {
                        " ".repeat(gutter)
                    };
                    spans.push(Span::styled(label, style::gutter_style()));
                }
                spans.extend(
                    runs.into_iter()
                        .map(|run| Span::styled(run.text, style::style_for_highlight(run.class))),
                );
                Line::from(spans)
            }
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
