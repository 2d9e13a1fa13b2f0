use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Mode, Model};

use super::style;

/// Text of the status line.
///
/// Command mode shows the command being typed; otherwise a pending status
/// message wins over the file summary.
pub fn status_text(model: &Model) -> String {
    if let Mode::Command(text) = &model.mode {
        return format!(":{text}");
    }
    if let Some((message, _)) = model.active_status() {
        return message.to_string();
    }

    let cursor = model.editor.cursor();
    let dirty = if model.editor.is_dirty() { " [+]" } else { "" };
    let pending = model
        .pending
        .map_or_else(String::new, |op| format!("   {op}"));
    format!(
        "\"{}\"{}  {}  Ln {}, Col {}{}",
        model.display_name(),
        dirty,
        model.mode.label(),
        cursor.row + 1,
        cursor.col + 1,
        pending
    )
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let level = match model.mode {
        Mode::Command(_) => None,
        _ => model.active_status().map(|(_, level)| level),
    };
    let bar = Paragraph::new(status_text(model)).style(style::status_bar_style(level));
    frame.render_widget(bar, area);
}
