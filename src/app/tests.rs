use std::path::PathBuf;

use super::*;
use crate::editor::{Buffer, Cursor, Direction, Editor};
use crate::highlight::{C_SYNTAX, Highlight};

fn create_test_model(text: &str) -> Model {
    let editor = Editor::new(Buffer::from_text(text), None);
    Model::new(Some(PathBuf::from("test.txt")), editor, (80, 24))
}

fn text_of(model: &Model) -> String {
    String::from_utf8(model.editor.buffer().to_bytes()).unwrap()
}

fn run(model: Model, msgs: impl IntoIterator<Item = Message>) -> Model {
    msgs.into_iter().fold(model, update)
}

fn type_command(model: Model, cmd: &str) -> Model {
    let mut model = update(model, Message::EnterCommandMode);
    for c in cmd.chars() {
        model = update(model, Message::CommandInput(c));
    }
    update(model, Message::CommandSubmit)
}

fn type_text(model: Model, text: &str) -> Model {
    run(model, text.bytes().map(Message::InsertByte))
}

// --- Modes ---

#[test]
fn test_model_starts_in_normal_mode() {
    let model = create_test_model("hello");
    assert_eq!(model.mode, Mode::Normal);
    assert!(!model.should_quit);
}

#[test]
fn test_insert_mode_typing() {
    let model = create_test_model("");
    let model = update(model, Message::EnterInsertMode);
    let model = type_text(model, "hi there");
    assert_eq!(text_of(&model), "hi there");
    assert!(model.editor.is_dirty());
    assert_eq!(model.editor.cursor(), Cursor::at(0, 8));
}

#[test]
fn test_escape_returns_to_normal() {
    let model = run(
        create_test_model(""),
        [Message::EnterInsertMode, Message::EnterNormalMode],
    );
    assert_eq!(model.mode, Mode::Normal);
}

#[test]
fn test_enter_and_backspace_in_insert_mode() {
    let model = create_test_model("ab");
    let model = run(
        model,
        [
            Message::MoveCursor(Direction::Right),
            Message::InsertNewline,
        ],
    );
    assert_eq!(text_of(&model), "a\nb");
    let model = update(model, Message::DeleteBackward);
    assert_eq!(text_of(&model), "ab");
    assert_eq!(model.editor.cursor(), Cursor::at(0, 1));
}

#[test]
fn test_delete_under_cursor() {
    let model = update(create_test_model("abc"), Message::DeleteUnderCursor);
    assert_eq!(text_of(&model), "bc");
    assert!(model.editor.is_dirty());
}

#[test]
fn test_dd_deletes_line_and_clears_pending() {
    let model = create_test_model("one\ntwo\nthree");
    let model = run(
        model,
        [
            Message::MoveCursor(Direction::Down),
            Message::BeginOperator('d'),
        ],
    );
    assert_eq!(model.pending, Some('d'));
    let model = update(model, Message::DeleteLine);
    assert_eq!(model.pending, None);
    assert_eq!(text_of(&model), "one\nthree");
}

#[test]
fn test_cancel_operator() {
    let model = run(
        create_test_model("one"),
        [Message::BeginOperator('d'), Message::CancelOperator],
    );
    assert_eq!(model.pending, None);
    assert_eq!(text_of(&model), "one");
}

// --- Command line ---

#[test]
fn test_command_backspace_on_empty_leaves_command_mode() {
    let model = run(
        create_test_model(""),
        [
            Message::EnterCommandMode,
            Message::CommandInput('w'),
            Message::CommandBackspace,
        ],
    );
    assert_eq!(model.mode, Mode::Command(String::new()));
    let model = update(model, Message::CommandBackspace);
    assert_eq!(model.mode, Mode::Normal);
}

#[test]
fn test_command_cancel() {
    let model = run(
        create_test_model(""),
        [
            Message::EnterCommandMode,
            Message::CommandInput('q'),
            Message::CommandCancel,
        ],
    );
    assert_eq!(model.mode, Mode::Normal);
    assert!(!model.should_quit);
}

#[test]
fn test_quit_clean_buffer() {
    let model = type_command(create_test_model("x"), "q");
    assert!(model.should_quit);
}

#[test]
fn test_quit_refused_when_dirty() {
    let model = update(create_test_model("x"), Message::DeleteUnderCursor);
    let model = type_command(model, "quit");
    assert!(!model.should_quit);
    assert_eq!(
        model.active_status(),
        Some((
            "No write since last change (use :q!)",
            StatusLevel::Warning
        ))
    );
    assert_eq!(model.mode, Mode::Normal);
}

#[test]
fn test_force_quit_when_dirty() {
    let model = update(create_test_model("x"), Message::DeleteUnderCursor);
    let model = type_command(model, "q!");
    assert!(model.should_quit);
}

#[test]
fn test_unknown_command_reports_status() {
    let model = type_command(create_test_model("x"), "frob");
    assert_eq!(
        model.active_status(),
        Some(("Unknown command: frob", StatusLevel::Error))
    );
}

#[test]
fn test_write_usage_error() {
    let model = type_command(create_test_model("x"), "w  ");
    assert_eq!(
        model.active_status().map(|(text, _)| text),
        Some("Usage: :w <path>")
    );
}

#[test]
fn test_goto_line_is_one_based_and_clamped() {
    let model = type_command(create_test_model("a\nb\nc"), "2");
    assert_eq!(model.editor.cursor(), Cursor::at(1, 0));
    let model = type_command(model, "99");
    assert_eq!(model.editor.cursor(), Cursor::at(2, 0));
    let model = type_command(model, "0");
    assert_eq!(model.editor.cursor(), Cursor::at(0, 0));
}

#[test]
fn test_blank_command_does_nothing() {
    let model = type_command(create_test_model("a"), "");
    assert_eq!(model.mode, Mode::Normal);
    assert!(model.active_status().is_none());
}

// --- Saving ---

#[test]
fn test_write_to_bound_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let editor = Editor::new(Buffer::from_text("abc\ndef"), None);
    let model = Model::new(Some(path.clone()), editor, (80, 24));
    let model = update(model, Message::DeleteUnderCursor);
    let model = type_command(model, "w");

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "bc\ndef");
    assert!(!model.editor.is_dirty());
    let expected = format!("Wrote {}", path.display());
    assert_eq!(
        model.active_status(),
        Some((expected.as_str(), StatusLevel::Info))
    );
}

#[test]
fn test_write_with_path_rebinds_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("renamed.txt");
    let model = Model::default();
    let model = type_command(model, &format!("w {}", path.display()));

    assert_eq!(model.file_path.as_deref(), Some(path.as_path()));
    assert!(path.exists());
}

#[test]
fn test_write_without_name_fails() {
    let model = update(Model::default(), Message::InsertByte(b'a'));
    let model = type_command(model, "w");
    assert_eq!(
        model.active_status(),
        Some(("No file name (use :w <path>)", StatusLevel::Error))
    );
    assert!(model.editor.is_dirty());
}

#[test]
fn test_failed_write_keeps_dirty_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.txt");
    let editor = Editor::new(Buffer::from_text("abc"), None);
    let model = Model::new(Some(path), editor, (80, 24));
    let model = update(model, Message::DeleteUnderCursor);
    let model = type_command(model, "wq");

    assert!(!model.should_quit);
    assert!(model.editor.is_dirty());
    let (text, level) = model.active_status().unwrap();
    assert!(text.starts_with("Write failed: "), "got {text}");
    assert_eq!(level, StatusLevel::Error);
}

#[test]
fn test_write_quit_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let editor = Editor::new(Buffer::from_text("abc"), None);
    let model = Model::new(Some(path.clone()), editor, (80, 24));
    let model = update(model, Message::DeleteUnderCursor);
    let model = type_command(model, "wq");
    assert!(model.should_quit);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "bc");
}

#[test]
fn test_write_with_c_extension_enables_highlighting() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.c");
    let mut model = Model::default();
    model.highlight_enabled = true;
    let model = type_command(type_text(model, "int"), &format!("w {}", path.display()));

    assert_eq!(model.editor.syntax(), Some(&C_SYNTAX));
    assert_eq!(
        model.editor.buffer().line(0).unwrap().class_at(0),
        Highlight::Keyword
    );
}

// --- Status line ---

#[test]
fn test_status_cleared_by_next_key() {
    let model = type_command(create_test_model("x"), "frob");
    assert!(model.active_status().is_some());
    let model = update(model, Message::MoveCursor(Direction::Right));
    assert!(model.active_status().is_none());
}

#[test]
fn test_status_kept_while_typing_command() {
    let model = type_command(create_test_model("x"), "frob");
    let mut model = update(model, Message::EnterCommandMode);
    assert!(model.active_status().is_none());
    model.show_status(StatusLevel::Info, "note");
    let model = update(model, Message::CommandInput('w'));
    assert!(model.active_status().is_some());
}

#[test]
fn test_status_expires() {
    let mut model = create_test_model("x");
    model.show_status(StatusLevel::Info, "hello");
    assert!(!model.expire_status(std::time::Instant::now()));
    let later = std::time::Instant::now() + std::time::Duration::from_secs(60);
    assert!(model.expire_status(later));
    assert!(model.active_status().is_none());
}

#[test]
fn test_resize_does_not_clear_status() {
    let mut model = create_test_model("x");
    model.show_status(StatusLevel::Info, "hello");
    let model = update(model, Message::Resize(40, 10));
    assert!(model.active_status().is_some());
    assert_eq!(model.terminal_size(), (40, 10));
    assert_eq!(model.viewport.text_rows(), 9);
}

#[test]
fn test_one_row_terminal_has_no_text_cursor() {
    let model = update(create_test_model("x"), Message::Resize(40, 1));
    assert_eq!(model.cursor_screen_position(), None);
    let model = update(model, Message::Resize(40, 2));
    assert_eq!(model.cursor_screen_position(), Some((0, 0)));
}

// --- Scrolling ---

#[test]
fn test_cursor_movement_scrolls_viewport() {
    let text: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
    let model = create_test_model(&text.join("\n"));
    let model = update(model, Message::Resize(80, 11));
    let model = run(model, (0..15).map(|_| Message::MoveCursor(Direction::Down)));
    assert_eq!(model.viewport.top_line(), 6);

    let model = run(model, (0..15).map(|_| Message::MoveCursor(Direction::Up)));
    assert_eq!(model.viewport.top_line(), 0);
}

#[test]
fn test_typing_past_width_scrolls_wrapped_rows() {
    let model = update(create_test_model(""), Message::Resize(10, 3));
    let model = update(model, Message::EnterInsertMode);
    let model = type_text(model, &"x".repeat(35));
    // 35 columns at width 10 wrap onto 4 rows; 2 text rows show the last two.
    assert_eq!(model.viewport.top_line(), 0);
    assert_eq!(model.viewport.top_rowoff(), 2);
    assert!(model.cursor_screen_position().is_some());
}

#[test]
fn test_deleting_lines_keeps_viewport_in_buffer() {
    let text: Vec<String> = (0..30).map(|i| format!("{i}")).collect();
    let model = update(create_test_model(&text.join("\n")), Message::Resize(80, 6));
    let model = type_command(model, "30");
    let model = run(model, (0..29).map(|_| Message::DeleteLine));
    assert_eq!(model.editor.buffer().line_count(), 1);
    assert_eq!(model.viewport.top_line(), 0);
}

// --- Opening files ---

#[test]
fn test_open_missing_file_starts_new_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.c");
    let model = Model::open(Some(path.clone()), true, (80, 24)).unwrap();
    assert_eq!(model.editor.buffer().line_count(), 1);
    assert_eq!(model.active_status().map(|(t, _)| t), Some("New file"));
    assert_eq!(model.editor.syntax(), Some(&C_SYNTAX));
    assert_eq!(model.file_path, Some(path));
}

#[test]
fn test_open_without_file_prompts_for_name() {
    let model = Model::open(None, true, (80, 24)).unwrap();
    assert_eq!(
        model.active_status().map(|(t, _)| t),
        Some("No file (use :w <path>)")
    );
    assert_eq!(model.display_name(), "[No Name]");
}

#[test]
fn test_open_existing_file_with_highlight_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.c");
    std::fs::write(&path, "int main;\n").unwrap();
    let model = Model::open(Some(path), false, (80, 24)).unwrap();
    assert_eq!(model.editor.syntax(), None);
    assert_eq!(model.editor.buffer().line_count(), 1);
    assert!(model.active_status().is_none());
}
