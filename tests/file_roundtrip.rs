use mpad::app::{Message, Model, update};
use mpad::editor::{Buffer, Direction, Editor};
use mpad::highlight::{C_SYNTAX, Highlight};

fn open(path: &std::path::Path) -> Model {
    Model::open(Some(path.to_path_buf()), true, (80, 24)).unwrap()
}

#[test]
fn test_load_then_save_reproduces_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.txt");
    let content = "first line\n\tindented\n\nlast line";
    std::fs::write(&path, content).unwrap();

    let buffer = Buffer::read_file(&path).unwrap();
    assert_eq!(buffer.line_count(), 4);

    let copy = dir.path().join("copy.txt");
    buffer.save(&copy).unwrap();
    assert_eq!(std::fs::read_to_string(&copy).unwrap(), content);
}

#[test]
fn test_trailing_newline_is_dropped_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trailing.txt");
    std::fs::write(&path, "a\nb\n").unwrap();

    let buffer = Buffer::read_file(&path).unwrap();
    buffer.save(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb");
}

#[test]
fn test_empty_file_loads_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();

    let buffer = Buffer::read_file(&path).unwrap();
    assert_eq!(buffer.line_count(), 1);
    assert_eq!(buffer.line_len(0), 0);
}

#[test]
fn test_edit_session_writes_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello\nworld").unwrap();

    let model = open(&path);
    let model = [
        Message::MoveCursor(Direction::Down),
        Message::EnterInsertMode,
        Message::InsertByte(b'>'),
        Message::InsertByte(b' '),
        Message::EnterNormalMode,
        Message::Save(None),
    ]
    .into_iter()
    .fold(model, update);

    assert!(!model.editor.is_dirty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n> world");
}

#[test]
fn test_opening_c_file_highlights_comment_spanning_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.c");
    std::fs::write(&path, "/* start\nstill */ int x = 42;").unwrap();

    let model = open(&path);
    let buffer = model.editor.buffer();
    let second = buffer.line(1).unwrap();
    assert_eq!(model.editor.syntax(), Some(&C_SYNTAX));
    assert_eq!(second.class_at(0), Highlight::BlockComment);
    assert_eq!(second.class_at(9), Highlight::Keyword);
    assert_eq!(second.class_at(17), Highlight::Number);
}

#[test]
fn test_editor_save_to_unwritable_path_keeps_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = Editor::new(Buffer::from_text("keep"), None);
    editor.insert_byte(b'!');

    let result = editor.save(&dir.path().join("no").join("such").join("file"));
    assert!(result.is_err());
    assert!(editor.is_dirty());
    assert_eq!(editor.buffer().to_bytes(), b"!keep");
}
