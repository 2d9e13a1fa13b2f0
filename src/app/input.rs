use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::model::Mode;
use crate::app::{App, Message, Model};
use crate::editor::Direction;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::handle_key(*key, model),
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match model.mode {
            Mode::Command(_) => Self::handle_command_key(key),
            Mode::Insert => Self::handle_insert_key(key),
            Mode::Normal => Self::handle_normal_key(key, model.pending),
        }
    }

    fn handle_normal_key(key: KeyEvent, pending: Option<char>) -> Option<Message> {
        if let Some(op) = pending {
            return match key.code {
                KeyCode::Char('d') if op == 'd' => Some(Message::DeleteLine),
                _ => Some(Message::CancelOperator),
            };
        }
        if let Some(direction) = arrow_direction(key.code) {
            return Some(Message::MoveCursor(direction));
        }

        match key.code {
            KeyCode::Char('h') => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Char('j') => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Char('k') => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Char('l') => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Char('i') => Some(Message::EnterInsertMode),
            KeyCode::Char(':') => Some(Message::EnterCommandMode),
            KeyCode::Char('x') => Some(Message::DeleteUnderCursor),
            KeyCode::Char('d') => Some(Message::BeginOperator('d')),
            KeyCode::Esc => Some(Message::EnterNormalMode),
            _ => None,
        }
    }

    fn handle_insert_key(key: KeyEvent) -> Option<Message> {
        if let Some(direction) = arrow_direction(key.code) {
            return Some(Message::MoveCursor(direction));
        }
        match key.code {
            KeyCode::Esc => Some(Message::EnterNormalMode),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::DeleteBackward),
            KeyCode::Tab => Some(Message::InsertByte(b'\t')),
            KeyCode::Char(c) if is_plain(key) => printable_byte(c).map(Message::InsertByte),
            _ => None,
        }
    }

    fn handle_command_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::CommandCancel),
            KeyCode::Enter => Some(Message::CommandSubmit),
            KeyCode::Backspace => Some(Message::CommandBackspace),
            KeyCode::Char(c) if is_plain(key) && printable_byte(c).is_some() => {
                Some(Message::CommandInput(c))
            }
            _ => None,
        }
    }
}

const fn arrow_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        _ => None,
    }
}

fn is_plain(key: KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

// The buffer holds bytes, so only printable ASCII is accepted from the keyboard.
fn printable_byte(c: char) -> Option<u8> {
    u8::try_from(c).ok().filter(|b| (b' '..=b'~').contains(b))
}
