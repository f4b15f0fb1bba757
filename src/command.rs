use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            // Raw mode delivers Ctrl-C as a key instead of raising SIGINT
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w')) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s')) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a')) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d')) => Some(Command::Right),
            _ => None,
        }
    }

    /// Return the direction this command steers the snake in, if any
    pub(crate) fn direction(self) -> Option<Direction> {
        match self {
            Command::Quit => None,
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
        }
    }
}
