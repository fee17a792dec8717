use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the unit step `(dx, dy)`; `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true when the two deltas cancel out.
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        let (ax, ay) = self.delta();
        let (bx, by) = other.delta();
        ax + bx == 0 && ay + by == 0
    }
}

/// High-level input events consumed by the session driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    StartPause,
    Reset,
    Faster,
    Slower,
    Quit,
}

/// Maps one key event to a game input using the fixed key table.
///
/// Arrow keys and WASD both steer. Unmapped keys yield `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') | KeyCode::Enter => GameInput::StartPause,
        KeyCode::Char('r' | 'R') => GameInput::Reset,
        KeyCode::Char('+' | '=') => GameInput::Faster,
        KeyCode::Char('-' | '_') => GameInput::Slower,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Reads terminal key events and translates them into [`GameInput`].
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one key press.
    ///
    /// Key releases/repeats and non-key events are swallowed and yield `None`.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{map_key, Direction, GameInput};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_means_deltas_cancel() {
        let all = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        for a in all {
            for b in all {
                assert_eq!(a.is_opposite(b), b == a.opposite(), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn arrows_and_wasd_map_to_the_same_directions() {
        let pairs = [
            (KeyCode::Up, KeyCode::Char('w'), Direction::Up),
            (KeyCode::Down, KeyCode::Char('s'), Direction::Down),
            (KeyCode::Left, KeyCode::Char('a'), Direction::Left),
            (KeyCode::Right, KeyCode::Char('d'), Direction::Right),
        ];

        for (arrow, letter, direction) in pairs {
            assert_eq!(map_key(key(arrow)), Some(GameInput::Direction(direction)));
            assert_eq!(map_key(key(letter)), Some(GameInput::Direction(direction)));
        }
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
        assert_eq!(map_key(key(KeyCode::Tab)), None);
        assert_eq!(map_key(key(KeyCode::F(1))), None);
    }

    #[test]
    fn control_keys_map_to_session_inputs() {
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(GameInput::StartPause));
        assert_eq!(map_key(key(KeyCode::Char('r'))), Some(GameInput::Reset));
        assert_eq!(map_key(key(KeyCode::Char('+'))), Some(GameInput::Faster));
        assert_eq!(map_key(key(KeyCode::Char('-'))), Some(GameInput::Slower));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
    }
}
