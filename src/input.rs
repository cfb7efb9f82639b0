//! Input handling for the game screen.
//!
//! The driver delivers one action per key-down edge: key release and
//! auto-repeat events are filtered out before mapping, so holding the
//! activate key does not repeat the jump.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Actions the driver loop can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Jump while playing, restart while game over (Space/Enter/Up).
    Activate,
    /// Leave the game (q/Esc).
    Quit,
}

/// Map a terminal key event to a game action.
///
/// Returns `None` for key releases, repeats, and unbound keys.
pub fn map_key(event: KeyEvent) -> Option<GameInput> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => Some(GameInput::Activate),
        KeyCode::Char('q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_activate_keys() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(GameInput::Activate));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(GameInput::Activate));
        assert_eq!(map_key(press(KeyCode::Up)), Some(GameInput::Activate));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(GameInput::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
    }

    #[test]
    fn test_unbound_key_ignored() {
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(press(KeyCode::Down)), None);
    }

    #[test]
    fn test_release_and_repeat_filtered() {
        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);

        let repeat = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(repeat), None);
    }
}
