mod key_action;

pub use key_action::KeyAction;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use termfolio_core::Key;

/// Event handler for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Read a single event from the terminal without blocking
    ///
    /// Returns `None` when nothing is pending. Terminal errors are logged and
    /// swallowed; a broken terminal surfaces on the next draw.
    pub fn read() -> Option<Event> {
        match crossterm::event::poll(std::time::Duration::ZERO) {
            Ok(true) => match crossterm::event::read() {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed");
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::warn!(error = %e, "event poll failed");
                None
            }
        }
    }

    /// Map a key press to an action
    ///
    /// `globe_active` enables Esc; `input_empty` enables Ctrl+D.
    pub fn map_key(event: KeyEvent, globe_active: bool, input_empty: bool) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let command = event.modifiers.contains(KeyModifiers::SUPER);

        let key = match event.code {
            KeyCode::Char('c') | KeyCode::Char('C') if ctrl || command => Key::Interrupt,
            KeyCode::Char('d') if ctrl => return input_empty.then_some(KeyAction::Exit),
            KeyCode::Char('a') if ctrl => Key::Home,
            KeyCode::Char('e') if ctrl => Key::End,
            KeyCode::Char(_) if ctrl || command || event.modifiers.contains(KeyModifiers::ALT) => return None,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::PageUp => return Some(KeyAction::PageUp),
            KeyCode::PageDown => return Some(KeyAction::PageDown),
            KeyCode::Esc => return globe_active.then_some(KeyAction::LeaveGlobe),
            _ => return None,
        };
        Some(KeyAction::Session(key))
    }

    /// Map any terminal event to an action
    pub fn handle_event(event: &Event, globe_active: bool, input_empty: bool) -> Option<KeyAction> {
        match event {
            Event::Key(key_event) => Self::map_key(*key_event, globe_active, input_empty),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_characters() {
        let action = EventHandler::map_key(press(KeyCode::Char('x'), KeyModifiers::NONE), false, true);
        assert_eq!(action, Some(KeyAction::Session(Key::Char('x'))));

        let shifted = EventHandler::map_key(press(KeyCode::Char('X'), KeyModifiers::SHIFT), false, true);
        assert_eq!(shifted, Some(KeyAction::Session(Key::Char('X'))));
    }

    #[test]
    fn test_interrupt_with_ctrl_or_command() {
        let ctrl = EventHandler::map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL), false, false);
        assert_eq!(ctrl, Some(KeyAction::Session(Key::Interrupt)));

        let command = EventHandler::map_key(press(KeyCode::Char('c'), KeyModifiers::SUPER), false, false);
        assert_eq!(command, Some(KeyAction::Session(Key::Interrupt)));
    }

    #[test]
    fn test_ctrl_d_exits_only_on_empty_input() {
        let event = press(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(EventHandler::map_key(event, false, true), Some(KeyAction::Exit));
        assert_eq!(EventHandler::map_key(event, false, false), None);
    }

    #[test]
    fn test_escape_only_with_globe() {
        let event = press(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(EventHandler::map_key(event, true, true), Some(KeyAction::LeaveGlobe));
        assert_eq!(EventHandler::map_key(event, false, true), None);
    }

    #[test]
    fn test_other_control_chords_ignored() {
        let event = press(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(EventHandler::map_key(event, false, true), None);
        let alt = press(KeyCode::Char('b'), KeyModifiers::ALT);
        assert_eq!(EventHandler::map_key(alt, false, true), None);
    }

    #[test]
    fn test_navigation_keys() {
        let cases = [
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Tab, Key::Tab),
            (KeyCode::Up, Key::Up),
            (KeyCode::Down, Key::Down),
            (KeyCode::Home, Key::Home),
            (KeyCode::End, Key::End),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Delete, Key::Delete),
        ];
        for (code, key) in cases {
            let action = EventHandler::map_key(press(code, KeyModifiers::NONE), false, true);
            assert_eq!(action, Some(KeyAction::Session(key)));
        }
        let page = EventHandler::map_key(press(KeyCode::PageUp, KeyModifiers::NONE), false, true);
        assert_eq!(page, Some(KeyAction::PageUp));
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(EventHandler::map_key(release, false, true), None);
    }

    #[test]
    fn test_handle_event_ignores_non_keys() {
        assert_eq!(EventHandler::handle_event(&Event::FocusGained, false, true), None);
        let key = Event::Key(press(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(EventHandler::handle_event(&key, false, true), Some(KeyAction::Session(Key::Char('a'))));
    }
}
