use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tunelane_protocol::NavSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Signal(NavSignal),
    /// Stop playback (the remote's stop button).
    Stop,
    Quit,
}

pub fn action_for(key: &KeyEvent) -> Option<KeyAction> {
    let signal = match key.code {
        KeyCode::Left => NavSignal::Left,
        KeyCode::Right => NavSignal::Right,
        KeyCode::Up => NavSignal::Up,
        KeyCode::Down => NavSignal::Down,
        KeyCode::Enter | KeyCode::Char(' ') => NavSignal::Select,
        KeyCode::Esc | KeyCode::Backspace => NavSignal::Back,
        KeyCode::BackTab => NavSignal::CycleBackward,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => NavSignal::CycleBackward,
        KeyCode::Tab => NavSignal::CycleForward,
        KeyCode::Char('s') => return Some(KeyAction::Stop),
        KeyCode::Char('q') => return Some(KeyAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(KeyAction::Quit);
        }
        _ => return None,
    };
    Some(KeyAction::Signal(signal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_enter_map_to_signals() {
        assert_eq!(
            action_for(&key(KeyCode::Left)),
            Some(KeyAction::Signal(NavSignal::Left))
        );
        assert_eq!(
            action_for(&key(KeyCode::Enter)),
            Some(KeyAction::Signal(NavSignal::Select))
        );
        assert_eq!(
            action_for(&key(KeyCode::Esc)),
            Some(KeyAction::Signal(NavSignal::Back))
        );
    }

    #[test]
    fn tab_cycles_both_ways() {
        assert_eq!(
            action_for(&key(KeyCode::Tab)),
            Some(KeyAction::Signal(NavSignal::CycleForward))
        );
        assert_eq!(
            action_for(&KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            Some(KeyAction::Signal(NavSignal::CycleBackward))
        );
        assert_eq!(
            action_for(&key(KeyCode::BackTab)),
            Some(KeyAction::Signal(NavSignal::CycleBackward))
        );
    }

    #[test]
    fn quit_and_unmapped_keys() {
        assert_eq!(action_for(&key(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(
            action_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(action_for(&key(KeyCode::Char('x'))), None);
    }
}
