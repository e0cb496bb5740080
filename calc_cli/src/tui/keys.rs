//! crossterm key events to [`KeyInput`].
//!
//! Keys reported with the `KEYPAD` state (terminals with the kitty keyboard
//! protocol) map to [`Key::Numpad`]; everything else maps by character.

use calc_core::keyboard::{Key, KeyInput, Modifiers, NumpadKey};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

/// Translate a terminal key event. Releases map to `None`.
pub fn to_key_input(event: &KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let modifiers = to_modifiers(event.modifiers);
    let keypad = event.state.contains(KeyEventState::KEYPAD);

    let key = match event.code {
        KeyCode::Char(c) if keypad => numpad_char(c).map(Key::Numpad).unwrap_or(Key::Character(c)),
        KeyCode::Char(c) => Key::Character(c),
        KeyCode::Enter if keypad => Key::Numpad(NumpadKey::Enter),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    };
    Some(KeyInput::new(key, modifiers))
}

fn numpad_char(c: char) -> Option<NumpadKey> {
    match c {
        '0'..='9' => c.to_digit(10).map(|d| NumpadKey::Digit(d as u8)),
        '.' | ',' => Some(NumpadKey::Decimal),
        '+' => Some(NumpadKey::Add),
        '-' => Some(NumpadKey::Subtract),
        '*' => Some(NumpadKey::Multiply),
        '/' => Some(NumpadKey::Divide),
        _ => None,
    }
}

fn to_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}

/// Ctrl+C or Ctrl+Q
pub fn is_quit(event: &KeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(event.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_characters_and_specials() {
        let input = to_key_input(&press(KeyCode::Char('7'), KeyModifiers::NONE)).unwrap();
        assert_eq!(input.key, Key::Character('7'));
        assert_eq!(to_key_input(&press(KeyCode::Enter, KeyModifiers::NONE)).unwrap().key, Key::Enter);
        assert_eq!(to_key_input(&press(KeyCode::Esc, KeyModifiers::NONE)).unwrap().key, Key::Escape);
        assert_eq!(to_key_input(&press(KeyCode::Tab, KeyModifiers::NONE)).unwrap().key, Key::Other);
    }

    #[test]
    fn test_shift_and_ctrl_carried() {
        let input = to_key_input(&press(KeyCode::Char('S'), KeyModifiers::SHIFT)).unwrap();
        assert!(input.modifiers.shift);
        let input = to_key_input(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap();
        assert!(input.modifiers.ctrl);
        assert!(input.modifiers.has_command());
    }

    #[test]
    fn test_keypad_state_maps_to_numpad() {
        let mut event = press(KeyCode::Char('5'), KeyModifiers::NONE);
        event.state = KeyEventState::KEYPAD;
        assert_eq!(to_key_input(&event).unwrap().key, Key::Numpad(NumpadKey::Digit(5)));

        let mut event = press(KeyCode::Enter, KeyModifiers::NONE);
        event.state = KeyEventState::KEYPAD;
        assert_eq!(to_key_input(&event).unwrap().key, Key::Numpad(NumpadKey::Enter));
    }

    #[test]
    fn test_release_ignored() {
        let event = KeyEvent::new_with_kind(KeyCode::Char('1'), KeyModifiers::NONE, KeyEventKind::Release);
        assert!(to_key_input(&event).is_none());
    }

    #[test]
    fn test_quit_chords() {
        assert!(is_quit(&press(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(is_quit(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
