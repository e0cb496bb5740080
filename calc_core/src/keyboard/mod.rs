//! # Keyboard Dispatch
//!
//! Translates raw key presses into calculator actions. The host UI converts
//! its native key events into [`KeyInput`], and the [`KeyboardDispatcher`]
//! decides whether the key counts (see [`focus`]) and which callback of a
//! [`CalculatorHandler`] to invoke.
//!
//! ## Key Map
//!
//! | Key                              | Action                     |
//! |----------------------------------|----------------------------|
//! | `0`-`9`, numpad digits           | digit entry                |
//! | `.`, numpad decimal              | decimal point              |
//! | `+` `-` `*` `/`, numpad operators| operation (`+ - × ÷`)      |
//! | `Enter`, numpad enter, `=`       | equals                     |
//! | `Escape`, `c`/`C`                | clear                      |
//! | Shift+S / Shift+C / Shift+T      | sin / cos / tan (if supported) |
//!
//! Keys held with Ctrl or Meta are never handled, so copy/paste shortcuts
//! keep working. Alt+C is not clear either; `c` clears bare or with Shift.
//! Every recognized key asks the host to suppress its default
//! behavior (page scroll, form submit).
//!
//! ## Example
//!
//! ```rust
//! use std::time::Instant;
//! use calc_core::keyboard::{KeyInput, KeyboardDispatcher};
//! use calc_core::keyboard::focus::FocusScope;
//! use calc_core::keypad::Keypad;
//!
//! let mut keypad = Keypad::new();
//! let mut dispatcher = KeyboardDispatcher::new(FocusScope::Container);
//! dispatcher.gate_mut().on_focus();
//!
//! let now = Instant::now();
//! dispatcher.handle(&KeyInput::character('5'), now, &mut keypad);
//! dispatcher.handle(&KeyInput::character('6'), now, &mut keypad);
//! assert_eq!(keypad.display(), "56");
//! ```

pub mod focus;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::calculations::scientific::{Operator, ScientificFunction};
use focus::{FocusGate, FocusScope};

/// Keys on the numeric keypad, reported separately from the main keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumpadKey {
    Digit(u8),
    Decimal,
    Add,
    Subtract,
    Multiply,
    Divide,
    Enter,
}

/// A logical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// A printable character as produced by the keyboard layout
    Character(char),
    Enter,
    Escape,
    Numpad(NumpadKey),
    /// Anything the dispatcher never handles (arrows, function keys, ...)
    Other,
}

/// Modifier state at the time of the key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Ctrl or Meta is held (shortcut chords belong to the host)
    pub fn has_command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        KeyInput { key, modifiers }
    }

    /// Plain character press with no modifiers
    pub fn character(c: char) -> Self {
        KeyInput::new(Key::Character(c), Modifiers::NONE)
    }

    /// Character press with Shift held; the character is upper-cased
    pub fn shifted(c: char) -> Self {
        KeyInput::new(Key::Character(c.to_ascii_uppercase()), Modifiers::SHIFT)
    }

    pub fn numpad(key: NumpadKey) -> Self {
        KeyInput::new(Key::Numpad(key), Modifiers::NONE)
    }

    pub fn enter() -> Self {
        KeyInput::new(Key::Enter, Modifiers::NONE)
    }

    pub fn escape() -> Self {
        KeyInput::new(Key::Escape, Modifiers::NONE)
    }
}

/// What a recognized key asks the calculator to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum CalculatorAction {
    Digit(char),
    Decimal,
    Operation(Operator),
    Equals,
    Clear,
    Scientific(ScientificFunction),
}

/// Result of offering a key to the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyOutcome {
    /// The action invoked, if the key was recognized and the gate was open
    pub action: Option<CalculatorAction>,
    /// Whether the host should suppress the key's default behavior
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub const IGNORED: KeyOutcome = KeyOutcome {
        action: None,
        prevent_default: false,
    };

    fn handled(action: CalculatorAction) -> Self {
        KeyOutcome {
            action: Some(action),
            prevent_default: true,
        }
    }

    pub fn is_handled(&self) -> bool {
        self.action.is_some()
    }
}

/// Receiver of dispatched calculator actions.
///
/// Scientific callbacks are optional: handlers that return `false` from
/// [`CalculatorHandler::supports_scientific`] never see Shift+letter
/// shortcuts, and Shift+C falls back to clear.
pub trait CalculatorHandler {
    fn on_number(&mut self, digit: &str);
    fn on_decimal(&mut self);
    fn on_operation(&mut self, op: Operator);
    fn on_equals(&mut self);
    fn on_clear(&mut self);

    fn on_scientific(&mut self, _function: ScientificFunction) {}

    fn supports_scientific(&self) -> bool {
        false
    }
}

/// Map a key press to an action, ignoring focus.
///
/// `scientific` is whether the receiving handler supports scientific
/// shortcuts.
pub fn resolve(input: &KeyInput, scientific: bool) -> Option<CalculatorAction> {
    let mods = input.modifiers;
    if mods.has_command() {
        return None;
    }

    match input.key {
        Key::Numpad(numpad) => Some(match numpad {
            NumpadKey::Digit(d) if d <= 9 => CalculatorAction::Digit(char::from(b'0' + d)),
            NumpadKey::Digit(_) => return None,
            NumpadKey::Decimal => CalculatorAction::Decimal,
            NumpadKey::Add => CalculatorAction::Operation(Operator::Add),
            NumpadKey::Subtract => CalculatorAction::Operation(Operator::Subtract),
            NumpadKey::Multiply => CalculatorAction::Operation(Operator::Multiply),
            NumpadKey::Divide => CalculatorAction::Operation(Operator::Divide),
            NumpadKey::Enter => CalculatorAction::Equals,
        }),
        Key::Enter => Some(CalculatorAction::Equals),
        Key::Escape => Some(CalculatorAction::Clear),
        Key::Character(c) => resolve_character(c, mods, scientific),
        Key::Other => None,
    }
}

fn resolve_character(c: char, mods: Modifiers, scientific: bool) -> Option<CalculatorAction> {
    match c {
        '0'..='9' => Some(CalculatorAction::Digit(c)),
        '.' => Some(CalculatorAction::Decimal),
        '+' => Some(CalculatorAction::Operation(Operator::Add)),
        '-' => Some(CalculatorAction::Operation(Operator::Subtract)),
        '*' => Some(CalculatorAction::Operation(Operator::Multiply)),
        '/' => Some(CalculatorAction::Operation(Operator::Divide)),
        '=' => Some(CalculatorAction::Equals),
        'c' | 'C' if mods.alt => None,
        'c' | 'C' if !(scientific && mods.shift) => Some(CalculatorAction::Clear),
        _ if scientific && mods.shift => match c.to_ascii_lowercase() {
            's' => Some(CalculatorAction::Scientific(ScientificFunction::Sin)),
            'c' => Some(CalculatorAction::Scientific(ScientificFunction::Cos)),
            't' => Some(CalculatorAction::Scientific(ScientificFunction::Tan)),
            _ => None,
        },
        _ => None,
    }
}

/// Routes key presses to a [`CalculatorHandler`] while the focus gate is open
#[derive(Debug, Clone)]
pub struct KeyboardDispatcher {
    gate: FocusGate,
    enabled: bool,
    scientific_shortcuts: bool,
}

impl KeyboardDispatcher {
    pub fn new(scope: FocusScope) -> Self {
        KeyboardDispatcher {
            gate: FocusGate::new(scope),
            enabled: true,
            scientific_shortcuts: true,
        }
    }

    /// Set the blur grace delay
    pub fn with_blur_grace(mut self, grace: Duration) -> Self {
        self.gate = self.gate.with_grace(grace);
        self
    }

    /// Turn Shift+letter scientific shortcuts on or off
    pub fn with_scientific_shortcuts(mut self, enabled: bool) -> Self {
        self.scientific_shortcuts = enabled;
        self
    }

    pub fn gate(&self) -> &FocusGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut FocusGate {
        &mut self.gate
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Offer a key press to `handler`.
    ///
    /// Returns [`KeyOutcome::IGNORED`] when the dispatcher is disabled, the
    /// focus gate is closed, or the key is not recognized.
    pub fn handle<H: CalculatorHandler + ?Sized>(
        &mut self,
        input: &KeyInput,
        now: Instant,
        handler: &mut H,
    ) -> KeyOutcome {
        if !self.enabled {
            return KeyOutcome::IGNORED;
        }
        if !self.gate.accepts_keys(now) {
            tracing::trace!(?input, "key ignored: calculator not focused");
            return KeyOutcome::IGNORED;
        }

        let scientific = self.scientific_shortcuts && handler.supports_scientific();
        let Some(action) = resolve(input, scientific) else {
            return KeyOutcome::IGNORED;
        };

        tracing::debug!(?action, "dispatching key");
        match action {
            CalculatorAction::Digit(d) => {
                let mut buf = [0u8; 4];
                handler.on_number(d.encode_utf8(&mut buf));
            }
            CalculatorAction::Decimal => handler.on_decimal(),
            CalculatorAction::Operation(op) => handler.on_operation(op),
            CalculatorAction::Equals => handler.on_equals(),
            CalculatorAction::Clear => handler.on_clear(),
            CalculatorAction::Scientific(function) => handler.on_scientific(function),
        }
        KeyOutcome::handled(action)
    }
}

impl Default for KeyboardDispatcher {
    fn default() -> Self {
        KeyboardDispatcher::new(FocusScope::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every callback as a string
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        scientific: bool,
    }

    impl CalculatorHandler for Recorder {
        fn on_number(&mut self, digit: &str) {
            self.calls.push(format!("number:{}", digit));
        }
        fn on_decimal(&mut self) {
            self.calls.push("decimal".to_string());
        }
        fn on_operation(&mut self, op: Operator) {
            self.calls.push(format!("op:{}", op.symbol()));
        }
        fn on_equals(&mut self) {
            self.calls.push("equals".to_string());
        }
        fn on_clear(&mut self) {
            self.calls.push("clear".to_string());
        }
        fn on_scientific(&mut self, function: ScientificFunction) {
            self.calls.push(format!("sci:{}", function.name()));
        }
        fn supports_scientific(&self) -> bool {
            self.scientific
        }
    }

    fn focused() -> KeyboardDispatcher {
        let mut dispatcher = KeyboardDispatcher::new(FocusScope::Container);
        dispatcher.gate_mut().on_focus();
        dispatcher
    }

    #[test]
    fn test_digits_and_numpad_digits() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let now = Instant::now();
        d.handle(&KeyInput::character('7'), now, &mut rec);
        d.handle(&KeyInput::numpad(NumpadKey::Digit(3)), now, &mut rec);
        assert_eq!(rec.calls, vec!["number:7", "number:3"]);
    }

    #[test]
    fn test_operators_normalized() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let now = Instant::now();
        for c in ['+', '-', '*', '/'] {
            d.handle(&KeyInput::character(c), now, &mut rec);
        }
        d.handle(&KeyInput::numpad(NumpadKey::Multiply), now, &mut rec);
        d.handle(&KeyInput::numpad(NumpadKey::Divide), now, &mut rec);
        assert_eq!(rec.calls, vec!["op:+", "op:-", "op:×", "op:÷", "op:×", "op:÷"]);
    }

    #[test]
    fn test_equals_variants() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let now = Instant::now();
        d.handle(&KeyInput::enter(), now, &mut rec);
        d.handle(&KeyInput::character('='), now, &mut rec);
        d.handle(&KeyInput::numpad(NumpadKey::Enter), now, &mut rec);
        assert_eq!(rec.calls, vec!["equals", "equals", "equals"]);
    }

    #[test]
    fn test_decimal_variants() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let now = Instant::now();
        d.handle(&KeyInput::character('.'), now, &mut rec);
        d.handle(&KeyInput::numpad(NumpadKey::Decimal), now, &mut rec);
        assert_eq!(rec.calls, vec!["decimal", "decimal"]);
    }

    #[test]
    fn test_clear_keys() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let now = Instant::now();
        d.handle(&KeyInput::escape(), now, &mut rec);
        d.handle(&KeyInput::character('c'), now, &mut rec);
        d.handle(&KeyInput::character('C'), now, &mut rec);
        assert_eq!(rec.calls, vec!["clear", "clear", "clear"]);
    }

    #[test]
    fn test_ctrl_c_is_not_clear() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let outcome = d.handle(
            &KeyInput::new(Key::Character('c'), Modifiers::CTRL),
            Instant::now(),
            &mut rec,
        );
        assert_eq!(outcome, KeyOutcome::IGNORED);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_alt_c_is_not_clear() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let alt = Modifiers {
            alt: true,
            ..Modifiers::NONE
        };
        let outcome = d.handle(&KeyInput::new(Key::Character('c'), alt), Instant::now(), &mut rec);
        assert_eq!(outcome, KeyOutcome::IGNORED);
        assert!(rec.calls.is_empty());
        assert_eq!(resolve(&KeyInput::new(Key::Character('C'), alt), false), None);
    }

    #[test]
    fn test_scientific_shortcuts_when_supported() {
        let mut d = focused();
        let mut rec = Recorder {
            scientific: true,
            ..Default::default()
        };
        let now = Instant::now();
        d.handle(&KeyInput::shifted('s'), now, &mut rec);
        d.handle(&KeyInput::shifted('c'), now, &mut rec);
        d.handle(&KeyInput::shifted('t'), now, &mut rec);
        d.handle(&KeyInput::character('c'), now, &mut rec);
        assert_eq!(rec.calls, vec!["sci:sin", "sci:cos", "sci:tan", "clear"]);
    }

    #[test]
    fn test_shift_c_clears_without_scientific_support() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let now = Instant::now();
        d.handle(&KeyInput::shifted('c'), now, &mut rec);
        let outcome = d.handle(&KeyInput::shifted('s'), now, &mut rec);
        assert_eq!(rec.calls, vec!["clear"]);
        assert!(!outcome.prevent_default);
    }

    #[test]
    fn test_shortcuts_can_be_disabled() {
        let mut d = focused().with_scientific_shortcuts(false);
        let mut rec = Recorder {
            scientific: true,
            ..Default::default()
        };
        d.handle(&KeyInput::shifted('s'), Instant::now(), &mut rec);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_recognized_keys_prevent_default() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let outcome = d.handle(&KeyInput::enter(), Instant::now(), &mut rec);
        assert!(outcome.prevent_default);
        assert_eq!(outcome.action, Some(CalculatorAction::Equals));
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let now = Instant::now();
        assert_eq!(d.handle(&KeyInput::character('x'), now, &mut rec), KeyOutcome::IGNORED);
        assert_eq!(d.handle(&KeyInput::character(' '), now, &mut rec), KeyOutcome::IGNORED);
        assert_eq!(
            d.handle(&KeyInput::new(Key::Other, Modifiers::NONE), now, &mut rec),
            KeyOutcome::IGNORED
        );
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut d = KeyboardDispatcher::new(FocusScope::Container);
        let mut rec = Recorder::default();
        let outcome = d.handle(&KeyInput::character('5'), Instant::now(), &mut rec);
        assert!(!outcome.is_handled());
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_global_scope_needs_no_focus() {
        let mut d = KeyboardDispatcher::new(FocusScope::Global);
        let mut rec = Recorder::default();
        d.handle(&KeyInput::character('5'), Instant::now(), &mut rec);
        assert_eq!(rec.calls, vec!["number:5"]);
    }

    #[test]
    fn test_disabled_dispatcher_ignores_keys() {
        let mut d = focused();
        d.set_enabled(false);
        let mut rec = Recorder::default();
        d.handle(&KeyInput::character('5'), Instant::now(), &mut rec);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_blur_grace_then_ignore() {
        let mut d = focused();
        let mut rec = Recorder::default();
        let start = Instant::now();
        d.gate_mut().on_blur(start);
        d.handle(&KeyInput::character('1'), start + Duration::from_millis(20), &mut rec);
        d.handle(&KeyInput::character('2'), start + Duration::from_millis(150), &mut rec);
        assert_eq!(rec.calls, vec!["number:1"]);
    }

    #[test]
    fn test_key_input_json() {
        let input = KeyInput::numpad(NumpadKey::Digit(4));
        let json = serde_json::to_string(&input).unwrap();
        let roundtrip: KeyInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
