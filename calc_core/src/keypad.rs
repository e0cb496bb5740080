//! # Keypad
//!
//! State machine behind a pocket-calculator display: digit entry, a pending
//! binary operation, chained evaluation, and single-argument scientific
//! functions. It implements [`CalculatorHandler`], so it can be driven by
//! on-screen buttons and by the [`KeyboardDispatcher`](crate::keyboard::KeyboardDispatcher)
//! alike.
//!
//! The display always holds something that parses as a finite number (or a
//! partial entry such as `"3."`). When an operation produces no finite
//! result, the keypad resets the display to `"0"` and keeps the error in
//! [`Keypad::last_error`] for the UI to show.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::keyboard::CalculatorHandler;
//! use calc_core::calculations::scientific::Operator;
//! use calc_core::keypad::Keypad;
//!
//! let mut keypad = Keypad::new();
//! keypad.on_number("1");
//! keypad.on_number("2");
//! keypad.on_operation(Operator::Add);
//! keypad.on_number("3");
//! keypad.on_equals();
//! assert_eq!(keypad.display(), "15");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::scientific::{format_number, AngleMode, Operator, ScientificFunction};
use crate::errors::{CalcError, CalcResult};
use crate::keyboard::CalculatorHandler;

/// Calculator display state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypad {
    display: String,
    /// Left operand of the pending operation
    previous: Option<f64>,
    operation: Option<Operator>,
    /// Next digit replaces the display instead of appending
    new_number: bool,
    /// A right operand was entered since the last operator
    #[serde(default)]
    operand_entered: bool,
    angle_mode: AngleMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_error: Option<CalcError>,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            display: "0".to_string(),
            previous: None,
            operation: None,
            new_number: true,
            operand_entered: false,
            angle_mode: AngleMode::default(),
            last_error: None,
        }
    }

    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    /// Current display text
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Displayed value as a number
    pub fn value(&self) -> f64 {
        parse_display(&self.display)
    }

    /// Operator waiting for its right operand
    pub fn pending_operation(&self) -> Option<Operator> {
        self.operation
    }

    /// Left operand waiting for the pending operation
    pub fn pending_operand(&self) -> Option<f64> {
        self.previous
    }

    /// Short "12 +" style description of the pending operation
    pub fn pending_expression(&self) -> Option<String> {
        match (self.previous, self.operation) {
            (Some(prev), Some(op)) => Some(format!("{} {}", format_number(prev), op.symbol())),
            _ => None,
        }
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        self.angle_mode = angle_mode;
    }

    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
    }

    /// Error from the most recent operation, if it failed
    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// Remove the last entered character
    pub fn backspace(&mut self) {
        if self.new_number {
            return;
        }
        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = "0".to_string();
        }
    }

    /// Flip the sign of the displayed value
    pub fn negate(&mut self) {
        if self.display == "0" {
            return;
        }
        if let Some(stripped) = self.display.strip_prefix('-') {
            self.display = stripped.to_string();
        } else {
            self.display.insert(0, '-');
        }
        self.operand_entered = true;
    }

    fn show_result(&mut self, result: CalcResult<f64>) -> Option<f64> {
        match result {
            Ok(value) => {
                self.display = format_number(value);
                self.last_error = None;
                Some(value)
            }
            Err(e) => {
                tracing::debug!(error = %e, "keypad operation failed");
                self.display = "0".to_string();
                self.previous = None;
                self.operation = None;
                self.last_error = Some(e);
                None
            }
        }
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Keypad::new()
    }
}

impl CalculatorHandler for Keypad {
    fn on_number(&mut self, digit: &str) {
        if self.new_number {
            self.display = digit.to_string();
            self.new_number = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push_str(digit);
        }
        self.operand_entered = true;
        self.last_error = None;
    }

    fn on_decimal(&mut self) {
        if self.new_number {
            self.display = "0.".to_string();
            self.new_number = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
        self.operand_entered = true;
    }

    fn on_operation(&mut self, op: Operator) {
        let current = self.value();
        match (self.previous, self.operation) {
            (Some(prev), Some(pending)) if self.operand_entered => {
                let result = pending.apply(prev, current);
                if let Some(value) = self.show_result(result) {
                    self.previous = Some(value);
                } else {
                    self.new_number = true;
                    self.operand_entered = false;
                    return;
                }
            }
            (Some(_), Some(_)) => {
                // Operator pressed twice in a row: replace it
            }
            _ => self.previous = Some(current),
        }
        self.operation = Some(op);
        self.new_number = true;
        self.operand_entered = false;
    }

    fn on_equals(&mut self) {
        if let (Some(prev), Some(op)) = (self.previous, self.operation) {
            let result = op.apply(prev, self.value());
            self.show_result(result);
            self.previous = None;
            self.operation = None;
            self.new_number = true;
            self.operand_entered = false;
        }
    }

    fn on_clear(&mut self) {
        self.display = "0".to_string();
        self.previous = None;
        self.operation = None;
        self.new_number = true;
        self.operand_entered = false;
        self.last_error = None;
    }

    fn on_scientific(&mut self, function: ScientificFunction) {
        let result = function.apply(self.value(), self.angle_mode);
        self.show_result(result);
        self.new_number = true;
        self.operand_entered = true;
    }

    fn supports_scientific(&self) -> bool {
        true
    }
}

/// Parse display text ("3.", "-0.5") leniently; partial entries parse as their prefix
fn parse_display(display: &str) -> f64 {
    let trimmed = display.trim_end_matches('.');
    trimmed.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::keyboard::focus::FocusScope;
    use crate::keyboard::{KeyInput, KeyboardDispatcher};

    fn press_all(keypad: &mut Keypad, digits: &str) {
        for c in digits.chars() {
            if c == '.' {
                keypad.on_decimal();
            } else {
                keypad.on_number(&c.to_string());
            }
        }
    }

    #[test]
    fn test_digit_entry() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "123");
        assert_eq!(keypad.display(), "123");
    }

    #[test]
    fn test_leading_zero_replaced() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "007");
        assert_eq!(keypad.display(), "7");
    }

    #[test]
    fn test_decimal_entry() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "3.1.4");
        assert_eq!(keypad.display(), "3.14");

        let mut keypad = Keypad::new();
        keypad.on_decimal();
        press_all(&mut keypad, "5");
        assert_eq!(keypad.display(), "0.5");
    }

    #[test]
    fn test_equals_and_chaining() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "2");
        keypad.on_operation(Operator::Add);
        press_all(&mut keypad, "3");
        keypad.on_operation(Operator::Multiply);
        assert_eq!(keypad.display(), "5");
        press_all(&mut keypad, "4");
        keypad.on_equals();
        assert_eq!(keypad.display(), "20");
        assert!(keypad.pending_operation().is_none());
    }

    #[test]
    fn test_repeated_operator_replaces_pending() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "9");
        keypad.on_operation(Operator::Add);
        keypad.on_operation(Operator::Subtract);
        press_all(&mut keypad, "4");
        keypad.on_equals();
        assert_eq!(keypad.display(), "5");
    }

    #[test]
    fn test_function_result_as_right_operand() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "2");
        keypad.on_operation(Operator::Add);
        press_all(&mut keypad, "9");
        keypad.on_scientific(ScientificFunction::Sqrt);
        keypad.on_operation(Operator::Multiply);
        assert_eq!(keypad.display(), "5");
        press_all(&mut keypad, "4");
        keypad.on_equals();
        assert_eq!(keypad.display(), "20");
    }

    #[test]
    fn test_constants_as_right_operand() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "2");
        keypad.on_operation(Operator::Add);
        keypad.on_scientific(ScientificFunction::Pi);
        keypad.on_operation(Operator::Multiply);
        press_all(&mut keypad, "2");
        keypad.on_equals();
        assert!(keypad.display().starts_with("10.283"), "{}", keypad.display());

        let mut keypad = Keypad::new();
        press_all(&mut keypad, "3");
        keypad.on_operation(Operator::Multiply);
        keypad.on_scientific(ScientificFunction::E);
        keypad.on_operation(Operator::Subtract);
        press_all(&mut keypad, "1");
        keypad.on_equals();
        assert!(keypad.display().starts_with("7.154"), "{}", keypad.display());
    }

    #[test]
    fn test_negated_result_as_right_operand() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "10");
        keypad.on_operation(Operator::Add);
        keypad.on_scientific(ScientificFunction::Square);
        keypad.negate();
        keypad.on_equals();
        // 10 squared is 100, negated, then added to 10
        assert_eq!(keypad.display(), "-90");
    }

    #[test]
    fn test_equals_without_operation_is_noop() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "42");
        keypad.on_equals();
        assert_eq!(keypad.display(), "42");
    }

    #[test]
    fn test_power_operator() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "2");
        keypad.on_operation(Operator::Power);
        press_all(&mut keypad, "8");
        keypad.on_equals();
        assert_eq!(keypad.display(), "256");
    }

    #[test]
    fn test_divide_by_zero_resets_display() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "8");
        keypad.on_operation(Operator::Divide);
        press_all(&mut keypad, "0");
        keypad.on_equals();
        assert_eq!(keypad.display(), "0");
        assert!(keypad.last_error().is_some());
        keypad.on_clear();
        assert!(keypad.last_error().is_none());
    }

    #[test]
    fn test_scientific_function() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "9");
        keypad.on_scientific(ScientificFunction::Sqrt);
        assert_eq!(keypad.display(), "3");
        // Next digit starts a new number
        press_all(&mut keypad, "4");
        assert_eq!(keypad.display(), "4");
    }

    #[test]
    fn test_angle_mode_toggle() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "90");
        keypad.on_scientific(ScientificFunction::Sin);
        assert_eq!(keypad.display(), "1");
        keypad.toggle_angle_mode();
        assert_eq!(keypad.angle_mode(), AngleMode::Radians);
    }

    #[test]
    fn test_backspace_and_negate() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "12");
        keypad.backspace();
        assert_eq!(keypad.display(), "1");
        keypad.backspace();
        assert_eq!(keypad.display(), "0");
        press_all(&mut keypad, "5");
        keypad.negate();
        assert_eq!(keypad.display(), "-5");
        keypad.negate();
        assert_eq!(keypad.display(), "5");
    }

    #[test]
    fn test_pending_expression() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, "12");
        keypad.on_operation(Operator::Divide);
        assert_eq!(keypad.pending_expression().as_deref(), Some("12 ÷"));
    }

    #[test]
    fn test_keyboard_digits_then_escape() {
        let mut keypad = Keypad::new();
        let mut dispatcher = KeyboardDispatcher::new(FocusScope::Container);
        dispatcher.gate_mut().on_focus();
        let now = Instant::now();

        dispatcher.handle(&KeyInput::character('5'), now, &mut keypad);
        dispatcher.handle(&KeyInput::character('6'), now, &mut keypad);
        assert_eq!(keypad.display(), "56");

        dispatcher.handle(&KeyInput::escape(), now, &mut keypad);
        assert_eq!(keypad.display(), "0");
    }

    #[test]
    fn test_keyboard_full_expression() {
        let mut keypad = Keypad::new();
        let mut dispatcher = KeyboardDispatcher::new(FocusScope::Container);
        dispatcher.gate_mut().on_click(true);
        let now = Instant::now();

        for c in "12*3=".chars() {
            dispatcher.handle(&KeyInput::character(c), now, &mut keypad);
        }
        assert_eq!(keypad.display(), "36");

        dispatcher.handle(&KeyInput::shifted('c'), now, &mut keypad);
        // Shift+C is cos on a scientific keypad: cos(36°)
        assert!(keypad.display().starts_with("0.809"));
    }
}
