//! On-screen keypad buttons.

use calc_core::calculations::scientific::{Operator, ScientificFunction};
use calc_core::keyboard::CalculatorHandler;
use calc_core::Keypad;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Digit(char),
    Decimal,
    Operation(Operator),
    Equals,
    Clear,
    Backspace,
    Negate,
    Function(ScientificFunction),
    ToggleAngle,
}

use Button::*;
use ScientificFunction as F;

/// Button grid, top row first
pub const LAYOUT: [[Button; 5]; 7] = [
    [Function(F::Sin), Function(F::Cos), Function(F::Tan), Function(F::Log), Function(F::Ln)],
    [Function(F::Sqrt), Function(F::Square), Operation(Operator::Power), Function(F::Pi), Function(F::E)],
    [Clear, Backspace, Negate, Operation(Operator::Divide), Function(F::Factorial)],
    [Digit('7'), Digit('8'), Digit('9'), Operation(Operator::Multiply), Function(F::Reciprocal)],
    [Digit('4'), Digit('5'), Digit('6'), Operation(Operator::Subtract), ToggleAngle],
    [Digit('1'), Digit('2'), Digit('3'), Operation(Operator::Add), Function(F::Cube)],
    [Digit('0'), Decimal, Function(F::Exp), Function(F::Pow10), Equals],
];

impl Button {
    pub fn label(&self, keypad: &Keypad) -> String {
        match self {
            Digit(d) => d.to_string(),
            Decimal => ".".to_string(),
            Operation(op) => op.symbol().to_string(),
            Equals => "=".to_string(),
            Clear => "C".to_string(),
            Backspace => "⌫".to_string(),
            Negate => "±".to_string(),
            Function(f) => f.symbol().to_string(),
            ToggleAngle => keypad.angle_mode().label().to_string(),
        }
    }

    pub fn is_equals(&self) -> bool {
        matches!(self, Equals)
    }

    /// Apply the button to the keypad
    pub fn press(&self, keypad: &mut Keypad) {
        match *self {
            Digit(d) => keypad.on_number(d.encode_utf8(&mut [0u8; 4])),
            Decimal => keypad.on_decimal(),
            Operation(op) => keypad.on_operation(op),
            Equals => keypad.on_equals(),
            Clear => keypad.on_clear(),
            Backspace => keypad.backspace(),
            Negate => keypad.negate(),
            Function(f) => keypad.on_scientific(f),
            ToggleAngle => keypad.toggle_angle_mode(),
        }
    }
}
