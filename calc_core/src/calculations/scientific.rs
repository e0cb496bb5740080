//! # Scientific Functions
//!
//! Binary operators and single-argument functions used by the keypad and by
//! the `scientific` command.
//!
//! ## Assumptions
//!
//! - Trigonometric functions read their argument in the current
//!   [`AngleMode`]; inverse functions return an angle in the same mode.
//! - `n!` takes the floor of its argument, like a pocket calculator does.
//! - Results that are not finite numbers (division by zero, `ln` of a
//!   negative) are errors rather than `NaN`/`inf`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::scientific::{AngleMode, ScientificFunction};
//!
//! let value = ScientificFunction::Cos.apply(60.0, AngleMode::Degrees).unwrap();
//! assert!((value - 0.5).abs() < 1e-12);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Unit for trigonometric arguments and results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    /// Convert an angle in this mode to radians
    pub fn to_radians(&self, value: f64) -> f64 {
        match self {
            AngleMode::Degrees => value.to_radians(),
            AngleMode::Radians => value,
        }
    }

    /// Convert an angle in radians to this mode
    pub fn from_radians(&self, radians: f64) -> f64 {
        match self {
            AngleMode::Degrees => radians.to_degrees(),
            AngleMode::Radians => radians,
        }
    }

    /// Short label shown next to the display
    pub fn label(&self) -> &'static str {
        match self {
            AngleMode::Degrees => "DEG",
            AngleMode::Radians => "RAD",
        }
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }
}

impl FromStr for AngleMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
            other => Err(CalcError::invalid_input(
                "angle_mode",
                other,
                "Expected 'degrees' or 'radians'",
            )),
        }
    }
}

/// Binary operator between two keypad operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// x^y
    Power,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
    ];

    /// Symbol shown on the keypad
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Power => "^",
        }
    }

    /// Evaluate `lhs op rhs`.
    ///
    /// Division by zero and overflow to infinity are reported as errors.
    pub fn apply(&self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        let result = match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::calculation_failed("keypad", "Cannot divide by zero"));
                }
                lhs / rhs
            }
            Operator::Power => lhs.powf(rhs),
        };
        finite("keypad", result)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" | "add" => Ok(Operator::Add),
            "-" | "–" | "subtract" => Ok(Operator::Subtract),
            "*" | "x" | "×" | "multiply" => Ok(Operator::Multiply),
            "/" | "÷" | "divide" => Ok(Operator::Divide),
            "^" | "pow" | "power" => Ok(Operator::Power),
            other => Err(CalcError::invalid_input("operator", other, "Unknown operator")),
        }
    }
}

/// Single-argument scientific function (or constant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScientificFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    Sqrt,
    Cbrt,
    Square,
    Cube,
    Reciprocal,
    /// e^x
    Exp,
    /// 10^x
    Pow10,
    Factorial,
    /// Constant π (ignores the displayed value)
    Pi,
    /// Constant e (ignores the displayed value)
    E,
}

impl ScientificFunction {
    pub const ALL: [ScientificFunction; 18] = [
        ScientificFunction::Sin,
        ScientificFunction::Cos,
        ScientificFunction::Tan,
        ScientificFunction::Asin,
        ScientificFunction::Acos,
        ScientificFunction::Atan,
        ScientificFunction::Log,
        ScientificFunction::Ln,
        ScientificFunction::Sqrt,
        ScientificFunction::Cbrt,
        ScientificFunction::Square,
        ScientificFunction::Cube,
        ScientificFunction::Reciprocal,
        ScientificFunction::Exp,
        ScientificFunction::Pow10,
        ScientificFunction::Factorial,
        ScientificFunction::Pi,
        ScientificFunction::E,
    ];

    /// Command-line / JSON name
    pub fn name(&self) -> &'static str {
        match self {
            ScientificFunction::Sin => "sin",
            ScientificFunction::Cos => "cos",
            ScientificFunction::Tan => "tan",
            ScientificFunction::Asin => "asin",
            ScientificFunction::Acos => "acos",
            ScientificFunction::Atan => "atan",
            ScientificFunction::Log => "log",
            ScientificFunction::Ln => "ln",
            ScientificFunction::Sqrt => "sqrt",
            ScientificFunction::Cbrt => "cbrt",
            ScientificFunction::Square => "square",
            ScientificFunction::Cube => "cube",
            ScientificFunction::Reciprocal => "reciprocal",
            ScientificFunction::Exp => "exp",
            ScientificFunction::Pow10 => "pow10",
            ScientificFunction::Factorial => "factorial",
            ScientificFunction::Pi => "pi",
            ScientificFunction::E => "e",
        }
    }

    /// Keypad label
    pub fn symbol(&self) -> &'static str {
        match self {
            ScientificFunction::Sin => "sin",
            ScientificFunction::Cos => "cos",
            ScientificFunction::Tan => "tan",
            ScientificFunction::Asin => "sin⁻¹",
            ScientificFunction::Acos => "cos⁻¹",
            ScientificFunction::Atan => "tan⁻¹",
            ScientificFunction::Log => "log",
            ScientificFunction::Ln => "ln",
            ScientificFunction::Sqrt => "√x",
            ScientificFunction::Cbrt => "∛x",
            ScientificFunction::Square => "x²",
            ScientificFunction::Cube => "x³",
            ScientificFunction::Reciprocal => "1/x",
            ScientificFunction::Exp => "eˣ",
            ScientificFunction::Pow10 => "10ˣ",
            ScientificFunction::Factorial => "n!",
            ScientificFunction::Pi => "π",
            ScientificFunction::E => "e",
        }
    }

    /// Whether the function ignores its argument
    pub fn is_constant(&self) -> bool {
        matches!(self, ScientificFunction::Pi | ScientificFunction::E)
    }

    /// Apply the function to `value`.
    pub fn apply(&self, value: f64, angle: AngleMode) -> CalcResult<f64> {
        let result = match self {
            ScientificFunction::Sin => angle.to_radians(value).sin(),
            ScientificFunction::Cos => angle.to_radians(value).cos(),
            ScientificFunction::Tan => angle.to_radians(value).tan(),
            ScientificFunction::Asin => angle.from_radians(value.asin()),
            ScientificFunction::Acos => angle.from_radians(value.acos()),
            ScientificFunction::Atan => angle.from_radians(value.atan()),
            ScientificFunction::Log => value.log10(),
            ScientificFunction::Ln => value.ln(),
            ScientificFunction::Sqrt => value.sqrt(),
            ScientificFunction::Cbrt => value.cbrt(),
            ScientificFunction::Square => value * value,
            ScientificFunction::Cube => value * value * value,
            ScientificFunction::Reciprocal => {
                if value == 0.0 {
                    return Err(CalcError::calculation_failed(self.name(), "Cannot divide by zero"));
                }
                1.0 / value
            }
            ScientificFunction::Exp => value.exp(),
            ScientificFunction::Pow10 => 10f64.powf(value),
            ScientificFunction::Factorial => factorial(value)?,
            ScientificFunction::Pi => std::f64::consts::PI,
            ScientificFunction::E => std::f64::consts::E,
        };
        finite(self.name(), result)
    }
}

impl fmt::Display for ScientificFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ScientificFunction {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ScientificFunction::ALL
            .iter()
            .copied()
            .find(|f| f.name() == needle || f.symbol() == s.trim())
            .ok_or_else(|| CalcError::invalid_input("function", s, "Unknown scientific function"))
    }
}

/// n! over the floor of `value`
fn factorial(value: f64) -> CalcResult<f64> {
    let n = value.floor();
    if n < 0.0 {
        return Err(CalcError::invalid_input(
            "value",
            value.to_string(),
            "Factorial is undefined for negative numbers",
        ));
    }
    // 171! overflows f64
    if n > 170.0 {
        return Err(CalcError::calculation_failed("factorial", "Result is too large"));
    }
    let mut result = 1.0;
    let mut i = 2.0;
    while i <= n {
        result *= i;
        i += 1.0;
    }
    Ok(result)
}

fn finite(calculation_type: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::calculation_failed(calculation_type, "Result is not a finite number"))
    }
}

/// Format a number the way a calculator display shows it.
///
/// Integral values have no fractional part, negative zero prints as `0`, and
/// very large or very small magnitudes switch to exponent notation
/// (`1e+21`, `1.5e-7`).
///
/// ```rust
/// use calc_core::calculations::scientific::format_number;
///
/// assert_eq!(format_number(56.0), "56");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        format!("{}", value)
    }
}

/// Round to a fixed number of decimals for text output (e.g. `12.50`)
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    // "-0.00" reads oddly on a result line
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// One scientific evaluation: a function of one value, or two operands
/// joined by an operator.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "function", "function": "sin", "value": 30.0, "angle_mode": "degrees" }
/// { "kind": "binary", "lhs": 2.0, "operator": "power", "rhs": 10.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScientificInput {
    Function {
        function: ScientificFunction,
        #[serde(default)]
        value: f64,
        #[serde(default)]
        angle_mode: AngleMode,
    },
    Binary {
        lhs: f64,
        operator: Operator,
        rhs: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScientificResult {
    pub expression: String,
    pub value: f64,
    /// `value` as a calculator display shows it
    pub display: String,
}

/// Evaluate a scientific input.
///
/// ```rust
/// use calc_core::calculations::scientific::{calculate, Operator, ScientificInput};
///
/// let result = calculate(&ScientificInput::Binary { lhs: 2.0, operator: Operator::Power, rhs: 10.0 }).unwrap();
/// assert_eq!(result.display, "1024");
/// ```
pub fn calculate(input: &ScientificInput) -> CalcResult<ScientificResult> {
    let (expression, value) = match *input {
        ScientificInput::Function {
            function,
            value,
            angle_mode,
        } => {
            let expression = if function.is_constant() {
                function.symbol().to_string()
            } else {
                format!("{}({})", function.name(), format_number(value))
            };
            (expression, function.apply(value, angle_mode)?)
        }
        ScientificInput::Binary { lhs, operator, rhs } => (
            format!("{} {} {}", format_number(lhs), operator, format_number(rhs)),
            operator.apply(lhs, rhs)?,
        ),
    };
    Ok(ScientificResult {
        expression,
        value,
        display: format_number(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_operators() {
        assert_eq!(Operator::Add.apply(2.0, 3.0).unwrap(), 5.0);
        assert_eq!(Operator::Subtract.apply(2.0, 3.0).unwrap(), -1.0);
        assert_eq!(Operator::Multiply.apply(2.0, 3.0).unwrap(), 6.0);
        assert_eq!(Operator::Divide.apply(3.0, 2.0).unwrap(), 1.5);
        assert_eq!(Operator::Power.apply(2.0, 10.0).unwrap(), 1024.0);
    }

    #[test]
    fn test_divide_by_zero_rejected() {
        let err = Operator::Divide.apply(1.0, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_trig_degrees_and_radians() {
        assert!(approx(ScientificFunction::Sin.apply(90.0, AngleMode::Degrees).unwrap(), 1.0));
        assert!(approx(
            ScientificFunction::Sin.apply(std::f64::consts::FRAC_PI_2, AngleMode::Radians).unwrap(),
            1.0
        ));
        assert!(approx(ScientificFunction::Asin.apply(1.0, AngleMode::Degrees).unwrap(), 90.0));
        assert!(approx(ScientificFunction::Atan.apply(1.0, AngleMode::Degrees).unwrap(), 45.0));
    }

    #[test]
    fn test_logs_and_roots() {
        let deg = AngleMode::Degrees;
        assert!(approx(ScientificFunction::Log.apply(1000.0, deg).unwrap(), 3.0));
        assert!(approx(ScientificFunction::Ln.apply(std::f64::consts::E, deg).unwrap(), 1.0));
        assert!(approx(ScientificFunction::Sqrt.apply(81.0, deg).unwrap(), 9.0));
        assert!(approx(ScientificFunction::Cbrt.apply(-27.0, deg).unwrap(), -3.0));
        assert!(ScientificFunction::Ln.apply(-1.0, deg).is_err());
        assert!(ScientificFunction::Sqrt.apply(-4.0, deg).is_err());
    }

    #[test]
    fn test_factorial() {
        let deg = AngleMode::Degrees;
        assert_eq!(ScientificFunction::Factorial.apply(0.0, deg).unwrap(), 1.0);
        assert_eq!(ScientificFunction::Factorial.apply(5.0, deg).unwrap(), 120.0);
        assert_eq!(ScientificFunction::Factorial.apply(5.9, deg).unwrap(), 120.0);
        assert!(ScientificFunction::Factorial.apply(-1.0, deg).is_err());
        assert!(ScientificFunction::Factorial.apply(171.0, deg).is_err());
    }

    #[test]
    fn test_constants_ignore_value() {
        assert_eq!(
            ScientificFunction::Pi.apply(42.0, AngleMode::Degrees).unwrap(),
            std::f64::consts::PI
        );
        assert!(ScientificFunction::E.is_constant());
    }

    #[test]
    fn test_parse_function_names() {
        assert_eq!("sin".parse::<ScientificFunction>().unwrap(), ScientificFunction::Sin);
        assert_eq!("√x".parse::<ScientificFunction>().unwrap(), ScientificFunction::Sqrt);
        assert_eq!("FACTORIAL".parse::<ScientificFunction>().unwrap(), ScientificFunction::Factorial);
        assert!("sinh".parse::<ScientificFunction>().is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(56.0), "56");
        assert_eq!(format_number(-3.5), "-3.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123456789.0), "123456789");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(12.5, 2), "12.50");
        assert_eq!(format_fixed(-0.001, 2), "0.00");
        assert_eq!(format_fixed(-1.256, 2), "-1.26");
    }

    #[test]
    fn test_calculate_inputs() {
        let result = calculate(&ScientificInput::Function {
            function: ScientificFunction::Sqrt,
            value: 144.0,
            angle_mode: AngleMode::Degrees,
        })
        .unwrap();
        assert_eq!(result.display, "12");
        assert_eq!(result.expression, "sqrt(144)");

        let err = calculate(&ScientificInput::Binary {
            lhs: 1.0,
            operator: Operator::Divide,
            rhs: 0.0,
        })
        .unwrap_err();
        assert!(err.is_user_error());

        let input: ScientificInput =
            serde_json::from_str(r#"{"kind":"function","function":"pi"}"#).unwrap();
        assert_eq!(calculate(&input).unwrap().expression, "π");
    }
}
