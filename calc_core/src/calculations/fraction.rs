//! # Fraction Calculation
//!
//! Adds, subtracts, multiplies, or divides two fractions and reduces the
//! result to lowest terms using the greatest common divisor.
//!
//! ## Assumptions
//!
//! - A zero denominator is rejected, in either operand or the result.
//! - The sign is carried by the numerator; denominators are always positive.
//! - Intermediate products are computed in 128-bit integers; a result that
//!   does not fit back into `i64` is reported, never wrapped.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::fraction::{calculate, Fraction, FractionInput, FractionOperation};
//!
//! let input = FractionInput {
//!     lhs: Fraction::new(1, 2).unwrap(),
//!     operation: FractionOperation::Add,
//!     rhs: Fraction::new(1, 3).unwrap(),
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.result.to_string(), "5/6");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Greatest common divisor (Euclid). `gcd(0, 0)` is 0.
pub fn gcd(a: u128, b: u128) -> u128 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// A fraction in lowest terms with a positive denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    /// Create a reduced fraction.
    ///
    /// ```rust
    /// use calc_core::calculations::fraction::Fraction;
    ///
    /// let f = Fraction::new(6, -8).unwrap();
    /// assert_eq!((f.numerator, f.denominator), (-3, 4));
    /// assert!(Fraction::new(1, 0).is_err());
    /// ```
    pub fn new(numerator: i64, denominator: i64) -> CalcResult<Self> {
        simplify(numerator as i128, denominator as i128)
    }

    /// Whole number n/1
    pub fn whole(value: i64) -> Self {
        Fraction {
            numerator: value,
            denominator: 1,
        }
    }

    pub fn is_whole(&self) -> bool {
        self.denominator == 1
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Check a fraction that may have been built field-by-field (e.g. from JSON)
    pub fn validate(&self, field: &str) -> CalcResult<()> {
        if self.denominator == 0 {
            return Err(CalcError::invalid_input(
                field,
                format!("{}/{}", self.numerator, self.denominator),
                "Denominator cannot be zero",
            ));
        }
        Ok(())
    }

    /// Mixed-number rendering, e.g. `-1 1/2` for -3/2
    pub fn to_mixed_string(&self) -> String {
        if self.is_whole() || self.numerator.unsigned_abs() < self.denominator.unsigned_abs() {
            return self.to_string();
        }
        let whole = self.numerator / self.denominator;
        let rest = (self.numerator % self.denominator).abs();
        format!("{} {}/{}", whole, rest, self.denominator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for Fraction {
    type Err = CalcError;

    /// Parse `"3/4"`, `"-3 / 4"`, or a whole number `"5"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_part = |part: &str, field: &str| -> CalcResult<i64> {
            part.trim().parse::<i64>().map_err(|_| {
                CalcError::invalid_input(field, part.trim(), "Expected a whole number")
            })
        };
        match s.split_once('/') {
            Some((num, den)) => Fraction::new(parse_part(num, "numerator")?, parse_part(den, "denominator")?),
            None => Ok(Fraction::whole(parse_part(s, "numerator")?)),
        }
    }
}

/// Reduce `numerator/denominator` to lowest terms with a positive denominator
pub fn simplify(numerator: i128, denominator: i128) -> CalcResult<Fraction> {
    if denominator == 0 {
        return Err(CalcError::invalid_input(
            "denominator",
            "0",
            "Denominator cannot be zero",
        ));
    }

    let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()) as i128;
    let (mut num, mut den) = (numerator / divisor, denominator / divisor);
    if den < 0 {
        num = -num;
        den = -den;
    }

    let overflow = || CalcError::calculation_failed("fraction", "Result is too large to represent");
    Ok(Fraction {
        numerator: i64::try_from(num).map_err(|_| overflow())?,
        denominator: i64::try_from(den).map_err(|_| overflow())?,
    })
}

/// Arithmetic between two fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionOperation {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl FractionOperation {
    pub const ALL: [FractionOperation; 4] = [
        FractionOperation::Add,
        FractionOperation::Subtract,
        FractionOperation::Multiply,
        FractionOperation::Divide,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            FractionOperation::Add => "+",
            FractionOperation::Subtract => "-",
            FractionOperation::Multiply => "×",
            FractionOperation::Divide => "÷",
        }
    }
}

impl FromStr for FractionOperation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" | "add" => Ok(FractionOperation::Add),
            "-" | "subtract" => Ok(FractionOperation::Subtract),
            "*" | "x" | "×" | "multiply" => Ok(FractionOperation::Multiply),
            "/" | "÷" | "divide" => Ok(FractionOperation::Divide),
            other => Err(CalcError::invalid_input("operation", other, "Expected one of + - * /")),
        }
    }
}

/// Input for a fraction operation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "lhs": { "numerator": 1, "denominator": 2 },
///   "operation": "add",
///   "rhs": { "numerator": 1, "denominator": 3 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractionInput {
    pub lhs: Fraction,
    #[serde(default)]
    pub operation: FractionOperation,
    pub rhs: Fraction,
}

/// Result of a fraction operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractionResult {
    /// Result in lowest terms
    pub result: Fraction,
    /// Decimal value of the result
    pub decimal: f64,
    /// Mixed-number rendering (e.g. "1 1/2")
    pub mixed: String,
    /// Full expression, e.g. "1/2 + 1/3 = 5/6"
    pub expression: String,
}

/// Evaluate a fraction operation.
///
/// # Returns
///
/// * `Ok(FractionResult)` - Simplified result
/// * `Err(CalcError)` - Zero denominator, division by a zero fraction, or overflow
pub fn calculate(input: &FractionInput) -> CalcResult<FractionResult> {
    input.lhs.validate("lhs")?;
    input.rhs.validate("rhs")?;

    let (n1, d1) = (input.lhs.numerator as i128, input.lhs.denominator as i128);
    let (n2, d2) = (input.rhs.numerator as i128, input.rhs.denominator as i128);

    let (num, den) = match input.operation {
        FractionOperation::Add => (n1 * d2 + n2 * d1, d1 * d2),
        FractionOperation::Subtract => (n1 * d2 - n2 * d1, d1 * d2),
        FractionOperation::Multiply => (n1 * n2, d1 * d2),
        FractionOperation::Divide => {
            if n2 == 0 {
                return Err(CalcError::calculation_failed(
                    "fraction",
                    "Cannot divide by a zero fraction",
                ));
            }
            (n1 * d2, d1 * n2)
        }
    };

    let result = simplify(num, den)?;
    tracing::debug!(%result, "fraction calculated");

    Ok(FractionResult {
        result,
        decimal: result.to_f64(),
        mixed: result.to_mixed_string(),
        expression: format!(
            "{} {} {} = {}",
            input.lhs,
            input.operation.symbol(),
            input.rhs,
            result
        ),
    })
}
