//! # Percentage Calculation
//!
//! Three questions, selected by [`PercentageMode`]:
//! - **of**: what is X% of Y?
//! - **ratio**: X is what percent of Y?
//! - **change**: percentage change from X to Y

use serde::{Deserialize, Serialize};

use crate::calculations::scientific::format_fixed;
use crate::errors::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageMode {
    /// What is X% of Y?
    #[default]
    Of,
    /// X is what % of Y?
    Ratio,
    /// % change from X to Y
    Change,
}

impl PercentageMode {
    pub const ALL: [PercentageMode; 3] = [PercentageMode::Of, PercentageMode::Ratio, PercentageMode::Change];

    pub fn display_name(&self) -> &'static str {
        match self {
            PercentageMode::Of => "What is X% of Y?",
            PercentageMode::Ratio => "X is what % of Y?",
            PercentageMode::Change => "% change from X to Y",
        }
    }
}

/// ## JSON Example
///
/// ```json
/// { "mode": "ratio", "x": 45.0, "y": 60.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentageInput {
    #[serde(default)]
    pub mode: PercentageMode,
    pub x: f64,
    pub y: f64,
}

impl PercentageInput {
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("x", self.x), ("y", self.y)] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Please enter a valid number"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentageResult {
    /// The answer: a value for `of`, a percentage for `ratio` and `change`
    pub value: f64,
    /// Set for `change` mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Sentence form, e.g. "8% of 250 is 20.00"
    pub summary: String,
}

/// Answer a percentage question.
///
/// ```rust
/// use calc_core::calculations::percentage::{calculate, PercentageInput, PercentageMode};
///
/// let result = calculate(&PercentageInput { mode: PercentageMode::Of, x: 8.0, y: 250.0 }).unwrap();
/// assert_eq!(result.value, 20.0);
/// assert_eq!(result.summary, "8% of 250 is 20.00");
/// ```
pub fn calculate(input: &PercentageInput) -> CalcResult<PercentageResult> {
    input.validate()?;
    let (x, y) = (input.x, input.y);

    match input.mode {
        PercentageMode::Of => {
            let value = x / 100.0 * y;
            Ok(PercentageResult {
                value,
                direction: None,
                summary: format!("{}% of {} is {}", x, y, format_fixed(value, 2)),
            })
        }
        PercentageMode::Ratio => {
            if y == 0.0 {
                return Err(CalcError::calculation_failed("percentage", "Total value cannot be zero"));
            }
            let value = x / y * 100.0;
            Ok(PercentageResult {
                value,
                direction: None,
                summary: format!("{} is {}% of {}", x, format_fixed(value, 2), y),
            })
        }
        PercentageMode::Change => {
            if x == 0.0 {
                return Err(CalcError::calculation_failed(
                    "percentage",
                    "Original value cannot be zero",
                ));
            }
            let value = (y - x) / x * 100.0;
            let direction = if value >= 0.0 { Direction::Increase } else { Direction::Decrease };
            let label = match direction {
                Direction::Increase => "Increase",
                Direction::Decrease => "Decrease",
            };
            Ok(PercentageResult {
                value,
                direction: Some(direction),
                summary: format!("{} of {}%", label, format_fixed(value.abs(), 2)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mode: PercentageMode, x: f64, y: f64) -> CalcResult<PercentageResult> {
        calculate(&PercentageInput { mode, x, y })
    }

    #[test]
    fn test_percent_of() {
        let result = run(PercentageMode::Of, 15.0, 80.0).unwrap();
        assert!((result.value - 12.0).abs() < 1e-12);
        assert_eq!(result.summary, "15% of 80 is 12.00");
    }

    #[test]
    fn test_ratio() {
        let result = run(PercentageMode::Ratio, 45.0, 60.0).unwrap();
        assert!((result.value - 75.0).abs() < 1e-12);
        assert_eq!(result.summary, "45 is 75.00% of 60");
    }

    #[test]
    fn test_change_increase_and_decrease() {
        let up = run(PercentageMode::Change, 50.0, 75.0).unwrap();
        assert_eq!(up.direction, Some(Direction::Increase));
        assert_eq!(up.summary, "Increase of 50.00%");

        let down = run(PercentageMode::Change, 200.0, 150.0).unwrap();
        assert_eq!(down.direction, Some(Direction::Decrease));
        assert!((down.value + 25.0).abs() < 1e-12);
        assert_eq!(down.summary, "Decrease of 25.00%");
    }

    #[test]
    fn test_division_by_zero_rejected() {
        assert!(run(PercentageMode::Ratio, 5.0, 0.0).is_err());
        assert!(run(PercentageMode::Change, 0.0, 5.0).is_err());
        assert!(run(PercentageMode::Of, f64::NAN, 5.0).is_err());
    }
}
