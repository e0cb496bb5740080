//! # Descriptive Statistics
//!
//! Mean, variance, and standard deviation of a list of numbers. Input is
//! free text split on whitespace and commas; tokens that are not numbers
//! are dropped.
//!
//! Both the population (÷ n) and sample (÷ n-1) forms are reported; the
//! sample form needs at least two values.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// ## JSON Example
///
/// ```json
/// { "values": [2, 4, 4, 4, 5, 5, 7, 9] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsInput {
    pub values: Vec<f64>,
}

impl StatisticsInput {
    /// Parse "1, 2 3,4"; non-numeric tokens are skipped
    pub fn parse(text: &str) -> Self {
        let values = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .filter_map(|token| token.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .collect();
        StatisticsInput { values }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub variance: f64,
    pub std_dev: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_variance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_std_dev: Option<f64>,
}

/// Summarize a data set.
///
/// ```rust
/// use calc_core::calculations::statistics::{calculate, StatisticsInput};
///
/// let result = calculate(&StatisticsInput::parse("2 4 4 4 5 5 7 9")).unwrap();
/// assert_eq!(result.mean, 5.0);
/// assert_eq!(result.std_dev, 2.0);
/// ```
pub fn calculate(input: &StatisticsInput) -> CalcResult<StatisticsResult> {
    let values = &input.values;
    if values.is_empty() {
        return Err(CalcError::missing_field("values"));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(CalcError::invalid_input("values", bad.to_string(), "Values must be finite"));
    }

    let count = values.len();
    let n = count as f64;
    let sum: f64 = values.iter().sum();
    let mean = sum / n;
    let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let variance = squared / n;
    let sample_variance = (count > 1).then(|| squared / (n - 1.0));

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(StatisticsResult {
        count,
        sum,
        mean,
        min,
        max,
        variance,
        std_dev: variance.sqrt(),
        sample_variance,
        sample_std_dev: sample_variance.map(f64::sqrt),
    })
}
