//! # Calculator Catalog
//!
//! The set of calculators this crate provides, with the names and
//! descriptions shown in menus and in `calc list`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Menu grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Math,
    Other,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Math => "Math Calculators",
            Section::Other => "Other Calculators",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    Scientific,
    Fraction,
    Percentage,
    Random,
    Triangle,
    Statistics,
    Age,
    Date,
    Time,
    Hours,
    Gpa,
    Grade,
    Concrete,
    Subnet,
    Password,
    Conversion,
}

impl CalculatorKind {
    /// Menu order
    pub const ALL: [CalculatorKind; 16] = [
        CalculatorKind::Scientific,
        CalculatorKind::Fraction,
        CalculatorKind::Percentage,
        CalculatorKind::Random,
        CalculatorKind::Triangle,
        CalculatorKind::Statistics,
        CalculatorKind::Age,
        CalculatorKind::Date,
        CalculatorKind::Time,
        CalculatorKind::Hours,
        CalculatorKind::Gpa,
        CalculatorKind::Grade,
        CalculatorKind::Concrete,
        CalculatorKind::Subnet,
        CalculatorKind::Password,
        CalculatorKind::Conversion,
    ];

    /// URL-style identifier, e.g. `standard-deviation-calculator`
    pub fn slug(&self) -> &'static str {
        match self {
            CalculatorKind::Scientific => "scientific-calculator",
            CalculatorKind::Fraction => "fraction-calculator",
            CalculatorKind::Percentage => "percentage-calculator",
            CalculatorKind::Random => "random-number-generator",
            CalculatorKind::Triangle => "triangle-calculator",
            CalculatorKind::Statistics => "standard-deviation-calculator",
            CalculatorKind::Age => "age-calculator",
            CalculatorKind::Date => "date-calculator",
            CalculatorKind::Time => "time-calculator",
            CalculatorKind::Hours => "hours-calculator",
            CalculatorKind::Gpa => "gpa-calculator",
            CalculatorKind::Grade => "grade-calculator",
            CalculatorKind::Concrete => "concrete-calculator",
            CalculatorKind::Subnet => "subnet-calculator",
            CalculatorKind::Password => "password-generator",
            CalculatorKind::Conversion => "conversion-calculator",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::Scientific => "Scientific Calculator",
            CalculatorKind::Fraction => "Fraction Calculator",
            CalculatorKind::Percentage => "Percentage Calculator",
            CalculatorKind::Random => "Random Number Generator",
            CalculatorKind::Triangle => "Triangle Calculator",
            CalculatorKind::Statistics => "Standard Deviation Calculator",
            CalculatorKind::Age => "Age Calculator",
            CalculatorKind::Date => "Date Calculator",
            CalculatorKind::Time => "Time Calculator",
            CalculatorKind::Hours => "Hours Calculator",
            CalculatorKind::Gpa => "GPA Calculator",
            CalculatorKind::Grade => "Grade Calculator",
            CalculatorKind::Concrete => "Concrete Calculator",
            CalculatorKind::Subnet => "Subnet Calculator",
            CalculatorKind::Password => "Password Generator",
            CalculatorKind::Conversion => "Conversion Calculator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CalculatorKind::Scientific => {
                "Advanced calculator with trigonometric, logarithmic, and exponential functions"
            }
            CalculatorKind::Fraction => {
                "Add, subtract, multiply, and divide fractions with automatic simplification"
            }
            CalculatorKind::Percentage => "Calculate percentages, percent changes, and more with ease",
            CalculatorKind::Random => "Generate random numbers within your specified range",
            CalculatorKind::Triangle => "Calculate area, perimeter, and triangle type from three sides",
            CalculatorKind::Statistics => "Calculate mean, variance, and standard deviation of a dataset",
            CalculatorKind::Age => "Calculate your exact age in years, months, and days",
            CalculatorKind::Date => "Calculate the difference between dates or add/subtract days",
            CalculatorKind::Time => "Add or subtract time durations in hours and minutes",
            CalculatorKind::Hours => "Calculate work hours between start and end times with break deduction",
            CalculatorKind::Gpa => "Calculate your Grade Point Average based on your course grades and credits",
            CalculatorKind::Grade => {
                "Calculate your overall grade percentage and letter grade from multiple assignments"
            }
            CalculatorKind::Concrete => "Calculate concrete volume and estimate bags needed for your project",
            CalculatorKind::Subnet => {
                "Calculate network address, broadcast, host range, and subnet mask from IP/CIDR"
            }
            CalculatorKind::Password => "Generate strong, secure passwords with customizable options",
            CalculatorKind::Conversion => "Convert between different units of length, weight, and temperature",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            CalculatorKind::Scientific
            | CalculatorKind::Fraction
            | CalculatorKind::Percentage
            | CalculatorKind::Random
            | CalculatorKind::Triangle
            | CalculatorKind::Statistics => Section::Math,
            _ => Section::Other,
        }
    }

    /// True for calculators whose output depends on an RNG
    pub fn is_randomized(&self) -> bool {
        matches!(self, CalculatorKind::Random | CalculatorKind::Password)
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    /// Accepts the slug (`age-calculator`) or the short name (`age`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        CalculatorKind::ALL
            .iter()
            .copied()
            .find(|kind| {
                kind.slug() == needle
                    || serde_json::to_value(kind)
                        .ok()
                        .and_then(|v| v.as_str().map(|name| name == needle))
                        .unwrap_or(false)
            })
            .ok_or_else(|| CalcError::invalid_input("calculator", s.trim(), "Unknown calculator"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_unique() {
        let slugs: HashSet<_> = CalculatorKind::ALL.iter().map(|k| k.slug()).collect();
        assert_eq!(slugs.len(), CalculatorKind::ALL.len());
    }

    #[test]
    fn test_sections() {
        let math = CalculatorKind::ALL.iter().filter(|k| k.section() == Section::Math).count();
        assert_eq!(math, 6);
        assert_eq!(CalculatorKind::Gpa.section(), Section::Other);
    }

    #[test]
    fn test_parse_slug_or_name() {
        assert_eq!("gpa".parse::<CalculatorKind>().unwrap(), CalculatorKind::Gpa);
        assert_eq!(
            "standard-deviation-calculator".parse::<CalculatorKind>().unwrap(),
            CalculatorKind::Statistics
        );
        assert!("mortgage".parse::<CalculatorKind>().is_err());
    }
}
