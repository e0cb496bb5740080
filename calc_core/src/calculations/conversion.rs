//! # Unit Conversion
//!
//! Length and weight convert through a base unit (meters, kilograms) using
//! per-unit factors. Temperature uses the exact affine formulas in
//! [`crate::units`].
//!
//! Converting across categories (e.g. feet to pounds) is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::scientific::format_fixed;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Celsius, Fahrenheit, Kelvin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Length,
    Weight,
    Temperature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Meters,
    Feet,
    Inches,
    Kilometers,
    Miles,
    Centimeters,
    Kilograms,
    Pounds,
    Ounces,
    Grams,
    Tons,
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Unit {
    pub const ALL: [Unit; 14] = [
        Unit::Meters,
        Unit::Feet,
        Unit::Inches,
        Unit::Kilometers,
        Unit::Miles,
        Unit::Centimeters,
        Unit::Kilograms,
        Unit::Pounds,
        Unit::Ounces,
        Unit::Grams,
        Unit::Tons,
        Unit::Celsius,
        Unit::Fahrenheit,
        Unit::Kelvin,
    ];

    pub fn category(&self) -> Category {
        match self {
            Unit::Meters | Unit::Feet | Unit::Inches | Unit::Kilometers | Unit::Miles | Unit::Centimeters => {
                Category::Length
            }
            Unit::Kilograms | Unit::Pounds | Unit::Ounces | Unit::Grams | Unit::Tons => Category::Weight,
            Unit::Celsius | Unit::Fahrenheit | Unit::Kelvin => Category::Temperature,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Meters => "meters",
            Unit::Feet => "feet",
            Unit::Inches => "inches",
            Unit::Kilometers => "kilometers",
            Unit::Miles => "miles",
            Unit::Centimeters => "centimeters",
            Unit::Kilograms => "kilograms",
            Unit::Pounds => "pounds",
            Unit::Ounces => "ounces",
            Unit::Grams => "grams",
            Unit::Tons => "tons",
            Unit::Celsius => "celsius",
            Unit::Fahrenheit => "fahrenheit",
            Unit::Kelvin => "kelvin",
        }
    }

    /// Units per base unit (1 meter or 1 kilogram); None for temperature
    fn factor(&self) -> Option<f64> {
        match self {
            Unit::Meters => Some(1.0),
            Unit::Feet => Some(3.28084),
            Unit::Inches => Some(39.3701),
            Unit::Kilometers => Some(0.001),
            Unit::Miles => Some(0.000621371),
            Unit::Centimeters => Some(100.0),
            Unit::Kilograms => Some(1.0),
            Unit::Pounds => Some(2.20462),
            Unit::Ounces => Some(35.274),
            Unit::Grams => Some(1000.0),
            Unit::Tons => Some(0.001),
            Unit::Celsius | Unit::Fahrenheit | Unit::Kelvin => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" => Unit::Meters,
            "ft" | "foot" | "feet" => Unit::Feet,
            "in" | "inch" | "inches" => Unit::Inches,
            "km" | "kilometer" | "kilometers" => Unit::Kilometers,
            "mi" | "mile" | "miles" => Unit::Miles,
            "cm" | "centimeter" | "centimeters" => Unit::Centimeters,
            "kg" | "kilogram" | "kilograms" => Unit::Kilograms,
            "lb" | "lbs" | "pound" | "pounds" => Unit::Pounds,
            "oz" | "ounce" | "ounces" => Unit::Ounces,
            "g" | "gram" | "grams" => Unit::Grams,
            "t" | "ton" | "tons" => Unit::Tons,
            "c" | "celsius" => Unit::Celsius,
            "f" | "fahrenheit" => Unit::Fahrenheit,
            "k" | "kelvin" => Unit::Kelvin,
            other => return Err(CalcError::invalid_input("unit", other, "Unknown unit")),
        };
        Ok(unit)
    }
}

/// ## JSON Example
///
/// ```json
/// { "value": 10.0, "from": "meters", "to": "feet" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionInput {
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub value: f64,
    pub category: Category,
    /// e.g. "10 meters = 32.8084 feet" (2 decimals for temperature, 4 otherwise)
    pub summary: String,
}

fn convert_temperature(value: f64, from: Unit, to: Unit) -> f64 {
    let celsius = match from {
        Unit::Fahrenheit => Celsius::from(Fahrenheit(value)),
        Unit::Kelvin => Celsius::from(Kelvin(value)),
        _ => Celsius(value),
    };
    match to {
        Unit::Fahrenheit => Fahrenheit::from(celsius).0,
        Unit::Kelvin => Kelvin::from(celsius).0,
        _ => celsius.0,
    }
}

/// Convert a value between two units of the same category.
///
/// ```rust
/// use calc_core::calculations::conversion::{calculate, ConversionInput, Unit};
///
/// let result = calculate(&ConversionInput { value: 100.0, from: Unit::Celsius, to: Unit::Fahrenheit }).unwrap();
/// assert_eq!(result.value, 212.0);
/// assert_eq!(result.summary, "100 celsius = 212.00 fahrenheit");
/// ```
pub fn calculate(input: &ConversionInput) -> CalcResult<ConversionResult> {
    if !input.value.is_finite() {
        return Err(CalcError::invalid_input("value", input.value.to_string(), "Please enter a valid number"));
    }
    let category = input.from.category();
    if category != input.to.category() {
        return Err(CalcError::invalid_input(
            "to",
            input.to.name(),
            format!("Cannot convert {} to {}", input.from, input.to),
        ));
    }

    let (value, decimals) = match (input.from.factor(), input.to.factor()) {
        (Some(from), Some(to)) if input.from != input.to => (input.value / from * to, 4),
        (Some(_), Some(_)) => (input.value, 4),
        _ => (convert_temperature(input.value, input.from, input.to), 2),
    };

    Ok(ConversionResult {
        value,
        category,
        summary: format!(
            "{} {} = {} {}",
            input.value,
            input.from,
            format_fixed(value, decimals),
            input.to
        ),
    })
}
