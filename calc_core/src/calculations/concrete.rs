//! # Concrete Volume Calculation
//!
//! Slab volume from length × width × depth, plus an estimate of 80 lb
//! premix bags.
//!
//! ## Assumptions
//!
//! - Dimensions in feet give a volume in cubic yards.
//! - Dimensions in meters give a volume in cubic meters.
//! - 45 bags per cubic yard. Metric volumes are converted to cubic yards
//!   before applying the bag rate.
//! - Bags are rounded up.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{CubicFeet, CubicMeters, CubicYards};

/// 80 lb bags per cubic yard of concrete
pub const BAGS_PER_CUBIC_YARD: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionUnit {
    #[default]
    Feet,
    Meters,
}

impl DimensionUnit {
    pub fn volume_label(&self) -> &'static str {
        match self {
            DimensionUnit::Feet => "cubic yards",
            DimensionUnit::Meters => "cubic meters",
        }
    }
}

/// ## JSON Example
///
/// ```json
/// { "length": 10.0, "width": 10.0, "depth": 0.5, "unit": "feet" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteInput {
    pub length: f64,
    pub width: f64,
    pub depth: f64,
    #[serde(default)]
    pub unit: DimensionUnit,
}

impl ConcreteInput {
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("length", self.length), ("width", self.width), ("depth", self.depth)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteResult {
    /// Cubic yards (feet input) or cubic meters (meters input)
    pub volume: f64,
    pub unit: DimensionUnit,
    pub cubic_yards: CubicYards,
    pub bags: u64,
}

/// Estimate concrete for a slab.
///
/// ```rust
/// use calc_core::calculations::concrete::{calculate, ConcreteInput, DimensionUnit};
///
/// let result = calculate(&ConcreteInput { length: 9.0, width: 6.0, depth: 0.5, unit: DimensionUnit::Feet }).unwrap();
/// assert_eq!(result.volume, 1.0);
/// assert_eq!(result.bags, 45);
/// ```
pub fn calculate(input: &ConcreteInput) -> CalcResult<ConcreteResult> {
    input.validate()?;
    let raw = input.length * input.width * input.depth;

    let (volume, cubic_yards) = match input.unit {
        DimensionUnit::Feet => {
            let yards = CubicYards::from(CubicFeet(raw));
            (yards.value(), yards)
        }
        DimensionUnit::Meters => (raw, CubicYards::from(CubicMeters(raw))),
    };

    let bags = (cubic_yards.value() * BAGS_PER_CUBIC_YARD).ceil() as u64;
    Ok(ConcreteResult {
        volume,
        unit: input.unit,
        cubic_yards,
        bags,
    })
}
