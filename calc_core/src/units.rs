//! # Unit Types
//!
//! Newtype wrappers for the handful of physical units the calculators
//! convert between exactly (volume for concrete estimates, temperature for
//! the converter). Table-driven linear conversions (length, weight) live in
//! [`crate::calculations::conversion`].
//!
//! Wrappers serialize as bare numbers.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Celsius, CubicFeet, CubicYards, Fahrenheit};
//!
//! let slab = CubicFeet(54.0);
//! let yards: CubicYards = slab.into();
//! assert_eq!(yards.0, 2.0);
//!
//! let boiling: Fahrenheit = Celsius(100.0).into();
//! assert_eq!(boiling.0, 212.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Volume Units
// ============================================================================

/// Cubic feet per cubic yard
pub const CUBIC_FEET_PER_YARD: f64 = 27.0;

/// Cubic yards per cubic meter
pub const CUBIC_YARDS_PER_METER: f64 = 1.30795;

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicFeet(pub f64);

/// Volume in cubic yards
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicYards(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl From<CubicFeet> for CubicYards {
    fn from(cf: CubicFeet) -> Self {
        CubicYards(cf.0 / CUBIC_FEET_PER_YARD)
    }
}

impl From<CubicYards> for CubicFeet {
    fn from(cy: CubicYards) -> Self {
        CubicFeet(cy.0 * CUBIC_FEET_PER_YARD)
    }
}

impl From<CubicMeters> for CubicYards {
    fn from(m3: CubicMeters) -> Self {
        CubicYards(m3.0 * CUBIC_YARDS_PER_METER)
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

/// Temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

const KELVIN_OFFSET: f64 = 273.15;

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + KELVIN_OFFSET)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - KELVIN_OFFSET)
    }
}

impl From<Fahrenheit> for Kelvin {
    fn from(f: Fahrenheit) -> Self {
        Celsius::from(f).into()
    }
}

impl From<Kelvin> for Fahrenheit {
    fn from(k: Kelvin) -> Self {
        Celsius::from(k).into()
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(CubicFeet);
impl_arithmetic!(CubicYards);
impl_arithmetic!(CubicMeters);
