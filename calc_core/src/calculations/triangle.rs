//! # Triangle Solver
//!
//! Solves a triangle from its three side lengths (SSS).
//!
//! ## Method
//!
//! - Validity: every side positive and the triangle inequality holds
//!   strictly (a + b > c for every permutation). Degenerate triangles are
//!   rejected.
//! - Area: Heron's formula, A = √(s(s−a)(s−b)(s−c)) with s = (a+b+c)/2
//! - Angles: law of cosines
//! - Classification by side equality (exact comparison of the inputs)

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Relative tolerance for the right-angle check
const RIGHT_ANGLE_TOLERANCE: f64 = 1e-9;

/// Classification by side equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriangleKind {
    Equilateral,
    Isosceles,
    Scalene,
}

impl TriangleKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            TriangleKind::Equilateral => "Equilateral",
            TriangleKind::Isosceles => "Isosceles",
            TriangleKind::Scalene => "Scalene",
        }
    }
}

/// Three side lengths in any consistent unit.
///
/// ## JSON Example
///
/// ```json
/// { "a": 3.0, "b": 4.0, "c": 5.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleInput {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl TriangleInput {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        TriangleInput { a, b, c }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Side length must be a positive number",
                ));
            }
        }

        let (a, b, c) = (self.a, self.b, self.c);
        if a + b <= c || b + c <= a || a + c <= b {
            return Err(CalcError::invalid_input(
                "sides",
                format!("{}, {}, {}", a, b, c),
                "Invalid triangle: sum of any two sides must be greater than the third side",
            ));
        }
        Ok(())
    }

    pub fn perimeter(&self) -> f64 {
        self.a + self.b + self.c
    }
}

/// Solved triangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleResult {
    pub area: f64,
    pub perimeter: f64,
    pub kind: TriangleKind,
    /// Angle opposite side a (degrees)
    pub angle_a_deg: f64,
    /// Angle opposite side b (degrees)
    pub angle_b_deg: f64,
    /// Angle opposite side c (degrees)
    pub angle_c_deg: f64,
    /// One angle is 90° (within floating-point tolerance)
    pub is_right: bool,
}

/// Solve a triangle from three sides.
///
/// ```rust
/// use calc_core::calculations::triangle::{calculate, TriangleInput, TriangleKind};
///
/// let result = calculate(&TriangleInput::new(3.0, 4.0, 5.0)).unwrap();
/// assert_eq!(result.area, 6.0);
/// assert_eq!(result.kind, TriangleKind::Scalene);
/// assert!(result.is_right);
/// ```
pub fn calculate(input: &TriangleInput) -> CalcResult<TriangleResult> {
    input.validate()?;

    let (a, b, c) = (input.a, input.b, input.c);
    let perimeter = input.perimeter();
    let s = perimeter / 2.0;
    let area = (s * (s - a) * (s - b) * (s - c)).sqrt();

    let kind = if a == b && b == c {
        TriangleKind::Equilateral
    } else if a == b || b == c || a == c {
        TriangleKind::Isosceles
    } else {
        TriangleKind::Scalene
    };

    let angle_a_deg = opposite_angle_deg(a, b, c);
    let angle_b_deg = opposite_angle_deg(b, a, c);
    let angle_c_deg = 180.0 - angle_a_deg - angle_b_deg;

    let mut sides = [a, b, c];
    sides.sort_by(|x, y| x.total_cmp(y));
    let [short, mid, long] = sides;
    let is_right = ((short * short + mid * mid) - long * long).abs() <= RIGHT_ANGLE_TOLERANCE * long * long;

    Ok(TriangleResult {
        area,
        perimeter,
        kind,
        angle_a_deg,
        angle_b_deg,
        angle_c_deg,
        is_right,
    })
}

/// Angle opposite `side` given the two adjacent sides (law of cosines)
fn opposite_angle_deg(side: f64, adj1: f64, adj2: f64) -> f64 {
    let cos = (adj1 * adj1 + adj2 * adj2 - side * side) / (2.0 * adj1 * adj2);
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_triangle() {
        let result = calculate(&TriangleInput::new(3.0, 4.0, 5.0)).unwrap();
        assert!((result.area - 6.0).abs() < 1e-12);
        assert_eq!(result.perimeter, 12.0);
        assert!(result.is_right);
        assert!((result.angle_c_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_equilateral() {
        let result = calculate(&TriangleInput::new(2.0, 2.0, 2.0)).unwrap();
        assert_eq!(result.kind, TriangleKind::Equilateral);
        assert!((result.area - 3f64.sqrt()).abs() < 1e-12);
        assert!((result.angle_a_deg - 60.0).abs() < 1e-9);
        assert!(!result.is_right);
    }

    #[test]
    fn test_isosceles() {
        let result = calculate(&TriangleInput::new(5.0, 5.0, 8.0)).unwrap();
        assert_eq!(result.kind, TriangleKind::Isosceles);
        assert!((result.area - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_angles_sum_to_180() {
        let result = calculate(&TriangleInput::new(7.0, 9.0, 12.5)).unwrap();
        let sum = result.angle_a_deg + result.angle_b_deg + result.angle_c_deg;
        assert!((sum - 180.0).abs() < 1e-9);
        assert_eq!(result.kind, TriangleKind::Scalene);
    }

    #[test]
    fn test_triangle_inequality_rejected_for_every_permutation() {
        for (a, b, c) in [(1.0, 2.0, 3.0), (3.0, 1.0, 2.0), (2.0, 3.0, 1.0), (1.0, 1.0, 5.0)] {
            let err = calculate(&TriangleInput::new(a, b, c)).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "{} {} {}", a, b, c);
        }
    }

    #[test]
    fn test_non_positive_sides_rejected() {
        assert!(calculate(&TriangleInput::new(0.0, 4.0, 5.0)).is_err());
        assert!(calculate(&TriangleInput::new(3.0, -4.0, 5.0)).is_err());
        assert!(calculate(&TriangleInput::new(3.0, 4.0, f64::NAN)).is_err());
    }
}
