//! # Age Calculation
//!
//! Exact age in years, months, and days between a birth date and a target
//! date (usually today).
//!
//! ## Method
//!
//! Count whole months from the birth date to the target date, stepping back
//! one month when the target day is earlier in its month than the birth day.
//! The remaining days are counted from the last monthly anniversary. This
//! is the usual borrow rule (add the length of the month before the target
//! month) except that an anniversary falling on a day the month does not
//! have (Jan 31 → Feb) is pinned to the month's last day instead of
//! producing a negative day count.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use calc_core::calculations::age::{calculate, AgeInput};
//!
//! let input = AgeInput {
//!     birth_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
//!     target_date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
//! };
//! let age = calculate(&input).unwrap();
//! assert_eq!((age.years, age.months, age.days), (25, 0, 19));
//! ```

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Birth date and the date to measure the age at.
///
/// ## JSON Example
///
/// ```json
/// { "birth_date": "2000-01-01", "target_date": "2025-01-20" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeInput {
    pub birth_date: NaiveDate,
    pub target_date: NaiveDate,
}

impl AgeInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.birth_date > self.target_date {
            return Err(CalcError::invalid_input(
                "birth_date",
                self.birth_date.to_string(),
                "Birth date must not be after the target date",
            ));
        }
        Ok(())
    }
}

/// Age broken down into calendar units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeResult {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    /// Total days between the two dates
    pub total_days: i64,
}

/// Calculate an age.
pub fn calculate(input: &AgeInput) -> CalcResult<AgeResult> {
    input.validate()?;

    let birth = input.birth_date;
    let target = input.target_date;

    let mut whole_months =
        (target.year() - birth.year()) * 12 + (target.month() as i32 - birth.month() as i32);
    if target.day() < birth.day() {
        whole_months -= 1;
    }

    let anniversary = birth
        .checked_add_months(Months::new(whole_months as u32))
        .ok_or_else(|| CalcError::calculation_failed("age", "Date is out of range"))?;
    let days = (target - anniversary).num_days() as i32;

    Ok(AgeResult {
        years: whole_months / 12,
        months: whole_months % 12,
        days,
        total_days: (target - birth).num_days(),
    })
}
