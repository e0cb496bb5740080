//! # Calculations
//!
//! This module contains every calculator. Each one follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! Randomized calculators ([`password`], [`random`]) take the RNG as a
//! second argument.
//!
//! ## Available Calculations
//!
//! - [`scientific`] - Operators, scientific functions, number formatting
//! - [`percentage`] - Percent of, ratio, and percentage change
//! - [`fraction`] - Fraction arithmetic with reduction
//! - [`age`] - Age in years, months, and days
//! - [`date`] - Days between dates, adding days to a date
//! - [`time`] - Adding and subtracting durations
//! - [`hours`] - Hours worked with a break
//! - [`gpa`] - Credit-weighted GPA
//! - [`grade`] - Overall grade and letter
//! - [`triangle`] - Triangle from three sides
//! - [`subnet`] - IPv4 subnet from address and prefix
//! - [`password`] - Random password generation
//! - [`random`] - Random integers in a range
//! - [`statistics`] - Mean, variance, standard deviation
//! - [`concrete`] - Slab volume and bag estimate
//! - [`conversion`] - Length, weight, and temperature conversion
//!
//! ## JSON Dispatch
//!
//! [`CalculationInput`] wraps every input under a `"calculator"` tag so a
//! single JSON document can name the calculator and its parameters:
//!
//! ```rust
//! use calc_core::calculations::{evaluate, CalculationInput, CalculationOutput};
//!
//! let input: CalculationInput = serde_json::from_str(
//!     r#"{ "calculator": "percentage", "mode": "of", "x": 8, "y": 250 }"#,
//! ).unwrap();
//! let output = evaluate(&input, &mut rand::thread_rng()).unwrap();
//! assert!(matches!(output, CalculationOutput::Percentage(r) if r.value == 20.0));
//! ```

pub mod age;
pub mod concrete;
pub mod conversion;
pub mod date;
pub mod fraction;
pub mod gpa;
pub mod grade;
pub mod hours;
pub mod password;
pub mod percentage;
pub mod random;
pub mod scientific;
pub mod statistics;
pub mod subnet;
pub mod time;
pub mod triangle;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::CalculatorKind;
use crate::errors::CalcResult;

// Re-export commonly used types
pub use age::{AgeInput, AgeResult};
pub use concrete::{ConcreteInput, ConcreteResult};
pub use conversion::{ConversionInput, ConversionResult};
pub use date::{DateInput, DateResult};
pub use fraction::{Fraction, FractionInput, FractionResult};
pub use gpa::{GpaInput, GpaResult, GpaSheet};
pub use grade::{GradeInput, GradeResult, GradeSheet};
pub use hours::{HoursInput, HoursResult};
pub use password::{PasswordInput, PasswordResult};
pub use percentage::{PercentageInput, PercentageResult};
pub use random::{RandomInput, RandomResult};
pub use scientific::{AngleMode, Operator, ScientificFunction, ScientificInput, ScientificResult};
pub use statistics::{StatisticsInput, StatisticsResult};
pub use subnet::{SubnetInput, SubnetResult};
pub use time::{TimeInput, TimeResult};
pub use triangle::{TriangleInput, TriangleResult};

/// Enum wrapper for all calculation inputs.
///
/// The `calculator` tag selects the variant; the remaining fields are the
/// calculator's own input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationInput {
    Scientific(ScientificInput),
    Percentage(PercentageInput),
    Fraction(FractionInput),
    Age(AgeInput),
    Date(DateInput),
    Time(TimeInput),
    Hours(HoursInput),
    Gpa(GpaInput),
    Grade(GradeInput),
    Triangle(TriangleInput),
    Subnet(SubnetInput),
    Password(PasswordInput),
    Random(RandomInput),
    Statistics(StatisticsInput),
    Concrete(ConcreteInput),
    Conversion(ConversionInput),
}

/// Result of [`evaluate`], tagged like [`CalculationInput`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationOutput {
    Scientific(ScientificResult),
    Percentage(PercentageResult),
    Fraction(FractionResult),
    Age(AgeResult),
    Date(DateResult),
    Time(TimeResult),
    Hours(HoursResult),
    Gpa(GpaResult),
    Grade(GradeResult),
    Triangle(TriangleResult),
    Subnet(SubnetResult),
    Password(PasswordResult),
    Random(RandomResult),
    Statistics(StatisticsResult),
    Concrete(ConcreteResult),
    Conversion(ConversionResult),
}

impl CalculationInput {
    /// Which calculator this input is for
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationInput::Scientific(_) => CalculatorKind::Scientific,
            CalculationInput::Percentage(_) => CalculatorKind::Percentage,
            CalculationInput::Fraction(_) => CalculatorKind::Fraction,
            CalculationInput::Age(_) => CalculatorKind::Age,
            CalculationInput::Date(_) => CalculatorKind::Date,
            CalculationInput::Time(_) => CalculatorKind::Time,
            CalculationInput::Hours(_) => CalculatorKind::Hours,
            CalculationInput::Gpa(_) => CalculatorKind::Gpa,
            CalculationInput::Grade(_) => CalculatorKind::Grade,
            CalculationInput::Triangle(_) => CalculatorKind::Triangle,
            CalculationInput::Subnet(_) => CalculatorKind::Subnet,
            CalculationInput::Password(_) => CalculatorKind::Password,
            CalculationInput::Random(_) => CalculatorKind::Random,
            CalculationInput::Statistics(_) => CalculatorKind::Statistics,
            CalculationInput::Concrete(_) => CalculatorKind::Concrete,
            CalculationInput::Conversion(_) => CalculatorKind::Conversion,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        self.kind().title()
    }
}

/// Run whichever calculator `input` names.
///
/// `rng` is only drawn from by the randomized calculators.
pub fn evaluate<R: Rng + ?Sized>(input: &CalculationInput, rng: &mut R) -> CalcResult<CalculationOutput> {
    tracing::debug!(calculator = input.calc_type(), "evaluating");
    let output = match input {
        CalculationInput::Scientific(i) => CalculationOutput::Scientific(scientific::calculate(i)?),
        CalculationInput::Percentage(i) => CalculationOutput::Percentage(percentage::calculate(i)?),
        CalculationInput::Fraction(i) => CalculationOutput::Fraction(fraction::calculate(i)?),
        CalculationInput::Age(i) => CalculationOutput::Age(age::calculate(i)?),
        CalculationInput::Date(i) => CalculationOutput::Date(date::calculate(i)?),
        CalculationInput::Time(i) => CalculationOutput::Time(time::calculate(i)?),
        CalculationInput::Hours(i) => CalculationOutput::Hours(hours::calculate(i)?),
        CalculationInput::Gpa(i) => CalculationOutput::Gpa(gpa::calculate(i)?),
        CalculationInput::Grade(i) => CalculationOutput::Grade(grade::calculate(i)?),
        CalculationInput::Triangle(i) => CalculationOutput::Triangle(triangle::calculate(i)?),
        CalculationInput::Subnet(i) => CalculationOutput::Subnet(subnet::calculate(i)?),
        CalculationInput::Password(i) => CalculationOutput::Password(password::calculate(i, rng)?),
        CalculationInput::Random(i) => CalculationOutput::Random(random::calculate(i, rng)?),
        CalculationInput::Statistics(i) => CalculationOutput::Statistics(statistics::calculate(i)?),
        CalculationInput::Concrete(i) => CalculationOutput::Concrete(concrete::calculate(i)?),
        CalculationInput::Conversion(i) => CalculationOutput::Conversion(conversion::calculate(i)?),
    };
    Ok(output)
}
