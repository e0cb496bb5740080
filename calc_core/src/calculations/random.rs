//! # Random Number Generation
//!
//! Uniform integers in an inclusive range. The caller supplies the RNG so
//! results are reproducible under a seeded generator.
//!
//! Requests for more than [`MAX_COUNT`] numbers are capped at that count.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Most numbers produced by one request
pub const MAX_COUNT: u32 = 100;

/// ## JSON Example
///
/// ```json
/// { "min": 1, "max": 6, "count": 3 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomInput {
    pub min: i64,
    pub max: i64,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl RandomInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.min >= self.max {
            return Err(CalcError::invalid_input(
                "max",
                self.max.to_string(),
                format!("Maximum must be greater than minimum ({})", self.min),
            ));
        }
        if self.count == 0 {
            return Err(CalcError::invalid_input("count", "0", "Generate at least one number"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomResult {
    pub numbers: Vec<i64>,
}

/// Generate random integers in `[min, max]`.
///
/// ```rust
/// use rand::{rngs::StdRng, SeedableRng};
/// use calc_core::calculations::random::{calculate, RandomInput};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let result = calculate(&RandomInput { min: 1, max: 6, count: 10 }, &mut rng).unwrap();
/// assert_eq!(result.numbers.len(), 10);
/// assert!(result.numbers.iter().all(|n| (1..=6).contains(n)));
/// ```
pub fn calculate<R: Rng + ?Sized>(input: &RandomInput, rng: &mut R) -> CalcResult<RandomResult> {
    input.validate()?;
    let count = input.count.min(MAX_COUNT);
    let numbers = (0..count).map(|_| rng.gen_range(input.min..=input.max)).collect();
    Ok(RandomResult { numbers })
}
