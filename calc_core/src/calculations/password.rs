//! # Password Generator
//!
//! Builds a character set from the selected classes and samples each
//! character uniformly from it. The random source is passed in, so callers
//! choose between `rand::thread_rng()` and a seeded generator.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;

/// A class of characters a password may draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digits,
    Symbols,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digits,
        CharacterClass::Symbols,
    ];

    pub fn characters(&self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharacterClass::Lowercase => "abcdefghijklmnopqrstuvwxyz",
            CharacterClass::Digits => "0123456789",
            CharacterClass::Symbols => "!@#$%^&*()_+-=[]{}|;:,.<>?",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "Uppercase (A-Z)",
            CharacterClass::Lowercase => "Lowercase (a-z)",
            CharacterClass::Digits => "Numbers (0-9)",
            CharacterClass::Symbols => "Symbols (!@#$...)",
        }
    }
}

/// Password options.
///
/// ## JSON Example
///
/// ```json
/// { "length": 16, "uppercase": true, "lowercase": true, "digits": true, "symbols": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordInput {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordInput {
    fn default() -> Self {
        PasswordInput {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl PasswordInput {
    /// Selected classes in a fixed order
    pub fn classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| match class {
                CharacterClass::Uppercase => self.uppercase,
                CharacterClass::Lowercase => self.lowercase,
                CharacterClass::Digits => self.digits,
                CharacterClass::Symbols => self.symbols,
            })
            .collect()
    }

    /// Union of the selected classes
    pub fn charset(&self) -> Vec<char> {
        self.classes()
            .iter()
            .flat_map(|class| class.characters().chars())
            .collect()
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(CalcError::invalid_input(
                "length",
                self.length.to_string(),
                format!("Length must be between {} and {}", MIN_LENGTH, MAX_LENGTH),
            ));
        }
        if self.classes().is_empty() {
            return Err(CalcError::invalid_input(
                "classes",
                "none",
                "Select at least one character class",
            ));
        }
        Ok(())
    }
}

/// Generated password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResult {
    pub password: String,
    /// Size of the character set sampled from
    pub charset_size: usize,
    /// length × log2(charset size)
    pub entropy_bits: f64,
}

/// Generate a password.
///
/// ```rust
/// use calc_core::calculations::password::{calculate, PasswordInput};
///
/// let result = calculate(&PasswordInput::default(), &mut rand::thread_rng()).unwrap();
/// assert_eq!(result.password.chars().count(), 16);
/// ```
pub fn calculate<R: Rng + ?Sized>(input: &PasswordInput, rng: &mut R) -> CalcResult<PasswordResult> {
    input.validate()?;

    let charset = input.charset();
    let mut password = String::with_capacity(input.length);
    for _ in 0..input.length {
        let c = charset
            .choose(rng)
            .ok_or_else(|| CalcError::Internal {
                message: "character set is empty".to_string(),
            })?;
        password.push(*c);
    }

    let entropy_bits = input.length as f64 * (charset.len() as f64).log2();
    tracing::debug!(length = input.length, charset = charset.len(), "password generated");

    Ok(PasswordResult {
        password,
        charset_size: charset.len(),
        entropy_bits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_all_classes_length_and_charset() {
        let input = PasswordInput {
            length: 64,
            ..Default::default()
        };
        let charset = input.charset();
        let result = calculate(&input, &mut rng()).unwrap();
        assert_eq!(result.password.chars().count(), 64);
        assert!(result.password.chars().all(|c| charset.contains(&c)));
        assert_eq!(result.charset_size, 26 + 26 + 10 + 26);
    }

    #[test]
    fn test_single_class() {
        let input = PasswordInput {
            length: 32,
            uppercase: false,
            lowercase: false,
            digits: true,
            symbols: false,
        };
        let result = calculate(&input, &mut rng()).unwrap();
        assert!(result.password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_empty_charset_rejected() {
        let input = PasswordInput {
            length: 16,
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
        };
        let err = calculate(&input, &mut rng()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_length_bounds() {
        for length in [3, 129] {
            let input = PasswordInput {
                length,
                ..Default::default()
            };
            assert!(calculate(&input, &mut rng()).is_err());
        }
        for length in [MIN_LENGTH, MAX_LENGTH] {
            let input = PasswordInput {
                length,
                ..Default::default()
            };
            assert_eq!(calculate(&input, &mut rng()).unwrap().password.len(), length);
        }
    }

    #[test]
    fn test_seeded_generation_is_repeatable() {
        let input = PasswordInput::default();
        let a = calculate(&input, &mut rng()).unwrap();
        let b = calculate(&input, &mut rng()).unwrap();
        assert_eq!(a.password, b.password);
    }

    #[test]
    fn test_entropy() {
        let input = PasswordInput {
            length: 10,
            uppercase: false,
            lowercase: false,
            digits: true,
            symbols: false,
        };
        let result = calculate(&input, &mut rng()).unwrap();
        assert!((result.entropy_bits - 10.0 * 10f64.log2()).abs() < 1e-9);
    }
}
