//! # calc_core - Pocket Calculator Engine
//!
//! `calc_core` holds everything Pocketcalc computes: a set of independent
//! calculators, the keypad state machine behind the scientific calculator,
//! and the focus-gated keyboard dispatcher that drives it. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Calculators are pure functions from input to result
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Reproducible**: Randomized calculators take the RNG as an argument
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::keyboard::{focus::FocusScope, KeyInput, KeyboardDispatcher};
//! use calc_core::Keypad;
//! use std::time::Instant;
//!
//! let mut keypad = Keypad::new();
//! let mut keys = KeyboardDispatcher::new(FocusScope::Container);
//! keys.gate_mut().mount();
//! keys.gate_mut().on_focus();
//!
//! for c in ['7', '*', '6', '='] {
//!     keys.handle(&KeyInput::character(c), Instant::now(), &mut keypad);
//! }
//! assert_eq!(keypad.display(), "42");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Every calculator, plus JSON dispatch over all of them
//! - [`keyboard`] - Key-to-action mapping and focus gating
//! - [`keypad`] - Display and pending-operation state
//! - [`catalog`] - Calculator names, slugs, and descriptions
//! - [`cache_policy`] - Cache-Control selection for crawlers and visitors
//! - [`settings`] - TOML user defaults
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod cache_policy;
pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod keyboard;
pub mod keypad;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, CalculationInput, CalculationOutput};
pub use catalog::CalculatorKind;
pub use errors::{CalcError, CalcResult};
pub use keyboard::{CalculatorHandler, KeyboardDispatcher};
pub use keypad::Keypad;
pub use settings::Settings;
