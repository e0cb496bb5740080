//! # Settings
//!
//! User defaults read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) is a valid configuration.
//!
//! ## Example
//!
//! ```toml
//! angle_mode = "radians"
//!
//! [keyboard]
//! blur_grace_ms = 150
//! scientific_shortcuts = true
//!
//! [password]
//! length = 24
//! symbols = false
//!
//! [random]
//! min = 1
//! max = 6
//!
//! [display]
//! decimal_places = 2
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calculations::password::PasswordInput;
use crate::calculations::random::{RandomInput, MAX_COUNT};
use crate::calculations::scientific::AngleMode;
use crate::errors::{CalcError, CalcResult};
use crate::keyboard::focus::FocusScope;
use crate::keyboard::KeyboardDispatcher;

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Angle unit the keypad and `scientific` start in
    pub angle_mode: AngleMode,
    pub keyboard: KeyboardSettings,
    pub password: PasswordSettings,
    pub random: RandomSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardSettings {
    /// Delay after focus leaves the keypad before keys stop counting
    pub blur_grace_ms: u64,
    /// Shift+S / Shift+C / Shift+T for sin / cos / tan
    pub scientific_shortcuts: bool,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        KeyboardSettings {
            blur_grace_ms: 100,
            scientific_shortcuts: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordSettings {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        PasswordSettings {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSettings {
    pub min: i64,
    pub max: i64,
    pub count: u32,
}

impl Default for RandomSettings {
    fn default() -> Self {
        RandomSettings { min: 1, max: 100, count: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimals for percentages, ratios and other rounded text output
    pub decimal_places: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings { decimal_places: 2 }
    }
}

impl Settings {
    /// Parse settings from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> CalcResult<Self> {
        let settings: Settings =
            toml::from_str(text).map_err(|e| CalcError::config_error(origin, e.to_string()))?;
        settings.validate().map_err(|e| CalcError::config_error(origin, e.to_string()))?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    ///
    /// A missing or unreadable file is an error here; callers that treat
    /// the file as optional should check for it first.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| CalcError::config_error(&origin, e.to_string()))?;
        let settings = Self::from_toml_str(&text, &origin)?;
        tracing::debug!(path = %origin, "loaded settings");
        Ok(settings)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError { reason: e.to_string() })
    }

    /// Reject values no calculator would accept
    pub fn validate(&self) -> CalcResult<()> {
        self.password_input().validate()?;
        if self.random.min >= self.random.max {
            return Err(CalcError::invalid_input(
                "random.max",
                self.random.max.to_string(),
                "Must be greater than random.min",
            ));
        }
        if self.random.count == 0 || self.random.count > MAX_COUNT {
            return Err(CalcError::invalid_input(
                "random.count",
                self.random.count.to_string(),
                format!("Must be between 1 and {}", MAX_COUNT),
            ));
        }
        if self.display.decimal_places > 10 {
            return Err(CalcError::invalid_input(
                "display.decimal_places",
                self.display.decimal_places.to_string(),
                "Must be 10 or fewer",
            ));
        }
        Ok(())
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.keyboard.blur_grace_ms)
    }

    /// Password request with the configured defaults
    pub fn password_input(&self) -> PasswordInput {
        PasswordInput {
            length: self.password.length,
            uppercase: self.password.uppercase,
            lowercase: self.password.lowercase,
            digits: self.password.digits,
            symbols: self.password.symbols,
        }
    }

    /// Random-number request with the configured defaults
    pub fn random_input(&self) -> RandomInput {
        RandomInput {
            min: self.random.min,
            max: self.random.max,
            count: self.random.count,
        }
    }

    /// Dispatcher configured from `[keyboard]`
    pub fn keyboard_dispatcher(&self, scope: FocusScope) -> KeyboardDispatcher {
        KeyboardDispatcher::new(scope)
            .with_blur_grace(self.blur_grace())
            .with_scientific_shortcuts(self.keyboard.scientific_shortcuts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn test_empty_file_is_defaults() {
        let settings = Settings::from_toml_str("", "inline").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.blur_grace(), Duration::from_millis(100));
        assert_eq!(settings.password.length, 16);
        assert_eq!((settings.random.min, settings.random.max, settings.random.count), (1, 100, 1));
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::from_toml_str(
            "angle_mode = \"radians\"\n[password]\nlength = 24\nsymbols = false\n",
            "inline",
        )
        .unwrap();
        assert_eq!(settings.angle_mode, AngleMode::Radians);
        assert_eq!(settings.password.length, 24);
        assert!(!settings.password.symbols);
        assert!(settings.password.digits);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = Settings::from_toml_str("angle_mode = [", "bad.toml").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        let err = Settings::from_toml_str("angle_mode = \"gradians\"", "bad.toml").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = Settings::from_toml_str("[random]\nmin = 10\nmax = 5\n", "inline").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        let err = Settings::from_toml_str("[password]\nlength = 2\n", "inline").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        let err = Settings::from_toml_str(
            "[password]\nuppercase = false\nlowercase = false\ndigits = false\nsymbols = false\n",
            "inline",
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_load_and_missing_file() {
        let path = temp_dir().join("pocketcalc_test_settings.toml");
        fs::write(&path, "[keyboard]\nblur_grace_ms = 250\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.blur_grace(), Duration::from_millis(250));
        let dispatcher = settings.keyboard_dispatcher(FocusScope::Container);
        assert_eq!(dispatcher.gate().grace(), Duration::from_millis(250));
        let _ = fs::remove_file(&path);

        let err = Settings::load(&temp_dir().join("pocketcalc_missing.toml")).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_toml_roundtrip() {
        let text = Settings::default().to_toml_string().unwrap();
        assert_eq!(Settings::from_toml_str(&text, "roundtrip").unwrap(), Settings::default());
    }
}
