//! Calibration settings.
//!
//! The defaults reproduce the traditional reckoning for Japan. A TOML document can override any
//! field:
//!
//! ```toml
//! dawn_dusk_altitude = -7.3611
//! equation_of_time_sign = "subtract"
//! default_meridian = 135.0
//!
//! [meridians]
//! "Asia/Seoul" = 127.5
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{check_altitude, check_longitude};
use crate::noon::EquationOfTimeSign;
use crate::types::Horizon;
use crate::zone::{DEFAULT_STANDARD_MERIDIAN, MeridianTable};
use crate::{Error, Result};

/// Calibration for the astronomical branch of the computation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdoConfig {
    /// Solar altitude in degrees that defines dawn and dusk.
    pub dawn_dusk_altitude: f64,
    /// Solar altitude in degrees that defines sunrise and sunset.
    pub sunrise_sunset_altitude: f64,
    /// How the equation of time is applied to civil noon.
    pub equation_of_time_sign: EquationOfTimeSign,
    /// Standard meridian for zones that cannot be resolved otherwise.
    pub default_meridian: f64,
    /// Per-zone standard meridian overrides, in degrees east.
    pub meridians: HashMap<String, f64>,
}

impl Default for EdoConfig {
    fn default() -> Self {
        Self {
            dawn_dusk_altitude: Horizon::DawnDusk.altitude(),
            sunrise_sunset_altitude: Horizon::SunriseSunset.altitude(),
            equation_of_time_sign: EquationOfTimeSign::default(),
            default_meridian: DEFAULT_STANDARD_MERIDIAN,
            meridians: HashMap::new(),
        }
    }
}

impl EdoConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns `Config` for malformed TOML or unknown keys, and the matching validation error
    /// for out-of-range altitudes or meridians.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        let config: Self = toml::from_str(document).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Checks altitudes and meridians are within range.
    ///
    /// # Errors
    /// Returns `InvalidAltitude` or `InvalidLongitude`.
    pub fn validate(&self) -> Result<()> {
        check_altitude(self.dawn_dusk_altitude)?;
        check_altitude(self.sunrise_sunset_altitude)?;
        check_longitude(self.default_meridian)?;
        for meridian in self.meridians.values() {
            check_longitude(*meridian)?;
        }
        Ok(())
    }

    /// Horizon used for dawn and dusk.
    #[must_use]
    pub const fn dawn_dusk_horizon(&self) -> Horizon {
        Horizon::Custom(self.dawn_dusk_altitude)
    }

    /// Horizon used for sunrise and sunset.
    #[must_use]
    pub const fn sunrise_sunset_horizon(&self) -> Horizon {
        Horizon::Custom(self.sunrise_sunset_altitude)
    }

    /// Builds the zone → meridian table described by this configuration.
    #[must_use]
    pub fn meridian_table(&self) -> MeridianTable {
        MeridianTable::new(self.meridians.clone(), self.default_meridian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EdoConfig::default();
        assert!((config.dawn_dusk_altitude + 7.361_111).abs() < 1e-6);
        assert_eq!(config.sunrise_sunset_altitude, 0.0);
        assert_eq!(config.equation_of_time_sign, EquationOfTimeSign::Subtract);
        assert_eq!(config.default_meridian, 135.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = EdoConfig::from_toml_str(
            r#"
            equation_of_time_sign = "add"

            [meridians]
            "Asia/Seoul" = 127.5
            "#,
        )
        .unwrap();

        assert_eq!(config.equation_of_time_sign, EquationOfTimeSign::Add);
        assert_eq!(config.meridians.get("Asia/Seoul"), Some(&127.5));
        assert_eq!(config.default_meridian, 135.0);
        assert!((config.dawn_dusk_altitude + 7.361_111).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            EdoConfig::from_toml_str("dawn_altitude = -6.0"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            EdoConfig::from_toml_str("dawn_dusk_altitude = -120.0"),
            Err(Error::InvalidAltitude { .. })
        ));
        assert!(matches!(
            EdoConfig::from_toml_str("[meridians]\n\"X\" = 200.0"),
            Err(Error::InvalidLongitude { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EdoConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
