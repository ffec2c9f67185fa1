// In: src/config.rs

//! The single source of truth for how the pandera dtypes library resolves its
//! platform defaults.
//!
//! A `DtypesConfig` is created once at the application boundary (e.g., from a
//! JSON document or the Python `initialize` call) and handed to
//! `platform::init`. After that the resolved defaults are process-wide and
//! immutable, so the config is never consulted again.

use serde::{Deserialize, Serialize};

use crate::error::DtypeError;

//==================================================================================
// I. Probe Selection
//==================================================================================

/// Selects which host library is asked for a default integer/float dtype.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    /// Arrow's JSON schema inference, applied to the literal samples `1` and `1.0`.
    Arrow,

    /// The platform C `long` and `double` widths, which is what numpy's
    /// `np.dtype(int)` and `np.dtype(float)` follow.
    Native,

    /// `pd.Series([1]).dtype` in an embedded Python interpreter.
    /// Requires the `python` feature.
    Pandas,

    /// `np.dtype(int)` in an embedded Python interpreter.
    /// Requires the `python` feature.
    Numpy,
}

impl ProbeKind {
    /// The snake_case name used in configs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::Arrow => "arrow",
            ProbeKind::Native => "native",
            ProbeKind::Pandas => "pandas",
            ProbeKind::Numpy => "numpy",
        }
    }
}

impl std::str::FromStr for ProbeKind {
    type Err = DtypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arrow" => Ok(ProbeKind::Arrow),
            "native" => Ok(ProbeKind::Native),
            "pandas" => Ok(ProbeKind::Pandas),
            "numpy" => Ok(ProbeKind::Numpy),
            other => Err(DtypeError::UnsupportedProbe(other.to_string())),
        }
    }
}

//==================================================================================
// II. The Unified DtypesConfig
//==================================================================================

/// Configuration for resolving the platform-default dtypes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DtypesConfig {
    /// The probe answering for the dataframe library. Its answers back
    /// `PandasDtype::str_alias` and therefore equality of `Int`/`Float`.
    #[serde(default = "default_frame_probe")]
    pub frame_probe: ProbeKind,

    /// The probe answering for the array library. Its answers back
    /// `PandasDtype::numpy_str_alias`.
    #[serde(default = "default_array_probe")]
    pub array_probe: ProbeKind,
}

impl Default for DtypesConfig {
    fn default() -> Self {
        Self {
            frame_probe: default_frame_probe(),
            array_probe: default_array_probe(),
        }
    }
}

impl DtypesConfig {
    /// Asks the live pandas and numpy installations directly.
    pub fn python() -> Self {
        Self {
            frame_probe: ProbeKind::Pandas,
            array_probe: ProbeKind::Numpy,
        }
    }

    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, DtypeError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Helper for `serde` to provide a default for `frame_probe`.
fn default_frame_probe() -> ProbeKind {
    ProbeKind::Arrow
}

/// Helper for `serde` to provide a default for `array_probe`.
fn default_array_probe() -> ProbeKind {
    ProbeKind::Native
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_arrow_and_native() {
        let config = DtypesConfig::default();
        assert_eq!(config.frame_probe, ProbeKind::Arrow);
        assert_eq!(config.array_probe, ProbeKind::Native);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = DtypesConfig::from_json_str(r#"{"array_probe": "numpy"}"#).unwrap();
        assert_eq!(config.frame_probe, ProbeKind::Arrow);
        assert_eq!(config.array_probe, ProbeKind::Numpy);

        let empty = DtypesConfig::from_json_str("{}").unwrap();
        assert_eq!(empty, DtypesConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_probe() {
        let result = DtypesConfig::from_json_str(r#"{"frame_probe": "polars"}"#);
        assert!(matches!(result, Err(DtypeError::SerdeJson(_))));
    }

    #[test]
    fn test_config_serializes_snake_case() {
        let json = serde_json::to_string(&DtypesConfig::python()).unwrap();
        assert_eq!(json, r#"{"frame_probe":"pandas","array_probe":"numpy"}"#);
    }

    #[test]
    fn test_probe_kind_from_str() {
        assert_eq!("Arrow".parse::<ProbeKind>().unwrap(), ProbeKind::Arrow);
        assert_eq!("numpy".parse::<ProbeKind>().unwrap(), ProbeKind::Numpy);
        assert!(matches!(
            "polars".parse::<ProbeKind>(),
            Err(DtypeError::UnsupportedProbe(name)) if name == "polars"
        ));
    }
}
