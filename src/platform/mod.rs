// ====================================================================================
// ARCHITECTURAL OVERVIEW: Platform Defaults
// ====================================================================================
//
// `PandasDtype::Int` and `PandasDtype::Float` have no fixed width: they mean
// "whatever the host library picks for a bare literal on this platform". This
// module resolves those widths exactly once per process and caches them.
//
//   1. [DtypesConfig]            -> selects a probe for the frame and array library
//         |
//         `-> 2. [DtypeProbe]    -> reports a raw dtype string, e.g. "int64"
//                   |
//                   `-> 3. [PlatformDefaults::resolve] -> validates each string
//                             is a concrete width and builds the record
//                             |
//                             `-> 4. [OnceLock]       -> immutable for the rest of
//                                                        the process
//
// Readers never lock: after step 4 every lookup is a plain shared read.
// ====================================================================================

pub mod probe;

use std::sync::OnceLock;

use serde::Serialize;

use crate::config::{DtypesConfig, ProbeKind};
use crate::error::DtypeError;
use crate::types::PandasDtype;

pub use probe::{ArrowProbe, DtypeProbe, NativeProbe};
#[cfg(feature = "python")]
pub use probe::{NumpyProbe, PandasProbe};

static DEFAULTS: OnceLock<PlatformDefaults> = OnceLock::new();

/// The default integer and float dtypes of the host libraries.
///
/// Every field holds a concrete-width dtype, never the generic `Int`/`Float`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDefaults {
    /// What the dataframe library assigns to `[1]`. Backs `PandasDtype::Int`.
    pub frame_int: PandasDtype,
    /// What the dataframe library assigns to `[1.0]`. Backs `PandasDtype::Float`.
    pub frame_float: PandasDtype,
    /// What the array library uses for `int`.
    pub array_int: PandasDtype,
    /// What the array library uses for `float`.
    pub array_float: PandasDtype,
}

impl PlatformDefaults {
    /// Runs the probes selected by `config` and validates their answers.
    pub fn resolve(config: &DtypesConfig) -> Result<Self, DtypeError> {
        let frame_probe = probe_for(config.frame_probe)?;
        let array_probe = probe_for(config.array_probe)?;
        Self::resolve_with(frame_probe.as_ref(), array_probe.as_ref())
    }

    /// Like [`PlatformDefaults::resolve`], but with caller-supplied probes.
    pub fn resolve_with(
        frame_probe: &dyn DtypeProbe,
        array_probe: &dyn DtypeProbe,
    ) -> Result<Self, DtypeError> {
        let defaults = Self {
            frame_int: concrete_int(frame_probe, frame_probe.default_int()?)?,
            frame_float: concrete_float(frame_probe, frame_probe.default_float()?)?,
            array_int: concrete_int(array_probe, array_probe.default_int()?)?,
            array_float: concrete_float(array_probe, array_probe.default_float()?)?,
        };

        log::info!(
            "Resolved platform defaults: frame ({}) int={} float={}, array ({}) int={} float={}",
            frame_probe.name(),
            defaults.frame_int,
            defaults.frame_float,
            array_probe.name(),
            defaults.array_int,
            defaults.array_float,
        );
        Ok(defaults)
    }

    /// The C ABI widths for both libraries. Cannot fail.
    pub fn native() -> Self {
        let int = NativeProbe::int_dtype();
        let float = NativeProbe::float_dtype();
        Self {
            frame_int: int,
            frame_float: float,
            array_int: int,
            array_float: float,
        }
    }
}

fn probe_for(kind: ProbeKind) -> Result<Box<dyn DtypeProbe>, DtypeError> {
    match kind {
        ProbeKind::Arrow => Ok(Box::new(ArrowProbe)),
        ProbeKind::Native => Ok(Box::new(NativeProbe)),
        #[cfg(feature = "python")]
        ProbeKind::Pandas => Ok(Box::new(PandasProbe)),
        #[cfg(feature = "python")]
        ProbeKind::Numpy => Ok(Box::new(NumpyProbe)),
        #[cfg(not(feature = "python"))]
        other => Err(DtypeError::UnsupportedProbe(other.as_str().to_string())),
    }
}

fn concrete_int(probe: &dyn DtypeProbe, alias: String) -> Result<PandasDtype, DtypeError> {
    match PandasDtype::from_str_alias(&alias) {
        Some(dtype) if dtype.is_int() && dtype.is_concrete_width() => Ok(dtype),
        _ => Err(DtypeError::UnrecognizedDefault {
            probe: probe.name().to_string(),
            alias,
        }),
    }
}

fn concrete_float(probe: &dyn DtypeProbe, alias: String) -> Result<PandasDtype, DtypeError> {
    match PandasDtype::from_str_alias(&alias) {
        Some(dtype) if dtype.is_float() && dtype.is_concrete_width() => Ok(dtype),
        _ => Err(DtypeError::UnrecognizedDefault {
            probe: probe.name().to_string(),
            alias,
        }),
    }
}

//==================================================================================
// Process-wide access
//==================================================================================

/// Resolves the defaults with `config` and installs them for the process.
///
/// Fails with `DtypeError::AlreadyInitialized` if the defaults were already
/// installed, either by an earlier `init` or lazily by [`defaults`].
pub fn init(config: &DtypesConfig) -> Result<&'static PlatformDefaults, DtypeError> {
    if DEFAULTS.get().is_some() {
        return Err(DtypeError::AlreadyInitialized);
    }
    let resolved = PlatformDefaults::resolve(config)?;
    DEFAULTS
        .set(resolved)
        .map_err(|_| DtypeError::AlreadyInitialized)?;
    Ok(defaults())
}

/// The process-wide defaults, resolved with `DtypesConfig::default()` on first
/// use if [`init`] was never called. Falls back to [`PlatformDefaults::native`]
/// if probing fails.
pub fn defaults() -> &'static PlatformDefaults {
    DEFAULTS.get_or_init(|| {
        PlatformDefaults::resolve(&DtypesConfig::default()).unwrap_or_else(|e| {
            log::warn!("Falling back to native platform defaults: {}", e);
            PlatformDefaults::native()
        })
    })
}

/// Returns `true` once the defaults have been installed.
pub fn is_initialized() -> bool {
    DEFAULTS.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe {
        int: &'static str,
        float: &'static str,
    }

    impl DtypeProbe for FixedProbe {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn default_int(&self) -> Result<String, DtypeError> {
            Ok(self.int.to_string())
        }

        fn default_float(&self) -> Result<String, DtypeError> {
            Ok(self.float.to_string())
        }
    }

    struct FailingProbe;

    impl DtypeProbe for FailingProbe {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn default_int(&self) -> Result<String, DtypeError> {
            Err(DtypeError::ProbeFailed {
                probe: "failing".to_string(),
                reason: "no interpreter".to_string(),
            })
        }

        fn default_float(&self) -> Result<String, DtypeError> {
            self.default_int()
        }
    }

    #[test]
    fn test_resolve_with_fixed_probes() {
        let frame = FixedProbe {
            int: "int64",
            float: "float64",
        };
        let array = FixedProbe {
            int: "int32",
            float: "float64",
        };
        let defaults = PlatformDefaults::resolve_with(&frame, &array).unwrap();
        assert_eq!(defaults.frame_int.value(), "int64");
        assert_eq!(defaults.frame_float.value(), "float64");
        assert_eq!(defaults.array_int.value(), "int32");
        assert_eq!(defaults.array_float.value(), "float64");
    }

    #[test]
    fn test_resolve_rejects_generic_aliases() {
        let generic = FixedProbe {
            int: "int",
            float: "float64",
        };
        let result = PlatformDefaults::resolve_with(&generic, &NativeProbe);
        assert!(matches!(
            result,
            Err(DtypeError::UnrecognizedDefault { ref alias, .. }) if alias == "int"
        ));
    }

    #[test]
    fn test_resolve_rejects_mismatched_kinds() {
        let swapped = FixedProbe {
            int: "float64",
            float: "int64",
        };
        assert!(PlatformDefaults::resolve_with(&swapped, &NativeProbe).is_err());

        let unknown = FixedProbe {
            int: "Int64",
            float: "float64",
        };
        assert!(PlatformDefaults::resolve_with(&unknown, &NativeProbe).is_err());
    }

    #[test]
    fn test_resolve_propagates_probe_failure() {
        let result = PlatformDefaults::resolve_with(&FailingProbe, &NativeProbe);
        assert!(matches!(result, Err(DtypeError::ProbeFailed { .. })));
    }

    #[test]
    fn test_resolve_default_config() {
        let defaults = PlatformDefaults::resolve(&DtypesConfig::default()).unwrap();
        assert_eq!(defaults.frame_int.value(), "int64");
        assert_eq!(defaults.frame_float.value(), "float64");
        assert_eq!(defaults.array_int, NativeProbe::int_dtype());
    }

    #[cfg(not(feature = "python"))]
    #[test]
    fn test_python_probes_unavailable_without_feature() {
        let result = PlatformDefaults::resolve(&DtypesConfig::python());
        assert!(matches!(result, Err(DtypeError::UnsupportedProbe(name)) if name == "pandas"));
    }

    #[test]
    fn test_init_installs_once() {
        // Another test may already have triggered the lazy resolution.
        match init(&DtypesConfig::default()) {
            Ok(installed) => assert_eq!(installed, defaults()),
            Err(e) => assert!(matches!(e, DtypeError::AlreadyInitialized)),
        }
        assert!(is_initialized());
        assert!(matches!(
            init(&DtypesConfig::default()),
            Err(DtypeError::AlreadyInitialized)
        ));
        assert_eq!(
            *defaults(),
            PlatformDefaults::resolve(&DtypesConfig::default()).unwrap()
        );
    }

    #[test]
    fn test_defaults_are_concrete() {
        let defaults = defaults();
        assert!(defaults.frame_int.is_int() && defaults.frame_int.is_concrete_width());
        assert!(defaults.frame_float.is_float() && defaults.frame_float.is_concrete_width());
        assert!(defaults.array_int.is_int() && defaults.array_int.is_concrete_width());
        assert!(defaults.array_float.is_float() && defaults.array_float.is_concrete_width());
    }
}
