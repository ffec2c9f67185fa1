// In: src/error.rs

//! This module defines the single, unified error type for the pandera dtypes library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Note that dtype lookups never produce an error: an unrecognized alias is a
//! defined miss (`None`). Errors only arise while resolving platform defaults,
//! parsing configuration, converting to and from Arrow, or crossing the FFI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DtypeError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    #[error("Probe '{0}' is not available in this build")]
    UnsupportedProbe(String),

    #[error("Probe '{probe}' failed: {reason}")]
    ProbeFailed { probe: String, reason: String },

    #[error("Probe '{probe}' reported '{alias}', which is not a concrete-width dtype")]
    UnrecognizedDefault { probe: String, alias: String },

    #[error("Platform defaults have already been resolved for this process")]
    AlreadyInitialized,

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error originating from the underlying I/O subsystem, e.g. opening a log file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while parsing a config.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error for Python FFI (Foreign Function Interface) operations.
    #[cfg(feature = "python")]
    #[error("FFI operation failed: {0}")]
    FfiError(String), // PyErr doesn't impl Error, so we can't use #[from] here.
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

#[cfg(feature = "python")]
impl From<pyo3::PyErr> for DtypeError {
    fn from(err: pyo3::PyErr) -> Self {
        DtypeError::FfiError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<DtypeError> for pyo3::PyErr {
    fn from(err: DtypeError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
