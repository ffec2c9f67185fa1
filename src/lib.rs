//! This file is the root of the `pandera_dtypes` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`types`, `platform`, etc.)
//!     so the Rust compiler knows they exist, and re-exporting the public API.
//! 2.  Defining the `#[pymodule]` which acts as the main entry point when the
//!     compiled library is imported into Python (`python` feature only).

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod types;

#[cfg(feature = "python")]
mod ffi;

pub use config::{DtypesConfig, ProbeKind};
pub use error::DtypeError;
pub use logging::LoggerStatus;
pub use platform::{DtypeProbe, PlatformDefaults};
pub use types::{is_nonnullable_int, PandasDtype, NUMPY_NONNULLABLE_INT_DTYPES};

//==================================================================================
// 2. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `pandera_dtypes` Python module, containing all exposed Rust functions.
#[cfg(feature = "python")]
#[pymodule]
fn pandera_dtypes(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // --- Resolve Int/Float widths from the live pandas/numpy before anything reads them ---
    ffi::python::install_python_defaults();

    // --- Lookups ---
    m.add_function(wrap_pyfunction!(ffi::from_str_alias_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::from_pandas_api_type_py, m)?)?;

    // --- Platform defaults ---
    m.add_function(wrap_pyfunction!(ffi::initialize_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::is_initialized_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::platform_defaults_py, m)?)?;

    // --- Add our classes, then the enum members on class and module ---
    m.add_class::<ffi::PyPandasDtype>()?;
    ffi::python::add_dtype_attributes(m)?;

    // --- Expose the custom error type ---
    m.add(
        "DtypeError",
        m.py().get_type_bound::<pyo3::exceptions::PyValueError>(),
    )?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    // --- Turn on logging for default resolution and lookup misses ---
    m.add_function(wrap_pyfunction!(ffi::enable_verbose_logging_py, m)?)?;

    Ok(())
}
