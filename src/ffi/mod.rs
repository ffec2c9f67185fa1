//! The Foreign Function Interface (FFI) of the pandera dtypes library.
//!
//! Only compiled with the `python` feature. Everything here is a thin wrapper
//! that converts arguments, calls into `types`/`platform`, and maps
//! `DtypeError` to `ValueError`.

pub mod python;

pub use python::{
    enable_verbose_logging_py, from_pandas_api_type_py, from_str_alias_py, initialize_py,
    is_initialized_py, platform_defaults_py, PyPandasDtype,
};
