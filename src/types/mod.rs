//! This module defines the core, strongly-typed data representations of the
//! pandera dtypes library.
//!
//! It currently includes the canonical `PandasDtype` enum, which replaces
//! loose string dtype names with a closed, serializable, Arrow-compatible enum
//! whose equality follows the platform's default widths.

pub mod pandas_dtype;

// Re-export the main type(s) for easier access.
pub use pandas_dtype::{is_nonnullable_int, PandasDtype, NUMPY_NONNULLABLE_INT_DTYPES};
