//! Probes that ask a host library which dtype it assigns to a bare integer
//! literal and a bare float literal.
//!
//! These answers differ between operating systems (numpy follows the C `long`,
//! which is 32 bits on Windows), so they are always asked of the live
//! environment rather than hardcoded.

use arrow::json::reader::infer_json_schema;

use crate::error::DtypeError;
use crate::types::PandasDtype;

/// A source of truth for the platform-default integer and float dtypes.
///
/// Implementations return the dtype string exactly as the host library
/// reports it (e.g. `"int64"`); validation happens in `PlatformDefaults`.
pub trait DtypeProbe {
    /// A short name for logs and error messages.
    fn name(&self) -> &'static str;

    /// The dtype assigned to a sample holding the integer literal `1`.
    fn default_int(&self) -> Result<String, DtypeError>;

    /// The dtype assigned to a sample holding the float literal `1.0`.
    fn default_float(&self) -> Result<String, DtypeError>;
}

fn probe_failed(probe: &str, reason: impl ToString) -> DtypeError {
    DtypeError::ProbeFailed {
        probe: probe.to_string(),
        reason: reason.to_string(),
    }
}

//==================================================================================
// 1. Arrow
//==================================================================================

/// Asks Arrow's JSON schema inference which type it gives a literal sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrowProbe;

impl ArrowProbe {
    const FIELD: &'static str = "sample";

    fn infer(&self, literal: &str) -> Result<String, DtypeError> {
        let record = format!("{{\"{}\": {}}}\n", Self::FIELD, literal);
        let (schema, _) = infer_json_schema(record.as_bytes(), Some(1))?;
        let field = schema.field_with_name(Self::FIELD)?;
        let dtype = PandasDtype::from_arrow_type(field.data_type())
            .map_err(|e| probe_failed(self.name(), e))?;
        Ok(dtype.value().to_string())
    }
}

impl DtypeProbe for ArrowProbe {
    fn name(&self) -> &'static str {
        "arrow"
    }

    fn default_int(&self) -> Result<String, DtypeError> {
        self.infer("1")
    }

    fn default_float(&self) -> Result<String, DtypeError> {
        self.infer("1.0")
    }
}

//==================================================================================
// 2. Native (C ABI widths)
//==================================================================================

/// Reads the widths of the platform C `long` and `double`, which numpy uses
/// for `np.dtype(int)` and `np.dtype(float)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeProbe;

impl NativeProbe {
    /// The integer dtype matching the platform C `long`.
    pub fn int_dtype() -> PandasDtype {
        match std::mem::size_of::<std::os::raw::c_long>() {
            8 => PandasDtype::Int64,
            _ => PandasDtype::Int32,
        }
    }

    /// The float dtype matching the platform C `double`.
    pub fn float_dtype() -> PandasDtype {
        match std::mem::size_of::<std::os::raw::c_double>() {
            8 => PandasDtype::Float64,
            _ => PandasDtype::Float32,
        }
    }
}

impl DtypeProbe for NativeProbe {
    fn name(&self) -> &'static str {
        "native"
    }

    fn default_int(&self) -> Result<String, DtypeError> {
        Ok(Self::int_dtype().value().to_string())
    }

    fn default_float(&self) -> Result<String, DtypeError> {
        Ok(Self::float_dtype().value().to_string())
    }
}

//==================================================================================
// 3. Python (pandas / numpy)
//==================================================================================

#[cfg(feature = "python")]
pub use self::python::{NumpyProbe, PandasProbe};

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;
    use pyo3::types::{PyFloat, PyList, PyLong};

    use super::{probe_failed, DtypeProbe};
    use crate::error::DtypeError;

    /// Evaluates `str(pd.Series(sample).dtype)`.
    fn series_dtype(py: Python<'_>, sample: &Bound<'_, PyList>) -> PyResult<String> {
        let pandas = py.import_bound("pandas")?;
        let series = pandas.getattr("Series")?.call1((sample.clone(),))?;
        series.getattr("dtype")?.str()?.extract()
    }

    /// Evaluates `str(np.dtype(scalar_type))`.
    fn numpy_dtype<T: pyo3::PyTypeInfo>(py: Python<'_>) -> PyResult<String> {
        let numpy = py.import_bound("numpy")?;
        let dtype = numpy.getattr("dtype")?.call1((py.get_type_bound::<T>(),))?;
        dtype.str()?.extract()
    }

    /// Asks the installed pandas for `pd.Series([1]).dtype` and `pd.Series([1.]).dtype`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct PandasProbe;

    impl DtypeProbe for PandasProbe {
        fn name(&self) -> &'static str {
            "pandas"
        }

        fn default_int(&self) -> Result<String, DtypeError> {
            Python::with_gil(|py| series_dtype(py, &PyList::new_bound(py, [1i64])))
                .map_err(|e| probe_failed(self.name(), e))
        }

        fn default_float(&self) -> Result<String, DtypeError> {
            Python::with_gil(|py| series_dtype(py, &PyList::new_bound(py, [1.0f64])))
                .map_err(|e| probe_failed(self.name(), e))
        }
    }

    /// Asks the installed numpy for `np.dtype(int)` and `np.dtype(float)`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NumpyProbe;

    impl DtypeProbe for NumpyProbe {
        fn name(&self) -> &'static str {
            "numpy"
        }

        fn default_int(&self) -> Result<String, DtypeError> {
            Python::with_gil(numpy_dtype::<PyLong>).map_err(|e| probe_failed(self.name(), e))
        }

        fn default_float(&self) -> Result<String, DtypeError> {
            Python::with_gil(numpy_dtype::<PyFloat>).map_err(|e| probe_failed(self.name(), e))
        }
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_probe_infers_64_bit_defaults() {
        let probe = ArrowProbe;
        assert_eq!(probe.default_int().unwrap(), "int64");
        assert_eq!(probe.default_float().unwrap(), "float64");
    }

    #[test]
    fn test_native_probe_follows_c_long() {
        let expected = if std::mem::size_of::<std::os::raw::c_long>() == 8 {
            "int64"
        } else {
            "int32"
        };
        assert_eq!(NativeProbe.default_int().unwrap(), expected);
        assert_eq!(NativeProbe.default_float().unwrap(), "float64");
    }

    #[cfg(all(target_os = "windows", target_pointer_width = "64"))]
    #[test]
    fn test_native_probe_is_32_bit_on_windows() {
        assert_eq!(NativeProbe::int_dtype().value(), "int32");
    }

    #[cfg(all(target_os = "linux", target_pointer_width = "64"))]
    #[test]
    fn test_native_probe_is_64_bit_on_linux() {
        assert_eq!(NativeProbe::int_dtype().value(), "int64");
    }
}
