// In: src/ffi/python.rs

use arrow::datatypes::DataType;
use arrow::pyarrow::PyArrowType;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::config::{DtypesConfig, ProbeKind};
use crate::error::DtypeError;
use crate::logging::LoggerStatus;
use crate::platform;
use crate::types::PandasDtype;

//==================================================================================
// I. The PandasDtype Class
//==================================================================================

/// Python view of a `PandasDtype`. Equality and hashing follow the Rust type.
#[pyclass(name = "PandasDtype", module = "pandera_dtypes", frozen)]
#[derive(Clone)]
pub struct PyPandasDtype {
    inner: PandasDtype,
}

impl From<PandasDtype> for PyPandasDtype {
    fn from(inner: PandasDtype) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyPandasDtype {
    #[getter]
    fn value(&self) -> &'static str {
        self.inner.value()
    }

    #[getter]
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Get datatype string alias.
    #[getter]
    fn str_alias(&self) -> &'static str {
        self.inner.str_alias()
    }

    #[getter]
    fn numpy_str_alias(&self) -> &'static str {
        self.inner.numpy_str_alias()
    }

    #[staticmethod]
    fn from_str_alias(str_alias: &str) -> Option<Self> {
        PandasDtype::from_str_alias(str_alias).map(Self::from)
    }

    #[staticmethod]
    fn from_pandas_api_type(pandas_api_type: &str) -> Option<Self> {
        PandasDtype::from_pandas_api_type(pandas_api_type).map(Self::from)
    }

    /// Returns the equivalent `pyarrow.DataType`.
    fn to_arrow_type(&self) -> PyResult<PyArrowType<DataType>> {
        Ok(PyArrowType(self.inner.to_arrow_type()?))
    }

    #[staticmethod]
    fn from_arrow_type(arrow_type: PyArrowType<DataType>) -> PyResult<Self> {
        Ok(PandasDtype::from_arrow_type(&arrow_type.0)?.into())
    }

    /// Anything that is not a `PandasDtype`, including `None`, compares unequal.
    fn __eq__(&self, other: &Bound<'_, PyAny>) -> bool {
        match other.extract::<PyPandasDtype>() {
            Ok(other) => self.inner == other.inner,
            Err(_) => false,
        }
    }

    fn __hash__(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.inner.hash(&mut hasher);
        hasher.finish()
    }

    fn __str__(&self) -> &'static str {
        self.inner.value()
    }

    fn __repr__(&self) -> String {
        format!("PandasDtype.{}", self.inner.name())
    }
}

//==================================================================================
// II. Module-Level Functions
//==================================================================================

/// Get a `PandasDtype` from a pandas dtype string alias, or `None`.
#[pyfunction]
#[pyo3(name = "from_str_alias")]
pub fn from_str_alias_py(str_alias: &str) -> Option<PyPandasDtype> {
    PyPandasDtype::from_str_alias(str_alias)
}

/// Get a `PandasDtype` from a `pandas.api.types.infer_dtype` result, or `None`.
#[pyfunction]
#[pyo3(name = "from_pandas_api_type")]
pub fn from_pandas_api_type_py(pandas_api_type: &str) -> Option<PyPandasDtype> {
    PyPandasDtype::from_pandas_api_type(pandas_api_type)
}

/// Resolves and installs the platform defaults with the given probes.
///
/// Importing the module already installs the pandas/numpy answers, so this is
/// only useful when that import-time probe failed (see `is_initialized`).
/// Raises `ValueError` if the defaults were already resolved in this process.
#[pyfunction]
#[pyo3(name = "initialize", signature = (frame_probe = "pandas", array_probe = "numpy"))]
pub fn initialize_py(py: Python, frame_probe: &str, array_probe: &str) -> PyResult<PyObject> {
    let config = DtypesConfig {
        frame_probe: frame_probe.parse::<ProbeKind>()?,
        array_probe: array_probe.parse::<ProbeKind>()?,
    };
    platform::init(&config)?;
    platform_defaults_py(py)
}

/// Returns `True` once the platform defaults are installed for this process.
#[pyfunction]
#[pyo3(name = "is_initialized")]
pub fn is_initialized_py() -> bool {
    platform::is_initialized()
}

/// Returns the resolved platform defaults as a dict of dtype string aliases.
#[pyfunction]
#[pyo3(name = "platform_defaults")]
pub fn platform_defaults_py(py: Python) -> PyResult<PyObject> {
    let defaults = platform::defaults();

    let result_dict = PyDict::new_bound(py);
    result_dict.set_item("frame_int", defaults.frame_int.value())?;
    result_dict.set_item("frame_float", defaults.frame_float.value())?;
    result_dict.set_item("array_int", defaults.array_int.value())?;
    result_dict.set_item("array_float", defaults.array_float.value())?;

    Ok(result_dict.into_any().unbind())
}

/// Returns `True` if this call installed the logger, `False` if a logger was
/// already in place (in which case `log_file` is ignored and not created).
#[pyfunction]
#[pyo3(name = "enable_verbose_logging", signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<String>) -> PyResult<bool> {
    let status = crate::logging::enable_verbose_logging(log_file.as_deref())?;
    Ok(status == LoggerStatus::Installed)
}

//==================================================================================
// III. Module Setup
//==================================================================================

/// Resolves the defaults from the live pandas and numpy installations.
///
/// Called on import. If the defaults are already installed this is a no-op.
/// If pandas or numpy cannot be probed, nothing is installed: the caller may
/// still pick other probes with `initialize`, otherwise the lazy fallback
/// takes over on first use.
pub(crate) fn install_python_defaults() {
    match platform::init(&DtypesConfig::python()) {
        Ok(_) | Err(DtypeError::AlreadyInitialized) => {}
        Err(e) => log::warn!("Could not probe pandas/numpy for default dtypes: {}", e),
    }
}

/// Exposes every variant both on the class, e.g. `PandasDtype.Int`, and as a
/// module attribute, e.g. `pandera_dtypes.Int`.
///
/// The class must already be registered with `m.add_class`.
pub(crate) fn add_dtype_attributes(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let class = m.py().get_type_bound::<PyPandasDtype>();
    for dtype in PandasDtype::ALL {
        let member = Py::new(m.py(), PyPandasDtype::from(dtype))?;
        class.setattr(dtype.name(), member.clone_ref(m.py()))?;
        m.add(dtype.name(), member)?;
    }
    m.add(
        "NUMPY_NONNULLABLE_INT_DTYPES",
        crate::types::NUMPY_NONNULLABLE_INT_DTYPES.to_vec(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Runs with `cargo test --features python`; the `extension-module`
    // feature cannot link a test binary.
    #[test]
    fn test_variants_are_class_and_module_attributes() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let m = PyModule::new_bound(py, "pandera_dtypes").unwrap();
            m.add_class::<PyPandasDtype>().unwrap();
            add_dtype_attributes(&m).unwrap();

            let class = py.get_type_bound::<PyPandasDtype>();
            for dtype in PandasDtype::ALL {
                let on_class: PyPandasDtype = class.getattr(dtype.name()).unwrap().extract().unwrap();
                let on_module: PyPandasDtype = m.getattr(dtype.name()).unwrap().extract().unwrap();
                assert_eq!(on_class.name(), dtype.name());
                assert_eq!(on_module.name(), dtype.name());
            }

            let int: PyPandasDtype = class.getattr("Int").unwrap().extract().unwrap();
            assert!(!int.__eq__(py.None().bind(py)));
            assert!(int.__eq__(&class.getattr("Int").unwrap()));
        });
    }
}
