//! This module defines `PandasDtype`, the canonical enumeration of every column
//! data type a schema can request, together with its string aliases.
//!
//! A `PandasDtype` has two faces:
//! 1.  A fixed tag (the enum variant itself) for exhaustive matching.
//! 2.  A derived canonical string (`str_alias`) which is what a dataframe column
//!     actually reports at runtime. Equality and hashing are defined on this
//!     derived string, so `PandasDtype::Int` compares equal to whichever concrete
//!     width the host library defaults to on the current platform.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use arrow::datatypes::{DataType as ArrowDataType, TimeUnit};
use serde::{Deserialize, Serialize};

use crate::error::DtypeError;
use crate::platform::{self, PlatformDefaults};

//==================================================================================
// 0. Constants
//==================================================================================

/// The numpy integer aliases whose arrays cannot hold missing values.
pub const NUMPY_NONNULLABLE_INT_DTYPES: [&str; 10] = [
    "int", "int_", "int8", "int16", "int32", "int64", "uint8", "uint16", "uint32", "uint64",
];

/// Returns `true` if `alias` names a numpy integer dtype without null support.
pub fn is_nonnullable_int(alias: &str) -> bool {
    NUMPY_NONNULLABLE_INT_DTYPES.contains(&alias)
}

//==================================================================================
// 1. The Enumeration
//==================================================================================

/// Enumerates all valid pandas data types.
///
/// The variants follow the numpy data types subscribed to by pandas, and the
/// declared `value` of each variant is the numpy/pandas string alias for it.
///
/// `String` is the one synthetic member: it has no first-class runtime
/// counterpart and is stored as an `object` array, so its `str_alias` is
/// `"object"` while its `value` stays `"string"`.
///
/// Note that `PartialEq` and `Hash` are implemented by hand; see the
/// `PartialEq` impl below for the exact contract.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub enum PandasDtype {
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "datetime64[ns]")]
    DateTime,
    #[serde(rename = "timedelta64[ns]")]
    Timedelta,
    #[serde(rename = "category")]
    Category,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "float16")]
    Float16,
    #[serde(rename = "float32")]
    Float32,
    #[serde(rename = "float64")]
    Float64,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "int8")]
    Int8,
    #[serde(rename = "int16")]
    Int16,
    #[serde(rename = "int32")]
    Int32,
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "uint8")]
    UInt8,
    #[serde(rename = "uint16")]
    UInt16,
    #[serde(rename = "uint32")]
    UInt32,
    #[serde(rename = "uint64")]
    UInt64,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "string")]
    String,
}

impl PandasDtype {
    /// Every variant, in declaration order.
    pub const ALL: [PandasDtype; 19] = [
        Self::Bool,
        Self::DateTime,
        Self::Timedelta,
        Self::Category,
        Self::Float,
        Self::Float16,
        Self::Float32,
        Self::Float64,
        Self::Int,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Object,
        Self::String,
    ];

    /// The declared string value of the variant.
    pub const fn value(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::DateTime => "datetime64[ns]",
            Self::Timedelta => "timedelta64[ns]",
            Self::Category => "category",
            Self::Float => "float",
            Self::Float16 => "float16",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Object => "object",
            Self::String => "string",
        }
    }

    /// The variant name, e.g. `"DateTime"`.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::DateTime => "DateTime",
            Self::Timedelta => "Timedelta",
            Self::Category => "Category",
            Self::Float => "Float",
            Self::Float16 => "Float16",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Int => "Int",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Object => "Object",
            Self::String => "String",
        }
    }

    //------------------------------------------------------------------------------
    // Alias resolution
    //------------------------------------------------------------------------------

    /// Get the dtype string alias a dataframe column of this type reports.
    ///
    /// `Int` and `Float` resolve to the dataframe library's platform defaults,
    /// `String` resolves to `"object"`, and every other variant to its value.
    pub fn str_alias(&self) -> &'static str {
        self.str_alias_in(platform::defaults())
    }

    /// [`PandasDtype::str_alias`] against an explicit set of defaults rather
    /// than the process-wide ones.
    pub fn str_alias_in(&self, defaults: &PlatformDefaults) -> &'static str {
        match self {
            Self::Int => defaults.frame_int.value(),
            Self::Float => defaults.frame_float.value(),
            Self::String => Self::Object.value(),
            other => other.value(),
        }
    }

    /// Like [`PandasDtype::str_alias`], but resolves `Int` and `Float` against
    /// the array library's defaults (`np.dtype(int)`, `np.dtype(float)`).
    pub fn numpy_str_alias(&self) -> &'static str {
        self.numpy_str_alias_in(platform::defaults())
    }

    /// [`PandasDtype::numpy_str_alias`] against an explicit set of defaults.
    pub fn numpy_str_alias_in(&self, defaults: &PlatformDefaults) -> &'static str {
        match self {
            Self::Int => defaults.array_int.value(),
            Self::Float => defaults.array_float.value(),
            Self::String => Self::Object.value(),
            other => other.value(),
        }
    }

    /// Get a `PandasDtype` from a pandas dtype string alias.
    ///
    /// Returns `None` for any string outside the fixed alias table. Note that
    /// `"string"` maps back to `String` even though `String.str_alias()` is
    /// `"object"`.
    pub fn from_str_alias(str_alias: &str) -> Option<Self> {
        let dtype = match str_alias {
            "bool" => Self::Bool,
            "datetime64[ns]" => Self::DateTime,
            "timedelta64[ns]" => Self::Timedelta,
            "category" => Self::Category,
            "float" => Self::Float,
            "float16" => Self::Float16,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "int" => Self::Int,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint8" => Self::UInt8,
            "uint16" => Self::UInt16,
            "uint32" => Self::UInt32,
            "uint64" => Self::UInt64,
            "object" => Self::Object,
            "string" => Self::String,
            _ => {
                log::debug!("Unrecognized dtype string alias '{}'", str_alias);
                return None;
            }
        };
        Some(dtype)
    }

    /// Get a `PandasDtype` from the kind reported by pandas' `infer_dtype`.
    ///
    /// Every `mixed*` kind collapses to `Object` before the table is consulted.
    pub fn from_pandas_api_type(pandas_api_type: &str) -> Option<Self> {
        if pandas_api_type.starts_with("mixed") {
            return Some(Self::Object);
        }

        let dtype = match pandas_api_type {
            "string" => Self::String,
            "floating" => Self::Float,
            "integer" => Self::Int,
            "categorical" => Self::Category,
            "boolean" => Self::Bool,
            "datetime64" | "datetime" => Self::DateTime,
            "timedelta64" | "timedelta" => Self::Timedelta,
            _ => {
                log::debug!("Unrecognized pandas api type '{}'", pandas_api_type);
                return None;
            }
        };
        Some(dtype)
    }

    //------------------------------------------------------------------------------
    // Classification
    //------------------------------------------------------------------------------

    /// Returns `true` for the generic and every concrete-width integer type.
    pub fn is_int(&self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// Returns `true` for the generic and every concrete-width float type.
    pub fn is_float(&self) -> bool {
        matches!(
            self,
            Self::Float | Self::Float16 | Self::Float32 | Self::Float64
        )
    }

    /// Returns `true` for numeric types whose width does not depend on the platform.
    pub fn is_concrete_width(&self) -> bool {
        (self.is_int() || self.is_float()) && !matches!(self, Self::Int | Self::Float)
    }

    /// The key equality and hashing are defined on, resolved against `defaults`.
    pub(crate) fn eq_key_in(&self, defaults: &PlatformDefaults) -> &'static str {
        match self {
            Self::String => self.value(),
            other => other.str_alias_in(defaults),
        }
    }

    fn eq_key(&self) -> &'static str {
        self.eq_key_in(platform::defaults())
    }

    /// The `PartialEq` relation, resolved against `defaults` instead of the
    /// process-wide ones.
    pub fn eq_in(&self, other: &Self, defaults: &PlatformDefaults) -> bool {
        self.eq_key_in(defaults) == other.eq_key_in(defaults)
    }

    //------------------------------------------------------------------------------
    // Arrow interop
    //------------------------------------------------------------------------------

    /// Converts an Arrow `DataType` into a `PandasDtype`.
    ///
    /// Only nanosecond timestamps and durations have a pandas counterpart;
    /// every dictionary type maps to `Category`.
    pub fn from_arrow_type(arrow_type: &ArrowDataType) -> Result<Self, DtypeError> {
        match arrow_type {
            ArrowDataType::Boolean => Ok(Self::Bool),
            ArrowDataType::Int8 => Ok(Self::Int8),
            ArrowDataType::Int16 => Ok(Self::Int16),
            ArrowDataType::Int32 => Ok(Self::Int32),
            ArrowDataType::Int64 => Ok(Self::Int64),
            ArrowDataType::UInt8 => Ok(Self::UInt8),
            ArrowDataType::UInt16 => Ok(Self::UInt16),
            ArrowDataType::UInt32 => Ok(Self::UInt32),
            ArrowDataType::UInt64 => Ok(Self::UInt64),
            ArrowDataType::Float16 => Ok(Self::Float16),
            ArrowDataType::Float32 => Ok(Self::Float32),
            ArrowDataType::Float64 => Ok(Self::Float64),
            ArrowDataType::Timestamp(TimeUnit::Nanosecond, _) => Ok(Self::DateTime),
            ArrowDataType::Duration(TimeUnit::Nanosecond) => Ok(Self::Timedelta),
            ArrowDataType::Dictionary(_, _) => Ok(Self::Category),
            ArrowDataType::Utf8 | ArrowDataType::LargeUtf8 => Ok(Self::String),
            dt => Err(DtypeError::UnsupportedType(format!(
                "Cannot convert Arrow type {:?} to PandasDtype",
                dt
            ))),
        }
    }

    /// Converts a `PandasDtype` into an Arrow `DataType`.
    ///
    /// `Int` and `Float` follow the platform defaults. `Object` has no Arrow
    /// counterpart and yields `DtypeError::UnsupportedType`.
    pub fn to_arrow_type(&self) -> Result<ArrowDataType, DtypeError> {
        let arrow_type = match self {
            Self::Bool => ArrowDataType::Boolean,
            Self::DateTime => ArrowDataType::Timestamp(TimeUnit::Nanosecond, None),
            Self::Timedelta => ArrowDataType::Duration(TimeUnit::Nanosecond),
            Self::Category => ArrowDataType::Dictionary(
                Box::new(ArrowDataType::Int32),
                Box::new(ArrowDataType::Utf8),
            ),
            Self::Int => return platform::defaults().frame_int.to_arrow_type(),
            Self::Float => return platform::defaults().frame_float.to_arrow_type(),
            Self::Float16 => ArrowDataType::Float16,
            Self::Float32 => ArrowDataType::Float32,
            Self::Float64 => ArrowDataType::Float64,
            Self::Int8 => ArrowDataType::Int8,
            Self::Int16 => ArrowDataType::Int16,
            Self::Int32 => ArrowDataType::Int32,
            Self::Int64 => ArrowDataType::Int64,
            Self::UInt8 => ArrowDataType::UInt8,
            Self::UInt16 => ArrowDataType::UInt16,
            Self::UInt32 => ArrowDataType::UInt32,
            Self::UInt64 => ArrowDataType::UInt64,
            Self::String => ArrowDataType::Utf8,
            Self::Object => {
                return Err(DtypeError::UnsupportedType(
                    "object columns have no Arrow counterpart".to_string(),
                ))
            }
        };
        Ok(arrow_type)
    }
}

//==================================================================================
// 2. Equality & Hashing
//==================================================================================

/// Two dtypes are equal iff their resolved string aliases match, except that
/// `String` only equals `String`.
///
/// The `String` rule is applied to both operands so the relation stays
/// symmetric: `String != Object` and `Object != String`, even though both
/// resolve to `"object"`.
impl PartialEq for PandasDtype {
    fn eq(&self, other: &Self) -> bool {
        self.eq_key() == other.eq_key()
    }
}

impl Eq for PandasDtype {}

/// Hashes the same key `PartialEq` compares, so `Int` and the platform's
/// default integer width land in the same bucket.
impl Hash for PandasDtype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.eq_key().hash(state);
    }
}

//==================================================================================
// 3. String Conversions
//==================================================================================

/// Provides the declared string value for a `PandasDtype`.
impl fmt::Display for PandasDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Strict parsing for call sites that want a `Result` rather than an `Option`.
impl FromStr for PandasDtype {
    type Err = DtypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_alias(s).ok_or_else(|| DtypeError::UnsupportedType(s.to_string()))
    }
}

impl TryFrom<&ArrowDataType> for PandasDtype {
    type Error = DtypeError;

    fn try_from(arrow_type: &ArrowDataType) -> Result<Self, Self::Error> {
        Self::from_arrow_type(arrow_type)
    }
}
