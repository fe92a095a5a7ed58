use super::ColumnType;
use core::fmt::{self, Display, Formatter};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A single, possibly null, value.
///
/// This is what an aggregation produces when it is finalized, and what the harness
/// compares against the caller's expected value.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Value {
    /// SQL null
    Null,
    /// Boolean values
    Boolean(bool),
    /// i64 values
    BigInt(i64),
    /// f32 values
    Real(f32),
    /// f64 values
    Double(f64),
    /// String values
    VarChar(String),
    /// Binary values
    VarBinary(Vec<u8>),
}

impl Value {
    /// Provides the column type associated with the value, or `None` for null.
    #[must_use]
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(ColumnType::Boolean),
            Value::BigInt(_) => Some(ColumnType::BigInt),
            Value::Real(_) => Some(ColumnType::Real),
            Value::Double(_) => Some(ColumnType::Double),
            Value::VarChar(_) => Some(ColumnType::VarChar),
            Value::VarBinary(_) => Some(ColumnType::VarBinary),
        }
    }

    /// Whether the value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value may be stored in a column of `column_type`.
    #[must_use]
    pub fn fits(&self, column_type: ColumnType) -> bool {
        self.column_type()
            .map_or(true, |value_type| value_type == column_type)
    }

    /// Strict equality where floating point values compare by their bits and every
    /// NaN equals every other NaN.
    ///
    /// This differs from `PartialEq`, under which `NaN != NaN`.
    #[must_use]
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Real(a), Value::Real(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::Double(a), Value::Double(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            _ => self == other,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::BigInt(value) => write!(f, "{value}"),
            Value::Real(value) => write!(f, "{value}"),
            Value::Double(value) => write!(f, "{value}"),
            Value::VarChar(value) => write!(f, "{value}"),
            Value::VarBinary(bytes) => {
                write!(f, "0x{}", bytes.iter().map(|b| format!("{b:02x}")).join(""))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}
impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::BigInt(value)
    }
}
impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Real(value)
    }
}
impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::VarChar(value.to_string())
    }
}
impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::VarChar(value)
    }
}
impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::VarBinary(value)
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
