use super::ColumnBuilder;
use core::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};

/// The type of a [`Column`](super::Column) or a non-null [`Value`](super::Value).
///
/// Note: The types here should correspond to native SQL database types.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum ColumnType {
    /// Mapped to bool
    #[serde(alias = "BOOLEAN", alias = "boolean")]
    Boolean,
    /// Mapped to i64
    #[serde(alias = "BIGINT", alias = "bigint")]
    BigInt,
    /// Mapped to f32
    #[serde(alias = "REAL", alias = "real")]
    Real,
    /// Mapped to f64
    #[serde(alias = "DOUBLE", alias = "double")]
    Double,
    /// Mapped to String
    #[serde(alias = "VARCHAR", alias = "varchar")]
    VarChar,
    /// Mapped to `Vec<u8>`
    #[serde(alias = "VARBINARY", alias = "varbinary")]
    VarBinary,
}

impl ColumnType {
    /// Returns true if values of this type are compared approximately.
    #[must_use]
    pub fn is_floating_point(self) -> bool {
        matches!(self, ColumnType::Real | ColumnType::Double)
    }

    /// Creates an output sink of this type sized for `expected_entries` values.
    #[must_use]
    pub fn create_builder(self, expected_entries: usize) -> ColumnBuilder {
        ColumnBuilder::new(self, expected_entries)
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Boolean => write!(f, "BOOLEAN"),
            ColumnType::BigInt => write!(f, "BIGINT"),
            ColumnType::Real => write!(f, "REAL"),
            ColumnType::Double => write!(f, "DOUBLE"),
            ColumnType::VarChar => write!(f, "VARCHAR"),
            ColumnType::VarBinary => write!(f, "VARBINARY"),
        }
    }
}
