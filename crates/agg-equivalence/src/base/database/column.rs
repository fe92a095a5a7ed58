//! A column of data, with type included. This is the analog of an engine "block": either a
//! materialized sequence of nullable values or a run-length-encoded constant.
use super::{ColumnError, ColumnResult, ColumnType, Value};
use itertools::repeat_n;

/// A column that logically repeats a single value `len` times without materializing it.
///
/// The value is checked against the column type on construction, so a
/// [`ConstantColumn`] can never hold a value of another type.
#[derive(Debug, PartialEq, Clone)]
pub struct ConstantColumn {
    column_type: ColumnType,
    value: Value,
    len: usize,
}

impl ConstantColumn {
    /// Creates a new constant column.
    pub fn try_new(column_type: ColumnType, value: Value, len: usize) -> ColumnResult<Self> {
        if value.fits(column_type) {
            Ok(Self {
                column_type,
                value,
                len,
            })
        } else {
            Err(ColumnError::ValueTypeMismatch { column_type, value })
        }
    }

    /// Creates a constant column of nulls.
    #[must_use]
    pub fn null(column_type: ColumnType, len: usize) -> Self {
        Self {
            column_type,
            value: Value::Null,
            len,
        }
    }

    /// The declared type of the column.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// The repeated value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the column has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Supported representations for a column of data.
#[derive(Debug, PartialEq, Clone)]
pub enum Column {
    /// Boolean columns
    Boolean(Vec<Option<bool>>),
    /// i64 columns
    BigInt(Vec<Option<i64>>),
    /// f32 columns
    Real(Vec<Option<f32>>),
    /// f64 columns
    Double(Vec<Option<f64>>),
    /// String columns
    VarChar(Vec<Option<String>>),
    /// Variable length binary columns
    VarBinary(Vec<Option<Vec<u8>>>),
    /// Run-length-encoded columns
    Constant(ConstantColumn),
}

macro_rules! copy_accessor {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $native:ty) => {
        $(#[$doc])*
        pub fn $name(&self, position: usize) -> ColumnResult<Option<$native>> {
            self.check_position(position)?;
            match self {
                Column::$variant(values) => Ok(values[position]),
                Column::Constant(constant) => match constant.value() {
                    Value::$variant(value) => Ok(Some(*value)),
                    Value::Null if constant.column_type() == ColumnType::$variant => Ok(None),
                    _ => Err(self.type_mismatch(ColumnType::$variant)),
                },
                _ => Err(self.type_mismatch(ColumnType::$variant)),
            }
        }
    };
}

impl Column {
    /// Creates a materialized column of `len` nulls.
    #[must_use]
    pub fn nulls(column_type: ColumnType, len: usize) -> Self {
        match column_type {
            ColumnType::Boolean => Column::Boolean(vec![None; len]),
            ColumnType::BigInt => Column::BigInt(vec![None; len]),
            ColumnType::Real => Column::Real(vec![None; len]),
            ColumnType::Double => Column::Double(vec![None; len]),
            ColumnType::VarChar => Column::VarChar(vec![None; len]),
            ColumnType::VarBinary => Column::VarBinary(vec![None; len]),
        }
    }

    /// Creates a run-length-encoded column repeating a non-null `value`.
    ///
    /// Use [`Column::null_constant`] for a null constant, since a null carries no type.
    pub fn constant(value: Value, len: usize) -> ColumnResult<Self> {
        let column_type = value.column_type().ok_or(ColumnError::UntypedNull)?;
        Ok(Column::Constant(ConstantColumn::try_new(
            column_type,
            value,
            len,
        )?))
    }

    /// Creates a run-length-encoded column of nulls of the given type.
    #[must_use]
    pub fn null_constant(column_type: ColumnType, len: usize) -> Self {
        Column::Constant(ConstantColumn::null(column_type, len))
    }

    /// Returns the length of the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Boolean(col) => col.len(),
            Column::BigInt(col) => col.len(),
            Column::Real(col) => col.len(),
            Column::Double(col) => col.len(),
            Column::VarChar(col) => col.len(),
            Column::VarBinary(col) => col.len(),
            Column::Constant(constant) => constant.len(),
        }
    }

    /// Returns true if the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the type of the column.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Boolean(_) => ColumnType::Boolean,
            Column::BigInt(_) => ColumnType::BigInt,
            Column::Real(_) => ColumnType::Real,
            Column::Double(_) => ColumnType::Double,
            Column::VarChar(_) => ColumnType::VarChar,
            Column::VarBinary(_) => ColumnType::VarBinary,
            Column::Constant(constant) => constant.column_type(),
        }
    }

    /// Whether the column is run-length-encoded.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        matches!(self, Column::Constant(_))
    }

    fn check_position(&self, position: usize) -> ColumnResult<()> {
        let len = self.len();
        if position < len {
            Ok(())
        } else {
            Err(ColumnError::PositionOutOfBounds { position, len })
        }
    }

    fn type_mismatch(&self, expected: ColumnType) -> ColumnError {
        ColumnError::ColumnTypeMismatch {
            expected,
            actual: self.column_type(),
        }
    }

    /// Returns the value at `position`.
    pub fn value_at(&self, position: usize) -> ColumnResult<Value> {
        self.check_position(position)?;
        Ok(match self {
            Column::Boolean(col) => col[position].into(),
            Column::BigInt(col) => col[position].into(),
            Column::Real(col) => col[position].into(),
            Column::Double(col) => col[position].into(),
            Column::VarChar(col) => col[position].clone().into(),
            Column::VarBinary(col) => col[position].clone().into(),
            Column::Constant(constant) => constant.value().clone(),
        })
    }

    /// Whether the value at `position` is null.
    pub fn is_null(&self, position: usize) -> ColumnResult<bool> {
        self.check_position(position)?;
        Ok(match self {
            Column::Boolean(col) => col[position].is_none(),
            Column::BigInt(col) => col[position].is_none(),
            Column::Real(col) => col[position].is_none(),
            Column::Double(col) => col[position].is_none(),
            Column::VarChar(col) => col[position].is_none(),
            Column::VarBinary(col) => col[position].is_none(),
            Column::Constant(constant) => constant.value().is_null(),
        })
    }

    copy_accessor!(
        /// Reads a boolean, `None` meaning null.
        boolean_at,
        Boolean,
        bool
    );
    copy_accessor!(
        /// Reads a bigint, `None` meaning null.
        bigint_at,
        BigInt,
        i64
    );
    copy_accessor!(
        /// Reads a real, `None` meaning null.
        real_at,
        Real,
        f32
    );
    copy_accessor!(
        /// Reads a double, `None` meaning null.
        double_at,
        Double,
        f64
    );

    /// Reads a varchar, `None` meaning null.
    pub fn varchar_at(&self, position: usize) -> ColumnResult<Option<&str>> {
        self.check_position(position)?;
        match self {
            Column::VarChar(col) => Ok(col[position].as_deref()),
            Column::Constant(constant) => match constant.value() {
                Value::VarChar(value) => Ok(Some(value.as_str())),
                Value::Null if constant.column_type() == ColumnType::VarChar => Ok(None),
                _ => Err(self.type_mismatch(ColumnType::VarChar)),
            },
            _ => Err(self.type_mismatch(ColumnType::VarChar)),
        }
    }

    /// Reads a varbinary, `None` meaning null.
    pub fn varbinary_at(&self, position: usize) -> ColumnResult<Option<&[u8]>> {
        self.check_position(position)?;
        match self {
            Column::VarBinary(col) => Ok(col[position].as_deref()),
            Column::Constant(constant) => match constant.value() {
                Value::VarBinary(value) => Ok(Some(value.as_slice())),
                Value::Null if constant.column_type() == ColumnType::VarBinary => Ok(None),
                _ => Err(self.type_mismatch(ColumnType::VarBinary)),
            },
            _ => Err(self.type_mismatch(ColumnType::VarBinary)),
        }
    }

    /// Returns the positions `[offset, offset + length)` as a new column.
    ///
    /// A constant column stays constant.
    pub fn region(&self, offset: usize, length: usize) -> ColumnResult<Self> {
        let len = self.len();
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= len)
            .ok_or(ColumnError::RegionOutOfBounds {
                offset,
                length,
                len,
            })?;
        Ok(match self {
            Column::Boolean(col) => Column::Boolean(col[offset..end].to_vec()),
            Column::BigInt(col) => Column::BigInt(col[offset..end].to_vec()),
            Column::Real(col) => Column::Real(col[offset..end].to_vec()),
            Column::Double(col) => Column::Double(col[offset..end].to_vec()),
            Column::VarChar(col) => Column::VarChar(col[offset..end].to_vec()),
            Column::VarBinary(col) => Column::VarBinary(col[offset..end].to_vec()),
            Column::Constant(constant) => Column::Constant(ConstantColumn {
                len: length,
                ..constant.clone()
            }),
        })
    }

    /// Expands a constant column into the equivalent materialized column.
    /// Materialized columns are returned unchanged.
    #[must_use]
    pub fn materialize(&self) -> Self {
        let Column::Constant(constant) = self else {
            return self.clone();
        };
        let len = constant.len();
        match constant.value() {
            Value::Null => Column::nulls(constant.column_type(), len),
            Value::Boolean(value) => Column::Boolean(repeat_n(Some(*value), len).collect()),
            Value::BigInt(value) => Column::BigInt(repeat_n(Some(*value), len).collect()),
            Value::Real(value) => Column::Real(repeat_n(Some(*value), len).collect()),
            Value::Double(value) => Column::Double(repeat_n(Some(*value), len).collect()),
            Value::VarChar(value) => Column::VarChar(repeat_n(Some(value.clone()), len).collect()),
            Value::VarBinary(value) => {
                Column::VarBinary(repeat_n(Some(value.clone()), len).collect())
            }
        }
    }
}
