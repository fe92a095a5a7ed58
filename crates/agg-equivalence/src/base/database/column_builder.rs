use super::{Column, ColumnError, ColumnResult, ColumnType, Value};

/// An append-only output sink that accumulators write their intermediate or final values into.
///
/// The builder is typed: appending a value of another type fails, appending null always succeeds.
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    column: Column,
}

impl ColumnBuilder {
    /// Creates an empty builder for values of `column_type`.
    #[must_use]
    pub fn new(column_type: ColumnType, expected_entries: usize) -> Self {
        let column = match column_type {
            ColumnType::Boolean => Column::Boolean(Vec::with_capacity(expected_entries)),
            ColumnType::BigInt => Column::BigInt(Vec::with_capacity(expected_entries)),
            ColumnType::Real => Column::Real(Vec::with_capacity(expected_entries)),
            ColumnType::Double => Column::Double(Vec::with_capacity(expected_entries)),
            ColumnType::VarChar => Column::VarChar(Vec::with_capacity(expected_entries)),
            ColumnType::VarBinary => Column::VarBinary(Vec::with_capacity(expected_entries)),
        };
        Self { column }
    }

    /// The type of the values this builder accepts.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.column.column_type()
    }

    /// Number of values appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.column.len()
    }

    /// Whether nothing was appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.column.is_empty()
    }

    /// Appends a null.
    pub fn append_null(&mut self) {
        match &mut self.column {
            Column::Boolean(col) => col.push(None),
            Column::BigInt(col) => col.push(None),
            Column::Real(col) => col.push(None),
            Column::Double(col) => col.push(None),
            Column::VarChar(col) => col.push(None),
            Column::VarBinary(col) => col.push(None),
            Column::Constant(_) => unreachable!("builders only hold materialized columns"),
        }
    }

    /// Appends a value, which must be null or of the builder's type.
    pub fn append(&mut self, value: Value) -> ColumnResult<()> {
        if value.is_null() {
            self.append_null();
            return Ok(());
        }
        match (&mut self.column, value) {
            (Column::Boolean(col), Value::Boolean(v)) => col.push(Some(v)),
            (Column::BigInt(col), Value::BigInt(v)) => col.push(Some(v)),
            (Column::Real(col), Value::Real(v)) => col.push(Some(v)),
            (Column::Double(col), Value::Double(v)) => col.push(Some(v)),
            (Column::VarChar(col), Value::VarChar(v)) => col.push(Some(v)),
            (Column::VarBinary(col), Value::VarBinary(v)) => col.push(Some(v)),
            (column, value) => {
                return Err(ColumnError::ValueTypeMismatch {
                    column_type: column.column_type(),
                    value,
                })
            }
        }
        Ok(())
    }

    /// Finishes the builder, returning a materialized column.
    #[must_use]
    pub fn build(self) -> Column {
        self.column
    }
}
