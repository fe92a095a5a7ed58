//! The mapping is as follows:
//! Column <-> Array/ArrayRef
//! Batch <- RecordBatch
//! Boolean <-> Boolean
//! BigInt <-> Int64
//! Real <-> Float32
//! Double <-> Float64
//! VarChar <-> Utf8
//! VarBinary <-> Binary
//!
//! Nulls are preserved. Constant columns are materialized on the way to Arrow.
use crate::base::database::{Batch, BatchError, Column};
use arrow::{
    array::{
        Array, ArrayRef, BinaryArray, BooleanArray, Float32Array, Float64Array, Int64Array,
        StringArray,
    },
    datatypes::DataType,
    record_batch::RecordBatch,
};
use snafu::Snafu;
use std::sync::Arc;

/// Errors caused by conversions from Arrow types.
#[derive(Snafu, Debug, PartialEq)]
pub enum ArrowConversionError {
    /// This error occurs when trying to convert from an unsupported arrow type.
    #[snafu(display("unsupported type: attempted conversion from ArrayRef of type {data_type} to Column"))]
    UnsupportedDataType {
        /// The arrow data type
        data_type: DataType,
    },
    /// This error occurs when the converted columns do not form a valid batch.
    #[snafu(transparent)]
    InvalidBatch {
        /// The underlying source error
        source: BatchError,
    },
}

fn downcast<T: Array + 'static>(array: &ArrayRef) -> Result<&T, ArrowConversionError> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ArrowConversionError::UnsupportedDataType {
            data_type: array.data_type().clone(),
        })
}

impl TryFrom<&ArrayRef> for Column {
    type Error = ArrowConversionError;
    fn try_from(value: &ArrayRef) -> Result<Self, Self::Error> {
        match value.data_type() {
            DataType::Boolean => Ok(Column::Boolean(
                downcast::<BooleanArray>(value)?.iter().collect(),
            )),
            DataType::Int64 => Ok(Column::BigInt(
                downcast::<Int64Array>(value)?.iter().collect(),
            )),
            DataType::Float32 => Ok(Column::Real(
                downcast::<Float32Array>(value)?.iter().collect(),
            )),
            DataType::Float64 => Ok(Column::Double(
                downcast::<Float64Array>(value)?.iter().collect(),
            )),
            DataType::Utf8 => Ok(Column::VarChar(
                downcast::<StringArray>(value)?
                    .iter()
                    .map(|v| v.map(ToString::to_string))
                    .collect(),
            )),
            DataType::Binary => Ok(Column::VarBinary(
                downcast::<BinaryArray>(value)?
                    .iter()
                    .map(|v| v.map(<[u8]>::to_vec))
                    .collect(),
            )),
            data_type => Err(ArrowConversionError::UnsupportedDataType {
                data_type: data_type.clone(),
            }),
        }
    }
}

impl From<&Column> for ArrayRef {
    fn from(value: &Column) -> Self {
        match value.materialize() {
            Column::Boolean(col) => Arc::new(BooleanArray::from(col)),
            Column::BigInt(col) => Arc::new(Int64Array::from(col)),
            Column::Real(col) => Arc::new(Float32Array::from(col)),
            Column::Double(col) => Arc::new(Float64Array::from(col)),
            Column::VarChar(col) => Arc::new(StringArray::from(col)),
            Column::VarBinary(col) => Arc::new(col.into_iter().collect::<BinaryArray>()),
            Column::Constant(_) => unreachable!("materialized columns are never constant"),
        }
    }
}

impl TryFrom<&RecordBatch> for Batch {
    type Error = ArrowConversionError;
    fn try_from(value: &RecordBatch) -> Result<Self, Self::Error> {
        let columns = value
            .columns()
            .iter()
            .map(Column::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Batch::try_new_with_position_count(value.num_rows(), columns)?)
    }
}
