use super::{ColumnType, Value};
use snafu::Snafu;

/// Errors from operations on [`Column`](super::Column)s and [`ColumnBuilder`](super::ColumnBuilder)s.
#[derive(Snafu, Debug, PartialEq)]
pub enum ColumnError {
    /// A value does not fit into a column of the given type.
    #[snafu(display("Value {value} can not be stored in a {column_type} column"))]
    ValueTypeMismatch {
        /// The type of the column
        column_type: ColumnType,
        /// The offending value
        value: Value,
    },

    /// A constant was requested for a null value without a column type.
    #[snafu(display("A null constant column needs an explicit column type"))]
    UntypedNull,

    /// A typed accessor was used on a column of another type.
    #[snafu(display("Expected a {expected} column but found a {actual} column"))]
    ColumnTypeMismatch {
        /// The type the caller asked for
        expected: ColumnType,
        /// The type of the column
        actual: ColumnType,
    },

    /// A position past the end of the column was read.
    #[snafu(display("Position {position} is out of bounds for a column of length {len}"))]
    PositionOutOfBounds {
        /// The requested position
        position: usize,
        /// The length of the column
        len: usize,
    },

    /// A region extends past the end of the column.
    #[snafu(display(
        "Region [{offset}, {offset} + {length}) is out of bounds for a column of length {len}"
    ))]
    RegionOutOfBounds {
        /// The first position of the region
        offset: usize,
        /// The number of positions in the region
        length: usize,
        /// The length of the column
        len: usize,
    },
}

/// Result type for column operations
pub type ColumnResult<T> = Result<T, ColumnError>;
