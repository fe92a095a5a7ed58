use crate::base::database::{BatchError, ColumnError, ColumnType};
use snafu::Snafu;

/// Errors raised by an aggregation under test while it is driven through its lifecycle.
///
/// The harness never recovers from these; they are propagated to the caller unchanged.
#[derive(Snafu, Debug, PartialEq)]
pub enum AccumulatorError {
    /// An argument was bound to a column of the wrong type.
    #[snafu(display("Argument {argument} expects a {expected} column but channel {channel} is a {actual} column"))]
    ArgumentTypeMismatch {
        /// The index of the argument
        argument: usize,
        /// The channel the argument is bound to
        channel: usize,
        /// The parameter type of the argument
        expected: ColumnType,
        /// The type of the bound column
        actual: ColumnType,
    },

    /// The number of bound argument channels does not match the parameter count.
    #[snafu(display("Expected {expected} argument channels, got {actual}"))]
    ArgumentCountMismatch {
        /// The parameter count of the function
        expected: usize,
        /// The number of channels given to `bind`
        actual: usize,
    },

    /// A group id assignment does not cover the rows it was given with.
    #[snafu(display("{group_ids} group ids were given for {positions} positions"))]
    GroupIdCountMismatch {
        /// The number of group ids
        group_ids: usize,
        /// The number of positions
        positions: usize,
    },

    /// A group id can not be addressed on this platform.
    #[snafu(display("Group id {group_id} is out of range"))]
    GroupIdOutOfRange {
        /// The offending group id
        group_id: u64,
    },

    /// An intermediate representation could not be read back.
    #[snafu(display("Invalid intermediate representation: {reason}"))]
    InvalidIntermediate {
        /// Why the intermediate is invalid
        reason: String,
    },

    /// The operation is not supported by this aggregation.
    #[snafu(display("Unsupported operation: {reason}"))]
    Unsupported {
        /// What is not supported
        reason: String,
    },

    /// Errors from reading input batches
    #[snafu(transparent)]
    Batch {
        /// The underlying source error
        source: BatchError,
    },

    /// Errors from reading or writing columns
    #[snafu(transparent)]
    Column {
        /// The underlying source error
        source: ColumnError,
    },
}

/// Result type for accumulator operations
pub type AccumulatorResult<T> = Result<T, AccumulatorError>;
