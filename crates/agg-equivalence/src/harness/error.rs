use crate::{
    aggregation::AccumulatorError,
    base::database::{BatchError, ColumnError, ColumnType, Value},
};
use core::fmt::{self, Display, Formatter};
use snafu::Snafu;

/// The simulated execution modes, in the order the harness runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One accumulator fed every batch.
    Direct,
    /// One accumulator per batch, merged through intermediate representations.
    PartialMerge,
    /// One grouped accumulator fed every batch under two group ids.
    Grouped,
    /// One grouped accumulator per batch, merged through intermediate representations.
    GroupedPartialMerge,
    /// Masked duplicates of every batch.
    Distinct,
}

impl Strategy {
    /// Every strategy, in execution order.
    pub const ALL: [Strategy; 5] = [
        Strategy::Direct,
        Strategy::PartialMerge,
        Strategy::Grouped,
        Strategy::GroupedPartialMerge,
        Strategy::Distinct,
    ];
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Direct => write!(f, "direct"),
            Strategy::PartialMerge => write!(f, "partial"),
            Strategy::Grouped => write!(f, "grouped"),
            Strategy::GroupedPartialMerge => write!(f, "grouped partial"),
            Strategy::Distinct => write!(f, "distinct"),
        }
    }
}

/// The re-derivations a strategy compares against its own baseline result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsistencyCheck {
    /// Arguments bound to reversed channels.
    ReversedChannels,
    /// Arguments bound after null placeholder channels.
    ChannelOffset,
    /// The same rows aggregated under a large group id.
    LargeGroupId,
    /// False-masked duplicates with a materialized mask.
    Mask,
    /// False-masked duplicates with a run-length-encoded mask.
    RunLengthMask,
}

impl Display for ConsistencyCheck {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyCheck::ReversedChannels => write!(f, "reversed channels"),
            ConsistencyCheck::ChannelOffset => write!(f, "channel offset"),
            ConsistencyCheck::LargeGroupId => write!(f, "large group id"),
            ConsistencyCheck::Mask => write!(f, "mask"),
            ConsistencyCheck::RunLengthMask => write!(f, "RLE mask"),
        }
    }
}

fn test_prefix(description: Option<&str>) -> String {
    description.map_or_else(String::new, |description| format!("Test: {description}, "))
}

/// Errors reported by the harness.
#[derive(Snafu, Debug, PartialEq)]
pub enum HarnessError {
    /// The input columns do not share one position count.
    #[snafu(display(
        "input blocks provided are not equal in position count: channel {channel} has {actual} positions, expected {expected}"
    ))]
    PositionCountMismatch {
        /// The offending channel
        channel: usize,
        /// The position count of the first channel
        expected: usize,
        /// The position count of the offending channel
        actual: usize,
    },

    /// The input carries fewer channels than the aggregation takes arguments.
    #[snafu(display(
        "aggregation takes {parameter_count} arguments but the input has {channel_count} channels"
    ))]
    MissingArgumentChannels {
        /// The number of arguments of the aggregation
        parameter_count: usize,
        /// The number of channels of the input
        channel_count: usize,
    },

    /// A strategy's result differs from the expected value.
    #[snafu(display(
        "{strategy} aggregation: {}Expected: {expected}, actual: {actual}",
        test_prefix(description.as_deref())
    ))]
    EquivalenceViolation {
        /// The strategy that produced `actual`
        strategy: Strategy,
        /// The caller's description of the test
        description: Option<String>,
        /// The expected value
        expected: Value,
        /// The value the strategy produced
        actual: Value,
    },

    /// A strategy disagrees with itself under a re-derivation of its input.
    #[snafu(display(
        "{strategy} aggregation: Inconsistent results with {check}. Baseline: {baseline}, actual: {actual}"
    ))]
    InconsistentResults {
        /// The strategy that was re-derived
        strategy: Strategy,
        /// The re-derivation that disagreed
        check: ConsistencyCheck,
        /// The strategy's result on the untransformed input
        baseline: Value,
        /// The result under the re-derivation
        actual: Value,
    },

    /// An accumulator wrote other than exactly one value.
    #[snafu(display("Expected exactly one {column_type} value, got {position_count}"))]
    UnexpectedPositionCount {
        /// The type of the written column
        column_type: ColumnType,
        /// The number of values written
        position_count: usize,
    },

    /// Errors raised by the aggregation under test
    #[snafu(transparent)]
    Accumulator {
        /// The underlying source error
        source: AccumulatorError,
    },

    /// Errors from building input variants
    #[snafu(transparent)]
    Batch {
        /// The underlying source error
        source: BatchError,
    },

    /// Errors from reading results
    #[snafu(transparent)]
    Column {
        /// The underlying source error
        source: ColumnError,
    },
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;
