//! The contract an aggregation under test implements. The harness only ever drives aggregations
//! through these traits.
mod accumulator;
pub use accumulator::{Accumulator, AccumulatorFactory, AggregationFunction, GroupedAccumulator};

mod error;
pub use error::{AccumulatorError, AccumulatorResult};
