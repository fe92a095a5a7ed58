//! Reference aggregations built on a generic state-based accumulator, for exercising the harness.
mod state;
pub use state::{AggregationState, StateAggregation};

mod reference;
pub use reference::{
    Average, AverageState, Count, CountAll, CountAllState, CountDistinct, CountDistinctState,
    CountState, MaxVarChar, MaxVarCharState, RealSum, RealSumState, Sum, SumState, WeightedSum,
    WeightedSumState,
};

#[cfg(test)]
pub(crate) mod faulty;
