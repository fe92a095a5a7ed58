//! The equivalence harness: runs an aggregation through every simulated execution strategy and
//! checks that each one returns the expected value.
mod config;
pub use config::HarnessConfig;

mod error;
pub use error::{ConsistencyCheck, HarnessError, HarnessResult, Strategy};

pub mod oracle;
pub use oracle::EqualityRule;
#[cfg(test)]
mod oracle_test;

pub mod variants;

pub mod evaluation;

mod strategies;
pub use strategies::StrategyRunner;

mod assertion;
pub use assertion::{assert_aggregation, check_aggregation, split_batch, AggregationHarness};
