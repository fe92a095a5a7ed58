use super::{
    oracle::assert_function_equals, EqualityRule, HarnessConfig, HarnessError, HarnessResult,
    Strategy, StrategyRunner,
};
use crate::{
    aggregation::AggregationFunction,
    base::database::{Batch, BatchResult, Column, Value},
};
use tracing::debug;

/// Checks that an aggregation returns the expected value under every execution strategy.
///
/// # Example
/// ```ignore
/// AggregationHarness::new(&sum)
///     .with_description("sum of small integers")
///     .assert(10_i64, vec![bigint([1, 2, 3, 4])]);
/// ```
pub struct AggregationHarness<'a> {
    function: &'a dyn AggregationFunction,
    config: HarnessConfig,
    rule: Option<EqualityRule>,
    description: Option<String>,
}

impl<'a> AggregationHarness<'a> {
    /// Creates a harness with the default configuration and an equality rule chosen from the
    /// expected value.
    #[must_use]
    pub fn new(function: &'a dyn AggregationFunction) -> Self {
        Self {
            function,
            config: HarnessConfig::default(),
            rule: None,
            description: None,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Compares results with `rule` instead of the rule derived from the expected value.
    #[must_use]
    pub fn with_equality_rule(mut self, rule: EqualityRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Labels failure messages with `description`.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Runs every strategy over `columns`, which must share one position count.
    pub fn check(&self, expected: &Value, columns: Vec<Column>) -> HarnessResult<()> {
        let positions = columns.first().map_or(0, Column::len);
        if let Some((channel, column)) = columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != positions)
        {
            return Err(HarnessError::PositionCountMismatch {
                channel,
                expected: positions,
                actual: column.len(),
            });
        }
        self.check_batch(
            expected,
            &Batch::try_new_with_position_count(positions, columns)?,
        )
    }

    /// Runs every strategy over `batch`, split into up to two regions, in the order of
    /// [`Strategy::ALL`]. Stops at the first failure.
    #[tracing::instrument(
        name = "AggregationHarness::check_batch",
        level = "debug",
        skip_all,
        fields(function = %self.function.name())
    )]
    pub fn check_batch(&self, expected: &Value, batch: &Batch) -> HarnessResult<()> {
        let rule = self
            .rule
            .unwrap_or_else(|| EqualityRule::for_expected(expected, &self.config));
        let runner = StrategyRunner::new(self.function, rule, self.config, batch.channel_count());
        let batches = split_batch(batch)?;
        debug!(
            positions = batch.position_count(),
            batches = batches.len(),
            %expected,
            "checking aggregation"
        );
        for strategy in Strategy::ALL {
            let actual = runner.run(strategy, &batches)?;
            assert_function_equals(
                &rule,
                strategy,
                self.description.as_deref(),
                &actual,
                expected,
            )?;
        }
        Ok(())
    }

    /// Like [`AggregationHarness::check`], but panics on failure.
    ///
    /// # Panics
    /// Panics with the error message when any strategy fails.
    pub fn assert(&self, expected: impl Into<Value>, columns: Vec<Column>) {
        if let Err(error) = self.check(&expected.into(), columns) {
            panic!("{error}");
        }
    }

    /// Like [`AggregationHarness::check_batch`], but panics on failure.
    ///
    /// # Panics
    /// Panics with the error message when any strategy fails.
    pub fn assert_batch(&self, expected: impl Into<Value>, batch: &Batch) {
        if let Err(error) = self.check_batch(&expected.into(), batch) {
            panic!("{error}");
        }
    }
}

/// Splits a batch into the inputs of the strategies: no batches for zero rows, the batch itself
/// for one row, and the halves `[0, n/2)` and `[n/2, n)` otherwise.
pub fn split_batch(batch: &Batch) -> BatchResult<Vec<Batch>> {
    match batch.position_count() {
        0 => Ok(Vec::new()),
        1 => Ok(vec![batch.clone()]),
        positions => {
            let split = positions / 2;
            Ok(vec![
                batch.region(0, split)?,
                batch.region(split, positions - split)?,
            ])
        }
    }
}

/// Checks `function` over `columns` with the default configuration.
pub fn check_aggregation(
    function: &dyn AggregationFunction,
    expected: impl Into<Value>,
    columns: Vec<Column>,
) -> HarnessResult<()> {
    AggregationHarness::new(function).check(&expected.into(), columns)
}

/// Asserts `function` over `columns` with the default configuration.
///
/// # Panics
/// Panics with the error message when any strategy fails.
pub fn assert_aggregation(
    function: &dyn AggregationFunction,
    expected: impl Into<Value>,
    columns: Vec<Column>,
) {
    AggregationHarness::new(function).assert(expected, columns);
}
