use super::{
    evaluation::{
        get_final_column, get_group_value, get_grouped_intermediate_column,
        get_intermediate_column, get_only_value,
    },
    variants::{
        create_args, duplicate_with_masks, mask_batches, offset_args, offset_columns,
        reverse_args, reverse_columns, MaskEncoding,
    },
    ConsistencyCheck, EqualityRule, HarnessConfig, HarnessError, HarnessResult, Strategy,
};
use crate::{
    aggregation::{AggregationFunction, GroupedAccumulator},
    base::database::{Batch, Column, GroupIds, Value},
};
use tracing::{debug, trace, warn};

/// Runs an aggregation through the simulated execution strategies.
///
/// Every strategy returns the final value of the aggregation over all rows of `batches`. The
/// wrapped strategies additionally re-run under channel permutations and fail with
/// [`HarnessError::InconsistentResults`] when a re-run disagrees with the baseline.
pub struct StrategyRunner<'a> {
    function: &'a dyn AggregationFunction,
    rule: EqualityRule,
    config: HarnessConfig,
    channel_count: usize,
}

impl<'a> StrategyRunner<'a> {
    /// Creates a runner for input batches with `channel_count` channels.
    #[must_use]
    pub fn new(
        function: &'a dyn AggregationFunction,
        rule: EqualityRule,
        config: HarnessConfig,
        channel_count: usize,
    ) -> Self {
        Self {
            function,
            rule,
            config,
            channel_count,
        }
    }

    /// Runs one strategy.
    pub fn run(&self, strategy: Strategy, batches: &[Batch]) -> HarnessResult<Value> {
        match strategy {
            Strategy::Direct => self.aggregation(batches),
            Strategy::PartialMerge => self.partial_aggregation(batches),
            Strategy::Grouped => self.grouped_aggregation(batches),
            Strategy::GroupedPartialMerge => self.grouped_partial_aggregation(batches),
            Strategy::Distinct => self.distinct_aggregation(batches),
        }
    }

    /// Direct aggregation, checked under reversed and offset channels.
    #[tracing::instrument(name = "StrategyRunner::aggregation", level = "debug", skip_all)]
    pub fn aggregation(&self, batches: &[Batch]) -> HarnessResult<Value> {
        self.with_channel_variants(Strategy::Direct, batches, |args, batches| {
            self.aggregation_with(args, None, batches)
        })
    }

    /// Partial aggregation merged through intermediates, checked under reversed and offset channels.
    #[tracing::instrument(name = "StrategyRunner::partial_aggregation", level = "debug", skip_all)]
    pub fn partial_aggregation(&self, batches: &[Batch]) -> HarnessResult<Value> {
        self.with_channel_variants(Strategy::PartialMerge, batches, |args, batches| {
            self.partial_aggregation_with(args, batches)
        })
    }

    /// Grouped aggregation, checked under reversed and offset channels.
    #[tracing::instrument(name = "StrategyRunner::grouped_aggregation", level = "debug", skip_all)]
    pub fn grouped_aggregation(&self, batches: &[Batch]) -> HarnessResult<Value> {
        self.with_channel_variants(Strategy::Grouped, batches, |args, batches| {
            self.grouped_aggregation_with(args, batches)
        })
    }

    /// Grouped partial aggregation merged through intermediates, checked under reversed and
    /// offset channels.
    #[tracing::instrument(
        name = "StrategyRunner::grouped_partial_aggregation",
        level = "debug",
        skip_all
    )]
    pub fn grouped_partial_aggregation(&self, batches: &[Batch]) -> HarnessResult<Value> {
        self.with_channel_variants(Strategy::GroupedPartialMerge, batches, |args, batches| {
            self.grouped_partial_aggregation_with(args, batches)
        })
    }

    /// Masked aggregation: the true-masked input must aggregate the same as the true-masked input
    /// followed by a false-masked copy, for both mask encodings.
    #[tracing::instrument(name = "StrategyRunner::distinct_aggregation", level = "debug", skip_all)]
    pub fn distinct_aggregation(&self, batches: &[Batch]) -> HarnessResult<Value> {
        let args = create_args(self.function.parameter_count());
        let mask_channel = Some(self.channel_count);
        let baseline = self.aggregation_with(&args, mask_channel, &mask_batches(true, batches)?)?;
        for encoding in [MaskEncoding::Materialized, MaskEncoding::RunLength] {
            let duplicated = duplicate_with_masks(batches, encoding)?;
            let actual = self.aggregation_with(&args, mask_channel, &duplicated)?;
            self.check_consistent(Strategy::Distinct, encoding.check(), &baseline, &actual)?;
        }
        debug!(result = %baseline, "distinct aggregation");
        Ok(baseline)
    }

    /// Runs `run` with arguments in place, then reversed (arity > 1 only), then offset, and
    /// requires all results to agree. Fails up front when the batches carry fewer channels than
    /// the function takes arguments.
    fn with_channel_variants(
        &self,
        strategy: Strategy,
        batches: &[Batch],
        run: impl Fn(&[usize], &[Batch]) -> HarnessResult<Value>,
    ) -> HarnessResult<Value> {
        let parameter_count = self.function.parameter_count();
        let reversed_args = reverse_args(parameter_count, self.channel_count).ok_or(
            HarnessError::MissingArgumentChannels {
                parameter_count,
                channel_count: self.channel_count,
            },
        )?;
        let baseline = run(&create_args(parameter_count), batches)?;
        if parameter_count > 1 {
            let reversed = run(&reversed_args, &reverse_columns(batches))?;
            self.check_consistent(strategy, ConsistencyCheck::ReversedChannels, &baseline, &reversed)?;
        }
        let offset = self.config.channel_offset;
        let offset_result = run(
            &offset_args(parameter_count, offset),
            &offset_columns(batches, offset)?,
        )?;
        self.check_consistent(strategy, ConsistencyCheck::ChannelOffset, &baseline, &offset_result)?;
        debug!(%strategy, result = %baseline, "aggregation");
        Ok(baseline)
    }

    fn check_consistent(
        &self,
        strategy: Strategy,
        check: ConsistencyCheck,
        baseline: &Value,
        actual: &Value,
    ) -> HarnessResult<()> {
        if self.rule.matches(actual, baseline) {
            Ok(())
        } else {
            warn!(%strategy, %check, %baseline, %actual, "inconsistent results");
            Err(HarnessError::InconsistentResults {
                strategy,
                check,
                baseline: baseline.clone(),
                actual: actual.clone(),
            })
        }
    }

    /// One accumulator fed every non-empty batch.
    pub fn aggregation_with(
        &self,
        args: &[usize],
        mask_channel: Option<usize>,
        batches: &[Batch],
    ) -> HarnessResult<Value> {
        let mut accumulator = self
            .function
            .bind(args, mask_channel)?
            .create_accumulator();
        for batch in batches.iter().filter(|batch| !batch.is_empty()) {
            trace!(positions = batch.position_count(), "add input");
            accumulator.add_input(batch)?;
        }
        get_only_value(&get_final_column(accumulator.as_ref())?)
    }

    /// One fresh accumulator per batch, fed only when the batch is non-empty, merged through
    /// intermediates. The intermediate of a never-fed accumulator is merged first and last.
    pub fn partial_aggregation_with(&self, args: &[usize], batches: &[Batch]) -> HarnessResult<Value> {
        let factory = self.function.bind(args, None)?;
        let mut merge = factory.create_intermediate_accumulator();
        let empty = get_intermediate_column(factory.create_accumulator().as_ref())?;
        merge.add_intermediate(&empty)?;
        for batch in batches {
            let mut partial = factory.create_accumulator();
            if !batch.is_empty() {
                trace!(positions = batch.position_count(), "add partial input");
                partial.add_input(batch)?;
            }
            merge.add_intermediate(&get_intermediate_column(partial.as_ref())?)?;
        }
        merge.add_intermediate(&empty)?;
        get_only_value(&get_final_column(merge.as_ref())?)
    }

    /// One grouped accumulator fed every batch under group 0, then again under the large group
    /// id. Both groups must agree.
    pub fn grouped_aggregation_with(&self, args: &[usize], batches: &[Batch]) -> HarnessResult<Value> {
        let mut accumulator = self
            .function
            .bind(args, None)?
            .create_grouped_accumulator();
        let group_value = feed_group(accumulator.as_mut(), 0, batches)?;
        let large_group_value =
            feed_group(accumulator.as_mut(), self.config.large_group_id, batches)?;
        self.check_consistent(
            Strategy::Grouped,
            ConsistencyCheck::LargeGroupId,
            &group_value,
            &large_group_value,
        )?;
        Ok(group_value)
    }

    /// One fresh grouped accumulator per batch, merged through group 0 intermediates, with the
    /// intermediate of a never-fed accumulator merged first and last.
    pub fn grouped_partial_aggregation_with(
        &self,
        args: &[usize],
        batches: &[Batch],
    ) -> HarnessResult<Value> {
        let factory = self.function.bind(args, None)?;
        let mut merge = factory.create_grouped_intermediate_accumulator();
        let empty =
            get_grouped_intermediate_column(factory.create_grouped_accumulator().as_ref(), 0)?;
        add_group_intermediate(merge.as_mut(), &empty)?;
        for batch in batches {
            let mut partial = factory.create_grouped_accumulator();
            trace!(positions = batch.position_count(), "add grouped partial input");
            partial.add_input(&GroupIds::uniform(0, batch.position_count()), batch)?;
            let intermediate = get_grouped_intermediate_column(partial.as_ref(), 0)?;
            add_group_intermediate(merge.as_mut(), &intermediate)?;
        }
        add_group_intermediate(merge.as_mut(), &empty)?;
        get_group_value(merge.as_ref(), 0)
    }
}

fn feed_group(
    accumulator: &mut dyn GroupedAccumulator,
    group_id: u64,
    batches: &[Batch],
) -> HarnessResult<Value> {
    for batch in batches {
        trace!(group_id, positions = batch.position_count(), "add grouped input");
        accumulator.add_input(&GroupIds::uniform(group_id, batch.position_count()), batch)?;
    }
    get_group_value(accumulator, group_id)
}

fn add_group_intermediate(
    accumulator: &mut dyn GroupedAccumulator,
    intermediate: &Column,
) -> HarnessResult<()> {
    accumulator.add_intermediate(&GroupIds::uniform(0, intermediate.len()), intermediate)?;
    Ok(())
}
