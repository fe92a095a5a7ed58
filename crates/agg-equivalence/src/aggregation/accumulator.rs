use super::AccumulatorResult;
use crate::base::database::{Batch, Column, ColumnBuilder, ColumnType, GroupIds};

/// A single-group aggregation state.
///
/// Lifecycle: created by an [`AccumulatorFactory`], fed with zero or more
/// [`add_input`](Accumulator::add_input) or [`add_intermediate`](Accumulator::add_intermediate)
/// calls, then evaluated. Nothing is fed after evaluation.
pub trait Accumulator {
    /// The type written by [`evaluate_final`](Accumulator::evaluate_final).
    fn final_type(&self) -> ColumnType;

    /// The type written by [`evaluate_intermediate`](Accumulator::evaluate_intermediate).
    fn intermediate_type(&self) -> ColumnType;

    /// Feeds raw rows. The bound argument and mask channels are read from `batch`.
    fn add_input(&mut self, batch: &Batch) -> AccumulatorResult<()>;

    /// Merges intermediate representations, one per position of `intermediate`.
    fn add_intermediate(&mut self, intermediate: &Column) -> AccumulatorResult<()>;

    /// Writes exactly one intermediate representation of the current state into `out`.
    fn evaluate_intermediate(&self, out: &mut ColumnBuilder) -> AccumulatorResult<()>;

    /// Writes exactly one final value into `out`.
    fn evaluate_final(&self, out: &mut ColumnBuilder) -> AccumulatorResult<()>;
}

/// An aggregation state keyed by group id.
///
/// Per-group state is created lazily as group ids are first seen. Evaluating a group that was
/// never fed writes the value of an aggregation over no rows.
pub trait GroupedAccumulator {
    /// The type written by [`evaluate_final`](GroupedAccumulator::evaluate_final).
    fn final_type(&self) -> ColumnType;

    /// The type written by [`evaluate_intermediate`](GroupedAccumulator::evaluate_intermediate).
    fn intermediate_type(&self) -> ColumnType;

    /// Feeds raw rows, row `i` belonging to group `group_ids[i]`.
    fn add_input(&mut self, group_ids: &GroupIds, batch: &Batch) -> AccumulatorResult<()>;

    /// Merges intermediate representations, position `i` belonging to group `group_ids[i]`.
    fn add_intermediate(
        &mut self,
        group_ids: &GroupIds,
        intermediate: &Column,
    ) -> AccumulatorResult<()>;

    /// Writes exactly one intermediate representation of `group_id` into `out`.
    fn evaluate_intermediate(&self, group_id: u64, out: &mut ColumnBuilder)
        -> AccumulatorResult<()>;

    /// Writes exactly one final value of `group_id` into `out`.
    fn evaluate_final(&self, group_id: u64, out: &mut ColumnBuilder) -> AccumulatorResult<()>;
}

/// Creates accumulators for an aggregation bound to concrete channels.
pub trait AccumulatorFactory {
    /// An accumulator fed with raw rows.
    fn create_accumulator(&self) -> Box<dyn Accumulator>;

    /// An accumulator fed with intermediate representations.
    fn create_intermediate_accumulator(&self) -> Box<dyn Accumulator>;

    /// A grouped accumulator fed with raw rows.
    fn create_grouped_accumulator(&self) -> Box<dyn GroupedAccumulator>;

    /// A grouped accumulator fed with intermediate representations.
    fn create_grouped_intermediate_accumulator(&self) -> Box<dyn GroupedAccumulator>;
}

/// An aggregate function as resolved by the engine, before it is bound to channels.
pub trait AggregationFunction {
    /// The name of the function, used in log output.
    fn name(&self) -> &str;

    /// The types of the arguments, in argument order.
    fn parameter_types(&self) -> &[ColumnType];

    /// The number of arguments.
    fn parameter_count(&self) -> usize {
        self.parameter_types().len()
    }

    /// The type of the finalized result.
    fn final_type(&self) -> ColumnType;

    /// The type of the intermediate representation.
    fn intermediate_type(&self) -> ColumnType;

    /// Binds argument `i` to channel `argument_channels[i]`, and optionally a boolean mask channel.
    fn bind(
        &self,
        argument_channels: &[usize],
        mask_channel: Option<usize>,
    ) -> AccumulatorResult<Box<dyn AccumulatorFactory>>;
}
