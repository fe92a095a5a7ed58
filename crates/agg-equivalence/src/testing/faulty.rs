//! Broken aggregations, each wrong in exactly one way one consistency check is meant to catch.
use super::{AggregationState, StateAggregation};
use crate::{
    aggregation::{
        Accumulator, AccumulatorError, AccumulatorFactory, AccumulatorResult, AggregationFunction,
        GroupedAccumulator,
    },
    base::database::{Batch, Column, ColumnBuilder, ColumnType, GroupIds, Value},
    harness::variants::create_args,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Fault {
    /// Reads its arguments from channels `0..n` whatever it is bound to.
    PinChannels,
    /// Folds every group into group 0 and reads group 0 for every group.
    IgnoreGroups,
    /// Drops the mask channel.
    IgnoreMask,
    /// Reads a run-length-encoded mask as all true.
    IgnoreRunLengthMask,
}

pub(crate) struct Faulty<F> {
    inner: F,
    fault: Fault,
}

impl<F: AggregationFunction> Faulty<F> {
    pub(crate) fn new(inner: F, fault: Fault) -> Self {
        Self { inner, fault }
    }
}

impl<F: AggregationFunction> AggregationFunction for Faulty<F> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn parameter_types(&self) -> &[ColumnType] {
        self.inner.parameter_types()
    }

    fn final_type(&self) -> ColumnType {
        self.inner.final_type()
    }

    fn intermediate_type(&self) -> ColumnType {
        self.inner.intermediate_type()
    }

    fn bind(
        &self,
        argument_channels: &[usize],
        mask_channel: Option<usize>,
    ) -> AccumulatorResult<Box<dyn AccumulatorFactory>> {
        match self.fault {
            Fault::PinChannels => self
                .inner
                .bind(&create_args(self.inner.parameter_count()), mask_channel),
            Fault::IgnoreGroups => Ok(Box::new(GroupBlindFactory(
                self.inner.bind(argument_channels, mask_channel)?,
            ))),
            Fault::IgnoreMask => self.inner.bind(argument_channels, None),
            Fault::IgnoreRunLengthMask => Ok(Box::new(RunLengthBlindFactory {
                inner: self.inner.bind(argument_channels, mask_channel)?,
                mask_channel,
            })),
        }
    }
}

struct RunLengthBlindFactory {
    inner: Box<dyn AccumulatorFactory>,
    mask_channel: Option<usize>,
}

impl AccumulatorFactory for RunLengthBlindFactory {
    fn create_accumulator(&self) -> Box<dyn Accumulator> {
        Box::new(RunLengthBlindAccumulator {
            inner: self.inner.create_accumulator(),
            mask_channel: self.mask_channel,
        })
    }

    fn create_intermediate_accumulator(&self) -> Box<dyn Accumulator> {
        self.inner.create_intermediate_accumulator()
    }

    fn create_grouped_accumulator(&self) -> Box<dyn GroupedAccumulator> {
        self.inner.create_grouped_accumulator()
    }

    fn create_grouped_intermediate_accumulator(&self) -> Box<dyn GroupedAccumulator> {
        self.inner.create_grouped_intermediate_accumulator()
    }
}

struct RunLengthBlindAccumulator {
    inner: Box<dyn Accumulator>,
    mask_channel: Option<usize>,
}

impl Accumulator for RunLengthBlindAccumulator {
    fn final_type(&self) -> ColumnType {
        self.inner.final_type()
    }

    fn intermediate_type(&self) -> ColumnType {
        self.inner.intermediate_type()
    }

    fn add_input(&mut self, batch: &Batch) -> AccumulatorResult<()> {
        let Some(mask_channel) = self.mask_channel else {
            return self.inner.add_input(batch);
        };
        if !batch.column(mask_channel)?.is_constant() {
            return self.inner.add_input(batch);
        }
        let columns = batch
            .columns()
            .iter()
            .enumerate()
            .map(|(channel, column)| {
                if channel == mask_channel {
                    Column::Boolean(vec![Some(true); batch.position_count()])
                } else {
                    column.clone()
                }
            })
            .collect();
        self.inner.add_input(&Batch::try_new_with_position_count(
            batch.position_count(),
            columns,
        )?)
    }

    fn add_intermediate(&mut self, intermediate: &Column) -> AccumulatorResult<()> {
        self.inner.add_intermediate(intermediate)
    }

    fn evaluate_intermediate(&self, out: &mut ColumnBuilder) -> AccumulatorResult<()> {
        self.inner.evaluate_intermediate(out)
    }

    fn evaluate_final(&self, out: &mut ColumnBuilder) -> AccumulatorResult<()> {
        self.inner.evaluate_final(out)
    }
}

struct GroupBlindFactory(Box<dyn AccumulatorFactory>);

impl AccumulatorFactory for GroupBlindFactory {
    fn create_accumulator(&self) -> Box<dyn Accumulator> {
        self.0.create_accumulator()
    }

    fn create_intermediate_accumulator(&self) -> Box<dyn Accumulator> {
        self.0.create_intermediate_accumulator()
    }

    fn create_grouped_accumulator(&self) -> Box<dyn GroupedAccumulator> {
        Box::new(GroupBlindAccumulator(self.0.create_grouped_accumulator()))
    }

    fn create_grouped_intermediate_accumulator(&self) -> Box<dyn GroupedAccumulator> {
        Box::new(GroupBlindAccumulator(
            self.0.create_grouped_intermediate_accumulator(),
        ))
    }
}

struct GroupBlindAccumulator(Box<dyn GroupedAccumulator>);

impl GroupedAccumulator for GroupBlindAccumulator {
    fn final_type(&self) -> ColumnType {
        self.0.final_type()
    }

    fn intermediate_type(&self) -> ColumnType {
        self.0.intermediate_type()
    }

    fn add_input(&mut self, group_ids: &GroupIds, batch: &Batch) -> AccumulatorResult<()> {
        self.0
            .add_input(&GroupIds::uniform(0, group_ids.len()), batch)
    }

    fn add_intermediate(
        &mut self,
        group_ids: &GroupIds,
        intermediate: &Column,
    ) -> AccumulatorResult<()> {
        self.0
            .add_intermediate(&GroupIds::uniform(0, group_ids.len()), intermediate)
    }

    fn evaluate_intermediate(
        &self,
        _group_id: u64,
        out: &mut ColumnBuilder,
    ) -> AccumulatorResult<()> {
        self.0.evaluate_intermediate(0, out)
    }

    fn evaluate_final(&self, _group_id: u64, out: &mut ColumnBuilder) -> AccumulatorResult<()> {
        self.0.evaluate_final(0, out)
    }
}

/// `difference(BIGINT, BIGINT) -> BIGINT`: the sum of `a - b`. Not symmetric in its arguments.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct DifferenceState {
    difference: i64,
}

impl AggregationState for DifferenceState {
    const NAME: &'static str = "difference";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::BigInt, ColumnType::BigInt];
    const FINAL_TYPE: ColumnType = ColumnType::BigInt;

    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        if let (Some(a), Some(b)) = (
            arguments[0].bigint_at(position)?,
            arguments[1].bigint_at(position)?,
        ) {
            self.difference += a - b;
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.difference += other.difference;
    }

    fn final_value(&self) -> Value {
        self.difference.into()
    }
}

pub(crate) type Difference = StateAggregation<DifferenceState>;

/// `count(BOOLEAN) -> BIGINT`: the number of non-null values.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct BooleanCountState {
    count: i64,
}

impl AggregationState for BooleanCountState {
    const NAME: &'static str = "boolean_count";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::Boolean];
    const FINAL_TYPE: ColumnType = ColumnType::BigInt;

    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        if arguments[0].boolean_at(position)?.is_some() {
            self.count += 1;
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.count += other.count;
    }

    fn final_value(&self) -> Value {
        self.count.into()
    }
}

pub(crate) type BooleanCount = StateAggregation<BooleanCountState>;

/// `sum(BIGINT)` whose merge adds one per merged intermediate.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct MergeCountingSumState {
    sum: i64,
}

impl AggregationState for MergeCountingSumState {
    const NAME: &'static str = "merge_counting_sum";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::BigInt];
    const FINAL_TYPE: ColumnType = ColumnType::BigInt;

    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        self.sum += arguments[0].bigint_at(position)?.unwrap_or(0);
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.sum += other.sum + 1;
    }

    fn final_value(&self) -> Value {
        self.sum.into()
    }
}

pub(crate) type MergeCountingSum = StateAggregation<MergeCountingSumState>;

/// An aggregation that can not be bound.
pub(crate) struct Unbindable;

impl AggregationFunction for Unbindable {
    fn name(&self) -> &str {
        "unbindable"
    }

    fn parameter_types(&self) -> &[ColumnType] {
        &[ColumnType::BigInt]
    }

    fn final_type(&self) -> ColumnType {
        ColumnType::BigInt
    }

    fn intermediate_type(&self) -> ColumnType {
        ColumnType::BigInt
    }

    fn bind(
        &self,
        _argument_channels: &[usize],
        _mask_channel: Option<usize>,
    ) -> AccumulatorResult<Box<dyn AccumulatorFactory>> {
        Err(AccumulatorError::Unsupported {
            reason: "binding".to_string(),
        })
    }
}
