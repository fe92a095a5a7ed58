use crate::{
    aggregation::{
        Accumulator, AccumulatorError, AccumulatorFactory, AccumulatorResult, AggregationFunction,
        GroupedAccumulator,
    },
    base::database::{Batch, Column, ColumnBuilder, ColumnType, GroupIds, Value},
};
use core::marker::PhantomData;
use serde::{de::DeserializeOwned, Serialize};

/// The state of a single group of an aggregation, from which [`StateAggregation`] derives every
/// accumulator kind.
///
/// Intermediates are the postcard encoding of the state in a `VARBINARY` column; a null
/// intermediate merges nothing.
pub trait AggregationState: Default + Serialize + DeserializeOwned + 'static {
    /// The function name.
    const NAME: &'static str;
    /// The argument types, in argument order.
    const PARAMETER_TYPES: &'static [ColumnType];
    /// The type of the final value.
    const FINAL_TYPE: ColumnType;

    /// Folds one row. `arguments` holds one type-checked column per parameter.
    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()>;

    /// Folds the state of another partial aggregation.
    fn merge(&mut self, other: Self);

    /// The final value of the state.
    fn final_value(&self) -> Value;
}

/// An [`AggregationFunction`] whose accumulators all keep an [`AggregationState`] per group.
pub struct StateAggregation<S>(PhantomData<S>);

impl<S> StateAggregation<S> {
    /// Creates the function.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<S> Default for StateAggregation<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AggregationState> AggregationFunction for StateAggregation<S> {
    fn name(&self) -> &str {
        S::NAME
    }

    fn parameter_types(&self) -> &[ColumnType] {
        S::PARAMETER_TYPES
    }

    fn final_type(&self) -> ColumnType {
        S::FINAL_TYPE
    }

    fn intermediate_type(&self) -> ColumnType {
        ColumnType::VarBinary
    }

    fn bind(
        &self,
        argument_channels: &[usize],
        mask_channel: Option<usize>,
    ) -> AccumulatorResult<Box<dyn AccumulatorFactory>> {
        if argument_channels.len() != S::PARAMETER_TYPES.len() {
            return Err(AccumulatorError::ArgumentCountMismatch {
                expected: S::PARAMETER_TYPES.len(),
                actual: argument_channels.len(),
            });
        }
        Ok(Box::new(StateAccumulatorFactory::<S> {
            binding: Binding {
                parameter_types: S::PARAMETER_TYPES,
                argument_channels: argument_channels.to_vec(),
                mask_channel,
            },
            marker: PhantomData,
        }))
    }
}

#[derive(Debug, Clone)]
struct Binding {
    parameter_types: &'static [ColumnType],
    argument_channels: Vec<usize>,
    mask_channel: Option<usize>,
}

impl Binding {
    fn arguments<'b>(&self, batch: &'b Batch) -> AccumulatorResult<Vec<&'b Column>> {
        self.argument_channels
            .iter()
            .zip(self.parameter_types)
            .enumerate()
            .map(|(argument, (&channel, &expected))| {
                let column = batch.column(channel)?;
                if column.column_type() == expected {
                    Ok(column)
                } else {
                    Err(AccumulatorError::ArgumentTypeMismatch {
                        argument,
                        channel,
                        expected,
                        actual: column.column_type(),
                    })
                }
            })
            .collect()
    }

    /// Positions whose mask is true. A null mask deselects the row.
    fn selected_positions(&self, batch: &Batch) -> AccumulatorResult<Vec<usize>> {
        let positions = 0..batch.position_count();
        let Some(mask_channel) = self.mask_channel else {
            return Ok(positions.collect());
        };
        let mask = batch.column(mask_channel)?;
        let mut selected = Vec::with_capacity(batch.position_count());
        for position in positions {
            if mask.boolean_at(position)? == Some(true) {
                selected.push(position);
            }
        }
        Ok(selected)
    }
}

fn encode<S: AggregationState>(state: &S) -> AccumulatorResult<Value> {
    postcard::to_allocvec(state)
        .map(Value::VarBinary)
        .map_err(|error| AccumulatorError::InvalidIntermediate {
            reason: error.to_string(),
        })
}

fn decode<S: AggregationState>(intermediate: &Column, position: usize) -> AccumulatorResult<Option<S>> {
    intermediate
        .varbinary_at(position)?
        .map(|bytes| {
            postcard::from_bytes(bytes).map_err(|error| AccumulatorError::InvalidIntermediate {
                reason: error.to_string(),
            })
        })
        .transpose()
}

fn group_index(group_id: u64) -> AccumulatorResult<usize> {
    usize::try_from(group_id).map_err(|_| AccumulatorError::GroupIdOutOfRange { group_id })
}

fn check_group_ids(group_ids: &GroupIds, positions: usize) -> AccumulatorResult<()> {
    if group_ids.len() == positions {
        Ok(())
    } else {
        Err(AccumulatorError::GroupIdCountMismatch {
            group_ids: group_ids.len(),
            positions,
        })
    }
}

struct StateAccumulatorFactory<S> {
    binding: Binding,
    marker: PhantomData<S>,
}

impl<S: AggregationState> AccumulatorFactory for StateAccumulatorFactory<S> {
    fn create_accumulator(&self) -> Box<dyn Accumulator> {
        Box::new(StateAccumulator::<S> {
            binding: self.binding.clone(),
            state: S::default(),
        })
    }

    fn create_intermediate_accumulator(&self) -> Box<dyn Accumulator> {
        self.create_accumulator()
    }

    fn create_grouped_accumulator(&self) -> Box<dyn GroupedAccumulator> {
        Box::new(GroupedStateAccumulator::<S> {
            binding: self.binding.clone(),
            groups: Vec::new(),
        })
    }

    fn create_grouped_intermediate_accumulator(&self) -> Box<dyn GroupedAccumulator> {
        self.create_grouped_accumulator()
    }
}

struct StateAccumulator<S> {
    binding: Binding,
    state: S,
}

impl<S: AggregationState> Accumulator for StateAccumulator<S> {
    fn final_type(&self) -> ColumnType {
        S::FINAL_TYPE
    }

    fn intermediate_type(&self) -> ColumnType {
        ColumnType::VarBinary
    }

    fn add_input(&mut self, batch: &Batch) -> AccumulatorResult<()> {
        let arguments = self.binding.arguments(batch)?;
        for position in self.binding.selected_positions(batch)? {
            self.state.add_row(&arguments, position)?;
        }
        Ok(())
    }

    fn add_intermediate(&mut self, intermediate: &Column) -> AccumulatorResult<()> {
        for position in 0..intermediate.len() {
            if let Some(other) = decode::<S>(intermediate, position)? {
                self.state.merge(other);
            }
        }
        Ok(())
    }

    fn evaluate_intermediate(&self, out: &mut ColumnBuilder) -> AccumulatorResult<()> {
        out.append(encode(&self.state)?)?;
        Ok(())
    }

    fn evaluate_final(&self, out: &mut ColumnBuilder) -> AccumulatorResult<()> {
        out.append(self.state.final_value())?;
        Ok(())
    }
}

/// Groups are stored densely by id and created on first use.
struct GroupedStateAccumulator<S> {
    binding: Binding,
    groups: Vec<S>,
}

impl<S: AggregationState> GroupedStateAccumulator<S> {
    fn group_mut(&mut self, group_id: u64) -> AccumulatorResult<&mut S> {
        let index = group_index(group_id)?;
        if index >= self.groups.len() {
            self.groups.resize_with(index + 1, S::default);
        }
        Ok(&mut self.groups[index])
    }

    /// Applies `f` to the state of `group_id`, or to an empty state if the group was never fed.
    fn with_group<T>(&self, group_id: u64, f: impl FnOnce(&S) -> T) -> AccumulatorResult<T> {
        let index = group_index(group_id)?;
        Ok(match self.groups.get(index) {
            Some(state) => f(state),
            None => f(&S::default()),
        })
    }
}

impl<S: AggregationState> GroupedAccumulator for GroupedStateAccumulator<S> {
    fn final_type(&self) -> ColumnType {
        S::FINAL_TYPE
    }

    fn intermediate_type(&self) -> ColumnType {
        ColumnType::VarBinary
    }

    fn add_input(&mut self, group_ids: &GroupIds, batch: &Batch) -> AccumulatorResult<()> {
        check_group_ids(group_ids, batch.position_count())?;
        let arguments = self.binding.arguments(batch)?;
        for position in self.binding.selected_positions(batch)? {
            let group_id = group_ids.group_id_at(position)?;
            self.group_mut(group_id)?.add_row(&arguments, position)?;
        }
        Ok(())
    }

    fn add_intermediate(
        &mut self,
        group_ids: &GroupIds,
        intermediate: &Column,
    ) -> AccumulatorResult<()> {
        check_group_ids(group_ids, intermediate.len())?;
        for position in 0..intermediate.len() {
            if let Some(other) = decode::<S>(intermediate, position)? {
                let group_id = group_ids.group_id_at(position)?;
                self.group_mut(group_id)?.merge(other);
            }
        }
        Ok(())
    }

    fn evaluate_intermediate(
        &self,
        group_id: u64,
        out: &mut ColumnBuilder,
    ) -> AccumulatorResult<()> {
        out.append(self.with_group(group_id, encode::<S>)??)?;
        Ok(())
    }

    fn evaluate_final(&self, group_id: u64, out: &mut ColumnBuilder) -> AccumulatorResult<()> {
        out.append(self.with_group(group_id, S::final_value)?)?;
        Ok(())
    }
}
