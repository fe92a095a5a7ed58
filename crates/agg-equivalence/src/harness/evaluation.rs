//! Reading single values back out of accumulators.
use super::{HarnessError, HarnessResult};
use crate::{
    aggregation::{Accumulator, GroupedAccumulator},
    base::database::{Column, ColumnBuilder, Value},
};

/// The intermediate representation of `accumulator` as a one-position column.
pub fn get_intermediate_column(accumulator: &dyn Accumulator) -> HarnessResult<Column> {
    let mut builder = ColumnBuilder::new(accumulator.intermediate_type(), 1);
    accumulator.evaluate_intermediate(&mut builder)?;
    Ok(builder.build())
}

/// The intermediate representation of one group of `accumulator` as a one-position column.
pub fn get_grouped_intermediate_column(
    accumulator: &dyn GroupedAccumulator,
    group_id: u64,
) -> HarnessResult<Column> {
    let mut builder = ColumnBuilder::new(accumulator.intermediate_type(), 1);
    accumulator.evaluate_intermediate(group_id, &mut builder)?;
    Ok(builder.build())
}

/// The final value of `accumulator` as a one-position column.
pub fn get_final_column(accumulator: &dyn Accumulator) -> HarnessResult<Column> {
    let mut builder = ColumnBuilder::new(accumulator.final_type(), 1);
    accumulator.evaluate_final(&mut builder)?;
    Ok(builder.build())
}

/// The final value of one group of `accumulator`.
pub fn get_group_value(accumulator: &dyn GroupedAccumulator, group_id: u64) -> HarnessResult<Value> {
    let mut builder = ColumnBuilder::new(accumulator.final_type(), 1);
    accumulator.evaluate_final(group_id, &mut builder)?;
    get_only_value(&builder.build())
}

/// The single value of a one-position column.
pub fn get_only_value(column: &Column) -> HarnessResult<Value> {
    if column.len() == 1 {
        Ok(column.value_at(0)?)
    } else {
        Err(HarnessError::UnexpectedPositionCount {
            column_type: column.column_type(),
            position_count: column.len(),
        })
    }
}
