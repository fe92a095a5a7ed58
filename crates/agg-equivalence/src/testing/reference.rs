//! Correct reference aggregations, each a few lines of state over [`StateAggregation`].
use super::{AggregationState, StateAggregation};
use crate::{
    aggregation::AccumulatorResult,
    base::database::{Column, ColumnType, Value},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// `sum(BIGINT) -> BIGINT`, null over no non-null rows. Overflow wraps.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SumState {
    sum: Option<i64>,
}

impl AggregationState for SumState {
    const NAME: &'static str = "sum";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::BigInt];
    const FINAL_TYPE: ColumnType = ColumnType::BigInt;

    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        if let Some(value) = arguments[0].bigint_at(position)? {
            self.merge(Self { sum: Some(value) });
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        if let Some(value) = other.sum {
            self.sum = Some(self.sum.unwrap_or(0).wrapping_add(value));
        }
    }

    fn final_value(&self) -> Value {
        self.sum.into()
    }
}

/// `sum(BIGINT)`
pub type Sum = StateAggregation<SumState>;

/// `sum(REAL) -> REAL`, null over no non-null rows.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RealSumState {
    sum: Option<f32>,
}

impl AggregationState for RealSumState {
    const NAME: &'static str = "sum";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::Real];
    const FINAL_TYPE: ColumnType = ColumnType::Real;

    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        if let Some(value) = arguments[0].real_at(position)? {
            self.merge(Self { sum: Some(value) });
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        if let Some(value) = other.sum {
            self.sum = Some(self.sum.unwrap_or(0.0) + value);
        }
    }

    fn final_value(&self) -> Value {
        self.sum.into()
    }
}

/// `sum(REAL)`
pub type RealSum = StateAggregation<RealSumState>;

/// `count(BIGINT) -> BIGINT`, counting non-null rows.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CountState {
    count: i64,
}

impl AggregationState for CountState {
    const NAME: &'static str = "count";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::BigInt];
    const FINAL_TYPE: ColumnType = ColumnType::BigInt;

    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        if !arguments[0].is_null(position)? {
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

/// `count(BIGINT)`
pub type Count = StateAggregation<CountState>;

/// `count(*) -> BIGINT`, which takes no arguments.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CountAllState {
    count: i64,
}

impl AggregationState for CountAllState {
    const NAME: &'static str = "count";
    const PARAMETER_TYPES: &'static [ColumnType] = &[];
    const FINAL_TYPE: ColumnType = ColumnType::BigInt;

    fn add_row(&mut self, _arguments: &[&Column], _position: usize) -> AccumulatorResult<()> {
        self.count += 1;
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.count += other.count;
    }

    fn final_value(&self) -> Value {
        self.count.into()
    }
}

/// `count(*)`
pub type CountAll = StateAggregation<CountAllState>;

/// `avg(DOUBLE) -> DOUBLE`, null over no non-null rows.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AverageState {
    sum: f64,
    count: i64,
}

impl AggregationState for AverageState {
    const NAME: &'static str = "avg";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::Double];
    const FINAL_TYPE: ColumnType = ColumnType::Double;

    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        if let Some(value) = arguments[0].double_at(position)? {
            self.sum += value;
            self.count += 1;
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.sum += other.sum;
        self.count += other.count;
    }

    #[allow(clippy::cast_precision_loss)]
    fn final_value(&self) -> Value {
        if self.count == 0 {
            Value::Null
        } else {
            Value::Double(self.sum / self.count as f64)
        }
    }
}

/// `avg(DOUBLE)`
pub type Average = StateAggregation<AverageState>;

/// `weighted_sum(DOUBLE, BIGINT) -> DOUBLE`: the sum of `value * weight` over rows where neither
/// is null, null over no such rows.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WeightedSumState {
    sum: Option<f64>,
}

impl AggregationState for WeightedSumState {
    const NAME: &'static str = "weighted_sum";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::Double, ColumnType::BigInt];
    const FINAL_TYPE: ColumnType = ColumnType::Double;

    #[allow(clippy::cast_precision_loss)]
    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        let value = arguments[0].double_at(position)?;
        let weight = arguments[1].bigint_at(position)?;
        if let (Some(value), Some(weight)) = (value, weight) {
            self.merge(Self {
                sum: Some(value * weight as f64),
            });
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        if let Some(value) = other.sum {
            self.sum = Some(self.sum.unwrap_or(0.0) + value);
        }
    }

    fn final_value(&self) -> Value {
        self.sum.into()
    }
}

/// `weighted_sum(DOUBLE, BIGINT)`
pub type WeightedSum = StateAggregation<WeightedSumState>;

/// `count(DISTINCT BIGINT) -> BIGINT`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CountDistinctState {
    values: BTreeSet<i64>,
}

impl AggregationState for CountDistinctState {
    const NAME: &'static str = "count_distinct";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::BigInt];
    const FINAL_TYPE: ColumnType = ColumnType::BigInt;

    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        if let Some(value) = arguments[0].bigint_at(position)? {
            self.values.insert(value);
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.values.extend(other.values);
    }

    fn final_value(&self) -> Value {
        Value::BigInt(i64::try_from(self.values.len()).unwrap_or(i64::MAX))
    }
}

/// `count(DISTINCT BIGINT)`
pub type CountDistinct = StateAggregation<CountDistinctState>;

/// `max(VARCHAR) -> VARCHAR`, null over no non-null rows.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MaxVarCharState {
    max: Option<String>,
}

impl AggregationState for MaxVarCharState {
    const NAME: &'static str = "max";
    const PARAMETER_TYPES: &'static [ColumnType] = &[ColumnType::VarChar];
    const FINAL_TYPE: ColumnType = ColumnType::VarChar;

    fn add_row(&mut self, arguments: &[&Column], position: usize) -> AccumulatorResult<()> {
        if let Some(value) = arguments[0].varchar_at(position)? {
            if self.max.as_deref().map_or(true, |max| value > max) {
                self.max = Some(value.to_string());
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.max = self.max.take().max(other.max);
    }

    fn final_value(&self) -> Value {
        self.max.clone().into()
    }
}

/// `max(VARCHAR)`
pub type MaxVarChar = StateAggregation<MaxVarCharState>;
