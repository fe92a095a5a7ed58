//! Module with the columnar data model the harness runs aggregations over. In particular, this
//! module contains the `Batch` and `Column` types along with the output sink accumulators write into.
mod column_type;
pub use column_type::ColumnType;

mod value;
pub use value::Value;

mod column_error;
pub use column_error::{ColumnError, ColumnResult};

mod column;
pub use column::{Column, ConstantColumn};

mod column_builder;
pub use column_builder::ColumnBuilder;
#[cfg(test)]
mod column_builder_test;

mod batch;
pub use batch::{Batch, BatchError, BatchResult};

pub mod batch_utility;

mod group_ids;
pub use group_ids::GroupIds;
