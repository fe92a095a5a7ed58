//! Utility functions for creating [`Batch`]es and [`Column`]s.
//! These functions are primarily intended for use in tests.
//!
//! # Example
//! ```
//! use agg_equivalence::base::database::batch_utility::*;
//! let result = batch([
//!     bigint([1, 2, 3]),
//!     boolean([true, false, true]),
//!     double([1.0, 2.0, 3.0]),
//!     varchar(["a", "b", "c"]),
//! ]);
//! assert_eq!(result.position_count(), 3);
//! ```
use super::{Batch, Column};

/// Creates a [`Batch`] from a list of columns.
/// This is a convenience wrapper around [`Batch::try_new`] primarily for use in tests and
/// intended to be used along with the other methods in this module (e.g. [bigint], [boolean], etc).
///
/// # Panics
/// - Panics if the columns have different lengths.
pub fn batch(columns: impl IntoIterator<Item = Column>) -> Batch {
    Batch::try_new(columns.into_iter().collect()).unwrap()
}

/// Creates a non-null boolean column.
/// # Example
/// ```
/// use agg_equivalence::base::database::batch_utility::*;
/// let result = batch([boolean([true, false])]);
/// ```
pub fn boolean(data: impl IntoIterator<Item = impl Into<bool>>) -> Column {
    Column::Boolean(data.into_iter().map(|v| Some(v.into())).collect())
}

/// Creates a non-null bigint column.
/// # Example
/// ```
/// use agg_equivalence::base::database::batch_utility::*;
/// let result = batch([bigint([1, 2, 3])]);
/// ```
pub fn bigint(data: impl IntoIterator<Item = impl Into<i64>>) -> Column {
    Column::BigInt(data.into_iter().map(|v| Some(v.into())).collect())
}

/// Creates a bigint column where `None` is null.
pub fn nullable_bigint(data: impl IntoIterator<Item = Option<i64>>) -> Column {
    Column::BigInt(data.into_iter().collect())
}

/// Creates a non-null real column.
pub fn real(data: impl IntoIterator<Item = impl Into<f32>>) -> Column {
    Column::Real(data.into_iter().map(|v| Some(v.into())).collect())
}

/// Creates a non-null double column.
/// # Example
/// ```
/// use agg_equivalence::base::database::batch_utility::*;
/// let result = batch([double([1.5, 2.5])]);
/// ```
pub fn double(data: impl IntoIterator<Item = impl Into<f64>>) -> Column {
    Column::Double(data.into_iter().map(|v| Some(v.into())).collect())
}

/// Creates a double column where `None` is null.
pub fn nullable_double(data: impl IntoIterator<Item = Option<f64>>) -> Column {
    Column::Double(data.into_iter().collect())
}

/// Creates a non-null varchar column.
/// # Example
/// ```
/// use agg_equivalence::base::database::batch_utility::*;
/// let result = batch([varchar(["a", "b"])]);
/// ```
pub fn varchar(data: impl IntoIterator<Item = impl Into<String>>) -> Column {
    Column::VarChar(data.into_iter().map(|v| Some(v.into())).collect())
}

/// Creates a varchar column where `None` is null.
pub fn nullable_varchar(data: impl IntoIterator<Item = Option<&'static str>>) -> Column {
    Column::VarChar(
        data.into_iter()
            .map(|v| v.map(ToString::to_string))
            .collect(),
    )
}

/// Creates a non-null varbinary column.
pub fn varbinary(data: impl IntoIterator<Item = impl Into<Vec<u8>>>) -> Column {
    Column::VarBinary(data.into_iter().map(|v| Some(v.into())).collect())
}

/// Creates a double column holding `start, start + 1, ..., start + length - 1`.
/// # Example
/// ```
/// use agg_equivalence::base::database::{batch_utility::*, Column};
/// assert_eq!(double_range(2, 3), Column::Double(vec![Some(2.0), Some(3.0), Some(4.0)]));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn double_range(start: i64, length: usize) -> Column {
    Column::Double((start..).take(length).map(|v| Some(v as f64)).collect())
}
