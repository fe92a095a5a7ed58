//! Re-derivations of the input used by the consistency checks: channel permutations,
//! placeholder channels, and mask channels.
use crate::base::database::{Batch, BatchResult, Column, ColumnType, Value};
use itertools::repeat_n;

use super::ConsistencyCheck;

/// Binds argument `i` to channel `i`.
#[must_use]
pub fn create_args(parameter_count: usize) -> Vec<usize> {
    (0..parameter_count).collect()
}

/// Binds argument `i` to channel `channel_count - 1 - i`. This is where argument `i` lands after
/// [`reverse_columns`].
///
/// Returns `None` when there are fewer channels than arguments.
#[must_use]
pub fn reverse_args(parameter_count: usize, channel_count: usize) -> Option<Vec<usize>> {
    (0..parameter_count)
        .map(|i| channel_count.checked_sub(i + 1))
        .collect()
}

/// Binds argument `i` to channel `i + offset`. This is where argument `i` lands after
/// [`offset_columns`].
#[must_use]
pub fn offset_args(parameter_count: usize, offset: usize) -> Vec<usize> {
    (offset..offset + parameter_count).collect()
}

/// Reverses the channel order of every batch, empty batches included.
#[must_use]
pub fn reverse_columns(batches: &[Batch]) -> Vec<Batch> {
    batches.iter().map(Batch::reverse_channels).collect()
}

/// Places `offset` run-length-encoded null boolean channels before the channels of every batch.
pub fn offset_columns(batches: &[Batch], offset: usize) -> BatchResult<Vec<Batch>> {
    batches
        .iter()
        .map(|batch| {
            batch.prepend_columns(repeat_n(
                Column::null_constant(ColumnType::Boolean, batch.position_count()),
                offset,
            ))
        })
        .collect()
}

/// How a mask channel is physically represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskEncoding {
    /// One boolean per row.
    Materialized,
    /// A single run-length-encoded boolean.
    RunLength,
}

impl MaskEncoding {
    /// The consistency check that compares against masks of this encoding.
    #[must_use]
    pub fn check(self) -> ConsistencyCheck {
        match self {
            MaskEncoding::Materialized => ConsistencyCheck::Mask,
            MaskEncoding::RunLength => ConsistencyCheck::RunLengthMask,
        }
    }
}

/// Appends a materialized mask channel holding `mask` on every row.
pub fn mask_batches(mask: bool, batches: &[Batch]) -> BatchResult<Vec<Batch>> {
    batches
        .iter()
        .map(|batch| batch.append_column(Column::Boolean(vec![Some(mask); batch.position_count()])))
        .collect()
}

/// Appends a run-length-encoded mask channel holding `mask` on every row.
pub fn mask_batches_with_rle(mask: bool, batches: &[Batch]) -> BatchResult<Vec<Batch>> {
    batches
        .iter()
        .map(|batch| {
            batch.append_column(Column::constant(
                Value::Boolean(mask),
                batch.position_count(),
            )?)
        })
        .collect()
}

/// Appends a mask channel holding `mask` on every row, in the given encoding.
pub fn mask_with(encoding: MaskEncoding, mask: bool, batches: &[Batch]) -> BatchResult<Vec<Batch>> {
    match encoding {
        MaskEncoding::Materialized => mask_batches(mask, batches),
        MaskEncoding::RunLength => mask_batches_with_rle(mask, batches),
    }
}

/// Every batch masked true, followed by every batch masked false.
pub fn duplicate_with_masks(batches: &[Batch], encoding: MaskEncoding) -> BatchResult<Vec<Batch>> {
    let mut duplicated = mask_with(encoding, true, batches)?;
    duplicated.extend(mask_with(encoding, false, batches)?);
    Ok(duplicated)
}
