use super::{Column, ColumnError};
use snafu::Snafu;

/// An error that occurs when working with batches.
#[derive(Snafu, Debug, PartialEq)]
pub enum BatchError {
    /// The columns have different lengths.
    #[snafu(display(
        "Column {channel} has {actual} positions but the batch has {expected} positions"
    ))]
    ColumnLengthMismatch {
        /// The channel of the offending column
        channel: usize,
        /// The position count of the batch
        expected: usize,
        /// The length of the offending column
        actual: usize,
    },

    /// A channel past the last column was requested.
    #[snafu(display("Channel {channel} is out of bounds for a batch with {channel_count} channels"))]
    ChannelOutOfBounds {
        /// The requested channel
        channel: usize,
        /// The number of channels of the batch
        channel_count: usize,
    },

    /// Errors from the columns of the batch
    #[snafu(transparent)]
    Column {
        /// The underlying source error
        source: ColumnError,
    },
}

/// Result type for batch operations
pub type BatchResult<T> = Result<T, BatchError>;

/// An immutable page of columnar data: an ordered list of columns sharing one position count.
///
/// Channels are the indexes of the columns. Every transformation returns a new batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    position_count: usize,
    columns: Vec<Column>,
}

impl Batch {
    /// Creates a new batch, taking the position count from the first column.
    ///
    /// A batch without columns has zero positions; use [`Batch::try_new_with_position_count`]
    /// to create a column-less batch with positions.
    pub fn try_new(columns: Vec<Column>) -> BatchResult<Self> {
        let position_count = columns.first().map_or(0, Column::len);
        Self::try_new_with_position_count(position_count, columns)
    }

    /// Creates a new batch with an explicit position count.
    pub fn try_new_with_position_count(
        position_count: usize,
        columns: Vec<Column>,
    ) -> BatchResult<Self> {
        if let Some((channel, column)) = columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != position_count)
        {
            return Err(BatchError::ColumnLengthMismatch {
                channel,
                expected: position_count,
                actual: column.len(),
            });
        }
        Ok(Self {
            position_count,
            columns,
        })
    }

    /// Number of rows in the batch.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.position_count
    }

    /// Number of columns in the batch.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the batch has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position_count == 0
    }

    /// The columns of the batch in channel order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column at `channel`.
    pub fn column(&self, channel: usize) -> BatchResult<&Column> {
        self.columns
            .get(channel)
            .ok_or(BatchError::ChannelOutOfBounds {
                channel,
                channel_count: self.channel_count(),
            })
    }

    /// Returns the rows `[offset, offset + length)` of every column as a new batch.
    pub fn region(&self, offset: usize, length: usize) -> BatchResult<Self> {
        if offset.checked_add(length).map_or(true, |end| end > self.position_count) {
            return Err(ColumnError::RegionOutOfBounds {
                offset,
                length,
                len: self.position_count,
            }
            .into());
        }
        let columns = self
            .columns
            .iter()
            .map(|column| column.region(offset, length))
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_new_with_position_count(length, columns)
    }

    /// Returns a new batch with `column` added as the last channel.
    pub fn append_column(&self, column: Column) -> BatchResult<Self> {
        let mut columns = self.columns.clone();
        columns.push(column);
        Self::try_new_with_position_count(self.position_count, columns)
    }

    /// Returns a new batch with `prefix` placed before the existing channels.
    pub fn prepend_columns(&self, prefix: impl IntoIterator<Item = Column>) -> BatchResult<Self> {
        let columns = prefix.into_iter().chain(self.columns.iter().cloned()).collect();
        Self::try_new_with_position_count(self.position_count, columns)
    }

    /// Returns a new batch with the channel order reversed.
    #[must_use]
    pub fn reverse_channels(&self) -> Self {
        Self {
            position_count: self.position_count,
            columns: self.columns.iter().rev().cloned().collect(),
        }
    }
}
