use super::{ColumnError, ColumnResult};

/// The group id assignment of a batch: one group id per row, plus the number of groups
/// the assignment may refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIds {
    group_count: u64,
    ids: Vec<u64>,
}

impl GroupIds {
    /// Creates an assignment from explicit ids. The group count is one past the largest id.
    #[must_use]
    pub fn new(ids: Vec<u64>) -> Self {
        let group_count = ids.iter().max().map_or(0, |max| max + 1);
        Self { group_count, ids }
    }

    /// Tags `positions` rows with the same `group_id`.
    #[must_use]
    pub fn uniform(group_id: u64, positions: usize) -> Self {
        Self {
            group_count: group_id + 1,
            ids: vec![group_id; positions],
        }
    }

    /// Number of groups addressed by this assignment, i.e. one past the largest id.
    #[must_use]
    pub fn group_count(&self) -> u64 {
        self.group_count
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the assignment covers no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The group id of the row at `position`.
    pub fn group_id_at(&self, position: usize) -> ColumnResult<u64> {
        self.ids
            .get(position)
            .copied()
            .ok_or(ColumnError::PositionOutOfBounds {
                position,
                len: self.ids.len(),
            })
    }

    /// All group ids in row order.
    #[must_use]
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }
}
