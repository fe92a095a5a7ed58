//! This module provides conversions between Arrow data structures and harness batches.

/// Module for converting between Arrow arrays and record batches and [`Column`](crate::base::database::Column)s
/// and [`Batch`](crate::base::database::Batch)es.
pub mod record_batch_conversion;
