//! This module contains basic shared functionalities of the library.
/// Conversions from Arrow record batches.
#[cfg(feature = "arrow")]
pub mod arrow;

pub mod database;
