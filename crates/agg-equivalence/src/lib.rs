#![doc = include_str!("../README.md")]

pub mod aggregation;
pub mod base;
pub mod harness;

#[cfg(any(test, feature = "test"))]
pub mod testing;
