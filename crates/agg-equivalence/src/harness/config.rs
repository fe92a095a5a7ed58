use serde::{Deserialize, Serialize};

/// Tunables of the equivalence checks. The defaults are what every aggregation is held to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Number of null placeholder channels placed before the arguments in the offset variant.
    pub channel_offset: usize,
    /// The group id compared against group 0 by the grouped strategy.
    pub large_group_id: u64,
    /// Absolute tolerance for expected `DOUBLE` values.
    pub double_tolerance: f64,
    /// Absolute tolerance for expected `REAL` values.
    pub real_tolerance: f32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            channel_offset: 3,
            large_group_id: 4000,
            double_tolerance: 1.0e-10,
            real_tolerance: 1.0e-10,
        }
    }
}
