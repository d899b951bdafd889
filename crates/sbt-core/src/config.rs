#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-tree settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeConfig {
    /// Seed for the tree's random source. `None` seeds from the wall clock, which
    /// makes `RandomSelector` choices differ between runs.
    pub seed: Option<u64>,
}

impl TreeConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}
