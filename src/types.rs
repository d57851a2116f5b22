use serde::{Deserialize, Serialize};

/// Whole-year age of the household, the simulation's unit of time.
/// A trial advances in one-year steps from the current age to the
/// horizon age inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Age(pub u32);

impl Age {
    /// Number of simulated years in `[self, horizon]`, both ends included.
    pub fn years_until(self, horizon: Age) -> usize {
        (horizon.0.saturating_sub(self.0) + 1) as usize
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
