use serde::{Deserialize, Serialize};

/// Per-section importance factors applied to raw section points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub leadership: f64,
    pub capital_allocation: f64,
    /// Applied to the financial reality section.
    pub technical_finance: f64,
    pub ethics: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            leadership: 1.2,
            capital_allocation: 1.2,
            technical_finance: 0.8,
            ethics: 1.3,
        }
    }
}
