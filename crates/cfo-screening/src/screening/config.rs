use serde::{Deserialize, Serialize};

use super::gate::TextLimits;
use super::ranking::RankingConfig;
use super::scoring::ScoringWeights;

/// Tunables for the screening pipeline, fixed for the lifetime of a service.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreeningConfig {
    pub weights: ScoringWeights,
    pub ranking: RankingConfig,
    pub text_limits: TextLimits,
}
