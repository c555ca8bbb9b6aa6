mod policy;
mod sections;
mod weights;

pub use policy::{red_flag_penalty, ExclusionTrigger, RedFlag, EXCLUSION_REASON};
pub use weights::ScoringWeights;

pub(crate) use sections::text_length;

use super::domain::FullApplication;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless scorer that applies the weight table to a full questionnaire.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score_sections(&self, application: &FullApplication) -> SectionBreakdown {
        SectionBreakdown {
            leadership: sections::score_leadership(
                &application.leadership,
                self.weights.leadership,
            ),
            capital_allocation: sections::score_capital_allocation(
                &application.capital_allocation,
                self.weights.capital_allocation,
            ),
            financial_reality: sections::score_financial_reality(
                &application.financial_reality,
                self.weights.technical_finance,
            ),
            ethics: sections::score_ethics(&application.ethics, self.weights.ethics),
        }
    }

    pub fn score(&self, application: &FullApplication) -> ScoreResult {
        let breakdown = self.score_sections(application);
        let SectionBreakdown {
            leadership,
            capital_allocation,
            financial_reality,
            ethics,
        } = &breakdown;

        let total_raw_score = breakdown
            .iter()
            .map(|section| section.raw_score)
            .sum::<u32>();
        let total_weighted_score = breakdown
            .iter()
            .map(|section| section.weighted_score)
            .sum::<f64>();
        let red_flags: Vec<RedFlag> = breakdown
            .iter()
            .flat_map(|section| section.red_flags.iter().copied())
            .collect();

        let red_flag_penalty = red_flag_penalty(red_flags.len());
        let final_score = total_weighted_score - f64::from(red_flag_penalty);

        // Only the leadership and ethics gates may exclude.
        let auto_exclude = leadership.auto_exclude || ethics.auto_exclude;
        let exclusion_triggers: Vec<ExclusionTrigger> = leadership
            .exclusions
            .iter()
            .chain(ethics.exclusions.iter())
            .copied()
            .collect();

        debug!(
            total_raw_score,
            final_score,
            red_flags = red_flags.len(),
            auto_exclude,
            "scored application"
        );

        ScoreResult {
            total_raw_score,
            total_weighted_score,
            red_flag_penalty,
            final_score,
            red_flag_count: red_flags.len(),
            red_flags,
            auto_exclude,
            exclusion_reason: policy::exclusion_reason(auto_exclude),
            exclusion_triggers,
            section_scores: SectionScores {
                leadership: leadership.weighted_score,
                capital_allocation: capital_allocation.weighted_score,
                financial_judgment: financial_reality.weighted_score,
                ethics: ethics.weighted_score,
            },
            tie_breakers: TieBreakers {
                leadership_score: leadership.weighted_score,
                ethics_score: ethics.weighted_score,
                capital_score: capital_allocation.weighted_score,
                motivation_length: text_length(&application.ethics.why_top_100),
            },
        }
    }
}

/// Outcome of scoring a single questionnaire section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScoreResult {
    pub raw_score: u32,
    pub weighted_score: f64,
    pub red_flags: Vec<RedFlag>,
    pub auto_exclude: bool,
    pub exclusions: Vec<ExclusionTrigger>,
}

/// Per-section results in questionnaire order.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBreakdown {
    pub leadership: SectionScoreResult,
    pub capital_allocation: SectionScoreResult,
    pub financial_reality: SectionScoreResult,
    pub ethics: SectionScoreResult,
}

impl SectionBreakdown {
    pub fn iter(&self) -> impl Iterator<Item = &SectionScoreResult> {
        [
            &self.leadership,
            &self.capital_allocation,
            &self.financial_reality,
            &self.ethics,
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    pub leadership: f64,
    pub capital_allocation: f64,
    pub financial_judgment: f64,
    pub ethics: f64,
}

/// Secondary signals kept for ranking ties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TieBreakers {
    pub leadership_score: f64,
    pub ethics_score: f64,
    pub capital_score: f64,
    pub motivation_length: usize,
}

/// Aggregate score computed once at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_raw_score: u32,
    pub total_weighted_score: f64,
    pub red_flag_penalty: u32,
    pub final_score: f64,
    pub red_flags: Vec<RedFlag>,
    pub red_flag_count: usize,
    pub auto_exclude: bool,
    pub exclusion_reason: Option<String>,
    #[serde(default)]
    pub exclusion_triggers: Vec<ExclusionTrigger>,
    pub section_scores: SectionScores,
    pub tie_breakers: TieBreakers,
}
