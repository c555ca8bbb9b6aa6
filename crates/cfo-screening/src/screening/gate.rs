use serde::{Deserialize, Serialize};

use super::domain::{Competition, FullApplication, ReadinessCommitment};
use super::scoring::text_length;

/// Validation errors raised before an application is scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionViolation {
    #[error("competition_id is required")]
    MissingCompetition,
    #[error("{field} requires at least {min} characters (found {found})")]
    TextTooShort {
        field: &'static str,
        min: usize,
        found: usize,
    },
    #[error("{field} allows at most {max} characters (found {found})")]
    TextTooLong {
        field: &'static str,
        max: usize,
        found: usize,
    },
    #[error("applicant indicated they are not ready for CFO responsibilities")]
    NotReadyForCfo,
}

/// Inclusive character bounds for a free-text answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBounds {
    pub min: usize,
    pub max: usize,
}

impl TextBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    fn check(&self, field: &'static str, text: &str) -> Result<(), SubmissionViolation> {
        let found = text_length(text);
        if found < self.min {
            return Err(SubmissionViolation::TextTooShort {
                field,
                min: self.min,
                found,
            });
        }
        if found > self.max {
            return Err(SubmissionViolation::TextTooLong {
                field,
                max: self.max,
                found,
            });
        }
        Ok(())
    }
}

/// Length policy for every free-text answer in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLimits {
    pub capital_justification: TextBounds,
    pub cash_vs_profit: TextBounds,
    pub kpi_prioritization: TextBounds,
    pub dscr_impact: TextBounds,
    pub mindset_explanation: TextBounds,
    pub why_top_100: TextBounds,
}

impl Default for TextLimits {
    fn default() -> Self {
        Self {
            capital_justification: TextBounds::new(50, 300),
            cash_vs_profit: TextBounds::new(50, 500),
            kpi_prioritization: TextBounds::new(50, 500),
            dscr_impact: TextBounds::new(30, 200),
            mindset_explanation: TextBounds::new(30, 150),
            why_top_100: TextBounds::new(100, 300),
        }
    }
}

/// Guard responsible for rejecting malformed submissions before scoring.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    limits: TextLimits,
}

impl SubmissionGuard {
    pub fn with_limits(limits: TextLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &TextLimits {
        &self.limits
    }

    /// Reject the application if it could not be accepted as submitted.
    ///
    /// The readiness gate here rejects outright; scoring keeps its own exclusion for records
    /// that reach the engine through other paths.
    pub fn validate(&self, application: &FullApplication) -> Result<(), SubmissionViolation> {
        if application.competition_id.0.trim().is_empty() {
            return Err(SubmissionViolation::MissingCompetition);
        }

        if application.leadership.readiness_commitment == Some(ReadinessCommitment::NotReady) {
            return Err(SubmissionViolation::NotReadyForCfo);
        }

        let limits = &self.limits;
        let capital = &application.capital_allocation;
        limits
            .capital_justification
            .check("capital_justification", &capital.capital_justification)?;
        limits
            .cash_vs_profit
            .check("cash_vs_profit", &capital.cash_vs_profit)?;
        limits
            .kpi_prioritization
            .check("kpi_prioritization", &capital.kpi_prioritization)?;

        let financial = &application.financial_reality;
        limits
            .dscr_impact
            .check("dscr_impact", &financial.dscr_impact)?;
        limits
            .mindset_explanation
            .check("mindset_explanation", &financial.mindset_explanation)?;

        limits
            .why_top_100
            .check("why_top_100", &application.ethics.why_top_100)?;

        Ok(())
    }
}

/// Why an applicant may not apply to a competition right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    CompetitionNotFound,
    CompetitionNotOpen,
    AlreadyApplied,
}

impl IneligibilityReason {
    pub const fn label(self) -> &'static str {
        match self {
            IneligibilityReason::CompetitionNotFound => "competition_not_found",
            IneligibilityReason::CompetitionNotOpen => "competition_not_open",
            IneligibilityReason::AlreadyApplied => "already_applied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub reasons: Vec<IneligibilityReason>,
}

pub fn assess_eligibility(
    competition: Option<&Competition>,
    already_applied: bool,
) -> EligibilityReport {
    let mut reasons = Vec::new();

    match competition {
        None => reasons.push(IneligibilityReason::CompetitionNotFound),
        Some(competition) if !competition.status.accepts_applications() => {
            reasons.push(IneligibilityReason::CompetitionNotOpen)
        }
        Some(_) => {}
    }

    if already_applied {
        reasons.push(IneligibilityReason::AlreadyApplied);
    }

    EligibilityReport {
        eligible: reasons.is_empty(),
        reasons,
    }
}
