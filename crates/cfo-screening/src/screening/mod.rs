//! CFO application screening: questionnaire scoring, hard gates, submission checks, and
//! competition-wide ranking.
//!
//! Scoring and ranking are pure; persistence and competition lookups are delegated to the
//! [`ApplicationRepository`] and [`CompetitionDirectory`] collaborators.

pub mod config;
pub mod domain;
pub mod export;
pub mod gate;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::ScreeningConfig;
pub use domain::{
    ApplicantId, ApplicationId, ApplicationStatus, CapitalAllocationAnswers,
    CapitalAllocationChoice, CfoMindset, CommitmentLevel, Competition, CompetitionId,
    CompetitionStatus, CostPriority, CultureVsResults, DecisionOwnership, DscrChoice,
    EthicsAnswers, EthicsChoice, ExperienceYears, FinancialRealityAnswers, FullApplication,
    LeadershipAnswers, LeadershipExposure, LeadershipWillingness, ReadinessCommitment,
};
pub use export::write_ranking_csv;
pub use gate::{
    assess_eligibility, EligibilityReport, IneligibilityReason, SubmissionGuard,
    SubmissionViolation, TextBounds, TextLimits,
};
pub use ranking::{rank, CompetitionRanking, RankedApplication, RankingConfig};
pub use repository::{
    AdminOverride, ApplicationRecord, ApplicationRepository, ApplicationStatusView,
    CompetitionDirectory, RepositoryError,
};
pub use router::{application_router, SubmitRequest};
pub use scoring::{
    red_flag_penalty, ExclusionTrigger, RedFlag, ScoreResult, ScoringEngine, ScoringWeights,
    SectionBreakdown, SectionScoreResult, SectionScores, TieBreakers, EXCLUSION_REASON,
};
pub use service::{ScreeningService, ScreeningServiceError, StatusOverride};
