use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicantId, ApplicationId, ApplicationStatus, Competition, CompetitionId, FullApplication,
};
use super::scoring::{RedFlag, ScoreResult};

/// Manual status decision recorded by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOverride {
    pub status: ApplicationStatus,
    pub reason: Option<String>,
    pub overridden_by: String,
    pub overridden_at: DateTime<Utc>,
}

/// Repository record containing the questionnaire, its score, and status metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub application: FullApplication,
    pub score: ScoreResult,
    pub status: ApplicationStatus,
    pub rank: Option<usize>,
    pub admin_override: Option<AdminOverride>,
}

impl ApplicationRecord {
    pub fn competition_id(&self) -> &CompetitionId {
        &self.application.competition_id
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            competition_id: self.competition_id().clone(),
            status: self.status.label(),
            final_score: self.score.final_score,
            auto_exclude: self.score.auto_exclude,
            exclusion_reason: self.score.exclusion_reason.clone(),
            exclusion_details: self
                .score
                .exclusion_triggers
                .iter()
                .map(|trigger| trigger.summary())
                .collect(),
            red_flags: self.score.red_flags.clone(),
            rank: self.rank,
            admin_override: self.admin_override.is_some(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn find_by_applicant(
        &self,
        applicant_id: &ApplicantId,
        competition_id: &CompetitionId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn list_for_competition(
        &self,
        competition_id: &CompetitionId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Read-only lookup of competitions owned by the hosting platform.
pub trait CompetitionDirectory: Send + Sync {
    fn fetch(&self, id: &CompetitionId) -> Result<Option<Competition>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub competition_id: CompetitionId,
    pub status: &'static str,
    pub final_score: f64,
    pub auto_exclude: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusion_reason: Option<String>,
    /// Human-readable explanation for each hard gate that fired.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclusion_details: Vec<String>,
    pub red_flags: Vec<RedFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    pub admin_override: bool,
}
