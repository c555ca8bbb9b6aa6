use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::config::ScreeningConfig;
use super::domain::{ApplicantId, ApplicationId, ApplicationStatus, CompetitionId, FullApplication};
use super::gate::{assess_eligibility, EligibilityReport, SubmissionGuard, SubmissionViolation};
use super::ranking::{rank, CompetitionRanking, RankedApplication, RankingConfig};
use super::repository::{
    AdminOverride, ApplicationRecord, ApplicationRepository, ApplicationStatusView,
    CompetitionDirectory, RepositoryError,
};
use super::scoring::ScoringEngine;

/// Service composing the submission guard, scoring engine, repository, and ranking.
pub struct ScreeningService<R, C> {
    guard: Arc<SubmissionGuard>,
    repository: Arc<R>,
    competitions: Arc<C>,
    engine: Arc<ScoringEngine>,
    ranking: RankingConfig,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("cfo-{id:06}"))
}

/// Administrator request to replace an application's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOverride {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub reason: Option<String>,
    pub overridden_by: String,
}

impl<R, C> ScreeningService<R, C>
where
    R: ApplicationRepository + 'static,
    C: CompetitionDirectory + 'static,
{
    pub fn new(repository: Arc<R>, competitions: Arc<C>, config: ScreeningConfig) -> Self {
        Self {
            guard: Arc::new(SubmissionGuard::with_limits(config.text_limits)),
            repository,
            competitions,
            engine: Arc::new(ScoringEngine::new(config.weights)),
            ranking: config.ranking,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn ranking_config(&self) -> &RankingConfig {
        &self.ranking
    }

    /// Report whether the applicant may apply to the competition right now.
    pub fn check_eligibility(
        &self,
        applicant_id: &ApplicantId,
        competition_id: &CompetitionId,
    ) -> Result<EligibilityReport, ScreeningServiceError> {
        let competition = self.competitions.fetch(competition_id)?;
        let already_applied = self
            .repository
            .find_by_applicant(applicant_id, competition_id)?
            .is_some();

        Ok(assess_eligibility(competition.as_ref(), already_applied))
    }

    /// Validate, score, and persist a new application.
    pub fn submit(
        &self,
        applicant_id: ApplicantId,
        application: FullApplication,
    ) -> Result<ApplicationRecord, ScreeningServiceError> {
        self.guard.validate(&application)?;

        let competition_id = application.competition_id.clone();
        let competition = self
            .competitions
            .fetch(&competition_id)?
            .ok_or_else(|| {
                ScreeningServiceError::CompetitionNotFound(competition_id.clone())
            })?;
        if !competition.status.accepts_applications() {
            return Err(ScreeningServiceError::CompetitionClosed(competition_id));
        }

        if self
            .repository
            .find_by_applicant(&applicant_id, &competition_id)?
            .is_some()
        {
            warn!(
                applicant = %applicant_id,
                competition = %competition_id,
                "duplicate application rejected"
            );
            return Err(ScreeningServiceError::DuplicateSubmission {
                applicant_id,
                competition_id,
            });
        }

        let score = self.engine.score(&application);
        let status = if score.auto_exclude {
            ApplicationStatus::Excluded
        } else {
            ApplicationStatus::Submitted
        };

        let record = ApplicationRecord {
            application_id: next_application_id(),
            applicant_id,
            application,
            score,
            status,
            rank: None,
            admin_override: None,
        };

        let stored = self.repository.insert(record)?;
        info!(
            application = %stored.application_id,
            competition = %competition_id,
            status = stored.status.label(),
            final_score = stored.score.final_score,
            "application scored"
        );
        Ok(stored)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ScreeningServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Rank every stored application of a competition and persist ranks and statuses.
    ///
    /// Run once applications have closed; concurrent submissions are not part of the snapshot.
    /// Records with an administrator override keep their status but still receive a rank.
    pub fn rank_competition(
        &self,
        competition_id: &CompetitionId,
    ) -> Result<CompetitionRanking, ScreeningServiceError> {
        let (entries, records) = self.ranked_snapshot(competition_id)?;
        for record in records {
            self.repository.update(record)?;
        }

        let ranking = CompetitionRanking {
            competition_id: competition_id.clone(),
            entries,
        };
        info!(
            competition = %competition_id,
            qualified = ranking.count(ApplicationStatus::Qualified),
            reserve = ranking.count(ApplicationStatus::Reserve),
            not_selected = ranking.count(ApplicationStatus::NotSelected),
            excluded = ranking.count(ApplicationStatus::Excluded),
            "competition ranked"
        );
        Ok(ranking)
    }

    /// Preview the competition ranking as status views without writing anything back.
    ///
    /// Ranks are computed on the fly, so they can differ from the ones last persisted by
    /// [`ScreeningService::rank_competition`].
    pub fn list_competition(
        &self,
        competition_id: &CompetitionId,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationStatusView>, ScreeningServiceError> {
        let (_, records) = self.ranked_snapshot(competition_id)?;
        Ok(records
            .iter()
            .filter(|record| status.map_or(true, |status| record.status == status))
            .map(ApplicationRecord::status_view)
            .collect())
    }

    /// Rank the stored pool and project each record's new rank and status, in ranking order.
    fn ranked_snapshot(
        &self,
        competition_id: &CompetitionId,
    ) -> Result<(Vec<RankedApplication>, Vec<ApplicationRecord>), ScreeningServiceError> {
        if self.competitions.fetch(competition_id)?.is_none() {
            return Err(ScreeningServiceError::CompetitionNotFound(
                competition_id.clone(),
            ));
        }

        let records = self.repository.list_for_competition(competition_id)?;
        let entries = rank(
            records
                .iter()
                .map(|record| (&record.application_id, &record.score)),
            &self.ranking,
        );

        let mut by_id: HashMap<&ApplicationId, &ApplicationRecord> = records
            .iter()
            .map(|record| (&record.application_id, record))
            .collect();

        let mut projected = Vec::with_capacity(entries.len());
        for entry in &entries {
            let Some(record) = by_id.remove(&entry.application_id) else {
                continue;
            };
            let mut record = record.clone();
            record.rank = entry.rank;
            if record.admin_override.is_none() {
                record.status = entry.status;
            }
            projected.push(record);
        }

        Ok((entries, projected))
    }

    /// Replace the status of an application without touching its score.
    ///
    /// Applications outside `competition_id` are reported as not found.
    pub fn override_status(
        &self,
        competition_id: &CompetitionId,
        application_id: &ApplicationId,
        request: StatusOverride,
    ) -> Result<ApplicationRecord, ScreeningServiceError> {
        let mut record = self.get(application_id)?;
        if record.competition_id() != competition_id {
            return Err(RepositoryError::NotFound.into());
        }

        record.status = request.status;
        record.admin_override = Some(AdminOverride {
            status: request.status,
            reason: request.reason,
            overridden_by: request.overridden_by,
            overridden_at: Utc::now(),
        });

        self.repository.update(record.clone())?;
        info!(
            application = %application_id,
            status = request.status.label(),
            "status overridden by administrator"
        );
        Ok(record)
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    Validation(#[from] SubmissionViolation),
    #[error("applicant {applicant_id} already applied to competition {competition_id}")]
    DuplicateSubmission {
        applicant_id: ApplicantId,
        competition_id: CompetitionId,
    },
    #[error("competition {0} not found")]
    CompetitionNotFound(CompetitionId),
    #[error("competition {0} is not accepting applications")]
    CompetitionClosed(CompetitionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
