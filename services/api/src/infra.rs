use cfo_screening::screening::{
    ApplicantId, ApplicationId, ApplicationRecord, ApplicationRepository, Competition,
    CompetitionDirectory, CompetitionId, CompetitionStatus, RankingConfig, RepositoryError,
    ScreeningConfig,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Competition served when no external directory is wired in.
pub(crate) const DEFAULT_COMPETITION_ID: &str = "cfo-leadership-2025";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            guard.insert(record.application_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_applicant(
        &self,
        applicant_id: &ApplicantId,
        competition_id: &CompetitionId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| {
                &record.applicant_id == applicant_id && record.competition_id() == competition_id
            })
            .cloned())
    }

    fn list_for_competition(
        &self,
        competition_id: &CompetitionId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.competition_id() == competition_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCompetitionDirectory {
    competitions: Arc<Mutex<HashMap<CompetitionId, Competition>>>,
}

impl InMemoryCompetitionDirectory {
    /// Directory holding a single open competition under [`DEFAULT_COMPETITION_ID`].
    pub(crate) fn with_default_competition() -> Self {
        let directory = Self::default();
        directory.register(Competition {
            id: CompetitionId(DEFAULT_COMPETITION_ID.to_string()),
            title: "CFO Leadership Program".to_string(),
            status: CompetitionStatus::ApplicationsOpen,
        });
        directory
    }

    pub(crate) fn register(&self, competition: Competition) {
        let mut guard = self.competitions.lock().expect("directory mutex poisoned");
        guard.insert(competition.id.clone(), competition);
    }
}

impl CompetitionDirectory for InMemoryCompetitionDirectory {
    fn fetch(&self, id: &CompetitionId) -> Result<Option<Competition>, RepositoryError> {
        let guard = self.competitions.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn default_screening_config(ranking: RankingConfig) -> ScreeningConfig {
    ScreeningConfig {
        ranking,
        ..ScreeningConfig::default()
    }
}
