use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::screening::domain::{
    ApplicantId, ApplicationId, CapitalAllocationAnswers, CapitalAllocationChoice, CfoMindset,
    CommitmentLevel, Competition, CompetitionId, CompetitionStatus, CostPriority,
    CultureVsResults, DecisionOwnership, DscrChoice, EthicsAnswers, EthicsChoice,
    ExperienceYears, FinancialRealityAnswers, FullApplication, LeadershipAnswers,
    LeadershipExposure, LeadershipWillingness,
};
use crate::screening::repository::{
    ApplicationRecord, ApplicationRepository, CompetitionDirectory, RepositoryError,
};
use crate::screening::scoring::{ScoreResult, ScoringEngine, SectionScores, TieBreakers};
use crate::screening::{application_router, ScreeningConfig, ScreeningService};

pub(super) const OPEN_COMPETITION: &str = "cfo-2025";
pub(super) const CLOSED_COMPETITION: &str = "cfo-2024";

/// Free text of exactly `len` characters with no surrounding whitespace.
pub(super) fn prose(len: usize) -> String {
    "abcdefghij".chars().cycle().take(len).collect()
}

pub(super) fn leadership() -> LeadershipAnswers {
    LeadershipAnswers {
        experience_years: ExperienceYears::MoreThanTen,
        leadership_exposure: LeadershipExposure::CSuite,
        decision_ownership: DecisionOwnership::FullOwnership,
        leadership_willingness: LeadershipWillingness::FullyReady,
        commitment_level: CommitmentLevel::AllIn,
        readiness_commitment: None,
    }
}

pub(super) fn capital_allocation() -> CapitalAllocationAnswers {
    CapitalAllocationAnswers {
        capital_allocation: CapitalAllocationChoice::GrowthInvestment,
        capital_justification: prose(120),
        cash_vs_profit: prose(120),
        kpi_prioritization: prose(120),
    }
}

pub(super) fn financial_reality() -> FinancialRealityAnswers {
    FinancialRealityAnswers {
        dscr_choice: DscrChoice::BalanceBoth,
        dscr_impact: prose(60),
        cost_priority: CostPriority::OptimizeOperations,
        cfo_mindset: CfoMindset::ChiefValueOfficer,
        mindset_explanation: prose(60),
    }
}

pub(super) fn ethics() -> EthicsAnswers {
    EthicsAnswers {
        ethics_choice: EthicsChoice::ReportImmediately,
        culture_vs_results: CultureVsResults::BalanceBoth,
        why_top_100: prose(250),
    }
}

/// Strong candidate: 430 raw points, 486.0 weighted, no red flags.
pub(super) fn application() -> FullApplication {
    FullApplication {
        competition_id: CompetitionId(OPEN_COMPETITION.to_string()),
        leadership: leadership(),
        capital_allocation: capital_allocation(),
        financial_reality: financial_reality(),
        ethics: ethics(),
    }
}

pub(super) fn application_with_capital(choice: CapitalAllocationChoice) -> FullApplication {
    let mut application = application();
    application.capital_allocation.capital_allocation = choice;
    application
}

pub(super) fn unethical_application() -> FullApplication {
    let mut application = application();
    application.ethics.ethics_choice = EthicsChoice::AdjustQuietly;
    application
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::default()
}

pub(super) fn applicant(suffix: &str) -> ApplicantId {
    ApplicantId(format!("applicant-{suffix}"))
}

pub(super) fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

/// Minimal score result for ranking scenarios.
pub(super) fn score_with(final_score: f64, auto_exclude: bool) -> ScoreResult {
    ScoreResult {
        total_raw_score: 0,
        total_weighted_score: final_score,
        red_flag_penalty: 0,
        final_score,
        red_flags: Vec::new(),
        red_flag_count: 0,
        auto_exclude,
        exclusion_reason: None,
        exclusion_triggers: Vec::new(),
        section_scores: SectionScores {
            leadership: 0.0,
            capital_allocation: 0.0,
            financial_judgment: 0.0,
            ethics: 0.0,
        },
        tie_breakers: TieBreakers {
            leadership_score: 0.0,
            ethics_score: 0.0,
            capital_score: 0.0,
            motivation_length: 0,
        },
    }
}

pub(super) fn build_service() -> (
    ScreeningService<MemoryRepository, MemoryCompetitions>,
    Arc<MemoryRepository>,
) {
    build_service_with(ScreeningConfig::default())
}

pub(super) fn build_service_with(
    config: ScreeningConfig,
) -> (
    ScreeningService<MemoryRepository, MemoryCompetitions>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let competitions = Arc::new(MemoryCompetitions::seeded());
    let service = ScreeningService::new(repository.clone(), competitions, config);
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryRepository {
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
        guard.insert(record.application_id.clone(), record);
        Ok(())
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
pub(super) struct MemoryCompetitions {
    competitions: HashMap<CompetitionId, Competition>,
}

impl MemoryCompetitions {
    pub(super) fn seeded() -> Self {
        let mut competitions = HashMap::new();
        for (id, status) in [
            (OPEN_COMPETITION, CompetitionStatus::Open),
            (CLOSED_COMPETITION, CompetitionStatus::Closed),
        ] {
            let id = CompetitionId(id.to_string());
            competitions.insert(
                id.clone(),
                Competition {
                    id,
                    title: "CFO Leadership Program".to_string(),
                    status,
                },
            );
        }
        Self { competitions }
    }
}

impl CompetitionDirectory for MemoryCompetitions {
    fn fetch(&self, id: &CompetitionId) -> Result<Option<Competition>, RepositoryError> {
        Ok(self.competitions.get(id).cloned())
    }
}

/// Accepts lookups but rejects every insert, as if another writer won the race.
pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn find_by_applicant(
        &self,
        _applicant_id: &ApplicantId,
        _competition_id: &CompetitionId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn list_for_competition(
        &self,
        _competition_id: &CompetitionId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_applicant(
        &self,
        _applicant_id: &ApplicantId,
        _competition_id: &CompetitionId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_for_competition(
        &self,
        _competition_id: &CompetitionId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn application_router_with_service(
    service: ScreeningService<MemoryRepository, MemoryCompetitions>,
) -> axum::Router {
    application_router(Arc::new(service))
}
