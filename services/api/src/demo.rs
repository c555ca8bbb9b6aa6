use crate::infra::{
    default_screening_config, InMemoryApplicationRepository, InMemoryCompetitionDirectory,
};
use cfo_screening::error::AppError;
use cfo_screening::screening::{
    ApplicantId, ApplicationStatus, CapitalAllocationAnswers, CapitalAllocationChoice,
    CfoMindset, CommitmentLevel, Competition, CompetitionId, CompetitionStatus, CostPriority,
    CultureVsResults, DecisionOwnership, DscrChoice, EthicsAnswers, EthicsChoice,
    ExperienceYears, FinancialRealityAnswers, FullApplication, LeadershipAnswers,
    LeadershipExposure, LeadershipWillingness, RankingConfig, ReadinessCommitment,
    ScreeningService, ScreeningServiceError,
};
use clap::Args;
use std::collections::HashMap;
use std::sync::Arc;

const DEMO_COMPETITION_ID: &str = "cfo-demo";
const ANSWER_FILLER: &str =
    "Protect liquidity first, then fund growth that clears the hurdle rate and builds trust. ";

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of synthetic applicants to submit
    #[arg(long, default_value_t = 12)]
    pub(crate) applicants: usize,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let applicants = args.applicants.max(1);
    let competition_id = CompetitionId(DEMO_COMPETITION_ID.to_string());

    let competitions = InMemoryCompetitionDirectory::default();
    competitions.register(Competition {
        id: competition_id.clone(),
        title: "CFO Leadership Program (demo)".to_string(),
        status: CompetitionStatus::ApplicationsOpen,
    });
    let service = ScreeningService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(competitions),
        default_screening_config(demo_cutoffs(applicants)),
    );

    let cutoffs = service.ranking_config();
    println!("CFO screening demo");
    println!(
        "- {applicants} applicants | qualified <= {} | reserve <= {}",
        cutoffs.qualified_cutoff, cutoffs.reserve_cutoff
    );

    let mut applicant_by_application = HashMap::new();
    for index in 0..applicants {
        let applicant_id = ApplicantId(format!("applicant-{index:03}"));
        let record = service.submit(
            applicant_id.clone(),
            synthetic_application(&competition_id, index),
        )?;
        applicant_by_application.insert(record.application_id, applicant_id);
    }

    let repeat = ApplicantId("applicant-000".to_string());
    match service.submit(repeat, synthetic_application(&competition_id, 0)) {
        Err(ScreeningServiceError::DuplicateSubmission { applicant_id, .. }) => {
            println!("- second submission from {applicant_id} rejected as duplicate");
        }
        Err(err) => return Err(err.into()),
        Ok(record) => println!(
            "- unexpected second submission accepted as {}",
            record.application_id
        ),
    }

    let ranking = service.rank_competition(&competition_id)?;

    println!("\nRanking");
    println!(
        "{:>5}  {:<12} {:<15} {:<13} {:>8}  red flags",
        "rank", "application", "applicant", "status", "score"
    );
    for entry in &ranking.entries {
        let record = service.get(&entry.application_id)?;
        let rank = entry
            .rank
            .map(|rank| rank.to_string())
            .unwrap_or_else(|| "-".to_string());
        let flags: Vec<&str> = record.score.red_flags.iter().map(|flag| flag.label()).collect();
        let applicant = applicant_by_application
            .get(&entry.application_id)
            .map(|id| id.0.as_str())
            .unwrap_or("?");
        println!(
            "{:>5}  {:<12} {:<15} {:<13} {:>8.2}  {}",
            rank,
            entry.application_id,
            applicant,
            entry.status.label(),
            entry.final_score,
            if flags.is_empty() {
                "-".to_string()
            } else {
                flags.join(", ")
            }
        );
    }

    println!(
        "\nSummary: {} qualified | {} reserve | {} not selected | {} excluded",
        ranking.count(ApplicationStatus::Qualified),
        ranking.count(ApplicationStatus::Reserve),
        ranking.count(ApplicationStatus::NotSelected),
        ranking.count(ApplicationStatus::Excluded)
    );

    Ok(())
}

/// Cutoffs scaled to the demo pool so every status shows up.
fn demo_cutoffs(applicants: usize) -> RankingConfig {
    let qualified_cutoff = (applicants / 3).max(1);
    RankingConfig {
        qualified_cutoff,
        reserve_cutoff: (applicants / 2).max(qualified_cutoff),
        tie_break: false,
    }
}

/// Free text of exactly `len` characters that never ends in whitespace.
fn answer_text(len: usize) -> String {
    let mut text: String = ANSWER_FILLER.chars().cycle().take(len).collect();
    if text.ends_with(' ') {
        text.pop();
        text.push('.');
    }
    text
}

/// Deterministic questionnaire that always passes the submission checks.
///
/// Every fourth applicant trips the willingness/commitment gate and every seventh the ethics
/// gate, so demo pools contain excluded entries.
pub(crate) fn synthetic_application(
    competition_id: &CompetitionId,
    index: usize,
) -> FullApplication {
    const EXPERIENCE: [ExperienceYears; 4] = [
        ExperienceYears::LessThanTwo,
        ExperienceYears::TwoToFive,
        ExperienceYears::FiveToTen,
        ExperienceYears::MoreThanTen,
    ];
    const EXPOSURE: [LeadershipExposure; 4] = [
        LeadershipExposure::None,
        LeadershipExposure::TeamLead,
        LeadershipExposure::DepartmentHead,
        LeadershipExposure::CSuite,
    ];
    const OWNERSHIP: [DecisionOwnership; 4] = [
        DecisionOwnership::Avoid,
        DecisionOwnership::Delegate,
        DecisionOwnership::OwnWithSupport,
        DecisionOwnership::FullOwnership,
    ];
    const WILLINGNESS: [LeadershipWillingness; 4] = [
        LeadershipWillingness::NotInterested,
        LeadershipWillingness::MaybeLater,
        LeadershipWillingness::ReadyWithGuidance,
        LeadershipWillingness::FullyReady,
    ];
    const COMMITMENT: [CommitmentLevel; 4] = [
        CommitmentLevel::Exploring,
        CommitmentLevel::PartiallyCommitted,
        CommitmentLevel::HighlyCommitted,
        CommitmentLevel::AllIn,
    ];
    const READINESS: [ReadinessCommitment; 3] = [
        ReadinessCommitment::Exploring,
        ReadinessCommitment::ReadyWithConditions,
        ReadinessCommitment::FullyReady,
    ];
    const CAPITAL: [CapitalAllocationChoice; 4] = [
        CapitalAllocationChoice::SafeInvestment,
        CapitalAllocationChoice::ModerateRisk,
        CapitalAllocationChoice::GrowthInvestment,
        CapitalAllocationChoice::AggressiveExpansion,
    ];
    const DSCR: [DscrChoice; 4] = [
        DscrChoice::PrioritizeDebt,
        DscrChoice::BalanceBoth,
        DscrChoice::PrioritizeGrowth,
        DscrChoice::Renegotiate,
    ];
    const COSTS: [CostPriority; 4] = [
        CostPriority::CutPeople,
        CostPriority::CutMarketing,
        CostPriority::OptimizeOperations,
        CostPriority::RenegotiateVendors,
    ];
    const MINDSET: [CfoMindset; 4] = [
        CfoMindset::NumberCruncher,
        CfoMindset::BusinessPartner,
        CfoMindset::StrategicAdvisor,
        CfoMindset::ChiefValueOfficer,
    ];
    const ETHICS: [EthicsChoice; 7] = [
        EthicsChoice::ReportImmediately,
        EthicsChoice::InvestigateFirst,
        EthicsChoice::ConsultLegal,
        EthicsChoice::ReportImmediately,
        EthicsChoice::InvestigateFirst,
        EthicsChoice::ConsultLegal,
        EthicsChoice::AdjustQuietly,
    ];
    const CULTURE: [CultureVsResults; 4] = [
        CultureVsResults::ResultsFirst,
        CultureVsResults::CultureFirst,
        CultureVsResults::BalanceBoth,
        CultureVsResults::DependsOnSituation,
    ];

    FullApplication {
        competition_id: competition_id.clone(),
        leadership: LeadershipAnswers {
            experience_years: EXPERIENCE[index % 4],
            leadership_exposure: EXPOSURE[(index / 2) % 4],
            decision_ownership: OWNERSHIP[(index + 1) % 4],
            leadership_willingness: WILLINGNESS[(index * 3) % 4],
            commitment_level: COMMITMENT[(index * 5) % 4],
            readiness_commitment: (index % 2 == 1).then(|| READINESS[(index / 2) % 3]),
        },
        capital_allocation: CapitalAllocationAnswers {
            capital_allocation: CAPITAL[(index + 2) % 4],
            capital_justification: answer_text(50 + (index * 37) % 251),
            cash_vs_profit: answer_text(50 + (index * 53) % 451),
            kpi_prioritization: answer_text(50 + (index * 29) % 451),
        },
        financial_reality: FinancialRealityAnswers {
            dscr_choice: DSCR[(index + 1) % 4],
            dscr_impact: answer_text(30 + (index * 17) % 171),
            cost_priority: COSTS[(index + 2) % 4],
            cfo_mindset: MINDSET[index % 4],
            mindset_explanation: answer_text(30 + (index * 11) % 121),
        },
        ethics: EthicsAnswers {
            ethics_choice: ETHICS[index % 7],
            culture_vs_results: CULTURE[index % 4],
            why_top_100: answer_text(100 + (index * 41) % 201),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfo_screening::screening::{ScoringEngine, SubmissionGuard};

    #[test]
    fn synthetic_pool_passes_submission_checks() {
        let guard = SubmissionGuard::default();
        let competition = CompetitionId(DEMO_COMPETITION_ID.to_string());

        for index in 0..200 {
            let application = synthetic_application(&competition, index);
            assert_eq!(guard.validate(&application), Ok(()), "applicant {index}");
        }
    }

    #[test]
    fn synthetic_pool_includes_exclusions() {
        let engine = ScoringEngine::default();
        let competition = CompetitionId(DEMO_COMPETITION_ID.to_string());

        assert!(engine.score(&synthetic_application(&competition, 4)).auto_exclude);
        assert!(engine.score(&synthetic_application(&competition, 6)).auto_exclude);
        assert!(!engine.score(&synthetic_application(&competition, 1)).auto_exclude);
    }

    #[test]
    fn answer_text_has_exact_trimmed_length() {
        for len in [30, 50, 87, 88, 300] {
            let text = answer_text(len);
            assert_eq!(text.trim().chars().count(), len, "length {len}");
        }
    }

    #[test]
    fn demo_cutoffs_scale_with_pool() {
        let cutoffs = demo_cutoffs(12);
        assert_eq!(cutoffs.qualified_cutoff, 4);
        assert_eq!(cutoffs.reserve_cutoff, 6);

        let single = demo_cutoffs(1);
        assert_eq!(single.qualified_cutoff, 1);
        assert_eq!(single.reserve_cutoff, 1);
    }

    #[test]
    fn demo_runs_end_to_end() {
        run_demo(DemoArgs { applicants: 9 }).expect("demo completes");
    }
}
