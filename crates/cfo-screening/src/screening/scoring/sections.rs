use tracing::warn;

use super::super::domain::{
    CapitalAllocationAnswers, CapitalAllocationChoice, CfoMindset, CommitmentLevel, CostPriority,
    CultureVsResults, DecisionOwnership, DscrChoice, EthicsAnswers, EthicsChoice, ExperienceYears,
    FinancialRealityAnswers, LeadershipAnswers, LeadershipExposure, LeadershipWillingness,
    ReadinessCommitment,
};
use super::policy::{ExclusionTrigger, RedFlag};
use super::SectionScoreResult;

/// Free-text answers are measured in characters once surrounding whitespace is dropped.
pub(crate) fn text_length(text: &str) -> usize {
    text.trim().chars().count()
}

fn unrecognized(field: &'static str) -> u32 {
    warn!(field, "unrecognized categorical answer scored as zero");
    0
}

pub(crate) fn score_leadership(answers: &LeadershipAnswers, weight: f64) -> SectionScoreResult {
    let mut raw_score = 0;
    let mut red_flags = Vec::new();
    let mut exclusions = Vec::new();

    raw_score += match answers.experience_years {
        ExperienceYears::LessThanTwo => 5,
        ExperienceYears::TwoToFive => 15,
        ExperienceYears::FiveToTen => 25,
        ExperienceYears::MoreThanTen => 30,
        ExperienceYears::Unrecognized => unrecognized("experience_years"),
    };

    raw_score += match answers.leadership_exposure {
        LeadershipExposure::None => 0,
        LeadershipExposure::TeamLead => 15,
        LeadershipExposure::DepartmentHead => 25,
        LeadershipExposure::CSuite => 35,
        LeadershipExposure::Unrecognized => unrecognized("leadership_exposure"),
    };

    raw_score += match answers.decision_ownership {
        DecisionOwnership::Avoid => {
            red_flags.push(RedFlag::AvoidsDecisions);
            0
        }
        DecisionOwnership::Delegate => 10,
        DecisionOwnership::OwnWithSupport => 20,
        DecisionOwnership::FullOwnership => 30,
        DecisionOwnership::Unrecognized => unrecognized("decision_ownership"),
    };

    raw_score += match answers.leadership_willingness {
        LeadershipWillingness::NotInterested => 0,
        LeadershipWillingness::MaybeLater => 5,
        LeadershipWillingness::ReadyWithGuidance => 15,
        LeadershipWillingness::FullyReady => 25,
        LeadershipWillingness::Unrecognized => unrecognized("leadership_willingness"),
    };

    raw_score += match answers.commitment_level {
        CommitmentLevel::Exploring => 5,
        CommitmentLevel::PartiallyCommitted => 10,
        CommitmentLevel::HighlyCommitted => 20,
        CommitmentLevel::AllIn => 25,
        CommitmentLevel::Unrecognized => unrecognized("commitment_level"),
    };

    if let Some(readiness) = answers.readiness_commitment {
        raw_score += match readiness {
            ReadinessCommitment::NotReady => {
                // Hard gate: everything accumulated so far is discarded.
                return SectionScoreResult {
                    raw_score: 0,
                    weighted_score: 0.0,
                    red_flags: vec![RedFlag::NotReadyForCfo],
                    auto_exclude: true,
                    exclusions: vec![ExclusionTrigger::NotReadyForCfo],
                };
            }
            ReadinessCommitment::Exploring => 10,
            ReadinessCommitment::ReadyWithConditions => 25,
            ReadinessCommitment::FullyReady => 40,
            ReadinessCommitment::Unrecognized => unrecognized("readiness_commitment"),
        };
    }

    if answers.leadership_willingness == LeadershipWillingness::NotInterested
        && answers.commitment_level == CommitmentLevel::Exploring
    {
        red_flags.push(RedFlag::LowWillingnessCommitment);
        exclusions.push(ExclusionTrigger::LowWillingnessCommitment);
    }

    SectionScoreResult {
        raw_score,
        weighted_score: f64::from(raw_score) * weight,
        red_flags,
        auto_exclude: !exclusions.is_empty(),
        exclusions,
    }
}

/// Tiered points for a written justification: <50 chars, 50-99 chars, 100+ chars.
fn justification_points(text: &str) -> (u32, bool) {
    match text_length(text) {
        0..=49 => (5, true),
        50..=99 => (15, false),
        _ => (20, false),
    }
}

pub(crate) fn score_capital_allocation(
    answers: &CapitalAllocationAnswers,
    weight: f64,
) -> SectionScoreResult {
    let mut raw_score = 0;
    let mut red_flags = Vec::new();

    raw_score += match answers.capital_allocation {
        CapitalAllocationChoice::SafeInvestment => 10,
        CapitalAllocationChoice::ModerateRisk => 20,
        CapitalAllocationChoice::GrowthInvestment => 25,
        CapitalAllocationChoice::AggressiveExpansion => 15,
        CapitalAllocationChoice::Unrecognized => unrecognized("capital_allocation"),
    };

    let (points, weak) = justification_points(&answers.capital_justification);
    raw_score += points;
    if weak {
        red_flags.push(RedFlag::WeakJustification);
    }

    let (points, weak) = justification_points(&answers.cash_vs_profit);
    raw_score += points;
    if weak {
        red_flags.push(RedFlag::WeakCashProfitAnswer);
    }

    // A short KPI answer scores low but is not flagged.
    let (points, _) = justification_points(&answers.kpi_prioritization);
    raw_score += points;

    SectionScoreResult {
        raw_score,
        weighted_score: f64::from(raw_score) * weight,
        red_flags,
        auto_exclude: false,
        exclusions: Vec::new(),
    }
}

pub(crate) fn score_financial_reality(
    answers: &FinancialRealityAnswers,
    weight: f64,
) -> SectionScoreResult {
    let mut raw_score = 0;
    let mut red_flags = Vec::new();

    raw_score += match answers.dscr_choice {
        DscrChoice::PrioritizeDebt => 15,
        DscrChoice::BalanceBoth => 25,
        DscrChoice::PrioritizeGrowth => 10,
        DscrChoice::Renegotiate => 20,
        DscrChoice::Unrecognized => unrecognized("dscr_choice"),
    };

    raw_score += match answers.cost_priority {
        CostPriority::CutPeople => {
            red_flags.push(RedFlag::PeopleFirstCut);
            5
        }
        CostPriority::CutMarketing => 10,
        CostPriority::OptimizeOperations => 25,
        CostPriority::RenegotiateVendors => 20,
        CostPriority::Unrecognized => unrecognized("cost_priority"),
    };

    raw_score += match answers.cfo_mindset {
        CfoMindset::NumberCruncher => 10,
        CfoMindset::BusinessPartner => 20,
        CfoMindset::StrategicAdvisor => 25,
        CfoMindset::ChiefValueOfficer => 30,
        CfoMindset::Unrecognized => unrecognized("cfo_mindset"),
    };

    for explanation in [&answers.dscr_impact, &answers.mindset_explanation] {
        if text_length(explanation) >= 50 {
            raw_score += 10;
        }
    }

    SectionScoreResult {
        raw_score,
        weighted_score: f64::from(raw_score) * weight,
        red_flags,
        auto_exclude: false,
        exclusions: Vec::new(),
    }
}

pub(crate) fn score_ethics(answers: &EthicsAnswers, weight: f64) -> SectionScoreResult {
    let mut raw_score = 0;
    let mut red_flags = Vec::new();
    let mut exclusions = Vec::new();

    raw_score += match answers.ethics_choice {
        EthicsChoice::ReportImmediately => 35,
        EthicsChoice::InvestigateFirst => 30,
        EthicsChoice::ConsultLegal => 25,
        EthicsChoice::AdjustQuietly | EthicsChoice::DoNothing => 0,
        EthicsChoice::Unrecognized => unrecognized("ethics_choice"),
    };

    if answers.ethics_choice.is_disqualifying() {
        red_flags.push(RedFlag::EthicsFailure);
        exclusions.push(ExclusionTrigger::EthicsFailure);
    }

    raw_score += match answers.culture_vs_results {
        CultureVsResults::ResultsFirst => 10,
        CultureVsResults::CultureFirst => 20,
        CultureVsResults::BalanceBoth => 30,
        CultureVsResults::DependsOnSituation => 15,
        CultureVsResults::Unrecognized => unrecognized("culture_vs_results"),
    };

    raw_score += match text_length(&answers.why_top_100) {
        0..=99 => {
            red_flags.push(RedFlag::WeakMotivation);
            10
        }
        100..=199 => 25,
        _ => 35,
    };

    SectionScoreResult {
        raw_score,
        weighted_score: f64::from(raw_score) * weight,
        red_flags,
        auto_exclude: !exclusions.is_empty(),
        exclusions,
    }
}
