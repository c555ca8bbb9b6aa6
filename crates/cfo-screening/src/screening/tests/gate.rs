use super::common::*;

use crate::screening::domain::{Competition, CompetitionId, CompetitionStatus, ReadinessCommitment};
use crate::screening::gate::{
    assess_eligibility, IneligibilityReason, SubmissionGuard, SubmissionViolation, TextBounds,
    TextLimits,
};

fn competition(status: CompetitionStatus) -> Competition {
    Competition {
        id: CompetitionId(OPEN_COMPETITION.to_string()),
        title: "CFO Leadership Program".to_string(),
        status,
    }
}

#[test]
fn guard_accepts_complete_application() {
    let guard = SubmissionGuard::default();

    assert_eq!(guard.validate(&application()), Ok(()));
}

#[test]
fn guard_requires_competition() {
    let guard = SubmissionGuard::default();
    let mut application = application();
    application.competition_id = CompetitionId("   ".to_string());

    assert_eq!(
        guard.validate(&application),
        Err(SubmissionViolation::MissingCompetition)
    );
}

#[test]
fn guard_rejects_short_capital_justification() {
    let guard = SubmissionGuard::default();
    let mut application = application();
    application.capital_allocation.capital_justification = prose(49);

    assert_eq!(
        guard.validate(&application),
        Err(SubmissionViolation::TextTooShort {
            field: "capital_justification",
            min: 50,
            found: 49,
        })
    );
}

#[test]
fn guard_rejects_long_motivation() {
    let guard = SubmissionGuard::default();
    let mut application = application();
    application.ethics.why_top_100 = prose(301);

    match guard.validate(&application) {
        Err(SubmissionViolation::TextTooLong { field, max, found }) => {
            assert_eq!(field, "why_top_100");
            assert_eq!(max, 300);
            assert_eq!(found, 301);
        }
        other => panic!("expected too long violation, got {other:?}"),
    }
}

#[test]
fn guard_bounds_are_inclusive() {
    let guard = SubmissionGuard::default();
    let mut application = application();
    application.financial_reality.dscr_impact = prose(30);
    application.financial_reality.mindset_explanation = prose(150);
    application.ethics.why_top_100 = prose(100);
    assert_eq!(guard.validate(&application), Ok(()));

    application.financial_reality.dscr_impact = prose(29);
    assert!(matches!(
        guard.validate(&application),
        Err(SubmissionViolation::TextTooShort {
            field: "dscr_impact",
            ..
        })
    ));
}

#[test]
fn guard_counts_trimmed_characters() {
    let guard = SubmissionGuard::default();
    let mut application = application();
    application.capital_allocation.kpi_prioritization = format!("  {}  ", prose(48));

    assert!(matches!(
        guard.validate(&application),
        Err(SubmissionViolation::TextTooShort {
            field: "kpi_prioritization",
            found: 48,
            ..
        })
    ));

    application.capital_allocation.kpi_prioritization = "é".repeat(60);
    assert_eq!(guard.validate(&application), Ok(()));
}

#[test]
fn guard_rejects_not_ready_applicants() {
    let guard = SubmissionGuard::default();
    let mut application = application();
    application.leadership.readiness_commitment = Some(ReadinessCommitment::NotReady);

    assert_eq!(
        guard.validate(&application),
        Err(SubmissionViolation::NotReadyForCfo)
    );
}

#[test]
fn guard_honours_custom_limits() {
    let limits = TextLimits {
        why_top_100: TextBounds::new(10, 400),
        ..TextLimits::default()
    };
    let guard = SubmissionGuard::with_limits(limits);
    let mut application = application();
    application.ethics.why_top_100 = prose(350);

    assert_eq!(guard.validate(&application), Ok(()));
    assert_eq!(guard.limits().why_top_100.max, 400);
}

#[test]
fn open_competition_without_prior_application_is_eligible() {
    for status in [CompetitionStatus::Open, CompetitionStatus::ApplicationsOpen] {
        let report = assess_eligibility(Some(&competition(status)), false);
        assert!(report.eligible, "{status:?}");
        assert!(report.reasons.is_empty());
    }
}

#[test]
fn eligibility_lists_every_reason() {
    let report = assess_eligibility(Some(&competition(CompetitionStatus::Closed)), true);
    assert!(!report.eligible);
    assert_eq!(
        report.reasons,
        vec![
            IneligibilityReason::CompetitionNotOpen,
            IneligibilityReason::AlreadyApplied
        ]
    );

    let report = assess_eligibility(None, false);
    assert_eq!(report.reasons, vec![IneligibilityReason::CompetitionNotFound]);
}

#[test]
fn only_open_states_accept_applications() {
    for status in [
        CompetitionStatus::Draft,
        CompetitionStatus::InProgress,
        CompetitionStatus::Closed,
    ] {
        let report = assess_eligibility(Some(&competition(status)), false);
        assert_eq!(
            report.reasons,
            vec![IneligibilityReason::CompetitionNotOpen],
            "{status:?}"
        );
    }
}
