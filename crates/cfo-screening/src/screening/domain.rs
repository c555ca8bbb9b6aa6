use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier of the person applying.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Identifier of the competition an application targets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompetitionId(pub String);

macro_rules! display_inner {
    ($($id:ty),*) => {
        $(impl fmt::Display for $id {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        })*
    };
}

display_inner!(ApplicationId, ApplicantId, CompetitionId);

/// Complete four-step questionnaire as submitted by an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullApplication {
    pub competition_id: CompetitionId,
    #[serde(alias = "step1")]
    pub leadership: LeadershipAnswers,
    #[serde(alias = "step2")]
    pub capital_allocation: CapitalAllocationAnswers,
    #[serde(alias = "step3")]
    pub financial_reality: FinancialRealityAnswers,
    #[serde(alias = "step4")]
    pub ethics: EthicsAnswers,
}

/// Step 1: leadership profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadershipAnswers {
    pub experience_years: ExperienceYears,
    pub leadership_exposure: LeadershipExposure,
    pub decision_ownership: DecisionOwnership,
    pub leadership_willingness: LeadershipWillingness,
    pub commitment_level: CommitmentLevel,
    /// Merged readiness and commitment question; older questionnaires omit it.
    #[serde(
        default,
        alias = "cfo_readiness_commitment",
        skip_serializing_if = "Option::is_none"
    )]
    pub readiness_commitment: Option<ReadinessCommitment>,
}

/// Step 2: judgment and capital allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalAllocationAnswers {
    pub capital_allocation: CapitalAllocationChoice,
    pub capital_justification: String,
    pub cash_vs_profit: String,
    pub kpi_prioritization: String,
}

/// Step 3: financial reality under pressure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRealityAnswers {
    pub dscr_choice: DscrChoice,
    pub dscr_impact: String,
    pub cost_priority: CostPriority,
    pub cfo_mindset: CfoMindset,
    pub mindset_explanation: String,
}

/// Step 4: ethics and final ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthicsAnswers {
    pub ethics_choice: EthicsChoice,
    pub culture_vs_results: CultureVsResults,
    pub why_top_100: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceYears {
    #[serde(rename = "less_than_2")]
    LessThanTwo,
    #[serde(rename = "2_to_5")]
    TwoToFive,
    #[serde(rename = "5_to_10")]
    FiveToTen,
    #[serde(rename = "more_than_10")]
    MoreThanTen,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadershipExposure {
    None,
    TeamLead,
    DepartmentHead,
    CSuite,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOwnership {
    Avoid,
    Delegate,
    OwnWithSupport,
    FullOwnership,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadershipWillingness {
    NotInterested,
    MaybeLater,
    ReadyWithGuidance,
    FullyReady,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentLevel {
    Exploring,
    PartiallyCommitted,
    HighlyCommitted,
    AllIn,
    #[serde(other)]
    Unrecognized,
}

/// Merged readiness question. `NotReady` is a hard gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessCommitment {
    NotReady,
    Exploring,
    ReadyWithConditions,
    FullyReady,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalAllocationChoice {
    SafeInvestment,
    ModerateRisk,
    GrowthInvestment,
    AggressiveExpansion,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DscrChoice {
    PrioritizeDebt,
    BalanceBoth,
    PrioritizeGrowth,
    Renegotiate,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPriority {
    CutPeople,
    CutMarketing,
    OptimizeOperations,
    RenegotiateVendors,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CfoMindset {
    NumberCruncher,
    BusinessPartner,
    StrategicAdvisor,
    ChiefValueOfficer,
    #[serde(other)]
    Unrecognized,
}

/// Ethics scenario response. `AdjustQuietly` and `DoNothing` disqualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EthicsChoice {
    ReportImmediately,
    InvestigateFirst,
    ConsultLegal,
    AdjustQuietly,
    DoNothing,
    #[serde(other)]
    Unrecognized,
}

impl EthicsChoice {
    pub const fn is_disqualifying(self) -> bool {
        matches!(self, EthicsChoice::AdjustQuietly | EthicsChoice::DoNothing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CultureVsResults {
    ResultsFirst,
    CultureFirst,
    BalanceBoth,
    DependsOnSituation,
    #[serde(other)]
    Unrecognized,
}

/// Competition snapshot exposed by the competition directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub title: String,
    pub status: CompetitionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionStatus {
    Draft,
    Open,
    ApplicationsOpen,
    InProgress,
    Closed,
}

impl CompetitionStatus {
    pub const fn accepts_applications(self) -> bool {
        matches!(
            self,
            CompetitionStatus::Open | CompetitionStatus::ApplicationsOpen
        )
    }
}

/// High level status tracked throughout the application lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    Excluded,
    Qualified,
    Reserve,
    NotSelected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Excluded => "excluded",
            ApplicationStatus::Qualified => "qualified",
            ApplicationStatus::Reserve => "reserve",
            ApplicationStatus::NotSelected => "not_selected",
        }
    }
}
