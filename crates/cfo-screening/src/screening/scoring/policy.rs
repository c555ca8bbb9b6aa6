use serde::{Deserialize, Serialize};

/// Fixed reason persisted alongside every excluded score.
pub const EXCLUSION_REASON: &str = "ethics_or_commitment_failure";

/// Number of red flags tolerated before the penalty starts.
const FREE_RED_FLAGS: usize = 2;
const PENALTY_PER_RED_FLAG: u32 = 5;

/// Named answer patterns that count towards the red-flag penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlag {
    AvoidsDecisions,
    NotReadyForCfo,
    LowWillingnessCommitment,
    WeakJustification,
    WeakCashProfitAnswer,
    PeopleFirstCut,
    EthicsFailure,
    WeakMotivation,
}

impl RedFlag {
    pub const fn label(self) -> &'static str {
        match self {
            RedFlag::AvoidsDecisions => "avoids_decisions",
            RedFlag::NotReadyForCfo => "not_ready_for_cfo",
            RedFlag::LowWillingnessCommitment => "low_willingness_commitment",
            RedFlag::WeakJustification => "weak_justification",
            RedFlag::WeakCashProfitAnswer => "weak_cash_profit_answer",
            RedFlag::PeopleFirstCut => "people_first_cut",
            RedFlag::EthicsFailure => "ethics_failure",
            RedFlag::WeakMotivation => "weak_motivation",
        }
    }
}

/// Hard gates that force an application out of the ranking pool.
///
/// The two leadership gates are evaluated independently; an application can only ever hit
/// one of them because the readiness gate short-circuits the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionTrigger {
    /// Merged readiness question answered `not_ready`.
    NotReadyForCfo,
    /// Legacy gate: not interested in leading and only exploring.
    LowWillingnessCommitment,
    /// Disqualifying response to the ethics scenario.
    EthicsFailure,
}

impl ExclusionTrigger {
    pub const fn red_flag(self) -> RedFlag {
        match self {
            ExclusionTrigger::NotReadyForCfo => RedFlag::NotReadyForCfo,
            ExclusionTrigger::LowWillingnessCommitment => RedFlag::LowWillingnessCommitment,
            ExclusionTrigger::EthicsFailure => RedFlag::EthicsFailure,
        }
    }

    pub fn summary(self) -> String {
        match self {
            ExclusionTrigger::NotReadyForCfo => {
                "applicant indicated they are not ready for CFO responsibilities".to_string()
            }
            ExclusionTrigger::LowWillingnessCommitment => {
                "lowest leadership willingness combined with lowest commitment".to_string()
            }
            ExclusionTrigger::EthicsFailure => {
                "disqualifying response to the ethics scenario".to_string()
            }
        }
    }
}

/// Five points per red flag beyond the first two.
pub fn red_flag_penalty(flag_count: usize) -> u32 {
    let chargeable = flag_count.saturating_sub(FREE_RED_FLAGS);
    u32::try_from(chargeable)
        .unwrap_or(u32::MAX)
        .saturating_mul(PENALTY_PER_RED_FLAG)
}

pub(crate) fn exclusion_reason(auto_exclude: bool) -> Option<String> {
    auto_exclude.then(|| EXCLUSION_REASON.to_string())
}
