use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationStatus, CompetitionId};
use super::scoring::ScoreResult;

/// Rank cutoffs and the optional tie-break comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub qualified_cutoff: usize,
    pub reserve_cutoff: usize,
    /// Break equal final scores by ethics score, then motivation length.
    pub tie_break: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            qualified_cutoff: 100,
            reserve_cutoff: 150,
            tie_break: false,
        }
    }
}

impl RankingConfig {
    pub fn status_for_rank(&self, rank: usize) -> ApplicationStatus {
        if rank <= self.qualified_cutoff {
            ApplicationStatus::Qualified
        } else if rank <= self.reserve_cutoff {
            ApplicationStatus::Reserve
        } else {
            ApplicationStatus::NotSelected
        }
    }
}

/// Ranked position and resulting status for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedApplication {
    pub application_id: ApplicationId,
    pub rank: Option<usize>,
    pub status: ApplicationStatus,
    pub final_score: f64,
}

/// Order a competition's scored pool and map positions to statuses.
///
/// Excluded applications never consume a rank. Output lists ranked entries first, followed by
/// excluded entries ordered by id, so the result does not depend on input order.
pub fn rank<'a, I>(results: I, config: &RankingConfig) -> Vec<RankedApplication>
where
    I: IntoIterator<Item = (&'a ApplicationId, &'a ScoreResult)>,
{
    let (mut excluded, mut eligible): (Vec<_>, Vec<_>) = results
        .into_iter()
        .partition(|(_, score)| score.auto_exclude);

    eligible.sort_by(|left, right| compare(left, right, config.tie_break));
    excluded.sort_by(|(left, _), (right, _)| left.cmp(right));

    let mut ranked = Vec::with_capacity(eligible.len() + excluded.len());
    for (position, (application_id, score)) in eligible.into_iter().enumerate() {
        let rank = position + 1;
        ranked.push(RankedApplication {
            application_id: application_id.clone(),
            rank: Some(rank),
            status: config.status_for_rank(rank),
            final_score: score.final_score,
        });
    }

    ranked.extend(
        excluded
            .into_iter()
            .map(|(application_id, score)| RankedApplication {
                application_id: application_id.clone(),
                rank: None,
                status: ApplicationStatus::Excluded,
                final_score: score.final_score,
            }),
    );

    ranked
}

fn compare(
    (left_id, left): &(&ApplicationId, &ScoreResult),
    (right_id, right): &(&ApplicationId, &ScoreResult),
    tie_break: bool,
) -> Ordering {
    let mut ordering = right.final_score.total_cmp(&left.final_score);

    if tie_break {
        ordering = ordering
            .then_with(|| {
                right
                    .tie_breakers
                    .ethics_score
                    .total_cmp(&left.tie_breakers.ethics_score)
            })
            .then_with(|| {
                right
                    .tie_breakers
                    .motivation_length
                    .cmp(&left.tie_breakers.motivation_length)
            });
    }

    ordering.then_with(|| left_id.cmp(right_id))
}

/// Ranking outcome for a whole competition pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionRanking {
    pub competition_id: CompetitionId,
    pub entries: Vec<RankedApplication>,
}

impl CompetitionRanking {
    pub fn count(&self, status: ApplicationStatus) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    }

    pub fn find(&self, application_id: &ApplicationId) -> Option<&RankedApplication> {
        self.entries
            .iter()
            .find(|entry| &entry.application_id == application_id)
    }
}
