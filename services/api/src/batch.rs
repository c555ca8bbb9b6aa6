use cfo_screening::config::{AppConfig, ConfigError};
use cfo_screening::error::AppError;
use cfo_screening::screening::{
    rank, write_ranking_csv, ApplicationId, FullApplication, RankedApplication, RankingConfig,
    ScoreResult, ScoringEngine, SubmissionGuard,
};
use clap::{ArgAction, Args};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding one questionnaire
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding an array of `{application_id, application}` entries
    pub(crate) input: PathBuf,
    /// Last rank that qualifies (defaults to SCREENING_QUALIFIED_CUTOFF or 100)
    #[arg(long)]
    pub(crate) qualified_cutoff: Option<usize>,
    /// Last rank placed on the reserve list (defaults to SCREENING_RESERVE_CUTOFF or 150)
    #[arg(long)]
    pub(crate) reserve_cutoff: Option<usize>,
    /// Break equal scores by ethics score, then motivation length (defaults to
    /// SCREENING_TIE_BREAK or false)
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    pub(crate) tie_break: Option<bool>,
    /// Also write the ranking as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

/// One questionnaire in a ranking batch.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BatchEntry {
    pub(crate) application_id: ApplicationId,
    pub(crate) application: FullApplication,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    violation: Option<String>,
    score: ScoreResult,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let application: FullApplication = read_json(&args.input)?;

    // Submission checks are reported but do not stop scoring.
    let violation = SubmissionGuard::default()
        .validate(&application)
        .err()
        .map(|violation| violation.to_string());
    let report = ScoreReport {
        violation,
        score: ScoringEngine::default().score(&application),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let base = AppConfig::load()?.ranking;
    let config = resolve_ranking(base, &args)?;
    let entries: Vec<BatchEntry> = read_json(&args.input)?;

    let scored = score_batch(&ScoringEngine::default(), entries);
    let ranked = rank(scored.iter().map(|(id, score)| (id, score)), &config);

    render_ranking(&ranked, &config);

    if let Some(path) = args.csv {
        let file = File::create(&path)?;
        write_ranking_csv(BufWriter::new(file), &ranked)?;
        println!("\nRanking written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn resolve_ranking(
    base: RankingConfig,
    args: &RankArgs,
) -> Result<RankingConfig, ConfigError> {
    let config = RankingConfig {
        qualified_cutoff: args.qualified_cutoff.unwrap_or(base.qualified_cutoff),
        reserve_cutoff: args.reserve_cutoff.unwrap_or(base.reserve_cutoff),
        tie_break: args.tie_break.unwrap_or(base.tie_break),
    };

    if config.reserve_cutoff < config.qualified_cutoff {
        return Err(ConfigError::InvertedCutoffs {
            qualified: config.qualified_cutoff,
            reserve: config.reserve_cutoff,
        });
    }
    Ok(config)
}

pub(crate) fn score_batch(
    engine: &ScoringEngine,
    entries: Vec<BatchEntry>,
) -> Vec<(ApplicationId, ScoreResult)> {
    entries
        .into_iter()
        .map(|entry| {
            let score = engine.score(&entry.application);
            (entry.application_id, score)
        })
        .collect()
}

pub(crate) fn render_ranking(ranked: &[RankedApplication], config: &RankingConfig) {
    println!(
        "Ranking (qualified <= {}, reserve <= {}{})",
        config.qualified_cutoff,
        config.reserve_cutoff,
        if config.tie_break { ", tie-break on" } else { "" }
    );
    for entry in ranked {
        let rank = entry
            .rank
            .map(|rank| rank.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:<24} {:<13} {:>8.2}",
            rank,
            entry.application_id,
            entry.status.label(),
            entry.final_score
        );
    }
}

fn read_json<T, P>(path: P) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::synthetic_application;
    use cfo_screening::screening::{ApplicationStatus, CompetitionId};

    fn rank_args() -> RankArgs {
        RankArgs {
            input: PathBuf::from("pool.json"),
            qualified_cutoff: None,
            reserve_cutoff: None,
            tie_break: None,
            csv: None,
        }
    }

    #[test]
    fn flags_override_configured_cutoffs() {
        let args = RankArgs {
            qualified_cutoff: Some(5),
            tie_break: Some(true),
            ..rank_args()
        };

        let config = resolve_ranking(RankingConfig::default(), &args).expect("valid cutoffs");
        assert_eq!(config.qualified_cutoff, 5);
        assert_eq!(config.reserve_cutoff, 150);
        assert!(config.tie_break);
    }

    #[test]
    fn tie_break_flag_overrides_configuration_both_ways() {
        let configured = RankingConfig {
            tie_break: true,
            ..RankingConfig::default()
        };

        let inherited = resolve_ranking(configured, &rank_args()).expect("valid cutoffs");
        assert!(inherited.tie_break);

        let disabled = RankArgs {
            tie_break: Some(false),
            ..rank_args()
        };
        let config = resolve_ranking(configured, &disabled).expect("valid cutoffs");
        assert!(!config.tie_break);
    }

    #[test]
    fn inverted_cutoffs_are_rejected() {
        let args = RankArgs {
            qualified_cutoff: Some(20),
            reserve_cutoff: Some(10),
            ..rank_args()
        };

        assert!(matches!(
            resolve_ranking(RankingConfig::default(), &args),
            Err(ConfigError::InvertedCutoffs {
                qualified: 20,
                reserve: 10
            })
        ));
    }

    #[test]
    fn batch_entries_score_and_rank() {
        let competition = CompetitionId("cfo-batch".to_string());
        let payload = serde_json::json!([
            {
                "application_id": "cfo-b",
                "application": synthetic_application(&competition, 1),
            },
            {
                "application_id": "cfo-a",
                "application": synthetic_application(&competition, 6),
            },
        ]);
        let entries: Vec<BatchEntry> = serde_json::from_value(payload).expect("batch parses");

        let scored = score_batch(&ScoringEngine::default(), entries);
        let config = RankingConfig {
            qualified_cutoff: 1,
            reserve_cutoff: 1,
            tie_break: false,
        };
        let ranked = rank(scored.iter().map(|(id, score)| (id, score)), &config);

        assert_eq!(ranked.len(), 2);
        let excluded = ranked
            .iter()
            .find(|entry| entry.application_id.0 == "cfo-a")
            .expect("entry present");
        assert_eq!(excluded.status, ApplicationStatus::Excluded);
        assert_eq!(ranked[0].application_id.0, "cfo-b");
        assert_eq!(ranked[0].status, ApplicationStatus::Qualified);
    }
}
