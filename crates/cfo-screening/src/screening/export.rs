use std::io::Write;

use serde::Serialize;

use super::ranking::RankedApplication;

#[derive(Debug, Serialize)]
struct RankingRow<'a> {
    rank: Option<usize>,
    application_id: &'a str,
    status: &'static str,
    final_score: String,
}

/// Write ranked applications as CSV with a header row.
pub fn write_ranking_csv<W: Write>(
    writer: W,
    entries: &[RankedApplication],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for entry in entries {
        writer.serialize(RankingRow {
            rank: entry.rank,
            application_id: &entry.application_id.0,
            status: entry.status.label(),
            final_score: format!("{:.2}", entry.final_score),
        })?;
    }
    writer.flush()?;
    Ok(())
}
