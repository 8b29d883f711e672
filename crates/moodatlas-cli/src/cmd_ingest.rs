use std::fmt::Write as _;
use std::path::Path;

use moodatlas_core::{run_ingest, IngestReport, IngestSnapshot, MoodPolicy};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::input::{parse_json, read_text};

#[derive(Serialize)]
struct TimedReport<'a> {
    generated_at: String,
    #[serde(flatten)]
    report: &'a IngestReport,
}

fn render(report: &IngestReport) -> String {
    let mut out = String::new();
    for c in &report.countries {
        let spike = if c.spike_active { "  SPIKE" } else { "" };
        let _ = writeln!(
            out,
            "{:<4} {:+.4}  {} {:<8} {}{}",
            c.country_code, c.mood.mood_score, c.mood.emoji, c.mood.mood_label, c.summary, spike
        );
    }
    for s in &report.spikes {
        let _ = writeln!(
            out,
            "spike {}: {} -> {} (delta {:+.4}, {})",
            s.country_code, s.previous_label, s.new_label, s.delta, s.reason
        );
    }
    match &report.stats {
        Some(stats) => {
            let _ = writeln!(
                out,
                "{} countries, dominant {} ({}%), avg valence {:.3}, avg energy {:.3}",
                stats.total_countries,
                stats.dominant.label,
                stats.dominant.percentage,
                stats.avg_valence,
                stats.avg_energy
            );
        }
        None => out.push_str("no countries\n"),
    }
    out
}

/// `moodatlas ingest --input FILE`
pub fn execute(policy: &MoodPolicy, input: &Path, json: bool) -> anyhow::Result<()> {
    let snapshot: IngestSnapshot =
        parse_json(&read_text(Some(input))?, &input.display().to_string())?;
    let report = run_ingest(&snapshot, policy)?;

    if json {
        let timed = TimedReport {
            generated_at: OffsetDateTime::now_utc().format(&Rfc3339)?,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&timed)?);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}
