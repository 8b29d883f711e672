use std::path::Path;

use moodatlas_core::spike::detect;
use moodatlas_core::{HistoryPoint, MoodLabel, MoodPolicy, SpikeEvent};

use crate::input::{parse_json, read_text};

fn load_history(path: Option<&Path>) -> anyhow::Result<Vec<HistoryPoint>> {
    match path {
        Some(p) => parse_json(&read_text(Some(p))?, &p.display().to_string()),
        None => Ok(Vec::new()),
    }
}

fn run(
    policy: &MoodPolicy,
    country: &str,
    score: f64,
    label: MoodLabel,
    history: &[HistoryPoint],
) -> anyhow::Result<Option<SpikeEvent>> {
    let country = country.trim().to_uppercase();
    Ok(detect(&country, history, score, label, &policy.spike)?)
}

/// `moodatlas detect`
pub fn execute(
    policy: &MoodPolicy,
    country: &str,
    score: f64,
    label: MoodLabel,
    history: Option<&Path>,
) -> anyhow::Result<()> {
    let history = load_history(history)?;
    match run(policy, country, score, label, &history)? {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("no spike"),
    }
    Ok(())
}
