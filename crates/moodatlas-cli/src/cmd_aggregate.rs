use std::path::Path;

use moodatlas_core::features::{aggregate, top_genre};
use moodatlas_core::ingest::TagInput;
use moodatlas_core::{MoodFeatures, TagWeight};
use serde::Serialize;

use crate::input::{parse_json, read_text, source_name};

#[derive(Debug, Serialize)]
struct AggregateOutput {
    #[serde(flatten)]
    features: MoodFeatures,
    top_genre: String,
    tag_count: usize,
}

fn build(tags: &[TagInput]) -> AggregateOutput {
    let weights: Vec<TagWeight> = tags.iter().map(TagInput::to_tag_weight).collect();
    AggregateOutput {
        features: aggregate(&weights),
        top_genre: top_genre(&weights),
        tag_count: weights.len(),
    }
}

/// `moodatlas aggregate [--input FILE]`
pub fn execute(input: Option<&Path>) -> anyhow::Result<()> {
    let text = read_text(input)?;
    let tags: Vec<TagInput> = parse_json(&text, &source_name(input))?;
    let out = build(&tags);
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
