//! The daily ingest run over already-fetched inputs: resolve features and
//! sentiment per country (falling back to seeded data where a feed is
//! missing), score and classify, summarize, and check for spikes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::countries::country_name;
use crate::error::{MoodError, Result};
use crate::fallback::{fallback_features, fallback_sentiment};
use crate::features::{aggregate, top_genre};
use crate::mood::compute_mood;
use crate::policy::MoodPolicy;
use crate::sentiment::{clean_headline, keyword_sentiment};
use crate::spike::detect_batch;
use crate::stats::{global_stats, GlobalStats};
use crate::summary::fallback_summary;
use crate::types::{HistoryPoint, MoodFeatures, MoodResult, SpikeEvent, TagWeight};

/// A tag as reported by a catalog: either a raw occurrence `count` or an
/// explicit `weight`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl TagInput {
    /// An explicit weight wins; otherwise the count (0 or missing counts once).
    pub fn to_tag_weight(&self) -> TagWeight {
        match self.weight {
            Some(w) => TagWeight::new(&self.name, w),
            None => TagWeight::from_count(&self.name, self.count.unwrap_or(0)),
        }
    }
}

/// Everything the collaborators fetched for one country.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CountrySnapshot {
    pub country_code: String,
    #[serde(default)]
    pub country_name: Option<String>,
    /// Precomputed features; take precedence over `tags`.
    #[serde(default)]
    pub features: Option<MoodFeatures>,
    /// Catalog tags. Absent means the catalog fetch failed.
    #[serde(default)]
    pub tags: Option<Vec<TagInput>>,
    /// Model sentiment in [-1, 1], if one was produced.
    #[serde(default)]
    pub sentiment: Option<f64>,
    #[serde(default)]
    pub headlines: Vec<String>,
    /// Past (score, label) points, oldest first.
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

fn default_true() -> bool {
    true
}

/// Input of one ingest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSnapshot {
    /// Blend news sentiment into the score.
    #[serde(default = "default_true")]
    pub use_sentiment: bool,
    pub countries: Vec<CountrySnapshot>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSource {
    Provided,
    Tags,
    Fallback,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SentimentSource {
    Provided,
    Keywords,
    Fallback,
    Disabled,
}

/// One country's row of an ingest report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryMood {
    pub country_code: String,
    pub country_name: String,
    #[serde(flatten)]
    pub features: MoodFeatures,
    pub feature_source: FeatureSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_sentiment: Option<f64>,
    pub sentiment_source: SentimentSource,
    #[serde(flatten)]
    pub mood: MoodResult,
    pub summary: String,
    pub spike_active: bool,
}

/// Result of one ingest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestReport {
    pub countries: Vec<CountryMood>,
    pub spikes: Vec<SpikeEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<GlobalStats>,
}

fn resolve_features(
    cc: &str,
    snapshot: &CountrySnapshot,
) -> Result<(MoodFeatures, FeatureSource, Option<String>)> {
    if let Some(features) = snapshot.features {
        features.validate()?;
        return Ok((features, FeatureSource::Provided, None));
    }
    match &snapshot.tags {
        Some(tags) => {
            let tags: Vec<TagWeight> = tags.iter().map(TagInput::to_tag_weight).collect();
            Ok((aggregate(&tags), FeatureSource::Tags, Some(top_genre(&tags))))
        }
        None => {
            warn!(country_code = cc, "no catalog data, using fallback features");
            Ok((fallback_features(cc), FeatureSource::Fallback, None))
        }
    }
}

fn resolve_sentiment(
    cc: &str,
    snapshot: &CountrySnapshot,
    headlines: &[String],
    enabled: bool,
) -> (Option<f64>, SentimentSource) {
    if !enabled {
        return (None, SentimentSource::Disabled);
    }
    if let Some(s) = snapshot.sentiment {
        return (Some(s), SentimentSource::Provided);
    }
    if !headlines.is_empty() {
        return (Some(keyword_sentiment(headlines)), SentimentSource::Keywords);
    }
    warn!(country_code = cc, "no headlines, using fallback sentiment");
    (Some(fallback_sentiment(cc)), SentimentSource::Fallback)
}

/// Score every country in `snapshot` and detect spikes against each
/// country's supplied history.
///
/// Country codes are uppercased; a code appearing twice is an error.
pub fn run_ingest(snapshot: &IngestSnapshot, policy: &MoodPolicy) -> Result<IngestReport> {
    let mut rows: Vec<CountryMood> = Vec::with_capacity(snapshot.countries.len());
    let mut histories: BTreeMap<String, Vec<HistoryPoint>> = BTreeMap::new();
    let mut current: BTreeMap<String, MoodResult> = BTreeMap::new();

    for country in &snapshot.countries {
        let cc = country.country_code.trim().to_uppercase();
        if current.contains_key(&cc) {
            return Err(MoodError::DuplicateCountry(cc));
        }

        let (features, feature_source, genre) = resolve_features(&cc, country)?;
        let headlines: Vec<String> = country
            .headlines
            .iter()
            .map(|h| clean_headline(h))
            .filter(|h| !h.is_empty())
            .collect();
        let (sentiment, sentiment_source) =
            resolve_sentiment(&cc, country, &headlines, snapshot.use_sentiment);

        let mood = compute_mood(&features, sentiment, policy)?;
        let name = match &country.country_name {
            Some(name) => name.clone(),
            None => country_name(&cc).map_or_else(|| cc.clone(), str::to_string),
        };
        let summary = fallback_summary(&name, mood.mood_label, !headlines.is_empty());
        info!(
            country_code = %cc,
            label = %mood.mood_label,
            score = mood.mood_score,
            "scored country"
        );

        histories.insert(cc.clone(), country.history.clone());
        current.insert(cc.clone(), mood.clone());
        rows.push(CountryMood {
            country_code: cc,
            country_name: name,
            features,
            feature_source,
            top_genre: genre,
            news_sentiment: sentiment,
            sentiment_source,
            mood,
            summary,
            spike_active: false,
        });
    }

    let spikes = detect_batch(&histories, &current, &policy.spike)?;
    for spike in &spikes {
        if let Some(row) = rows.iter_mut().find(|r| r.country_code == spike.country_code) {
            row.spike_active = true;
        }
        warn!(
            country_code = %spike.country_code,
            from = %spike.previous_label,
            to = %spike.new_label,
            delta = spike.delta,
            "spike flagged"
        );
    }

    let stats = global_stats(&rows);
    Ok(IngestReport {
        countries: rows,
        spikes,
        stats,
    })
}
