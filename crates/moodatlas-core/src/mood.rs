use crate::classify::classify;
use crate::error::Result;
use crate::policy::MoodPolicy;
use crate::score::score;
use crate::types::{MoodFeatures, MoodResult};

/// Score, classify, and attach presentation constants in one step.
///
/// The label is derived from the rounded score, so re-classifying a stored
/// `mood_score` always reproduces the stored label.
pub fn compute_mood(
    features: &MoodFeatures,
    sentiment: Option<f64>,
    policy: &MoodPolicy,
) -> Result<MoodResult> {
    let mood_score = score(features, sentiment, &policy.score)?;
    let label = classify(
        mood_score,
        features.energy,
        features.valence,
        sentiment,
        &policy.bands,
    )?;
    Ok(MoodResult::from_label(mood_score, label))
}

/// [`compute_mood`] over many (features, sentiment) pairs; stops at the first
/// invalid input.
pub fn batch_compute(
    rows: &[(MoodFeatures, Option<f64>)],
    policy: &MoodPolicy,
) -> Result<Vec<MoodResult>> {
    rows.iter()
        .map(|(features, sentiment)| compute_mood(features, *sentiment, policy))
        .collect()
}
