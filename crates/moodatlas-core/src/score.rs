use tracing::debug;

use crate::error::{ensure_sentiment, Result};
use crate::policy::ScoreWeights;
use crate::round_to;
use crate::types::MoodFeatures;

const SCORE_DIGITS: i32 = 4;

/// Remap a [0, 1] value onto [-1, 1] so 0 is neutral.
fn signed(x: f64) -> f64 {
    x * 2.0 - 1.0
}

/// Energy reinforces positivity only when valence is high enough; with low
/// valence, high energy reads as aggression or anxiety.
pub fn energy_component(valence: f64, energy: f64, pivot: f64) -> f64 {
    if valence >= pivot {
        energy
    } else {
        -energy
    }
}

/// Audio-only score before clamping and sentiment blending.
pub fn base_score(features: &MoodFeatures, weights: &ScoreWeights) -> f64 {
    let energy = energy_component(features.valence, features.energy, weights.energy_pivot);
    weights.valence * signed(features.valence)
        + weights.energy * signed(energy)
        + weights.danceability * signed(features.danceability)
        - weights.acousticness * signed(features.acousticness)
}

/// Fuse audio features and optional news sentiment into a mood score in
/// [-1, 1], rounded to 4 digits.
///
/// Out-of-range or non-finite inputs are rejected rather than coerced.
pub fn score(
    features: &MoodFeatures,
    sentiment: Option<f64>,
    weights: &ScoreWeights,
) -> Result<f64> {
    features.validate()?;
    let sentiment = sentiment.map(ensure_sentiment).transpose()?;

    let base = base_score(features, weights);
    let blended = match sentiment {
        Some(s) => base * weights.base_blend + s * (1.0 - weights.base_blend),
        None => base,
    };
    let score = round_to(blended.clamp(-1.0, 1.0), SCORE_DIGITS);
    debug!(base, ?sentiment, score, "scored mood");
    Ok(score)
}
