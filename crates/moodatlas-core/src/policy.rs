//! Tunable constants for scoring, classification, and spike detection.
//!
//! Every component takes its slice of [`MoodPolicy`] explicitly. The defaults
//! are the production tuning; a YAML file may override any subset:
//!
//! ```yaml
//! score:
//!   base_blend: 0.85
//! spike:
//!   window: 14
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::MoodError;

/// Share of the audio-derived base score kept when news sentiment is blended
/// in: `score = base * W + sentiment * (1 - W)`.
///
/// Earlier tunings used 0.85; the current one weighs music and news equally.
pub const DEFAULT_BASE_BLEND: f64 = 0.5;

/// Weights of the scoring formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    /// Subtracted: acoustic-heavy listening pulls the score toward calm/sad.
    pub acousticness: f64,
    /// Valence at or above which energy counts as positive.
    pub energy_pivot: f64,
    /// See [`DEFAULT_BASE_BLEND`].
    pub base_blend: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            valence: 0.40,
            energy: 0.20,
            danceability: 0.15,
            acousticness: 0.10,
            energy_pivot: 0.45,
            base_blend: DEFAULT_BASE_BLEND,
        }
    }
}

/// Score bands and tie-break thresholds of the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierBands {
    /// `score >= happy_min` is Happy.
    pub happy_min: f64,
    /// `score >= calm_min` (and below `happy_min`) is Calm.
    pub calm_min: f64,
    /// `score <= negative_max` (and above `angry_max`) is Sad or Anxious.
    pub negative_max: f64,
    /// `score <= angry_max` is Angry.
    pub angry_max: f64,
    /// Energy above this picks Anxious over Sad in the negative band.
    pub negative_energy: f64,
    /// Tie zone: sentiment below this is strongly negative.
    pub tie_sentiment_negative: f64,
    /// Tie zone: sentiment above this is strongly positive.
    pub tie_sentiment_positive: f64,
    /// Tie zone, negative sentiment: energy above this picks Anxious over Sad.
    pub tie_negative_energy: f64,
    /// Tie zone, positive sentiment: valence above this picks Happy over Calm.
    pub tie_positive_valence: f64,
    /// Tie zone, no strong sentiment: energy above this is Anxious.
    pub tie_energy: f64,
    /// Tie zone, no strong sentiment: valence below this is Sad.
    pub tie_valence: f64,
}

impl Default for ClassifierBands {
    fn default() -> Self {
        Self {
            happy_min: 0.20,
            calm_min: 0.05,
            negative_max: -0.05,
            angry_max: -0.35,
            negative_energy: 0.55,
            tie_sentiment_negative: -0.15,
            tie_sentiment_positive: 0.15,
            tie_negative_energy: 0.5,
            tie_positive_valence: 0.5,
            tie_energy: 0.6,
            tie_valence: 0.4,
        }
    }
}

/// Rolling-window z-score settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpikePolicy {
    /// Number of most recent history points the statistics are computed over.
    pub window: usize,
    /// Minimum history length before detection is attempted at all.
    pub min_history: usize,
    /// Standard deviations from the rolling mean that count as significant.
    pub z_threshold: f64,
}

impl Default for SpikePolicy {
    fn default() -> Self {
        Self {
            window: 7,
            min_history: 3,
            z_threshold: 2.0,
        }
    }
}

/// The full engine policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoodPolicy {
    pub score: ScoreWeights,
    pub bands: ClassifierBands,
    pub spike: SpikePolicy,
}

impl MoodPolicy {
    /// Load and validate a policy from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("loading policy {}", path.display()))
    }

    /// Parse and validate a policy from a YAML string. Missing keys keep
    /// their defaults; an empty document is the default policy.
    pub fn parse(yaml: &str) -> Result<Self> {
        let policy: MoodPolicy = if yaml.trim().is_empty() {
            MoodPolicy::default()
        } else {
            serde_yaml::from_str(yaml).context("policy schema validation failed")?
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serializing policy")
    }

    /// Check constraints serde can't express.
    pub fn validate(&self) -> crate::Result<()> {
        self.score.validate()?;
        self.bands.validate()?;
        self.spike.validate()
    }
}

fn invalid(msg: String) -> MoodError {
    MoodError::InvalidPolicy(msg)
}

fn check_unit(name: &str, value: f64) -> crate::Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be within [0, 1], got {value}")))
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("score.valence", self.valence),
            ("score.energy", self.energy),
            ("score.danceability", self.danceability),
            ("score.acousticness", self.acousticness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        check_unit("score.energy_pivot", self.energy_pivot)?;
        check_unit("score.base_blend", self.base_blend)
    }
}

impl ClassifierBands {
    pub fn validate(&self) -> crate::Result<()> {
        let ordered = [self.angry_max, self.negative_max, self.calm_min, self.happy_min];
        if ordered.iter().any(|b| !b.is_finite() || !(-1.0..=1.0).contains(b)) {
            return Err(invalid("band boundaries must be within [-1, 1]".into()));
        }
        if !ordered.windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid(format!(
                "bands must satisfy angry_max < negative_max < calm_min < happy_min, got {} < {} < {} < {}",
                self.angry_max, self.negative_max, self.calm_min, self.happy_min
            )));
        }
        if !(self.tie_sentiment_negative.is_finite() && self.tie_sentiment_positive.is_finite())
            || self.tie_sentiment_negative > self.tie_sentiment_positive
        {
            return Err(invalid(
                "bands.tie_sentiment_negative must not exceed bands.tie_sentiment_positive".into(),
            ));
        }
        check_unit("bands.negative_energy", self.negative_energy)?;
        check_unit("bands.tie_negative_energy", self.tie_negative_energy)?;
        check_unit("bands.tie_positive_valence", self.tie_positive_valence)?;
        check_unit("bands.tie_energy", self.tie_energy)?;
        check_unit("bands.tie_valence", self.tie_valence)
    }
}

impl SpikePolicy {
    pub fn validate(&self) -> crate::Result<()> {
        if self.window == 0 {
            return Err(MoodError::InvalidWindow);
        }
        if self.min_history == 0 {
            return Err(invalid("spike.min_history must be at least 1".into()));
        }
        if !self.z_threshold.is_finite() || self.z_threshold <= 0.0 {
            return Err(invalid(format!(
                "spike.z_threshold must be positive, got {}",
                self.z_threshold
            )));
        }
        Ok(())
    }
}
