use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_unit, Result};

/// Neutral value for every feature when no signal exists.
pub const NEUTRAL: f64 = 0.5;

/// One observed catalog tag and its strength (e.g. occurrence count).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagWeight {
    pub name: String,
    pub weight: f64,
}

impl TagWeight {
    /// Build a tag with a normalized (trimmed, lowercased) name.
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            weight,
        }
    }

    /// Build a tag from a raw catalog occurrence count.
    ///
    /// Catalogs report a count of 0 for tags that were applied but rarely;
    /// those still count as one occurrence.
    pub fn from_count(name: &str, count: u64) -> Self {
        Self::new(name, count.max(1) as f64)
    }
}

/// Continuous audio-mood dimensions, each in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MoodFeatures {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub acousticness: f64,
}

impl MoodFeatures {
    /// Validated constructor: every feature must be finite and within [0, 1].
    pub fn new(valence: f64, energy: f64, danceability: f64, acousticness: f64) -> Result<Self> {
        let features = Self {
            valence,
            energy,
            danceability,
            acousticness,
        };
        features.validate()?;
        Ok(features)
    }

    /// All four features at 0.5.
    pub fn neutral() -> Self {
        Self {
            valence: NEUTRAL,
            energy: NEUTRAL,
            danceability: NEUTRAL,
            acousticness: NEUTRAL,
        }
    }

    /// Check the [0, 1] invariant (useful after deserializing).
    pub fn validate(&self) -> Result<()> {
        ensure_unit("valence", self.valence)?;
        ensure_unit("energy", self.energy)?;
        ensure_unit("danceability", self.danceability)?;
        ensure_unit("acousticness", self.acousticness)?;
        Ok(())
    }
}

impl Default for MoodFeatures {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Discrete mood category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoodLabel {
    Happy,
    Calm,
    Sad,
    Angry,
    Anxious,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::Happy,
        MoodLabel::Calm,
        MoodLabel::Sad,
        MoodLabel::Angry,
        MoodLabel::Anxious,
    ];

    /// Display color as a `#rrggbb` hex string.
    pub fn color(self) -> &'static str {
        match self {
            Self::Happy => "#22c55e",
            Self::Calm => "#38bdf8",
            Self::Sad => "#8b5cf6",
            Self::Angry => "#ef4444",
            Self::Anxious => "#f97316",
        }
    }

    /// Display glyph.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Calm => "😌",
            Self::Sad => "😢",
            Self::Angry => "😠",
            Self::Anxious => "😰",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Calm => "Calm",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Anxious => "Anxious",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MoodLabel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy" => Ok(Self::Happy),
            "calm" => Ok(Self::Calm),
            "sad" => Ok(Self::Sad),
            "angry" => Ok(Self::Angry),
            "anxious" => Ok(Self::Anxious),
            other => Err(format!("unknown mood label: {other}")),
        }
    }
}

/// Scored and classified mood for one country on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodResult {
    pub mood_score: f64,
    pub mood_label: MoodLabel,
    pub color_code: String,
    pub emoji: String,
}

impl MoodResult {
    pub(crate) fn from_label(mood_score: f64, mood_label: MoodLabel) -> Self {
        Self {
            mood_score,
            mood_label,
            color_code: mood_label.color().to_string(),
            emoji: mood_label.emoji().to_string(),
        }
    }
}

/// A past (score, label) observation, ordered oldest first by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoryPoint {
    pub score: f64,
    pub label: MoodLabel,
}

impl HistoryPoint {
    pub fn new(score: f64, label: MoodLabel) -> Self {
        Self { score, label }
    }
}

/// A statistically significant, label-changing mood shift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpikeEvent {
    pub country_code: String,
    pub previous_label: MoodLabel,
    pub new_label: MoodLabel,
    pub delta: f64,
    pub reason: String,
}
