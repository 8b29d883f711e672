use thiserror::Error;

/// Contract violations surfaced by the mood engine.
///
/// "Not enough history" and "flat history" are not errors: the spike
/// detector reports them as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoodError {
    #[error("feature {name} must be within [0, 1], got {value}")]
    FeatureOutOfRange { name: &'static str, value: f64 },

    #[error("sentiment must be within [-1, 1], got {0}")]
    SentimentOutOfRange(f64),

    #[error("mood score must be within [-1, 1], got {0}")]
    ScoreOutOfRange(f64),

    #[error("{name} must be a finite number")]
    NonFinite { name: &'static str },

    #[error("spike window must be at least 1")]
    InvalidWindow,

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("country {0} appears more than once")]
    DuplicateCountry(String),
}

pub type Result<T> = std::result::Result<T, MoodError>;

/// Reject NaN and infinities for a named input.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MoodError::NonFinite { name })
    }
}

/// Reject a [0, 1] feature that is non-finite or out of range.
pub(crate) fn ensure_unit(name: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(MoodError::FeatureOutOfRange { name, value })
    }
}

/// Reject a sentiment that is non-finite or outside [-1, 1].
pub(crate) fn ensure_sentiment(value: f64) -> Result<f64> {
    let value = ensure_finite("sentiment", value)?;
    if (-1.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(MoodError::SentimentOutOfRange(value))
    }
}
