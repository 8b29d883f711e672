use crate::error::{ensure_finite, ensure_sentiment, ensure_unit, MoodError, Result};
use crate::policy::ClassifierBands;
use crate::types::MoodLabel;

/// Map a mood score to a label.
///
/// Bands are checked top-down: `>= happy_min` Happy, `<= angry_max` Angry,
/// `<= negative_max` Sad or Anxious (by energy), `>= calm_min` Calm. Scores
/// left in the near-zero tie zone go through [`tie_break`].
pub fn classify(
    score: f64,
    energy: f64,
    valence: f64,
    sentiment: Option<f64>,
    bands: &ClassifierBands,
) -> Result<MoodLabel> {
    let score = ensure_finite("score", score)?;
    if !(-1.0..=1.0).contains(&score) {
        return Err(MoodError::ScoreOutOfRange(score));
    }
    let energy = ensure_unit("energy", energy)?;
    let valence = ensure_unit("valence", valence)?;
    let sentiment = sentiment.map(ensure_sentiment).transpose()?;

    let label = if score >= bands.happy_min {
        MoodLabel::Happy
    } else if score <= bands.angry_max {
        MoodLabel::Angry
    } else if score <= bands.negative_max {
        if energy > bands.negative_energy {
            MoodLabel::Anxious
        } else {
            MoodLabel::Sad
        }
    } else if score >= bands.calm_min {
        MoodLabel::Calm
    } else {
        tie_break(energy, valence, sentiment, bands)
    };
    Ok(label)
}

/// Near-zero scores carry no direction, so fall back to the other signals,
/// strongest evidence first: news sentiment, then energy, then valence.
fn tie_break(
    energy: f64,
    valence: f64,
    sentiment: Option<f64>,
    bands: &ClassifierBands,
) -> MoodLabel {
    match sentiment {
        Some(s) if s < bands.tie_sentiment_negative => {
            if energy > bands.tie_negative_energy {
                MoodLabel::Anxious
            } else {
                MoodLabel::Sad
            }
        }
        Some(s) if s > bands.tie_sentiment_positive => {
            if valence > bands.tie_positive_valence {
                MoodLabel::Happy
            } else {
                MoodLabel::Calm
            }
        }
        _ if energy > bands.tie_energy => MoodLabel::Anxious,
        _ if valence < bands.tie_valence => MoodLabel::Sad,
        _ => MoodLabel::Calm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(score: f64, energy: f64, valence: f64, sentiment: Option<f64>) -> MoodLabel {
        classify(score, energy, valence, sentiment, &ClassifierBands::default()).unwrap()
    }

    #[test]
    fn happy_boundary_is_closed() {
        assert_eq!(label(0.20, 0.5, 0.5, None), MoodLabel::Happy);
        assert_eq!(label(0.199999, 0.5, 0.5, None), MoodLabel::Calm);
        assert_eq!(label(1.0, 0.5, 0.5, None), MoodLabel::Happy);
    }

    #[test]
    fn calm_boundary_is_closed() {
        assert_eq!(label(0.05, 0.9, 0.1, None), MoodLabel::Calm);
        // just below calm_min lands in the tie zone
        assert_eq!(label(0.0499, 0.9, 0.5, None), MoodLabel::Anxious);
    }

    #[test]
    fn angry_boundary_is_closed() {
        assert_eq!(label(-0.35, 0.1, 0.5, None), MoodLabel::Angry);
        assert_eq!(label(-1.0, 0.1, 0.5, None), MoodLabel::Angry);
        assert_eq!(label(-0.3499, 0.1, 0.5, None), MoodLabel::Sad);
    }

    #[test]
    fn negative_band_split_by_energy() {
        assert_eq!(label(-0.05, 0.56, 0.5, None), MoodLabel::Anxious);
        assert_eq!(label(-0.05, 0.55, 0.5, None), MoodLabel::Sad);
        assert_eq!(label(-0.2, 0.2, 0.5, None), MoodLabel::Sad);
        assert_eq!(label(-0.2, 0.9, 0.5, None), MoodLabel::Anxious);
    }

    #[test]
    fn tie_zone_negative_sentiment_first() {
        // sentiment wins over the high-energy rule
        assert_eq!(label(0.0, 0.55, 0.9, Some(-0.5)), MoodLabel::Anxious);
        assert_eq!(label(0.0, 0.5, 0.9, Some(-0.5)), MoodLabel::Sad);
    }

    #[test]
    fn tie_zone_positive_sentiment_second() {
        assert_eq!(label(0.0, 0.9, 0.6, Some(0.3)), MoodLabel::Happy);
        assert_eq!(label(0.0, 0.9, 0.5, Some(0.3)), MoodLabel::Calm);
    }

    #[test]
    fn tie_zone_weak_sentiment_falls_through() {
        assert_eq!(label(0.0, 0.7, 0.9, Some(0.15)), MoodLabel::Anxious);
        assert_eq!(label(0.0, 0.7, 0.9, Some(-0.15)), MoodLabel::Anxious);
    }

    #[test]
    fn tie_zone_energy_then_valence_then_calm() {
        assert_eq!(label(0.01, 0.61, 0.1, None), MoodLabel::Anxious);
        assert_eq!(label(0.01, 0.6, 0.39, None), MoodLabel::Sad);
        assert_eq!(label(0.01, 0.6, 0.4, None), MoodLabel::Calm);
        assert_eq!(label(-0.0499, 0.3, 0.7, None), MoodLabel::Calm);
    }

    #[test]
    fn custom_bands_are_respected() {
        let bands = ClassifierBands {
            happy_min: 0.5,
            ..ClassifierBands::default()
        };
        assert_eq!(
            classify(0.3, 0.5, 0.5, None, &bands).unwrap(),
            MoodLabel::Calm
        );
    }

    #[test]
    fn invalid_inputs_fail_fast() {
        let bands = ClassifierBands::default();
        assert_eq!(
            classify(1.5, 0.5, 0.5, None, &bands),
            Err(MoodError::ScoreOutOfRange(1.5))
        );
        assert!(classify(f64::NAN, 0.5, 0.5, None, &bands).is_err());
        assert!(classify(0.0, 1.1, 0.5, None, &bands).is_err());
        assert!(classify(0.0, 0.5, 0.5, Some(-2.0), &bands).is_err());
    }
}
