use moodatlas_core::classify::classify as classify_score;
use moodatlas_core::{compute_mood, MoodFeatures, MoodPolicy, MoodResult};

pub struct ScoreParams {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub acousticness: f64,
    pub sentiment: Option<f64>,
}

fn compute(policy: &MoodPolicy, params: &ScoreParams) -> anyhow::Result<MoodResult> {
    let features = MoodFeatures::new(
        params.valence,
        params.energy,
        params.danceability,
        params.acousticness,
    )?;
    Ok(compute_mood(&features, params.sentiment, policy)?)
}

fn render(result: &MoodResult) -> String {
    format!(
        "{:+.4}  {} {}  {}",
        result.mood_score, result.emoji, result.mood_label, result.color_code
    )
}

/// `moodatlas score`
pub fn execute(policy: &MoodPolicy, params: &ScoreParams, json: bool) -> anyhow::Result<()> {
    let result = compute(policy, params)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render(&result));
    }
    Ok(())
}

/// `moodatlas classify`
pub fn classify(
    policy: &MoodPolicy,
    score: f64,
    energy: f64,
    valence: f64,
    sentiment: Option<f64>,
) -> anyhow::Result<()> {
    let label = classify_score(score, energy, valence, sentiment, &policy.bands)?;
    println!("{label}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodatlas_core::MoodLabel;

    fn params(valence: f64, energy: f64, sentiment: Option<f64>) -> ScoreParams {
        ScoreParams {
            valence,
            energy,
            danceability: 0.7,
            acousticness: 0.2,
            sentiment,
        }
    }

    #[test]
    fn scores_and_renders() {
        let result = compute(&MoodPolicy::default(), &params(0.9, 0.8, None)).unwrap();
        assert_eq!(result.mood_score, 0.56);
        assert_eq!(result.mood_label, MoodLabel::Happy);
        assert_eq!(render(&result), "+0.5600  😊 Happy  #22c55e");
    }

    #[test]
    fn out_of_range_feature_errors() {
        let err = compute(&MoodPolicy::default(), &params(1.4, 0.8, None)).unwrap_err();
        assert!(err.to_string().contains("valence"));
        assert!(compute(&MoodPolicy::default(), &params(0.5, 0.5, Some(-2.0))).is_err());
    }

    #[test]
    fn classify_rejects_bad_score() {
        assert!(classify(&MoodPolicy::default(), 1.5, 0.5, 0.5, None).is_err());
        classify(&MoodPolicy::default(), 0.3, 0.5, 0.5, None).unwrap();
    }
}
