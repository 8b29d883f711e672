//! Rolling-window z-score detection of label-changing mood shifts.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{ensure_finite, MoodError, Result};
use crate::policy::SpikePolicy;
use crate::round_to;
use crate::types::{HistoryPoint, MoodLabel, MoodResult, SpikeEvent};

const DELTA_DIGITS: i32 = 4;

/// Population mean and standard deviation.
fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Decide whether `current_score`/`current_label` is a spike relative to the
/// country's history (oldest first).
///
/// Returns `Ok(None)` when there is too little history, when the window is
/// flat (zero deviation), when the score is within `z_threshold` standard
/// deviations of the window mean, or when the label did not change.
pub fn detect(
    country_code: &str,
    history: &[HistoryPoint],
    current_score: f64,
    current_label: MoodLabel,
    policy: &SpikePolicy,
) -> Result<Option<SpikeEvent>> {
    if policy.window == 0 {
        return Err(MoodError::InvalidWindow);
    }
    let current_score = ensure_finite("current_score", current_score)?;

    let Some(last) = history.last() else {
        return Ok(None);
    };
    if history.len() < policy.min_history {
        debug!(country_code, points = history.len(), "not enough history");
        return Ok(None);
    }

    let start = history.len().saturating_sub(policy.window);
    let recent: Vec<f64> = history[start..].iter().map(|p| p.score).collect();
    let (mean, std) = mean_std(&recent);
    if !mean.is_finite() || !std.is_finite() {
        return Err(MoodError::NonFinite { name: "history" });
    }
    if std == 0.0 {
        debug!(country_code, mean, "flat history, skipping");
        return Ok(None);
    }

    let z = (current_score - mean).abs() / std;
    let delta = current_score - mean;
    debug!(country_code, mean, std, z, "spike check");

    if z >= policy.z_threshold && current_label != last.label {
        let event = SpikeEvent {
            country_code: country_code.to_string(),
            previous_label: last.label,
            new_label: current_label,
            delta: round_to(delta, DELTA_DIGITS),
            reason: format!(
                "z-score {z:.2} exceeds threshold {:?}",
                policy.z_threshold
            ),
        };
        info!(
            country_code,
            from = %event.previous_label,
            to = %event.new_label,
            delta = event.delta,
            "mood spike"
        );
        return Ok(Some(event));
    }
    Ok(None)
}

/// Run [`detect`] for every country in `current`. Countries with no history
/// are skipped. Events come back ordered by country code.
pub fn detect_batch(
    histories: &BTreeMap<String, Vec<HistoryPoint>>,
    current: &BTreeMap<String, MoodResult>,
    policy: &SpikePolicy,
) -> Result<Vec<SpikeEvent>> {
    let mut events = Vec::new();
    for (country_code, mood) in current {
        let history = match histories.get(country_code) {
            Some(h) if !h.is_empty() => h,
            _ => continue,
        };
        if let Some(event) = detect(
            country_code,
            history,
            mood.mood_score,
            mood.mood_label,
            policy,
        )? {
            events.push(event);
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(scores: &[f64], label: MoodLabel) -> Vec<HistoryPoint> {
        scores.iter().map(|s| HistoryPoint::new(*s, label)).collect()
    }

    fn policy() -> SpikePolicy {
        SpikePolicy::default()
    }

    #[test]
    fn reports_large_label_changing_jump() {
        let h = history(&[0.1, 0.12, 0.09], MoodLabel::Calm);
        let event = detect("US", &h, 0.95, MoodLabel::Happy, &policy())
            .unwrap()
            .unwrap();
        assert_eq!(event.country_code, "US");
        assert_eq!(event.previous_label, MoodLabel::Calm);
        assert_eq!(event.new_label, MoodLabel::Happy);
        // mean = 0.103333...
        assert_eq!(event.delta, 0.8467);
        assert!(event.reason.starts_with("z-score "));
        assert!(event.reason.ends_with("exceeds threshold 2.0"));
    }

    #[test]
    fn reason_keeps_fractional_threshold() {
        let h = history(&[0.1, 0.12, 0.09], MoodLabel::Calm);
        let strict = SpikePolicy {
            z_threshold: 2.5,
            ..policy()
        };
        let event = detect("US", &h, 0.95, MoodLabel::Happy, &strict)
            .unwrap()
            .unwrap();
        assert!(event.reason.ends_with("exceeds threshold 2.5"));
    }

    #[test]
    fn fewer_than_three_points_never_spikes() {
        for scores in [&[][..], &[0.1][..], &[0.1, 0.5][..]] {
            let h = history(scores, MoodLabel::Calm);
            assert_eq!(detect("FR", &h, 0.99, MoodLabel::Happy, &policy()), Ok(None));
            assert_eq!(detect("FR", &h, -0.99, MoodLabel::Angry, &policy()), Ok(None));
        }
    }

    #[test]
    fn same_label_never_spikes() {
        let h = history(&[0.1, 0.12, 0.09], MoodLabel::Happy);
        assert_eq!(detect("US", &h, 0.95, MoodLabel::Happy, &policy()), Ok(None));
    }

    #[test]
    fn flat_history_is_skipped() {
        let h = history(&[0.25, 0.25, 0.25, 0.25], MoodLabel::Happy);
        assert_eq!(detect("DE", &h, -0.9, MoodLabel::Angry, &policy()), Ok(None));
    }

    #[test]
    fn small_moves_are_noise() {
        let h = history(&[0.1, 0.3, 0.1, 0.3], MoodLabel::Happy);
        // mean 0.2, std 0.1: z = 1.0
        assert_eq!(detect("JP", &h, 0.1, MoodLabel::Calm, &policy()), Ok(None));
    }

    #[test]
    fn threshold_is_inclusive() {
        let h = history(&[0.0, 0.5, 0.0, 0.5], MoodLabel::Calm);
        // mean 0.25, std 0.25: score 0.75 gives z = 2.0 exactly
        let event = detect("BR", &h, 0.75, MoodLabel::Happy, &policy()).unwrap();
        assert!(event.is_some());
    }

    #[test]
    fn only_the_last_window_counts() {
        let mut scores = vec![0.9, -0.9, 0.9, -0.9];
        scores.extend([0.1, 0.12, 0.09]);
        let h = history(&scores, MoodLabel::Calm);
        let narrow = SpikePolicy {
            window: 3,
            ..policy()
        };
        assert!(detect("IN", &h, 0.95, MoodLabel::Happy, &narrow)
            .unwrap()
            .is_some());
        // the wide window sees the volatile prefix and stays quiet
        let wide = SpikePolicy {
            window: 7,
            ..policy()
        };
        assert_eq!(detect("IN", &h, 0.95, MoodLabel::Happy, &wide), Ok(None));
    }

    #[test]
    fn previous_label_is_most_recent() {
        let mut h = history(&[0.1, 0.12], MoodLabel::Happy);
        h.push(HistoryPoint::new(0.09, MoodLabel::Calm));
        let event = detect("US", &h, -0.9, MoodLabel::Angry, &policy())
            .unwrap()
            .unwrap();
        assert_eq!(event.previous_label, MoodLabel::Calm);
        assert!(event.delta < 0.0);
    }

    #[test]
    fn invalid_arguments_are_errors() {
        let h = history(&[0.1, 0.12, 0.09], MoodLabel::Calm);
        let zero = SpikePolicy {
            window: 0,
            ..policy()
        };
        assert_eq!(
            detect("US", &h, 0.5, MoodLabel::Happy, &zero),
            Err(MoodError::InvalidWindow)
        );
        assert!(detect("US", &h, f64::NAN, MoodLabel::Happy, &policy()).is_err());
    }

    #[test]
    fn batch_skips_countries_without_history() {
        let mut histories = BTreeMap::new();
        histories.insert("US".to_string(), history(&[0.1, 0.12, 0.09], MoodLabel::Calm));
        histories.insert("GB".to_string(), Vec::new());
        histories.insert("DE".to_string(), history(&[0.1, 0.12, 0.09], MoodLabel::Happy));

        let mut current = BTreeMap::new();
        for cc in ["US", "GB", "DE", "KR"] {
            current.insert(
                cc.to_string(),
                MoodResult::from_label(0.95, MoodLabel::Happy),
            );
        }

        let events = detect_batch(&histories, &current, &policy()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].country_code, "US");
    }

    #[test]
    fn batch_orders_by_country() {
        let mut histories = BTreeMap::new();
        let mut current = BTreeMap::new();
        for cc in ["ZA", "AR", "MX"] {
            histories.insert(cc.to_string(), history(&[0.1, 0.12, 0.09], MoodLabel::Calm));
            current.insert(
                cc.to_string(),
                MoodResult::from_label(0.95, MoodLabel::Happy),
            );
        }
        let events = detect_batch(&histories, &current, &policy()).unwrap();
        let codes: Vec<&str> = events.iter().map(|e| e.country_code.as_str()).collect();
        assert_eq!(codes, vec!["AR", "MX", "ZA"]);
    }
}
