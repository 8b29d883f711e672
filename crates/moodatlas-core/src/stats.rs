use serde::{Deserialize, Serialize};

use crate::ingest::CountryMood;
use crate::round_to;
use crate::types::MoodLabel;

/// How many countries share a label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodShare {
    pub label: MoodLabel,
    pub count: usize,
    /// Whole-number percentage of all countries.
    pub percentage: u32,
}

/// Cross-country rollup of one ingest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalStats {
    pub total_countries: usize,
    /// Labels present, most common first (ties in label order).
    pub distribution: Vec<MoodShare>,
    pub dominant: MoodShare,
    pub avg_valence: f64,
    pub avg_energy: f64,
}

/// Summarize a set of country moods; `None` when there are none.
pub fn global_stats(countries: &[CountryMood]) -> Option<GlobalStats> {
    if countries.is_empty() {
        return None;
    }
    let total = countries.len();

    let mut distribution: Vec<MoodShare> = MoodLabel::ALL
        .iter()
        .filter_map(|&label| {
            let count = countries
                .iter()
                .filter(|c| c.mood.mood_label == label)
                .count();
            (count > 0).then(|| MoodShare {
                label,
                count,
                percentage: (count as f64 / total as f64 * 100.0).round() as u32,
            })
        })
        .collect();
    // stable: equal counts keep label order
    distribution.sort_by(|a, b| b.count.cmp(&a.count));

    let dominant = distribution[0].clone();
    let avg = |f: fn(&CountryMood) -> f64| {
        round_to(countries.iter().map(f).sum::<f64>() / total as f64, 3)
    };

    Some(GlobalStats {
        total_countries: total,
        dominant,
        avg_valence: avg(|c| c.features.valence),
        avg_energy: avg(|c| c.features.energy),
        distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{FeatureSource, SentimentSource};
    use crate::types::{MoodFeatures, MoodResult};

    fn country(cc: &str, label: MoodLabel, valence: f64, energy: f64) -> CountryMood {
        CountryMood {
            country_code: cc.to_string(),
            country_name: cc.to_string(),
            features: MoodFeatures {
                valence,
                energy,
                ..MoodFeatures::neutral()
            },
            feature_source: FeatureSource::Provided,
            top_genre: None,
            news_sentiment: None,
            sentiment_source: SentimentSource::Disabled,
            mood: MoodResult::from_label(0.0, label),
            summary: String::new(),
            spike_active: false,
        }
    }

    #[test]
    fn empty_has_no_stats() {
        assert_eq!(global_stats(&[]), None);
    }

    #[test]
    fn distribution_sorted_by_count() {
        let rows = vec![
            country("US", MoodLabel::Calm, 0.5, 0.4),
            country("GB", MoodLabel::Sad, 0.3, 0.2),
            country("DE", MoodLabel::Sad, 0.2, 0.3),
            country("FR", MoodLabel::Happy, 0.8, 0.7),
        ];
        let stats = global_stats(&rows).unwrap();
        assert_eq!(stats.total_countries, 4);
        assert_eq!(stats.dominant.label, MoodLabel::Sad);
        assert_eq!(stats.dominant.count, 2);
        assert_eq!(stats.dominant.percentage, 50);
        let labels: Vec<MoodLabel> = stats.distribution.iter().map(|s| s.label).collect();
        // Happy and Calm tie at 1; label order breaks the tie
        assert_eq!(labels, vec![MoodLabel::Sad, MoodLabel::Happy, MoodLabel::Calm]);
        assert_eq!(stats.avg_valence, 0.45);
        assert_eq!(stats.avg_energy, 0.4);
    }

    #[test]
    fn percentages_round() {
        let rows = vec![
            country("US", MoodLabel::Calm, 0.5, 0.5),
            country("GB", MoodLabel::Calm, 0.5, 0.5),
            country("DE", MoodLabel::Angry, 0.5, 0.5),
        ];
        let stats = global_stats(&rows).unwrap();
        assert_eq!(stats.distribution[0].percentage, 67);
        assert_eq!(stats.distribution[1].percentage, 33);
    }
}
