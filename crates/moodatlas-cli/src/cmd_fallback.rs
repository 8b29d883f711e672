use moodatlas_core::fallback::{fallback_features, fallback_sentiment};
use moodatlas_core::MoodFeatures;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct FallbackOutput {
    country_code: String,
    #[serde(flatten)]
    features: MoodFeatures,
    news_sentiment: f64,
}

fn build(country: &str) -> FallbackOutput {
    let cc = country.trim().to_uppercase();
    FallbackOutput {
        features: fallback_features(&cc),
        news_sentiment: fallback_sentiment(&cc),
        country_code: cc,
    }
}

/// `moodatlas fallback <CC>`
pub fn execute(country: &str) -> anyhow::Result<()> {
    if country.trim().is_empty() {
        anyhow::bail!("country code must not be empty");
    }
    println!("{}", serde_json::to_string_pretty(&build(country))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_normalized() {
        let a = build(" jp ");
        let b = build("JP");
        assert_eq!(a.country_code, "JP");
        assert_eq!(a.features, b.features);
        assert_eq!(a.news_sentiment, b.news_sentiment);
    }

    #[test]
    fn empty_code_errors() {
        assert!(execute("  ").is_err());
    }
}
