//! Keyword-based headline sentiment, used when no model score is available.

use std::sync::LazyLock;

use regex::Regex;

use crate::round_to;

const POSITIVE_STEMS: &[&str] = &[
    "win",
    "celebrate",
    "peace",
    "growth",
    "success",
    "record",
    "breakthrough",
    "victory",
    "improve",
    "rise",
    "gain",
    "boost",
    "hope",
    "joy",
    "festival",
    "achievement",
    "award",
];

const NEGATIVE_STEMS: &[&str] = &[
    "war",
    "crisis",
    "attack",
    "death",
    "crash",
    "protest",
    "disaster",
    "flood",
    "kill",
    "bomb",
    "fire",
    "earthquake",
    "recession",
    "inflation",
    "poverty",
    "violence",
    "terror",
];

// " - BBC News" style attribution at the end of feed titles.
static SOURCE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+-\s+[^-]+$").unwrap());

/// Strip a trailing ` - Source Name` attribution and surrounding whitespace.
pub fn clean_headline(raw: &str) -> String {
    SOURCE_SUFFIX.replace(raw.trim(), "").trim().to_string()
}

fn headline_score(headline: &str) -> f64 {
    let lower = headline.to_lowercase();
    let mut pos = 0u32;
    let mut neg = 0u32;
    for word in lower.split_whitespace() {
        if POSITIVE_STEMS.iter().any(|stem| word.contains(stem)) {
            pos += 1;
        }
        if NEGATIVE_STEMS.iter().any(|stem| word.contains(stem)) {
            neg += 1;
        }
    }
    match pos + neg {
        0 => 0.0,
        total => (f64::from(pos) - f64::from(neg)) / f64::from(total),
    }
}

/// Mean per-headline keyword balance in [-1, 1], rounded to 3 digits.
///
/// A headline scores `(pos - neg) / (pos + neg)` over words containing a
/// positive or negative stem, or 0 when it has neither. No headlines is 0.
pub fn keyword_sentiment<S: AsRef<str>>(headlines: &[S]) -> f64 {
    if headlines.is_empty() {
        return 0.0;
    }
    let sum: f64 = headlines.iter().map(|h| headline_score(h.as_ref())).sum();
    let mean = sum / headlines.len() as f64;
    round_to(mean.clamp(-1.0, 1.0), 3)
}
