//! Tag aggregation: catalog tags with occurrence counts in, four continuous
//! mood features out.
//!
//! Valence and energy come from a fixed reference table of known tags.
//! Danceability and acousticness come from two keyword sets, rescaled into a
//! biased mid-range because tag coverage is always partial.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use tracing::debug;

use crate::round_to;
use crate::types::{MoodFeatures, TagWeight, NEUTRAL};

/// Reference contribution of a known tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagProfile {
    pub valence: f64,
    pub energy: f64,
    /// How strongly the tag speaks to mood at all (0 = not at all).
    pub relevance: f64,
}

const fn profile(valence: f64, energy: f64, relevance: f64) -> TagProfile {
    TagProfile {
        valence,
        energy,
        relevance,
    }
}

/// Known tags and their (valence, energy, relevance).
pub const TAG_PROFILES: &[(&str, TagProfile)] = &[
    // happy / upbeat
    ("happy", profile(0.9, 0.7, 1.0)),
    ("upbeat", profile(0.8, 0.8, 0.9)),
    ("fun", profile(0.8, 0.7, 0.8)),
    ("feel good", profile(0.85, 0.6, 0.9)),
    ("party", profile(0.7, 0.9, 0.8)),
    ("dance", profile(0.7, 0.85, 0.8)),
    ("summer", profile(0.75, 0.7, 0.6)),
    ("pop", profile(0.65, 0.65, 0.5)),
    ("disco", profile(0.7, 0.8, 0.7)),
    ("reggae", profile(0.7, 0.5, 0.6)),
    ("funk", profile(0.7, 0.75, 0.7)),
    ("soul", profile(0.6, 0.5, 0.6)),
    ("love", profile(0.7, 0.4, 0.6)),
    ("romantic", profile(0.65, 0.35, 0.6)),
    // calm / chill
    ("chill", profile(0.55, 0.25, 0.9)),
    ("relax", profile(0.55, 0.2, 0.9)),
    ("ambient", profile(0.5, 0.15, 0.8)),
    ("acoustic", profile(0.5, 0.3, 0.7)),
    ("mellow", profile(0.5, 0.25, 0.8)),
    ("downtempo", profile(0.45, 0.3, 0.7)),
    ("lounge", profile(0.5, 0.25, 0.6)),
    ("jazz", profile(0.55, 0.35, 0.5)),
    ("classical", profile(0.5, 0.3, 0.5)),
    ("instrumental", profile(0.5, 0.3, 0.5)),
    ("folk", profile(0.5, 0.35, 0.5)),
    ("indie", profile(0.5, 0.45, 0.4)),
    ("singer-songwriter", profile(0.5, 0.3, 0.5)),
    // sad / melancholic
    ("sad", profile(0.15, 0.2, 1.0)),
    ("melancholy", profile(0.15, 0.2, 0.9)),
    ("melancholic", profile(0.15, 0.2, 0.9)),
    ("emotional", profile(0.3, 0.3, 0.7)),
    ("heartbreak", profile(0.1, 0.25, 0.9)),
    ("lonely", profile(0.15, 0.2, 0.8)),
    ("depressing", profile(0.1, 0.15, 0.9)),
    ("emo", profile(0.2, 0.45, 0.7)),
    ("blues", profile(0.25, 0.35, 0.6)),
    ("slow", profile(0.3, 0.2, 0.5)),
    ("ballad", profile(0.3, 0.2, 0.6)),
    // angry / aggressive
    ("angry", profile(0.1, 0.9, 1.0)),
    ("aggressive", profile(0.1, 0.9, 0.9)),
    ("metal", profile(0.15, 0.95, 0.8)),
    ("heavy metal", profile(0.1, 0.95, 0.8)),
    ("death metal", profile(0.05, 1.0, 0.9)),
    ("black metal", profile(0.05, 0.95, 0.8)),
    ("hardcore", profile(0.1, 0.95, 0.8)),
    ("punk", profile(0.25, 0.85, 0.7)),
    ("thrash", profile(0.1, 0.95, 0.8)),
    ("grunge", profile(0.2, 0.7, 0.6)),
    ("hard rock", profile(0.25, 0.85, 0.6)),
    ("nu metal", profile(0.15, 0.85, 0.7)),
    // anxious / tense
    ("dark", profile(0.2, 0.6, 0.8)),
    ("intense", profile(0.25, 0.8, 0.7)),
    ("electronic", profile(0.45, 0.7, 0.4)),
    ("industrial", profile(0.15, 0.8, 0.7)),
    ("experimental", profile(0.3, 0.6, 0.5)),
    ("noise", profile(0.1, 0.8, 0.7)),
    ("gothic", profile(0.2, 0.55, 0.6)),
    ("trip-hop", profile(0.35, 0.45, 0.5)),
    ("dubstep", profile(0.3, 0.8, 0.5)),
    ("techno", profile(0.4, 0.8, 0.4)),
    ("trance", profile(0.45, 0.75, 0.4)),
    // energetic, neutral-positive
    ("rock", profile(0.45, 0.75, 0.4)),
    ("alternative", profile(0.4, 0.6, 0.4)),
    ("hip-hop", profile(0.45, 0.7, 0.4)),
    ("rap", profile(0.4, 0.75, 0.4)),
    ("rnb", profile(0.55, 0.5, 0.4)),
    ("r&b", profile(0.55, 0.5, 0.4)),
    ("k-pop", profile(0.7, 0.75, 0.5)),
    ("j-pop", profile(0.65, 0.7, 0.5)),
    ("latin", profile(0.65, 0.7, 0.5)),
];

/// Tags that indicate danceable listening.
pub const DANCE_TAGS: &[&str] = &[
    "dance",
    "disco",
    "party",
    "electronic",
    "techno",
    "trance",
    "dubstep",
    "k-pop",
    "latin",
    "funk",
    "hip-hop",
    "rap",
];

/// Tags that indicate acoustic listening.
pub const ACOUSTIC_TAGS: &[&str] = &[
    "acoustic",
    "folk",
    "singer-songwriter",
    "classical",
    "instrumental",
    "ambient",
    "jazz",
    "blues",
    "ballad",
];

/// Genre-like tags considered for [`top_genre`].
pub const GENRE_TAGS: &[&str] = &[
    "pop",
    "rock",
    "hip-hop",
    "rap",
    "electronic",
    "metal",
    "jazz",
    "classical",
    "folk",
    "indie",
    "r&b",
    "rnb",
    "country",
    "blues",
    "reggae",
    "punk",
    "soul",
    "funk",
    "latin",
    "k-pop",
    "j-pop",
    "ambient",
    "dance",
    "techno",
    "trance",
];

/// Genre reported when no genre-like tag is present.
pub const DEFAULT_GENRE: &str = "pop";

const DANCE_BASE: f64 = 0.3;
const DANCE_SPAN: f64 = 0.5;
const ACOUSTIC_BASE: f64 = 0.2;
const ACOUSTIC_SPAN: f64 = 0.6;
const FEATURE_DIGITS: i32 = 3;

static PROFILE_INDEX: LazyLock<HashMap<&'static str, TagProfile>> =
    LazyLock::new(|| TAG_PROFILES.iter().copied().collect());
static DANCE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DANCE_TAGS.iter().copied().collect());
static ACOUSTIC_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ACOUSTIC_TAGS.iter().copied().collect());
static GENRE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| GENRE_TAGS.iter().copied().collect());

/// Look up the reference profile of a (normalized) tag name.
pub fn tag_profile(name: &str) -> Option<TagProfile> {
    PROFILE_INDEX.get(name).copied()
}

/// Negative or non-finite weights carry no signal.
fn sanitize_weight(weight: f64) -> f64 {
    if !weight.is_finite() || weight < 0.0 {
        0.0
    } else {
        weight
    }
}

/// Sanitized weights divided by the largest one, so sums stay within
/// `tags.len()` however large the raw weights are. Ratios are unchanged.
fn scaled_weights(tags: &[TagWeight]) -> Vec<f64> {
    let weights: Vec<f64> = tags.iter().map(|t| sanitize_weight(t.weight)).collect();
    let max = weights.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        weights.into_iter().map(|w| w / max).collect()
    } else {
        weights
    }
}

/// Trimmed, lowercased form used for every table lookup.
fn tag_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn finish(value: f64) -> f64 {
    if !value.is_finite() {
        return NEUTRAL;
    }
    round_to(value.clamp(0.0, 1.0), FEATURE_DIGITS)
}

/// Convert catalog tags into mood features.
///
/// Valence/energy are the relevance-weighted mean over tags in
/// [`TAG_PROFILES`] (0.5 when none match). Danceability/acousticness are
/// `0.3 + 0.5 * dance_share` and `0.2 + 0.6 * acoustic_share` over all tag
/// weight (0.5 when the total is zero). Outputs are clamped to [0, 1] and
/// rounded to 3 digits.
pub fn aggregate(tags: &[TagWeight]) -> MoodFeatures {
    let mut valence_sum = 0.0;
    let mut energy_sum = 0.0;
    let mut effective_sum = 0.0;

    let mut dance_signal = 0.0;
    let mut acoustic_signal = 0.0;
    let mut total = 0.0;

    for (tag, weight) in tags.iter().zip(scaled_weights(tags)) {
        let key = tag_key(&tag.name);
        let name = key.as_str();

        if let Some(p) = tag_profile(name) {
            let effective = weight * p.relevance;
            valence_sum += p.valence * effective;
            energy_sum += p.energy * effective;
            effective_sum += effective;
        }

        if DANCE_SET.contains(name) {
            dance_signal += weight;
        }
        if ACOUSTIC_SET.contains(name) {
            acoustic_signal += weight;
        }
        total += weight;
    }

    let (valence, energy) = if effective_sum > 0.0 {
        (valence_sum / effective_sum, energy_sum / effective_sum)
    } else {
        (NEUTRAL, NEUTRAL)
    };

    let (danceability, acousticness) = if total > 0.0 {
        (
            DANCE_BASE + DANCE_SPAN * (dance_signal / total),
            ACOUSTIC_BASE + ACOUSTIC_SPAN * (acoustic_signal / total),
        )
    } else {
        (NEUTRAL, NEUTRAL)
    };

    let features = MoodFeatures {
        valence: finish(valence),
        energy: finish(energy),
        danceability: finish(danceability),
        acousticness: finish(acousticness),
    };
    debug!(
        tags = tags.len(),
        matched_weight = effective_sum,
        ?features,
        "aggregated tag features"
    );
    features
}

/// The genre-like tag with the largest summed weight, or [`DEFAULT_GENRE`].
pub fn top_genre(tags: &[TagWeight]) -> String {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    for (tag, weight) in tags.iter().zip(scaled_weights(tags)) {
        let key = tag_key(&tag.name);
        if !GENRE_SET.contains(key.as_str()) {
            continue;
        }
        if !totals.contains_key(&key) {
            order.push(key.clone());
        }
        *totals.entry(key).or_insert(0.0) += weight;
    }

    let mut best: Option<(String, f64)> = None;
    for name in order {
        let total = totals[&name];
        if best.as_ref().map_or(true, |(_, b)| total > *b) {
            best = Some((name, total));
        }
    }
    best.map_or_else(|| DEFAULT_GENRE.to_string(), |(name, _)| name)
}
