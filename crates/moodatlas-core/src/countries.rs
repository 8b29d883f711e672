//! Supported markets and their display names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// ISO 3166-1 alpha-2 code and English display name of every tracked market.
pub const COUNTRIES: &[(&str, &str)] = &[
    // North America
    ("US", "United States"),
    ("CA", "Canada"),
    ("MX", "Mexico"),
    // South America
    ("BR", "Brazil"),
    ("AR", "Argentina"),
    ("CL", "Chile"),
    ("CO", "Colombia"),
    ("PE", "Peru"),
    ("VE", "Venezuela"),
    ("EC", "Ecuador"),
    // Western Europe
    ("GB", "United Kingdom"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("ES", "Spain"),
    ("IT", "Italy"),
    ("PT", "Portugal"),
    ("NL", "Netherlands"),
    ("BE", "Belgium"),
    ("AT", "Austria"),
    ("CH", "Switzerland"),
    ("IE", "Ireland"),
    // Northern Europe
    ("SE", "Sweden"),
    ("NO", "Norway"),
    ("FI", "Finland"),
    ("DK", "Denmark"),
    ("IS", "Iceland"),
    ("EE", "Estonia"),
    ("LV", "Latvia"),
    ("LT", "Lithuania"),
    // Eastern Europe
    ("PL", "Poland"),
    ("CZ", "Czech Republic"),
    ("SK", "Slovakia"),
    ("HU", "Hungary"),
    ("RO", "Romania"),
    ("BG", "Bulgaria"),
    ("UA", "Ukraine"),
    ("RS", "Serbia"),
    ("HR", "Croatia"),
    ("SI", "Slovenia"),
    ("GR", "Greece"),
    ("RU", "Russia"),
    ("TR", "Turkey"),
    // Middle East
    ("IL", "Israel"),
    ("SA", "Saudi Arabia"),
    ("AE", "United Arab Emirates"),
    // Africa
    ("ZA", "South Africa"),
    ("NG", "Nigeria"),
    ("EG", "Egypt"),
    ("KE", "Kenya"),
    ("MA", "Morocco"),
    // Asia
    ("IN", "India"),
    ("PK", "Pakistan"),
    ("JP", "Japan"),
    ("CN", "China"),
    ("KR", "South Korea"),
    ("TW", "Taiwan"),
    ("HK", "Hong Kong"),
    ("TH", "Thailand"),
    ("VN", "Vietnam"),
    ("ID", "Indonesia"),
    ("MY", "Malaysia"),
    ("SG", "Singapore"),
    ("PH", "Philippines"),
    // Oceania
    ("AU", "Australia"),
    ("NZ", "New Zealand"),
];

static NAME_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COUNTRIES.iter().copied().collect());

/// Display name for an (uppercase) country code, if it is a tracked market.
pub fn country_name(code: &str) -> Option<&'static str> {
    NAME_INDEX.get(code).copied()
}
