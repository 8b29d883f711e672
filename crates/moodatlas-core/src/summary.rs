use crate::types::MoodLabel;

/// Short phrase describing a mood, used in one-line summaries.
pub fn mood_description(label: MoodLabel) -> &'static str {
    match label {
        MoodLabel::Happy => "experiencing optimistic vibes today",
        MoodLabel::Calm => "in a peaceful and steady state",
        MoodLabel::Sad => "reflecting on challenging times",
        MoodLabel::Angry => "feeling tense amid recent events",
        MoodLabel::Anxious => "navigating uncertain times",
    }
}

/// One-sentence mood summary for when no generated summary is available.
pub fn fallback_summary(country_name: &str, label: MoodLabel, has_headlines: bool) -> String {
    let desc = mood_description(label);
    if has_headlines {
        format!("{country_name} is {desc} as news unfolds across the nation.")
    } else {
        format!("{country_name} is {desc}.")
    }
}
