use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Closed mood vocabulary. Stored by canonical name (`moodName` column);
/// unknown stored names resolve to `Neutral` on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Angry,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Angry,
        Mood::Tired,
    ];

    /// Canonical name as persisted in the `moods` table.
    pub fn name(&self) -> &'static str {
        match self {
            Mood::Happy => "HAPPY",
            Mood::Neutral => "NEUTRAL",
            Mood::Sad => "SAD",
            Mood::Angry => "ANGRY",
            Mood::Tired => "TIRED",
        }
    }

    /// Exact-match resolution; `None` for anything outside the vocabulary.
    pub fn from_name(name: &str) -> Option<Mood> {
        match name {
            "HAPPY" => Some(Mood::Happy),
            "NEUTRAL" => Some(Mood::Neutral),
            "SAD" => Some(Mood::Sad),
            "ANGRY" => Some(Mood::Angry),
            "TIRED" => Some(Mood::Tired),
            _ => None,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Sad => "😢",
            Mood::Angry => "😡",
            Mood::Tired => "😴",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Okay",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Tired => "Tired",
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::Neutral
    }
}

/// Persisted row shape of the `moods` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MoodRecord {
    pub id: i64,
    #[sqlx(rename = "dateString")]
    pub date_string: String,
    #[sqlx(rename = "moodName")]
    pub mood_name: String,
    pub note: String,
}

/// Insert shape; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMood {
    pub date_string: String,
    pub mood_name: String,
    pub note: String,
}

/// Domain value derived from a `MoodRecord`; never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub mood: Mood,
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateMoodRequest {
    pub mood: Mood,
    pub note: Option<String>,
}

/// One line of the summary card: how many entries carry a given mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub emoji: &'static str,
    pub label: &'static str,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_name_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_name(mood.name()), Some(mood));
        }
    }

    #[test]
    fn test_from_name_unknown_is_none() {
        assert_eq!(Mood::from_name("EXCITED"), None);
        assert_eq!(Mood::from_name("happy"), None, "matching is exact, not case-folded");
        assert_eq!(Mood::from_name(""), None);
    }

    #[test]
    fn test_mood_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Mood::Happy).unwrap();
        assert_eq!(json, "\"HAPPY\"");
        let back: Mood = serde_json::from_str("\"TIRED\"").unwrap();
        assert_eq!(back, Mood::Tired);
    }

    #[test]
    fn test_default_mood_is_neutral() {
        assert_eq!(Mood::default(), Mood::Neutral);
    }
}
