use chrono::NaiveDate;

use crate::models::mood::{Mood, MoodEntry, MoodRecord, NewMood};

/// Data-integrity failure when converting a stored row to a domain entry.
///
/// An unrecognized mood name is deliberately NOT represented here: it falls
/// back to [`Mood::Neutral`] so that rows written by a newer app version with
/// an extended vocabulary still render.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("malformed date string in stored record: {0:?}")]
    MalformedDate(String),
}

/// Convert a stored row to a domain entry.
///
/// Fails only on a malformed `dateString`; the store always writes dates in
/// `YYYY-MM-DD` form, so an error here means the data was corrupted outside
/// the app.
pub fn to_entry(record: &MoodRecord) -> Result<MoodEntry, MapError> {
    let date = NaiveDate::parse_from_str(&record.date_string, "%Y-%m-%d")
        .map_err(|_| MapError::MalformedDate(record.date_string.clone()))?;

    let mood = Mood::from_name(&record.mood_name).unwrap_or_else(|| {
        tracing::debug!(mood_name = %record.mood_name, "Unknown mood name, falling back to NEUTRAL");
        Mood::Neutral
    });

    Ok(MoodEntry {
        id: record.id,
        date,
        mood,
        note: record.note.clone(),
    })
}

/// Inverse of [`to_entry`], minus the id. The store assigns ids on insert and
/// deletes go by the entry's original id, so the mapper never invents one.
pub fn to_record(entry: &MoodEntry) -> NewMood {
    NewMood {
        date_string: entry.date.format("%Y-%m-%d").to_string(),
        mood_name: entry.mood.name().to_string(),
        note: entry.note.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, mood: &str, note: &str) -> MoodRecord {
        MoodRecord {
            id: 7,
            date_string: date.into(),
            mood_name: mood.into(),
            note: note.into(),
        }
    }

    #[test]
    fn test_to_entry_parses_date_and_mood() {
        let entry = to_entry(&record("2026-08-30", "SAD", "rough day")).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
        assert_eq!(entry.mood, Mood::Sad);
        assert_eq!(entry.note, "rough day");
    }

    #[test]
    fn test_unknown_mood_falls_back_to_neutral() {
        let entry = to_entry(&record("2026-08-30", "EXCITED", "")).unwrap();
        assert_eq!(entry.mood, Mood::Neutral);
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        let err = to_entry(&record("not-a-date", "HAPPY", "")).unwrap_err();
        assert!(matches!(err, MapError::MalformedDate(_)));
    }

    #[test]
    fn test_round_trip_preserves_mood_and_note() {
        let original = record("2026-01-05", "TIRED", "long week");
        let entry = to_entry(&original).unwrap();
        let back = to_record(&entry);
        assert_eq!(back.date_string, original.date_string);
        assert_eq!(back.mood_name, original.mood_name);
        assert_eq!(back.note, original.note);
    }
}
