//! Per-day set completion storage: date -> exercise -> [SetRecord]

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Database, EXERCISE_SETS_KEY};

/// One set of one exercise on one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecord {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight: f64,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub reps: u32,
    #[serde(default)]
    pub is_complete: bool,
}

impl SetRecord {
    pub fn completed() -> Self {
        Self { is_complete: true, ..Self::default() }
    }
}

pub type ExerciseSetState = BTreeMap<String, BTreeMap<String, Vec<SetRecord>>>;

/// Stored set entry: either the old completion flag or a full record.
/// Sparse lists written by the browser build contain `null` holes.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSet {
    Flag(bool),
    Record(SetRecord),
}

impl From<Option<StoredSet>> for SetRecord {
    fn from(stored: Option<StoredSet>) -> Self {
        match stored {
            Some(StoredSet::Flag(true)) => SetRecord::completed(),
            Some(StoredSet::Flag(false)) | None => SetRecord::default(),
            Some(StoredSet::Record(record)) => record,
        }
    }
}

type StoredState = BTreeMap<String, BTreeMap<String, Vec<Option<StoredSet>>>>;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

// Form inputs were stored as raw text ("42.5", ""), numbers elsewhere
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|n| n.is_finite() && *n >= 0.0)
        .unwrap_or(0.0))
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = lenient_f64(deserializer)?;
    Ok(value.min(u32::MAX as f64) as u32)
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl Database {
    /// Full set state, legacy boolean lists converted to records
    pub fn exercise_sets(&self) -> Result<ExerciseSetState> {
        let stored: StoredState = self.read_json(EXERCISE_SETS_KEY)?;

        let state = stored
            .into_iter()
            .map(|(date, exercises)| {
                let exercises = exercises
                    .into_iter()
                    .map(|(name, sets)| (name, sets.into_iter().map(SetRecord::from).collect()))
                    .collect();
                (date, exercises)
            })
            .collect();

        Ok(state)
    }

    /// Stored sets of one exercise on `date`, empty if none
    pub fn today_sets(&self, date: NaiveDate, exercise: &str) -> Result<Vec<SetRecord>> {
        let mut state = self.exercise_sets()?;
        Ok(state
            .get_mut(&date_key(date))
            .and_then(|day| day.remove(exercise))
            .unwrap_or_default())
    }

    /// Overwrite the whole set list of one exercise on `date`
    pub fn save_exercise_sets(&self, date: NaiveDate, exercise: &str, sets: &[SetRecord]) -> Result<()> {
        let mut state = self.exercise_sets()?;
        state
            .entry(date_key(date))
            .or_default()
            .insert(exercise.to_string(), sets.to_vec());
        self.write_json(EXERCISE_SETS_KEY, &state)
    }

    /// Mark a single set, padding the list with empty sets as needed
    pub fn save_set_completion(&self, date: NaiveDate, exercise: &str, index: usize, completed: bool) -> Result<()> {
        let mut sets = self.today_sets(date, exercise)?;
        if sets.len() <= index {
            sets.resize(index + 1, SetRecord::default());
        }
        sets[index].is_complete = completed;
        self.save_exercise_sets(date, exercise, &sets)
    }
}
