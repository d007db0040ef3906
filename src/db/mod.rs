//! Database module - SQLite key-value storage for workout logs and set state
//!
//! Every record lives as serialized JSON text under a single key, so the
//! stored layout stays compatible with what the browser build kept in
//! local storage.

pub mod sets;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::program::DayId;
use crate::stats::{Analytics, WorkoutStats};

pub use sets::{ExerciseSetState, SetRecord};

pub const WORKOUT_LOGS_KEY: &str = "3daysfit-workout-logs";
pub const EXERCISE_SETS_KEY: &str = "3daysfit-exercise-sets";
pub const USER_KEY: &str = "workout_user";

/// Logged exercise entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub id: String,
    pub date: NaiveDate,
    pub day: DayId,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Log entry before it gets an id and creation time
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutLog {
    pub date: NaiveDate,
    pub day: DayId,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub notes: Option<String>,
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path))?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Self { conn: Connection::open_in_memory()? };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite a value (last writer wins)
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Read a JSON value; missing or malformed data yields the default
    pub(crate) fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(raw) = self.get_item(key)? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("Error parsing stored {}: {}", key, e);
                Ok(T::default())
            }
        }
    }

    pub(crate) fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.set_item(key, &json)
    }

    /// Append a new log, assigning id and creation time
    pub fn save_log(&self, entry: NewWorkoutLog) -> Result<WorkoutLog> {
        let mut logs = self.get_logs()?;

        let log = WorkoutLog {
            id: Uuid::new_v4().to_string(),
            date: entry.date,
            day: entry.day,
            exercise: entry.exercise,
            sets: entry.sets,
            reps: entry.reps,
            weight: entry.weight,
            notes: entry.notes,
            created_at: Utc::now(),
        };

        logs.push(log.clone());
        self.write_json(WORKOUT_LOGS_KEY, &logs)?;
        info!("Saved workout log {} ({})", log.id, log.exercise);

        Ok(log)
    }

    /// All logs in insertion order
    pub fn get_logs(&self) -> Result<Vec<WorkoutLog>> {
        self.read_json(WORKOUT_LOGS_KEY)
    }

    /// Delete log by id; returns false when nothing matched
    pub fn delete_log(&self, id: &str) -> Result<bool> {
        let logs = self.get_logs()?;
        let before = logs.len();
        let remaining: Vec<_> = logs.into_iter().filter(|l| l.id != id).collect();

        self.write_json(WORKOUT_LOGS_KEY, &remaining)?;
        Ok(remaining.len() < before)
    }

    /// Totals, streak and weekly average as of `today`
    pub fn stats(&self, today: NaiveDate) -> Result<WorkoutStats> {
        let logs = self.get_logs()?;
        Ok(Analytics::new(logs).summary(today))
    }
}
