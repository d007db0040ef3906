//! Manual log entry - field validation before a log is saved

use std::fmt;

use chrono::NaiveDate;

use crate::db::NewWorkoutLog;
use crate::program::{DayId, find_day};

pub const MIN_SETS: i64 = 1;
pub const MAX_SETS: i64 = 10;
pub const MIN_REPS: i64 = 1;
pub const MAX_REPS: i64 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raw form values as entered
#[derive(Debug, Clone)]
pub struct LogForm {
    pub date: String,
    pub day: String,
    pub exercise: String,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub notes: Option<String>,
}

impl LogForm {
    /// Empty form with the default values for `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            day: String::new(),
            exercise: String::new(),
            sets: 3,
            reps: 10,
            weight: 0.0,
            notes: None,
        }
    }

    /// Check every field; all problems are reported at once
    pub fn validate(&self) -> Result<NewWorkoutLog, Vec<FieldError>> {
        let mut errors = Vec::new();

        let date = if self.date.trim().is_empty() {
            errors.push(FieldError::new("date", "Date is required"));
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.push(FieldError::new("date", "Date must be in YYYY-MM-DD format"));
                    None
                }
            }
        };

        let day = match self.day.parse::<DayId>() {
            Ok(d) => Some(d),
            Err(_) => {
                errors.push(FieldError::new("day", "Please select a workout day"));
                None
            }
        };

        let mut exercise = self.exercise.trim().to_string();
        if exercise.is_empty() {
            errors.push(FieldError::new("exercise", "Please select an exercise"));
        } else if let Some(day) = day {
            // Normalize to the catalog spelling
            match find_day(day).exercises.iter().find(|e| e.name.eq_ignore_ascii_case(&exercise)) {
                Some(ex) => exercise = ex.name.to_string(),
                None => errors.push(FieldError::new(
                    "exercise",
                    format!("'{}' is not part of {}", exercise, find_day(day).name),
                )),
            }
        }

        if self.sets < MIN_SETS {
            errors.push(FieldError::new("sets", format!("Sets must be at least {}", MIN_SETS)));
        } else if self.sets > MAX_SETS {
            errors.push(FieldError::new("sets", format!("Sets cannot exceed {}", MAX_SETS)));
        }

        if self.reps < MIN_REPS {
            errors.push(FieldError::new("reps", format!("Reps must be at least {}", MIN_REPS)));
        } else if self.reps > MAX_REPS {
            errors.push(FieldError::new("reps", format!("Reps cannot exceed {}", MAX_REPS)));
        }

        if !self.weight.is_finite() || self.weight < 0.0 {
            errors.push(FieldError::new("weight", "Weight cannot be negative"));
        }

        match (date, day, errors.is_empty()) {
            (Some(date), Some(day), true) => Ok(NewWorkoutLog {
                date,
                day,
                exercise,
                sets: self.sets as u32,
                reps: self.reps as u32,
                weight: self.weight,
                notes: self.notes
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(String::from),
            }),
            _ => Err(errors),
        }
    }
}
