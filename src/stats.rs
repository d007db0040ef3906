//! Workout statistics - totals, streaks and weekly averages

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::db::WorkoutLog;

/// Window used for the weekly average
const AVERAGE_WEEKS: i64 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub current_streak: u32,
    pub avg_weekly: f64,
}

/// Training analytics over a set of logs
pub struct Analytics {
    logs: Vec<WorkoutLog>,
}

impl Analytics {
    pub fn new(logs: Vec<WorkoutLog>) -> Self {
        Self { logs }
    }

    pub fn summary(&self, today: NaiveDate) -> WorkoutStats {
        WorkoutStats {
            total_workouts: self.logs.len(),
            current_streak: self.current_streak(today),
            avg_weekly: self.avg_weekly(today),
        }
    }

    /// Consecutive training days counted back from `today`.
    /// A streak stays alive while the latest training day is today or yesterday.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let days: BTreeSet<NaiveDate> = self.logs
            .iter()
            .map(|l| l.date)
            .filter(|d| *d <= today)
            .collect();

        let mut streak = 0;
        let mut last = today;
        for date in days.iter().rev() {
            if (last - *date).num_days() > 1 {
                break;
            }
            streak += 1;
            last = *date;
        }

        streak
    }

    /// Logs per week over the last four weeks, one decimal
    pub fn avg_weekly(&self, today: NaiveDate) -> f64 {
        let since = today - Duration::days(AVERAGE_WEEKS * 7);
        let recent = self.logs.iter().filter(|l| l.date >= since).count();
        let avg = recent as f64 / AVERAGE_WEEKS as f64;
        (avg * 10.0).round() / 10.0
    }

    fn matching<'a>(&'a self, exercise: &'a str) -> impl Iterator<Item = &'a WorkoutLog> + 'a {
        let needle = exercise.to_lowercase();
        self.logs
            .iter()
            .filter(move |l| l.exercise.to_lowercase().contains(&needle))
    }

    /// Total lifted volume (sets * reps * weight) for an exercise
    pub fn total_volume(&self, exercise: &str) -> f64 {
        self.matching(exercise)
            .map(|l| l.sets as f64 * l.reps as f64 * l.weight)
            .sum()
    }

    /// Heaviest logged weight for an exercise
    pub fn best_weight(&self, exercise: &str) -> Option<f64> {
        self.matching(exercise)
            .map(|l| l.weight)
            .fold(None, |best, w| Some(best.map_or(w, |b: f64| b.max(w))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::DayId;
    use chrono::Utc;

    fn create_log(exercise: &str, date: NaiveDate, sets: u32, reps: u32, weight: f64) -> WorkoutLog {
        WorkoutLog {
            id: format!("{}-{}", exercise, date),
            date,
            day: DayId::Upper,
            exercise: exercise.to_string(),
            sets,
            reps,
            weight,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    #[test]
    fn test_empty_summary() {
        let stats = Analytics::new(vec![]).summary(today());
        assert_eq!(stats, WorkoutStats { total_workouts: 0, current_streak: 0, avg_weekly: 0.0 });
    }

    #[test]
    fn test_streak_consecutive_days() {
        let logs = (0..5).map(|n| create_log("Bench Press", days_ago(n), 3, 10, 40.0)).collect();
        assert_eq!(Analytics::new(logs).current_streak(today()), 5);
    }

    #[test]
    fn test_streak_breaks_on_gap() {
        let logs = vec![
            create_log("Bench Press", days_ago(0), 3, 10, 40.0),
            create_log("Bench Press", days_ago(1), 3, 10, 40.0),
            create_log("Bench Press", days_ago(3), 3, 10, 40.0),
            create_log("Bench Press", days_ago(4), 3, 10, 40.0),
        ];
        assert_eq!(Analytics::new(logs).current_streak(today()), 2);
    }

    #[test]
    fn test_streak_same_day_counts_once() {
        let logs = vec![
            create_log("Bench Press", days_ago(0), 3, 10, 40.0),
            create_log("Dumbbell Curls", days_ago(0), 3, 12, 10.0),
            create_log("Bench Press", days_ago(1), 3, 10, 40.0),
        ];
        assert_eq!(Analytics::new(logs).current_streak(today()), 2);
    }

    #[test]
    fn test_streak_alive_from_yesterday() {
        let logs = vec![
            create_log("Bench Press", days_ago(1), 3, 10, 40.0),
            create_log("Bench Press", days_ago(2), 3, 10, 40.0),
        ];
        assert_eq!(Analytics::new(logs).current_streak(today()), 2);
    }

    #[test]
    fn test_streak_lapsed() {
        let logs = vec![create_log("Bench Press", days_ago(2), 3, 10, 40.0)];
        assert_eq!(Analytics::new(logs).current_streak(today()), 0);
    }

    #[test]
    fn test_streak_ignores_future_dates() {
        let logs = vec![
            create_log("Bench Press", today() + Duration::days(3), 3, 10, 40.0),
            create_log("Bench Press", days_ago(0), 3, 10, 40.0),
        ];
        assert_eq!(Analytics::new(logs).current_streak(today()), 1);
    }

    #[test]
    fn test_avg_weekly_last_four_weeks() {
        let logs = vec![
            create_log("Bench Press", days_ago(0), 3, 10, 40.0),
            create_log("Bench Press", days_ago(7), 3, 10, 40.0),
            create_log("Bench Press", days_ago(27), 3, 10, 40.0),
            create_log("Bench Press", days_ago(40), 3, 10, 40.0),
        ];
        // 3 recent logs / 4 weeks = 0.75 -> 0.8
        assert_eq!(Analytics::new(logs).avg_weekly(today()), 0.8);
    }

    #[test]
    fn test_total_volume_and_best_weight() {
        let logs = vec![
            create_log("Bench Press", days_ago(0), 3, 10, 40.0),
            create_log("bench press", days_ago(2), 3, 8, 50.0),
            create_log("Dumbbell Curls", days_ago(1), 3, 12, 10.0),
        ];
        let analytics = Analytics::new(logs);
        assert_eq!(analytics.total_volume("bench"), 1200.0 + 1200.0);
        assert_eq!(analytics.best_weight("Bench"), Some(50.0));
        assert_eq!(analytics.best_weight("squat"), None);
        assert_eq!(analytics.total_volume("squat"), 0.0);
    }
}
