//! Exercise card - rest timer and set checklist for one exercise on one day

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::db::{Database, SetRecord};
use crate::program::Exercise;

use super::TrackerEvent;
use super::chime::CompletionSignal;
use super::sets::SetTracker;
use super::timer::{RestTimer, TimerEvent};

const TICK: Duration = Duration::from_secs(1);

pub struct ExerciseCard {
    exercise: &'static Exercise,
    date: NaiveDate,
    timer: RestTimer,
    sets: SetTracker,
    signal: CompletionSignal,
    // Second boundaries count from timer start/resume and from the celebration
    timer_phase: Instant,
    celebration_phase: Instant,
    pub show_instructions: bool,
}

impl ExerciseCard {
    pub fn new(exercise: &'static Exercise, date: NaiveDate, stored: Vec<SetRecord>, signal: CompletionSignal) -> Self {
        Self {
            exercise,
            date,
            timer: RestTimer::new(exercise.rest_secs()),
            sets: SetTracker::new(exercise.sets, stored),
            signal,
            timer_phase: Instant::now(),
            celebration_phase: Instant::now(),
            show_instructions: false,
        }
    }

    /// Card with today's stored sets
    pub fn load(db: &Database, exercise: &'static Exercise, date: NaiveDate, signal: CompletionSignal) -> Result<Self> {
        let stored = db.today_sets(date, exercise.name)?;
        Ok(Self::new(exercise, date, stored, signal))
    }

    pub fn exercise(&self) -> &'static Exercise {
        self.exercise
    }

    pub fn timer(&self) -> &RestTimer {
        &self.timer
    }

    pub fn sets(&self) -> &SetTracker {
        &self.sets
    }

    pub fn start_timer(&mut self) {
        self.timer.start();
        self.timer_phase = Instant::now();
    }

    /// Pause a running timer or resume a paused one
    pub fn toggle_pause(&mut self) -> bool {
        if self.timer.pause() {
            return true;
        }
        if self.timer.resume() {
            self.timer_phase = Instant::now();
            return true;
        }
        false
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    fn persist(&self, db: &Database) -> Result<()> {
        db.save_exercise_sets(self.date, self.exercise.name, self.sets.sets())
    }

    /// Toggle a set and persist its completion
    pub fn toggle_set(&mut self, db: &Database, index: usize, checked: bool) -> Result<Option<TrackerEvent>> {
        if index >= self.sets.target() {
            return Ok(None);
        }
        let celebrate = self.sets.toggle(index, checked);
        db.save_set_completion(self.date, self.exercise.name, index, checked)?;

        if celebrate {
            self.celebration_phase = Instant::now();
            info!("All {} sets of {} complete", self.sets.target(), self.exercise.name);
            return Ok(Some(TrackerEvent::Celebration));
        }
        Ok(None)
    }

    /// Complete the first open set
    pub fn complete_next(&mut self, db: &Database) -> Result<Option<TrackerEvent>> {
        match self.sets.next_incomplete() {
            Some(index) => self.toggle_set(db, index, true),
            None => Ok(None),
        }
    }

    /// Reopen the last completed set
    pub fn undo_last(&mut self, db: &Database) -> Result<()> {
        if let Some(index) = self.sets.last_complete() {
            self.toggle_set(db, index, false)?;
        }
        Ok(())
    }

    pub fn set_weight(&mut self, db: &Database, index: usize, weight: f64) -> Result<bool> {
        let changed = self.sets.set_weight(index, weight);
        if changed {
            self.persist(db)?;
        }
        Ok(changed)
    }

    pub fn set_reps(&mut self, db: &Database, index: usize, reps: u32) -> Result<bool> {
        let changed = self.sets.set_reps(index, reps);
        if changed {
            self.persist(db)?;
        }
        Ok(changed)
    }

    /// Advance one second; fires the completion signal when the rest ends
    pub fn tick(&mut self) -> Vec<TrackerEvent> {
        let mut events = Vec::new();
        events.extend(self.tick_timer());
        events.extend(self.tick_celebration());
        events
    }

    /// Catch up on every whole second elapsed by `now`, each clock on its own phase
    pub fn advance(&mut self, now: Instant) -> Vec<TrackerEvent> {
        let mut events = Vec::new();

        while now.saturating_duration_since(self.timer_phase) >= TICK {
            self.timer_phase += TICK;
            events.extend(self.tick_timer());
        }
        while now.saturating_duration_since(self.celebration_phase) >= TICK {
            self.celebration_phase += TICK;
            events.extend(self.tick_celebration());
        }

        events
    }

    fn tick_timer(&mut self) -> Option<TrackerEvent> {
        match self.timer.tick()? {
            TimerEvent::Completed => {
                self.signal.fire();
                Some(TrackerEvent::TimerCompleted)
            }
            TimerEvent::Cleared => Some(TrackerEvent::TimerCleared),
        }
    }

    fn tick_celebration(&mut self) -> Option<TrackerEvent> {
        self.sets.tick().then_some(TrackerEvent::CelebrationCleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::find_exercise;
    use crate::tracker::chime::tests::counting;
    use crate::tracker::timer::{COMPLETE_DISPLAY_SECS, TimerState};
    use std::sync::atomic::Ordering;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_rest_runs_to_completion_with_one_signal() {
        let (chime, plays) = counting(false);
        let exercise = find_exercise("Dumbbell Curls").unwrap();
        let mut card = ExerciseCard::new(exercise, today(), vec![], CompletionSignal::new(Some(chime), counting(false).0));

        card.start_timer();
        let events: Vec<_> = (0..60 + COMPLETE_DISPLAY_SECS)
            .flat_map(|_| card.tick())
            .collect();

        assert_eq!(events, vec![TrackerEvent::TimerCompleted, TrackerEvent::TimerCleared]);
        assert_eq!(plays.load(Ordering::SeqCst), 1);
        assert_eq!(card.timer().state(), TimerState::Idle);
    }

    #[test]
    fn test_sets_persist_and_celebrate() {
        let db = Database::open_in_memory().unwrap();
        let exercise = find_exercise("Bench Press").unwrap();
        let mut card = ExerciseCard::load(&db, exercise, today(), CompletionSignal::new(None, counting(false).0)).unwrap();

        assert_eq!(card.complete_next(&db).unwrap(), None);
        assert_eq!(card.complete_next(&db).unwrap(), None);
        assert_eq!(card.complete_next(&db).unwrap(), Some(TrackerEvent::Celebration));
        assert_eq!(card.complete_next(&db).unwrap(), None);

        let stored = db.today_sets(today(), "Bench Press").unwrap();
        assert_eq!(stored.iter().filter(|s| s.is_complete).count(), 3);

        let events: Vec<_> = (0..3).flat_map(|_| card.tick()).collect();
        assert_eq!(events, vec![TrackerEvent::CelebrationCleared]);
    }

    #[test]
    fn test_reload_keeps_progress() {
        let db = Database::open_in_memory().unwrap();
        let exercise = find_exercise("Barbell Squats").unwrap();
        let signal = || CompletionSignal::new(None, counting(false).0);

        let mut card = ExerciseCard::load(&db, exercise, today(), signal()).unwrap();
        card.toggle_set(&db, 1, true).unwrap();
        card.set_weight(&db, 1, 80.0).unwrap();
        card.set_reps(&db, 1, 8).unwrap();

        let card = ExerciseCard::load(&db, exercise, today(), signal()).unwrap();
        assert_eq!(card.sets().sets().len(), 4);
        assert_eq!(card.sets().sets()[1], SetRecord { weight: 80.0, reps: 8, is_complete: true });
    }

    #[test]
    fn test_undo_last() {
        let db = Database::open_in_memory().unwrap();
        let exercise = find_exercise("Calf Raises").unwrap();
        let mut card = ExerciseCard::load(&db, exercise, today(), CompletionSignal::new(None, counting(false).0)).unwrap();

        card.complete_next(&db).unwrap();
        card.complete_next(&db).unwrap();
        card.undo_last(&db).unwrap();
        assert_eq!(card.sets().completed_count(), 1);
        assert_eq!(card.sets().last_complete(), Some(0));
    }

    #[test]
    fn test_timer_counts_from_start() {
        let exercise = find_exercise("Bench Press").unwrap();
        let mut card = ExerciseCard::new(exercise, today(), vec![], CompletionSignal::new(None, counting(false).0));

        // Idle time before the start must not shorten the first second
        let created = Instant::now();
        card.advance(created + Duration::from_millis(900));
        card.start_timer();
        let started = Instant::now();

        assert!(card.advance(started + Duration::from_millis(150)).is_empty());
        assert_eq!(card.timer().remaining(), 90);

        card.advance(started + Duration::from_millis(1000));
        assert_eq!(card.timer().remaining(), 89);
        card.advance(started + Duration::from_millis(3500));
        assert_eq!(card.timer().remaining(), 87);
    }

    #[test]
    fn test_celebration_lasts_three_seconds_from_last_set() {
        let db = Database::open_in_memory().unwrap();
        let exercise = find_exercise("Dumbbell Curls").unwrap();
        let mut card = ExerciseCard::load(&db, exercise, today(), CompletionSignal::new(None, counting(false).0)).unwrap();

        for _ in 0..3 {
            card.complete_next(&db).unwrap();
        }
        let done = Instant::now();

        assert!(card.advance(done + Duration::from_millis(2500)).is_empty());
        assert!(card.sets().is_celebrating());
        assert_eq!(card.advance(done + Duration::from_millis(3000)), vec![TrackerEvent::CelebrationCleared]);
    }

    #[test]
    fn test_toggle_out_of_range_is_ignored() {
        let db = Database::open_in_memory().unwrap();
        let exercise = find_exercise("Dumbbell Curls").unwrap();
        let mut card = ExerciseCard::load(&db, exercise, today(), CompletionSignal::new(None, counting(false).0)).unwrap();

        assert_eq!(card.toggle_set(&db, 7, true).unwrap(), None);
        assert!(db.today_sets(today(), "Dumbbell Curls").unwrap().is_empty());
    }

    #[test]
    fn test_toggle_pause() {
        let exercise = find_exercise("Plank Hold").unwrap();
        let mut card = ExerciseCard::new(exercise, today(), vec![], CompletionSignal::new(None, counting(false).0));
        assert!(!card.toggle_pause());
        card.start_timer();
        assert!(card.toggle_pause());
        assert_eq!(card.timer().state(), TimerState::Paused);
        assert!(card.toggle_pause());
        assert_eq!(card.timer().state(), TimerState::Running);
    }
}
