//! Tracker module - per-exercise rest timer and set checklist
//!
//! Features:
//! - Rest countdown (Idle -> Running -> Complete -> Idle, pausable)
//! - Completion signal with tone fallback
//! - Set checklist with a one-shot "all sets done" celebration

pub mod card;
pub mod chime;
pub mod sets;
pub mod timer;

pub use card::ExerciseCard;
pub use chime::{Chime, CompletionSignal};
pub use sets::SetTracker;
pub use timer::{RestTimer, TimerState, format_clock};

/// Things a card reports back to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    TimerCompleted,
    TimerCleared,
    Celebration,
    CelebrationCleared,
}
