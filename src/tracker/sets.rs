//! Set checklist for one exercise with a one-shot celebration

use crate::db::SetRecord;

/// How long the celebration stays up
pub const CELEBRATION_SECS: u32 = 3;

#[derive(Debug, Clone)]
pub struct SetTracker {
    target: usize,
    sets: Vec<SetRecord>,
    celebration_left: u32,
}

impl SetTracker {
    /// Start from stored sets, or `target` empty sets if nothing was stored
    pub fn new(target: usize, stored: Vec<SetRecord>) -> Self {
        let mut sets = stored;
        if sets.len() < target {
            sets.resize(target, SetRecord::default());
        }
        Self { target, sets, celebration_left: 0 }
    }

    pub fn sets(&self) -> &[SetRecord] {
        &self.sets
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn completed_count(&self) -> usize {
        self.sets.iter().filter(|s| s.is_complete).count()
    }

    pub fn is_done(&self) -> bool {
        self.completed_count() >= self.target
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration_left > 0
    }

    /// Mark a set complete or not. Returns true when this toggle
    /// brought the completed count up to the target (celebration fired).
    pub fn toggle(&mut self, index: usize, checked: bool) -> bool {
        let Some(set) = self.sets.get_mut(index) else {
            return false;
        };
        if set.is_complete == checked {
            return false;
        }
        set.is_complete = checked;

        if checked && self.completed_count() == self.target {
            self.celebration_left = CELEBRATION_SECS;
            return true;
        }
        false
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) -> bool {
        match self.sets.get_mut(index) {
            Some(set) if weight.is_finite() && weight >= 0.0 => {
                set.weight = weight;
                true
            }
            _ => false,
        }
    }

    pub fn set_reps(&mut self, index: usize, reps: u32) -> bool {
        match self.sets.get_mut(index) {
            Some(set) => {
                set.reps = reps;
                true
            }
            None => false,
        }
    }

    pub fn next_incomplete(&self) -> Option<usize> {
        self.sets.iter().position(|s| !s.is_complete)
    }

    pub fn last_complete(&self) -> Option<usize> {
        self.sets.iter().rposition(|s| s.is_complete)
    }

    /// Advance one second; true when the celebration just ended
    pub fn tick(&mut self) -> bool {
        if self.celebration_left == 0 {
            return false;
        }
        self.celebration_left -= 1;
        self.celebration_left == 0
    }
}
