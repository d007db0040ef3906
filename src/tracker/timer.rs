//! Rest countdown driven by one-second ticks

use tracing::debug;

/// How long the "complete" state stays visible
pub const COMPLETE_DISPLAY_SECS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown reached zero
    Completed,
    /// Complete display window ended, back to idle
    Cleared,
}

#[derive(Debug, Clone)]
pub struct RestTimer {
    duration: u32,
    remaining: u32,
    display_left: u32,
    state: TimerState,
}

impl RestTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration: duration_secs.max(1),
            remaining: 0,
            display_left: 0,
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// (Re)start from the full duration, whatever the current state
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.display_left = 0;
        self.state = TimerState::Running;
        debug!("Rest timer started ({}s)", self.duration);
    }

    /// Halt the countdown, keeping remaining time. No-op unless running.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Paused;
        true
    }

    /// Continue a paused countdown
    pub fn resume(&mut self) -> bool {
        if self.state != TimerState::Paused {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    pub fn reset(&mut self) {
        self.remaining = 0;
        self.display_left = 0;
        self.state = TimerState::Idle;
    }

    /// Advance one second
    pub fn tick(&mut self) -> Option<TimerEvent> {
        match self.state {
            TimerState::Running => {
                self.remaining = self.remaining.saturating_sub(1);
                if self.remaining == 0 {
                    self.state = TimerState::Complete;
                    self.display_left = COMPLETE_DISPLAY_SECS;
                    debug!("Rest timer complete");
                    return Some(TimerEvent::Completed);
                }
                None
            }
            TimerState::Complete => {
                self.display_left = self.display_left.saturating_sub(1);
                if self.display_left == 0 {
                    self.state = TimerState::Idle;
                    return Some(TimerEvent::Cleared);
                }
                None
            }
            TimerState::Idle | TimerState::Paused => None,
        }
    }

    /// Clock text for the current state: remaining time, or the full rest when idle
    pub fn display(&self) -> String {
        match self.state {
            TimerState::Idle => format_clock(self.duration),
            _ => format_clock(self.remaining),
        }
    }
}

/// Seconds as m:ss
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(timer: &mut RestTimer, ticks: u32) -> Vec<TimerEvent> {
        (0..ticks).filter_map(|_| timer.tick()).collect()
    }

    #[test]
    fn test_full_lifecycle() {
        let mut timer = RestTimer::new(5);
        assert_eq!(timer.state(), TimerState::Idle);

        timer.start();
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining(), 5);

        assert!(run(&mut timer, 4).is_empty());
        assert_eq!(timer.remaining(), 1);

        assert_eq!(timer.tick(), Some(TimerEvent::Completed));
        assert_eq!(timer.state(), TimerState::Complete);

        assert!(run(&mut timer, 2).is_empty());
        assert_eq!(timer.tick(), Some(TimerEvent::Cleared));
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_single_completion_within_window() {
        let mut timer = RestTimer::new(90);
        timer.start();
        let events = run(&mut timer, 90 + COMPLETE_DISPLAY_SECS + 10);
        assert_eq!(events, vec![TimerEvent::Completed, TimerEvent::Cleared]);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_pause_keeps_remaining() {
        let mut timer = RestTimer::new(10);
        timer.start();
        run(&mut timer, 3);
        assert!(timer.pause());
        assert_eq!(timer.state(), TimerState::Paused);

        run(&mut timer, 5);
        assert_eq!(timer.remaining(), 7);

        assert!(timer.resume());
        run(&mut timer, 1);
        assert_eq!(timer.remaining(), 6);
    }

    #[test]
    fn test_start_restarts_from_full_duration() {
        let mut timer = RestTimer::new(10);
        timer.start();
        run(&mut timer, 4);
        timer.start();
        assert_eq!(timer.remaining(), 10);

        timer.pause();
        timer.start();
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining(), 10);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut timer = RestTimer::new(2);
        timer.start();
        timer.reset();
        assert_eq!((timer.state(), timer.remaining()), (TimerState::Idle, 0));

        timer.start();
        timer.pause();
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);

        timer.start();
        run(&mut timer, 2);
        assert_eq!(timer.state(), TimerState::Complete);
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert!(timer.tick().is_none());
    }

    #[test]
    fn test_pause_resume_only_from_valid_states() {
        let mut timer = RestTimer::new(5);
        assert!(!timer.pause());
        assert!(!timer.resume());
        timer.start();
        assert!(!timer.resume());
    }

    #[test]
    fn test_zero_duration_clamped() {
        let mut timer = RestTimer::new(0);
        timer.start();
        assert_eq!(timer.tick(), Some(TimerEvent::Completed));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(90), "1:30");
        assert_eq!(format_clock(125), "2:05");
        assert_eq!(RestTimer::new(60).display(), "1:00");
    }
}
