use crate::models::format_mm_ss;

/// Countdown clock for one period.
///
/// The clock only changes through [`tick`](MatchClock::tick), driven once
/// per elapsed second by the engine's driver. Reaching zero auto-pauses;
/// moving to the next period is always a manual action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchClock {
    period_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl MatchClock {
    pub fn new(period_secs: u32) -> Self {
        Self { period_secs, remaining_secs: period_secs, running: false }
    }

    /// Begin ticking. No-op when already running or when no time remains.
    pub fn start(&mut self) {
        if self.remaining_secs > 0 {
            self.running = true;
        }
    }

    /// Stop ticking. Idempotent.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stop ticking and restore the full period duration. Accumulated
    /// player seconds are not touched here.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.period_secs;
    }

    /// One elapsed second. Returns whether the clock actually advanced.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.running = false;
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn period_secs(&self) -> u32 {
        self.period_secs
    }

    /// Remaining time as mm:ss.
    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_only_advances_while_running() {
        let mut clock = MatchClock::new(60);
        assert!(!clock.tick());
        clock.start();
        assert!(clock.tick());
        assert_eq!(clock.remaining_secs(), 59);
        clock.pause();
        assert!(!clock.tick());
        assert_eq!(clock.remaining_secs(), 59);
    }

    #[test]
    fn auto_pause_at_zero() {
        let mut clock = MatchClock::new(3);
        clock.start();
        for _ in 0..3 {
            clock.tick();
        }
        assert_eq!(clock.remaining_secs(), 0);
        assert!(!clock.is_running());
        // Starting at zero stays stopped.
        clock.start();
        assert!(!clock.is_running());
        assert!(!clock.tick());
    }

    #[test]
    fn reset_restores_full_duration() {
        let mut clock = MatchClock::new(1500);
        clock.start();
        for _ in 0..90 {
            clock.tick();
        }
        assert_eq!(clock.remaining_secs(), 1410);
        clock.reset();
        assert!(!clock.is_running());
        assert_eq!(clock.remaining_secs(), 1500);
        assert_eq!(clock.display(), "25:00");
    }
}
