//! Countdown timer - repeating, pausable, expiry-driven
//!
//! The timer does not own a clock. Whoever drives it calls [`CountdownTimer::tick`]
//! once per tick interval; each call is one atomic evaluation step. Stopping
//! only clears the running flag, so a tick that was already scheduled simply
//! evaluates to [`Tick::Inactive`].
//!
//! A running evaluation shows the current remaining count and then
//! decrements it. Once the count has gone below zero the next evaluation
//! fires the expiry callback, reloads the configured total and counts on
//! from there. With a total of 2 the display reads 2, 1, 0 and the fourth
//! evaluation expires and shows 2 again.

use bank_core::{format_mm_ss, BankError, BankResult, Countdown};
use tracing::{debug, info};

use crate::TimerConfig;

/// Lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    /// Never started, or ended; the next start loads the configured total
    Idle,
    /// Counting down
    Running,
    /// Paused with its remaining count kept
    Stopped,
}

/// What the display should show after an evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerDisplay {
    /// Seconds shown
    pub remaining: u32,
    /// Configured total, for gauge scaling
    pub total: u32,
}

impl TimerDisplay {
    /// `MM:SS` text
    pub fn text(&self) -> String {
        format_mm_ss(self.remaining)
    }

    /// Gauge fill in `0.0..=1.0`
    pub fn fill(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.remaining as f64 / self.total as f64).clamp(0.0, 1.0)
    }
}

/// Result of one evaluation step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Not running; nothing happened
    Inactive,
    /// Counted down one step
    Counted(TimerDisplay),
    /// Expiry fired, then the countdown restarted from its total
    Expired(TimerDisplay),
}

impl Tick {
    pub fn display(&self) -> Option<TimerDisplay> {
        match self {
            Tick::Inactive => None,
            Tick::Counted(d) | Tick::Expired(d) => Some(*d),
        }
    }

    pub fn expired(&self) -> bool {
        matches!(self, Tick::Expired(_))
    }
}

/// Repeating inflation countdown
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    total: Countdown,
    /// Remaining seconds; reaches -1 just before expiry
    remaining: i64,
    state: TimerState,
    /// Expiries since creation
    expiries: u64,
}

impl CountdownTimer {
    /// Create an idle timer with default configuration
    pub fn new() -> Self {
        Self::with_config(&TimerConfig::default())
    }

    pub fn with_config(config: &TimerConfig) -> Self {
        CountdownTimer {
            total: config.default_total,
            remaining: 0,
            state: TimerState::Idle,
            expiries: 0,
        }
    }

    /// Set a new total
    ///
    /// Reloads the remaining count unless the timer is running, in which
    /// case the new total takes effect at the next restart.
    pub fn configure(&mut self, total: Countdown) -> BankResult<()> {
        if total.is_zero() {
            return Err(BankError::InvalidDuration("countdown total must be positive".into()));
        }
        self.total = total;
        if self.state != TimerState::Running {
            self.remaining = total.as_secs() as i64;
        }
        debug!(total = %total, state = ?self.state, "timer configured");
        Ok(())
    }

    /// Start or resume counting, evaluating the first step immediately
    ///
    /// An override reconfigures the total first. Resuming from `Stopped`
    /// continues from the kept count; starting from `Idle` loads the total.
    /// Starting a running timer ignores the override and returns
    /// [`Tick::Inactive`], so there is never a second tick chain.
    pub fn start<F: FnOnce()>(
        &mut self,
        total: Option<Countdown>,
        on_expire: F,
    ) -> BankResult<Tick> {
        if self.state == TimerState::Running {
            debug!(override_total = ?total, "timer already running");
            return Ok(Tick::Inactive);
        }
        if let Some(total) = total {
            self.configure(total)?;
        }
        match self.state {
            TimerState::Idle => {
                if self.total.is_zero() {
                    return Err(BankError::InvalidDuration(
                        "countdown total must be positive".into(),
                    ));
                }
                self.remaining = self.total.as_secs() as i64;
            }
            TimerState::Stopped | TimerState::Running => {}
        }

        self.state = TimerState::Running;
        debug!(remaining = self.remaining, total = %self.total, "timer started");
        Ok(self.evaluate(on_expire))
    }

    /// One tick; a no-op unless running
    pub fn tick<F: FnOnce()>(&mut self, on_expire: F) -> Tick {
        if self.state != TimerState::Running {
            return Tick::Inactive;
        }
        self.evaluate(on_expire)
    }

    /// Pause, keeping the remaining count
    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
            debug!(remaining = self.remaining, "timer stopped");
        }
    }

    /// Stop and zero the count; the display resets to `00:00`
    pub fn end(&mut self) -> TimerDisplay {
        self.state = TimerState::Idle;
        self.remaining = 0;
        debug!("timer ended");
        TimerDisplay {
            remaining: 0,
            total: self.total.as_secs(),
        }
    }

    fn evaluate<F: FnOnce()>(&mut self, on_expire: F) -> Tick {
        if self.remaining >= 0 {
            let display = self.display_and_decrement();
            return Tick::Counted(display);
        }

        on_expire();
        self.expiries += 1;
        info!(expiries = self.expiries, total = %self.total, "countdown expired, restarting");
        self.remaining = self.total.as_secs() as i64;
        Tick::Expired(self.display_and_decrement())
    }

    fn display_and_decrement(&mut self) -> TimerDisplay {
        let display = TimerDisplay {
            remaining: self.remaining.max(0) as u32,
            total: self.total.as_secs(),
        };
        self.remaining -= 1;
        display
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn total(&self) -> Countdown {
        self.total
    }

    /// Remaining count; -1 means the next running tick expires
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn expiries(&self) -> u64 {
        self.expiries
    }

    /// What the display shows right now, without evaluating
    pub fn display(&self) -> TimerDisplay {
        TimerDisplay {
            remaining: self.remaining.max(0) as u32,
            total: self.total.as_secs(),
        }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u32) -> Countdown {
        Countdown::from_secs(s)
    }

    /// Run `n` ticks, returning how many fired the callback
    fn run_ticks(timer: &mut CountdownTimer, n: usize) -> usize {
        let mut fired = 0;
        for _ in 0..n {
            timer.tick(|| fired += 1);
        }
        fired
    }

    #[test]
    fn test_expires_once_after_total_plus_one_ticks() {
        let mut timer = CountdownTimer::new();
        let mut fired = 0;
        timer.start(Some(secs(5)), || fired += 1).unwrap();

        fired += run_ticks(&mut timer, 6);

        assert_eq!(fired, 1);
        assert_eq!(timer.expiries(), 1);
        // restarted at 5, shown, then decremented once
        assert_eq!(timer.remaining(), 4);
        assert!(timer.is_running());
    }

    #[test]
    fn test_display_sequence() {
        let mut timer = CountdownTimer::new();
        let first = timer.start(Some(secs(2)), || {}).unwrap();
        assert_eq!(first, Tick::Counted(TimerDisplay { remaining: 2, total: 2 }));

        let shown: Vec<Tick> = (0..4).map(|_| timer.tick(|| {})).collect();
        assert_eq!(
            shown,
            vec![
                Tick::Counted(TimerDisplay { remaining: 1, total: 2 }),
                Tick::Counted(TimerDisplay { remaining: 0, total: 2 }),
                Tick::Expired(TimerDisplay { remaining: 2, total: 2 }),
                Tick::Counted(TimerDisplay { remaining: 1, total: 2 }),
            ]
        );
    }

    #[test]
    fn test_auto_restarts_indefinitely() {
        let mut timer = CountdownTimer::new();
        timer.start(Some(secs(3)), || {}).unwrap();

        // every 4 ticks after the first cycle is one expiry
        let fired = run_ticks(&mut timer, 4 * 5);
        assert_eq!(fired, 5);
        assert!(timer.is_running());
    }

    #[test]
    fn test_stop_preserves_remaining() {
        let mut timer = CountdownTimer::new();
        timer.start(Some(secs(5)), || {}).unwrap();
        run_ticks(&mut timer, 2);
        assert_eq!(timer.remaining(), 2);

        timer.stop();
        assert_eq!(run_ticks(&mut timer, 10), 0);
        assert_eq!(timer.remaining(), 2);
        assert_eq!(timer.tick(|| {}), Tick::Inactive);

        // resumes from the kept count, not the total
        let resumed = timer.start(None, || {}).unwrap();
        assert_eq!(resumed.display().unwrap().remaining, 2);
        assert_eq!(timer.remaining(), 1);
    }

    #[test]
    fn test_stop_at_expiry_edge_does_not_fire() {
        let mut timer = CountdownTimer::new();
        timer.start(Some(secs(1)), || {}).unwrap();
        run_ticks(&mut timer, 1);
        assert_eq!(timer.remaining(), -1);

        timer.stop();
        assert_eq!(run_ticks(&mut timer, 3), 0);

        let mut fired = false;
        let tick = timer.start(None, || fired = true).unwrap();
        assert!(fired);
        assert!(tick.expired());
    }

    #[test]
    fn test_end_resets_to_idle() {
        let mut timer = CountdownTimer::new();
        timer.start(Some(secs(4)), || {}).unwrap();
        run_ticks(&mut timer, 2);

        let display = timer.end();
        assert_eq!(display.text(), "00:00");
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining(), 0);
        assert_eq!(run_ticks(&mut timer, 5), 0);

        // restart loads the last configured total
        let tick = timer.start(None, || {}).unwrap();
        assert_eq!(tick.display().unwrap().remaining, 4);
    }

    #[test]
    fn test_start_while_running_is_single_chain() {
        let mut timer = CountdownTimer::new();
        timer.start(Some(secs(5)), || {}).unwrap();
        let again = timer.start(None, || {}).unwrap();
        assert_eq!(again, Tick::Inactive);
        assert_eq!(timer.remaining(), 4);

        // an override while running is ignored
        assert_eq!(timer.start(Some(secs(9)), || {}).unwrap(), Tick::Inactive);
        assert_eq!(timer.remaining(), 4);
        assert_eq!(timer.total().as_secs(), 5);

        // the next cycle still reloads the original total
        let mut fired = 0;
        for _ in 0..5 {
            timer.tick(|| fired += 1);
        }
        assert_eq!(fired, 1);
        assert_eq!(timer.display().total, 5);
    }

    #[test]
    fn test_configure_rejects_zero() {
        let mut timer = CountdownTimer::new();
        assert!(matches!(
            timer.configure(Countdown::ZERO),
            Err(BankError::InvalidDuration(_))
        ));
        assert!(matches!(
            timer.start(Some(Countdown::ZERO), || {}),
            Err(BankError::InvalidDuration(_))
        ));
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.total(), Countdown::DEFAULT);
    }

    #[test]
    fn test_start_with_zero_default_total_fails() {
        let mut timer = CountdownTimer::with_config(&TimerConfig::with_total(Countdown::ZERO));
        assert!(matches!(
            timer.start(None, || {}),
            Err(BankError::InvalidDuration(_))
        ));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_configure_while_stopped_reloads() {
        let mut timer = CountdownTimer::new();
        timer.start(Some(secs(10)), || {}).unwrap();
        run_ticks(&mut timer, 3);
        timer.stop();

        timer.configure(secs(30)).unwrap();
        assert_eq!(timer.remaining(), 30);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn test_display_fill() {
        let display = TimerDisplay { remaining: 150, total: 600 };
        assert_eq!(display.text(), "02:30");
        assert!((display.fill() - 0.25).abs() < 1e-9);
        assert_eq!(TimerDisplay { remaining: 0, total: 0 }.fill(), 0.0);
    }

    proptest::proptest! {
        #[test]
        fn prop_expiry_cadence(total in 1u32..120, ticks in 0usize..1000) {
            let mut timer = CountdownTimer::new();
            let mut fired = 0usize;
            timer.start(Some(secs(total)), || fired += 1).unwrap();
            fired += run_ticks(&mut timer, ticks);

            let period = total as usize + 1;
            proptest::prop_assert_eq!(fired, ticks / period);
            proptest::prop_assert_eq!(timer.expiries() as usize, fired);
            let shown = total as i64 - (ticks % period) as i64;
            proptest::prop_assert_eq!(timer.remaining(), shown - 1);
        }
    }
}
