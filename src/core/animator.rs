//! Progress animation engine with fixed-period ticking
//!
//! **Architecture**: Animator does NOT own the UI. The app polls `update()`
//! once per frame with the current Instant; due ticks are applied and the
//! widget reads `progress()` afterwards. One logical thread of control ever
//! touches the state, so there is nothing to lock.
//!
//! # Timing Model
//!
//! Fixed-period ticks (default 30ms). Elapsed wall time is converted into
//! whole due ticks; the fractional remainder carries over to the next poll.
//! Catch-up after a stall is capped - a UI-thread repeating timer coalesces
//! missed firings instead of replaying them.
//!
//! # State Machine
//!
//! Idle → Running → Complete. Completion is terminal: the ticker is
//! disarmed exactly once at the transition and later polls are no-ops.
//! `restart()` builds the Running state from scratch.

use log::{debug, info, trace};
use std::time::{Duration, Instant};

/// Default tick period
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(30);

/// Default progress increment per tick
pub const DEFAULT_STEP: f64 = 0.005;

/// Max ticks applied per poll; older firings are coalesced
const MAX_CATCHUP_TICKS: u32 = 4;

/// Animation lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Complete,
}

/// Converts polled wall time into due ticks at a fixed period.
///
/// Armed with an Instant, then polled with later Instants; whole elapsed
/// periods become ticks, the remainder is carried forward.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    last_poll: Option<Instant>,
    carry: Duration,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            // Sub-millisecond periods busy-spin the event loop
            period: period.max(Duration::from_millis(1)),
            last_poll: None,
            carry: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.last_poll.is_some()
    }

    /// Arm the ticker; the first tick comes due one full period later.
    pub fn arm(&mut self, now: Instant) {
        self.last_poll = Some(now);
        self.carry = Duration::ZERO;
    }

    pub fn disarm(&mut self) {
        self.last_poll = None;
        self.carry = Duration::ZERO;
    }

    /// Number of ticks that came due since the last poll, capped at
    /// MAX_CATCHUP_TICKS. Disarmed tickers report zero.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last_poll else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(last) + self.carry;
        let n = (elapsed.as_nanos() / self.period.as_nanos()).min(u32::MAX as u128) as u32;
        self.last_poll = Some(now);

        if n == 0 {
            self.carry = elapsed;
            return 0;
        }
        if n > MAX_CATCHUP_TICKS {
            // Long stall: apply a bounded burst, drop the backlog
            self.carry = Duration::ZERO;
            return MAX_CATCHUP_TICKS;
        }
        self.carry = elapsed - self.period * n;
        n
    }

    /// Time until the next tick comes due (zero if already overdue).
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        let last = self.last_poll?;
        let pending = now.saturating_duration_since(last) + self.carry;
        Some(self.period.saturating_sub(pending))
    }
}

/// Progress state machine: 0 to 1 in fixed steps, then frozen.
///
/// Progress is derived from the tick count (`min(1.0, ticks * step)`), not
/// accumulated, so `progress(n)` is exact for every n and completion lands
/// on the tick where the product reaches 1.0.
#[derive(Debug, Clone)]
pub struct Animator {
    step: f64,
    ticks: u32,
    phase: Phase,
    ticker: Ticker,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD, DEFAULT_STEP)
    }
}

impl Animator {
    pub fn new(period: Duration, step: f64) -> Self {
        Self {
            step: step.clamp(1e-6, 1.0),
            ticks: 0,
            phase: Phase::Idle,
            ticker: Ticker::new(period),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn period(&self) -> Duration {
        self.ticker.period()
    }

    /// Current progress fraction in [0, 1].
    pub fn progress(&self) -> f64 {
        (self.ticks as f64 * self.step).min(1.0)
    }

    /// Displayed percentage, rounded down to the nearest 5%.
    pub fn percent(&self) -> u32 {
        rounded_percent(self.progress())
    }

    /// Percentage readout, e.g. "35%".
    pub fn percent_text(&self) -> String {
        format!("{}%", self.percent())
    }

    /// Begin (or resume) ticking. No-op once complete; use `restart()`.
    pub fn start(&mut self, now: Instant) {
        match self.phase {
            Phase::Running => {}
            Phase::Complete => debug!("start() after completion ignored"),
            Phase::Idle => {
                self.phase = Phase::Running;
                self.ticker.arm(now);
                info!(
                    "Progress animation started (period {:?}, step {})",
                    self.ticker.period(),
                    self.step
                );
            }
        }
    }

    /// Stop ticking without resetting progress.
    pub fn stop(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Idle;
            self.ticker.disarm();
            debug!("Progress animation stopped at {:.3}", self.progress());
        }
    }

    /// Reset to zero and start over.
    pub fn restart(&mut self, now: Instant) {
        debug!("Progress animation restarting");
        self.ticks = 0;
        self.phase = Phase::Idle;
        self.ticker.disarm();
        self.start(now);
    }

    /// Apply one logical tick. Returns false when not Running (the
    /// already-complete guard); completion disarms the ticker exactly once.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.ticks += 1;
        if self.progress() >= 1.0 {
            self.phase = Phase::Complete;
            self.ticker.disarm();
            info!("Progress complete after {} ticks", self.ticks);
        }
        true
    }

    /// Poll with the current wall clock; applies all due ticks.
    /// Returns how many were applied.
    pub fn update(&mut self, now: Instant) -> u32 {
        if self.phase != Phase::Running {
            return 0;
        }
        let due = self.ticker.due(now);
        let mut applied = 0;
        for _ in 0..due {
            if !self.tick() {
                break;
            }
            applied += 1;
        }
        if applied > 0 {
            trace!("{} tick(s) applied, progress {:.3}", applied, self.progress());
        }
        applied
    }

    /// Time until the next tick comes due; None unless Running.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        if self.phase != Phase::Running {
            return None;
        }
        self.ticker.until_next(now)
    }
}

/// floor(progress*100 / 5) * 5 - the readout granularity of the bar.
pub fn rounded_percent(progress: f64) -> u32 {
    let percent = (progress.clamp(0.0, 1.0) * 100.0) as u32;
    (percent / 5) * 5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(step: f64) -> Animator {
        let mut a = Animator::new(DEFAULT_PERIOD, step);
        a.start(Instant::now());
        a
    }

    #[test]
    fn test_progress_law() {
        let mut a = running(DEFAULT_STEP);
        let mut prev = 0.0;
        for n in 1..=250u32 {
            a.tick();
            let expected = (n as f64 * DEFAULT_STEP).min(1.0);
            assert!((a.progress() - expected).abs() < 1e-12, "tick {}", n);
            assert!(a.progress() >= prev);
            prev = a.progress();
        }
        assert_eq!(a.progress(), 1.0);
    }

    #[test]
    fn test_percent_multiples_of_five() {
        let mut a = running(DEFAULT_STEP);
        for _ in 0..250 {
            a.tick();
            assert_eq!(a.percent() % 5, 0);
            assert_eq!(a.percent(), rounded_percent(a.progress()));
        }
    }

    #[test]
    fn test_completion_on_tick_200() {
        let mut a = running(DEFAULT_STEP);
        for _ in 0..199 {
            a.tick();
        }
        assert!((a.progress() - 0.995).abs() < 1e-12);
        assert!(a.is_running());

        a.tick();
        assert_eq!(a.progress(), 1.0);
        assert!(a.is_complete());
        assert_eq!(a.percent_text(), "100%");
    }

    #[test]
    fn test_ticks_after_completion_are_noops() {
        let mut a = running(DEFAULT_STEP);
        for _ in 0..200 {
            a.tick();
        }
        assert!(a.is_complete());

        for _ in 0..10 {
            assert!(!a.tick());
        }
        assert_eq!(a.progress(), 1.0);
        assert_eq!(a.percent_text(), "100%");

        // Polling a completed animator applies nothing either
        assert_eq!(a.update(Instant::now()), 0);
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut a = Animator::new(DEFAULT_PERIOD, DEFAULT_STEP);
        assert_eq!(a.phase(), Phase::Idle);
        assert!(!a.tick());
        assert_eq!(a.progress(), 0.0);
        assert_eq!(a.percent_text(), "0%");
    }

    #[test]
    fn test_stop_keeps_progress_and_start_resumes() {
        let mut a = running(DEFAULT_STEP);
        for _ in 0..20 {
            a.tick();
        }
        a.stop();
        assert_eq!(a.phase(), Phase::Idle);
        assert!((a.progress() - 0.1).abs() < 1e-12);
        assert!(!a.tick());

        a.start(Instant::now());
        a.tick();
        assert!((a.progress() - 0.105).abs() < 1e-12);
    }

    #[test]
    fn test_restart_resets() {
        let mut a = running(DEFAULT_STEP);
        for _ in 0..200 {
            a.tick();
        }
        assert!(a.is_complete());

        a.restart(Instant::now());
        assert!(a.is_running());
        assert_eq!(a.progress(), 0.0);
        a.tick();
        assert!((a.progress() - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_displayed_percent() {
        let mut a = running(DEFAULT_STEP);
        for _ in 0..20 {
            a.tick();
        }
        assert_eq!(a.percent_text(), "10%");

        for _ in 0..20 {
            a.tick();
        }
        assert_eq!(a.percent_text(), "20%");
    }

    #[test]
    fn test_rounded_percent() {
        assert_eq!(rounded_percent(0.0), 0);
        assert_eq!(rounded_percent(0.04), 0);
        assert_eq!(rounded_percent(0.05), 5);
        assert_eq!(rounded_percent(0.1), 10);
        assert_eq!(rounded_percent(0.2), 20);
        assert_eq!(rounded_percent(0.995), 95);
        assert_eq!(rounded_percent(0.999), 95);
        assert_eq!(rounded_percent(1.0), 100);
    }

    #[test]
    fn test_ticker_due_and_carry() {
        let period = Duration::from_millis(30);
        let mut t = Ticker::new(period);
        let t0 = Instant::now();
        t.arm(t0);

        // Not yet due
        assert_eq!(t.due(t0 + Duration::from_millis(29)), 0);
        // The remainder carried over makes this one due
        assert_eq!(t.due(t0 + Duration::from_millis(31)), 1);
        // Two full periods at once
        assert_eq!(t.due(t0 + Duration::from_millis(91)), 2);
    }

    #[test]
    fn test_ticker_catchup_cap() {
        let mut t = Ticker::new(Duration::from_millis(30));
        let t0 = Instant::now();
        t.arm(t0);

        // A 3-second stall coalesces instead of replaying 100 ticks
        assert_eq!(t.due(t0 + Duration::from_secs(3)), 4);
        // Backlog was dropped, next period starts fresh
        assert_eq!(t.due(t0 + Duration::from_secs(3) + Duration::from_millis(29)), 0);
    }

    #[test]
    fn test_ticker_disarmed_reports_zero() {
        let mut t = Ticker::new(Duration::from_millis(30));
        assert!(!t.is_armed());
        assert_eq!(t.due(Instant::now() + Duration::from_secs(1)), 0);
        assert_eq!(t.until_next(Instant::now()), None);
    }

    #[test]
    fn test_update_polls_ticker() {
        let mut a = Animator::new(Duration::from_millis(30), DEFAULT_STEP);
        let t0 = Instant::now();
        a.start(t0);

        assert_eq!(a.update(t0 + Duration::from_millis(15)), 0);
        assert_eq!(a.update(t0 + Duration::from_millis(45)), 1);
        assert!((a.progress() - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_completion_disarms_ticker() {
        let mut a = Animator::new(Duration::from_millis(30), 0.5);
        let t0 = Instant::now();
        a.start(t0);
        assert!(a.until_next_tick(t0).is_some());

        a.tick();
        a.tick();
        assert!(a.is_complete());
        assert_eq!(a.until_next_tick(t0), None);
    }
}
