//! Pomodoro countdown: local state machine plus the tokio task that drives
//! the once-per-second tick.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_SESSION_SECS: u32 = 25 * 60;

/// Outcome of applying one tick to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Timer inactive; nothing changed.
    Idle,
    /// One second consumed.
    Ticked,
    /// The countdown just hit zero. Reported exactly once per session.
    Completed,
}

#[derive(Debug, Clone)]
pub struct CountdownTimer {
    initial_secs: u32,
    remaining_secs: u32,
    active: bool,
}

impl CountdownTimer {
    pub fn new(initial_secs: u32) -> Self {
        CountdownTimer {
            initial_secs,
            remaining_secs: initial_secs,
            active: false,
        }
    }

    /// Activate the countdown. Returns false (and does nothing) when a
    /// session is already running.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        true
    }

    /// Deactivate and restore the configured initial time.
    pub fn reset(&mut self) {
        self.active = false;
        self.remaining_secs = self.initial_secs;
    }

    pub fn tick(&mut self) -> Tick {
        if !self.active {
            return Tick::Idle;
        }
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.active = false;
            return Tick::Completed;
        }
        self.remaining_secs -= 1;
        Tick::Ticked
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// `MM:SS`, zero-padded, no hour rollover: 3661 seconds formats as
    /// "61:01".
    pub fn format_time(&self) -> String {
        format_time(self.remaining_secs)
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        CountdownTimer::new(DEFAULT_SESSION_SECS)
    }
}

pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Background task sending one `()` per second over a bounded channel.
///
/// Starting a new sequence always aborts the previous task first, so at most
/// one pending tick exists at any time; dropping the ticker aborts too.
pub struct Ticker {
    inner: Option<(JoinHandle<()>, mpsc::Receiver<()>)>,
}

impl Ticker {
    pub fn new() -> Self {
        Ticker { inner: None }
    }

    pub fn start(&mut self) {
        self.stop();
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick resolves immediately; skip it so the initial
            // second displays for a full second.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        self.inner = Some((handle, rx));
    }

    pub fn stop(&mut self) {
        if let Some((handle, _)) = self.inner.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.is_some()
    }

    /// Drain one pending tick, if any.
    pub fn try_tick(&mut self) -> bool {
        match self.inner.as_mut() {
            Some((_, rx)) => rx.try_recv().is_ok(),
            None => false,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Ticker::new()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_projection() {
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        // No hour rollover: minutes keep counting past 60.
        assert_eq!(format_time(3661), "61:01");
    }

    #[test]
    fn test_starts_inactive_with_full_time() {
        let timer = CountdownTimer::new(1500);
        assert!(!timer.is_active());
        assert_eq!(timer.remaining_secs(), 1500);
        assert_eq!(timer.format_time(), "25:00");
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut timer = CountdownTimer::new(10);
        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.is_active());
    }

    #[test]
    fn test_tick_decrements_by_one() {
        let mut timer = CountdownTimer::new(10);
        timer.start();
        assert_eq!(timer.tick(), Tick::Ticked);
        assert_eq!(timer.remaining_secs(), 9);
    }

    #[test]
    fn test_tick_while_inactive_is_idle() {
        let mut timer = CountdownTimer::new(10);
        assert_eq!(timer.tick(), Tick::Idle);
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn test_countdown_strictly_decreases_until_zero() {
        let mut timer = CountdownTimer::new(5);
        timer.start();
        let mut previous = timer.remaining_secs();
        loop {
            match timer.tick() {
                Tick::Ticked => {
                    assert_eq!(timer.remaining_secs(), previous - 1);
                    previous = timer.remaining_secs();
                }
                Tick::Completed => break,
                Tick::Idle => panic!("timer went idle before completing"),
            }
        }
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let mut timer = CountdownTimer::new(2);
        timer.start();
        assert_eq!(timer.tick(), Tick::Ticked);
        assert_eq!(timer.tick(), Tick::Completed);
        assert!(!timer.is_active());
        assert_eq!(timer.tick(), Tick::Idle);
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn test_one_second_session_completes_immediately() {
        let mut timer = CountdownTimer::new(1);
        timer.start();
        assert_eq!(timer.tick(), Tick::Completed);
        assert_eq!(timer.format_time(), "00:00");
    }

    #[test]
    fn test_reset_restores_initial_time() {
        let mut timer = CountdownTimer::new(100);
        timer.start();
        timer.tick();
        timer.tick();
        timer.reset();
        assert!(!timer.is_active());
        assert_eq!(timer.remaining_secs(), 100);
    }

    #[test]
    fn test_restart_after_completion_runs_again() {
        let mut timer = CountdownTimer::new(1);
        timer.start();
        assert_eq!(timer.tick(), Tick::Completed);
        timer.reset();
        timer.start();
        assert_eq!(timer.remaining_secs(), 1);
        assert_eq!(timer.tick(), Tick::Completed);
    }

    #[tokio::test]
    async fn test_ticker_start_replaces_previous_task() {
        let mut ticker = Ticker::new();
        ticker.start();
        assert!(ticker.is_running());
        ticker.start();
        assert!(ticker.is_running());
        ticker.stop();
        assert!(!ticker.is_running());
        assert!(!ticker.try_tick());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_delivers_after_a_second() {
        let mut ticker = Ticker::new();
        ticker.start();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;
        assert!(ticker.try_tick());
        ticker.stop();
    }
}
