//! Countdown timer
//!
//! Implements the per-session countdown state with MM:SS rendering and the
//! one-second ticker task that drives it. Tick scheduling and tick handling
//! are split: the ticker task only emits events on a channel, and the UI
//! loop applies them to the `CountdownTimer`, so ticks are consumed
//! strictly sequentially.

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Fixed message rendered once the countdown reaches zero
pub const TIME_UP_MESSAGE: &str = "Time's up!";

/// Event emitted by the ticker task once per wall-clock second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
}

/// Countdown state owned by the interaction controller
///
/// Once the countdown reaches zero it enters a terminal state: further
/// ticks are ignored and no restart is exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    remaining_seconds: u32,
    running: bool,
}

impl CountdownTimer {
    /// Start a countdown from `initial_seconds` (must be > 0)
    pub fn start(initial_seconds: u32) -> Self {
        debug_assert!(initial_seconds > 0);
        Self {
            remaining_seconds: initial_seconds,
            running: true,
        }
    }

    /// Apply one tick: decrement by one second, entering the terminal
    /// state at zero. Ticks after expiry are no-ops.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
        }
    }

    /// Seconds left on the countdown
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Whether the countdown is still ticking
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the countdown has reached its terminal state
    pub fn is_expired(&self) -> bool {
        !self.running && self.remaining_seconds == 0
    }

    /// Render the countdown as zero-padded `MM:SS`, or the fixed terminal
    /// message once expired
    pub fn display(&self) -> String {
        if self.is_expired() {
            return TIME_UP_MESSAGE.to_string();
        }
        let minutes = self.remaining_seconds / 60;
        let seconds = self.remaining_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Handle to the spawned ticker task
///
/// Cancels the task on `cancel()` or on drop, so a torn-down quiz view
/// never leaves a ticker running against detached state. Cancelling twice
/// is a safe no-op.
#[derive(Debug)]
pub struct TickerHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl TickerHandle {
    /// Stop the ticker task. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(()); // Ignore errors if the task already exited
        }
    }

    /// Whether the handle has already been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancel_tx.is_none()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawn the one-second ticker task
///
/// Emits `TimerEvent::Tick` on `events` once per second until cancelled
/// or until the receiver is dropped. The first tick fires one full second
/// after the call, not immediately.
pub fn spawn_ticker(events: mpsc::Sender<TimerEvent>) -> TickerHandle {
    let (cancel_tx, mut cancel_rx) = oneshot::channel();

    tokio::spawn(async move {
        let period = Duration::from_secs(1);
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    if events.send(TimerEvent::Tick).await.is_err() {
                        // Receiver dropped, the view is gone
                        break;
                    }
                }
                _ = &mut cancel_rx => {
                    break;
                }
            }
        }
    });

    TickerHandle {
        cancel_tx: Some(cancel_tx),
    }
}
