//! Quiz interaction module
//!
//! Contains the countdown timer with its cancellable ticker task and the
//! interaction controller that owns timer and answer-feedback state for
//! one quiz session.

pub mod controller;
pub mod timer;

pub use controller::QuizInteractionController;
pub use timer::{spawn_ticker, CountdownTimer, TickerHandle, TimerEvent, TIME_UP_MESSAGE};
