//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod dashboard;
pub mod home;
pub mod quiz;

pub use dashboard::DashboardScreen;
pub use home::{HomeAction, HomeScreen};
pub use quiz::QuizScreen;
