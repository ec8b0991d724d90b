// Exam schedule countdown: library crate shared by the binary and the integration tests

pub mod clock;
pub mod config;
pub mod countdown;
pub mod logging;
pub mod pool;
pub mod schedule;
pub mod state;
pub mod text_utils;
pub mod ui;

pub use config::Config;
pub use countdown::{Countdown, Locale, Timestamp, Urgency, compute, compute_with_locale};
pub use pool::{RefreshConfig, RefreshHandle};
pub use schedule::{ExamEvent, Schedule, ScheduleError};
pub use state::{CountdownState, Update};
