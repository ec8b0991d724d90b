// schedule/mod.rs - exam schedule table: event records, calendar labels, loading
pub mod table;
pub mod types;

pub use table::{Anchor, ScheduleFile, load_schedule, next_weekday};
pub use types::{CalendarLabels, ExamEvent, Schedule, ScheduleError, Verse};
