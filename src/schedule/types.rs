use crate::countdown::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// One exam sitting. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamEvent {
    pub id: u32,
    pub date: Timestamp,
    /// Weekday name as displayed, e.g. "الجمعة".
    pub day: String,
    pub title: String,
    pub description: String,
    /// Required memorization sections, in display order.
    pub parts: Vec<String>,
    pub category: String,
    /// Accent color name for the card header.
    pub accent: String,
}

/// Display-only calendar strings for one event index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarLabels {
    pub hijri: String,
    pub gregorian: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Verse {
    pub text: String,
    pub source: String,
}

/// A resolved schedule: events with absolute dates plus the presentation
/// content shown around them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    pub headline: String,
    pub subtitle: String,
    pub notice: String,
    pub events: Vec<ExamEvent>,
    pub calendar: Vec<CalendarLabels>,
    pub notes_heading: String,
    pub notes: Vec<String>,
    pub verse: Option<Verse>,
}

impl Schedule {
    /// Calendar labels for the event at `index`. Indexes past the end of the
    /// table reuse the first entry; `None` only when the table is empty.
    pub fn labels_for(&self, index: usize) -> Option<&CalendarLabels> {
        self.calendar.get(index).or_else(|| self.calendar.first())
    }

    pub fn event(&self, id: u32) -> Option<&ExamEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Failed to read schedule {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid schedule JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Schedule contains no events")]
    Empty,
    #[error("Duplicate event id {0}")]
    DuplicateId(u32),
    #[error("Unknown weekday '{0}'")]
    UnknownWeekday(String),
    #[error("Event {0} falls outside the representable date range")]
    DateOutOfRange(u32),
}
