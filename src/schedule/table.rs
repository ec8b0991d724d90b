//! Schedule table loading.
//!
//! The table is a JSON document holding the event definitions, the
//! Hijri/Gregorian label pairs and the surrounding page text. Event dates are
//! given as whole-day offsets from an anchor, which is either a fixed instant
//! or "the next occurrence of a weekday" relative to startup time.
//!
//! ```text
//! {
//!   "anchor": { "next_weekday": "friday" },
//!   "calendar": [ { "hijri": "...", "gregorian": "..." } ],
//!   "events": [ { "id": 1, "day_offset": 0, "title": "...", ... } ]
//! }
//! ```

use crate::countdown::{MS_PER_DAY, Timestamp};
use crate::schedule::types::{CalendarLabels, ExamEvent, Schedule, ScheduleError, Verse};
use chrono::{DateTime, Datelike, Duration, FixedOffset, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Table shipped with the binary, used when no schedule file is given.
pub const BUILTIN_SCHEDULE: &str = include_str!("../../assets/schedule.json");

/// Reference instant that event `day_offset`s are counted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Next occurrence of the named weekday after today, at the current time
    /// of day. Today never counts: on that weekday the anchor is a week out.
    NextWeekday(String),
    /// RFC 3339 instant.
    Fixed(DateTime<FixedOffset>),
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::NextWeekday("friday".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub id: u32,
    #[serde(default)]
    pub day_offset: i64,
    #[serde(default)]
    pub day: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parts: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub accent: String,
}

/// On-disk form of a schedule, before the anchor is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleFile {
    pub headline: String,
    pub subtitle: String,
    pub notice: String,
    pub anchor: Anchor,
    pub calendar: Vec<CalendarLabels>,
    pub events: Vec<EventEntry>,
    pub notes_heading: String,
    pub notes: Vec<String>,
    pub verse: Option<Verse>,
}

/// Next occurrence of `target` strictly after the day of `now`, keeping the
/// time of day.
pub fn next_weekday<Tz: TimeZone>(now: &DateTime<Tz>, target: Weekday) -> DateTime<Tz> {
    let today = i64::from(now.weekday().num_days_from_sunday());
    let wanted = i64::from(target.num_days_from_sunday());
    let days = match (wanted - today + 7) % 7 {
        0 => 7,
        d => d,
    };
    // Fixed 24 h spans: a DST change before the anchor shifts its wall-clock
    // time by the DST offset.
    now.clone() + Duration::days(days)
}

impl ScheduleFile {
    pub fn from_json(text: &str) -> Result<Self, ScheduleError> {
        Ok(serde_json::from_str(text)?)
    }

    fn anchor_millis<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Timestamp, ScheduleError> {
        match &self.anchor {
            Anchor::NextWeekday(name) => {
                let weekday: Weekday = name
                    .trim()
                    .parse()
                    .map_err(|_| ScheduleError::UnknownWeekday(name.clone()))?;
                Ok(next_weekday(now, weekday).timestamp_millis())
            }
            Anchor::Fixed(at) => Ok(at.timestamp_millis()),
        }
    }

    /// Turn day offsets into absolute timestamps and validate the table.
    pub fn resolve<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Result<Schedule, ScheduleError> {
        if self.events.is_empty() {
            return Err(ScheduleError::Empty);
        }
        let anchor = self.anchor_millis(now)?;

        let mut seen = HashSet::with_capacity(self.events.len());
        let mut events = Vec::with_capacity(self.events.len());
        for entry in self.events {
            if !seen.insert(entry.id) {
                return Err(ScheduleError::DuplicateId(entry.id));
            }
            let date = entry
                .day_offset
                .checked_mul(MS_PER_DAY)
                .and_then(|offset| anchor.checked_add(offset))
                .ok_or(ScheduleError::DateOutOfRange(entry.id))?;
            events.push(ExamEvent {
                id: entry.id,
                date,
                day: entry.day,
                title: entry.title,
                description: entry.description,
                parts: entry.parts,
                category: entry.category,
                accent: entry.accent,
            });
        }

        // Out-of-order dates are accepted; they only look odd on the timeline.
        for pair in events.windows(2) {
            if pair[1].date < pair[0].date {
                tracing::warn!(
                    earlier_id = pair[0].id,
                    later_id = pair[1].id,
                    "Schedule events are not in chronological order"
                );
            }
        }

        Ok(Schedule {
            headline: self.headline,
            subtitle: self.subtitle,
            notice: self.notice,
            events,
            calendar: self.calendar,
            notes_heading: self.notes_heading,
            notes: self.notes,
            verse: self.verse,
        })
    }
}

impl Schedule {
    /// The table shipped with the binary, anchored at `now`.
    pub fn builtin<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<Self, ScheduleError> {
        ScheduleFile::from_json(BUILTIN_SCHEDULE)?.resolve(now)
    }
}

/// Read, parse and resolve a schedule file.
pub async fn load_schedule<Tz: TimeZone>(
    path: &Path,
    now: &DateTime<Tz>,
) -> Result<Schedule, ScheduleError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let schedule = ScheduleFile::from_json(&text)?.resolve(now)?;
    tracing::info!(
        path = %path.display(),
        events = schedule.events.len(),
        "Loaded exam schedule"
    );
    Ok(schedule)
}
