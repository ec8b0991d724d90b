// state.rs: Published countdown state shared between the refresh task and renderers

use crate::countdown::{Countdown, Locale, Timestamp, Urgency, compute_with_locale};
use crate::schedule::ExamEvent;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Event id -> countdown, rebuilt from scratch on every tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownState {
    entries: BTreeMap<u32, Countdown>,
}

impl CountdownState {
    pub fn recompute(events: &[ExamEvent], now: Timestamp, locale: Locale) -> Self {
        let entries = events
            .iter()
            .map(|event| (event.id, compute_with_locale(event.date, now, locale)))
            .collect();
        Self { entries }
    }
    pub fn get(&self, id: u32) -> Option<&Countdown> {
        self.entries.get(&id)
    }
    pub fn label(&self, id: u32) -> Option<&str> {
        self.entries.get(&id).map(|c| c.label.as_str())
    }
    pub fn urgency(&self, id: u32) -> Option<Urgency> {
        self.entries.get(&id).map(|c| c.urgency)
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Countdown)> {
        self.entries.iter().map(|(id, c)| (*id, c))
    }
    /// True when every event has reached its target.
    pub fn all_expired(&self) -> bool {
        !self.entries.is_empty() && self.entries.values().all(Countdown::is_expired)
    }
}

/// Snapshot sent from the refresh task to renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub state: Arc<CountdownState>,
    /// Clock reading the state was computed from.
    pub now: Timestamp,
    pub version: u64, // Incremented on every tick
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::MS_PER_HOUR;

    fn event(id: u32, date: Timestamp) -> ExamEvent {
        ExamEvent {
            id,
            date,
            day: String::new(),
            title: format!("exam {id}"),
            description: String::new(),
            parts: Vec::new(),
            category: String::new(),
            accent: String::new(),
        }
    }

    #[test]
    fn recompute_covers_every_event() {
        let events = vec![event(1, 0), event(2, 10 * MS_PER_HOUR), event(3, 50 * MS_PER_HOUR)];
        let state = CountdownState::recompute(&events, 0, Locale::English);
        assert_eq!(state.len(), 3);
        assert_eq!(state.urgency(1), Some(Urgency::Expired));
        assert_eq!(state.urgency(2), Some(Urgency::Imminent));
        assert_eq!(state.label(3), Some("2 day(s) and 2 hour(s)"));
        assert_eq!(state.urgency(3), Some(Urgency::Critical));
        assert!(state.get(4).is_none());
        assert!(!state.all_expired());
    }

    #[test]
    fn all_expired_needs_entries() {
        assert!(!CountdownState::default().all_expired());
        let state = CountdownState::recompute(&[event(1, 0), event(2, 5)], 10, Locale::English);
        assert!(state.all_expired());
        let ids: Vec<u32> = state.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
