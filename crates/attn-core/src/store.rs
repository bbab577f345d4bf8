//! The event store seam.
//!
//! Hours are recomputed from a fresh snapshot on every request; nothing
//! derived is ever written back.

use std::convert::Infallible;

use crate::event::AttendanceEvent;
use crate::hours::{DailySummary, compute_daily_summaries};

/// Persistence for the attendance log.
///
/// `load` returns every persisted event in no guaranteed order.
pub trait EventStore {
    type Error;

    /// Returns all currently persisted events.
    fn load(&self) -> Result<Vec<AttendanceEvent>, Self::Error>;

    /// Persists one new event.
    fn append(&mut self, event: &AttendanceEvent) -> Result<(), Self::Error>;

    /// Persists a batch of events, returning how many were written.
    ///
    /// Stores that can write a batch atomically should override this.
    fn append_all(&mut self, events: &[AttendanceEvent]) -> Result<usize, Self::Error> {
        for event in events {
            self.append(event)?;
        }
        Ok(events.len())
    }
}

/// Loads a snapshot from `store` and computes daily summaries over it.
pub fn summarize<S: EventStore>(store: &S) -> Result<Vec<DailySummary>, S::Error> {
    let events = store.load()?;
    tracing::debug!(events = events.len(), "computing daily summaries");
    Ok(compute_daily_summaries(&events))
}

/// An in-memory store, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<AttendanceEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<Vec<AttendanceEvent>> for MemoryStore {
    fn from(events: Vec<AttendanceEvent>) -> Self {
        Self { events }
    }
}

impl EventStore for MemoryStore {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<AttendanceEvent>, Self::Error> {
        Ok(self.events.clone())
    }

    fn append(&mut self, event: &AttendanceEvent) -> Result<(), Self::Error> {
        self.events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmployeeId;

    fn ev(action: &str, time: &str) -> AttendanceEvent {
        AttendanceEvent::new(EmployeeId::new("ahmed").unwrap(), action, "2025-03-02", time)
    }

    #[test]
    fn memory_store_keeps_insertion_order() {
        let mut store = MemoryStore::new();
        store.append(&ev("leave_office", "12:00")).unwrap();
        store.append(&ev("enter_office", "09:00")).unwrap();

        let events = store.load().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, "leave_office");
        assert_eq!(events[1].action, "enter_office");
    }

    #[test]
    fn default_append_all_appends_in_order() {
        let mut store = MemoryStore::new();
        let written = store
            .append_all(&[ev("enter_home", "08:00"), ev("leave_home", "09:00")])
            .unwrap();

        assert_eq!(written, 2);
        let actions: Vec<_> = store.load().unwrap().into_iter().map(|e| e.action).collect();
        assert_eq!(actions, ["enter_home", "leave_home"]);
        assert_eq!(store.append_all(&[]).unwrap(), 0);
    }

    #[test]
    fn summarize_reads_fresh_snapshot() {
        let mut store = MemoryStore::from(vec![ev("enter_office", "09:00")]);
        assert!(summarize(&store).unwrap().is_empty());

        store.append(&ev("leave_office", "11:30")).unwrap();
        let summaries = summarize(&store).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].office_hhmm(), "02:30");
    }
}
