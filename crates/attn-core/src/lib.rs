//! Core domain logic for attendance tracking.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: the four-field attendance record and action classification
//! - Hours: pairing enter/leave events into daily office and home totals
//! - Presence: current location derived from the log, and idle home sessions
//! - Store: the `EventStore` seam and an in-memory implementation

mod action;
mod event;
mod hours;
mod presence;
mod store;
mod types;

pub use action::{Action, Channel, Direction};
pub use event::AttendanceEvent;
pub use hours::{DailySummary, compute_daily_summaries, format_hhmm};
pub use presence::{
    Presence, PresenceEntry, current_presence, presence_by_employee, stale_home_sessions,
};
pub use store::{EventStore, MemoryStore, summarize};
pub use types::{EmployeeId, ValidationError};
