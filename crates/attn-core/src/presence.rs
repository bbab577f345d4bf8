//! Current presence derived from the event log.
//!
//! Presence is never stored. It is read off the employee's latest valid,
//! classified event, so it cannot drift from the logged history.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::action::{Action, Channel, Direction};
use crate::event::AttendanceEvent;
use crate::types::EmployeeId;

/// Where an employee currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Office,
    Home,
    Away,
}

impl Presence {
    const fn after(action: Action) -> Self {
        match (action.direction(), action.channel()) {
            (Direction::Enter, Channel::Office) => Self::Office,
            (Direction::Enter, Channel::Home) => Self::Home,
            (Direction::Leave, _) => Self::Away,
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Office => "office",
            Self::Home => "home",
            Self::Away => "away",
        };
        f.pad(s)
    }
}

/// Presence of one employee and the event that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    pub employee: EmployeeId,
    pub presence: Presence,
    /// Timestamp of the deciding event; `None` if the employee has no valid,
    /// classified event.
    pub since: Option<NaiveDateTime>,
}

/// Derives presence for every employee appearing in the log, in employee order.
///
/// Same-instant events resolve in favour of the later recorded one, matching
/// the stable ordering used for hours.
pub fn presence_by_employee(events: &[AttendanceEvent]) -> Vec<PresenceEntry> {
    let mut latest: BTreeMap<&EmployeeId, Option<(NaiveDateTime, Action)>> = BTreeMap::new();

    for event in events {
        let slot = latest.entry(&event.employee).or_default();
        let (Some(at), Some(action)) = (event.timestamp(), event.kind()) else {
            continue;
        };
        if slot.is_none_or(|(seen, _)| at >= seen) {
            *slot = Some((at, action));
        }
    }

    latest
        .into_iter()
        .map(|(employee, last)| PresenceEntry {
            employee: employee.clone(),
            presence: last.map_or(Presence::Away, |(_, action)| Presence::after(action)),
            since: last.map(|(at, _)| at),
        })
        .collect()
}

/// Derives the presence of a single employee.
pub fn current_presence(events: &[AttendanceEvent], employee: &EmployeeId) -> Presence {
    let own: Vec<AttendanceEvent> = events
        .iter()
        .filter(|event| &event.employee == employee)
        .cloned()
        .collect();
    presence_by_employee(&own)
        .into_iter()
        .next()
        .map_or(Presence::Away, |entry| entry.presence)
}

/// Builds automatic `leave_home` events for home sessions idle past `timeout`.
///
/// An employee is stale when their presence is [`Presence::Home`] and the
/// deciding `enter_home` happened at least `timeout` before `now`. The
/// returned events are stamped at `now`; appending them is the caller's job.
pub fn stale_home_sessions(
    events: &[AttendanceEvent],
    now: NaiveDateTime,
    timeout: TimeDelta,
) -> Vec<AttendanceEvent> {
    presence_by_employee(events)
        .into_iter()
        .filter(|entry| entry.presence == Presence::Home)
        .filter(|entry| entry.since.is_some_and(|since| now - since >= timeout))
        .map(|entry| {
            tracing::info!(employee = %entry.employee, "closing idle home session");
            AttendanceEvent::recorded(entry.employee, Action::LeaveHome, now)
        })
        .collect()
}
