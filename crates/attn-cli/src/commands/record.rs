//! Record command for appending attendance events.

use std::io::Write;

use anyhow::{Context, Result};
use attn_core::{Action, AttendanceEvent, EmployeeId, EventStore, current_presence};
use chrono::NaiveDateTime;

/// Appends one event and reports the employee's resulting presence.
pub fn run<W, S>(
    writer: &mut W,
    store: &mut S,
    employee: EmployeeId,
    action: Action,
    at: NaiveDateTime,
) -> Result<()>
where
    W: Write,
    S: EventStore,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let event = AttendanceEvent::recorded(employee, action, at);
    store.append(&event).context("failed to record event")?;
    tracing::info!(employee = %event.employee, %action, %at, "recorded event");

    let events = store.load().context("failed to load events")?;
    let presence = current_presence(&events, &event.employee);

    writeln!(
        writer,
        "Recorded {action} for {} at {} {}",
        event.employee, event.date, event.time
    )?;
    writeln!(writer, "Status: {presence}")?;

    Ok(())
}
