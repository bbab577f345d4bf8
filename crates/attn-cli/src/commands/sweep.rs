//! Sweep command for closing idle home sessions.
//!
//! The tracker keeps no timers. An external scheduler runs `attn sweep`, which
//! appends an automatic `leave_home` for every employee whose home session has
//! been open longer than the inactivity timeout.

use std::io::Write;

use anyhow::{Context, Result};
use attn_core::{EventStore, stale_home_sessions};
use chrono::{NaiveDateTime, TimeDelta};

/// Runs one sweep at `now`. Returns the number of sessions closed.
pub fn run<W, S>(writer: &mut W, store: &mut S, now: NaiveDateTime, timeout: TimeDelta) -> Result<usize>
where
    W: Write,
    S: EventStore,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let events = store.load().context("failed to load events")?;
    let closing = stale_home_sessions(&events, now, timeout);

    store
        .append_all(&closing)
        .context("failed to close idle home sessions")?;
    for event in &closing {
        writeln!(writer, "Closed home session for {} at {}", event.employee, event.time)?;
    }

    tracing::info!(closed = closing.len(), "sweep finished");
    writeln!(writer, "Closed {} idle home session(s).", closing.len())?;
    Ok(closing.len())
}
