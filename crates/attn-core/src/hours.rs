//! Daily hours computation.
//!
//! Pairs enter/leave events per employee, per day and per channel, and sums
//! the resulting intervals.
//!
//! # Algorithm Summary
//!
//! 1. Drop events whose date/time does not parse
//! 2. Stable sort by `(employee, timestamp)`
//! 3. Group by `(employee, date)`, using each event's own date
//! 4. Walk each group with one open-interval cursor per channel
//!
//! Anomalies never fail the computation: a second enter replaces the open
//! one, an orphan leave is ignored, a non-positive interval is dropped and an
//! enter still open at the end of the day counts nothing. A shift crossing
//! midnight therefore does not pair.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::action::{Channel, Direction};
use crate::event::AttendanceEvent;
use crate::types::EmployeeId;

/// Hours accumulated by one employee on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub employee: EmployeeId,
    pub date: NaiveDate,
    pub office: TimeDelta,
    pub home: TimeDelta,
}

impl DailySummary {
    /// Office plus home time.
    #[must_use]
    pub fn total(&self) -> TimeDelta {
        self.office + self.home
    }

    pub fn office_hhmm(&self) -> String {
        format_hhmm(self.office)
    }

    pub fn home_hhmm(&self) -> String {
        format_hhmm(self.home)
    }

    pub fn total_hhmm(&self) -> String {
        format_hhmm(self.total())
    }
}

/// Formats a duration as `HH:MM`, truncating seconds.
///
/// Hours are not wrapped at 24. Negative durations format as `00:00`.
pub fn format_hhmm(duration: TimeDelta) -> String {
    let seconds = duration.num_seconds().max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}

/// An event paired with its parsed timestamp.
struct TimedEvent<'a> {
    event: &'a AttendanceEvent,
    at: NaiveDateTime,
}

/// Open-interval cursor and running total for one channel.
#[derive(Debug, Default)]
struct ChannelClock {
    open: Option<NaiveDateTime>,
    total: TimeDelta,
}

impl ChannelClock {
    fn enter(&mut self, at: NaiveDateTime) {
        if let Some(previous) = self.open.replace(at) {
            tracing::debug!(%previous, %at, "duplicate enter supersedes open interval");
        }
    }

    fn leave(&mut self, at: NaiveDateTime) {
        let Some(start) = self.open.take() else {
            tracing::debug!(%at, "leave without open interval ignored");
            return;
        };
        let elapsed = at - start;
        if elapsed > TimeDelta::zero() {
            self.total = self.total + elapsed;
        } else {
            tracing::debug!(%start, %at, "non-positive interval dropped");
        }
    }
}

/// Computes per-employee, per-day office and home durations.
///
/// `events` may be empty, unordered, and contain malformed timestamps.
/// Rows are returned in `(employee, date)` order; days without any completed
/// positive interval are omitted.
pub fn compute_daily_summaries(events: &[AttendanceEvent]) -> Vec<DailySummary> {
    let mut timed: Vec<TimedEvent<'_>> = events
        .iter()
        .filter_map(|event| match event.timestamp() {
            Some(at) => Some(TimedEvent { event, at }),
            None => {
                tracing::debug!(
                    employee = %event.employee,
                    date = %event.date,
                    time = %event.time,
                    "skipping event with malformed timestamp"
                );
                None
            }
        })
        .collect();

    // `sort_by` is stable: same-instant events keep their recorded order.
    timed.sort_by(|a, b| {
        a.event
            .employee
            .cmp(&b.event.employee)
            .then_with(|| a.at.cmp(&b.at))
    });

    timed
        .chunk_by(|a, b| a.event.employee == b.event.employee && a.at.date() == b.at.date())
        .filter_map(summarize_day)
        .collect()
}

/// Pairs one `(employee, date)` group. Returns `None` when nothing accrued.
fn summarize_day(group: &[TimedEvent<'_>]) -> Option<DailySummary> {
    let first = group.first()?;
    let mut office = ChannelClock::default();
    let mut home = ChannelClock::default();

    for timed in group {
        let Some(action) = timed.event.kind() else {
            continue;
        };
        let clock = match action.channel() {
            Channel::Office => &mut office,
            Channel::Home => &mut home,
        };
        match action.direction() {
            Direction::Enter => clock.enter(timed.at),
            Direction::Leave => clock.leave(timed.at),
        }
    }

    let summary = DailySummary {
        employee: first.event.employee.clone(),
        date: first.at.date(),
        office: office.total,
        home: home.total,
    };
    (summary.total() > TimeDelta::zero()).then_some(summary)
}
