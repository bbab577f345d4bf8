//! Report command for daily office and home hours.
//!
//! Summaries are recomputed from the full journal on every run and then
//! filtered by employee and date range.

use std::fmt::Write;

use anyhow::Result;
use attn_core::{AttendanceEvent, DailySummary, EmployeeId, compute_daily_summaries, format_hhmm};
use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

/// Which rows to include in a report.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub employee: Option<EmployeeId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ReportFilter {
    fn accepts(&self, row: &DailySummary) -> bool {
        self.employee.as_ref().is_none_or(|e| &row.employee == e)
            && self.from.is_none_or(|from| row.date >= from)
            && self.to.is_none_or(|to| row.date <= to)
    }
}

/// Computes the report rows for `events`.
pub fn generate_rows(events: &[AttendanceEvent], filter: &ReportFilter) -> Vec<DailySummary> {
    compute_daily_summaries(events)
        .into_iter()
        .filter(|row| filter.accepts(row))
        .collect()
}

// ========== Text Output ==========

/// Width of the table rule, matching the row layout below.
const RULE_WIDTH: usize = 48;

fn table_line(date: &str, employee: &str, office: &str, home: &str, total: &str) -> String {
    format!("{date:<10}  {employee:<12}  {office:>6}  {home:>6}  {total:>6}")
}

/// Formats the human-readable report.
pub fn format_report(rows: &[DailySummary]) -> String {
    let mut output = String::new();

    if rows.is_empty() {
        writeln!(output, "No completed hours to display.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{}",
        table_line("DATE", "EMPLOYEE", "OFFICE", "HOME", "TOTAL")
    )
    .unwrap();
    writeln!(output, "{}", "─".repeat(RULE_WIDTH)).unwrap();

    for row in rows {
        let date = row.date.format("%Y-%m-%d").to_string();
        writeln!(
            output,
            "{}",
            table_line(
                &date,
                row.employee.as_str(),
                &row.office_hhmm(),
                &row.home_hhmm(),
                &row.total_hhmm(),
            )
        )
        .unwrap();
    }

    let totals = Totals::of(rows);
    writeln!(output, "{}", "─".repeat(RULE_WIDTH)).unwrap();
    writeln!(
        output,
        "{}",
        table_line(
            "TOTAL",
            &format!("{} day(s)", rows.len()),
            &format_hhmm(totals.office),
            &format_hhmm(totals.home),
            &format_hhmm(totals.office + totals.home),
        )
    )
    .unwrap();

    output
}

struct Totals {
    office: TimeDelta,
    home: TimeDelta,
}

impl Totals {
    fn of(rows: &[DailySummary]) -> Self {
        rows.iter().fold(
            Self {
                office: TimeDelta::zero(),
                home: TimeDelta::zero(),
            },
            |acc, row| Self {
                office: acc.office + row.office,
                home: acc.home + row.home,
            },
        )
    }
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub rows: Vec<JsonRow>,
    pub totals: JsonTotals,
}

#[derive(Debug, Serialize)]
pub struct JsonRow {
    pub employee: String,
    pub date: String,
    pub office: String,
    pub home: String,
    pub total: String,
    pub office_seconds: i64,
    pub home_seconds: i64,
    pub total_seconds: i64,
}

#[derive(Debug, Serialize)]
pub struct JsonTotals {
    pub days: usize,
    pub office_seconds: i64,
    pub home_seconds: i64,
    pub total_seconds: i64,
}

/// Formats report rows as JSON.
pub fn format_report_json(rows: &[DailySummary]) -> Result<String> {
    let totals = Totals::of(rows);
    let report = JsonReport {
        rows: rows
            .iter()
            .map(|row| JsonRow {
                employee: row.employee.to_string(),
                date: row.date.format("%Y-%m-%d").to_string(),
                office: row.office_hhmm(),
                home: row.home_hhmm(),
                total: row.total_hhmm(),
                office_seconds: row.office.num_seconds(),
                home_seconds: row.home.num_seconds(),
                total_seconds: row.total().num_seconds(),
            })
            .collect(),
        totals: JsonTotals {
            days: rows.len(),
            office_seconds: totals.office.num_seconds(),
            home_seconds: totals.home.num_seconds(),
            total_seconds: (totals.office + totals.home).num_seconds(),
        },
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: std::io::Write>(
    writer: &mut W,
    events: &[AttendanceEvent],
    filter: &ReportFilter,
    json: bool,
) -> Result<()> {
    let rows = generate_rows(events, filter);
    tracing::debug!(rows = rows.len(), "generated report");

    let output = if json {
        format_report_json(&rows)? + "\n"
    } else {
        format_report(&rows)
    };
    writer.write_all(output.as_bytes())?;

    Ok(())
}
