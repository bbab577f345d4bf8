//! Log command for listing raw events.
//!
//! Events are printed in the order they were recorded, including rows the
//! hours engine would skip, so administrators can spot bad entries.

use std::io::Write;

use anyhow::Result;
use attn_core::{AttendanceEvent, EmployeeId};

/// Writes the events, optionally filtered to one employee.
pub fn run<W: Write>(
    writer: &mut W,
    events: &[AttendanceEvent],
    employee: Option<&EmployeeId>,
    json: bool,
) -> Result<()> {
    let selected: Vec<&AttendanceEvent> = events
        .iter()
        .filter(|event| employee.is_none_or(|e| &event.employee == e))
        .collect();

    if json {
        for event in selected {
            writeln!(writer, "{}", serde_json::to_string(event)?)?;
        }
        return Ok(());
    }

    if selected.is_empty() {
        writeln!(writer, "No events recorded.")?;
        return Ok(());
    }

    writeln!(writer, "{:<10}  {:<8}  {:<12}  ACTION", "DATE", "TIME", "EMPLOYEE")?;
    for event in selected {
        let marker = if event.timestamp().is_none() {
            "  (invalid time)"
        } else if event.kind().is_none() {
            "  (not counted)"
        } else {
            ""
        };
        writeln!(
            writer,
            "{:<10}  {:<8}  {:<12}  {}{marker}",
            event.date, event.time, event.employee, event.action
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn ev(employee: &str, action: &str, date: &str, time: &str) -> AttendanceEvent {
        AttendanceEvent::new(EmployeeId::new(employee).unwrap(), action, date, time)
    }

    fn sample() -> Vec<AttendanceEvent> {
        vec![
            ev("ahmed", "enter_office", "2025-03-02", "09:00:00"),
            ev("sara", "enter_home", "2025-03-02", "09:05:00"),
            ev("ahmed", "leave_office", "2025-3-2", "12:00:00"),
            ev("sara", "تسجيل دخول", "2025-03-02", "09:06:00"),
        ]
    }

    #[test]
    fn log_lists_events_in_recorded_order() {
        let mut output = Vec::new();
        run(&mut output, &sample(), None, false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        DATE        TIME      EMPLOYEE      ACTION
        2025-03-02  09:00:00  ahmed         enter_office
        2025-03-02  09:05:00  sara          enter_home
        2025-3-2    12:00:00  ahmed         leave_office  (invalid time)
        2025-03-02  09:06:00  sara          تسجيل دخول  (not counted)
        ");
    }

    #[test]
    fn log_filters_by_employee_as_json_lines() {
        let sara = EmployeeId::new("sara").unwrap();
        let mut output = Vec::new();
        run(&mut output, &sample(), Some(&sara), true).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: AttendanceEvent = serde_json::from_str(line).unwrap();
            assert_eq!(parsed.employee, sara);
        }
    }

    #[test]
    fn log_without_matches_says_so() {
        let khaled = EmployeeId::new("khaled").unwrap();
        let mut output = Vec::new();
        run(&mut output, &sample(), Some(&khaled), false).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No events recorded.\n");
    }
}
