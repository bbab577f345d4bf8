//! Status command for showing where each employee currently is.

use std::io::Write;

use anyhow::Result;
use attn_core::{AttendanceEvent, EmployeeId, presence_by_employee};

pub fn run<W: Write>(
    writer: &mut W,
    events: &[AttendanceEvent],
    employee: Option<&EmployeeId>,
) -> Result<()> {
    let entries: Vec<_> = presence_by_employee(events)
        .into_iter()
        .filter(|entry| employee.is_none_or(|e| &entry.employee == e))
        .collect();

    if entries.is_empty() {
        writeln!(writer, "No events recorded.")?;
        return Ok(());
    }

    writeln!(writer, "{:<12}  {:<6}  SINCE", "EMPLOYEE", "STATUS")?;
    for entry in entries {
        let since = entry
            .since
            .map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d %H:%M:%S").to_string());
        writeln!(
            writer,
            "{:<12}  {:<6}  {since}",
            entry.employee, entry.presence
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
            ev("sara", "enter_home", "2025-03-02", "08:00:00"),
            ev("ahmed", "enter_office", "2025-03-02", "09:00:00"),
            ev("khaled", "enter_office", "2025-03-02", "09:10:00"),
            ev("khaled", "leave_office", "2025-03-02", "11:00:00"),
            ev("mona", "تسجيل دخول", "2025-03-02", "09:00:00"),
        ]
    }

    #[test]
    fn status_lists_every_employee() {
        let mut output = Vec::new();
        run(&mut output, &sample(), None).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        EMPLOYEE      STATUS  SINCE
        ahmed         office  2025-03-02 09:00:00
        khaled        away    2025-03-02 11:00:00
        mona          away    -
        sara          home    2025-03-02 08:00:00
        ");
    }

    #[test]
    fn status_filters_to_one_employee() {
        let sara = EmployeeId::new("sara").unwrap();
        let mut output = Vec::new();
        run(&mut output, &sample(), Some(&sara)).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("sara          home"));
    }

    #[test]
    fn status_with_empty_log() {
        let mut output = Vec::new();
        run(&mut output, &[], None).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No events recorded.\n");
    }
}
