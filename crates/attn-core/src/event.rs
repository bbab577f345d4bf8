//! Recorded attendance events.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::types::EmployeeId;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Time layouts accepted when reading stored events. Manual entries made by
/// administrators often omit seconds.
const TIME_LAYOUTS: [&str; 2] = [TIME_FORMAT, "%H:%M"];

/// A single logged attendance action.
///
/// Events are stored exactly as recorded: the date and time stay strings so a
/// corrupted or hand-edited row survives loading and is only discarded when
/// hours are computed. All timestamps share one fixed UTC offset, so wall-clock
/// order is instant order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Who the event belongs to.
    pub employee: EmployeeId,
    /// Raw action label; see [`Action::classify`].
    pub action: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day, `HH:MM:SS` or `HH:MM`.
    pub time: String,
}

impl AttendanceEvent {
    pub fn new(
        employee: EmployeeId,
        action: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            employee,
            action: action.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Creates an event for a classified action at a local wall-clock instant.
    pub fn recorded(employee: EmployeeId, action: Action, at: NaiveDateTime) -> Self {
        Self {
            employee,
            action: action.label().to_string(),
            date: at.format(DATE_FORMAT).to_string(),
            time: at.format(TIME_FORMAT).to_string(),
        }
    }

    /// Combines the date and time fields into one instant.
    ///
    /// Returns `None` when either field is malformed.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()?;
        let time = TIME_LAYOUTS
            .iter()
            .find_map(|layout| NaiveTime::parse_from_str(self.time.trim(), layout).ok())?;
        Some(date.and_time(time))
    }

    /// The action category, if the label belongs to one.
    pub fn kind(&self) -> Option<Action> {
        Action::classify(&self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str) -> EmployeeId {
        EmployeeId::new(id).unwrap()
    }

    #[test]
    fn recorded_event_uses_canonical_layout() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 2)
            .unwrap()
            .and_hms_opt(8, 5, 9)
            .unwrap();
        let event = AttendanceEvent::recorded(employee("ahmed"), Action::EnterHome, at);

        assert_eq!(event.action, "enter_home");
        assert_eq!(event.date, "2025-03-02");
        assert_eq!(event.time, "08:05:09");
        assert_eq!(event.timestamp(), Some(at));
        assert_eq!(event.kind(), Some(Action::EnterHome));
    }

    #[test]
    fn timestamp_accepts_minutes_only() {
        let event = AttendanceEvent::new(employee("sara"), "enter_office", "2025-03-02", "09:30");
        let expected = NaiveDate::from_ymd_opt(2025, 3, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(event.timestamp(), Some(expected));
    }

    #[test]
    fn malformed_fields_have_no_timestamp() {
        let cases = [
            ("2025-02-30", "09:00:00"),
            ("02/03/2025", "09:00:00"),
            ("2025-03-02", "25:00:00"),
            ("2025-03-02", "nine"),
            ("", ""),
        ];
        for (date, time) in cases {
            let event = AttendanceEvent::new(employee("sara"), "enter_office", date, time);
            assert_eq!(event.timestamp(), None, "{date} {time} should not parse");
        }
    }

    #[test]
    fn event_serializes_as_four_fields() {
        let event = AttendanceEvent::new(employee("khaled"), "دخول مقر", "2025-03-02", "09:00:00");
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"employee":"khaled","action":"دخول مقر","date":"2025-03-02","time":"09:00:00"}"#
        );
    }

    #[test]
    fn event_rejects_empty_employee() {
        let json = r#"{"employee":"","action":"enter_office","date":"2025-03-02","time":"09:00"}"#;
        let result: Result<AttendanceEvent, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
