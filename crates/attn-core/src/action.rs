//! Attendance actions and the channels they are accounted against.
//!
//! Stored events keep their raw action label. Classification is by category
//! membership: a label belongs to a category if it contains one of the
//! category's markers, so decorated variants ("دخول مقر (يدوي)") still count.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// The independent track an employee's time is accumulated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Office,
    Home,
}

/// Whether an action opens or closes an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Enter,
    Leave,
}

/// The four recordable attendance actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    EnterOffice,
    LeaveOffice,
    EnterHome,
    LeaveHome,
}

/// Markers recognised for each action, canonical label first.
///
/// The Arabic markers are the labels written by the legacy web front end.
const MARKERS: [(Action, &[&str]); 4] = [
    (Action::EnterOffice, &["enter_office", "دخول مقر"]),
    (Action::LeaveOffice, &["leave_office", "خروج مقر"]),
    (Action::EnterHome, &["enter_home", "دخول منزلي"]),
    (Action::LeaveHome, &["leave_home", "خروج منزلي"]),
];

impl Action {
    pub const ALL: [Self; 4] = [
        Self::EnterOffice,
        Self::LeaveOffice,
        Self::EnterHome,
        Self::LeaveHome,
    ];

    /// Canonical label written to the journal.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EnterOffice => "enter_office",
            Self::LeaveOffice => "leave_office",
            Self::EnterHome => "enter_home",
            Self::LeaveHome => "leave_home",
        }
    }

    #[must_use]
    pub const fn channel(self) -> Channel {
        match self {
            Self::EnterOffice | Self::LeaveOffice => Channel::Office,
            Self::EnterHome | Self::LeaveHome => Channel::Home,
        }
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::EnterOffice | Self::EnterHome => Direction::Enter,
            Self::LeaveOffice | Self::LeaveHome => Direction::Leave,
        }
    }

    /// Classifies a raw action label, returning `None` for labels outside
    /// the four categories (e.g. generic check-in labels from older logs).
    pub fn classify(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        MARKERS
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| label.contains(m)))
            .map(|(action, _)| *action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Parses the command-line spelling of an action.
///
/// Accepts both `enter-office` and `enter_office`.
impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|action| action.label() == normalized)
            .ok_or_else(|| ValidationError::UnknownAction {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for action in Action::ALL {
            let parsed: Action = action.to_string().parse().expect("should parse");
            assert_eq!(parsed, action, "roundtrip failed for {action:?}");
            assert_eq!(Action::classify(action.label()), Some(action));
        }
    }

    #[test]
    fn cli_spelling_parses() {
        assert_eq!("enter-office".parse::<Action>().unwrap(), Action::EnterOffice);
        assert_eq!("Leave-Home".parse::<Action>().unwrap(), Action::LeaveHome);
    }

    #[test]
    fn unknown_action_errors() {
        let err = "lunch".parse::<Action>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownAction {
                value: "lunch".to_string()
            }
        );
    }

    #[test]
    fn legacy_labels_classify_by_substring() {
        assert_eq!(Action::classify("دخول مقر"), Some(Action::EnterOffice));
        assert_eq!(Action::classify("خروج مقر الشركة"), Some(Action::LeaveOffice));
        assert_eq!(Action::classify("🏠 دخول منزلي"), Some(Action::EnterHome));
        assert_eq!(
            Action::classify("خروج منزلي (تلقائي)"),
            Some(Action::LeaveHome)
        );
    }

    #[test]
    fn generic_labels_are_unclassified() {
        assert_eq!(Action::classify("تسجيل دخول"), None);
        assert_eq!(Action::classify("تسجيل خروج"), None);
        assert_eq!(Action::classify(""), None);
    }

    #[test]
    fn channels_and_directions() {
        assert_eq!(Action::EnterOffice.channel(), Channel::Office);
        assert_eq!(Action::LeaveHome.channel(), Channel::Home);
        assert_eq!(Action::EnterHome.direction(), Direction::Enter);
        assert_eq!(Action::LeaveOffice.direction(), Direction::Leave);
    }
}
