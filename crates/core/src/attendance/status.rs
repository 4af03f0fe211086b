//! Per-day status codes and their counters.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

/// The status shown in one cell of the attendance grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// "P"
    Present,
    /// "A"
    Absent,
    /// "L"
    Leave,
    /// "HD"
    HalfDay,
    /// "WO"
    WeeklyOff,
    /// "H"
    Holiday,
    /// Any other code derived from an attendance record's text, e.g. "WFH".
    Abbreviated(String),
    /// No status at all.
    Blank,
}

impl StatusCode {
    /// Cell text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Present => "P",
            Self::Absent => "A",
            Self::Leave => "L",
            Self::HalfDay => "HD",
            Self::WeeklyOff => "WO",
            Self::Holiday => "H",
            Self::Abbreviated(code) => code,
            Self::Blank => "",
        }
    }

    /// Maps an attendance record's textual status to its cell code.
    ///
    /// Known statuses use a fixed table. Anything else becomes the
    /// upper-cased initial of each whitespace-separated word, so distinct
    /// texts can share a code ("Sick Leave" and "Special Leave" are both
    /// "SL"). Initials equal to a fixed code ("Pending" is "P") count as
    /// that code. Missing or empty text is `Blank`.
    #[must_use]
    pub fn from_attendance_status(status: Option<&str>) -> Self {
        let Some(text) = status.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Blank;
        };

        if let Some(code) = KNOWN_STATUSES.get(text) {
            return code.clone();
        }

        let initials: String = text
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        Self::from_code(initials)
    }

    /// Cell text back to its status.
    #[must_use]
    pub fn from_code(code: String) -> Self {
        match code.as_str() {
            "P" => Self::Present,
            "A" => Self::Absent,
            "L" => Self::Leave,
            "HD" => Self::HalfDay,
            "WO" => Self::WeeklyOff,
            "H" => Self::Holiday,
            "" => Self::Blank,
            _ => Self::Abbreviated(code),
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Long-form attendance statuses with fixed abbreviations.
static KNOWN_STATUSES: Lazy<HashMap<&'static str, StatusCode>> = Lazy::new(|| {
    HashMap::from([
        ("Present", StatusCode::Present),
        ("Absent", StatusCode::Absent),
        ("On Leave", StatusCode::Leave),
        ("Half Day", StatusCode::HalfDay),
        ("Work From Home", StatusCode::Abbreviated("WFH".to_string())),
    ])
});

/// Per-status day counters for one employee row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTotals {
    /// Days marked "P".
    pub present: u32,
    /// Days marked "A".
    pub absent: u32,
    /// Days marked "L".
    pub leave: u32,
    /// Days marked "HD".
    pub half_day: u32,
    /// Days marked "WO".
    pub weekly_off: u32,
    /// Days marked "H".
    pub holiday: u32,
    /// Days carrying any other abbreviation.
    pub other: u32,
    /// Days with no status.
    pub unmarked: u32,
}

impl StatusTotals {
    /// Counts one day.
    pub fn record(&mut self, status: &StatusCode) {
        let counter = match status {
            StatusCode::Present => &mut self.present,
            StatusCode::Absent => &mut self.absent,
            StatusCode::Leave => &mut self.leave,
            StatusCode::HalfDay => &mut self.half_day,
            StatusCode::WeeklyOff => &mut self.weekly_off,
            StatusCode::Holiday => &mut self.holiday,
            StatusCode::Abbreviated(_) => &mut self.other,
            StatusCode::Blank => &mut self.unmarked,
        };
        *counter += 1;
    }

    /// Sum of all counters; equals the number of days counted.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.present
            + self.absent
            + self.leave
            + self.half_day
            + self.weekly_off
            + self.holiday
            + self.other
            + self.unmarked
    }
}
