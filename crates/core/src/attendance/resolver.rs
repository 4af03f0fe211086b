//! Per-day status resolution.
//!
//! Two policies exist and differ on unmatched days:
//! - [`CheckinResolver`]: leave > check-in > holiday > "A" (absent).
//! - [`RecordResolver`]: attendance record > holiday > blank. Absence is
//!   only ever shown when an attendance record says so.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::holiday::HolidayIndex;
use super::status::StatusCode;
use super::types::{AttendanceRecord, CheckIn, Employee, LeaveApplication};
use crate::calendar::DateRange;

/// Composite `(employee, date)` lookup key.
pub type DayKey<'a> = (&'a str, NaiveDate);

/// Which facts the grid is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceBasis {
    /// Raw check-ins and approved leave applications.
    CheckIn,
    /// Attendance records.
    AttendanceRecord,
}

/// Picks exactly one status for an employee-day.
pub trait StatusResolver<'a> {
    /// Status of `employee` on `date`.
    fn resolve(&self, employee: &'a Employee, date: NaiveDate) -> StatusCode;
}

/// Status policy for grids derived from check-ins and leave applications.
#[derive(Debug, Clone)]
pub struct CheckinResolver<'a> {
    leave: HashSet<DayKey<'a>>,
    checkins: HashSet<DayKey<'a>>,
    holidays: HolidayIndex<'a>,
}

impl<'a> CheckinResolver<'a> {
    /// Builds the fact sets.
    ///
    /// Only approved, submitted leave counts; each application is clipped
    /// to `range` before being expanded day by day. Check-ins count for the
    /// calendar date of their timestamp.
    #[must_use]
    pub fn new(
        range: &DateRange,
        checkins: &'a [CheckIn],
        leave_applications: &'a [LeaveApplication],
        holidays: HolidayIndex<'a>,
    ) -> Self {
        let leave = leave_applications
            .iter()
            .filter(|app| app.is_effective())
            .filter_map(|app| {
                range
                    .clip(app.from_date, app.to_date)
                    .map(|span| (app.employee.as_str(), span))
            })
            .flat_map(|(employee, span)| span.dates().map(move |d| (employee, d)))
            .collect();

        let checkins = checkins
            .iter()
            .map(|c| (c.employee.as_str(), c.time.date()))
            .filter(|(_, d)| range.contains(*d))
            .collect();

        Self {
            leave,
            checkins,
            holidays,
        }
    }
}

impl<'a> StatusResolver<'a> for CheckinResolver<'a> {
    fn resolve(&self, employee: &'a Employee, date: NaiveDate) -> StatusCode {
        let key = (employee.name.as_str(), date);
        if self.leave.contains(&key) {
            StatusCode::Leave
        } else if self.checkins.contains(&key) {
            StatusCode::Present
        } else {
            self.holidays
                .lookup(employee, date)
                .map_or(StatusCode::Absent, StatusCode::from)
        }
    }
}

/// Status policy for grids derived from attendance records.
#[derive(Debug, Clone)]
pub struct RecordResolver<'a> {
    records: HashMap<DayKey<'a>, StatusCode>,
    holidays: HolidayIndex<'a>,
}

impl<'a> RecordResolver<'a> {
    /// Builds the record map.
    ///
    /// Cancelled records are ignored. If an employee-day has several
    /// remaining records, the last one in input order wins.
    #[must_use]
    pub fn new(
        range: &DateRange,
        records: &'a [AttendanceRecord],
        holidays: HolidayIndex<'a>,
    ) -> Self {
        let records = records
            .iter()
            .filter(|r| !r.docstatus.is_cancelled() && range.contains(r.attendance_date))
            .map(|r| {
                (
                    (r.employee.as_str(), r.attendance_date),
                    StatusCode::from_attendance_status(r.status.as_deref()),
                )
            })
            .collect();

        Self { records, holidays }
    }
}

impl<'a> StatusResolver<'a> for RecordResolver<'a> {
    fn resolve(&self, employee: &'a Employee, date: NaiveDate) -> StatusCode {
        if let Some(status) = self.records.get(&(employee.name.as_str(), date)) {
            return status.clone();
        }
        self.holidays
            .lookup(employee, date)
            .map_or(StatusCode::Blank, StatusCode::from)
    }
}
