//! Attendance data collaborators.
//!
//! The report never queries storage itself; a host supplies an
//! [`AttendanceSource`]. Sources may return wider candidate sets than asked
//! for: the report re-applies the date and eligibility rules it depends on.

use serde::{Deserialize, Serialize};

use super::types::{
    AttendanceRecord, CheckIn, Company, Employee, EmployeeQuery, Holiday, LeaveApplication,
};
use crate::calendar::DateRange;

/// Read access to employees, attendance facts and holiday lists.
pub trait AttendanceSource {
    /// Active employees matching `query`, ordered by identifier.
    fn employees(&self, query: &EmployeeQuery) -> Vec<Employee>;

    /// Check-ins for `employees` whose timestamp falls inside `range`.
    fn checkins(&self, employees: &[&str], range: &DateRange) -> Vec<CheckIn>;

    /// Approved, submitted leave applications for `employees` overlapping `range`.
    fn leave_applications(&self, employees: &[&str], range: &DateRange) -> Vec<LeaveApplication>;

    /// Non-cancelled attendance records for `employees` inside `range`.
    fn attendance_records(&self, employees: &[&str], range: &DateRange) -> Vec<AttendanceRecord>;

    /// The company's default holiday list.
    fn company_holiday_list(&self, company: &str) -> Option<String>;

    /// Holiday rows of the given lists inside `range`.
    fn holidays(&self, lists: &[&str], range: &DateRange) -> Vec<Holiday>;
}

/// An [`AttendanceSource`] over in-memory rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryAttendanceStore {
    /// Employee directory.
    pub employees: Vec<Employee>,
    /// Company masters.
    pub companies: Vec<Company>,
    /// Check-in punches.
    pub checkins: Vec<CheckIn>,
    /// Leave applications in any state.
    pub leave_applications: Vec<LeaveApplication>,
    /// Attendance records in any state.
    pub attendance_records: Vec<AttendanceRecord>,
    /// Holiday rows of every list.
    pub holidays: Vec<Holiday>,
}

impl AttendanceSource for InMemoryAttendanceStore {
    fn employees(&self, query: &EmployeeQuery) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self
            .employees
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        employees
    }

    fn checkins(&self, employees: &[&str], range: &DateRange) -> Vec<CheckIn> {
        self.checkins
            .iter()
            .filter(|c| employees.contains(&c.employee.as_str()) && range.contains(c.time.date()))
            .cloned()
            .collect()
    }

    fn leave_applications(&self, employees: &[&str], range: &DateRange) -> Vec<LeaveApplication> {
        self.leave_applications
            .iter()
            .filter(|l| {
                employees.contains(&l.employee.as_str())
                    && l.is_effective()
                    && l.from_date <= range.to_date
                    && l.to_date >= range.from_date
            })
            .cloned()
            .collect()
    }

    fn attendance_records(&self, employees: &[&str], range: &DateRange) -> Vec<AttendanceRecord> {
        self.attendance_records
            .iter()
            .filter(|r| {
                employees.contains(&r.employee.as_str())
                    && !r.docstatus.is_cancelled()
                    && range.contains(r.attendance_date)
            })
            .cloned()
            .collect()
    }

    fn company_holiday_list(&self, company: &str) -> Option<String> {
        self.companies
            .iter()
            .find(|c| c.name == company)
            .and_then(|c| c.default_holiday_list.clone())
    }

    fn holidays(&self, lists: &[&str], range: &DateRange) -> Vec<Holiday> {
        self.holidays
            .iter()
            .filter(|h| lists.contains(&h.parent.as_str()) && range.contains(h.holiday_date))
            .cloned()
            .collect()
    }
}
