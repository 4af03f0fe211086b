//! Attendance domain types.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

use crate::calendar::DateRange;
use crate::error::ReportError;

/// Employee status that makes an employee eligible for the grid.
pub const ACTIVE_STATUS: &str = "Active";

/// Leave application status that counts as leave.
pub const APPROVED_LEAVE_STATUS: &str = "Approved";

/// Submission state of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DocStatus {
    /// Saved but not submitted (0).
    #[default]
    Draft,
    /// Submitted and final (1).
    Submitted,
    /// Cancelled after submission (2).
    Cancelled,
}

impl DocStatus {
    /// Returns true for submitted documents.
    #[must_use]
    pub fn is_submitted(self) -> bool {
        self == Self::Submitted
    }

    /// Returns true for cancelled documents.
    #[must_use]
    pub fn is_cancelled(self) -> bool {
        self == Self::Cancelled
    }
}

impl TryFrom<u8> for DocStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Draft),
            1 => Ok(Self::Submitted),
            2 => Ok(Self::Cancelled),
            other => Err(format!("invalid docstatus: {other}")),
        }
    }
}

impl From<DocStatus> for u8 {
    fn from(status: DocStatus) -> Self {
        match status {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }
}

/// An employee as supplied by the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee identifier.
    pub name: String,
    /// Display name.
    pub employee_name: String,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Designation.
    #[serde(default)]
    pub designation: Option<String>,
    /// Personal holiday list, overriding the company default.
    #[serde(default)]
    pub holiday_list: Option<String>,
    /// Employing company.
    #[serde(default)]
    pub company: String,
    /// Employment status.
    #[serde(default = "default_employee_status")]
    pub status: String,
}

fn default_employee_status() -> String {
    ACTIVE_STATUS.to_string()
}

/// A company master record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company identifier.
    pub name: String,
    /// Holiday list used by employees without a personal one.
    #[serde(default)]
    pub default_holiday_list: Option<String>,
}

/// A raw check-in punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    /// Employee identifier.
    pub employee: String,
    /// Punch timestamp.
    pub time: NaiveDateTime,
}

/// A leave application covering an inclusive date span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Employee identifier.
    pub employee: String,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave.
    pub to_date: NaiveDate,
    /// Workflow status, e.g. "Approved", "Rejected", "Open".
    pub status: String,
    /// Submission state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl LeaveApplication {
    /// Approved and submitted applications are the only ones that count.
    #[must_use]
    pub fn is_effective(&self) -> bool {
        self.status == APPROVED_LEAVE_STATUS && self.docstatus.is_submitted()
    }
}

/// A finalized (or draft) attendance record for one employee-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Employee identifier.
    pub employee: String,
    /// Day the record covers.
    pub attendance_date: NaiveDate,
    /// Textual status, e.g. "Present" or "Work From Home".
    #[serde(default)]
    pub status: Option<String>,
    /// Submission state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

/// One day of a holiday list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Holiday list the day belongs to.
    pub parent: String,
    /// The date.
    pub holiday_date: NaiveDate,
    /// Weekly off rather than a public holiday.
    #[serde(default)]
    pub weekly_off: bool,
}

/// Filters accepted by both attendance reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceFilters {
    /// Company (required).
    pub company: Option<String>,
    /// Month name (required), e.g. "February".
    pub month: Option<String>,
    /// Year (required, positive). Accepts a number or a numeric string.
    #[serde(deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    /// Restrict to one employee.
    pub employee: Option<String>,
    /// Restrict to one department.
    pub department: Option<String>,
    /// Restrict to one designation.
    pub designation: Option<String>,
}

impl AttendanceFilters {
    /// Validates the filters and resolves the reporting period.
    ///
    /// Checks run in order company, month, year; the first failure wins.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidFilter` with a user-facing message.
    pub fn validate(&self) -> Result<(EmployeeQuery, DateRange), ReportError> {
        let company = non_empty(self.company.as_ref()).ok_or_else(ReportError::company_required)?;
        let month = non_empty(self.month.as_ref()).ok_or_else(ReportError::invalid_month)?;
        let year = self.year.ok_or_else(ReportError::invalid_year)?;

        let range = DateRange::for_month(year, month)?;
        let query = EmployeeQuery {
            company: company.to_string(),
            employee: non_empty(self.employee.as_ref()).map(str::to_string),
            department: non_empty(self.department.as_ref()).map(str::to_string),
            designation: non_empty(self.designation.as_ref()).map(str::to_string),
        };

        Ok((query, range))
    }
}

/// Selection criteria handed to the employee directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    /// Employing company.
    pub company: String,
    /// Exact employee identifier.
    pub employee: Option<String>,
    /// Exact department.
    pub department: Option<String>,
    /// Exact designation.
    pub designation: Option<String>,
}

impl EmployeeQuery {
    /// Returns true if the employee is active and satisfies every criterion.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        employee.status == ACTIVE_STATUS
            && employee.company == self.company
            && self.employee.as_ref().is_none_or(|name| *name == employee.name)
            && self
                .department
                .as_ref()
                .is_none_or(|dept| employee.department.as_ref() == Some(dept))
            && self
                .designation
                .as_ref()
                .is_none_or(|desig| employee.designation.as_ref() == Some(desig))
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearValue {
        Number(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    // Anything that is not a whole year becomes 0 so validation reports it.
    Ok(match Option::<YearValue>::deserialize(deserializer)? {
        None => None,
        Some(YearValue::Number(n)) => Some(i32::try_from(n).unwrap_or(0)),
        Some(YearValue::Float(f)) => Some(
            Decimal::try_from(f)
                .ok()
                .filter(|d| d.fract().is_zero())
                .and_then(|d| d.to_i32())
                .unwrap_or(0),
        ),
        Some(YearValue::Text(s)) => Some(s.trim().parse::<i32>().unwrap_or(0)),
        Some(YearValue::Other(_)) => Some(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filters(company: &str, month: &str, year: i32) -> AttendanceFilters {
        AttendanceFilters {
            company: Some(company.to_string()),
            month: Some(month.to_string()),
            year: Some(year),
            ..AttendanceFilters::default()
        }
    }

    fn employee(name: &str) -> Employee {
        Employee {
            name: name.to_string(),
            employee_name: format!("Employee {name}"),
            department: Some("Accounts".to_string()),
            designation: Some("Clerk".to_string()),
            holiday_list: None,
            company: "Acme".to_string(),
            status: ACTIVE_STATUS.to_string(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let (query, range) = filters("Acme", "March", 2024).validate().unwrap();
        assert_eq!(query.company, "Acme");
        assert_eq!(range.num_days(), 31);
    }

    #[test]
    fn test_validate_order_and_messages() {
        assert_eq!(
            filters("", "Smarch", 0).validate().unwrap_err(),
            ReportError::company_required()
        );
        assert_eq!(
            filters("Acme", "Smarch", 0).validate().unwrap_err(),
            ReportError::invalid_month()
        );
        assert_eq!(
            filters("Acme", "March", 0).validate().unwrap_err(),
            ReportError::invalid_year()
        );
        assert_eq!(
            AttendanceFilters::default().validate().unwrap_err(),
            ReportError::company_required()
        );
    }

    #[test]
    fn test_missing_year_is_invalid() {
        let mut f = filters("Acme", "March", 2024);
        f.year = None;
        assert_eq!(f.validate().unwrap_err(), ReportError::invalid_year());
    }

    #[test]
    fn test_year_accepts_numeric_string() {
        let f: AttendanceFilters =
            serde_json::from_value(json!({"company": "Acme", "month": "May", "year": "2025"}))
                .unwrap();
        assert_eq!(f.year, Some(2025));

        let bad: AttendanceFilters =
            serde_json::from_value(json!({"company": "Acme", "month": "May", "year": "soon"}))
                .unwrap();
        assert_eq!(bad.validate().unwrap_err(), ReportError::invalid_year());
    }

    #[test]
    fn test_year_float_and_other_values() {
        let parse = |year: serde_json::Value| -> AttendanceFilters {
            serde_json::from_value(json!({"company": "Acme", "month": "May", "year": year}))
                .unwrap()
        };

        assert_eq!(parse(json!(2024.0)).year, Some(2024));
        assert!(parse(json!(2024.0)).validate().is_ok());
        for bad in [json!(2024.5), json!(true), json!([2024])] {
            assert_eq!(
                parse(bad).validate().unwrap_err(),
                ReportError::invalid_year()
            );
        }
        assert_eq!(parse(json!(null)).year, None);
    }

    #[test]
    fn test_empty_optional_filters_are_ignored() {
        let mut f = filters("Acme", "March", 2024);
        f.department = Some(String::new());
        let (query, _) = f.validate().unwrap();
        assert!(query.department.is_none());
    }

    #[test]
    fn test_query_matches() {
        let (mut query, _) = filters("Acme", "March", 2024).validate().unwrap();
        let mut emp = employee("EMP-001");
        assert!(query.matches(&emp));

        query.department = Some("Sales".to_string());
        assert!(!query.matches(&emp));
        query.department = None;

        emp.status = "Left".to_string();
        assert!(!query.matches(&emp));
        emp.status = ACTIVE_STATUS.to_string();

        emp.company = "Other".to_string();
        assert!(!query.matches(&emp));
    }

    #[test]
    fn test_docstatus_serde() {
        let leave: LeaveApplication = serde_json::from_value(json!({
            "employee": "EMP-001",
            "from_date": "2024-02-10",
            "to_date": "2024-02-12",
            "status": "Approved",
            "docstatus": 1
        }))
        .unwrap();
        assert!(leave.is_effective());
        assert!(serde_json::from_value::<DocStatus>(json!(3)).is_err());
    }
}
