//! Monthly attendance grids.
//!
//! Two variants share the same pipeline (period, day columns, per-day
//! status, per-employee totals) and differ only in where statuses come from:
//! - `CheckIn` - raw check-ins plus approved leave; unmatched days are "A"
//! - `AttendanceRecord` - attendance records; unmatched days are blank
//!
//! Weekly offs and holidays come from the employee's holiday list, falling
//! back to the company default.

pub mod holiday;
pub mod resolver;
pub mod service;
pub mod source;
pub mod status;
pub mod types;


pub use holiday::{HolidayIndex, HolidayKind};
pub use resolver::{AttendanceBasis, CheckinResolver, RecordResolver, StatusResolver};
pub use service::{AttendanceReport, AttendanceRow, AttendanceService, DayCell};
pub use source::{AttendanceSource, InMemoryAttendanceStore};
pub use status::{StatusCode, StatusTotals};
pub use types::{
    AttendanceFilters, AttendanceRecord, CheckIn, Company, DocStatus, Employee, EmployeeQuery,
    Holiday, LeaveApplication,
};
