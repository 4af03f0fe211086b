//! Core report logic for c4reports.
//!
//! This crate turns report filters plus raw rows into a column schema and
//! display rows. It has ZERO web or database dependencies; data arrives
//! through the [`attendance::AttendanceSource`] and
//! [`statement::LedgerSource`] traits.
//!
//! # Modules
//!
//! - `calendar` - Month names, report periods and per-day columns
//! - `attendance` - Monthly attendance grids (check-in and record based)
//! - `statement` - GL party statement with running balance
//! - `schema` - Column descriptors shared by every report
//! - `error` - Filter validation errors

pub mod attendance;
pub mod calendar;
pub mod error;
pub mod schema;
pub mod statement;

pub use attendance::{AttendanceBasis, AttendanceFilters, AttendanceReport, AttendanceService};
pub use calendar::DateRange;
pub use error::ReportError;
pub use schema::{Column, FieldType, Record};
pub use statement::{LedgerFilters, LedgerStatement, StatementService};
