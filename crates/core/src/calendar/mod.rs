//! Calendar utilities shared by the attendance grids and the ledger statement.
//!
//! - `month` - Month-name lookup table
//! - `range` - Inclusive date ranges and per-day column generation

pub mod month;
pub mod range;


pub use month::{MONTH_NAMES, month_number};
pub use range::{DateRange, Dates, DayColumn, DayColumns};
