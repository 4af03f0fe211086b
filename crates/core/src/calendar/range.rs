//! Inclusive date ranges and per-day column generation.

use std::iter::FusedIterator;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::month::month_number;
use crate::error::ReportError;
use crate::schema::{Column, FieldType};

/// Default width of a per-day column.
pub const DEFAULT_DAY_COLUMN_WIDTH: u32 = 45;

/// An inclusive calendar date range `[from_date, to_date]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub from_date: NaiveDate,
    /// Last day of the range.
    pub to_date: NaiveDate,
}

impl DateRange {
    /// Creates a range; returns `None` if `from_date` is after `to_date`.
    #[must_use]
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Option<Self> {
        (from_date <= to_date).then_some(Self { from_date, to_date })
    }

    /// Resolves a `(year, month name)` pair into the full calendar month.
    ///
    /// The last day accounts for leap years.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidFilter` if the month name is not one of
    /// the twelve recognized names, or the year is not positive (or beyond
    /// the supported calendar).
    pub fn for_month(year: i32, month: &str) -> Result<Self, ReportError> {
        let month = month_number(month).ok_or_else(ReportError::invalid_month)?;
        if year <= 0 {
            return Err(ReportError::invalid_year());
        }

        let from_date =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(ReportError::invalid_year)?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let to_date = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(ReportError::invalid_year)?;

        Ok(Self { from_date, to_date })
    }

    /// Returns true if `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from_date && date <= self.to_date
    }

    /// Intersects `[start, end]` with this range.
    ///
    /// Returns `None` when they do not overlap.
    #[must_use]
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Option<Self> {
        Self::new(start.max(self.from_date), end.min(self.to_date))
    }

    /// Number of days in the range, both endpoints included.
    #[must_use]
    pub fn num_days(&self) -> usize {
        let days = (self.to_date - self.from_date).num_days() + 1;
        usize::try_from(days).unwrap_or(0)
    }

    /// Iterates every date in the range in ascending order.
    #[must_use]
    pub fn dates(&self) -> Dates {
        Dates {
            next: Some(self.from_date),
            end: self.to_date,
        }
    }

    /// Iterates one column per day using the default column width.
    #[must_use]
    pub fn day_columns(&self) -> DayColumns {
        self.day_columns_with_width(DEFAULT_DAY_COLUMN_WIDTH)
    }

    /// Iterates one column per day with the given column width.
    ///
    /// The iterator is lazy and `Clone`; cloning or calling again restarts it.
    #[must_use]
    pub fn day_columns_with_width(&self, width: u32) -> DayColumns {
        DayColumns {
            dates: self.dates(),
            width,
        }
    }
}

/// Ascending iterator over the dates of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Dates {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Dates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = current.succ_opt();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .filter(|d| *d <= self.end)
            .map_or(0, |d| (self.end - d).num_days() + 1);
        let remaining = usize::try_from(remaining).unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Dates {}
impl FusedIterator for Dates {}

/// A report column bound to one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    /// Day-of-month as text.
    pub label: String,
    /// Field key, `d_<day>` without zero padding.
    pub fieldname: String,
    /// Column width.
    pub width: u32,
    /// The date this column represents. Not part of the UI schema.
    pub date: NaiveDate,
}

impl DayColumn {
    /// Builds the column for `date`.
    #[must_use]
    pub fn new(date: NaiveDate, width: u32) -> Self {
        let day = date.day();
        Self {
            label: day.to_string(),
            fieldname: day_fieldname(day),
            width,
            date,
        }
    }

    /// UI column descriptor for this day.
    #[must_use]
    pub fn to_column(&self) -> Column {
        Column::new(&self.label, &self.fieldname, FieldType::Data, self.width)
    }
}

/// Field key for a day-of-month.
#[must_use]
pub fn day_fieldname(day: u32) -> String {
    format!("d_{day}")
}

/// Lazy iterator producing one [`DayColumn`] per day of a range.
#[derive(Debug, Clone)]
pub struct DayColumns {
    dates: Dates,
    width: u32,
}

impl Iterator for DayColumns {
    type Item = DayColumn;

    fn next(&mut self) -> Option<Self::Item> {
        self.dates.next().map(|date| DayColumn::new(date, self.width))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.dates.size_hint()
    }
}

impl ExactSizeIterator for DayColumns {}
impl FusedIterator for DayColumns {}
