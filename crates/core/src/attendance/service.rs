//! Attendance grid generation.

use c4reports_shared::ReportsConfig;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use super::holiday::{HolidayIndex, distinct_lists};
use super::resolver::{AttendanceBasis, CheckinResolver, RecordResolver, StatusResolver};
use super::source::AttendanceSource;
use super::status::{StatusCode, StatusTotals};
use super::types::{AttendanceFilters, Employee};
use crate::calendar::{DateRange, DayColumn};
use crate::error::ReportError;
use crate::schema::{Column, FieldType, Record};

/// One day cell of an employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// Field key of the day column.
    pub fieldname: String,
    /// The day.
    pub date: NaiveDate,
    /// Resolved status.
    pub status: StatusCode,
}

/// One employee's row in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRow {
    /// Employee identifier.
    pub employee: String,
    /// Display name.
    pub employee_name: String,
    /// Department.
    pub department: Option<String>,
    /// Designation.
    pub designation: Option<String>,
    /// One cell per day column, in column order.
    pub cells: Vec<DayCell>,
    /// Per-status day counters.
    pub totals: StatusTotals,
}

impl AttendanceRow {
    /// Status on `date`, if the date is inside the grid.
    #[must_use]
    pub fn status_on(&self, date: NaiveDate) -> Option<&StatusCode> {
        self.cells.iter().find(|c| c.date == date).map(|c| &c.status)
    }

    /// Flattens the row into field key to value, with the totals shown for `basis`.
    #[must_use]
    pub fn to_record(&self, basis: AttendanceBasis) -> Record {
        let mut record = Record::new();
        record.insert("employee".into(), Value::from(self.employee.clone()));
        record.insert("employee_name".into(), Value::from(self.employee_name.clone()));
        record.insert("department".into(), Value::from(self.department.clone()));
        record.insert("designation".into(), Value::from(self.designation.clone()));

        for cell in &self.cells {
            record.insert(cell.fieldname.clone(), Value::from(cell.status.as_str()));
        }

        for (fieldname, count) in total_fields(basis, &self.totals) {
            record.insert(fieldname.to_string(), Value::from(count));
        }

        record
    }
}

/// Columns and rows of one attendance grid.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    /// Which facts the grid was derived from.
    pub basis: AttendanceBasis,
    /// The reporting month.
    pub period: DateRange,
    /// Column schema.
    pub columns: Vec<Column>,
    /// One row per employee, ordered by employee identifier.
    pub rows: Vec<AttendanceRow>,
}

impl AttendanceReport {
    /// Generic rows keyed by column field key.
    #[must_use]
    pub fn to_records(&self) -> Vec<Record> {
        self.rows.iter().map(|r| r.to_record(self.basis)).collect()
    }
}

/// Service for generating attendance grids.
pub struct AttendanceService;

impl AttendanceService {
    /// Grid derived from check-ins, approved leave and holidays.
    ///
    /// Unmatched days are "A".
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidFilter` before touching `source` if the
    /// filters are incomplete.
    pub fn checkin_report<S>(
        filters: &AttendanceFilters,
        source: &S,
        settings: &ReportsConfig,
    ) -> Result<AttendanceReport, ReportError>
    where
        S: AttendanceSource + ?Sized,
    {
        Self::generate(AttendanceBasis::CheckIn, filters, source, settings)
    }

    /// Grid derived from attendance records and holidays.
    ///
    /// Unmatched days are blank.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidFilter` before touching `source` if the
    /// filters are incomplete.
    pub fn attendance_record_report<S>(
        filters: &AttendanceFilters,
        source: &S,
        settings: &ReportsConfig,
    ) -> Result<AttendanceReport, ReportError>
    where
        S: AttendanceSource + ?Sized,
    {
        Self::generate(AttendanceBasis::AttendanceRecord, filters, source, settings)
    }

    /// Grid for either basis.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidFilter` if the filters are incomplete.
    pub fn generate<S>(
        basis: AttendanceBasis,
        filters: &AttendanceFilters,
        source: &S,
        settings: &ReportsConfig,
    ) -> Result<AttendanceReport, ReportError>
    where
        S: AttendanceSource + ?Sized,
    {
        let (query, period) = filters.validate()?;

        let day_columns: Vec<DayColumn> = period
            .day_columns_with_width(settings.day_column_width)
            .collect();
        let columns = Self::columns(basis, &day_columns);
        let employees = source.employees(&query);

        debug!(
            ?basis,
            company = %query.company,
            from_date = %period.from_date,
            to_date = %period.to_date,
            employees = employees.len(),
            "Generating attendance grid"
        );

        if employees.is_empty() {
            return Ok(AttendanceReport {
                basis,
                period,
                columns,
                rows: Vec::new(),
            });
        }

        let names: Vec<&str> = employees.iter().map(|e| e.name.as_str()).collect();
        let company_list = source.company_holiday_list(&query.company);
        let lists = distinct_lists(&employees, company_list.as_deref());
        trace!(?lists, "Resolved holiday lists");
        let holiday_rows = if lists.is_empty() {
            Vec::new()
        } else {
            source.holidays(&lists, &period)
        };
        let holidays = HolidayIndex::build(company_list.as_deref(), &holiday_rows, &period);

        let rows = match basis {
            AttendanceBasis::CheckIn => {
                let checkins = source.checkins(&names, &period);
                let leaves = source.leave_applications(&names, &period);
                let resolver = CheckinResolver::new(&period, &checkins, &leaves, holidays);
                Self::aggregate(&employees, &day_columns, &resolver)
            }
            AttendanceBasis::AttendanceRecord => {
                let records = source.attendance_records(&names, &period);
                let resolver = RecordResolver::new(&period, &records, holidays);
                Self::aggregate(&employees, &day_columns, &resolver)
            }
        };

        Ok(AttendanceReport {
            basis,
            period,
            columns,
            rows,
        })
    }

    /// Builds one row per employee, resolving every day column in order.
    ///
    /// Each day increments exactly one counter, so `totals.total()` equals
    /// the number of day columns.
    #[must_use]
    pub fn aggregate<'a, R>(
        employees: &'a [Employee],
        day_columns: &[DayColumn],
        resolver: &R,
    ) -> Vec<AttendanceRow>
    where
        R: StatusResolver<'a>,
    {
        employees
            .iter()
            .map(|employee| {
                let mut totals = StatusTotals::default();
                let cells = day_columns
                    .iter()
                    .map(|column| {
                        let status = resolver.resolve(employee, column.date);
                        totals.record(&status);
                        DayCell {
                            fieldname: column.fieldname.clone(),
                            date: column.date,
                            status,
                        }
                    })
                    .collect();

                AttendanceRow {
                    employee: employee.name.clone(),
                    employee_name: employee.employee_name.clone(),
                    department: employee.department.clone(),
                    designation: employee.designation.clone(),
                    cells,
                    totals,
                }
            })
            .collect()
    }

    /// Identity columns, one column per day, then the totals for `basis`.
    #[must_use]
    pub fn columns(basis: AttendanceBasis, day_columns: &[DayColumn]) -> Vec<Column> {
        let mut columns = vec![
            Column::link("Employee", "employee", "Employee", 130),
            Column::new("Employee Name", "employee_name", FieldType::Data, 180),
            Column::link("Department", "department", "Department", 140),
            Column::link("Designation", "designation", "Designation", 140),
        ];
        columns.extend(day_columns.iter().map(DayColumn::to_column));
        columns.extend(
            total_columns(basis)
                .iter()
                .map(|(label, fieldname, width)| Column::new(label, fieldname, FieldType::Int, *width)),
        );
        columns
    }
}

/// `(label, fieldname, width)` of the totals columns for `basis`.
fn total_columns(basis: AttendanceBasis) -> &'static [(&'static str, &'static str, u32)] {
    match basis {
        AttendanceBasis::CheckIn => &[
            ("P", "total_present", 55),
            ("A", "total_absent", 55),
            ("L", "total_leave", 55),
            ("WO", "total_weekly_off", 60),
            ("H", "total_holiday", 55),
        ],
        AttendanceBasis::AttendanceRecord => &[
            ("P", "total_present", 55),
            ("A", "total_absent", 55),
            ("L", "total_leave", 55),
            ("HD", "total_half_day", 55),
            ("WO", "total_weekly_off", 60),
            ("H", "total_holiday", 55),
            ("Other", "total_other", 60),
            ("Unmarked", "total_unmarked", 75),
        ],
    }
}

fn total_fields(basis: AttendanceBasis, totals: &StatusTotals) -> Vec<(&'static str, u32)> {
    total_columns(basis)
        .iter()
        .map(|(_, fieldname, _)| {
            let count = match *fieldname {
                "total_present" => totals.present,
                "total_absent" => totals.absent,
                "total_leave" => totals.leave,
                "total_half_day" => totals.half_day,
                "total_weekly_off" => totals.weekly_off,
                "total_holiday" => totals.holiday,
                "total_other" => totals.other,
                _ => totals.unmarked,
            };
            (*fieldname, count)
        })
        .collect()
}
