//! Holiday-list resolution.
//!
//! An employee's effective holiday list is their personal list, else the
//! company default. Holiday days are indexed once per distinct list and
//! looked up through the effective list, which gives the same answer as a
//! per-employee lookup.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::status::StatusCode;
use super::types::{Employee, Holiday};
use crate::calendar::DateRange;

/// Kind of a holiday-list day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayKind {
    /// Regular weekly off.
    WeeklyOff,
    /// Public or company holiday.
    Holiday,
}

impl From<HolidayKind> for StatusCode {
    fn from(kind: HolidayKind) -> Self {
        match kind {
            HolidayKind::WeeklyOff => Self::WeeklyOff,
            HolidayKind::Holiday => Self::Holiday,
        }
    }
}

/// Holiday days keyed by `(holiday list, date)`.
#[derive(Debug, Clone, Default)]
pub struct HolidayIndex<'a> {
    company_list: Option<&'a str>,
    days: HashMap<(&'a str, NaiveDate), HolidayKind>,
}

impl<'a> HolidayIndex<'a> {
    /// Indexes holiday rows inside `range`.
    ///
    /// Rows outside the range are ignored. When a list repeats a date, the
    /// last row wins.
    #[must_use]
    pub fn build(
        company_list: Option<&'a str>,
        holidays: &'a [Holiday],
        range: &DateRange,
    ) -> Self {
        let days = holidays
            .iter()
            .filter(|h| range.contains(h.holiday_date))
            .map(|h| {
                let kind = if h.weekly_off {
                    HolidayKind::WeeklyOff
                } else {
                    HolidayKind::Holiday
                };
                ((h.parent.as_str(), h.holiday_date), kind)
            })
            .collect();

        Self { company_list, days }
    }

    /// The list that applies to `employee`, if any.
    #[must_use]
    pub fn effective_list(&self, employee: &'a Employee) -> Option<&'a str> {
        effective_list(employee, self.company_list)
    }

    /// Holiday fact for `employee` on `date`.
    #[must_use]
    pub fn lookup(&self, employee: &'a Employee, date: NaiveDate) -> Option<HolidayKind> {
        let list = self.effective_list(employee)?;
        self.days.get(&(list, date)).copied()
    }

    /// Number of indexed holiday days across all lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if no holiday day is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Personal list, else the company default.
#[must_use]
pub fn effective_list<'a>(employee: &'a Employee, company_list: Option<&'a str>) -> Option<&'a str> {
    employee
        .holiday_list
        .as_deref()
        .filter(|l| !l.is_empty())
        .or(company_list.filter(|l| !l.is_empty()))
}

/// Distinct effective lists for a set of employees, sorted.
#[must_use]
pub fn distinct_lists<'a>(employees: &'a [Employee], company_list: Option<&'a str>) -> Vec<&'a str> {
    employees
        .iter()
        .filter_map(|e| effective_list(e, company_list))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn employee(name: &str, list: Option<&str>) -> Employee {
        Employee {
            name: name.to_string(),
            employee_name: name.to_string(),
            department: None,
            designation: None,
            holiday_list: list.map(str::to_string),
            company: "Acme".to_string(),
            status: "Active".to_string(),
        }
    }

    fn holiday(list: &str, d: u32, weekly_off: bool) -> Holiday {
        Holiday {
            parent: list.to_string(),
            holiday_date: date(d),
            weekly_off,
        }
    }

    #[test]
    fn test_personal_list_overrides_company_default() {
        let holidays = vec![holiday("Personal", 3, true), holiday("Company", 5, false)];
        let range = DateRange::for_month(2024, "February").unwrap();
        let index = HolidayIndex::build(Some("Company"), &holidays, &range);

        let personal = employee("E1", Some("Personal"));
        let defaulted = employee("E2", None);

        assert_eq!(index.lookup(&personal, date(3)), Some(HolidayKind::WeeklyOff));
        assert_eq!(index.lookup(&personal, date(5)), None);
        assert_eq!(index.lookup(&defaulted, date(5)), Some(HolidayKind::Holiday));
        assert_eq!(index.lookup(&defaulted, date(3)), None);
    }

    #[test]
    fn test_no_list_means_no_facts() {
        let holidays = vec![holiday("Company", 5, false)];
        let range = DateRange::for_month(2024, "February").unwrap();
        let index = HolidayIndex::build(None, &holidays, &range);
        let emp = employee("E1", None);

        assert_eq!(index.effective_list(&emp), None);
        assert!(range.dates().all(|d| index.lookup(&emp, d).is_none()));
    }

    #[test]
    fn test_rows_outside_range_ignored() {
        let holidays = vec![Holiday {
            parent: "Company".to_string(),
            holiday_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            weekly_off: false,
        }];
        let range = DateRange::for_month(2024, "February").unwrap();
        assert!(HolidayIndex::build(Some("Company"), &holidays, &range).is_empty());
    }

    #[test]
    fn test_distinct_lists_dedupes() {
        let employees = vec![
            employee("E1", None),
            employee("E2", Some("B")),
            employee("E3", None),
            employee("E4", Some("")),
        ];
        assert_eq!(distinct_lists(&employees, Some("A")), vec!["A", "B"]);
        assert_eq!(distinct_lists(&employees, None), vec!["B"]);
    }
}
