use super::{WeekStart, weekday_index};
use std::iter::FusedIterator;
use time::{Date, Duration, Month};

/// Every day of a year, in order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DaysOfYear {
    year: i32,
    next: Option<Date>,
}

pub fn days_of_year(year: i32) -> DaysOfYear {
    DaysOfYear {
        year,
        next: Date::from_ordinal_date(year, 1).ok(),
    }
}

impl Iterator for DaysOfYear {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let date = self.next?;
        self.next = date.next_day().filter(|d| d.year() == self.year);
        Some(date)
    }
}

impl FusedIterator for DaysOfYear {}

/// The first day of each week column of a year: 1 January, followed by every
/// day of the year on which a week starts
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeeksOfYear {
    year: i32,
    week_start: WeekStart,
    next: Option<Date>,
}

pub fn weeks_of_year(year: i32, week_start: WeekStart) -> WeeksOfYear {
    WeeksOfYear {
        year,
        week_start,
        next: Date::from_ordinal_date(year, 1).ok(),
    }
}

impl Iterator for WeeksOfYear {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let date = self.next?;
        let remaining = 7 - i64::from(weekday_index(date, self.week_start));
        self.next = date
            .checked_add(Duration::days(remaining))
            .filter(|d| d.year() == self.year);
        Some(date)
    }
}

impl FusedIterator for WeeksOfYear {}

/// The first day of every month of a year
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthsOfYear {
    year: i32,
    next: Option<Month>,
}

pub fn months_of_year(year: i32) -> MonthsOfYear {
    MonthsOfYear {
        year,
        next: Some(Month::January),
    }
}

impl Iterator for MonthsOfYear {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let month = self.next?;
        self.next = match month {
            Month::December => None,
            m => Some(m.next()),
        };
        let first = Date::from_calendar_date(self.year, month, 1).ok();
        if first.is_none() {
            self.next = None;
        }
        first
    }
}

impl FusedIterator for MonthsOfYear {}

/// Returns the last day of the month containing `date`
pub fn last_day_of_month(date: Date) -> Date {
    let mut last = date;
    while let Some(tomorrow) = last.next_day() {
        if tomorrow.month() != date.month() {
            break;
        }
        last = tomorrow;
    }
    last
}
