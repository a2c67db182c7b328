mod border;
mod days;
pub use self::border::{PathSegment, month_border_path, svg_path_data};
pub use self::days::{
    DaysOfYear, MonthsOfYear, WeeksOfYear, days_of_year, last_day_of_month, months_of_year,
    weeks_of_year,
};
use time::{Date, Weekday};

/// Number of rows in a year's grid
pub const DAYS_IN_WEEK: u8 = 7;

/// Number of week columns a year's grid is laid out for.  A handful of years
/// (those with days in both week 0 and week 53) spill one column past this.
pub const WEEK_COLUMNS: u8 = 53;

/// Which day a week starts on.  This determines both the weekday rows of the
/// grid and the week-of-year numbering used for its columns.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn from_monday_first(monday_first: bool) -> WeekStart {
        if monday_first {
            WeekStart::Monday
        } else {
            WeekStart::Sunday
        }
    }

    pub fn is_monday_first(self) -> bool {
        self == WeekStart::Monday
    }

    pub fn first_day(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Monday,
            WeekStart::Sunday => Weekday::Sunday,
        }
    }
}

/// The position of a day within a year's grid
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GridCell {
    /// Column, in `0..=53`
    pub week: u8,
    /// Row, in `0..7`
    pub weekday: u8,
}

/// Returns the row of `date`: 0 is the first day of the week.
pub fn weekday_index(date: Date, week_start: WeekStart) -> u8 {
    let from_sunday = date.weekday().number_days_from_sunday();
    match week_start {
        WeekStart::Monday => (from_sunday + 6) % 7,
        WeekStart::Sunday => from_sunday,
    }
}

/// Returns the week of the year of `date` in the strftime `%W` (Monday-first)
/// or `%U` (Sunday-first) convention: every day before the year's first
/// Monday/Sunday is in week 0.
pub fn week_index(date: Date, week_start: WeekStart) -> u8 {
    match week_start {
        WeekStart::Monday => date.monday_based_week(),
        WeekStart::Sunday => date.sunday_based_week(),
    }
}

pub fn grid_cell(date: Date, week_start: WeekStart) -> GridCell {
    GridCell {
        week: week_index(date, week_start),
        weekday: weekday_index(date, week_start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use time::macros::date;

    #[test]
    fn test_weekday_index_monday_first() {
        assert_eq!(weekday_index(date!(2021 - 01 - 04), WeekStart::Monday), 0);
        assert_eq!(weekday_index(date!(2021 - 01 - 05), WeekStart::Monday), 1);
        assert_eq!(weekday_index(date!(2021 - 01 - 10), WeekStart::Monday), 6);
    }

    #[test]
    fn test_weekday_index_sunday_first() {
        assert_eq!(weekday_index(date!(2021 - 01 - 03), WeekStart::Sunday), 0);
        assert_eq!(weekday_index(date!(2021 - 01 - 04), WeekStart::Sunday), 1);
        assert_eq!(weekday_index(date!(2021 - 01 - 09), WeekStart::Sunday), 6);
    }

    #[test]
    fn test_weekday_index_relation() {
        for date in days_of_year(2024) {
            let monday = weekday_index(date, WeekStart::Monday);
            let sunday = weekday_index(date, WeekStart::Sunday);
            assert!(monday < 7, "{date} has Monday-first row {monday}");
            assert!(sunday < 7, "{date} has Sunday-first row {sunday}");
            assert_eq!(monday, (sunday + 6) % 7, "rows disagree for {date}");
        }
    }

    #[test]
    fn test_week_index_monday_first() {
        // 2021 starts on a Friday, so 1-3 January make up week 0.
        assert_eq!(week_index(date!(2021 - 01 - 01), WeekStart::Monday), 0);
        assert_eq!(week_index(date!(2021 - 01 - 03), WeekStart::Monday), 0);
        assert_eq!(week_index(date!(2021 - 01 - 04), WeekStart::Monday), 1);
        assert_eq!(week_index(date!(2021 - 01 - 05), WeekStart::Monday), 1);
        assert_eq!(week_index(date!(2021 - 01 - 31), WeekStart::Monday), 4);
        assert_eq!(week_index(date!(2021 - 12 - 31), WeekStart::Monday), 52);
    }

    #[test]
    fn test_week_index_sunday_first() {
        assert_eq!(week_index(date!(2021 - 01 - 02), WeekStart::Sunday), 0);
        assert_eq!(week_index(date!(2021 - 01 - 03), WeekStart::Sunday), 1);
        assert_eq!(week_index(date!(2021 - 01 - 04), WeekStart::Sunday), 1);
        assert_eq!(week_index(date!(2021 - 01 - 10), WeekStart::Sunday), 2);
    }

    #[test]
    fn test_week_index_reaches_53() {
        // 2018 starts and ends on a Monday.
        assert_eq!(week_index(date!(2018 - 01 - 01), WeekStart::Monday), 1);
        assert_eq!(week_index(date!(2018 - 12 - 31), WeekStart::Monday), 53);
        // 2012 is a leap year starting on a Sunday: both week 0 and week 53
        // are in use.
        assert_eq!(week_index(date!(2012 - 01 - 01), WeekStart::Monday), 0);
        assert_eq!(week_index(date!(2012 - 12 - 31), WeekStart::Monday), 53);
    }

    #[test]
    fn test_cells_are_unique() {
        for year in 2010..=2030 {
            for week_start in [WeekStart::Monday, WeekStart::Sunday] {
                let mut seen = HashSet::new();
                for date in days_of_year(year) {
                    let cell = grid_cell(date, week_start);
                    assert!(cell.week <= WEEK_COLUMNS, "{date} is in column {}", cell.week);
                    assert!(seen.insert(cell), "{date} collides at {cell:?}");
                }
            }
        }
    }

    #[test]
    fn test_from_monday_first() {
        assert_eq!(WeekStart::from_monday_first(true), WeekStart::Monday);
        assert_eq!(WeekStart::from_monday_first(false), WeekStart::Sunday);
        assert!(WeekStart::Monday.is_monday_first());
        assert!(!WeekStart::Sunday.is_monday_first());
        assert_eq!(WeekStart::Sunday.first_day(), Weekday::Sunday);
    }
}
