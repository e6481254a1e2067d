use crate::calendar::util::days_in_month;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{macros::format_description, Date, Duration, Month, Weekday};

/// A Gregorian calendar date with no time-of-day component
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CalendarDate(Date);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<CalendarDate, ParseDateError> {
        let month = Month::try_from(month)?;
        Ok(CalendarDate(Date::from_calendar_date(year, month, day)?))
    }

    /// Parse a date in `YYYY-MM-DD` form
    pub fn parse_iso(s: &str) -> Result<CalendarDate, ParseDateError> {
        match Date::parse(s, format_description!("[year]-[month]-[day]")) {
            Ok(d) => Ok(CalendarDate(d)),
            Err(_) => Err(ParseDateError::Iso {
                input: s.to_owned(),
            }),
        }
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> Month {
        self.0.month()
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn first_of_month(self) -> CalendarDate {
        // Day 1 exists in every month of every representable year
        CalendarDate(self.0.replace_day(1).unwrap_or(self.0))
    }

    pub fn first_of_year(self) -> CalendarDate {
        CalendarDate(Date::from_calendar_date(self.year(), Month::January, 1).unwrap_or(self.0))
    }

    /// Returns `None` if the result would fall outside the representable
    /// range of dates
    pub fn checked_add_days(self, days: i64) -> Option<CalendarDate> {
        self.0.checked_add(Duration::days(days)).map(CalendarDate)
    }

    pub fn as_date(self) -> Date {
        self.0
    }
}

impl From<Date> for CalendarDate {
    fn from(date: Date) -> CalendarDate {
        CalendarDate(date)
    }
}

impl From<CalendarDate> for Date {
    fn from(date: CalendarDate) -> Date {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.year();
        if year < 0 {
            write!(f, "-")?;
        }
        let y = year.unsigned_abs();
        let m = u8::from(self.month());
        let d = self.day();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl FromStr for CalendarDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<CalendarDate, ParseDateError> {
        CalendarDate::parse_iso(s)
    }
}

/// Render `date` as `YYYY-MM-DD`, zero-padded, with a leading `-` for years
/// before 1 BCE
pub fn format_iso(date: CalendarDate) -> String {
    date.to_string()
}

/// An inclusive span of dates.
///
/// The fields are public, so a range can be built with `from > to`; such a
/// range contains no dates and is refused wherever a range is stored.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateRange {
    pub from: CalendarDate,
    pub to: CalendarDate,
}

impl DateRange {
    pub fn new(from: CalendarDate, to: CalendarDate) -> DateRange {
        DateRange { from, to }
    }

    pub fn is_valid(&self) -> bool {
        self.from <= self.to
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// The whole calendar month containing `date`
    pub(crate) fn month_of(date: CalendarDate) -> DateRange {
        let from = date.first_of_month();
        let last = days_in_month(date.year(), date.month());
        let to = CalendarDate(date.0.replace_day(last).unwrap_or(date.0));
        DateRange { from, to }
    }

    /// The whole calendar year containing `date`
    pub(crate) fn year_of(date: CalendarDate) -> DateRange {
        let from = date.first_of_year();
        let to = CalendarDate(
            Date::from_calendar_date(date.year(), Month::December, 31).unwrap_or(Date::MAX),
        );
        DateRange { from, to }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

impl FromStr for DateRange {
    type Err = ParseDateError;

    /// Parse a range written as `FROM:TO`, both ends in `YYYY-MM-DD` form
    fn from_str(s: &str) -> Result<DateRange, ParseDateError> {
        let Some((from, to)) = s.split_once(':') else {
            return Err(ParseDateError::Range {
                input: s.to_owned(),
            });
        };
        Ok(DateRange {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseDateError {
    #[error("invalid date {input:?}: expected YYYY-MM-DD")]
    Iso { input: String },
    #[error("invalid date range {input:?}: expected FROM:TO")]
    Range { input: String },
    #[error("date {input:?} does not match pattern {pattern:?}")]
    Pattern { input: String, pattern: String },
    #[error("date component out of range")]
    Component(#[from] time::error::ComponentRange),
}
