use time::{
    util::is_leap_year,
    Date,
    Month::{self, *},
    Weekday,
};

pub(crate) const DAYS_IN_WEEK: u8 = 7;

pub(crate) const MONTHS_IN_YEAR: u8 = 12;

pub(crate) const YEARS_IN_DECADE: u8 = 10;

pub(crate) trait WeekdayExt {
    /// Number of days from `start` forwards to `self`, in `0..7`
    fn days_since(&self, start: Weekday) -> u8;
}

impl WeekdayExt for Weekday {
    fn days_since(&self, start: Weekday) -> u8 {
        (self.number_days_from_sunday() + DAYS_IN_WEEK - start.number_days_from_sunday())
            % DAYS_IN_WEEK
    }
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        February if is_leap_year(year) => 29,
        February => 28,
        April | June | September | November => 30,
        _ => 31,
    }
}

/// Move `date` by `delta` months, clamping the day to the length of the
/// target month.  Saturates at `Date::MIN`/`Date::MAX` when the target month
/// cannot be represented.
pub(crate) fn shift_months(date: Date, delta: i64) -> Date {
    let total = i64::from(date.year()) * i64::from(MONTHS_IN_YEAR)
        + i64::from(u8::from(date.month()) - 1)
        + delta;
    let saturated = if delta < 0 { Date::MIN } else { Date::MAX };
    let Ok(year) = i32::try_from(total.div_euclid(i64::from(MONTHS_IN_YEAR))) else {
        return saturated;
    };
    let month = u8::try_from(total.rem_euclid(i64::from(MONTHS_IN_YEAR)))
        .map_or(January, |n| January.nth_next(n));
    let day = date.day().min(days_in_month(year, month));
    Date::from_calendar_date(year, month, day).unwrap_or(saturated)
}

/// First year of the decade containing `year`, e.g. 2010 for 2015 and -10 for
/// -3
pub(crate) fn decade_start(year: i32) -> i32 {
    year - year.rem_euclid(i32::from(YEARS_IN_DECADE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday::*;

    #[test]
    fn test_days_since() {
        assert_eq!(Sunday.days_since(Monday), 6);
        assert_eq!(Monday.days_since(Monday), 0);
        assert_eq!(Saturday.days_since(Sunday), 6);
        assert_eq!(Wednesday.days_since(Sunday), 3);
        assert_eq!(Tuesday.days_since(Saturday), 3);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2015, February), 28);
        assert_eq!(days_in_month(2016, February), 29);
        assert_eq!(days_in_month(1900, February), 28);
        assert_eq!(days_in_month(2000, February), 29);
        assert_eq!(days_in_month(2015, April), 30);
        assert_eq!(days_in_month(2015, December), 31);
    }

    #[test]
    fn test_shift_months() {
        assert_eq!(shift_months(date!(2015 - 02 - 14), 1), date!(2015 - 03 - 14));
        assert_eq!(shift_months(date!(2015 - 02 - 14), -2), date!(2014 - 12 - 14));
        assert_eq!(shift_months(date!(2015 - 01 - 31), 1), date!(2015 - 02 - 28));
        assert_eq!(shift_months(date!(2016 - 02 - 29), 12), date!(2017 - 02 - 28));
        assert_eq!(shift_months(date!(2015 - 11 - 30), 14), date!(2017 - 01 - 30));
        assert_eq!(shift_months(date!(2015 - 06 - 01), 0), date!(2015 - 06 - 01));
    }

    #[test]
    fn test_shift_months_saturates() {
        assert_eq!(shift_months(Date::MAX, 1), Date::MAX);
        assert_eq!(shift_months(Date::MIN, -12), Date::MIN);
        assert_eq!(shift_months(date!(2015 - 06 - 01), i64::from(i32::MAX)), Date::MAX);
    }

    #[test]
    fn test_decade_start() {
        assert_eq!(decade_start(2015), 2010);
        assert_eq!(decade_start(2010), 2010);
        assert_eq!(decade_start(-3), -10);
        assert_eq!(decade_start(0), 0);
    }
}
