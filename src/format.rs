use crate::date::{CalendarDate, ParseDateError};
use crate::locale::Locale;
use std::fmt;
use time::Month;

/// A display pattern in date-picker syntax.
///
/// | Token  | Meaning                          |
/// |--------|----------------------------------|
/// | `d`    | day of month                     |
/// | `dd`   | day of month, two digits         |
/// | `D`    | short weekday name               |
/// | `DD`   | full weekday name                |
/// | `m`    | month number                     |
/// | `mm`   | month number, two digits         |
/// | `M`    | short month name                 |
/// | `MM`   | full month name                  |
/// | `yy`   | last two digits of the year      |
/// | `yyyy` | full year, at least four digits  |
///
/// Tokens are matched greedily and anything else is copied as-is, so
/// `"dd.mm.yyyy"` gives `17.02.2015` and `"MM-yyyy"` gives `February-2015`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateFormat {
    pattern: String,
    parts: Vec<Part>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Part {
    Field(Field),
    Literal(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Field {
    Day,
    DayPadded,
    WeekdayShort,
    WeekdayFull,
    Month,
    MonthPadded,
    MonthShort,
    MonthFull,
    YearShort,
    Year,
}

// Longest tokens first so that matching is greedy
static TOKENS: &[(&str, Field)] = &[
    ("yyyy", Field::Year),
    ("yy", Field::YearShort),
    ("dd", Field::DayPadded),
    ("d", Field::Day),
    ("DD", Field::WeekdayFull),
    ("D", Field::WeekdayShort),
    ("mm", Field::MonthPadded),
    ("m", Field::Month),
    ("MM", Field::MonthFull),
    ("M", Field::MonthShort),
];

impl DateFormat {
    pub fn new(pattern: &str) -> DateFormat {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;
        while let Some(ch) = rest.chars().next() {
            if let Some(&(token, field)) = TOKENS.iter().find(|(t, _)| rest.starts_with(t)) {
                if !literal.is_empty() {
                    parts.push(Part::Literal(std::mem::take(&mut literal)));
                }
                parts.push(Part::Field(field));
                rest = &rest[token.len()..];
            } else {
                literal.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        DateFormat {
            pattern: pattern.to_owned(),
            parts,
        }
    }

    /// `yyyy-mm-dd`
    pub fn iso() -> DateFormat {
        DateFormat::new("yyyy-mm-dd")
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, date: CalendarDate, locale: &Locale) -> String {
        self.display(date, locale).to_string()
    }

    pub fn display<'a>(&'a self, date: CalendarDate, locale: &'a Locale) -> FormattedDate<'a> {
        FormattedDate {
            format: self,
            date,
            locale,
        }
    }

    /// Read a date written in this pattern.  Weekday names must be valid for
    /// `locale` but do not affect the result.  A missing day or month defaults
    /// to 1; a missing year is an error.  Two-digit years are taken to be in
    /// 2000 through 2099.
    pub fn parse(&self, input: &str, locale: &Locale) -> Result<CalendarDate, ParseDateError> {
        let mismatch = || ParseDateError::Pattern {
            input: input.to_owned(),
            pattern: self.pattern.clone(),
        };
        let mut rest = input;
        let mut year = None;
        let mut month = 1;
        let mut day = 1;
        for part in &self.parts {
            match part {
                Part::Literal(lit) => {
                    rest = rest.strip_prefix(lit.as_str()).ok_or_else(mismatch)?;
                }
                Part::Field(Field::Day | Field::DayPadded) => {
                    (day, rest) = take_number(rest, 2).ok_or_else(mismatch)?;
                }
                Part::Field(Field::Month | Field::MonthPadded) => {
                    (month, rest) = take_number(rest, 2).ok_or_else(mismatch)?;
                }
                Part::Field(Field::MonthShort) => {
                    let (n, r) = take_name(rest, &locale.months_short).ok_or_else(mismatch)?;
                    (month, rest) = (n + 1, r);
                }
                Part::Field(Field::MonthFull) => {
                    let (n, r) = take_name(rest, &locale.months).ok_or_else(mismatch)?;
                    (month, rest) = (n + 1, r);
                }
                Part::Field(Field::WeekdayShort) => {
                    (_, rest) = take_name(rest, &locale.days_short).ok_or_else(mismatch)?;
                }
                Part::Field(Field::WeekdayFull) => {
                    (_, rest) = take_name(rest, &locale.days).ok_or_else(mismatch)?;
                }
                Part::Field(Field::YearShort) => {
                    let (n, r) = take_number(rest, 2).ok_or_else(mismatch)?;
                    (year, rest) = (Some(2000 + i32::from(n)), r);
                }
                Part::Field(Field::Year) => {
                    let (negative, r) = match rest.strip_prefix('-') {
                        Some(r) => (true, r),
                        None => (false, rest),
                    };
                    let (n, r) = take_year(r).ok_or_else(mismatch)?;
                    (year, rest) = (Some(if negative { -n } else { n }), r);
                }
            }
        }
        if !rest.is_empty() {
            return Err(mismatch());
        }
        let year = year.ok_or_else(mismatch)?;
        CalendarDate::from_ymd(year, month, day)
    }
}

/// A date rendered through a [`DateFormat`]
#[derive(Clone, Copy, Debug)]
pub struct FormattedDate<'a> {
    format: &'a DateFormat,
    date: CalendarDate,
    locale: &'a Locale,
}

impl fmt::Display for FormattedDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date;
        for part in &self.format.parts {
            match part {
                Part::Literal(s) => write!(f, "{s}")?,
                Part::Field(field) => write_field(f, *field, date, self.locale)?,
            }
        }
        Ok(())
    }
}

fn write_field(
    f: &mut fmt::Formatter<'_>,
    field: Field,
    date: CalendarDate,
    locale: &Locale,
) -> fmt::Result {
    let month: Month = date.month();
    match field {
        Field::Day => write!(f, "{}", date.day()),
        Field::DayPadded => write!(f, "{:02}", date.day()),
        Field::WeekdayShort => write!(f, "{}", locale.day_name_short(date.weekday())),
        Field::WeekdayFull => write!(f, "{}", locale.day_name(date.weekday())),
        Field::Month => write!(f, "{}", u8::from(month)),
        Field::MonthPadded => write!(f, "{:02}", u8::from(month)),
        Field::MonthShort => write!(f, "{}", locale.month_name_short(month)),
        Field::MonthFull => write!(f, "{}", locale.month_name(month)),
        Field::YearShort => write!(f, "{:02}", date.year().rem_euclid(100)),
        Field::Year => {
            let year = date.year();
            if year < 0 {
                write!(f, "-")?;
            }
            write!(f, "{:04}", year.unsigned_abs())
        }
    }
}

/// Read one to `max_digits` ASCII digits
fn take_number(s: &str, max_digits: usize) -> Option<(u8, &str)> {
    let len = s
        .bytes()
        .take(max_digits)
        .take_while(u8::is_ascii_digit)
        .count();
    if len == 0 {
        return None;
    }
    let (digits, rest) = s.split_at(len);
    Some((digits.parse().ok()?, rest))
}

/// Read one to four ASCII digits
fn take_year(s: &str) -> Option<(i32, &str)> {
    let len = s.bytes().take(4).take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let (digits, rest) = s.split_at(len);
    Some((digits.parse().ok()?, rest))
}

/// Match the longest of `names` at the start of `s`, ignoring case, and return
/// its index
fn take_name<'s>(s: &'s str, names: &[String]) -> Option<(u8, &'s str)> {
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .filter_map(|(i, name)| {
            let head = s.get(..name.len())?;
            (head.to_lowercase() == name.to_lowercase()).then_some((i, name.len()))
        })
        .max_by_key(|&(_, len)| len)
        .and_then(|(i, len)| Some((u8::try_from(i).ok()?, &s[len..])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn feb17() -> CalendarDate {
        CalendarDate::from(date!(2015 - 02 - 17))
    }

    #[test]
    fn test_format_numeric() {
        let en = Locale::english();
        assert_eq!(DateFormat::new("dd.mm.yyyy").format(feb17(), &en), "17.02.2015");
        assert_eq!(DateFormat::new("mm/dd/yyyy").format(feb17(), &en), "02/17/2015");
        assert_eq!(DateFormat::new("d/m/yy").format(feb17(), &en), "17/2/15");
        let jan5 = CalendarDate::from(date!(2009 - 01 - 05));
        assert_eq!(DateFormat::new("d/m/yy").format(jan5, &en), "5/1/09");
        assert_eq!(DateFormat::iso().format(jan5, &en), "2009-01-05");
    }

    #[test]
    fn test_format_names() {
        let en = Locale::english();
        assert_eq!(DateFormat::new("MM-yyyy").format(feb17(), &en), "February-2015");
        assert_eq!(DateFormat::new("DD, M d").format(feb17(), &en), "Tuesday, Feb 17");
        let uk = Locale::ukrainian();
        assert_eq!(DateFormat::new("MM yyyy").format(feb17(), &uk), "Лютий 2015");
        assert_eq!(DateFormat::new("D dd.mm").format(feb17(), &uk), "Втр 17.02");
    }

    #[test]
    fn test_greedy_tokens() {
        let en = Locale::english();
        assert_eq!(DateFormat::new("ddd").format(feb17(), &en), "1717");
        assert_eq!(DateFormat::new("yyy").format(feb17(), &en), "15y");
        assert_eq!(DateFormat::new("[yyyy]").format(feb17(), &en), "[2015]");
    }

    #[test]
    fn test_parse_numeric() {
        let uk = Locale::ukrainian();
        let fmt = DateFormat::new(&uk.format);
        assert_eq!(fmt.parse("17.02.2015", &uk), Ok(feb17()));
        assert_eq!(fmt.parse("17.2.2015", &uk), Ok(feb17()));
        assert!(fmt.parse("17-02-2015", &uk).is_err());
        assert!(fmt.parse("17.02.2015x", &uk).is_err());
        assert!(matches!(
            fmt.parse("30.02.2015", &uk),
            Err(ParseDateError::Component(_))
        ));
    }

    #[test]
    fn test_parse_names() {
        let en = Locale::english();
        assert_eq!(
            DateFormat::new("DD, MM d yyyy").parse("tuesday, february 17 2015", &en),
            Ok(feb17())
        );
        assert_eq!(
            DateFormat::new("MM-yyyy").parse("February-2015", &en),
            Ok(CalendarDate::from(date!(2015 - 02 - 01)))
        );
        let uk = Locale::ukrainian();
        assert_eq!(
            DateFormat::new("d M yy").parse("17 Лют 15", &uk),
            Ok(feb17())
        );
        assert!(DateFormat::new("MM yyyy").parse("Lyutyi 2015", &uk).is_err());
    }

    #[test]
    fn test_parse_requires_year() {
        let en = Locale::english();
        assert_eq!(
            DateFormat::new("dd/mm").parse("17/02", &en),
            Err(ParseDateError::Pattern {
                input: String::from("17/02"),
                pattern: String::from("dd/mm"),
            })
        );
    }

    #[test]
    fn test_longest_name_wins() {
        let mut en = Locale::english();
        en.months_short[5] = String::from("Ju");
        assert_eq!(
            DateFormat::new("M yyyy").parse("Jul 2015", &en),
            Ok(CalendarDate::from(date!(2015 - 07 - 01)))
        );
        assert_eq!(
            DateFormat::new("M yyyy").parse("Ju 2015", &en),
            Ok(CalendarDate::from(date!(2015 - 06 - 01)))
        );
    }
}
