use std::collections::BTreeMap;
use time::{Month, Weekday};

/// Display strings and calendar conventions for one language.  Only
/// `week_start` affects the calendar state; the rest is for whoever draws the
/// calendar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Locale {
    /// Full weekday names, Sunday first
    pub days: [String; 7],
    pub days_short: [String; 7],
    pub days_min: [String; 7],
    /// Full month names, January first
    pub months: [String; 12],
    pub months_short: [String; 12],
    /// Caption of the "jump to today" control
    pub today: String,
    /// Caption of the "clear selection" control
    pub clear: String,
    /// Default display pattern, in [`DateFormat`](crate::DateFormat) syntax
    pub format: String,
    pub week_start: Weekday,
}

impl Locale {
    pub fn english() -> Locale {
        Locale {
            days: strings([
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            days_short: strings(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            days_min: strings(["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]),
            months: strings([
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            months_short: strings([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            today: String::from("Today"),
            clear: String::from("Clear"),
            format: String::from("mm/dd/yyyy"),
            week_start: Weekday::Sunday,
        }
    }

    pub fn ukrainian() -> Locale {
        Locale {
            days: strings([
                "Неділя",
                "Понеділок",
                "Вівторок",
                "Середа",
                "Четвер",
                "П'ятниця",
                "Субота",
            ]),
            days_short: strings(["Нед", "Пнд", "Втр", "Срд", "Чтв", "Птн", "Суб"]),
            days_min: strings(["Нд", "Пн", "Вт", "Ср", "Чт", "Пт", "Сб"]),
            months: strings([
                "Січень",
                "Лютий",
                "Березень",
                "Квітень",
                "Травень",
                "Червень",
                "Липень",
                "Серпень",
                "Вересень",
                "Жовтень",
                "Листопад",
                "Грудень",
            ]),
            months_short: strings([
                "Січ", "Лют", "Бер", "Кві", "Тра", "Чер", "Лип", "Сер", "Вер", "Жов", "Лис", "Гру",
            ]),
            today: String::from("Сьогодні"),
            clear: String::from("Очистити"),
            format: String::from("dd.mm.yyyy"),
            week_start: Weekday::Monday,
        }
    }

    pub fn day_name(&self, weekday: Weekday) -> &str {
        &self.days[usize::from(weekday.number_days_from_sunday())]
    }

    pub fn day_name_short(&self, weekday: Weekday) -> &str {
        &self.days_short[usize::from(weekday.number_days_from_sunday())]
    }

    pub fn month_name(&self, month: Month) -> &str {
        &self.months[usize::from(u8::from(month) - 1)]
    }

    pub fn month_name_short(&self, month: Month) -> &str {
        &self.months_short[usize::from(u8::from(month) - 1)]
    }

    /// Two-letter weekday headings for a day page, starting from the locale's
    /// week start
    pub fn weekday_headings(&self) -> impl Iterator<Item = &str> + '_ {
        (0..7).map(|n| {
            let wd = self.week_start.nth_next(n);
            self.days_min[usize::from(wd.number_days_from_sunday())].as_str()
        })
    }
}

fn strings<const N: usize>(names: [&str; N]) -> [String; N] {
    names.map(String::from)
}

/// Locale tables keyed by language tag, such as `"en"` or `"uk"`
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocaleTable(BTreeMap<String, Locale>);

impl LocaleTable {
    pub fn new() -> LocaleTable {
        LocaleTable(BTreeMap::new())
    }

    /// A table holding the built-in `en` and `uk` locales
    pub fn builtin() -> LocaleTable {
        let mut table = LocaleTable::new();
        table.insert("en", Locale::english());
        table.insert("uk", Locale::ukrainian());
        table
    }

    /// Add or replace the locale for `tag`, returning the one it replaced
    pub fn insert<S: Into<String>>(&mut self, tag: S, locale: Locale) -> Option<Locale> {
        self.0.insert(tag.into(), locale)
    }

    /// Look up `tag`.  A tag with a region or script subtag that has no table
    /// of its own (`"uk-UA"`) falls back to its primary language (`"uk"`).
    pub fn get(&self, tag: &str) -> Option<&Locale> {
        self.0.get(tag).or_else(|| {
            let (primary, _) = tag.split_once(['-', '_'])?;
            self.0.get(primary)
        })
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin() {
        let table = LocaleTable::builtin();
        assert_eq!(table.tags().collect::<Vec<_>>(), ["en", "uk"]);
        let uk = table.get("uk").unwrap();
        assert_eq!(uk.week_start, Weekday::Monday);
        assert_eq!(uk.month_name(Month::March), "Березень");
        assert_eq!(uk.month_name_short(Month::December), "Гру");
        assert_eq!(uk.day_name(Weekday::Sunday), "Неділя");
        assert_eq!(uk.day_name_short(Weekday::Friday), "Птн");
    }

    #[test]
    fn test_fallback_to_primary_tag() {
        let table = LocaleTable::builtin();
        assert_eq!(table.get("uk-UA"), table.get("uk"));
        assert_eq!(table.get("en_GB"), table.get("en"));
        assert_eq!(table.get("de"), None);
        assert_eq!(table.get("de-AT"), None);
    }

    #[test]
    fn test_insert_overrides() {
        let mut table = LocaleTable::builtin();
        let mut gb = Locale::english();
        gb.week_start = Weekday::Monday;
        gb.format = String::from("dd/mm/yyyy");
        assert_eq!(table.insert("en-GB", gb.clone()), None);
        assert_eq!(table.get("en-GB"), Some(&gb));
        assert_eq!(table.get("en-US").map(|l| l.week_start), Some(Weekday::Sunday));
    }

    #[test]
    fn test_weekday_headings() {
        let uk = Locale::ukrainian();
        assert_eq!(
            uk.weekday_headings().collect::<Vec<_>>(),
            ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Нд"]
        );
        let en = Locale::english();
        assert_eq!(en.weekday_headings().next(), Some("Su"));
    }
}
