use crate::calendar::{Bounds, SelectionMode, ViewGranularity};
use crate::date::{CalendarDate, DateRange};
use crate::locale::Locale;
use time::Weekday;

/// Construction-time options for a [`CalendarState`](crate::CalendarState).
///
/// Nothing is validated until the state is built; see
/// [`CalendarState::new`](crate::CalendarState::new).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarConfig {
    pub(crate) week_start: Weekday,
    pub(crate) bounds: Bounds,
    pub(crate) disabled_ranges: Vec<DateRange>,
    pub(crate) selection_mode: SelectionMode,
    pub(crate) initial_granularity: ViewGranularity,
    pub(crate) min_granularity: ViewGranularity,
    pub(crate) initial_anchor: Option<CalendarDate>,
    pub(crate) initial_date: Option<CalendarDate>,
}

impl CalendarConfig {
    /// Weeks start on Monday, nothing is bounded or disabled, one date can be
    /// selected, and the view opens on (and picks at) month granularity.
    pub fn new() -> CalendarConfig {
        CalendarConfig {
            week_start: Weekday::Monday,
            bounds: Bounds::new(None, None),
            disabled_ranges: Vec::new(),
            selection_mode: SelectionMode::Single,
            initial_granularity: ViewGranularity::Month,
            min_granularity: ViewGranularity::Month,
            initial_anchor: None,
            initial_date: None,
        }
    }

    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Take the week start from a locale table
    pub fn locale(self, locale: &Locale) -> Self {
        self.week_start(locale.week_start)
    }

    pub fn bounds(mut self, min: Option<CalendarDate>, max: Option<CalendarDate>) -> Self {
        self.bounds = Bounds::new(min, max);
        self
    }

    /// Earliest selectable date
    pub fn start_date(mut self, date: CalendarDate) -> Self {
        self.bounds.min = Some(date);
        self
    }

    /// Latest selectable date
    pub fn end_date(mut self, date: CalendarDate) -> Self {
        self.bounds.max = Some(date);
        self
    }

    pub fn disabled_range(mut self, range: DateRange) -> Self {
        self.disabled_ranges.push(range);
        self
    }

    pub fn disabled_ranges<I: IntoIterator<Item = DateRange>>(mut self, ranges: I) -> Self {
        self.disabled_ranges.extend(ranges);
        self
    }

    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// The view to open on.  A level finer than the minimum granularity is
    /// raised to the minimum.
    pub fn initial_granularity(mut self, granularity: ViewGranularity) -> Self {
        self.initial_granularity = granularity;
        self
    }

    /// The finest level at which picking a cell selects it rather than
    /// zooming in
    pub fn min_granularity(mut self, granularity: ViewGranularity) -> Self {
        self.min_granularity = granularity;
        self
    }

    /// The page to show when no initial date is set
    pub fn initial_anchor(mut self, date: CalendarDate) -> Self {
        self.initial_anchor = Some(date);
        self
    }

    /// A date to select (and show) from the start
    pub fn initial_date(mut self, date: CalendarDate) -> Self {
        self.initial_date = Some(date);
        self
    }
}

impl Default for CalendarConfig {
    fn default() -> CalendarConfig {
        CalendarConfig::new()
    }
}
