use super::cells::Cells;
use super::util::shift_months;
use super::{ViewGranularity, ViewState};
use crate::config::CalendarConfig;
use crate::date::{CalendarDate, DateRange};
use std::collections::BTreeSet;
use thiserror::Error;
use time::{Month, Weekday};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

/// The picked date(s).  In single mode the empty form is `None`; in multiple
/// mode it is an empty `Multiple`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selection {
    None,
    Single(CalendarDate),
    Multiple(BTreeSet<CalendarDate>),
}

impl Selection {
    pub fn empty(mode: SelectionMode) -> Selection {
        match mode {
            SelectionMode::Single => Selection::None,
            SelectionMode::Multiple => Selection::Multiple(BTreeSet::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::None => true,
            Selection::Single(_) => false,
            Selection::Multiple(dates) => dates.is_empty(),
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        match self {
            Selection::None => false,
            Selection::Single(d) => *d == date,
            Selection::Multiple(dates) => dates.contains(&date),
        }
    }

    /// Iterate over the selected dates in ascending order
    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        let (single, multiple) = match self {
            Selection::None => (None, None),
            Selection::Single(d) => (Some(*d), None),
            Selection::Multiple(dates) => (None, Some(dates)),
        };
        single
            .into_iter()
            .chain(multiple.into_iter().flatten().copied())
    }

    /// Whether any selected date falls within `range`
    pub(crate) fn intersects(&self, range: DateRange) -> bool {
        match self {
            Selection::None => false,
            Selection::Single(d) => range.contains(*d),
            Selection::Multiple(dates) => {
                range.is_valid() && dates.range(range.from..=range.to).next().is_some()
            }
        }
    }

    fn retain<F: FnMut(CalendarDate) -> bool>(&mut self, mut keep: F) {
        match self {
            Selection::None => (),
            Selection::Single(d) => {
                if !keep(*d) {
                    *self = Selection::None;
                }
            }
            Selection::Multiple(dates) => dates.retain(|&d| keep(d)),
        }
    }
}

/// The window of selectable dates.  An unset end is unbounded.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Bounds {
    pub min: Option<CalendarDate>,
    pub max: Option<CalendarDate>,
}

impl Bounds {
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Bounds {
        Bounds { min, max }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.min.is_none_or(|min| min <= date) && self.max.is_none_or(|max| date <= max)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match (self.min, self.max) {
            (Some(from), Some(to)) => check_range(DateRange { from, to }),
            _ => Ok(()),
        }
    }
}

/// Outcome of [`CalendarState::pick`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Picked {
    /// The view zoomed one level in, to the page containing the picked date
    Zoomed(ViewGranularity),
    /// The given date was selected (or, in multiple mode, toggled)
    Selected(CalendarDate),
}

/// View and selection state of a date picker.
///
/// Configuration fixed at construction (week start, selection mode, minimum
/// granularity) cannot change afterwards.  Bounds and disabled ranges can be
/// changed through explicit, validated operations.  Every fallible operation
/// either applies fully or leaves the state untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarState {
    week_start: Weekday,
    mode: SelectionMode,
    min_granularity: ViewGranularity,
    bounds: Bounds,
    disabled: Vec<DateRange>,
    view: ViewState,
    selection: Selection,
}

impl CalendarState {
    /// Build the state from `config`.  `today` is the page shown when the
    /// configuration names neither an initial date nor an initial anchor.
    pub fn new(today: CalendarDate, config: CalendarConfig) -> Result<CalendarState, ConfigError> {
        config.bounds.validate()?;
        for &range in &config.disabled_ranges {
            check_range(range)?;
        }
        let mut state = CalendarState {
            week_start: config.week_start,
            mode: config.selection_mode,
            min_granularity: config.min_granularity,
            bounds: config.bounds,
            disabled: config.disabled_ranges,
            view: ViewState {
                granularity: config.initial_granularity.max(config.min_granularity),
                anchor: config.initial_date.or(config.initial_anchor).unwrap_or(today),
            },
            selection: Selection::empty(config.selection_mode),
        };
        if let Some(date) = config.initial_date {
            state
                .select(date)
                .map_err(|_| ConfigError::InitialDate(date))?;
        }
        Ok(state)
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn min_granularity(&self) -> ViewGranularity {
        self.min_granularity
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn disabled_ranges(&self) -> &[DateRange] {
        &self.disabled
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn granularity(&self) -> ViewGranularity {
        self.view.granularity
    }

    pub fn anchor(&self) -> CalendarDate {
        self.view.anchor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.selection.iter()
    }

    pub fn is_selected(&self, date: CalendarDate) -> bool {
        self.selection.contains(date)
    }

    /// The earliest selected date
    pub fn date(&self) -> Option<CalendarDate> {
        self.selection.iter().next()
    }

    /// Month of the earliest selected date
    pub fn month(&self) -> Option<Month> {
        self.date().map(CalendarDate::month)
    }

    /// Year of the earliest selected date
    pub fn year(&self) -> Option<i32> {
        self.date().map(CalendarDate::year)
    }

    pub fn set_view_granularity(&mut self, granularity: ViewGranularity) {
        self.view.granularity = granularity;
    }

    /// Page the view by `delta` months (day view), years (month view), or
    /// decades (year view).  Bounds do not restrict navigation.
    pub fn navigate(&mut self, delta: i32) {
        let months = match self.view.granularity {
            ViewGranularity::Day => i64::from(delta),
            ViewGranularity::Month => i64::from(delta) * 12,
            ViewGranularity::Year => i64::from(delta) * 120,
        };
        self.view.anchor = shift_months(self.view.anchor.as_date(), months).into();
    }

    pub fn zoom_out(&mut self) {
        self.view.granularity = self.view.granularity.coarser();
    }

    /// Move the view to `date` without touching the selection, but only when
    /// nothing is selected yet
    pub fn set_default_view_date(&mut self, date: CalendarDate) {
        if self.selection.is_empty() {
            self.view.anchor = date;
        }
    }

    pub fn is_selectable(&self, date: CalendarDate) -> bool {
        self.bounds.contains(date) && !self.disabled.iter().any(|r| r.contains(date))
    }

    /// In single mode, replace the selection with `date`; in multiple mode,
    /// toggle whether `date` is selected
    pub fn select(&mut self, date: CalendarDate) -> Result<(), SelectionError> {
        if !self.is_selectable(date) {
            return Err(SelectionError::OutOfBounds(date));
        }
        match &mut self.selection {
            Selection::Multiple(dates) => {
                if !dates.remove(&date) {
                    dates.insert(date);
                }
            }
            sel => *sel = Selection::Single(date),
        }
        Ok(())
    }

    /// Make `date` the only selected date and show its page
    pub fn set_date(&mut self, date: CalendarDate) -> Result<(), SelectionError> {
        if !self.is_selectable(date) {
            return Err(SelectionError::OutOfBounds(date));
        }
        self.clear_selection();
        self.select(date)?;
        self.view.anchor = date;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::empty(self.mode);
    }

    /// React to the user picking the cell for `date` on the current page.
    ///
    /// Above the minimum granularity this zooms in on the cell.  Otherwise
    /// the earliest selectable day of the cell is selected, with the view
    /// granularity taken as no finer than the minimum.
    pub fn pick(&mut self, date: CalendarDate) -> Result<Picked, SelectionError> {
        let granularity = self.view.granularity;
        if granularity > self.min_granularity {
            let finer = granularity.finer();
            self.view = ViewState {
                granularity: finer,
                anchor: date,
            };
            return Ok(Picked::Zoomed(finer));
        }
        let period = match granularity.max(self.min_granularity) {
            ViewGranularity::Day => DateRange::new(date, date),
            ViewGranularity::Month => DateRange::month_of(date),
            ViewGranularity::Year => DateRange::year_of(date),
        };
        let Some(date) = self.first_selectable_in(period) else {
            return Err(SelectionError::OutOfBounds(period.from));
        };
        self.select(date)?;
        Ok(Picked::Selected(date))
    }

    /// The earliest selectable day of `period`, if any
    pub(crate) fn first_selectable_in(&self, period: DateRange) -> Option<CalendarDate> {
        let mut date = match self.bounds.min {
            Some(min) => period.from.max(min),
            None => period.from,
        };
        let last = match self.bounds.max {
            Some(max) => period.to.min(max),
            None => period.to,
        };
        while date <= last {
            // Jump past the furthest-reaching disabled range covering `date`
            let Some(end) = self
                .disabled
                .iter()
                .filter(|r| r.contains(date))
                .map(|r| r.to)
                .max()
            else {
                return Some(date);
            };
            date = end.checked_add_days(1)?;
        }
        None
    }

    /// Replace the bounds.  Selected dates outside the new bounds are
    /// deselected; disabled ranges are not reconsidered.
    pub fn set_bounds(
        &mut self,
        min: Option<CalendarDate>,
        max: Option<CalendarDate>,
    ) -> Result<(), ConfigError> {
        let bounds = Bounds { min, max };
        bounds.validate()?;
        self.bounds = bounds;
        self.selection.retain(|d| bounds.contains(d));
        Ok(())
    }

    pub fn set_start_date(&mut self, min: Option<CalendarDate>) -> Result<(), ConfigError> {
        self.set_bounds(min, self.bounds.max)
    }

    pub fn set_end_date(&mut self, max: Option<CalendarDate>) -> Result<(), ConfigError> {
        self.set_bounds(self.bounds.min, max)
    }

    /// Disable `range` for future selection.  Dates already selected stay
    /// selected.
    pub fn add_disabled_range(&mut self, range: DateRange) -> Result<(), ConfigError> {
        check_range(range)?;
        self.disabled.push(range);
        Ok(())
    }

    /// The cells of the page containing `anchor` at `granularity`
    pub fn cells_for(&self, anchor: CalendarDate, granularity: ViewGranularity) -> Cells<'_> {
        Cells::new(self, anchor, granularity)
    }

    /// The cells of the page currently on display
    pub fn cells(&self) -> Cells<'_> {
        self.cells_for(self.view.anchor, self.view.granularity)
    }
}

fn check_range(range: DateRange) -> Result<(), ConfigError> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            from: range.from,
            to: range.to,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SelectionError {
    #[error("{0} is not selectable")]
    OutOfBounds(CalendarDate),
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid date range: {from} is after {to}")]
    InvalidRange {
        from: CalendarDate,
        to: CalendarDate,
    },
    #[error("initial date {0} is not selectable")]
    InitialDate(CalendarDate),
}
