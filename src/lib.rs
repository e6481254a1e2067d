//! View and selection state for calendar date pickers.
//!
//! [`CalendarState`] tracks which page of a calendar is on display (a month of
//! days, a year of months, or a decade of years), which dates are selected,
//! and which dates may be selected at all.  It produces the cells of any page
//! through [`CalendarState::cells_for`] and leaves drawing them to the caller.
mod calendar;
mod config;
mod date;
mod format;
mod locale;
pub use crate::calendar::{
    Bounds, CalendarState, CellDescriptor, Cells, ConfigError, Picked, Selection, SelectionError,
    SelectionMode, ViewGranularity, ViewState,
};
pub use crate::config::CalendarConfig;
pub use crate::date::{format_iso, CalendarDate, DateRange, ParseDateError};
pub use crate::format::{DateFormat, FormattedDate};
pub use crate::locale::{Locale, LocaleTable};
