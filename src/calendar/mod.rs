mod cells;
mod state;
pub(crate) mod util;
pub use self::cells::{CellDescriptor, Cells};
pub use self::state::{
    Bounds, CalendarState, ConfigError, Picked, Selection, SelectionError, SelectionMode,
};
use crate::date::CalendarDate;

/// The calendar zoom level: what a single cell stands for
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ViewGranularity {
    /// Days of one month, padded to whole weeks
    Day,
    /// The twelve months of one year
    #[default]
    Month,
    /// The ten years of one decade
    Year,
}

impl ViewGranularity {
    /// The next coarser level, or `self` if already at `Year`
    pub fn coarser(self) -> ViewGranularity {
        match self {
            ViewGranularity::Day => ViewGranularity::Month,
            ViewGranularity::Month | ViewGranularity::Year => ViewGranularity::Year,
        }
    }

    /// The next finer level, or `self` if already at `Day`
    pub fn finer(self) -> ViewGranularity {
        match self {
            ViewGranularity::Day | ViewGranularity::Month => ViewGranularity::Day,
            ViewGranularity::Year => ViewGranularity::Month,
        }
    }
}

/// The page currently on display.  `anchor` is any date within the page; only
/// its month (day view), year (month view), or decade (year view) matters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ViewState {
    pub granularity: ViewGranularity,
    pub anchor: CalendarDate,
}
