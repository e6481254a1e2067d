use super::state::CalendarState;
use super::util::{
    decade_start, days_in_month, WeekdayExt, DAYS_IN_WEEK, MONTHS_IN_YEAR, YEARS_IN_DECADE,
};
use super::ViewGranularity;
use crate::date::{CalendarDate, DateRange};
use std::iter::FusedIterator;
use time::{Date, Month::January};

/// One cell of a calendar page, as handed to the presentation layer
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CellDescriptor {
    /// The day itself, or the first day of the month/year the cell stands for
    pub date: CalendarDate,
    pub is_selected: bool,
    pub is_selectable: bool,
    /// Set on the padding days that a day view borrows from the neighbouring
    /// months to complete its first and last weeks
    pub is_outside_current_page: bool,
}

/// Iterator over the cells of one calendar page, in display order.
///
/// Day pages start on the configured week start and always hold whole weeks.
/// Month pages hold the 12 months of a year, year pages the 10 years of a
/// decade, with no padding from neighbouring pages.  The cells depend only on
/// the state, so calling [`CalendarState::cells_for`] again repeats the pass.
#[derive(Clone, Debug)]
pub struct Cells<'a> {
    state: &'a CalendarState,
    page: Page,
    next: u16,
    len: u16,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Page {
    Days { first: CalendarDate, leading: u8 },
    Months { year: i32 },
    Years { first_year: i32 },
}

impl<'a> Cells<'a> {
    pub(super) fn new(
        state: &'a CalendarState,
        anchor: CalendarDate,
        granularity: ViewGranularity,
    ) -> Self {
        let (page, len) = match granularity {
            ViewGranularity::Day => {
                let first = anchor.first_of_month();
                let leading = first.weekday().days_since(state.week_start());
                let used =
                    u16::from(leading) + u16::from(days_in_month(first.year(), first.month()));
                let week = u16::from(DAYS_IN_WEEK);
                (Page::Days { first, leading }, used.div_ceil(week) * week)
            }
            ViewGranularity::Month => (
                Page::Months {
                    year: anchor.year(),
                },
                u16::from(MONTHS_IN_YEAR),
            ),
            ViewGranularity::Year => (
                Page::Years {
                    first_year: decade_start(anchor.year()),
                },
                u16::from(YEARS_IN_DECADE),
            ),
        };
        Cells {
            state,
            page,
            next: 0,
            len,
        }
    }

    // Returns `None` for cells whose date cannot be represented, which only
    // happens on pages at the very ends of time
    fn cell(&self, i: u16) -> Option<CellDescriptor> {
        match self.page {
            Page::Days { first, leading } => {
                let date = first.checked_add_days(i64::from(i) - i64::from(leading))?;
                Some(CellDescriptor {
                    date,
                    is_selected: self.state.is_selected(date),
                    is_selectable: self.state.is_selectable(date),
                    is_outside_current_page: (date.year(), date.month())
                        != (first.year(), first.month()),
                })
            }
            Page::Months { year } => {
                let month = January.nth_next(u8::try_from(i).ok()?);
                let date = CalendarDate::from(Date::from_calendar_date(year, month, 1).ok()?);
                Some(self.period_cell(date, DateRange::month_of(date)))
            }
            Page::Years { first_year } => {
                let date = Date::from_calendar_date(first_year + i32::from(i), January, 1).ok()?;
                let date = CalendarDate::from(date);
                Some(self.period_cell(date, DateRange::year_of(date)))
            }
        }
    }

    fn period_cell(&self, date: CalendarDate, period: DateRange) -> CellDescriptor {
        CellDescriptor {
            date,
            is_selected: self.state.selection().intersects(period),
            is_selectable: self.state.first_selectable_in(period).is_some(),
            is_outside_current_page: false,
        }
    }
}

impl Iterator for Cells<'_> {
    type Item = CellDescriptor;

    fn next(&mut self) -> Option<CellDescriptor> {
        while self.next < self.len {
            let i = self.next;
            self.next += 1;
            if let Some(cell) = self.cell(i) {
                return Some(cell);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(usize::from(self.len - self.next)))
    }
}

impl FusedIterator for Cells<'_> {}
