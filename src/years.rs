use crate::range::DateRange;
use std::ops::RangeInclusive;
use time::Date;

/// Number of years on a full page of the year view
pub const YEAR_PAGE_LEN: i32 = 20;

const MIN_YEAR: i32 = Date::MIN.year();
const MAX_YEAR: i32 = Date::MAX.year();

/// The span of years listed in the year view, inclusive at both ends
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearWindow {
    start: i32,
    end: i32,
}

impl YearWindow {
    /// Returns the page of years shown when the year view is opened while
    /// `year` is displayed.
    ///
    /// The page starts at the multiple of ten at or below `year - 10`, which
    /// always puts `year` in the second half or on the last decade of the
    /// page.
    pub fn around(year: i32, range: &DateRange) -> YearWindow {
        let start = year.saturating_sub(10);
        let start = start - start.rem_euclid(10);
        YearWindow {
            start,
            end: start.saturating_add(YEAR_PAGE_LEN - 1),
        }
        .clamped(range)
    }

    /// Returns the page ending the year before this one starts
    pub fn previous(self, range: &DateRange) -> YearWindow {
        let end = self.start.saturating_sub(1);
        YearWindow {
            start: end.saturating_sub(YEAR_PAGE_LEN - 1),
            end,
        }
        .clamped(range)
    }

    /// Returns the page starting the year after this one ends
    pub fn next(self, range: &DateRange) -> YearWindow {
        let start = self.end.saturating_add(1);
        YearWindow {
            start,
            end: start.saturating_add(YEAR_PAGE_LEN - 1),
        }
        .clamped(range)
    }

    /// Shrinks the window so that it does not extend past the years of the
    /// range's bounds
    pub fn clamped(self, range: &DateRange) -> YearWindow {
        let lower = range.from_date().map_or(MIN_YEAR, |d| d.year());
        let upper = range.to_date().map_or(MAX_YEAR, |d| d.year());
        YearWindow {
            start: self.start.max(lower),
            end: self.end.min(upper),
        }
    }

    pub fn has_previous(&self, range: &DateRange) -> bool {
        let lower = range.from_date().map_or(MIN_YEAR, |d| d.year());
        self.start > lower
    }

    pub fn has_next(&self, range: &DateRange) -> bool {
        let upper = range.to_date().map_or(MAX_YEAR, |d| d.year());
        self.end < upper
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    /// The years of the window in ascending order
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}
