use crate::error::PickerError;
use time::{
    Date,
    Month::{self, *},
};

/// The months of the year in order
pub const MONTHS: [Month; 12] = [
    January, February, March, April, May, June, July, August, September, October, November,
    December,
];

/// An optional, inclusive `[from_date, to_date]` window of selectable dates.
///
/// Either bound may be absent, in which case the range is open-ended in that
/// direction.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DateRange {
    from: Option<Date>,
    to: Option<Date>,
}

impl DateRange {
    pub const UNBOUNDED: DateRange = DateRange {
        from: None,
        to: None,
    };

    pub fn new(from: Option<Date>, to: Option<Date>) -> Result<DateRange, PickerError> {
        if let (Some(from_date), Some(to_date)) = (from, to) {
            if from_date > to_date {
                return Err(PickerError::FromAfterTo { from_date, to_date });
            }
        }
        Ok(DateRange { from, to })
    }

    pub fn from_date(&self) -> Option<Date> {
        self.from
    }

    pub fn to_date(&self) -> Option<Date> {
        self.to
    }

    /// Returns whether `date` is selectable
    pub fn contains(&self, date: Date) -> bool {
        self.from.is_none_or(|from| from <= date) && self.to.is_none_or(|to| date <= to)
    }

    /// Returns the date in the range closest to `date`
    pub fn clamp(&self, date: Date) -> Date {
        match (self.from, self.to) {
            (Some(from), _) if date < from => from,
            (_, Some(to)) if date > to => to,
            _ => date,
        }
    }

    /// Returns whether `month` of `year` can be picked in the month view.
    ///
    /// A month is valid when its first day is in range.  When both bounds
    /// are present and `year` is neither bound's year, every month of a year
    /// strictly between the bounds is valid and every month of a year outside
    /// them is not.
    pub fn is_valid_month(&self, year: i32, month: Month) -> bool {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from.year() != year && to.year() != year {
                return from.year() < year && year < to.year();
            }
        }
        first_of_month(year, month).is_some_and(|d| self.contains(d))
    }

    /// Returns whether the month before `month` of `year` has any day on or
    /// after the lower bound
    pub fn has_previous(&self, year: i32, month: Month) -> bool {
        let Some(from) = self.from else {
            return true;
        };
        let (year, month) = previous_month(year, month);
        last_of_month(year, month).is_some_and(|d| d >= from)
    }

    /// Returns whether the month after `month` of `year` has any day on or
    /// before the upper bound
    pub fn has_next(&self, year: i32, month: Month) -> bool {
        let Some(to) = self.to else {
            return true;
        };
        let (year, month) = next_month(year, month);
        first_of_month(year, month).is_some_and(|d| d <= to)
    }

    /// Returns `false` if both bounds lie in the same calendar year, in which
    /// case there is no year to choose
    pub fn has_year_selection(&self) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from.year() != to.year(),
            _ => true,
        }
    }
}

pub(crate) fn previous_month(year: i32, month: Month) -> (i32, Month) {
    if month == January {
        (year.saturating_sub(1), December)
    } else {
        (year, month.previous())
    }
}

pub(crate) fn next_month(year: i32, month: Month) -> (i32, Month) {
    if month == December {
        (year.saturating_add(1), January)
    } else {
        (year, month.next())
    }
}

pub(crate) fn first_of_month(year: i32, month: Month) -> Option<Date> {
    Date::from_calendar_date(year, month, 1).ok()
}

pub(crate) fn last_of_month(year: i32, month: Month) -> Option<Date> {
    if month == December {
        Date::from_calendar_date(year, December, 31).ok()
    } else {
        first_of_month(year, month.next())?.previous_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn range(from: Option<Date>, to: Option<Date>) -> DateRange {
        match DateRange::new(from, to) {
            Ok(r) => r,
            Err(e) => panic!("range should be valid: {e}"),
        }
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        assert_eq!(
            DateRange::new(Some(date!(2024 - 02 - 01)), Some(date!(2024 - 01 - 31))),
            Err(PickerError::FromAfterTo {
                from_date: date!(2024 - 02 - 01),
                to_date: date!(2024 - 01 - 31),
            })
        );
    }

    #[test]
    fn test_new_accepts_single_day() {
        let r = range(Some(date!(2024 - 02 - 01)), Some(date!(2024 - 02 - 01)));
        assert!(r.contains(date!(2024 - 02 - 01)));
        assert!(!r.contains(date!(2024 - 01 - 31)));
        assert!(!r.contains(date!(2024 - 02 - 02)));
    }

    #[test]
    fn test_contains_unbounded() {
        let r = DateRange::UNBOUNDED;
        assert!(r.contains(Date::MIN));
        assert!(r.contains(date!(2024 - 01 - 15)));
        assert!(r.contains(Date::MAX));
    }

    #[test]
    fn test_contains_from_only() {
        let r = range(Some(date!(2024 - 01 - 10)), None);
        assert!(!r.contains(date!(2024 - 01 - 09)));
        assert!(r.contains(date!(2024 - 01 - 10)));
        assert!(r.contains(date!(2099 - 12 - 31)));
    }

    #[test]
    fn test_contains_to_only() {
        let r = range(None, Some(date!(2024 - 01 - 20)));
        assert!(r.contains(date!(1900 - 01 - 01)));
        assert!(r.contains(date!(2024 - 01 - 20)));
        assert!(!r.contains(date!(2024 - 01 - 21)));
    }

    #[test]
    fn test_contains_both() {
        let r = range(Some(date!(2024 - 01 - 10)), Some(date!(2024 - 01 - 20)));
        assert!(r.contains(date!(2024 - 01 - 15)));
        assert!(r.contains(date!(2024 - 01 - 10)));
        assert!(r.contains(date!(2024 - 01 - 20)));
        assert!(!r.contains(date!(2024 - 01 - 05)));
        assert!(!r.contains(date!(2024 - 01 - 25)));
    }

    #[test]
    fn test_clamp() {
        let r = range(Some(date!(2024 - 01 - 10)), Some(date!(2024 - 01 - 20)));
        assert_eq!(r.clamp(date!(2023 - 06 - 15)), date!(2024 - 01 - 10));
        assert_eq!(r.clamp(date!(2024 - 01 - 15)), date!(2024 - 01 - 15));
        assert_eq!(r.clamp(date!(2025 - 06 - 15)), date!(2024 - 01 - 20));
        assert_eq!(
            DateRange::UNBOUNDED.clamp(date!(2025 - 06 - 15)),
            date!(2025 - 06 - 15)
        );
    }

    #[test]
    fn test_valid_month_from_only() {
        let r = range(Some(date!(2024 - 03 - 01)), None);
        assert!(!r.is_valid_month(2024, February));
        assert!(r.is_valid_month(2024, March));
        assert!(r.is_valid_month(2024, December));
        assert!(r.is_valid_month(2030, January));
        assert!(!r.is_valid_month(2023, December));
    }

    #[test]
    fn test_valid_month_mid_month_from() {
        // The first of March is before the bound even though later days of
        // March are selectable
        let r = range(Some(date!(2024 - 03 - 15)), None);
        assert!(!r.is_valid_month(2024, March));
        assert!(r.is_valid_month(2024, April));
    }

    #[test]
    fn test_valid_month_to_only() {
        let r = range(None, Some(date!(2024 - 03 - 15)));
        assert!(r.is_valid_month(2024, March));
        assert!(!r.is_valid_month(2024, April));
        assert!(r.is_valid_month(1999, December));
    }

    #[test]
    fn test_valid_month_both_bounds() {
        let r = range(Some(date!(2022 - 05 - 01)), Some(date!(2024 - 08 - 31)));
        assert!(!r.is_valid_month(2022, April));
        assert!(r.is_valid_month(2022, May));
        for month in MONTHS {
            assert!(r.is_valid_month(2023, month));
        }
        assert!(r.is_valid_month(2024, August));
        assert!(!r.is_valid_month(2024, September));
    }

    #[test]
    fn test_valid_month_outside_bound_years() {
        let r = range(Some(date!(2022 - 05 - 01)), Some(date!(2024 - 08 - 31)));
        for month in MONTHS {
            assert!(!r.is_valid_month(2021, month));
            assert!(!r.is_valid_month(2025, month));
        }
    }

    #[test]
    fn test_valid_month_unbounded() {
        for month in MONTHS {
            assert!(DateRange::UNBOUNDED.is_valid_month(2024, month));
        }
    }

    #[test]
    fn test_has_previous_wraps_year() {
        let r = range(Some(date!(2023 - 12 - 31)), None);
        assert!(r.has_previous(2024, January));
        let r = range(Some(date!(2024 - 01 - 01)), None);
        assert!(!r.has_previous(2024, January));
        assert!(r.has_previous(2024, February));
    }

    #[test]
    fn test_has_previous_boundary_month() {
        let r = range(Some(date!(2024 - 02 - 29)), None);
        assert!(r.has_previous(2024, March));
        let r = range(Some(date!(2024 - 03 - 01)), None);
        assert!(!r.has_previous(2024, March));
    }

    #[test]
    fn test_has_next_wraps_year() {
        let r = range(None, Some(date!(2024 - 01 - 01)));
        assert!(r.has_next(2023, December));
        let r = range(None, Some(date!(2023 - 12 - 31)));
        assert!(!r.has_next(2023, December));
        assert!(r.has_next(2023, November));
    }

    #[test]
    fn test_unbounded_navigation() {
        assert!(DateRange::UNBOUNDED.has_previous(2024, January));
        assert!(DateRange::UNBOUNDED.has_next(2024, December));
    }

    #[test]
    fn test_has_year_selection() {
        assert!(DateRange::UNBOUNDED.has_year_selection());
        assert!(range(Some(date!(2024 - 01 - 10)), None).has_year_selection());
        assert!(range(None, Some(date!(2024 - 01 - 10))).has_year_selection());
        assert!(
            !range(Some(date!(2024 - 01 - 10)), Some(date!(2024 - 12 - 20))).has_year_selection()
        );
        assert!(
            range(Some(date!(2024 - 12 - 31)), Some(date!(2025 - 01 - 01))).has_year_selection()
        );
    }

    #[test]
    fn test_month_arithmetic() {
        assert_eq!(previous_month(2024, January), (2023, December));
        assert_eq!(previous_month(2024, July), (2024, June));
        assert_eq!(next_month(2023, December), (2024, January));
        assert_eq!(next_month(2024, July), (2024, August));
        assert_eq!(last_of_month(2024, February), Some(date!(2024 - 02 - 29)));
        assert_eq!(last_of_month(2023, February), Some(date!(2023 - 02 - 28)));
        assert_eq!(last_of_month(2023, December), Some(date!(2023 - 12 - 31)));
        assert_eq!(first_of_month(2023, December), Some(date!(2023 - 12 - 01)));
    }
}
