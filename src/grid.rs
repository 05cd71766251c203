use crate::error::GridError;
use std::iter::successors;
use time::{Date, Month, Weekday};

pub const DAYS_IN_WEEK: usize = 7;

trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

/// Stable identity of a day cell, used to compare a selection against the
/// cells of a freshly built grid
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DayId(i32);

impl From<Date> for DayId {
    fn from(date: Date) -> DayId {
        DayId(date.to_julian_day())
    }
}

/// One entry of the day grid.  Cells with `in_month() == false` are filler
/// days from the adjacent months that complete the first and last weeks.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DayCell {
    date: Date,
    in_month: bool,
}

impl DayCell {
    pub fn new(date: Date, in_month: bool) -> DayCell {
        DayCell { date, in_month }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    /// Day of the month
    pub fn day(&self) -> u8 {
        self.date.day()
    }

    pub fn id(&self) -> DayId {
        DayId::from(self.date)
    }

    pub fn in_month(&self) -> bool {
        self.in_month
    }
}

/// Provider of the day cells shown for a month.
///
/// Implementations must return the cells in display order, and the number of
/// cells must be a positive multiple of [`DAYS_IN_WEEK`].
pub trait MonthGrid {
    fn month_grid(&self, year: i32, month: Month) -> Vec<DayCell>;
}

impl<T: MonthGrid + ?Sized> MonthGrid for &T {
    fn month_grid(&self, year: i32, month: Month) -> Vec<DayCell> {
        (**self).month_grid(year, month)
    }
}

/// Month grid with weeks running from Sunday to Saturday
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SundayFirst;

impl MonthGrid for SundayFirst {
    fn month_grid(&self, year: i32, month: Month) -> Vec<DayCell> {
        let Ok(first) = Date::from_calendar_date(year, month, 1) else {
            return Vec::new();
        };
        let lead = first.weekday().index0();
        let mut cells = iter_days_before(first)
            .take(lead)
            .map(|d| DayCell::new(d, false))
            .collect::<Vec<_>>();
        cells.reverse();
        for d in successors(Some(first), |d| d.next_day()) {
            let in_month = d.month() == month;
            if !in_month && cells.len() % DAYS_IN_WEEK == 0 {
                break;
            }
            cells.push(DayCell::new(d, in_month));
        }
        cells
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Week([DayCell; DAYS_IN_WEEK]);

impl Week {
    pub fn days(&self) -> &[DayCell; DAYS_IN_WEEK] {
        &self.0
    }

    pub fn contains(&self, date: Date) -> bool {
        self.0.iter().any(|cell| cell.date == date)
    }
}

/// Splits a flat sequence of day cells into consecutive weeks, preserving
/// order
pub fn partition_weeks(cells: Vec<DayCell>) -> Result<Vec<Week>, GridError> {
    let err = GridError { len: cells.len() };
    if cells.is_empty() || cells.len() % DAYS_IN_WEEK != 0 {
        return Err(err);
    }
    cells
        .chunks_exact(DAYS_IN_WEEK)
        .map(|chunk| chunk.try_into().map(Week))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| err)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::*;

    fn dates(week: &Week) -> Vec<Date> {
        week.days().iter().map(DayCell::date).collect()
    }

    #[test]
    fn test_sunday_first_five_weeks() {
        let cells = SundayFirst.month_grid(2023, June);
        assert_eq!(cells.len(), 35);
        assert_eq!(cells[0], DayCell::new(date!(2023 - 05 - 28), false));
        assert_eq!(cells[3], DayCell::new(date!(2023 - 05 - 31), false));
        assert_eq!(cells[4], DayCell::new(date!(2023 - 06 - 01), true));
        assert_eq!(cells[33], DayCell::new(date!(2023 - 06 - 30), true));
        assert_eq!(cells[34], DayCell::new(date!(2023 - 07 - 01), false));
        assert_eq!(cells.iter().filter(|c| c.in_month()).count(), 30);
    }

    #[test]
    fn test_sunday_first_four_weeks() {
        // 2015-02-01 is a Sunday and February 2015 has 28 days
        let cells = SundayFirst.month_grid(2015, February);
        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(DayCell::in_month));
        assert_eq!(cells[0].date(), date!(2015 - 02 - 01));
        assert_eq!(cells[27].date(), date!(2015 - 02 - 28));
    }

    #[test]
    fn test_sunday_first_six_weeks() {
        // 2023-07-01 is a Saturday
        let cells = SundayFirst.month_grid(2023, July);
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[0].date(), date!(2023 - 06 - 25));
        assert_eq!(cells[6], DayCell::new(date!(2023 - 07 - 01), true));
        assert_eq!(cells[41], DayCell::new(date!(2023 - 08 - 05), false));
    }

    #[test]
    fn test_sunday_first_consecutive() {
        let cells = SundayFirst.month_grid(2024, February);
        for pair in cells.windows(2) {
            assert_eq!(pair[0].date().next_day(), Some(pair[1].date()));
        }
        assert_eq!(cells.iter().filter(|c| c.in_month()).count(), 29);
    }

    #[test]
    fn test_sunday_first_unrepresentable_month() {
        assert!(SundayFirst.month_grid(100_000, January).is_empty());
    }

    #[test]
    fn test_partition_preserves_order() {
        let cells = successors(Some(date!(2024 - 01 - 03)), |d| d.next_day())
            .take(14)
            .map(|d| DayCell::new(d, d.day() % 2 == 0))
            .collect::<Vec<_>>();
        let weeks = partition_weeks(cells.clone()).expect("14 cells make two weeks");
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].days().as_slice(), &cells[..7]);
        assert_eq!(weeks[1].days().as_slice(), &cells[7..]);
        assert_eq!(
            dates(&weeks[1]),
            vec![
                date!(2024 - 01 - 10),
                date!(2024 - 01 - 11),
                date!(2024 - 01 - 12),
                date!(2024 - 01 - 13),
                date!(2024 - 01 - 14),
                date!(2024 - 01 - 15),
                date!(2024 - 01 - 16),
            ]
        );
    }

    #[test]
    fn test_partition_ragged() {
        let cells = successors(Some(date!(2024 - 01 - 01)), |d| d.next_day())
            .take(13)
            .map(|d| DayCell::new(d, true))
            .collect::<Vec<_>>();
        assert_eq!(partition_weeks(cells), Err(GridError { len: 13 }));
    }

    #[test]
    fn test_partition_empty() {
        assert_eq!(partition_weeks(Vec::new()), Err(GridError { len: 0 }));
    }

    #[test]
    fn test_day_identity() {
        let a = DayCell::new(date!(2024 - 01 - 31), true);
        let b = DayCell::new(date!(2024 - 01 - 31), false);
        assert_eq!(a.id(), b.id());
        assert_eq!(a.day(), 31);
        assert!(a.id() < DayCell::new(date!(2024 - 02 - 01), false).id());
    }

    #[test]
    fn test_week_contains() {
        let weeks = partition_weeks(SundayFirst.month_grid(2023, June))
            .expect("June 2023 should split into weeks");
        assert!(weeks[0].contains(date!(2023 - 05 - 28)));
        assert!(weeks[2].contains(date!(2023 - 06 - 15)));
        assert!(!weeks[2].contains(date!(2023 - 06 - 18)));
    }
}
