use crate::error::PickerError;
use crate::grid::{partition_weeks, DayCell, MonthGrid, Week};
use crate::range::{next_month, previous_month, DateRange};
use crate::years::YearWindow;
use std::time::Duration;
use time::{Date, Month};

/// Delay between a selection and the effect that completes it
pub const DEFAULT_CONFIRM_DELAY: Duration = Duration::from_millis(200);

/// The view currently shown by a [`DatePicker`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum View {
    /// Day grid of the selected month
    Calendar,
    /// List of the twelve months of the selected year
    Month,
    /// A page of years
    Year(YearWindow),
}

/// Something the picker wants done once a delay has elapsed.  The picker
/// never waits itself; the host is expected to feed the action back through
/// [`DatePicker::resolve()`] after `delay`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Deferred {
    pub delay: Duration,
    pub action: DeferredAction,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DeferredAction {
    /// Emit the given date as the user's choice
    Confirm(Date),
    /// Return to the day grid
    ShowCalendar,
}

/// Highlighting information for one day, month, or year entry
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Marks {
    pub today: bool,
    pub selected: bool,
    pub valid: bool,
}

/// Construction-time settings of a [`DatePicker`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PickerOptions {
    date: Option<Date>,
    from_date: Option<Date>,
    to_date: Option<Date>,
    confirm_delay: Duration,
}

impl PickerOptions {
    pub fn new() -> PickerOptions {
        PickerOptions::default()
    }

    /// Preselect `date`
    pub fn date(mut self, date: Date) -> PickerOptions {
        self.date = Some(date);
        self
    }

    /// Make `date` the earliest selectable date
    pub fn from_date(mut self, date: Date) -> PickerOptions {
        self.from_date = Some(date);
        self
    }

    /// Make `date` the latest selectable date
    pub fn to_date(mut self, date: Date) -> PickerOptions {
        self.to_date = Some(date);
        self
    }

    pub fn confirm_delay(mut self, delay: Duration) -> PickerOptions {
        self.confirm_delay = delay;
        self
    }
}

impl Default for PickerOptions {
    fn default() -> PickerOptions {
        PickerOptions {
            date: None,
            from_date: None,
            to_date: None,
            confirm_delay: DEFAULT_CONFIRM_DELAY,
        }
    }
}

/// Navigation and selection state of a date picker.
///
/// Every operation is synchronous.  Operations that the user could not have
/// performed in the current state (selecting an out-of-range day, paging past
/// a bound, etc.) leave the picker untouched and report `false` or `None`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatePicker<G> {
    grid: G,
    range: DateRange,
    today: Date,
    year: i32,
    month: Month,
    selected: Option<DayCell>,
    highlighted: Date,
    view: View,
    weeks: Vec<Week>,
    confirm_delay: Duration,
}

impl<G: MonthGrid> DatePicker<G> {
    pub fn new(today: Date, options: PickerOptions, grid: G) -> Result<Self, PickerError> {
        if let (Some(date), Some(from_date)) = (options.date, options.from_date) {
            if date < from_date {
                return Err(PickerError::DateBeforeFrom { date, from_date });
            }
        }
        if let (Some(date), Some(to_date)) = (options.date, options.to_date) {
            if to_date < date {
                return Err(PickerError::DateAfterTo { date, to_date });
            }
        }
        let range = DateRange::new(options.from_date, options.to_date)?;
        let initial = options
            .date
            .or(options.to_date)
            .unwrap_or_else(|| range.clamp(today));
        let weeks = partition_weeks(grid.month_grid(initial.year(), initial.month()))?;
        log::debug!("Opening date picker on {initial} with range {range:?}");
        Ok(DatePicker {
            grid,
            range,
            today,
            year: initial.year(),
            month: initial.month(),
            selected: options.date.map(|d| DayCell::new(d, true)),
            highlighted: initial,
            view: View::Calendar,
            weeks,
            confirm_delay: options.confirm_delay,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// The most recently selected day, if any
    pub fn selected(&self) -> Option<DayCell> {
        self.selected
    }

    /// The day the picker was opened on
    pub fn highlighted(&self) -> Date {
        self.highlighted
    }

    pub fn confirm_delay(&self) -> Duration {
        self.confirm_delay
    }

    pub fn is_valid_day(&self, cell: &DayCell) -> bool {
        self.range.contains(cell.date())
    }

    /// Returns whether `month` of the selected year can be picked in the
    /// month view
    pub fn is_valid_month(&self, month: Month) -> bool {
        self.range.is_valid_month(self.year, month)
    }

    pub fn has_previous(&self) -> bool {
        self.range.has_previous(self.year, self.month)
    }

    pub fn has_next(&self) -> bool {
        self.range.has_next(self.year, self.month)
    }

    pub fn has_year_selection(&self) -> bool {
        self.range.has_year_selection()
    }

    pub fn has_previous_years(&self) -> bool {
        match self.view {
            View::Year(window) => window.has_previous(&self.range),
            _ => false,
        }
    }

    pub fn has_next_years(&self) -> bool {
        match self.view {
            View::Year(window) => window.has_next(&self.range),
            _ => false,
        }
    }

    /// Move the day grid back one month
    pub fn previous(&mut self) -> bool {
        if self.view != View::Calendar || !self.has_previous() {
            return false;
        }
        let (year, month) = previous_month(self.year, self.month);
        self.show(year, month)
    }

    /// Move the day grid forwards one month
    pub fn next(&mut self) -> bool {
        if self.view != View::Calendar || !self.has_next() {
            return false;
        }
        let (year, month) = next_month(self.year, self.month);
        self.show(year, month)
    }

    pub fn show_month_view(&mut self) -> bool {
        if self.view != View::Calendar {
            return false;
        }
        log::debug!("Showing month view for {}", self.year);
        self.view = View::Month;
        true
    }

    pub fn show_year_view(&mut self) -> bool {
        if self.view != View::Calendar || !self.has_year_selection() {
            return false;
        }
        let window = YearWindow::around(self.year, &self.range);
        log::debug!(
            "Showing year view for {} to {}",
            window.start(),
            window.end()
        );
        self.view = View::Year(window);
        true
    }

    pub fn show_previous_years(&mut self) -> bool {
        match self.view {
            View::Year(window) if window.has_previous(&self.range) => {
                self.view = View::Year(window.previous(&self.range));
                true
            }
            _ => false,
        }
    }

    pub fn show_next_years(&mut self) -> bool {
        match self.view {
            View::Year(window) if window.has_next(&self.range) => {
                self.view = View::Year(window.next(&self.range));
                true
            }
            _ => false,
        }
    }

    /// Close the month or year view without choosing anything
    pub fn reset_view(&mut self) {
        self.view = View::Calendar;
    }

    /// Select a day of the grid.  The day is marked as selected at once; the
    /// returned effect confirms it.
    pub fn select_day(&mut self, cell: DayCell) -> Option<Deferred> {
        if self.view != View::Calendar || !self.is_valid_day(&cell) {
            log::debug!("Ignoring selection of {}", cell.date());
            return None;
        }
        self.selected = Some(cell);
        Some(self.defer(DeferredAction::Confirm(cell.date())))
    }

    /// Pick a month in the month view.  Months whose first day is out of
    /// range are ignored.
    pub fn select_month(&mut self, month: Month) -> Option<Deferred> {
        if self.view != View::Month || !self.is_valid_month(month) {
            log::debug!("Ignoring selection of {month} {}", self.year);
            return None;
        }
        self.show(self.year, month)
            .then(|| self.defer(DeferredAction::ShowCalendar))
    }

    /// Pick one of the years listed in the year view
    pub fn select_year(&mut self, year: i32) -> Option<Deferred> {
        let View::Year(window) = self.view else {
            return None;
        };
        if !window.contains(year) {
            log::debug!("Ignoring selection of unlisted year {year}");
            return None;
        }
        self.show(year, self.month)
            .then(|| self.defer(DeferredAction::ShowCalendar))
    }

    /// Carry out a previously returned deferred action.  Returns the
    /// confirmed date for [`DeferredAction::Confirm`].
    pub fn resolve(&mut self, action: DeferredAction) -> Option<Date> {
        match action {
            DeferredAction::Confirm(date) => {
                log::info!("Confirmed selection of {date}");
                Some(date)
            }
            DeferredAction::ShowCalendar => {
                self.view = View::Calendar;
                None
            }
        }
    }

    /// The day marked as "today": today itself, or the day the picker opened
    /// on if today cannot be picked
    pub fn today_marker(&self) -> Date {
        if self.range.contains(self.today) {
            self.today
        } else {
            self.highlighted
        }
    }

    pub fn day_marks(&self, cell: &DayCell) -> Marks {
        Marks {
            today: cell.date() == self.today_marker(),
            selected: self.selected.is_some_and(|s| s.id() == cell.id()),
            valid: self.is_valid_day(cell),
        }
    }

    pub fn month_marks(&self, month: Month) -> Marks {
        let marker = self.today_marker();
        Marks {
            today: self.year == marker.year() && month == marker.month(),
            selected: month == self.month,
            valid: self.is_valid_month(month),
        }
    }

    pub fn year_marks(&self, year: i32) -> Marks {
        Marks {
            today: year == self.today_marker().year(),
            selected: year == self.year,
            valid: true,
        }
    }

    fn defer(&self, action: DeferredAction) -> Deferred {
        Deferred {
            delay: self.confirm_delay,
            action,
        }
    }

    // Rebuilds the grid for the given month and only commits the new
    // year & month if that succeeds
    fn show(&mut self, year: i32, month: Month) -> bool {
        match partition_weeks(self.grid.month_grid(year, month)) {
            Ok(weeks) => {
                self.year = year;
                self.month = month;
                self.weeks = weeks;
                true
            }
            Err(e) => {
                log::warn!("Cannot display {month} {year}: {e}");
                false
            }
        }
    }
}
