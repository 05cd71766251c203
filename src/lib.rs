//! Navigation and validity state machine for a single-date picker.
//!
//! A [`DatePicker`] shows one of three views (a day grid, a list of months,
//! or a page of years), optionally constrained to an inclusive
//! [`DateRange`].  It works out which days, months, and years may be chosen,
//! rebuilds the day grid whenever the displayed month changes, and turns
//! clicks into a confirmed date.
//!
//! The picker does no rendering and runs no timers.  Selections return a
//! [`Deferred`] effect which the host is expected to hand back to
//! [`DatePicker::resolve()`] once its delay has elapsed.
mod error;
mod grid;
mod labels;
mod picker;
mod range;
mod years;
pub use crate::error::{GridError, LabelsError, PickerError};
pub use crate::grid::{
    partition_weeks, DayCell, DayId, MonthGrid, SundayFirst, Week, DAYS_IN_WEEK,
};
pub use crate::labels::Labels;
pub use crate::picker::{
    DatePicker, Deferred, DeferredAction, Marks, PickerOptions, View, DEFAULT_CONFIRM_DELAY,
};
pub use crate::range::{DateRange, MONTHS};
pub use crate::years::{YearWindow, YEAR_PAGE_LEN};
