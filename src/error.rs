use thiserror::Error;
use time::Date;

/// Error returned when a [`DatePicker`](crate::DatePicker) cannot be
/// constructed from the given options
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum PickerError {
    #[error("invalid date input: date {date} must be same or later than from date {from_date}")]
    DateBeforeFrom { date: Date, from_date: Date },
    #[error("invalid date input: date {date} must be same or earlier than to date {to_date}")]
    DateAfterTo { date: Date, to_date: Date },
    #[error(
        "invalid date input: from date {from_date} must be earlier than or equal to to date {to_date}"
    )]
    FromAfterTo { from_date: Date, to_date: Date },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Error returned when a sequence of day cells cannot be split into whole
/// weeks
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("day grid has {len} cells, which is not a positive multiple of 7")]
pub struct GridError {
    pub len: usize,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum LabelsError {
    #[error("expected 12 month labels, got {0}")]
    Months(usize),
    #[error("expected 7 weekday labels, got {0}")]
    Weekdays(usize),
}
