use datepick::Marks;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Style of the clickable month & year labels in the calendar header
pub(crate) const BUTTON_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

pub(crate) const DISABLED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const RANGE_LABEL_STYLE: Style = BASE_STYLE
    .fg(Color::Gray)
    .add_modifier(Modifier::BOLD);

/// Days from the adjacent months that pad out the first and last weeks
pub(crate) const FILLER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) const INVALID_MONTH_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = Style::new().fg(Color::LightGreen);

pub(crate) const SELECTED_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);

pub(crate) fn day_style(marks: Marks, in_month: bool) -> Style {
    let mut style = BASE_STYLE;
    if !in_month {
        style = style.patch(FILLER_STYLE);
    }
    style.patch(item_style(marks))
}

pub(crate) fn month_style(marks: Marks) -> Style {
    let mut style = BASE_STYLE;
    if !marks.valid {
        style = style.patch(INVALID_MONTH_STYLE);
    }
    style.patch(item_style(marks))
}

pub(crate) fn year_style(marks: Marks) -> Style {
    BASE_STYLE.patch(item_style(marks))
}

// Selection is drawn over the "today" highlight
fn item_style(marks: Marks) -> Style {
    let mut style = Style::new();
    if marks.today {
        style = style.patch(TODAY_STYLE);
    }
    if marks.selected {
        style = style.patch(SELECTED_STYLE);
    }
    style
}
