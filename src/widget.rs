use crate::theme::{
    day_style, month_style, year_style, BASE_STYLE, BUTTON_STYLE, DISABLED_STYLE,
    RANGE_LABEL_STYLE, WEEKDAY_STYLE,
};
use datepick::{DatePicker, DayCell, Labels, MonthGrid, View, YearWindow, MONTHS};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Position, Rect},
    style::Style,
    text::{Span, Text},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};
use std::iter::zip;
use time::Month;

/// Width of the picker in columns
const WIDTH: u16 = 28;

/// Number of lines taken up by the picker: a header line, the weekday line,
/// and up to six weeks
const HEIGHT: u16 = 8;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Number of columns per entry in the month & year lists
const OPTION_WIDTH: u16 = 7;

const OPTIONS_PER_ROW: u16 = 4;

/// Width of the arrow & close buttons
const BUTTON_WIDTH: u16 = 3;

/// Width of the "YYYY to YYYY" label between the year paging arrows
const RANGE_WIDTH: u16 = WIDTH - 3 * BUTTON_WIDTH;

/// Something on screen that reacts to a click
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Target {
    MonthView,
    YearView,
    Previous,
    Next,
    Close,
    PreviousYears,
    NextYears,
    Day(DayCell),
    Month(Month),
    Year(i32),
}

/// The clickable areas drawn by the last render, in screen coordinates
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct HitMap(Vec<(Rect, Target)>);

impl HitMap {
    pub(crate) fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        let pos = Position::new(column, row);
        self.0
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|&(_, target)| target)
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Picker<'a, G> {
    picker: &'a DatePicker<G>,
    labels: &'a Labels,
}

impl<'a, G> Picker<'a, G> {
    pub(crate) fn new(picker: &'a DatePicker<G>, labels: &'a Labels) -> Self {
        Picker { picker, labels }
    }
}

impl<G: MonthGrid> Picker<'_, G> {
    fn draw_calendar(&self, canvas: &mut Canvas<'_>) {
        let picker = self.picker;
        let month = self.labels.month(picker.month());
        let year = picker.year().to_string();
        // The month label is cut short so that the year stays clear of the
        // arrows
        let month_width = (WIDTH - 2 * BUTTON_WIDTH - 1).saturating_sub(width_of(&year));
        canvas.clipped_button(
            0,
            0,
            month_width,
            month,
            BUTTON_STYLE,
            Some(Target::MonthView),
        );
        let x = width_of(month).min(month_width).saturating_add(1);
        canvas.button(
            0,
            x,
            &year,
            BUTTON_STYLE,
            picker.has_year_selection().then_some(Target::YearView),
        );
        if picker.has_previous() || picker.has_next() {
            canvas.button(
                0,
                WIDTH - 2 * BUTTON_WIDTH,
                " < ",
                BASE_STYLE,
                picker.has_previous().then_some(Target::Previous),
            );
            canvas.button(
                0,
                WIDTH - BUTTON_WIDTH,
                " > ",
                BASE_STYLE,
                picker.has_next().then_some(Target::Next),
            );
        }
        for (i, label) in zip(0u16.., self.labels.weekdays()) {
            canvas.mvprint(1, i * DAY_WIDTH, &format!("{label:>3.3} "), WEEKDAY_STYLE);
        }
        for (row, week) in zip(2u16.., picker.weeks()) {
            for (i, cell) in zip(0u16.., week.days()) {
                let marks = picker.day_marks(cell);
                // Out-of-range days are left blank
                if marks.valid {
                    canvas.button(
                        row,
                        i * DAY_WIDTH,
                        &format!("{:>3} ", cell.day()),
                        day_style(marks, cell.in_month()),
                        Some(Target::Day(*cell)),
                    );
                }
            }
        }
    }

    fn draw_months(&self, canvas: &mut Canvas<'_>) {
        canvas.mvprint(0, 0, &self.picker.year().to_string(), RANGE_LABEL_STYLE);
        canvas.button(0, WIDTH - BUTTON_WIDTH, " x ", BASE_STYLE, Some(Target::Close));
        let width = usize::from(OPTION_WIDTH);
        for (i, month) in zip(0u16.., MONTHS) {
            let label = self.labels.month(month);
            canvas.button(
                1 + i / OPTIONS_PER_ROW,
                (i % OPTIONS_PER_ROW) * OPTION_WIDTH,
                &format!("{label:^width$.width$}"),
                month_style(self.picker.month_marks(month)),
                Some(Target::Month(month)),
            );
        }
    }

    fn draw_years(&self, canvas: &mut Canvas<'_>, window: YearWindow) {
        let picker = self.picker;
        if picker.has_previous_years() || picker.has_next_years() {
            canvas.button(
                0,
                0,
                " < ",
                BASE_STYLE,
                picker.has_previous_years().then_some(Target::PreviousYears),
            );
            let label = format!("{} to {}", window.start(), window.end());
            let width = usize::from(RANGE_WIDTH);
            canvas.mvprint(
                0,
                BUTTON_WIDTH,
                &format!("{label:^width$}"),
                RANGE_LABEL_STYLE,
            );
            canvas.button(
                0,
                BUTTON_WIDTH + RANGE_WIDTH,
                " > ",
                BASE_STYLE,
                picker.has_next_years().then_some(Target::NextYears),
            );
        }
        canvas.button(0, WIDTH - BUTTON_WIDTH, " x ", BASE_STYLE, Some(Target::Close));
        let width = usize::from(OPTION_WIDTH);
        for (i, year) in zip(0u16.., window.years()) {
            canvas.button(
                1 + i / OPTIONS_PER_ROW,
                (i % OPTIONS_PER_ROW) * OPTION_WIDTH,
                &format!("{year:^width$}"),
                year_style(picker.year_marks(year)),
                Some(Target::Year(year)),
            );
        }
    }
}

impl<G: MonthGrid> StatefulWidget for Picker<'_, G> {
    type State = HitMap;

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        hits.0.clear();
        let [area] = Layout::horizontal([WIDTH]).flex(Flex::Center).areas(area);
        let [area] = Layout::vertical([HEIGHT]).flex(Flex::Center).areas(area);
        Clear.render(area, buf);
        Block::new().style(BASE_STYLE).render(area, buf);
        let mut canvas = Canvas::new(area, buf, hits);
        match self.picker.view() {
            View::Calendar => self.draw_calendar(&mut canvas),
            View::Month => self.draw_months(&mut canvas),
            View::Year(window) => self.draw_years(&mut canvas, window),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    hits: &'a mut HitMap,
}

impl<'a> Canvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer, hits: &'a mut HitMap) -> Self {
        Canvas { area, buf, hits }
    }
}

impl Canvas<'_> {
    // Returns the screen area that the text was drawn in, or `None` if the
    // coordinates are outside the picker
    fn mvprint(&mut self, y: u16, x: u16, s: &str, style: Style) -> Option<Rect> {
        self.clipped_print(y, x, u16::MAX, s, style)
    }

    // Like `mvprint()`, but draws at most `max_width` columns
    fn clipped_print(
        &mut self,
        y: u16,
        x: u16,
        max_width: u16,
        s: &str,
        style: Style,
    ) -> Option<Rect> {
        if y >= self.area.height || x >= self.area.width || max_width == 0 {
            return None;
        }
        let text = Text::styled(s, style);
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        // Using a Paragraph lets us truncate text that extends beyond the
        // picker's area.
        let rect = Rect {
            x: x + self.area.x,
            y: y + self.area.y,
            width: (self.area.width - x).min(width).min(max_width),
            height: 1,
        };
        Paragraph::new(text).render(rect, self.buf);
        Some(rect)
    }

    // Draws a label that reacts to clicks if `target` is set and is dimmed
    // otherwise
    fn button(&mut self, y: u16, x: u16, s: &str, style: Style, target: Option<Target>) {
        self.clipped_button(y, x, u16::MAX, s, style, target);
    }

    fn clipped_button(
        &mut self,
        y: u16,
        x: u16,
        max_width: u16,
        s: &str,
        style: Style,
        target: Option<Target>,
    ) {
        let style = if target.is_some() {
            style
        } else {
            DISABLED_STYLE
        };
        if let (Some(rect), Some(target)) = (self.clipped_print(y, x, max_width, s, style), target)
        {
            self.hits.0.push((rect, target));
        }
    }
}

fn width_of(s: &str) -> u16 {
    u16::try_from(Span::raw(s).width()).unwrap_or(u16::MAX)
}
