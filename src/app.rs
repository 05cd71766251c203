use crate::schedule::Deferrals;
use crate::theme::BASE_STYLE;
use crate::widget::{HitMap, Picker, Target};
use crossterm::event::{
    poll, read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use datepick::{DatePicker, Labels, MonthGrid, View};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use time::Date;

/// How long to wait for input when no deferred action is pending
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<G> {
    picker: DatePicker<G>,
    labels: Labels,
    hits: HitMap,
    pending: Deferrals,
    state: AppState,
}

impl<G: MonthGrid> App<G> {
    pub(crate) fn new(picker: DatePicker<G>, labels: Labels) -> App<G> {
        App {
            picker,
            labels,
            hits: HitMap::default(),
            pending: Deferrals::new(),
            state: AppState::Running,
        }
    }

    /// Runs the picker until the user confirms a date or quits.  Returns the
    /// confirmed date, if any.
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<Option<Date>>
    where
        io::Error: From<B::Error>,
    {
        while self.state == AppState::Running {
            self.draw(&mut terminal)?;
            let timeout = self
                .pending
                .time_until_due(Instant::now())
                .unwrap_or(IDLE_TIMEOUT);
            if poll(timeout)? {
                self.handle_event(&read()?)?;
            }
            self.fire_due(Instant::now());
        }
        Ok(match self.state {
            AppState::Confirmed(date) => Some(date),
            _ => None,
        })
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = *event
        {
            if !self.handle_click(column, row, Instant::now()) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => {
                self.state = AppState::Quitting;
                true
            }
            KeyCode::Esc => {
                if self.picker.view() == View::Calendar {
                    self.state = AppState::Quitting;
                } else {
                    self.picker.reset_view();
                }
                true
            }
            _ => false,
        }
    }

    // Returns `false` if the click did not do anything
    fn handle_click(&mut self, column: u16, row: u16, now: Instant) -> bool {
        let Some(target) = self.hits.target_at(column, row) else {
            return false;
        };
        log::debug!("Clicked {target:?}");
        let deferred = match target {
            Target::MonthView => return self.picker.show_month_view(),
            Target::YearView => return self.picker.show_year_view(),
            Target::Previous => return self.picker.previous(),
            Target::Next => return self.picker.next(),
            Target::PreviousYears => return self.picker.show_previous_years(),
            Target::NextYears => return self.picker.show_next_years(),
            Target::Close => {
                self.picker.reset_view();
                return true;
            }
            Target::Day(cell) => self.picker.select_day(cell),
            Target::Month(month) => self.picker.select_month(month),
            Target::Year(year) => self.picker.select_year(year),
        };
        let Some(deferred) = deferred else {
            return false;
        };
        self.pending.schedule(now, deferred);
        true
    }

    fn fire_due(&mut self, now: Instant) {
        for action in self.pending.take_due(now) {
            if let Some(date) = self.picker.resolve(action) {
                self.state = AppState::Confirmed(date);
                break;
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }
}

impl<G: MonthGrid> Widget for &mut App<G> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Picker::new(&self.picker, &self.labels).render(area, buf, &mut self.hits);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Running,
    Quitting,
    Confirmed(Date),
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepick::{PickerOptions, SundayFirst};
    use time::{macros::date, Month};

    fn app(options: PickerOptions) -> App<SundayFirst> {
        match DatePicker::new(date!(2023 - 06 - 15), options, SundayFirst) {
            Ok(p) => App::new(p, Labels::default()),
            Err(e) => panic!("picker should construct: {e}"),
        }
    }

    fn render(app: &mut App<SundayFirst>) {
        let area = Rect::new(0, 0, 28, 8);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
    }

    #[test]
    fn test_click_day_confirms_after_delay() {
        let mut app = app(PickerOptions::new());
        render(&mut app);
        let start = Instant::now();
        assert!(app.handle_click(17, 4, start));
        assert_eq!(
            app.picker.selected().map(|c| c.date()),
            Some(date!(2023 - 06 - 15))
        );
        app.fire_due(start + Duration::from_millis(100));
        assert_eq!(app.state, AppState::Running);
        app.fire_due(start + Duration::from_millis(200));
        assert_eq!(app.state, AppState::Confirmed(date!(2023 - 06 - 15)));
    }

    #[test]
    fn test_click_nothing() {
        let mut app = app(PickerOptions::new());
        render(&mut app);
        assert!(!app.handle_click(10, 0, Instant::now()));
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_click_invalid_day() {
        let mut app = app(
            PickerOptions::new()
                .from_date(date!(2024 - 01 - 10))
                .to_date(date!(2024 - 01 - 20)),
        );
        render(&mut app);
        // Blank cell for 2024-01-08
        assert!(!app.handle_click(5, 3, Instant::now()));
        assert_eq!(app.picker.selected(), None);
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_pick_month() {
        let mut app = app(PickerOptions::new());
        render(&mut app);
        let start = Instant::now();
        assert!(app.handle_click(1, 0, start));
        assert_eq!(app.picker.view(), View::Month);
        render(&mut app);
        assert!(app.handle_click(15, 1, start));
        assert_eq!(app.picker.month(), Month::March);
        assert_eq!(app.picker.view(), View::Month);
        app.fire_due(start + Duration::from_millis(200));
        assert_eq!(app.picker.view(), View::Calendar);
        assert_eq!(app.state, AppState::Running);
    }

    #[test]
    fn test_pick_year() {
        let mut app = app(PickerOptions::new());
        render(&mut app);
        let start = Instant::now();
        assert!(app.handle_click(5, 0, start));
        assert!(matches!(app.picker.view(), View::Year(_)));
        render(&mut app);
        assert!(app.handle_click(1, 0, start));
        render(&mut app);
        // Now showing 1990 to 2009
        assert!(app.handle_click(8, 2, start));
        assert_eq!(app.picker.year(), 1995);
        app.fire_due(start + Duration::from_millis(200));
        assert_eq!(app.picker.view(), View::Calendar);
        assert_eq!(app.picker.month(), Month::June);
    }

    #[test]
    fn test_close_button() {
        let mut app = app(PickerOptions::new());
        render(&mut app);
        assert!(app.handle_click(1, 0, Instant::now()));
        render(&mut app);
        assert!(app.handle_click(26, 0, Instant::now()));
        assert_eq!(app.picker.view(), View::Calendar);
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_month_arrows() {
        let mut app = app(PickerOptions::new());
        render(&mut app);
        assert!(app.handle_click(23, 0, Instant::now()));
        assert_eq!(app.picker.month(), Month::May);
        render(&mut app);
        assert!(app.handle_click(26, 0, Instant::now()));
        assert!(app.handle_click(26, 0, Instant::now()));
        assert_eq!(app.picker.month(), Month::July);
    }

    #[test]
    fn test_escape() {
        let mut app = app(PickerOptions::new());
        assert!(app.picker.show_year_view());
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.picker.view(), View::Calendar);
        assert_eq!(app.state, AppState::Running);
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_other_keys_rejected() {
        let mut app = app(PickerOptions::new());
        assert!(!app.handle_key(KeyCode::Left));
        assert!(!app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Running);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert_eq!(app.state, AppState::Quitting);
    }
}
