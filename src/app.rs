use crate::help::Help;
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crate::widget::{LegendView, SceneView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, read};
use heatcal::heatmap::{CalendarSession, Chart, YearGrid};
use heatcal::surface::Scene;
use ratatui::{
    DefaultTerminal,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Widget,
};
use std::io::{self, Write};

#[derive(Debug)]
pub(crate) struct App {
    session: CalendarSession<Scene>,
    /// The rollup key the charts are currently colored by
    key: Option<String>,
    /// Index of the topmost year grid on screen
    top: usize,
    state: AppState,
}

impl App {
    /// `key` must be the key that the session's charts are currently colored
    /// by
    pub(crate) fn new(session: CalendarSession<Scene>, key: Option<String>) -> App {
        App {
            session,
            key,
            top: 0,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
                KeyCode::Char('r') | KeyCode::Tab => self.next_key(),
                KeyCode::Char('R') | KeyCode::BackTab => self.previous_key(),
                KeyCode::Char('n') => {
                    self.select_key(None);
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn grids(&self) -> impl Iterator<Item = &YearGrid<Scene>> + '_ {
        self.session.charts().iter().flat_map(Chart::grids)
    }

    fn scroll_down(&mut self) -> bool {
        if self.top + 1 < self.grids().count() {
            self.top += 1;
            true
        } else {
            false
        }
    }

    fn scroll_up(&mut self) -> bool {
        if let Some(top) = self.top.checked_sub(1) {
            self.top = top;
            true
        } else {
            false
        }
    }

    /// Position of the current key among the session's rollup keys
    fn key_position(&self) -> Option<usize> {
        self.key
            .as_deref()
            .and_then(|k| self.session.rollup_keys().position(k))
    }

    fn next_key(&mut self) -> bool {
        let keys = self.session.rollup_keys();
        if keys.is_empty() {
            return false;
        }
        let i = self.key_position().map_or(0, |i| (i + 1) % keys.len());
        let key = keys.get(i).map(String::from);
        self.select_key(key);
        true
    }

    fn previous_key(&mut self) -> bool {
        let keys = self.session.rollup_keys();
        let Some(last) = keys.len().checked_sub(1) else {
            return false;
        };
        let i = self
            .key_position()
            .and_then(|i| i.checked_sub(1))
            .unwrap_or(last);
        let key = keys.get(i).map(String::from);
        self.select_key(key);
        true
    }

    fn select_key(&mut self, key: Option<String>) {
        self.session.dispatch_update(key.as_deref());
        self.key = key;
    }

    fn status(&self) -> String {
        let keys = self.session.rollup_keys();
        match (self.key.as_deref(), self.key_position()) {
            (Some(key), Some(i)) => format!(" Key: {key} ({}/{})   ?: help", i + 1, keys.len()),
            (Some(key), None) => format!(" Key: {key} (not in data)   ?: help"),
            (None, _) => String::from(" Key: none   ?: help"),
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [status_area, grids_area, legend_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Line::styled(self.status(), STATUS_STYLE).render(status_area, buf);
        let mut area = grids_area;
        for grid in self.grids().skip(self.top) {
            if area.height == 0 {
                break;
            }
            let view = SceneView::new(grid.surface(), grid.cell_size());
            let height = view.height().min(area.height);
            view.render(Rect { height, ..area }, buf);
            area.y += height;
            area.height -= height;
        }
        if let Some(legend) = self.session.legend() {
            LegendView(legend).render(legend_area, buf);
        }
        if self.state == AppState::Helping {
            Help {
                style: BASE_STYLE,
                rollup_keys: self.session.rollup_keys(),
            }
            .render(grids_area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatcal::config::Config;
    use heatcal::data::Dataset;
    use heatcal::scale::ColorScale;
    use heatcal::surface::SceneHost;
    use ratatui::style::Color;

    fn app(json: &str) -> App {
        let mut session = CalendarSession::new(Config::default());
        session.render(Dataset::from_json(json).unwrap(), &mut SceneHost);
        let key = session.rollup_keys().first().map(String::from);
        App::new(session, key)
    }

    fn render(app: &App) -> Buffer {
        let area = Rect::new(0, 0, 120, 24);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn color(value: f64) -> Color {
        let fill = ColorScale::default().color(value).unwrap();
        Color::Rgb(fill.r, fill.g, fill.b)
    }

    const RECORDS: &str = r#"{"2021-06-01": {"a": 2, "b": 4}, "2021-06-02": {"a": 6}}"#;

    // 2021-06-01 is the Tuesday of week 22.
    const JUNE_1: (u16, u16) = (6 + 2 * 22, 1 + 1 + 1);

    #[test]
    fn test_layout() {
        let app = app(r#"{"2021-01-04": 3, "2020-12-31": 1}"#);
        let buf = render(&app);
        assert!(row(&buf, 0).starts_with(" Key: none   ?: help"));
        assert!(row(&buf, 5).starts_with("2020"));
        assert!(row(&buf, 14).starts_with("2021"));
        assert!(row(&buf, 23).starts_with("      Low "));
        // 2021-01-04 is the Monday of week 1.
        assert_eq!(buf[(8, 11)].bg, color(3.0));
    }

    #[test]
    fn test_scroll() {
        let mut app = app(r#"{"2021-01-04": 3, "2020-12-31": 1}"#);
        assert!(!app.handle_key(KeyCode::Up));
        assert!(app.handle_key(KeyCode::Char('j')));
        let buf = render(&app);
        assert!(row(&buf, 5).starts_with("2021"));
        assert_eq!(buf[(8, 2)].bg, color(3.0));
        assert!(!app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Char('k')));
        assert!(row(&render(&app), 5).starts_with("2020"));
    }

    #[test]
    fn test_cycle_keys() {
        let mut app = app(RECORDS);
        assert_eq!(app.key.as_deref(), Some("a"));
        let buf = render(&app);
        assert!(row(&buf, 0).starts_with(" Key: a (1/2)"));
        assert_eq!(buf[JUNE_1].bg, color(2.0));

        assert!(app.handle_key(KeyCode::Tab));
        assert_eq!(app.key.as_deref(), Some("b"));
        let buf = render(&app);
        assert!(row(&buf, 0).starts_with(" Key: b (2/2)"));
        assert_eq!(buf[JUNE_1].bg, color(4.0));

        assert!(app.handle_key(KeyCode::Char('r')));
        assert_eq!(app.key.as_deref(), Some("a"));
        assert!(app.handle_key(KeyCode::BackTab));
        assert_eq!(app.key.as_deref(), Some("b"));
        assert!(app.handle_key(KeyCode::Char('R')));
        assert_eq!(app.key.as_deref(), Some("a"));
    }

    #[test]
    fn test_no_key() {
        let mut app = app(RECORDS);
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.key, None);
        let buf = render(&app);
        assert!(row(&buf, 0).starts_with(" Key: none"));
        assert_eq!(buf[JUNE_1].symbol(), "·");
        assert!(app.handle_key(KeyCode::Tab));
        assert_eq!(app.key.as_deref(), Some("a"));
    }

    #[test]
    fn test_cycling_without_keys() {
        let mut app = app(r#"{"2021-01-04": 3}"#);
        assert!(!app.handle_key(KeyCode::Tab));
        assert!(!app.handle_key(KeyCode::BackTab));
        assert_eq!(app.key, None);
    }

    #[test]
    fn test_unknown_key() {
        let mut session = CalendarSession::new(Config::default());
        session.render(Dataset::from_json(RECORDS).unwrap(), &mut SceneHost);
        session.dispatch_update(Some("zzz"));
        let mut app = App::new(session, Some(String::from("zzz")));
        assert!(row(&render(&app), 0).starts_with(" Key: zzz (not in data)"));
        assert!(app.handle_key(KeyCode::Tab));
        assert_eq!(app.key.as_deref(), Some("a"));
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app(RECORDS);
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        let buf = render(&app);
        assert!((0..24).any(|y| row(&buf, y).contains("Rollup keys: a, b")));
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Calendar);
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.quitting());
    }
}
