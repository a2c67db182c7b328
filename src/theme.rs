use heatcal::scale::Rgb;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const YEAR_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const MONTH_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const LEGEND_STYLE: Style = BASE_STYLE;

pub(crate) const STATUS_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Gray);

/// Cells with no value
pub(crate) const EMPTY_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// Style for a cell filled with `fill`
pub(crate) fn fill_style(fill: Rgb) -> Style {
    BASE_STYLE.bg(Color::Rgb(fill.r, fill.g, fill.b))
}
