//! Laying out and coloring calendar heat maps
use crate::calendar::{
    DAYS_IN_WEEK, GridCell, WEEK_COLUMNS, WeekStart, days_of_year, grid_cell, month_border_path,
    months_of_year, week_index, weeks_of_year,
};
use crate::config::{Config, LEGEND_HEIGHT, SUMMARY_MARGIN};
use crate::data::Dataset;
use crate::rollup::{RollupKeys, discover_rollup_keys, resolve_value};
use crate::scale::ColorScale;
use crate::summary::{WeeklySummary, weekly_summary};
use crate::surface::{Anchor, Bounds, Host, Label, RectKind, Surface, SurfaceRole, TextRole};
use std::ops::RangeInclusive;
use time::Date;

/// Horizontal position of the first legend swatch
const LEGEND_X: f64 = 50.0;

/// Vertical position of the legend swatches
const LEGEND_Y: f64 = 10.0;

const SWATCH_SIZE: f64 = 11.0;

/// Distance between the left edges of consecutive legend swatches
const SWATCH_STEP: f64 = 13.0;

/// Everything derived from a dataset that is needed to lay out and color its
/// charts
#[derive(Clone, Debug, PartialEq)]
pub struct Build {
    dataset: Dataset,
    years: Option<RangeInclusive<i32>>,
    summary: WeeklySummary,
    week_start: WeekStart,
}

impl Build {
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The years to draw a grid for, or `None` if the dataset is empty
    pub fn years(&self) -> Option<RangeInclusive<i32>> {
        self.years.clone()
    }

    pub fn summary(&self) -> &WeeklySummary {
        &self.summary
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }
}

/// A day cell and the date it is bound to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayCell<H> {
    pub date: Date,
    pub cell: GridCell,
    pub handle: H,
}

/// A weekly summary cell and the week it is bound to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeekCell<H> {
    pub year: i32,
    pub week: u8,
    /// The first day of the year in this week
    pub first_day: Date,
    pub handle: H,
}

/// The grid for a single year
#[derive(Debug)]
pub struct YearGrid<S: Surface> {
    year: i32,
    cell_size: f64,
    surface: S,
    days: Vec<DayCell<S::Handle>>,
    weeks: Vec<WeekCell<S::Handle>>,
}

impl<S: Surface> YearGrid<S> {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Side length of the cells, as configured when the grid was drawn
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn days(&self) -> &[DayCell<S::Handle>] {
        &self.days
    }

    /// The weekly summary cells; empty if the summary row was disabled
    pub fn weeks(&self) -> &[WeekCell<S::Handle>] {
        &self.weeks
    }

    fn colorize(
        &mut self,
        build: &Build,
        key: Option<&str>,
        known: &RollupKeys,
        scale: &ColorScale,
    ) {
        for day in &self.days {
            // Days without data keep their default look.
            let Some(point) = build.dataset.get(day.date) else {
                continue;
            };
            let value = resolve_value(Some(point), key, known);
            self.surface.set_fill(day.handle, scale.color(value));
            self.surface.set_title(
                day.handle,
                (!value.is_nan()).then(|| format!("{}: {value}", day.date)),
            );
        }
        for week in &self.weeks {
            let Some(aggregate) = build.summary.get(week.year, week.week) else {
                continue;
            };
            let value = resolve_value(Some(aggregate), key, known);
            self.surface.set_fill(week.handle, scale.color(value));
            self.surface.set_title(
                week.handle,
                (!value.is_nan()).then(|| format!("Week {:02}: {value:.2}", week.week)),
            );
        }
    }
}

/// Index of a chart within a [`CalendarSession`]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChartId(usize);

/// The grids drawn for one dataset, one per year
#[derive(Debug)]
pub struct Chart<S: Surface> {
    build: Build,
    grids: Vec<YearGrid<S>>,
}

impl<S: Surface> Chart<S> {
    pub fn build(&self) -> &Build {
        &self.build
    }

    pub fn grids(&self) -> &[YearGrid<S>] {
        &self.grids
    }

    fn colorize(&mut self, key: Option<&str>, known: &RollupKeys, scale: &ColorScale) {
        tracing::trace!(key, grids = self.grids.len(), "Colorizing chart");
        for grid in &mut self.grids {
            grid.colorize(&self.build, key, known, scale);
        }
    }
}

/// Draws calendar heat maps and keeps track of them so they can be recolored.
///
/// A session owns the rollup keys discovered so far (which only ever grow),
/// every chart it has drawn, and the legend, which is drawn along with the
/// first chart.
#[derive(Debug)]
pub struct CalendarSession<S: Surface> {
    config: Config,
    rollup_keys: RollupKeys,
    charts: Vec<Chart<S>>,
    legend: Option<S>,
}

impl<S: Surface> CalendarSession<S> {
    pub fn new(config: Config) -> CalendarSession<S> {
        CalendarSession {
            config,
            rollup_keys: RollupKeys::new(),
            charts: Vec::new(),
            legend: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the configuration.  Charts that have already been drawn keep
    /// their layout, but are recolored with the new color scale from the next
    /// [`CalendarSession::dispatch_update`] on.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn rollup_keys(&self) -> &RollupKeys {
        &self.rollup_keys
    }

    pub fn charts(&self) -> &[Chart<S>] {
        &self.charts
    }

    pub fn chart(&self, id: ChartId) -> Option<&Chart<S>> {
        self.charts.get(id.0)
    }

    pub fn legend(&self) -> Option<&S> {
        self.legend.as_ref()
    }

    /// Forgets all charts, rollup keys, and the legend
    pub fn reset(&mut self) {
        self.rollup_keys = RollupKeys::new();
        self.charts.clear();
        self.legend = None;
    }

    /// Derives the year range and weekly summary of `dataset`, adding any new
    /// rollup keys it contains to the session's
    pub fn build(&mut self, dataset: Dataset) -> Build {
        tracing::debug!(entries = dataset.len(), "Building calendar");
        self.rollup_keys = discover_rollup_keys(&dataset, &self.rollup_keys);
        tracing::debug!(rollup_keys = ?self.rollup_keys, "Discovered rollup keys");
        let week_start = self.config.week_start();
        let summary = weekly_summary(&dataset, week_start, &self.rollup_keys);
        tracing::debug!(weeks = summary.len(), "Computed weekly summary");
        Build {
            years: dataset.year_range(),
            dataset,
            summary,
            week_start,
        }
    }

    /// Builds and draws the charts for `dataset`
    pub fn render<H>(&mut self, dataset: Dataset, host: &mut H) -> ChartId
    where
        H: Host<Surface = S>,
    {
        let build = self.build(dataset);
        self.render_build(build, host)
    }

    /// Draws one grid per year of `build`, plus the legend if this session
    /// has not drawn it yet, then colors the grids by the first rollup key
    pub fn render_build<H>(&mut self, build: Build, host: &mut H) -> ChartId
    where
        H: Host<Surface = S>,
    {
        let grids = build
            .years()
            .into_iter()
            .flatten()
            .map(|year| self.draw_year(&build, year, host))
            .collect::<Vec<_>>();
        tracing::debug!(grids = grids.len(), "Drew calendar grids");
        if self.legend.is_none() {
            self.legend = Some(self.draw_legend(host));
        }
        let id = ChartId(self.charts.len());
        let mut chart = Chart { build, grids };
        chart.colorize(
            self.rollup_keys.first(),
            &self.rollup_keys,
            self.config.color_scale(),
        );
        self.charts.push(chart);
        id
    }

    /// Recolors one chart by `key`.  Cells without a value lose their fill;
    /// nothing moves.
    pub fn colorize(&mut self, id: ChartId, key: Option<&str>) {
        if let Some(chart) = self.charts.get_mut(id.0) {
            chart.colorize(key, &self.rollup_keys, self.config.color_scale());
        }
    }

    /// Recolors every chart drawn so far by `key`, in the order they were
    /// drawn.  `None` colors scalar data and leaves records uncolored.
    pub fn dispatch_update(&mut self, key: Option<&str>) {
        tracing::debug!(key, charts = self.charts.len(), "Recoloring charts");
        for chart in &mut self.charts {
            chart.colorize(key, &self.rollup_keys, self.config.color_scale());
        }
    }

    fn draw_year<H>(&self, build: &Build, year: i32, host: &mut H) -> YearGrid<S>
    where
        H: Host<Surface = S>,
    {
        let config = &self.config;
        let week_start = build.week_start;
        let cell = config.cell_size();
        let rows = f64::from(DAYS_IN_WEEK);
        let mut surface = host.create_surface(
            SurfaceRole::Chart { year },
            config.width(),
            config.chart_height(),
        );
        surface.set_origin(
            (config.width() - cell * f64::from(WEEK_COLUMNS)) / 2.0 + 20.0,
            config.height() - cell * rows - 1.0,
        );
        surface.text(Label {
            x: -26.0,
            y: cell * 3.5,
            anchor: Anchor::Middle,
            role: TextRole::Year,
            content: year.to_string(),
        });
        let mut y = cell;
        for name in config.labels().weekdays(week_start) {
            surface.text(Label {
                x: -10.0,
                y,
                anchor: Anchor::Middle,
                role: TextRole::Weekday,
                content: name.to_owned(),
            });
            y += cell;
        }
        let days = days_of_year(year)
            .map(|date| {
                let gc = grid_cell(date, week_start);
                let bounds = Bounds::square(
                    f64::from(gc.week) * cell,
                    f64::from(gc.weekday) * cell,
                    cell,
                );
                DayCell {
                    date,
                    cell: gc,
                    handle: surface.rect(bounds, RectKind::Day),
                }
            })
            .collect::<Vec<_>>();
        let weeks = if config.weekly_summary() {
            weeks_of_year(year, week_start)
                .map(|first_day| {
                    let week = week_index(first_day, week_start);
                    let bounds =
                        Bounds::square(f64::from(week) * cell, rows * cell + SUMMARY_MARGIN, cell);
                    WeekCell {
                        year,
                        week,
                        first_day,
                        handle: surface.rect(bounds, RectKind::Week),
                    }
                })
                .collect::<Vec<_>>()
        } else {
            Vec::new()
        };
        for (first, name) in months_of_year(year).zip(&config.labels().month) {
            surface.path(&month_border_path(first, cell, week_start));
            surface.text(Label {
                x: (f64::from(week_index(first, week_start)) + 3.0) * cell,
                y: -5.0,
                anchor: Anchor::End,
                role: TextRole::Month,
                content: name.clone(),
            });
        }
        YearGrid {
            year,
            cell_size: cell,
            surface,
            days,
            weeks,
        }
    }

    fn draw_legend<H>(&self, host: &mut H) -> S
    where
        H: Host<Surface = S>,
    {
        let [low, high] = &self.config.labels().legend;
        let mut surface = host.create_surface(SurfaceRole::Legend, self.config.width(), LEGEND_HEIGHT);
        surface.text(Label {
            x: LEGEND_X - 35.0,
            y: LEGEND_Y + 10.0,
            anchor: Anchor::Start,
            role: TextRole::Legend,
            content: low.clone(),
        });
        let mut x = LEGEND_X;
        for &color in self.config.color_scale().palette() {
            let swatch = surface.rect(
                Bounds {
                    x,
                    y: LEGEND_Y,
                    width: SWATCH_SIZE,
                    height: SWATCH_SIZE,
                },
                RectKind::Swatch,
            );
            surface.set_fill(swatch, Some(color));
            x += SWATCH_STEP;
        }
        surface.text(Label {
            x: x + 5.0,
            y: LEGEND_Y + 10.0,
            anchor: Anchor::Start,
            role: TextRole::Legend,
            content: high.clone(),
        });
        surface
    }
}
