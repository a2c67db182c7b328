//! Chart configuration
use crate::calendar::WeekStart;
use crate::scale::ColorScale;
use serde::Deserialize;

/// Width of each chart
pub const DEFAULT_WIDTH: f64 = 960.0;

/// Height of each chart, not counting the weekly summary row or the bottom
/// padding
pub const DEFAULT_HEIGHT: f64 = 136.0;

/// Side length of one day cell
pub const DEFAULT_CELL_SIZE: f64 = 17.0;

/// Gap between the last weekday row and the weekly summary row
pub const SUMMARY_MARGIN: f64 = 4.0;

/// Space below each chart
pub const PADDING_BOTTOM: f64 = 20.0;

/// Height of the legend
pub const LEGEND_HEIGHT: f64 = 40.0;

/// Text shown on the charts and legend
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Labels {
    /// Weekday names, Monday first
    pub day: [String; 7],
    pub month: [String; 12],
    /// Captions for the low and high ends of the legend
    pub legend: [String; 2],
}

impl Labels {
    /// Returns `overrides` applied on top of the default labels.  Each
    /// category that is present replaces the default one in full.
    pub fn with_overrides(overrides: LabelOverrides) -> Labels {
        let defaults = Labels::default();
        Labels {
            day: overrides.day.unwrap_or(defaults.day),
            month: overrides.month.unwrap_or(defaults.month),
            legend: overrides.legend.unwrap_or(defaults.legend),
        }
    }

    /// Weekday names in grid row order
    pub fn weekdays(&self, week_start: WeekStart) -> Vec<&str> {
        let mut days = self.day.iter().map(String::as_str).collect::<Vec<_>>();
        if week_start == WeekStart::Sunday {
            days.rotate_right(1);
        }
        days
    }
}

impl Default for Labels {
    fn default() -> Labels {
        Labels {
            day: ["M", "T", "W", "T", "F", "S", "S"].map(String::from),
            month: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]
            .map(String::from),
            legend: ["Low", "High"].map(String::from),
        }
    }
}

/// Replacement labels, e.g. as read from a JSON file
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LabelOverrides {
    #[serde(default)]
    pub day: Option<[String; 7]>,
    #[serde(default)]
    pub month: Option<[String; 12]>,
    #[serde(default)]
    pub legend: Option<[String; 2]>,
}

/// Layout and styling settings for a calendar.  Settings are fixed once a
/// chart has been rendered with them; the `with_*` methods return a modified
/// copy for use in later renders.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    week_start: WeekStart,
    weekly_summary: bool,
    width: f64,
    height: f64,
    cell_size: f64,
    color_scale: ColorScale,
    labels: Labels,
}

impl Config {
    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn weekly_summary(&self) -> bool {
        self.weekly_summary
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn color_scale(&self) -> &ColorScale {
        &self.color_scale
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn with_week_start(self, week_start: WeekStart) -> Config {
        Config { week_start, ..self }
    }

    pub fn with_weekly_summary(self, weekly_summary: bool) -> Config {
        Config {
            weekly_summary,
            ..self
        }
    }

    pub fn with_width(self, width: f64) -> Config {
        Config { width, ..self }
    }

    pub fn with_height(self, height: f64) -> Config {
        Config { height, ..self }
    }

    pub fn with_cell_size(self, cell_size: f64) -> Config {
        Config { cell_size, ..self }
    }

    pub fn with_color_scale(self, color_scale: ColorScale) -> Config {
        Config {
            color_scale,
            ..self
        }
    }

    /// Sets the labels to the defaults overlaid with `overrides`
    pub fn with_labels(self, overrides: LabelOverrides) -> Config {
        Config {
            labels: Labels::with_overrides(overrides),
            ..self
        }
    }

    /// Total height of one year's chart
    pub fn chart_height(&self) -> f64 {
        let summary = if self.weekly_summary {
            self.cell_size + SUMMARY_MARGIN
        } else {
            0.0
        };
        self.height + summary + PADDING_BOTTOM
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            week_start: WeekStart::Monday,
            weekly_summary: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            color_scale: ColorScale::default(),
            labels: Labels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekdays_monday_first() {
        let labels = Labels::default();
        assert_eq!(
            labels.weekdays(WeekStart::Monday),
            ["M", "T", "W", "T", "F", "S", "S"]
        );
    }

    #[test]
    fn test_weekdays_sunday_first() {
        let labels = Labels::with_overrides(LabelOverrides {
            day: Some(["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"].map(String::from)),
            ..LabelOverrides::default()
        });
        assert_eq!(
            labels.weekdays(WeekStart::Sunday),
            ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
        );
        // Storage order is unaffected.
        assert_eq!(labels.day[0], "Mo");
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let overrides = serde_json::from_str::<LabelOverrides>(r#"{"legend": ["Less", "More"]}"#)
            .unwrap();
        let labels = Labels::with_overrides(overrides);
        assert_eq!(labels.legend, ["Less", "More"]);
        assert_eq!(labels.month, Labels::default().month);
        assert_eq!(labels.day, Labels::default().day);
    }

    #[test]
    fn test_with_labels_starts_from_defaults() {
        let config = Config::default()
            .with_labels(LabelOverrides {
                legend: Some(["Less", "More"].map(String::from)),
                ..LabelOverrides::default()
            })
            .with_labels(LabelOverrides {
                month: Some(
                    [
                        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct",
                        "nov", "dec",
                    ]
                    .map(String::from),
                ),
                ..LabelOverrides::default()
            });
        assert_eq!(config.labels().legend, ["Low", "High"]);
        assert_eq!(config.labels().month[0], "jan");
    }

    #[test]
    fn test_overrides_must_be_complete() {
        assert!(serde_json::from_str::<LabelOverrides>(r#"{"legend": ["Less"]}"#).is_err());
        assert!(serde_json::from_str::<LabelOverrides>(r#"{"colour": []}"#).is_err());
    }

    #[test]
    fn test_with_methods_leave_base_alone() {
        let base = Config::default();
        let changed = base
            .clone()
            .with_week_start(WeekStart::Sunday)
            .with_weekly_summary(true)
            .with_cell_size(10.0);
        assert_eq!(base.week_start(), WeekStart::Monday);
        assert!(!base.weekly_summary());
        assert_eq!(changed.week_start(), WeekStart::Sunday);
        assert!(changed.weekly_summary());
        assert_eq!(changed.cell_size(), 10.0);
        assert_eq!(changed.width(), base.width());
    }

    #[test]
    fn test_chart_height() {
        let config = Config::default();
        assert_eq!(config.chart_height(), 156.0);
        assert_eq!(config.with_weekly_summary(true).chart_height(), 177.0);
    }
}
