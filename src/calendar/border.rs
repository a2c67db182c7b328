use super::{DAYS_IN_WEEK, WeekStart, grid_cell, last_day_of_month};
use std::fmt::Write;
use time::Date;

/// One step of an outline, in absolute surface coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    HorizontalTo(f64),
    VerticalTo(f64),
    Close,
}

/// Returns the closed outline around the cells of the month starting on
/// `first`.
///
/// The outline starts at the top right corner of the first day, runs down the
/// left edge of the first week and along the bottom of the grid to the last
/// week, climbs around the last day, then returns along the top of the grid.
/// When the month neither starts nor ends on a row boundary, both ends of the
/// outline are stepped.
pub fn month_border_path(first: Date, cell_size: f64, week_start: WeekStart) -> Vec<PathSegment> {
    let start = grid_cell(first, week_start);
    let end = grid_cell(last_day_of_month(first), week_start);
    let (w0, d0) = (f64::from(start.week), f64::from(start.weekday));
    let (w1, d1) = (f64::from(end.week), f64::from(end.weekday));
    let rows = f64::from(DAYS_IN_WEEK);
    vec![
        PathSegment::MoveTo {
            x: (w0 + 1.0) * cell_size,
            y: d0 * cell_size,
        },
        PathSegment::HorizontalTo(w0 * cell_size),
        PathSegment::VerticalTo(rows * cell_size),
        PathSegment::HorizontalTo(w1 * cell_size),
        PathSegment::VerticalTo((d1 + 1.0) * cell_size),
        PathSegment::HorizontalTo((w1 + 1.0) * cell_size),
        PathSegment::VerticalTo(0.0),
        PathSegment::HorizontalTo((w0 + 1.0) * cell_size),
        PathSegment::Close,
    ]
}

/// Renders an outline as the value of an SVG `d` attribute
pub fn svg_path_data(segments: &[PathSegment]) -> String {
    let mut d = String::new();
    for seg in segments {
        // Writing to a String cannot fail.
        let _ = match seg {
            PathSegment::MoveTo { x, y } => write!(d, "M{x},{y}"),
            PathSegment::HorizontalTo(x) => write!(d, "H{x}"),
            PathSegment::VerticalTo(y) => write!(d, "V{y}"),
            PathSegment::Close => write!(d, "Z"),
        };
    }
    d
}
