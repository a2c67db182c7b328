use crate::theme::{
    EMPTY_CELL_STYLE, LEGEND_STYLE, MONTH_STYLE, WEEKDAY_STYLE, YEAR_STYLE, fill_style,
};
use heatcal::surface::{Anchor, Bounds, Item, Label, Scene, Shape, TextRole};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Number of columns per grid cell
const CELL_WIDTH: i32 = 2;

/// Number of columns to the left of the grid, in which the year and weekday
/// labels are written
const LEFT_MARGIN: i32 = 6;

/// Number of lines above the grid, used for the month labels
const TOP_MARGIN: i32 = 1;

/// Blank lines below each grid
const BOTTOM_MARGIN: i32 = 1;

const FILLED_CELL: &str = "  ";
const EMPTY_CELL: &str = "· ";

/// Draws a chart [`Scene`] on a character grid, mapping each cell of the
/// scene to [`CELL_WIDTH`] columns of one line.  Month borders are not drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SceneView<'a> {
    scene: &'a Scene,
    cell_size: f64,
}

impl<'a> SceneView<'a> {
    pub(crate) fn new(scene: &'a Scene, cell_size: f64) -> SceneView<'a> {
        SceneView { scene, cell_size }
    }

    /// Number of lines needed to show the whole scene
    pub(crate) fn height(&self) -> u16 {
        let rows = self
            .scene
            .items()
            .iter()
            .filter_map(|item| match item.shape {
                Shape::Rect { bounds, .. } => Some(self.line(bounds.y) + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        u16::try_from(TOP_MARGIN + rows + BOTTOM_MARGIN).unwrap_or(u16::MAX)
    }

    fn line(&self, y: f64) -> i32 {
        to_int((y / self.cell_size).floor())
    }

    fn column(&self, x: f64) -> i32 {
        to_int((x * f64::from(CELL_WIDTH) / self.cell_size).floor())
    }

    fn draw_cell(&self, canvas: &mut BufferCanvas<'_>, bounds: Bounds, item: &Item) {
        let (s, style) = cell_look(item);
        canvas.mvprint(
            TOP_MARGIN + self.line(bounds.y),
            LEFT_MARGIN + self.column(bounds.x),
            s,
            style,
        );
    }

    fn draw_label(&self, canvas: &mut BufferCanvas<'_>, label: &Label) {
        // Text sits on its baseline, so it belongs to the line above.
        let y = TOP_MARGIN + to_int((label.y / self.cell_size).ceil()) - 1;
        let width = i32::try_from(label.content.chars().count()).unwrap_or(i32::MAX);
        let x = LEFT_MARGIN + self.column(label.x);
        let x = match label.anchor {
            Anchor::Start => x,
            Anchor::Middle => x - width / 2,
            Anchor::End => x - width,
        };
        canvas.mvprint(y, x, &label.content, label_style(label.role));
    }
}

impl Widget for SceneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = BufferCanvas::new(area, buf);
        for item in self.scene.items() {
            match &item.shape {
                Shape::Rect { bounds, .. } => self.draw_cell(&mut canvas, *bounds, item),
                Shape::Text(label) => self.draw_label(&mut canvas, label),
                Shape::Path(_) => (),
            }
        }
    }
}

/// Draws the legend [`Scene`] on a single line, laying its items out one
/// after another
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LegendView<'a>(pub(crate) &'a Scene);

impl Widget for LegendView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = BufferCanvas::new(area, buf);
        let mut x = LEFT_MARGIN;
        for item in self.0.items() {
            match &item.shape {
                Shape::Text(label) => {
                    canvas.mvprint(0, x, &label.content, LEGEND_STYLE);
                    let width = i32::try_from(label.content.chars().count()).unwrap_or(i32::MAX);
                    x = x.saturating_add(width).saturating_add(1);
                }
                Shape::Rect { .. } => {
                    let (s, style) = cell_look(item);
                    canvas.mvprint(0, x, s, style);
                    x = x.saturating_add(CELL_WIDTH);
                }
                Shape::Path(_) => (),
            }
        }
    }
}

fn cell_look(item: &Item) -> (&'static str, Style) {
    match item.fill {
        Some(fill) => (FILLED_CELL, fill_style(fill)),
        None => (EMPTY_CELL, EMPTY_CELL_STYLE),
    }
}

fn label_style(role: TextRole) -> Style {
    match role {
        TextRole::Year => YEAR_STYLE,
        TextRole::Weekday => WEEKDAY_STYLE,
        TextRole::Month => MONTH_STYLE,
        TextRole::Legend => LEGEND_STYLE,
    }
}

/// Largest distance from the origin, in lines or columns, that a scene
/// coordinate is converted to.  Anything further out is off any buffer.
const COORD_LIMIT: f64 = 65535.0;

/// Converts a whole number of lines or columns to an integer.  Values beyond
/// [`COORD_LIMIT`] are clamped to it, which keeps the margin arithmetic done
/// on the result from overflowing, and NaN becomes 0.
#[allow(clippy::cast_possible_truncation)]
fn to_int(v: f64) -> i32 {
    if v.is_nan() {
        return 0;
    }
    // Clamped to well within `i32`, so the cast is exact for whole numbers.
    v.clamp(-COORD_LIMIT, COORD_LIMIT) as i32
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    /// Prints `s` starting at line `y` and column `x` of the area, dropping
    /// whatever falls outside of it
    fn mvprint(&mut self, y: i32, x: i32, s: &str, style: Style) {
        let Ok(y) = u16::try_from(y) else {
            return;
        };
        if y >= self.area.height {
            return;
        }
        for (ch, x) in s.chars().zip(x..) {
            let Ok(x) = u16::try_from(x) else {
                continue;
            };
            if x >= self.area.width {
                break;
            }
            self.buf[(x + self.area.x, y + self.area.y)]
                .set_char(ch)
                .set_style(style);
        }
    }
}
