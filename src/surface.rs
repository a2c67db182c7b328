//! The drawing interface the calendar renders through, and a retained
//! implementation of it
use crate::calendar::PathSegment;
use crate::scale::Rgb;
use std::fmt;

/// What a surface is created for, so a host can decide where to attach it
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SurfaceRole {
    Chart { year: i32 },
    Legend,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn square(x: f64, y: f64, side: f64) -> Bounds {
        Bounds {
            x,
            y,
            width: side,
            height: side,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RectKind {
    Day,
    Week,
    Swatch,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextRole {
    Year,
    Weekday,
    Month,
    Legend,
}

/// Which point of a text's extent its `x` coordinate refers to
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// A piece of text positioned at its baseline
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub anchor: Anchor,
    pub role: TextRole,
    pub content: String,
}

/// A drawing surface for one chart or for the legend.
///
/// Every primitive drawn returns a handle through which its fill and tooltip
/// can later be changed.  Styling beyond fills (fonts, strokes, text
/// placement tweaks) is up to the implementation, keyed on [`RectKind`] and
/// [`TextRole`].
pub trait Surface {
    type Handle: Copy + fmt::Debug;

    /// Sets the point that the coordinates of subsequent primitives are
    /// relative to
    fn set_origin(&mut self, x: f64, y: f64);

    fn rect(&mut self, bounds: Bounds, kind: RectKind) -> Self::Handle;

    fn path(&mut self, segments: &[PathSegment]) -> Self::Handle;

    fn text(&mut self, label: Label) -> Self::Handle;

    /// Sets or, with `None`, clears the fill of a primitive
    fn set_fill(&mut self, handle: Self::Handle, fill: Option<Rgb>);

    /// Sets or, with `None`, clears the tooltip of a primitive
    fn set_title(&mut self, handle: Self::Handle, title: Option<String>);
}

/// Creates surfaces and attaches them wherever they are to be shown
pub trait Host {
    type Surface: Surface;

    fn create_surface(&mut self, role: SurfaceRole, width: f64, height: f64) -> Self::Surface;
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { bounds: Bounds, kind: RectKind },
    Path(Vec<PathSegment>),
    Text(Label),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub shape: Shape,
    pub fill: Option<Rgb>,
    pub title: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ItemId(usize);

/// A [`Surface`] that records everything drawn on it
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    role: SurfaceRole,
    width: f64,
    height: f64,
    origin: (f64, f64),
    items: Vec<Item>,
}

impl Scene {
    pub fn new(role: SurfaceRole, width: f64, height: f64) -> Scene {
        Scene {
            role,
            width,
            height,
            origin: (0.0, 0.0),
            items: Vec::new(),
        }
    }

    pub fn role(&self) -> SurfaceRole {
        self.role
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    fn push(&mut self, shape: Shape) -> ItemId {
        let id = ItemId(self.items.len());
        self.items.push(Item {
            shape,
            fill: None,
            title: None,
        });
        id
    }
}

impl Surface for Scene {
    type Handle = ItemId;

    fn set_origin(&mut self, x: f64, y: f64) {
        self.origin = (x, y);
    }

    fn rect(&mut self, bounds: Bounds, kind: RectKind) -> ItemId {
        self.push(Shape::Rect { bounds, kind })
    }

    fn path(&mut self, segments: &[PathSegment]) -> ItemId {
        self.push(Shape::Path(segments.to_vec()))
    }

    fn text(&mut self, label: Label) -> ItemId {
        self.push(Shape::Text(label))
    }

    fn set_fill(&mut self, handle: ItemId, fill: Option<Rgb>) {
        if let Some(item) = self.items.get_mut(handle.0) {
            item.fill = fill;
        }
    }

    fn set_title(&mut self, handle: ItemId, title: Option<String>) {
        if let Some(item) = self.items.get_mut(handle.0) {
            item.title = title;
        }
    }
}

/// Creates [`Scene`]s
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SceneHost;

impl Host for SceneHost {
    type Surface = Scene;

    fn create_surface(&mut self, role: SurfaceRole, width: f64, height: f64) -> Scene {
        Scene::new(role, width, height)
    }
}
