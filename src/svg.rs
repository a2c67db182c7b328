//! SVG serialization of [`Scene`]s
use crate::calendar::svg_path_data;
use crate::surface::{Anchor, Item, RectKind, Scene, Shape, TextRole};
use std::fmt;

/// Fill of day and week cells that have no value
const EMPTY_FILL: &str = "#fff8";
const CELL_STROKE: &str = "#ccc";
const BORDER_STROKE: &str = "#000";
const LABEL_FILL: &str = "#aaa";
const TEXT_FILL: &str = "#000";

/// Displays a scene as an `<svg>` element
#[derive(Clone, Copy, Debug)]
pub struct Svg<'a>(pub &'a Scene);

impl fmt::Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="sans-serif" font-size="14">"#,
            scene.width(),
            scene.height()
        )?;
        let (x, y) = scene.origin();
        writeln!(f, r#"<g transform="translate({x},{y})">"#)?;
        for item in scene.items() {
            write_item(f, item)?;
        }
        writeln!(f, "</g>")?;
        writeln!(f, "</svg>")
    }
}

fn write_item(f: &mut fmt::Formatter<'_>, item: &Item) -> fmt::Result {
    match &item.shape {
        Shape::Rect { bounds, kind } => {
            let (class, fill, stroke) = match kind {
                RectKind::Day => ("rect-day", item.fill, Some(CELL_STROKE)),
                RectKind::Week => ("rect-week", item.fill, Some(CELL_STROKE)),
                RectKind::Swatch => ("swatch", item.fill, None),
            };
            write!(
                f,
                r#"<rect class="{class}" x="{}" y="{}" width="{}" height="{}""#,
                bounds.x, bounds.y, bounds.width, bounds.height
            )?;
            match fill {
                Some(rgb) => write!(f, r#" fill="{rgb}""#)?,
                None => write!(f, r#" fill="{EMPTY_FILL}""#)?,
            }
            if let Some(stroke) = stroke {
                write!(f, r#" stroke="{stroke}""#)?;
            }
            close(f, "rect", item.title.as_deref())
        }
        Shape::Path(segments) => {
            write!(
                f,
                r#"<path fill="none" stroke="{BORDER_STROKE}" d="{}""#,
                svg_path_data(segments)
            )?;
            close(f, "path", item.title.as_deref())
        }
        Shape::Text(label) => {
            let anchor = match label.anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            match label.role {
                TextRole::Year => write!(
                    f,
                    r#"<text class="label-year" transform="translate({},{})rotate(-90)" fill="{TEXT_FILL}""#,
                    label.x, label.y
                )?,
                TextRole::Weekday => write!(
                    f,
                    r#"<text class="label-day" x="{}" y="{}" dy="-.25em" fill="{LABEL_FILL}""#,
                    label.x, label.y
                )?,
                TextRole::Month => write!(
                    f,
                    r#"<text class="label-month" x="{}" y="{}" fill="{LABEL_FILL}""#,
                    label.x, label.y
                )?,
                TextRole::Legend => write!(
                    f,
                    r#"<text class="label-legend" x="{}" y="{}" fill="{TEXT_FILL}""#,
                    label.x, label.y
                )?,
            }
            write!(f, r#" text-anchor="{anchor}">{}"#, Escaped(&label.content))?;
            if let Some(title) = &item.title {
                write!(f, "<title>{}</title>", Escaped(title))?;
            }
            writeln!(f, "</text>")
        }
    }
}

fn close(f: &mut fmt::Formatter<'_>, tag: &str, title: Option<&str>) -> fmt::Result {
    match title {
        Some(title) => writeln!(f, "><title>{}</title></{tag}>", Escaped(title)),
        None => writeln!(f, "/>"),
    }
}

/// Displays a string with XML special characters escaped
#[derive(Clone, Copy, Debug)]
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

/// Returns a standalone HTML document showing every chart, one below the
/// other, followed by the legend
pub fn html_page<'a, I>(title: &str, charts: I, legend: Option<&'a Scene>) -> String
where
    I: IntoIterator<Item = &'a Scene>,
{
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<div id=\"calendar\">\n",
        Escaped(title)
    );
    for scene in charts {
        html.push_str(&Svg(scene).to_string());
    }
    html.push_str("</div>\n<div id=\"legend\">\n");
    if let Some(scene) = legend {
        html.push_str(&Svg(scene).to_string());
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::PathSegment;
    use crate::scale::Rgb;
    use crate::surface::{Bounds, Label, Surface, SurfaceRole};

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(SurfaceRole::Chart { year: 2021 }, 960.0, 156.0);
        scene.set_origin(43.5, 16.0);
        let day = scene.rect(Bounds::square(0.0, 68.0, 17.0), RectKind::Day);
        scene.set_fill(day, Some(Rgb::new(0xd9, 0xef, 0x8b)));
        scene.set_title(day, Some(String::from("2021-01-01: 3")));
        scene.rect(Bounds::square(17.0, 0.0, 17.0), RectKind::Day);
        scene.path(&[
            PathSegment::MoveTo { x: 17.0, y: 68.0 },
            PathSegment::HorizontalTo(0.0),
            PathSegment::Close,
        ]);
        scene.text(Label {
            x: 51.0,
            y: -5.0,
            anchor: Anchor::End,
            role: TextRole::Month,
            content: String::from("Jan & <Feb>"),
        });
        scene
    }

    #[test]
    fn test_svg() {
        let svg = Svg(&sample_scene()).to_string();
        let lines = svg.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            [
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="960" height="156" font-family="sans-serif" font-size="14">"#,
                r#"<g transform="translate(43.5,16)">"#,
                r##"<rect class="rect-day" x="0" y="68" width="17" height="17" fill="#d9ef8b" stroke="#ccc"><title>2021-01-01: 3</title></rect>"##,
                r##"<rect class="rect-day" x="17" y="0" width="17" height="17" fill="#fff8" stroke="#ccc"/>"##,
                r##"<path fill="none" stroke="#000" d="M17,68H0Z"/>"##,
                r##"<text class="label-month" x="51" y="-5" fill="#aaa" text-anchor="end">Jan &amp; &lt;Feb&gt;</text>"##,
                "</g>",
                "</svg>",
            ]
        );
    }

    #[test]
    fn test_html_page() {
        let scene = sample_scene();
        let legend = Scene::new(SurfaceRole::Legend, 960.0, 40.0);
        let html = html_page("data.json", [&scene, &scene], Some(&legend));
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>data.json</title>"));
        assert_eq!(html.matches("<svg ").count(), 3);
        assert!(html.ends_with("</html>\n"));
    }
}
