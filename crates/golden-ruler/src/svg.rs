//! SVG output - a [`Surface`] that writes an SVG document.
//!
//! Drawing calls are collected as elements and serialized in one go by
//! [`SvgSurface::finish`], using quick-xml so attribute values and label
//! text are escaped properly.
//!
//! Text metrics come from [`estimate_text_size`]; there is no font engine
//! here, so label placement is approximate.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::arc::ArcSpec;
use crate::color::Rgb;
use crate::geometry::{Point, Rect};
use crate::surface::{Surface, TextSize, estimate_text_size};

/// Font family written on every label.
pub const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// Ascent as a fraction of the font size, used to turn a top-left text
/// position into an SVG baseline.
const ASCENT: f64 = 0.9;

/// Error type for SVG serialization.
#[derive(Debug)]
pub enum SvgError {
    Write(String),
    Encoding(std::string::FromUtf8Error),
}

impl std::fmt::Display for SvgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SvgError::Write(msg) => write!(f, "SVG write error: {}", msg),
            SvgError::Encoding(e) => write!(f, "SVG encoding error: {}", e),
        }
    }
}

impl std::error::Error for SvgError {}

/// One collected SVG element.
#[derive(Debug, Clone)]
struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    text: Option<String>,
}

/// Surface that produces an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    background: Option<Rgb>,
    elements: Vec<Element>,
}

fn num(value: f64) -> String {
    format!("{:.3}", value)
}

fn write_err<E: std::fmt::Display>(e: E) -> SvgError {
    SvgError::Write(e.to_string())
}

fn stroke_attributes(stroke: Rgb, stroke_width: f64) -> [(&'static str, String); 3] {
    [
        ("stroke", stroke.to_hex()),
        ("stroke-width", num(stroke_width)),
        ("fill", "none".to_string()),
    ]
}

impl SvgSurface {
    /// Empty document with the given canvas size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            elements: Vec::new(),
        }
    }

    /// Paint the canvas with `color` before anything else.
    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    /// Number of drawn elements so far.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn push(&mut self, name: &'static str, attributes: Vec<(&'static str, String)>) {
        self.elements.push(Element {
            name,
            attributes,
            text: None,
        });
    }

    /// Serialize the document.
    pub fn finish(&self) -> Result<String, SvgError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_err)?;

        let width = num(self.width);
        let height = num(self.height);
        let view_box = format!("0 0 {} {}", width, height);
        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        root.push_attribute(("width", width.as_str()));
        root.push_attribute(("height", height.as_str()));
        root.push_attribute(("viewBox", view_box.as_str()));
        writer.write_event(Event::Start(root)).map_err(write_err)?;

        if let Some(background) = self.background {
            let fill = background.to_hex();
            let mut rect = BytesStart::new("rect");
            rect.push_attribute(("width", "100%"));
            rect.push_attribute(("height", "100%"));
            rect.push_attribute(("fill", fill.as_str()));
            writer.write_event(Event::Empty(rect)).map_err(write_err)?;
        }

        for element in &self.elements {
            let mut start = BytesStart::new(element.name);
            for (key, value) in &element.attributes {
                start.push_attribute((*key, value.as_str()));
            }
            match &element.text {
                Some(text) => {
                    writer.write_event(Event::Start(start)).map_err(write_err)?;
                    writer
                        .write_event(Event::Text(BytesText::new(text)))
                        .map_err(write_err)?;
                    writer
                        .write_event(Event::End(BytesEnd::new(element.name)))
                        .map_err(write_err)?;
                }
                None => {
                    writer.write_event(Event::Empty(start)).map_err(write_err)?;
                }
            }
        }

        writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .map_err(write_err)?;

        let bytes = writer.into_inner().into_inner();
        let mut svg = String::from_utf8(bytes).map_err(SvgError::Encoding)?;
        svg.push('\n');
        Ok(svg)
    }
}

impl Surface for SvgSurface {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, stroke_width: f64) {
        let mut attributes = vec![
            ("x1", num(from.x)),
            ("y1", num(from.y)),
            ("x2", num(to.x)),
            ("y2", num(to.y)),
        ];
        attributes.extend(stroke_attributes(color, stroke_width));
        self.push("line", attributes);
    }

    fn draw_rectangle(&mut self, rect: Rect, stroke: Rgb, stroke_width: f64) {
        let mut attributes = vec![
            ("x", num(rect.x)),
            ("y", num(rect.y)),
            ("width", num(rect.width)),
            ("height", num(rect.height)),
        ];
        attributes.extend(stroke_attributes(stroke, stroke_width));
        self.push("rect", attributes);
    }

    fn draw_arc_path(&mut self, arc: &ArcSpec, stroke: Rgb, stroke_width: f64) {
        let mut attributes = vec![("d", arc.path().svg_data())];
        attributes.extend(stroke_attributes(stroke, stroke_width));
        self.push("path", attributes);
    }

    fn measure_text(&self, text: &str, font_size: f64) -> TextSize {
        estimate_text_size(text, font_size)
    }

    fn draw_text(&mut self, text: &str, position: Point, font_size: f64, color: Rgb) {
        self.elements.push(Element {
            name: "text",
            attributes: vec![
                ("x", num(position.x)),
                ("y", num(position.y + font_size * ASCENT)),
                ("font-family", FONT_FAMILY.to_string()),
                ("font-size", num(font_size)),
                ("fill", color.to_hex()),
            ],
            text: Some(text.to_string()),
        });
    }
}

// ============================================================================
// TESTS
// ============================================================================
