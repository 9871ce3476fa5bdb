//! Common utilities shared across CLI commands.

use std::fs;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use tiny_skia::Pixmap;

use golden_ruler::{ArcSpec, Line, Orientation, Rect, Rgb, SubdivisionStep};

/// Blank border around rendered overlays, in px.
pub const MARGIN: f64 = 20.0;

/// Largest PNG we are willing to allocate, in pixels (about 400 MB of RGBA).
pub const MAX_PNG_PIXELS: u64 = 100_000_000;

/// Output format for rendered overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
    /// Flattened line segments as JSON, for plotters.
    Lines,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<OutputFormat> {
        match value.to_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "json" => Ok(OutputFormat::Json),
            "lines" => Ok(OutputFormat::Lines),
            other => bail!("unknown format '{}': use svg, png, json or lines", other),
        }
    }
}

/// Take the value following the flag at `args[*i]`, advancing `i`.
pub fn flag_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} needs a value", flag))
}

/// Parse a flag value, naming the flag in the error.
pub fn parse_flag<T>(flag: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| anyhow!("invalid value '{}' for {}: {}", value, flag, e))
}

pub fn parse_orientation(value: &str) -> Result<Orientation> {
    let degrees: i32 = parse_flag("--angle", value)?;
    Ok(Orientation::from_degrees(degrees)?)
}

/// Write text output to `path`, or stdout when there is none (or it is `-`).
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(p) if p != "-" => {
            fs::write(p, content).with_context(|| format!("failed to write {}", p))?;
            eprintln!("Wrote: {}", p);
        }
        _ => print!("{}", content),
    }
    Ok(())
}

/// Rasterize an SVG document into a pixmap.
pub fn rasterize(svg: &str, scale: f64) -> Result<Pixmap> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).context("failed to parse generated SVG")?;
    let size = tree.size();
    let width = (size.width() as f64 * scale).ceil();
    let height = (size.height() as f64 * scale).ceil();
    if width * height > MAX_PNG_PIXELS as f64 {
        bail!("canvas {}x{} too large for PNG", width, height);
    }
    let (width, height) = (width as u32, height as u32);

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| anyhow!("could not create a {}x{} pixmap", width, height))?;

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    log::debug!("rasterized {}x{} at {}x", width, height, scale);
    Ok(pixmap)
}

/// Rasterize `svg` and save it as a PNG file.
pub fn save_png(svg: &str, path: &str, scale: f64) -> Result<()> {
    let pixmap = rasterize(svg, scale)?;
    pixmap
        .save_png(path)
        .with_context(|| format!("failed to write {}", path))?;
    eprintln!("Wrote: {} ({}x{})", path, pixmap.width(), pixmap.height());
    Ok(())
}

/// Emit an SVG document in the requested format. JSON and line output are
/// handled by the caller since their shape differs per command.
pub fn emit_svg(svg: &str, format: OutputFormat, output: Option<&str>) -> Result<()> {
    match format {
        OutputFormat::Png => {
            let path = output
                .filter(|p| *p != "-")
                .ok_or_else(|| anyhow!("PNG output needs a file: pass -o <file.png>"))?;
            save_png(svg, path, 1.0)
        }
        _ => write_output(output, svg),
    }
}

pub fn emit_json<T: Serialize>(value: &T, output: Option<&str>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    write_output(output, &json)
}

// ============================================================================
// JSON DTOs
// ============================================================================

/// A rectangle in JSON output format.
#[derive(Serialize)]
pub struct JsonRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for JsonRect {
    fn from(r: Rect) -> Self {
        JsonRect {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

/// A line in JSON output format.
#[derive(Serialize)]
pub struct JsonLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl From<&Line> for JsonLine {
    fn from(l: &Line) -> Self {
        JsonLine {
            x1: l.x1,
            y1: l.y1,
            x2: l.x2,
            y2: l.y2,
        }
    }
}

/// A resolved arc in JSON output format.
#[derive(Serialize)]
pub struct JsonArc {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub radius: [f64; 2],
    pub large_arc: bool,
    pub clockwise: bool,
    /// SVG path data for the arc.
    pub path: String,
}

impl From<&ArcSpec> for JsonArc {
    fn from(spec: &ArcSpec) -> Self {
        let arc = spec.path();
        JsonArc {
            start: [arc.start.x, arc.start.y],
            end: [arc.end.x, arc.end.y],
            radius: [arc.radius_x, arc.radius_y],
            large_arc: arc.large_arc,
            clockwise: arc.direction == golden_ruler::SweepDirection::Clockwise,
            path: arc.svg_data(),
        }
    }
}

/// One subdivision level in JSON output format.
#[derive(Serialize)]
pub struct JsonStep {
    pub depth: usize,
    pub orientation: i32,
    pub color: String,
    pub square: JsonRect,
    pub remainder: JsonRect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc: Option<JsonArc>,
}

impl JsonStep {
    pub fn new(step: &SubdivisionStep, arc: Option<&ArcSpec>) -> Self {
        JsonStep {
            depth: step.depth,
            orientation: step.orientation.degrees(),
            color: golden_ruler::color_at(step.depth).to_hex(),
            square: step.square.into(),
            remainder: step.remainder.into(),
            arc: arc.map(JsonArc::from),
        }
    }
}

/// `#rrggbb` for a color given on the command line or in a recipe.
pub fn parse_color(value: &str) -> Result<Rgb> {
    Ok(Rgb::parse(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!(OutputFormat::parse("SVG").unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::parse("png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::parse("Json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("lines").unwrap(), OutputFormat::Lines);
        assert!(OutputFormat::parse("pdf").is_err());
    }

    #[test]
    fn flag_values_advance_the_cursor() {
        let list = args(&["-l", "500", "-a"]);
        let mut i = 0;
        assert_eq!(flag_value(&list, &mut i).unwrap(), "500");
        assert_eq!(i, 1);

        let mut i = 2;
        let err = flag_value(&list, &mut i).unwrap_err();
        assert!(err.to_string().contains("-a needs a value"));
    }

    #[test]
    fn orientations_must_be_right_angles() {
        assert_eq!(parse_orientation("270").unwrap(), Orientation::Deg270);
        let err = parse_orientation("45").unwrap_err();
        assert!(err.to_string().contains("45"), "{}", err);
        assert!(parse_orientation("north").is_err());
    }

    #[test]
    fn png_without_a_file_is_refused() {
        let err = emit_svg("<svg/>", OutputFormat::Png, None).unwrap_err();
        assert!(err.to_string().contains("-o"));
    }

    #[test]
    fn rasterizes_a_small_document() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20">
            <rect width="40" height="20" fill="#ff0000"/>
        </svg>"##;
        let pixmap = rasterize(svg, 2.0).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (80, 40));
        let pixel = pixmap.pixel(10, 10).unwrap();
        assert_eq!((pixel.red(), pixel.green(), pixel.blue()), (255, 0, 0));
    }

    #[test]
    fn oversized_canvas_is_refused_before_allocating() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000000" height="600000"/>"#;
        let err = rasterize(svg, 1.0).unwrap_err();
        assert!(err.to_string().contains("too large for PNG"), "{}", err);
    }
}
