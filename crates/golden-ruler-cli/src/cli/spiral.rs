//! `spiral` and `matrix` commands: render a golden overlay on its own.

use anyhow::{Result, bail};
use serde::Serialize;

use golden_ruler::{
    DEFAULT_DEPTH, GoldenSpiral, Orientation, OverlayStyle, PhiMatrix, RecordingSurface, Rgb,
    SvgSurface, Translate, Turn, build_quarter_arc, golden_root,
};

use super::common::{
    JsonLine, JsonStep, MARGIN, OutputFormat, emit_json, emit_svg, flag_value, parse_flag,
    parse_orientation,
};

/// Default root length when `-l` is not given.
const DEFAULT_LENGTH: f64 = 800.0;

/// Largest distance between an arc and its flattened segments, in px.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Options shared by both overlays.
#[derive(Debug, Clone)]
pub struct OverlayArgs {
    pub length: f64,
    pub orientation: Orientation,
    pub depth: usize,
    pub format: OutputFormat,
    pub output: Option<String>,
    pub labels: bool,
    pub hold: bool,
}

impl Default for OverlayArgs {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            orientation: Orientation::Deg0,
            depth: DEFAULT_DEPTH,
            format: OutputFormat::Svg,
            output: None,
            labels: true,
            hold: false,
        }
    }
}

impl OverlayArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = OverlayArgs::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "-l" | "--length" => {
                    parsed.length = parse_flag("--length", flag_value(args, &mut i)?)?;
                    if !parsed.length.is_finite() {
                        bail!("length must be finite: {}", parsed.length);
                    }
                }
                "-a" | "--angle" => {
                    parsed.orientation = parse_orientation(flag_value(args, &mut i)?)?;
                }
                "-d" | "--depth" => {
                    parsed.depth = parse_flag("--depth", flag_value(args, &mut i)?)?;
                }
                "-f" | "--format" => {
                    parsed.format = OutputFormat::parse(flag_value(args, &mut i)?)?;
                }
                "-o" | "--output" => {
                    parsed.output = Some(flag_value(args, &mut i)?.to_string());
                }
                "--no-labels" => parsed.labels = false,
                "--hold" => parsed.hold = true,
                other => bail!("unknown option: {}", other),
            }
            i += 1;
        }

        Ok(parsed)
    }

    fn style(&self) -> OverlayStyle {
        OverlayStyle {
            labels: self.labels,
            ..OverlayStyle::default()
        }
    }

    /// Blank canvas sized to the root rectangle plus a margin on each side.
    fn canvas(&self) -> SvgSurface {
        let root = golden_root(self.length);
        SvgSurface::new(root.width + 2.0 * MARGIN, root.height + 2.0 * MARGIN)
            .with_background(Rgb::WHITE)
    }
}

/// Spiral in JSON output format.
#[derive(Serialize)]
struct JsonOverlay {
    overlay: &'static str,
    length: f64,
    orientation: i32,
    steps: Vec<JsonStep>,
}

/// Overlay outline as plotter-ready line segments.
#[derive(Serialize)]
struct JsonLines {
    overlay: &'static str,
    tolerance: f64,
    lines: Vec<JsonLine>,
}

fn to_lines(overlay: &'static str, surface: &RecordingSurface) -> JsonLines {
    JsonLines {
        overlay,
        tolerance: FLATTEN_TOLERANCE,
        lines: surface.to_lines(FLATTEN_TOLERANCE).iter().map(JsonLine::from).collect(),
    }
}

/// Execute the spiral command.
pub fn cmd_spiral(args: &[String]) -> Result<()> {
    let opts = OverlayArgs::parse(args)?;
    let spiral = GoldenSpiral::new(opts.length, opts.orientation).with_depth(opts.depth);

    if opts.format == OutputFormat::Json {
        let steps = spiral
            .steps()?
            .map(|step| {
                let arc = build_quarter_arc(step.square, step.orientation);
                JsonStep::new(&step, Some(&arc))
            })
            .collect();
        let out = JsonOverlay {
            overlay: "spiral",
            length: opts.length,
            orientation: opts.orientation.degrees(),
            steps,
        };
        return emit_json(&out, opts.output.as_deref());
    }

    if opts.format == OutputFormat::Lines {
        let mut surface = RecordingSurface::new();
        spiral.render(&mut surface, &opts.style())?;
        return emit_json(&to_lines("spiral", &surface), opts.output.as_deref());
    }

    let mut svg = opts.canvas();
    let levels = spiral.render(&mut Translate::new(&mut svg, MARGIN, MARGIN), &opts.style())?;
    log::info!("spiral: {} levels, length {}", levels, opts.length);

    emit_svg(&svg.finish()?, opts.format, opts.output.as_deref())
}

/// Execute the matrix command.
pub fn cmd_matrix(args: &[String]) -> Result<()> {
    let opts = OverlayArgs::parse(args)?;
    let turn = if opts.hold { Turn::Hold } else { Turn::Rotate };
    let matrix = PhiMatrix::new(opts.length, opts.orientation)
        .with_depth(opts.depth)
        .with_turn(turn);

    if opts.format == OutputFormat::Json {
        let steps = matrix.steps()?.map(|step| JsonStep::new(&step, None)).collect();
        let out = JsonOverlay {
            overlay: "matrix",
            length: opts.length,
            orientation: opts.orientation.degrees(),
            steps,
        };
        return emit_json(&out, opts.output.as_deref());
    }

    if opts.format == OutputFormat::Lines {
        let mut surface = RecordingSurface::new();
        matrix.render(&mut surface, &opts.style())?;
        return emit_json(&to_lines("matrix", &surface), opts.output.as_deref());
    }

    let mut svg = opts.canvas();
    let levels = matrix.render(&mut Translate::new(&mut svg, MARGIN, MARGIN), &opts.style())?;
    log::info!("matrix: {} levels, length {} ({:?})", levels, opts.length, turn);

    emit_svg(&svg.finish()?, opts.format, opts.output.as_deref())
}
