//! `gaps` command: lay out pins on a ruler and measure between them.

use anyhow::{Result, anyhow, bail};
use serde::Serialize;

use golden_ruler::{
    GAP_MEASURER_OFFSET, GapSegment, GapStyle, Orientation, Pin, Rgb, SvgSurface, Translate,
    color_at, measure, render_gap_measurer, render_pin,
};

use super::common::{MARGIN, OutputFormat, emit_json, emit_svg, flag_value, parse_flag};

/// How far pin lines reach across the ruler.
const DEFAULT_PIN_LENGTH: f64 = 160.0;

/// Parsed `gaps` options.
#[derive(Debug, Clone)]
pub struct GapArgs {
    pub pins: Vec<Pin>,
    pub vertical: bool,
    pub pin_length: f64,
    pub format: OutputFormat,
    pub output: Option<String>,
}

/// Parse `pos` or `pos:label`. A bare position is an unlabeled pin.
pub fn parse_pin(spec: &str, index: usize, orientation: Orientation) -> Result<Pin> {
    let (position, label) = match spec.split_once(':') {
        Some((p, l)) => (p, Some(l)),
        None => (spec, None),
    };
    let position: f64 = parse_flag("--pin", position.trim())?;
    if !position.is_finite() {
        bail!("pin position must be finite: {}", spec);
    }

    // Same color order the ruler uses when dropping pins.
    let pin = Pin::new(position, color_at(index + 1), orientation);
    Ok(match label {
        Some(l) => pin.with_label(l),
        None => pin,
    })
}

impl GapArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut specs: Vec<&str> = Vec::new();
        let mut vertical = false;
        let mut pin_length = DEFAULT_PIN_LENGTH;
        let mut format = OutputFormat::Svg;
        let mut output = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "-p" | "--pin" => specs.push(flag_value(args, &mut i)?),
                "--vertical" => vertical = true,
                "--pin-length" => {
                    pin_length = parse_flag("--pin-length", flag_value(args, &mut i)?)?;
                }
                "-f" | "--format" => format = OutputFormat::parse(flag_value(args, &mut i)?)?,
                "-o" | "--output" => output = Some(flag_value(args, &mut i)?.to_string()),
                other => bail!("unknown option: {}", other),
            }
            i += 1;
        }

        let orientation = if vertical { Orientation::Deg90 } else { Orientation::Deg0 };
        let pins = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| parse_pin(spec, index, orientation))
            .collect::<Result<Vec<_>>>()?;

        Ok(GapArgs {
            pins,
            vertical,
            pin_length,
            format,
            output,
        })
    }

    fn horizontal(&self) -> bool {
        !self.vertical
    }

    /// Stretch of the ruler the pins cover, always including the origin.
    fn span(&self) -> (f64, f64) {
        self.pins
            .iter()
            .map(|p| p.position)
            .fold((0.0, 0.0), |(lo, hi), p| (f64::min(lo, p), f64::max(hi, p)))
    }
}

/// A pin in JSON output format.
#[derive(Serialize)]
struct JsonPin {
    position: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    color: String,
}

/// A measured gap in JSON output format.
#[derive(Serialize)]
struct JsonGap {
    from: f64,
    to: f64,
    gap: f64,
    color: String,
}

#[derive(Serialize)]
struct JsonGaps {
    horizontal: bool,
    pins: Vec<JsonPin>,
    gaps: Vec<JsonGap>,
}

fn to_json(opts: &GapArgs, segments: &[GapSegment]) -> JsonGaps {
    JsonGaps {
        horizontal: opts.horizontal(),
        pins: opts
            .pins
            .iter()
            .map(|p| JsonPin {
                position: p.position,
                label: p.label.clone(),
                color: p.color.to_hex(),
            })
            .collect(),
        gaps: segments
            .iter()
            .map(|s| JsonGap {
                from: s.from.position,
                to: s.to.position,
                gap: s.gap,
                color: s.color.to_hex(),
            })
            .collect(),
    }
}

/// Execute the gaps command.
pub fn cmd_gaps(args: &[String]) -> Result<()> {
    let opts = GapArgs::parse(args)?;
    if opts.pins.is_empty() {
        return Err(anyhow!("no pins given: use --pin <pos>[:label]"));
    }

    let horizontal = opts.horizontal();
    let segments = measure(&opts.pins, horizontal);
    log::info!("{} pins, {} gaps", opts.pins.len(), segments.len());

    match opts.format {
        OutputFormat::Json => emit_json(&to_json(&opts, &segments), opts.output.as_deref()),
        OutputFormat::Lines => bail!("lines output is only available for spiral and matrix"),
        _ => emit_svg(&render_svg(&opts, &segments)?, opts.format, opts.output.as_deref()),
    }
}

/// Lay the pins out on a white canvas with the gap measurer beside them.
///
/// The canvas spans every pin, negative positions included, plus a margin.
fn render_svg(opts: &GapArgs, segments: &[GapSegment]) -> Result<String> {
    let horizontal = opts.horizontal();
    let style = GapStyle::default();
    let (lo, hi) = opts.span();
    let along = hi - lo + 2.0 * MARGIN;
    let across = opts.pin_length.max(GAP_MEASURER_OFFSET + style.rule_offset) + 2.0 * MARGIN;
    let (width, height) = if horizontal { (along, across) } else { (across, along) };
    let (dx, dy) = if horizontal {
        (MARGIN - lo, MARGIN)
    } else {
        (MARGIN, MARGIN - lo)
    };

    let mut svg = SvgSurface::new(width, height).with_background(Rgb::WHITE);
    {
        let mut canvas = Translate::new(&mut svg, dx, dy);
        for pin in &opts.pins {
            render_pin(&mut canvas, pin, opts.pin_length, &style);
        }
        render_gap_measurer(&mut canvas, segments, horizontal, &style);
    }
    Ok(svg.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pins_with_and_without_labels() {
        let pin = parse_pin("120:B", 0, Orientation::Deg0).unwrap();
        assert_eq!(pin.position, 120.0);
        assert_eq!(pin.label.as_deref(), Some("B"));
        assert_eq!(pin.color, color_at(1));

        let pin = parse_pin("10", 3, Orientation::Deg90).unwrap();
        assert!(pin.label.is_none());
        assert_eq!(pin.orientation, Orientation::Deg90);
        assert_eq!(pin.color, color_at(4));

        assert!(parse_pin("ten:A", 0, Orientation::Deg0).is_err());
        assert!(parse_pin("inf:A", 0, Orientation::Deg0).is_err());
    }

    #[test]
    fn measures_like_the_ruler() {
        let opts = GapArgs::parse(&args(&[
            "--pin", "50:A", "--pin", "10", "--pin", "120:B", "--pin", "80:C",
        ]))
        .unwrap();
        let gaps: Vec<f64> = measure(&opts.pins, opts.horizontal()).iter().map(|s| s.gap).collect();
        assert_eq!(gaps, vec![30.0, 40.0]);

        let opts = GapArgs::parse(&args(&["--vertical", "-p", "50:A", "-p", "10", "-p", "120:B"]))
            .unwrap();
        let gaps: Vec<f64> = measure(&opts.pins, opts.horizontal()).iter().map(|s| s.gap).collect();
        assert_eq!(gaps, vec![40.0, 70.0]);
    }

    #[test]
    fn json_lists_pins_and_gaps() {
        let opts = GapArgs::parse(&args(&["-p", "0:a", "-p", "30:b"])).unwrap();
        let segments = measure(&opts.pins, true);
        let json = serde_json::to_value(to_json(&opts, &segments)).unwrap();

        assert_eq!(json["horizontal"], true);
        assert_eq!(json["pins"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["gaps"][0]["gap"], 30.0);
        assert_eq!(json["gaps"][0]["color"], color_at(1).to_hex());
    }

    #[test]
    fn canvas_covers_negative_pins() {
        let opts = GapArgs::parse(&args(&["-p", "-80:a", "-p", "-20:b", "-p", "40:c"])).unwrap();
        assert_eq!(opts.span(), (-80.0, 40.0));

        let segments = measure(&opts.pins, true);
        let svg = render_svg(&opts, &segments).unwrap();
        assert!(svg.contains("width=\"160.000\""), "{}", svg);
        // Leftmost pin lands on the margin, its rule starts there too.
        assert!(svg.contains("x1=\"20.000\" y1=\"20.000\""), "{}", svg);
        assert!(svg.contains("x1=\"20.000\" y1=\"140.000\" x2=\"80.000\""), "{}", svg);
        assert!(!svg.contains("=\"-"), "nothing left of the canvas: {}", svg);
    }

    #[test]
    fn vertical_canvas_runs_along_y() {
        let opts = GapArgs::parse(&args(&["--vertical", "-p", "-10:a", "-p", "50:b"])).unwrap();
        let segments = measure(&opts.pins, false);
        let svg = render_svg(&opts, &segments).unwrap();
        assert!(svg.contains("height=\"100.000\""), "{}", svg);
        let rule = "x1=\"140.000\" y1=\"20.000\" x2=\"140.000\" y2=\"80.000\"";
        assert!(svg.contains(rule), "{}", svg);
    }

    #[test]
    fn unknown_flags_are_errors() {
        assert!(GapArgs::parse(&args(&["--pins", "3"])).is_err());
        assert!(GapArgs::parse(&args(&["--pin"])).is_err());
    }
}
