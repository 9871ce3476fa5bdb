//! Overlay recipes: declarative compositions of spirals, matrices and pin
//! rulers.
//!
//! Recipes are YAML files that place one or more overlays on a canvas.
//! Each layer picks an overlay kind, its parameters and optional styling.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use golden_ruler::{
    DEFAULT_DEPTH, GapStyle, GoldenSpiral, Orientation, OverlayStyle, PhiMatrix, Pin, Surface,
    SvgSurface, Translate, Turn, measure, render_gap_measurer, render_pin,
};

use super::common::{OutputFormat, emit_svg, flag_value, parse_color};
use super::gaps::parse_pin;

/// A complete recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name/title
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Canvas configuration
    pub canvas: Canvas,

    /// Default style applied to all layers (can be overridden)
    #[serde(default)]
    pub defaults: LayerStyle,

    /// Ordered list of layers (drawn bottom to top)
    pub layers: Vec<Layer>,
}

/// Canvas/output configuration, in px.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,

    /// Background color (default: white)
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_background() -> String {
    "white".to_string()
}

/// A single overlay layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Layer name (for identification)
    pub name: String,

    /// Top-left corner of the layer on the canvas
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,

    /// What to draw
    #[serde(flatten)]
    pub overlay: LayerOverlay,

    /// Layer style (merged with defaults)
    #[serde(default)]
    pub style: LayerStyle,

    /// Whether this layer is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

fn default_labels() -> bool {
    true
}

fn default_pin_length() -> f64 {
    160.0
}

/// Overlay kinds a layer can hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerOverlay {
    Spiral {
        length: f64,
        #[serde(default)]
        angle: i32,
        #[serde(default = "default_depth")]
        depth: usize,
        #[serde(default = "default_labels")]
        labels: bool,
    },
    Matrix {
        length: f64,
        #[serde(default)]
        angle: i32,
        #[serde(default = "default_depth")]
        depth: usize,
        #[serde(default)]
        hold: bool,
    },
    /// Pins given as `pos` or `pos:label`.
    Gaps {
        pins: Vec<String>,
        #[serde(default)]
        vertical: bool,
        #[serde(default = "default_pin_length")]
        pin_length: f64,
    },
}

/// Style properties for a layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Outline width for rectangles, squares and pins
    #[serde(default)]
    pub stroke_width: Option<f64>,

    /// Spiral arc color
    #[serde(default)]
    pub arc_color: Option<String>,

    /// Spiral arc width
    #[serde(default)]
    pub arc_width: Option<f64>,

    /// Label size in px
    #[serde(default)]
    pub font_size: Option<f64>,
}

impl LayerStyle {
    /// Merge this style with defaults, preferring self's values.
    pub fn merge_with(&self, defaults: &LayerStyle) -> LayerStyle {
        LayerStyle {
            stroke_width: self.stroke_width.or(defaults.stroke_width),
            arc_color: self.arc_color.clone().or_else(|| defaults.arc_color.clone()),
            arc_width: self.arc_width.or(defaults.arc_width),
            font_size: self.font_size.or(defaults.font_size),
        }
    }

    pub fn overlay_style(&self, labels: bool) -> Result<OverlayStyle> {
        let base = OverlayStyle::default();
        Ok(OverlayStyle {
            stroke_width: self.stroke_width.unwrap_or(base.stroke_width),
            arc_color: match &self.arc_color {
                Some(c) => parse_color(c)?,
                None => base.arc_color,
            },
            arc_width: self.arc_width.unwrap_or(base.arc_width),
            font_size: self.font_size.unwrap_or(base.font_size),
            labels,
        })
    }

    pub fn gap_style(&self) -> GapStyle {
        let base = GapStyle::default();
        GapStyle {
            stroke_width: self.stroke_width.unwrap_or(base.stroke_width),
            font_size: self.font_size.unwrap_or(base.font_size),
            ..base
        }
    }
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe file {}", path.display()))?;
        Recipe::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("failed to parse recipe YAML")
    }

    /// Draw every enabled layer. Returns the finished SVG canvas.
    pub fn render(&self) -> Result<SvgSurface> {
        let background = parse_color(&self.canvas.background)?;
        let mut svg =
            SvgSurface::new(self.canvas.width, self.canvas.height).with_background(background);

        for layer in self.layers.iter().filter(|l| l.enabled) {
            let style = layer.style.merge_with(&self.defaults);
            let mut canvas = Translate::new(&mut svg, layer.x, layer.y);
            draw_layer(&mut canvas, &layer.overlay, &style)
                .with_context(|| format!("layer '{}'", layer.name))?;
            log::info!("layer '{}' drawn", layer.name);
        }

        Ok(svg)
    }
}

fn draw_layer<S: Surface + ?Sized>(
    surface: &mut S,
    overlay: &LayerOverlay,
    style: &LayerStyle,
) -> Result<()> {
    match overlay {
        LayerOverlay::Spiral { length, angle, depth, labels } => {
            let spiral =
                GoldenSpiral::new(*length, Orientation::from_degrees(*angle)?).with_depth(*depth);
            spiral.render(surface, &style.overlay_style(*labels)?)?;
        }
        LayerOverlay::Matrix { length, angle, depth, hold } => {
            let turn = if *hold { Turn::Hold } else { Turn::Rotate };
            let matrix = PhiMatrix::new(*length, Orientation::from_degrees(*angle)?)
                .with_depth(*depth)
                .with_turn(turn);
            matrix.render(surface, &style.overlay_style(false)?)?;
        }
        LayerOverlay::Gaps { pins, vertical, pin_length } => {
            let orientation = if *vertical { Orientation::Deg90 } else { Orientation::Deg0 };
            let pins = pins
                .iter()
                .enumerate()
                .map(|(i, spec)| parse_pin(spec, i, orientation))
                .collect::<Result<Vec<Pin>>>()?;

            let gap_style = style.gap_style();
            for pin in &pins {
                render_pin(surface, pin, *pin_length, &gap_style);
            }
            let segments = measure(&pins, !*vertical);
            render_gap_measurer(surface, &segments, !*vertical, &gap_style);
        }
    }
    Ok(())
}

/// Execute the recipe command.
pub fn cmd_recipe(args: &[String]) -> Result<()> {
    if args.is_empty() {
        print_usage();
        return Ok(());
    }

    let mut recipe_path: Option<&str> = None;
    let mut output: Option<String> = None;
    let mut format = OutputFormat::Svg;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => output = Some(flag_value(args, &mut i)?.to_string()),
            "-f" | "--format" => format = OutputFormat::parse(flag_value(args, &mut i)?)?,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "--example" => {
                print_example();
                return Ok(());
            }
            arg if !arg.starts_with('-') => recipe_path = Some(arg),
            other => anyhow::bail!("unknown option: {}", other),
        }
        i += 1;
    }

    let recipe_path = recipe_path.ok_or_else(|| anyhow!("no recipe file specified"))?;
    if !matches!(format, OutputFormat::Svg | OutputFormat::Png) {
        anyhow::bail!("recipes render to svg or png");
    }

    let recipe = Recipe::load(recipe_path)?;
    log::info!(
        "recipe '{}': {}x{}, {} layers",
        recipe.name,
        recipe.canvas.width,
        recipe.canvas.height,
        recipe.layers.len()
    );

    let svg = recipe.render()?;
    emit_svg(&svg.finish()?, format, output.as_deref())
}

fn print_usage() {
    eprintln!("golden-ruler recipe - Render overlay compositions from YAML");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    golden-ruler recipe <recipe.yaml> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -o, --output <file>    Output file (default: stdout)");
    eprintln!("    -f, --format <fmt>     svg or png (png needs -o)");
    eprintln!("    --example              Print an example recipe YAML");
    eprintln!("    -h, --help             Show this help");
    eprintln!();
    eprintln!("EXAMPLE:");
    eprintln!("    golden-ruler recipe layout.yaml -f png -o layout.png");
}

const EXAMPLE: &str = r##"# Example golden-ruler recipe
name: "Spiral and pins"
description: "A spiral next to a measured pin ruler"

canvas:
  width: 900
  height: 700
  background: "white"

defaults:
  stroke_width: 1.5
  arc_color: "red"

layers:
  - name: spiral
    kind: spiral
    x: 20
    y: 20
    length: 800
    angle: 0

  - name: matrix
    kind: matrix
    x: 20
    y: 20
    length: 800
    angle: 90
    hold: true
    enabled: false

  - name: pins
    kind: gaps
    x: 20
    y: 540
    pins: ["0:0", "120:120", "314:314", "500:500"]
    style:
      stroke_width: 1.0
"##;

fn print_example() {
    print!("{}", EXAMPLE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_recipe_parses_and_renders() {
        let recipe = Recipe::from_yaml(EXAMPLE).unwrap();
        assert_eq!(recipe.layers.len(), 3);
        assert!(matches!(
            recipe.layers[0].overlay,
            LayerOverlay::Spiral { depth: 11, labels: true, .. }
        ));
        assert!(matches!(recipe.layers[1].overlay, LayerOverlay::Matrix { hold: true, .. }));
        assert!(!recipe.layers[1].enabled);

        let svg = recipe.render().unwrap();
        // Spiral: 11 levels of 2 rects + arc. Pins: 4 lines, 4 labels, 3 gaps.
        assert!(svg.len() > 11 * 3 + 4 * 2 + 3 * 2);

        let text = svg.finish().unwrap();
        assert_eq!(text.matches("<path").count(), 11, "one arc per spiral level");
        assert!(text.contains(">194</text>"), "gap label between 120 and 314");
    }

    #[test]
    fn layer_style_overrides_defaults() {
        let defaults = LayerStyle {
            stroke_width: Some(2.0),
            arc_color: Some("blue".into()),
            ..LayerStyle::default()
        };
        let layer = LayerStyle {
            stroke_width: Some(0.5),
            ..LayerStyle::default()
        };
        let merged = layer.merge_with(&defaults);
        assert_eq!(merged.stroke_width, Some(0.5));
        assert_eq!(merged.arc_color.as_deref(), Some("blue"));

        let style = merged.overlay_style(true).unwrap();
        assert_eq!(style.arc_color, golden_ruler::Rgb::BLUE);
        assert_eq!(style.arc_width, 2.0);
        assert_eq!(merged.gap_style().stroke_width, 0.5);
    }

    #[test]
    fn gaps_layer_keeps_the_measurer_clear_of_the_pins() {
        let yaml = r#"
name: pins only
canvas: { width: 200, height: 200 }
layers:
  - name: pins
    kind: gaps
    pins: ["0:a", "30:b"]
"#;
        let text = Recipe::from_yaml(yaml).unwrap().render().unwrap().finish().unwrap();
        let rule = "x1=\"0.000\" y1=\"120.000\" x2=\"30.000\" y2=\"120.000\"";
        assert!(text.contains(rule), "{}", text);
        assert!(!text.contains("y1=\"20.000\""), "{}", text);
    }

    #[test]
    fn bad_layers_name_themselves() {
        let yaml = r#"
name: broken
canvas: { width: 100, height: 100 }
layers:
  - name: tilted
    kind: spiral
    length: 50
    angle: 45
"#;
        let recipe = Recipe::from_yaml(yaml).unwrap();
        let err = recipe.render().unwrap_err();
        assert!(format!("{:#}", err).contains("tilted"), "{:#}", err);
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let yaml = r#"
name: odd
canvas: { width: 10, height: 10 }
layers:
  - name: x
    kind: hexagon
"#;
        assert!(Recipe::from_yaml(yaml).is_err());
    }
}
