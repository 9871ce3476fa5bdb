//! golden-ruler - render golden-ratio ruler overlays from the command line
//!
//! Usage:
//!   golden-ruler spiral [options]        Golden spiral as SVG, PNG or JSON
//!   golden-ruler matrix [options]        Phi matrix rectangles
//!   golden-ruler gaps --pin <pos>...     Measure gaps between pins
//!   golden-ruler recipe <file.yaml>      Render a layered composition
//!   golden-ruler palette                 List the color cycle

mod cli;

use std::env;

use golden_ruler::{PALETTE, PALETTE_NAMES};

use cli::{cmd_gaps, cmd_matrix, cmd_recipe, cmd_spiral};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("golden-ruler");

    let Some(command) = args.get(1) else {
        print_usage(prog);
        std::process::exit(1);
    };

    let rest = &args[2..];
    let result = match command.as_str() {
        "spiral" => cmd_spiral(rest),
        "matrix" => cmd_matrix(rest),
        "gaps" => cmd_gaps(rest),
        "recipe" => cmd_recipe(rest),
        "palette" => {
            cmd_palette();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage(prog);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_usage(prog);
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("golden-ruler - golden-ratio overlays for on-screen rulers");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} spiral [options]", prog);
    eprintln!("  {} matrix [options] [--hold]", prog);
    eprintln!("  {} gaps --pin <pos[:label]>... [--vertical] [options]", prog);
    eprintln!("  {} recipe <file.yaml> [-f svg|png] [-o file]", prog);
    eprintln!("  {} palette", prog);
    eprintln!();
    eprintln!("Overlay options:");
    eprintln!("  -l, --length <n>       Root rectangle width (default: 800)");
    eprintln!("  -a, --angle <deg>      First corner: 0, 90, 180 or 270 (default: 0)");
    eprintln!("  -d, --depth <n>        Subdivision levels (default: 11)");
    eprintln!("  --no-labels            Spiral only: skip square size labels");
    eprintln!("  --hold                 Matrix only: carve every square from the same corner");
    eprintln!();
    eprintln!("Gap options:");
    eprintln!("  -p, --pin <pos[:label]>  Add a pin (unlabeled pins are skipped when horizontal)");
    eprintln!("  --vertical               Measure along a vertical ruler");
    eprintln!("  --pin-length <n>         Pin line length (default: 160)");
    eprintln!();
    eprintln!("Output options:");
    eprintln!("  -f, --format <fmt>     svg, png or json (default: svg)");
    eprintln!("                         spiral and matrix also take lines (flattened segments)");
    eprintln!("  -o, --output <file>    Output file, - for stdout (default: stdout)");
    eprintln!("                         png needs a file");
    eprintln!();
    eprintln!("Logging: set RUST_LOG=info (or debug, trace) for progress output.");
}

fn cmd_palette() {
    println!("Color cycle:");
    for (i, (name, color)) in PALETTE_NAMES.iter().zip(PALETTE.iter()).enumerate() {
        println!("  {}  {:<7} {}", i, name, color);
    }
}
