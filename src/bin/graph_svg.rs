//! Ephemeris Graph SVG Tool
//!
//! Plots longitude against time for a set of bodies over a date range and
//! writes the result to an SVG file.
//!
//! Usage:
//!   cargo run --bin graph_svg -- --start 2024-01-01 --end 2024-12-31 \
//!       --bodies sun,mercury,venus --out graph.svg

use std::fs;
use std::path::PathBuf;

use astrowheel::canvas::SvgCanvas;
use astrowheel::ephemeris::{EphemerisAdapter, SyntheticEphemeris};
use astrowheel::ephgraph::{EphGraph, GraphConfig};
use astrowheel::localtime::civil_to_utc;
use astrowheel::zodiac::Planet;
use clap::Parser;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Ephemeris Graph SVG Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Plots planetary longitude over time to an SVG file",
    long_about = None
)]
struct Args {
    /// First plotted date (YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// Last plotted date (YYYY-MM-DD)
    #[arg(long)]
    end: String,

    /// Comma-separated body names (e.g. sun,moon,mercury)
    #[arg(long, default_value = "sun,moon,mercury,venus,mars,jupiter,saturn")]
    bodies: String,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Output SVG path
    #[arg(long, default_value = "graph.svg")]
    out: PathBuf,
}

fn parse_bodies(raw: &str) -> Result<Vec<Planet>> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Ok(name.parse::<Planet>()?))
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let start = civil_to_utc(&args.start, "00:00", 0)?;
    let end = civil_to_utc(&args.end, "00:00", 0)?;
    let bodies = parse_bodies(&args.bodies)?;

    let config = GraphConfig {
        range: (start, end),
        bodies,
        width: args.width,
        height: args.height,
    };

    let eph = EphemerisAdapter::new(SyntheticEphemeris::new());
    let mut graph = EphGraph::new(config);
    let mut canvas = SvgCanvas::new(args.width, args.height);
    graph.render(&eph, &mut canvas, true)?;

    fs::write(&args.out, canvas.document())?;
    println!("Wrote {}", args.out.display());
    Ok(())
}
