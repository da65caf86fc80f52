//! Natal Chart SVG Tool
//!
//! Renders a natal wheel for a civil date, time, and location to an SVG
//! file. Location and timezone default to the last-used values from the
//! preference file and are written back after a successful render.
//!
//! Usage:
//!   cargo run --bin chart_svg -- --date 1990-06-15 --time 12:30 --out chart.svg

use std::fs;
use std::path::PathBuf;

use astrowheel::canvas::SvgCanvas;
use astrowheel::chart::{Chart, ChartConfig};
use astrowheel::ephemeris::{EphemerisAdapter, SyntheticEphemeris};
use astrowheel::localtime::{civil_to_utc, parse_utc_offset};
use astrowheel::prefs::{FilePrefs, Preferences};
use astrowheel::report::positions_table;
use clap::Parser;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Natal Chart SVG Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Renders a natal chart wheel to an SVG file",
    long_about = None
)]
struct Args {
    /// Civil date of the chart (YYYY-MM-DD)
    #[arg(long)]
    date: String,

    /// Wall-clock time of the chart (HH:MM)
    #[arg(long, default_value = "12:00")]
    time: String,

    /// UTC offset of the wall-clock time (+HH:MM, -HH:MM, or Z)
    #[arg(long, default_value = "Z")]
    offset: String,

    /// Geographic latitude in degrees; defaults to the stored preference
    #[arg(long)]
    geolat: Option<f64>,

    /// Geographic longitude in degrees; defaults to the stored preference
    #[arg(long)]
    geolon: Option<f64>,

    /// Canvas size in pixels (square)
    #[arg(long, default_value_t = 600.0)]
    size: f64,

    /// Preference file path
    #[arg(long, default_value = "astrowheel_prefs.json")]
    prefs: PathBuf,

    /// Output SVG path
    #[arg(long, default_value = "chart.svg")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut store = FilePrefs::open(&args.prefs);
    let mut prefs = Preferences::load(&store);

    let geolat = args.geolat.unwrap_or(prefs.geolat);
    let geolon = args.geolon.unwrap_or(prefs.geolon);
    let offset_minutes = parse_utc_offset(&args.offset)?;
    let moment = civil_to_utc(&args.date, &args.time, offset_minutes)?;

    let config = ChartConfig {
        moment,
        geolat,
        geolon,
        width: args.size,
        height: args.size,
        radius: args.size * 0.4,
    };

    let eph = EphemerisAdapter::new(SyntheticEphemeris::new());
    let mut chart = Chart::new(config);
    let mut canvas = SvgCanvas::new(args.size, args.size);
    chart.render(&eph, &mut canvas)?;

    fs::write(&args.out, canvas.document())?;
    println!("Wrote {}", args.out.display());
    println!();
    print!("{}", positions_table(&chart)?);

    prefs.geolat = geolat;
    prefs.geolon = geolon;
    prefs.timestamp_millis = Some(moment.timestamp_millis());
    prefs.save(&mut store);

    Ok(())
}
