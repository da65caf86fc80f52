//! Plain-text position report
//!
//! Renders the placements of a computed chart as an aligned table with
//! zodiacal longitudes, daily motion, and the angular cusps.

use std::fmt::Write;

use crate::chart::Chart;
use crate::zodiac::{format_zodiacal, Planet};
use crate::{AstrowheelError, Result};

/// Format the placements of a rendered chart as a table
///
/// Fails with [`AstrowheelError::MissingPosition`] if the chart has not
/// completed a render pass for every body.
pub fn positions_table(chart: &Chart) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<14} {:>10}", "Planet", "Longitude", "Speed");
    let _ = writeln!(out, "{}", "-".repeat(36));
    for planet in Planet::ALL {
        let placement = chart
            .position(planet)
            .ok_or_else(|| AstrowheelError::MissingPosition(planet.name().to_string()))?;
        let motion = if placement.speed_longitude < 0.0 {
            format!("{:8.4} R", placement.speed_longitude)
        } else {
            format!("{:8.4}", placement.speed_longitude)
        };
        let _ = writeln!(
            out,
            "{} {:<8} {:<14} {:>10}",
            planet.glyph(),
            planet.name(),
            format_zodiacal(placement.longitude),
            motion
        );
    }
    let cusps = chart.houses();
    let _ = writeln!(out, "{}", "-".repeat(36));
    let _ = writeln!(out, "{:<10} {:<14}", "ASC", format_zodiacal(cusps[0]));
    let _ = writeln!(out, "{:<10} {:<14}", "MC", format_zodiacal(cusps[9]));
    Ok(out)
}
