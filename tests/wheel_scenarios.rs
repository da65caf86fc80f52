//! End-to-end natal wheel scenarios through the public API

use astrowheel::canvas::{DisplayList, DrawCmd, SvgCanvas};
use astrowheel::chart::{Chart, ChartConfig};
use astrowheel::ephemeris::{EphemerisAdapter, SyntheticEphemeris};
use astrowheel::localtime::civil_to_utc;
use astrowheel::report::positions_table;
use astrowheel::zodiac::{Planet, Sign};
use chrono::{TimeZone, Utc};

fn adapter() -> EphemerisAdapter<SyntheticEphemeris> {
    EphemerisAdapter::new(SyntheticEphemeris::new())
}

fn chart_at(moment: chrono::DateTime<Utc>) -> ChartConfig {
    ChartConfig {
        moment,
        geolat: -19.9167,
        geolon: -43.9333,
        ..ChartConfig::default()
    }
}

#[test]
fn render_places_every_body_on_its_ring() {
    let eph = adapter();
    let config = chart_at(Utc.with_ymd_and_hms(1990, 6, 15, 15, 30, 0).unwrap());
    let mut chart = Chart::new(config.clone());
    let mut canvas = DisplayList::new();
    chart.render(&eph, &mut canvas).unwrap();

    let center_x = config.width / 2.0;
    let center_y = config.height / 2.0;
    let ring = config.radius + 20.0;
    for planet in Planet::ALL {
        let placement = chart.position(planet).unwrap();
        let dx = placement.position.x - center_x;
        let dy = placement.position.y - center_y;
        let dist = (dx * dx + dy * dy).sqrt();
        assert!(
            (dist - ring).abs() < 1e-6,
            "{} at radius {} instead of {}",
            planet.name(),
            dist,
            ring
        );
    }
}

#[test]
fn placements_agree_with_direct_ephemeris_queries() {
    let eph = adapter();
    let moment = Utc.with_ymd_and_hms(2005, 3, 1, 9, 0, 0).unwrap();
    let mut chart = Chart::new(chart_at(moment));
    let mut canvas = DisplayList::new();
    chart.render(&eph, &mut canvas).unwrap();

    let jd = eph.julian_day(&moment).unwrap();
    for planet in Planet::ALL {
        let expected = eph.body_position(jd, planet).unwrap();
        let placement = chart.position(planet).unwrap();
        assert!((placement.longitude - expected.longitude).abs() < 1e-9);
        assert_eq!(
            placement.speed_longitude < 0.0,
            expected.is_retrograde(),
            "{} retrograde flag",
            planet.name()
        );
    }
}

#[test]
fn cusps_rotate_with_the_observer() {
    let eph = adapter();
    let moment = Utc.with_ymd_and_hms(2010, 9, 21, 18, 0, 0).unwrap();

    let mut east = Chart::new(ChartConfig {
        moment,
        geolon: 0.0,
        ..ChartConfig::default()
    });
    let mut west = Chart::new(ChartConfig {
        moment,
        geolon: -90.0,
        ..ChartConfig::default()
    });
    let mut canvas = DisplayList::new();
    east.render(&eph, &mut canvas).unwrap();
    west.render(&eph, &mut canvas).unwrap();

    let shift = (east.houses()[0] - west.houses()[0]).rem_euclid(360.0);
    assert!((shift - 90.0).abs() < 1e-6, "ascendant shift was {}", shift);
}

#[test]
fn wheel_draws_twelve_sign_glyphs() {
    let eph = adapter();
    let mut chart = Chart::new(chart_at(Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap()));
    let mut canvas = DisplayList::new();
    chart.render(&eph, &mut canvas).unwrap();

    let texts: Vec<&str> = canvas
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCmd::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect();
    for index in 0..12 {
        let glyph = Sign::from_longitude(index as f64 * 30.0 + 15.0).glyph();
        assert!(texts.contains(&glyph), "missing sign glyph {}", glyph);
    }
}

#[test]
fn svg_document_is_self_contained() {
    let eph = adapter();
    let mut chart = Chart::new(chart_at(Utc.with_ymd_and_hms(1984, 11, 5, 6, 45, 0).unwrap()));
    let mut canvas = SvgCanvas::new(600.0, 600.0);
    chart.render(&eph, &mut canvas).unwrap();

    let doc = canvas.document();
    assert!(doc.starts_with("<svg"));
    assert!(doc.trim_end().ends_with("</svg>"));
    assert!(doc.contains("<circle"));
    assert!(doc.contains("<line"));
    assert!(doc.contains("<text"));
}

#[test]
fn report_follows_render() {
    let eph = adapter();
    let moment = civil_to_utc("1990-06-15", "12:30", -180).unwrap();
    let mut chart = Chart::new(chart_at(moment));
    let mut canvas = DisplayList::new();
    chart.render(&eph, &mut canvas).unwrap();

    let table = positions_table(&chart).unwrap();
    assert!(table.contains("Sun"));
    assert!(table.contains("ASC"));
    // Zodiacal formatting: degrees, a glyph, then minutes and seconds.
    assert!(table.contains('\u{00B0}'));
}
