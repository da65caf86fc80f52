//! End-to-end ephemeris graph and dispatcher scenarios

use astrowheel::canvas::{DisplayList, DrawCmd, SvgCanvas};
use astrowheel::chart::ChartConfig;
use astrowheel::ephemeris::{EphemerisAdapter, SyntheticEphemeris};
use astrowheel::ephgraph::{EphGraph, GraphConfig, GraphPatch, SAMPLES_PER_BODY};
use astrowheel::viewer::{RenderMode, Viewer, ViewerPatch};
use astrowheel::zodiac::Planet;
use chrono::{TimeZone, Utc};

fn adapter() -> EphemerisAdapter<SyntheticEphemeris> {
    EphemerisAdapter::new(SyntheticEphemeris::new())
}

fn year_config(bodies: Vec<Planet>) -> GraphConfig {
    GraphConfig {
        range: (
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ),
        bodies,
        width: 800.0,
        height: 400.0,
    }
}

#[test]
fn sample_cache_scales_with_body_count() {
    let eph = adapter();
    let mut canvas = DisplayList::new();

    let mut one = EphGraph::new(year_config(vec![Planet::Sun]));
    one.render(&eph, &mut canvas, true).unwrap();
    assert_eq!(one.sample_count(), SAMPLES_PER_BODY);

    let mut three = EphGraph::new(year_config(vec![
        Planet::Sun,
        Planet::Mercury,
        Planet::Saturn,
    ]));
    three.render(&eph, &mut canvas, true).unwrap();
    assert_eq!(three.sample_count(), 3 * SAMPLES_PER_BODY);
}

#[test]
fn samples_advance_in_time_and_to_the_right() {
    let eph = adapter();
    let mut graph = EphGraph::new(year_config(vec![Planet::Sun]));
    let mut canvas = DisplayList::new();
    graph.render(&eph, &mut canvas, true).unwrap();

    let mut samples: Vec<_> = graph.samples().copied().collect();
    assert_eq!(samples.len(), SAMPLES_PER_BODY);
    samples.sort_by_key(|s| s.moment);

    for pair in samples.windows(2) {
        assert!(
            pair[1].moment > pair[0].moment,
            "duplicate instant {}",
            pair[1].moment
        );
        assert!(
            pair[1].position.x > pair[0].position.x,
            "x did not advance between {} and {}",
            pair[0].moment,
            pair[1].moment
        );
    }
}

#[test]
fn hover_over_a_plotted_dot_draws_a_callout() {
    let eph = adapter();
    let mut graph = EphGraph::new(year_config(vec![Planet::Sun]));
    let mut canvas = DisplayList::new();
    graph.render(&eph, &mut canvas, true).unwrap();

    // Sweep the bucket grid until a plotted sample is under the cursor.
    let mut found = None;
    'scan: for xi in 0..80 {
        for yi in 0..40 {
            let (x, y) = (xi as f64 * 10.0, yi as f64 * 10.0);
            if let Some(sample) = graph.sample_at(x, y) {
                found = Some(*sample);
                break 'scan;
            }
        }
    }
    let sample = found.expect("no plotted sun sample found");

    let mut hover = DisplayList::new();
    graph
        .point_description(&eph, &mut hover, sample.position.x, sample.position.y)
        .unwrap();
    let has_box = hover
        .commands()
        .iter()
        .any(|cmd| matches!(cmd, DrawCmd::FillRect { .. }));
    let has_date = hover.commands().iter().any(|cmd| {
        matches!(cmd, DrawCmd::Text { content, .. } if content.starts_with("2024-"))
    });
    assert!(has_box, "callout box not drawn");
    assert!(has_date, "callout date not drawn");
}

#[test]
fn hover_miss_clears_without_resampling() {
    let eph = adapter();
    let mut graph = EphGraph::new(year_config(vec![Planet::Sun]));
    let mut canvas = DisplayList::new();
    graph.render(&eph, &mut canvas, true).unwrap();
    let cached = graph.sample_count();

    // A point in the axis margin lands in an empty bucket.
    let mut hover = DisplayList::new();
    graph.point_description(&eph, &mut hover, 2.0, 2.0).unwrap();
    assert!(hover.is_empty(), "miss with no visible callout painted");
    assert_eq!(graph.sample_count(), cached);
}

#[test]
fn invalid_range_patch_leaves_config_untouched() {
    let eph = adapter();
    let mut graph = EphGraph::new(year_config(vec![Planet::Sun]));
    let before = graph.config().clone();

    let backwards = GraphPatch {
        range: Some((before.range.1, before.range.0)),
        width: Some(1024.0),
        ..GraphPatch::default()
    };
    assert!(graph.apply(&backwards).is_err());
    assert_eq!(graph.config().range, before.range);
    assert_eq!(graph.config().width, before.width);

    // Still renders with the original configuration.
    let mut canvas = DisplayList::new();
    graph.render(&eph, &mut canvas, true).unwrap();
    assert_eq!(graph.sample_count(), SAMPLES_PER_BODY);
}

#[test]
fn viewer_switches_modes_on_the_same_canvas() {
    let mut viewer = Viewer::new(
        adapter(),
        ChartConfig::default(),
        year_config(vec![Planet::Sun, Planet::Moon]),
    );

    let mut canvas = DisplayList::new();
    viewer
        .apply(
            &ViewerPatch {
                render: Some(RenderMode::EphemerisGraph),
                ..ViewerPatch::default()
            },
            &mut canvas,
        )
        .unwrap();
    assert_eq!(viewer.graph().sample_count(), 2 * SAMPLES_PER_BODY);

    viewer
        .apply(
            &ViewerPatch {
                render: Some(RenderMode::Chart),
                ..ViewerPatch::default()
            },
            &mut canvas,
        )
        .unwrap();
    assert!(viewer.chart().position(Planet::Sun).is_some());
    // The graph cache survives the mode switch.
    assert_eq!(viewer.graph().sample_count(), 2 * SAMPLES_PER_BODY);
}

#[test]
fn svg_graph_document_renders() {
    let eph = adapter();
    let cfg = year_config(vec![Planet::Sun, Planet::Mars]);
    let mut canvas = SvgCanvas::new(cfg.width, cfg.height);
    let mut graph = EphGraph::new(cfg);
    graph.render(&eph, &mut canvas, true).unwrap();

    let doc = canvas.document();
    assert!(doc.contains("<circle"));
    assert!(doc.trim_end().ends_with("</svg>"));
}
