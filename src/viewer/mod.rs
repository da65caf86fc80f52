//! Canvas dispatcher
//!
//! Owns both renderers and the ephemeris adapter. Configuration patches
//! are forwarded to both renderers unconditionally so either mode stays
//! warm; the pass drawn, if any, is the one the patch names.

use crate::canvas::Canvas;
use crate::chart::{Chart, ChartConfig, ChartPatch};
use crate::ephemeris::{EphemerisAdapter, RawEphemeris};
use crate::ephgraph::{EphGraph, GraphConfig, GraphPatch};
use crate::Result;

/// Which renderer a patch asks to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Chart,
    EphemerisGraph,
}

/// Combined configuration patch for the dispatcher
#[derive(Debug, Clone, Default)]
pub struct ViewerPatch {
    pub chart: Option<ChartPatch>,
    pub graph: Option<GraphPatch>,
    /// When set, draw this renderer after forwarding the sub-patches
    pub render: Option<RenderMode>,
}

/// Dispatcher holding the chart wheel and the ephemeris graph
#[derive(Debug)]
pub struct Viewer<R> {
    eph: EphemerisAdapter<R>,
    chart: Chart,
    graph: EphGraph,
}

impl<R: RawEphemeris> Viewer<R> {
    pub fn new(eph: EphemerisAdapter<R>, chart: ChartConfig, graph: GraphConfig) -> Self {
        Viewer {
            eph,
            chart: Chart::new(chart),
            graph: EphGraph::new(graph),
        }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn graph(&self) -> &EphGraph {
        &self.graph
    }

    pub fn ephemeris(&self) -> &EphemerisAdapter<R> {
        &self.eph
    }

    /// Forward sub-patches to both renderers, then draw the named mode
    ///
    /// Both renderers receive their patches even when the other mode is
    /// the one displayed, so switching modes later needs no
    /// reconfiguration.
    pub fn apply(&mut self, patch: &ViewerPatch, target: &mut dyn Canvas) -> Result<()> {
        if let Some(chart_patch) = &patch.chart {
            self.chart.apply(chart_patch);
        }
        if let Some(graph_patch) = &patch.graph {
            self.graph.apply(graph_patch)?;
        }
        match patch.render {
            Some(RenderMode::Chart) => self.chart.render(&self.eph, target),
            Some(RenderMode::EphemerisGraph) => self.graph.render(&self.eph, target, true),
            None => Ok(()),
        }
    }

    /// Hover lookup for the ephemeris graph
    pub fn describe_point(&mut self, target: &mut dyn Canvas, x: f64, y: f64) -> Result<()> {
        self.graph.point_description(&self.eph, target, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, DrawCmd};
    use crate::ephemeris::SyntheticEphemeris;
    use crate::zodiac::Planet;
    use chrono::{TimeZone, Utc};

    fn viewer() -> Viewer<SyntheticEphemeris> {
        Viewer::new(
            EphemerisAdapter::new(SyntheticEphemeris::new()),
            ChartConfig::default(),
            GraphConfig::default(),
        )
    }

    fn has_circle(canvas: &DisplayList) -> bool {
        canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCmd::Circle { .. }))
    }

    #[test]
    fn test_patch_without_render_draws_nothing() {
        let mut v = viewer();
        let mut canvas = DisplayList::new();
        v.apply(
            &ViewerPatch {
                chart: Some(ChartPatch {
                    geolat: Some(10.0),
                    ..ChartPatch::default()
                }),
                ..ViewerPatch::default()
            },
            &mut canvas,
        )
        .unwrap();
        assert!(canvas.is_empty());
        assert_eq!(v.chart().config().geolat, 10.0);
    }

    #[test]
    fn test_mode_switch_keeps_both_configs_warm() {
        let mut v = viewer();
        let mut canvas = DisplayList::new();

        // First paint the chart with a specific location.
        v.apply(
            &ViewerPatch {
                chart: Some(ChartPatch {
                    geolat: Some(-19.9167),
                    geolon: Some(-43.9333),
                    ..ChartPatch::default()
                }),
                render: Some(RenderMode::Chart),
                ..ViewerPatch::default()
            },
            &mut canvas,
        )
        .unwrap();
        // The wheel circle is drawn, the graph never sampled.
        assert!(has_circle(&canvas));
        assert_eq!(v.graph().sample_count(), 0);

        // Switch to the graph without touching the chart patch again.
        let mut graph_canvas = DisplayList::new();
        v.apply(
            &ViewerPatch {
                graph: Some(GraphPatch {
                    bodies: Some(vec![Planet::Jupiter]),
                    ..GraphPatch::default()
                }),
                render: Some(RenderMode::EphemerisGraph),
                ..ViewerPatch::default()
            },
            &mut graph_canvas,
        )
        .unwrap();
        assert!(v.graph().sample_count() > 0);

        // The chart's configuration survived the mode switch.
        assert_eq!(v.chart().config().geolat, -19.9167);
        assert_eq!(v.chart().config().geolon, -43.9333);
    }

    #[test]
    fn test_sub_patches_forwarded_even_when_other_mode_renders() {
        let mut v = viewer();
        let mut canvas = DisplayList::new();
        let new_start = Utc.with_ymd_and_hms(1995, 1, 1, 0, 0, 0).unwrap();
        let new_end = Utc.with_ymd_and_hms(1995, 6, 1, 0, 0, 0).unwrap();

        v.apply(
            &ViewerPatch {
                graph: Some(GraphPatch {
                    range: Some((new_start, new_end)),
                    ..GraphPatch::default()
                }),
                render: Some(RenderMode::Chart),
                ..ViewerPatch::default()
            },
            &mut canvas,
        )
        .unwrap();

        // The graph accepted its patch even though the chart was drawn.
        assert_eq!(v.graph().config().range, (new_start, new_end));
    }

    #[test]
    fn test_invalid_graph_patch_propagates() {
        let mut v = viewer();
        let mut canvas = DisplayList::new();
        let instant = Utc.with_ymd_and_hms(1995, 1, 1, 0, 0, 0).unwrap();
        let result = v.apply(
            &ViewerPatch {
                graph: Some(GraphPatch {
                    range: Some((instant, instant)),
                    ..GraphPatch::default()
                }),
                render: Some(RenderMode::EphemerisGraph),
                ..ViewerPatch::default()
            },
            &mut canvas,
        );
        assert!(result.is_err());
    }
}
