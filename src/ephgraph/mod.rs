//! Ephemeris graph renderer
//!
//! Plots planetary longitude against time for one or more bodies over a
//! date range, caching every painted sample in a spatial index so hovering
//! near a point can raise a callout with the sample's zodiacal position
//! and date. Samples rebuild on every full render and survive across the
//! "repaint without resample" passes used to show and clear the callout.

use chrono::{DateTime, Utc};
use log::debug;
use nalgebra::Point2;

use crate::canvas::{Canvas, Color, DisplayList, TextAlign};
use crate::ephemeris::{EphemerisAdapter, RawEphemeris};
use crate::projection::SpatialIndex;
use crate::zodiac::{Planet, Sign};
use crate::{AstrowheelError, Result};

/// Samples taken per body across the configured range
pub const SAMPLES_PER_BODY: usize = 200;

/// Margin between the canvas edge and the axes
const AXIS_PAD: f64 = 20.0;

/// Callout box geometry
const CALLOUT_WIDTH: f64 = 75.0;
const CALLOUT_HEIGHT: f64 = 30.0;
const CALLOUT_OFFSET: f64 = 20.0;
const CALLOUT_RING: Color = Color::rgb(0x00, 0xCC, 0xCC);

/// Fixed plot color for each body
pub fn planet_color(planet: Planet) -> Color {
    match planet {
        Planet::Sun => Color::rgb(0xFF, 0xD7, 0x00),
        Planet::Moon => Color::rgb(0xC0, 0xC0, 0xC0),
        Planet::Mercury => Color::rgb(0xFF, 0xA5, 0x00),
        Planet::Venus => Color::rgb(0x00, 0xFF, 0x7F),
        Planet::Mars => Color::rgb(0xFF, 0x45, 0x00),
        Planet::Jupiter => Color::rgb(0x87, 0xCE, 0xEB),
        Planet::Saturn => Color::rgb(0xDD, 0xA0, 0xDD),
    }
}

/// Full graph configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    /// Half-open time range plotted left to right
    pub range: (DateTime<Utc>, DateTime<Utc>),
    /// Bodies to plot
    pub bodies: Vec<Planet>,
    pub width: f64,
    pub height: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            range: (
                DateTime::UNIX_EPOCH,
                DateTime::UNIX_EPOCH + chrono::Duration::days(365),
            ),
            bodies: vec![Planet::Sun],
            width: 600.0,
            height: 600.0,
        }
    }
}

/// Partial graph configuration: present fields overwrite, absent retain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphPatch {
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub bodies: Option<Vec<Planet>>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// One plotted observation of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSample {
    pub planet: Planet,
    pub longitude: f64,
    pub speed_longitude: f64,
    /// Canvas position of the painted dot
    pub position: Point2<f64>,
    pub moment: DateTime<Utc>,
}

/// The longitude-vs-time graph renderer
#[derive(Debug, Default)]
pub struct EphGraph {
    config: GraphConfig,
    samples: SpatialIndex<PlanetSample>,
    has_callout: bool,
}

impl EphGraph {
    pub fn new(config: GraphConfig) -> Self {
        EphGraph {
            config,
            samples: SpatialIndex::new(),
            has_callout: false,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Number of samples cached by the last full render
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Sample under a canvas point, if one is cached in its bucket
    pub fn sample_at(&self, x: f64, y: f64) -> Option<&PlanetSample> {
        self.samples.first_at(x, y)
    }

    /// Every cached sample from the last full render, in unspecified order
    pub fn samples(&self) -> impl Iterator<Item = &PlanetSample> {
        self.samples.iter()
    }

    fn validate_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
        if start >= end {
            return Err(AstrowheelError::InvalidInput(format!(
                "graph range start {} must precede end {}",
                start, end
            )));
        }
        Ok(())
    }

    /// Merge a configuration patch; takes effect on the next render
    ///
    /// A range whose start does not precede its end is rejected as invalid
    /// input: the whole patch is discarded and no state changes.
    pub fn apply(&mut self, patch: &GraphPatch) -> Result<()> {
        if let Some((start, end)) = patch.range {
            Self::validate_range(start, end)?;
        }
        if let Some(range) = patch.range {
            self.config.range = range;
        }
        if let Some(bodies) = &patch.bodies {
            self.config.bodies = bodies.clone();
        }
        if let Some(width) = patch.width {
            self.config.width = width;
        }
        if let Some(height) = patch.height {
            self.config.height = height;
        }
        Ok(())
    }

    /// Render the graph
    ///
    /// With `resample` set, the sample cache is rebuilt by querying the
    /// ephemeris at [`SAMPLES_PER_BODY`] evenly spaced instants per body;
    /// otherwise cached samples are repainted without touching the
    /// adapter. The pass is composed off-screen and committed only on
    /// success.
    pub fn render<R: RawEphemeris>(
        &mut self,
        eph: &EphemerisAdapter<R>,
        target: &mut dyn Canvas,
        resample: bool,
    ) -> Result<()> {
        let cfg = self.config.clone();
        // A constructor-supplied configuration never went through `apply`,
        // so the range is re-checked before any sampling.
        Self::validate_range(cfg.range.0, cfg.range.1)?;
        let mut frame = DisplayList::new();
        frame.clear();
        self.draw_axes(&mut frame);

        if resample {
            let samples = self.collect_samples(eph, &cfg)?;
            self.samples.clear();
            for sample in samples {
                self.samples
                    .insert(sample.position.x, sample.position.y, sample);
            }
            debug!(
                "ephemeris graph resampled: {} bodies, {} samples",
                cfg.bodies.len(),
                self.samples.len()
            );
        }

        for sample in self.samples.iter() {
            frame.fill_circle(sample.position, 1.0, planet_color(sample.planet));
        }

        frame.replay(target);
        Ok(())
    }

    /// Show or clear the hover callout for a mouse position
    ///
    /// A miss while a callout is visible triggers a repaint without
    /// resampling to clear it; a hit repaints, rings the first sample in
    /// the bucket, and draws a label box clamped inside the canvas
    /// horizontally.
    pub fn point_description<R: RawEphemeris>(
        &mut self,
        eph: &EphemerisAdapter<R>,
        target: &mut dyn Canvas,
        x: f64,
        y: f64,
    ) -> Result<()> {
        let sample = match self.samples.first_at(x, y).copied() {
            Some(sample) => sample,
            None => {
                if self.has_callout {
                    self.has_callout = false;
                    self.render(eph, target, false)?;
                }
                return Ok(());
            }
        };

        self.has_callout = true;
        self.render(eph, target, false)?;

        target.circle(sample.position, 4.0, CALLOUT_RING, 1.0);

        let mut x0 = x + CALLOUT_OFFSET;
        if x0 + CALLOUT_WIDTH > self.config.width {
            x0 = x - CALLOUT_WIDTH - CALLOUT_OFFSET;
        }
        let y0 = y - CALLOUT_OFFSET / 2.0;

        let origin = Point2::new(x0, y0);
        target.fill_rect(origin, CALLOUT_WIDTH, CALLOUT_HEIGHT, Color::WHITE);
        target.rect(origin, CALLOUT_WIDTH, CALLOUT_HEIGHT, Color::WHITE, 1.0);

        let sign = Sign::from_longitude(sample.longitude);
        let within = sample.longitude % 30.0;
        let deg = within.floor();
        let min = ((within - deg) * 60.0).floor();
        target.text(
            sign.glyph(),
            Point2::new(x0 + 2.0, y0 + 14.0),
            20.0,
            Color::BLACK,
            TextAlign::Left,
        );
        target.text(
            &format!("{}\u{00B0}{}'", deg, min),
            Point2::new(x0 + 22.0, y0 + 14.0),
            12.0,
            Color::BLACK,
            TextAlign::Left,
        );
        target.text(
            &sample.moment.format("%Y-%m-%d").to_string(),
            Point2::new(x0 + 2.0, y0 + 26.0),
            12.0,
            Color::BLACK,
            TextAlign::Left,
        );
        Ok(())
    }

    fn draw_axes(&self, frame: &mut DisplayList) {
        let cfg = &self.config;
        let origin = Point2::new(AXIS_PAD, cfg.height - AXIS_PAD);
        frame.line(
            origin,
            Point2::new(AXIS_PAD, AXIS_PAD),
            Color::WHITE,
            1.0,
        );
        frame.line(
            origin,
            Point2::new(cfg.width - AXIS_PAD, cfg.height - AXIS_PAD),
            Color::WHITE,
            1.0,
        );
        frame.text(
            "Time",
            Point2::new(cfg.width - AXIS_PAD, cfg.height - AXIS_PAD + 14.0),
            12.0,
            Color::WHITE,
            TextAlign::Right,
        );
        frame.text(
            "Angle",
            Point2::new(AXIS_PAD - 2.0, AXIS_PAD - 6.0),
            12.0,
            Color::WHITE,
            TextAlign::Left,
        );
    }

    fn collect_samples<R: RawEphemeris>(
        &self,
        eph: &EphemerisAdapter<R>,
        cfg: &GraphConfig,
    ) -> Result<Vec<PlanetSample>> {
        let origin_x = AXIS_PAD;
        let origin_y = cfg.height - AXIS_PAD;
        let x_step = (cfg.width - 2.0 * AXIS_PAD) / SAMPLES_PER_BODY as f64;
        let y_span = cfg.height - 2.0 * AXIS_PAD;

        let t0 = cfg.range.0.timestamp_millis();
        let t1 = cfg.range.1.timestamp_millis();
        let dt = (t1 - t0) / SAMPLES_PER_BODY as i64;

        let mut samples = Vec::with_capacity(cfg.bodies.len() * SAMPLES_PER_BODY);
        for &planet in &cfg.bodies {
            for i in 0..SAMPLES_PER_BODY {
                let millis = t0 + i as i64 * dt;
                let moment = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
                    AstrowheelError::InvalidInput(format!(
                        "instant {} ms is not representable",
                        millis
                    ))
                })?;
                let jd = eph.julian_day(&moment)?;
                let pos = eph.body_position(jd, planet)?;

                let x = origin_x + i as f64 * x_step;
                let y = origin_y - pos.longitude * y_span / 360.0;
                samples.push(PlanetSample {
                    planet,
                    longitude: pos.longitude,
                    speed_longitude: pos.speed_longitude,
                    position: Point2::new(x, y),
                    moment,
                });
            }
        }
        Ok(samples)
    }
}
