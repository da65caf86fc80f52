//! Natal chart wheel renderer
//!
//! Draws the horoscope wheel: outer circle, house spokes (heavier at the
//! angular houses, arrowheads on the ascendant and midheaven), planet
//! glyphs colored by essential dignity with retrograde markers, aspect
//! lines between every body pair, and the zodiac sign ring. Configuration
//! changes arrive as patches whose present fields overwrite and absent
//! fields retain.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;
use nalgebra::Point2;

use crate::aspects::{classify, DEFAULT_ORB};
use crate::canvas::{Canvas, Color, DisplayList, TextAlign};
use crate::ephemeris::{EphemerisAdapter, HouseSystem, RawEphemeris};
use crate::projection::{project, wheel_rotation};
use crate::zodiac::{dignity, Dignity, Planet, Sign};
use crate::Result;

/// Stroke color of the wheel skeleton and sign ring
const WHEEL_STROKE: Color = Color::WHITE;
/// Color of the tick joining a planet glyph to the wheel
const TICK_COLOR: Color = Color::rgb(0x00, 0xCC, 0xFF);

/// Radius of the hub circle at the wheel center
const HUB_RADIUS: f64 = 20.0;
/// How far outside the wheel the planet glyphs sit
const PLANET_RING_OFFSET: f64 = 20.0;
/// How far outside the wheel the sign glyphs sit
const SIGN_RING_OFFSET: f64 = 40.0;
/// Length of the sign boundary spokes
const SIGN_SPOKE_LENGTH: f64 = 30.0;
/// Aspect lines are drawn just inside the wheel
const ASPECT_INSET: f64 = 4.0;
/// Arrowhead length on the ascendant and midheaven spokes
const ARROW_SIZE: f64 = 15.0;
/// Font size of planet and sign glyphs
const GLYPH_SIZE: f64 = 20.0;
/// Font size of the retrograde marker
const RETRO_SIZE: f64 = 10.0;

/// Glyph fill color for a dignity classification
pub fn dignity_color(dignity: Option<Dignity>) -> Color {
    match dignity {
        None => Color::rgb(0x00, 0xCC, 0xFF),
        Some(Dignity::Domicile) => Color::rgb(0x00, 0xFF, 0x00),
        Some(Dignity::Exaltation) => Color::rgb(0xFF, 0xFF, 0x00),
        Some(Dignity::Fall) => Color::rgb(0xCD, 0x5C, 0x5C),
        Some(Dignity::Detriment) => Color::rgb(0xFF, 0x00, 0x00),
    }
}

/// Full chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// UTC instant of the chart
    pub moment: DateTime<Utc>,
    /// Geographic latitude, degrees north
    pub geolat: f64,
    /// Geographic longitude, degrees east
    pub geolon: f64,
    pub width: f64,
    pub height: f64,
    /// Radius of the main wheel circle
    pub radius: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            moment: DateTime::UNIX_EPOCH,
            geolat: 0.0,
            geolon: 0.0,
            width: 600.0,
            height: 600.0,
            radius: 240.0,
        }
    }
}

/// Partial chart configuration: present fields overwrite, absent retain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartPatch {
    pub moment: Option<DateTime<Utc>>,
    pub geolat: Option<f64>,
    pub geolon: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
}

impl ChartConfig {
    /// Merge a patch into this configuration
    pub fn apply(&mut self, patch: &ChartPatch) {
        if let Some(moment) = patch.moment {
            self.moment = moment;
        }
        if let Some(geolat) = patch.geolat {
            self.geolat = geolat;
        }
        if let Some(geolon) = patch.geolon {
            self.geolon = geolon;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(radius) = patch.radius {
            self.radius = radius;
        }
    }
}

/// One body's computed placement from the last render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetPlacement {
    pub longitude: f64,
    pub speed_longitude: f64,
    /// Canvas position of the glyph
    pub position: Point2<f64>,
    pub dignity: Option<Dignity>,
}

/// The natal wheel renderer
#[derive(Debug, Default)]
pub struct Chart {
    config: ChartConfig,
    positions: HashMap<Planet, PlanetPlacement>,
    cusps: [f64; 12],
}

impl Chart {
    pub fn new(config: ChartConfig) -> Self {
        Chart {
            config,
            positions: HashMap::new(),
            cusps: [0.0; 12],
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Merge a configuration patch; takes effect on the next render
    pub fn apply(&mut self, patch: &ChartPatch) {
        self.config.apply(patch);
    }

    /// Placement of a body from the last completed render pass
    pub fn position(&self, planet: Planet) -> Option<&PlanetPlacement> {
        self.positions.get(&planet)
    }

    /// House cusps from the last completed render pass
    pub fn houses(&self) -> &[f64; 12] {
        &self.cusps
    }

    /// Wheel rotation offset for the last computed cusps
    pub fn rotation_offset(&self) -> f64 {
        wheel_rotation(self.cusps[0])
    }

    /// Render the full wheel
    ///
    /// The pass is composed off-screen and replayed onto `target` only on
    /// success: an ephemeris failure aborts it without painting anything
    /// partial.
    pub fn render<R: RawEphemeris>(
        &mut self,
        eph: &EphemerisAdapter<R>,
        target: &mut dyn Canvas,
    ) -> Result<()> {
        let cfg = self.config.clone();
        let center = Point2::new(cfg.width / 2.0, cfg.height / 2.0);
        let mut frame = DisplayList::new();
        frame.clear();

        let jd = eph.julian_day(&cfg.moment)?;
        let cusps = eph.house_cusps(jd, cfg.geolat, cfg.geolon, HouseSystem::Placidus)?;
        let rotation = wheel_rotation(cusps[0]);
        debug!("chart render: jd={:.5} asc={:.4}", jd, cusps[0]);

        frame.circle(center, cfg.radius, WHEEL_STROKE, 1.0);
        self.draw_houses(&mut frame, &cusps, rotation, center);

        let placements = self.compute_placements(eph, jd, rotation, center, &mut frame)?;
        self.draw_aspects(&mut frame, &placements, rotation, center);
        self.draw_signs(&mut frame, rotation, center);

        // Commit only after every ephemeris call has succeeded.
        frame.replay(target);
        self.cusps = cusps;
        self.positions = placements.into_iter().collect();
        Ok(())
    }

    fn draw_houses(
        &self,
        frame: &mut DisplayList,
        cusps: &[f64; 12],
        rotation: f64,
        center: Point2<f64>,
    ) {
        let cfg = &self.config;
        frame.circle(center, HUB_RADIUS, WHEEL_STROKE, 3.0);

        for (i, cusp) in cusps.iter().enumerate() {
            // Houses 1, 4, 7, and 10 are angular: longer, heavier spokes.
            let angular = i % 3 == 0;
            let (spoke_radius, stroke) = if angular {
                (cfg.radius + PLANET_RING_OFFSET, 3.0)
            } else {
                (cfg.radius, 1.0)
            };

            let inner = project(*cusp, HUB_RADIUS, rotation, center);
            let outer = project(*cusp, spoke_radius, rotation, center);
            frame.line(inner, outer, WHEEL_STROKE, stroke);

            // Ascendant and midheaven carry arrowheads.
            if i == 0 || i == 9 {
                let rads = (rotation - cusp).to_radians();
                for direction in [1.0, -1.0] {
                    let barb_rads = rads + direction * std::f64::consts::PI * 1.15;
                    let barb = Point2::new(
                        outer.x + ARROW_SIZE * barb_rads.cos(),
                        outer.y + ARROW_SIZE * barb_rads.sin(),
                    );
                    frame.line(outer, barb, WHEEL_STROKE, stroke);
                }
            }
        }
    }

    fn compute_placements<R: RawEphemeris>(
        &self,
        eph: &EphemerisAdapter<R>,
        jd: f64,
        rotation: f64,
        center: Point2<f64>,
        frame: &mut DisplayList,
    ) -> Result<Vec<(Planet, PlanetPlacement)>> {
        let cfg = &self.config;
        let glyph_radius = cfg.radius + PLANET_RING_OFFSET;
        let mut placements = Vec::with_capacity(Planet::ALL.len());

        for planet in Planet::ALL {
            let pos = eph.body_position(jd, planet)?;
            let point = project(pos.longitude, glyph_radius, rotation, center);
            let dig = dignity(planet, pos.longitude);
            let color = dignity_color(dig);

            frame.text(
                planet.glyph(),
                Point2::new(point.x, point.y + GLYPH_SIZE / 4.0),
                GLYPH_SIZE,
                color,
                TextAlign::Center,
            );
            if pos.is_retrograde() {
                frame.text(
                    "R",
                    Point2::new(point.x + GLYPH_SIZE / 3.0, point.y - GLYPH_SIZE / 3.0),
                    RETRO_SIZE,
                    color,
                    TextAlign::Left,
                );
            }

            // Short tick joining the glyph back to the wheel.
            let rim = project(pos.longitude, cfg.radius, rotation, center);
            let toward_glyph = point - rim;
            let length = toward_glyph.norm();
            let tick_end = if length > 5.0 {
                rim + toward_glyph * (8.0 / length)
            } else {
                point
            };
            frame.line(rim, tick_end, TICK_COLOR, 1.0);

            placements.push((
                planet,
                PlanetPlacement {
                    longitude: pos.longitude,
                    speed_longitude: pos.speed_longitude,
                    position: point,
                    dignity: dig,
                },
            ));
        }

        Ok(placements)
    }

    fn draw_aspects(
        &self,
        frame: &mut DisplayList,
        placements: &[(Planet, PlanetPlacement)],
        rotation: f64,
        center: Point2<f64>,
    ) {
        let aspect_radius = self.config.radius - ASPECT_INSET;
        for i in 0..placements.len() {
            for j in (i + 1)..placements.len() {
                let (_, a) = &placements[i];
                let (_, b) = &placements[j];
                if let Some(aspect) = classify(a.longitude, b.longitude, DEFAULT_ORB) {
                    let from = project(a.longitude, aspect_radius, rotation, center);
                    let to = project(b.longitude, aspect_radius, rotation, center);
                    frame.line(from, to, aspect.color(), 1.0);
                }
            }
        }
    }

    fn draw_signs(&self, frame: &mut DisplayList, rotation: f64, center: Point2<f64>) {
        let cfg = &self.config;
        let glyph_radius = cfg.radius + SIGN_RING_OFFSET;

        for sign in Sign::ALL {
            let start = sign.index() as f64 * 30.0;
            let mid = start + 15.0;

            let at = project(mid, glyph_radius, rotation, center);
            frame.text(
                sign.glyph(),
                Point2::new(at.x, at.y + GLYPH_SIZE / 4.0),
                GLYPH_SIZE,
                WHEEL_STROKE,
                TextAlign::Center,
            );

            let from = project(start, cfg.radius, rotation, center);
            let to = project(start, cfg.radius + SIGN_SPOKE_LENGTH, rotation, center);
            frame.line(from, to, WHEEL_STROKE, 1.0);
        }
    }
}
