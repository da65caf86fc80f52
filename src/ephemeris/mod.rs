//! Ephemeris engine interface and marshalling adapter
//!
//! The engine is a black box exporting three entry points: calendar-to-
//! Julian-day conversion, body position calculation, and house cusp
//! calculation. All numeric exchange happens through caller-provided
//! slices, and failures are signalled by a negative status code plus a
//! null-terminated error string written into a byte buffer. The
//! [`RawEphemeris`] trait mirrors that surface; [`EphemerisAdapter`] wraps
//! any implementation and marshals the buffers into typed `Result` values.

use chrono::{DateTime, Datelike, Timelike, Utc};
use log::debug;

use crate::zodiac::Planet;

pub mod errors;
pub mod synthetic;

pub use errors::{EphemerisError, Result};
pub use synthetic::SyntheticEphemeris;

/// Length of the engine's error-string buffer
pub const SERR_LEN: usize = 256;

/// Gregorian calendar flag passed to the Julian-day entry point
const GREGORIAN: i32 = 1;

/// Calendar fields of a UTC instant, as the engine consumes them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Seconds including the fractional part
    pub second: f64,
}

impl From<&DateTime<Utc>> for CalendarFields {
    fn from(moment: &DateTime<Utc>) -> Self {
        CalendarFields {
            year: moment.year(),
            month: moment.month(),
            day: moment.day(),
            hour: moment.hour(),
            minute: moment.minute(),
            second: moment.second() as f64 + moment.nanosecond() as f64 / 1e9,
        }
    }
}

/// House system identifier understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseSystem {
    Placidus,
    Regiomontanus,
}

impl HouseSystem {
    /// The engine's single-byte system code
    pub fn system_byte(&self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Regiomontanus => b'R',
        }
    }
}

/// Full position state of a body: the engine's 6-element output vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees, [0, 360)
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    /// Longitude speed in degrees/day; negative while retrograde
    pub speed_longitude: f64,
    /// Latitude speed in degrees/day
    pub speed_latitude: f64,
    /// Distance speed in AU/day
    pub speed_distance: f64,
}

impl BodyPosition {
    /// Apparent backward motion along the ecliptic
    pub fn is_retrograde(&self) -> bool {
        self.speed_longitude < 0.0
    }
}

/// The engine's exported entry points, consumed as opaque calls
///
/// A negative return value means the call failed and an error string was
/// written into `serr` as null-terminated bytes.
pub trait RawEphemeris {
    /// Convert UTC calendar fields to a Julian day
    ///
    /// On success `dret[1]` holds the Julian day in universal time.
    fn utc_to_jd(
        &self,
        fields: &CalendarFields,
        gregflag: i32,
        dret: &mut [f64; 2],
        serr: &mut [u8; SERR_LEN],
    ) -> i32;

    /// Compute a body's position vector at a Julian day
    ///
    /// On success `xx` holds longitude, latitude, distance, and their
    /// speeds, in that order.
    fn calc_ut(
        &self,
        jd: f64,
        body: i32,
        iflag: i32,
        xx: &mut [f64; 6],
        serr: &mut [u8; SERR_LEN],
    ) -> i32;

    /// Compute house cusps for a time and place
    ///
    /// On success `cusps[1..=12]` hold the cusp longitudes and `ascmc`
    /// carries the ascendant and midheaven.
    fn houses(
        &self,
        jd: f64,
        geolat: f64,
        geolon: f64,
        hsys: u8,
        cusps: &mut [f64; 13],
        ascmc: &mut [f64; 10],
    ) -> i32;
}

/// Decode an engine error string from its null-terminated byte buffer
fn decode_serr(serr: &[u8]) -> String {
    let end = serr.iter().position(|&b| b == 0).unwrap_or(serr.len());
    String::from_utf8_lossy(&serr[..end]).trim().to_string()
}

/// Safe marshalling layer over a [`RawEphemeris`] engine
#[derive(Debug)]
pub struct EphemerisAdapter<R> {
    raw: R,
    iflag: i32,
}

impl<R: RawEphemeris> EphemerisAdapter<R> {
    pub fn new(raw: R) -> Self {
        EphemerisAdapter { raw, iflag: 0 }
    }

    /// Use non-default computation flags for position calls
    pub fn with_flags(raw: R, iflag: i32) -> Self {
        EphemerisAdapter { raw, iflag }
    }

    /// Julian day (universal time) of a UTC instant
    pub fn julian_day(&self, moment: &DateTime<Utc>) -> Result<f64> {
        let fields = CalendarFields::from(moment);
        let mut dret = [0.0; 2];
        let mut serr = [0u8; SERR_LEN];
        let status = self
            .raw
            .utc_to_jd(&fields, GREGORIAN, &mut dret, &mut serr);
        if status < 0 {
            return Err(EphemerisError::JulianDay(decode_serr(&serr)));
        }
        Ok(dret[1])
    }

    /// Position vector of a body at a Julian day
    pub fn body_position(&self, jd: f64, planet: Planet) -> Result<BodyPosition> {
        let mut xx = [0.0; 6];
        let mut serr = [0u8; SERR_LEN];
        let status = self
            .raw
            .calc_ut(jd, planet.engine_index(), self.iflag, &mut xx, &mut serr);
        if status < 0 {
            return Err(EphemerisError::Calculation {
                body: planet.name().to_string(),
                message: decode_serr(&serr),
            });
        }
        Ok(BodyPosition {
            longitude: xx[0],
            latitude: xx[1],
            distance: xx[2],
            speed_longitude: xx[3],
            speed_latitude: xx[4],
            speed_distance: xx[5],
        })
    }

    /// Twelve house cusp longitudes for a time and place
    pub fn house_cusps(
        &self,
        jd: f64,
        geolat: f64,
        geolon: f64,
        system: HouseSystem,
    ) -> Result<[f64; 12]> {
        let mut cusps = [0.0; 13];
        let mut ascmc = [0.0; 10];
        let status = self.raw.houses(
            jd,
            geolat,
            geolon,
            system.system_byte(),
            &mut cusps,
            &mut ascmc,
        );
        if status < 0 {
            return Err(EphemerisError::Houses(format!(
                "engine rejected jd={} lat={} lon={}",
                jd, geolat, geolon
            )));
        }
        debug!("house cusps at jd={}: asc={:.4}", jd, cusps[1]);
        let mut out = [0.0; 12];
        out.copy_from_slice(&cusps[1..13]);
        Ok(out)
    }
}
