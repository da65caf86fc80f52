//! Synthetic ephemeris engine
//!
//! A deterministic stand-in for the real ephemeris engine, usable offline
//! and in tests. Julian-day conversion uses the standard Gregorian closed
//! form; body longitudes follow mean motions with a single sinusoidal
//! wobble term per body, which is enough to produce plausible wheel
//! placements and periodic retrograde phases. Accuracy is nowhere near an
//! observational ephemeris and is not meant to be.

use super::{CalendarFields, RawEphemeris, SERR_LEN};
use crate::zodiac::normalize_degrees;

/// Julian day of the J2000.0 epoch
pub const JD_J2000: f64 = 2451545.0;

/// Supported year range for calendar conversion
const YEAR_MIN: i32 = -4713;
const YEAR_MAX: i32 = 9999;

const TAU: f64 = std::f64::consts::TAU;

/// Mean-motion model of one body's geocentric longitude
struct MeanModel {
    /// Longitude at J2000.0, degrees
    epoch_longitude: f64,
    /// Mean daily motion, degrees/day
    daily_motion: f64,
    /// Amplitude of the wobble term, degrees
    wobble_amp: f64,
    /// Period of the wobble term, days
    wobble_period: f64,
    /// Mean distance, AU
    distance: f64,
}

impl MeanModel {
    /// Longitude and longitude speed at `t` days past J2000.0
    fn state(&self, t: f64) -> (f64, f64) {
        let phase = TAU * t / self.wobble_period;
        let lon = normalize_degrees(
            self.epoch_longitude + self.daily_motion * t + self.wobble_amp * phase.sin(),
        );
        let speed = self.daily_motion + self.wobble_amp * (TAU / self.wobble_period) * phase.cos();
        (lon, speed)
    }
}

/// Models indexed by engine body number (Sun through Saturn)
///
/// Inner-planet wobbles follow the synodic period so Mercury shows the
/// familiar thrice-yearly retrograde; the outer planets retrograde around
/// each opposition.
const MODELS: [MeanModel; 7] = [
    // Sun
    MeanModel {
        epoch_longitude: 280.460,
        daily_motion: 0.985_647_4,
        wobble_amp: 1.915,
        wobble_period: 365.25,
        distance: 1.0,
    },
    // Moon
    MeanModel {
        epoch_longitude: 218.316,
        daily_motion: 13.176_396,
        wobble_amp: 6.289,
        wobble_period: 27.55,
        distance: 0.00257,
    },
    // Mercury
    MeanModel {
        epoch_longitude: 252.251,
        daily_motion: 0.985_647_4,
        wobble_amp: 22.0,
        wobble_period: 115.88,
        distance: 0.7,
    },
    // Venus
    MeanModel {
        epoch_longitude: 181.980,
        daily_motion: 0.985_647_4,
        wobble_amp: 46.0,
        wobble_period: 583.92,
        distance: 0.72,
    },
    // Mars
    MeanModel {
        epoch_longitude: 355.433,
        daily_motion: 0.524_071,
        wobble_amp: 66.0,
        wobble_period: 779.94,
        distance: 1.52,
    },
    // Jupiter
    MeanModel {
        epoch_longitude: 34.351,
        daily_motion: 0.083_091,
        wobble_amp: 11.0,
        wobble_period: 398.88,
        distance: 5.20,
    },
    // Saturn
    MeanModel {
        epoch_longitude: 50.077,
        daily_motion: 0.033_494,
        wobble_amp: 6.5,
        wobble_period: 378.09,
        distance: 9.54,
    },
];

fn write_serr(serr: &mut [u8; SERR_LEN], message: &str) {
    let bytes = message.as_bytes();
    let len = bytes.len().min(SERR_LEN - 1);
    serr[..len].copy_from_slice(&bytes[..len]);
    serr[len] = 0;
}

/// Deterministic mean-motion implementation of [`RawEphemeris`]
#[derive(Debug, Default)]
pub struct SyntheticEphemeris;

impl SyntheticEphemeris {
    pub fn new() -> Self {
        SyntheticEphemeris
    }
}

impl RawEphemeris for SyntheticEphemeris {
    fn utc_to_jd(
        &self,
        fields: &CalendarFields,
        _gregflag: i32,
        dret: &mut [f64; 2],
        serr: &mut [u8; SERR_LEN],
    ) -> i32 {
        if fields.year < YEAR_MIN || fields.year > YEAR_MAX {
            write_serr(serr, &format!("year {} out of range", fields.year));
            return -1;
        }

        // Gregorian calendar to Julian day, standard closed form.
        let (y, m) = if fields.month <= 2 {
            (fields.year - 1, fields.month + 12)
        } else {
            (fields.year, fields.month)
        };
        let a = (y as f64 / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();
        let jd0 = (365.25 * (y as f64 + 4716.0)).floor()
            + (30.6001 * (m as f64 + 1.0)).floor()
            + fields.day as f64
            + b
            - 1524.5;
        let day_fraction =
            (fields.hour as f64 + fields.minute as f64 / 60.0 + fields.second / 3600.0) / 24.0;

        dret[0] = jd0 + day_fraction;
        dret[1] = jd0 + day_fraction;
        0
    }

    fn calc_ut(
        &self,
        jd: f64,
        body: i32,
        _iflag: i32,
        xx: &mut [f64; 6],
        serr: &mut [u8; SERR_LEN],
    ) -> i32 {
        let model = match usize::try_from(body).ok().and_then(|i| MODELS.get(i)) {
            Some(model) => model,
            None => {
                write_serr(serr, &format!("unknown body index {}", body));
                return -1;
            }
        };

        let t = jd - JD_J2000;
        let (lon, speed) = model.state(t);
        xx[0] = lon;
        xx[1] = 0.0;
        xx[2] = model.distance;
        xx[3] = speed;
        xx[4] = 0.0;
        xx[5] = 0.0;
        0
    }

    fn houses(
        &self,
        jd: f64,
        geolat: f64,
        geolon: f64,
        _hsys: u8,
        cusps: &mut [f64; 13],
        ascmc: &mut [f64; 10],
    ) -> i32 {
        // Local sidereal time drives the ascendant; house widths squeeze
        // toward the horizon with latitude, keeping the cusp sequence
        // strictly ascending around the wheel.
        let lst = normalize_degrees(
            280.460_618_37 + 360.985_647_366_29 * (jd - JD_J2000) + geolon,
        );
        let ascendant = normalize_degrees(lst + 90.0);
        let squeeze = 12.0 * (geolat.clamp(-66.0, 66.0) / 90.0);

        let mut cusp = ascendant;
        for house in 0..12 {
            cusps[house + 1] = normalize_degrees(cusp);
            let width = 30.0 + squeeze * (TAU * house as f64 / 12.0).cos();
            cusp += width;
        }

        ascmc[0] = cusps[1];
        ascmc[1] = cusps[10];
        0
    }
}
