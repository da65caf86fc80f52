//! Zodiac bodies, signs, and essential dignities
//!
//! The seven classical bodies and twelve signs used by the chart wheel,
//! plus the traditional rulership table that maps a (planet, sign) pair to
//! an essential dignity. Sign derivation and dignity lookup are pure table
//! functions over normalized ecliptic longitudes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;

/// Reduce an ecliptic longitude into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// The seven classical bodies tracked by the chart wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl Planet {
    /// All tracked bodies, in canonical display order
    pub const ALL: [Planet; 7] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
    ];

    /// Body index understood by the ephemeris engine
    pub fn engine_index(&self) -> i32 {
        match self {
            Planet::Sun => 0,
            Planet::Moon => 1,
            Planet::Mercury => 2,
            Planet::Venus => 3,
            Planet::Mars => 4,
            Planet::Jupiter => 5,
            Planet::Saturn => 6,
        }
    }

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
        }
    }

    /// Astrological glyph for the body
    pub fn glyph(&self) -> &'static str {
        match self {
            Planet::Sun => "\u{2609}",     // ☉
            Planet::Moon => "\u{263D}",    // ☽
            Planet::Mercury => "\u{263F}", // ☿
            Planet::Venus => "\u{2640}",   // ♀
            Planet::Mars => "\u{2642}",    // ♂
            Planet::Jupiter => "\u{2643}", // ♃
            Planet::Saturn => "\u{2644}",  // ♄
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Planet {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sun" => Ok(Planet::Sun),
            "moon" => Ok(Planet::Moon),
            "mercury" => Ok(Planet::Mercury),
            "venus" => Ok(Planet::Venus),
            "mars" => Ok(Planet::Mars),
            "jupiter" => Ok(Planet::Jupiter),
            "saturn" => Ok(Planet::Saturn),
            other => Err(format!("unknown body: {}", other)),
        }
    }
}

/// The twelve zodiac signs, indexed 0 (Aries) through 11 (Pisces)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    /// All signs in zodiacal order
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign containing the given ecliptic longitude
    ///
    /// The longitude is normalized into [0, 360) first, so any real input
    /// maps to a sign.
    pub fn from_longitude(longitude: f64) -> Sign {
        let index = (normalize_degrees(longitude) / 30.0).floor() as usize;
        match index {
            0 => Sign::Aries,
            1 => Sign::Taurus,
            2 => Sign::Gemini,
            3 => Sign::Cancer,
            4 => Sign::Leo,
            5 => Sign::Virgo,
            6 => Sign::Libra,
            7 => Sign::Scorpio,
            8 => Sign::Sagittarius,
            9 => Sign::Capricorn,
            10 => Sign::Aquarius,
            11 => Sign::Pisces,
            // Normalized longitudes always land in 0..12
            _ => unreachable!("sign index out of range for longitude {}", longitude),
        }
    }

    /// Zodiacal index of the sign, 0 for Aries through 11 for Pisces
    pub fn index(&self) -> i32 {
        Sign::ALL.iter().position(|s| s == self).unwrap_or(0) as i32
    }

    /// Get the sign's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Astrological glyph for the sign
    pub fn glyph(&self) -> &'static str {
        match self {
            Sign::Aries => "\u{2648}",       // ♈
            Sign::Taurus => "\u{2649}",      // ♉
            Sign::Gemini => "\u{264A}",      // ♊
            Sign::Cancer => "\u{264B}",      // ♋
            Sign::Leo => "\u{264C}",         // ♌
            Sign::Virgo => "\u{264D}",       // ♍
            Sign::Libra => "\u{264E}",       // ♎
            Sign::Scorpio => "\u{264F}",     // ♏
            Sign::Sagittarius => "\u{2650}", // ♐
            Sign::Capricorn => "\u{2651}",   // ♑
            Sign::Aquarius => "\u{2652}",    // ♒
            Sign::Pisces => "\u{2653}",      // ♓
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Essential dignity of a planet placed in a sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dignity {
    Domicile,
    Detriment,
    Exaltation,
    Fall,
}

lazy_static! {
    /// Traditional rulership table keyed by (planet, sign)
    ///
    /// Pairs absent from the table carry no essential dignity. Mercury
    /// rules both Gemini and Virgo and so takes no separate exaltation
    /// entry here.
    static ref RULERSHIPS: HashMap<(Planet, Sign), Dignity> = {
        use Dignity::*;
        use Planet::*;
        use Sign::*;

        let table = [
            (Sun, Leo, Domicile),
            (Sun, Aquarius, Detriment),
            (Sun, Aries, Exaltation),
            (Sun, Libra, Fall),
            (Moon, Cancer, Domicile),
            (Moon, Capricorn, Detriment),
            (Moon, Taurus, Exaltation),
            (Moon, Scorpio, Fall),
            (Mercury, Gemini, Domicile),
            (Mercury, Virgo, Domicile),
            (Mercury, Sagittarius, Detriment),
            (Mercury, Pisces, Detriment),
            (Venus, Taurus, Domicile),
            (Venus, Libra, Domicile),
            (Venus, Scorpio, Detriment),
            (Venus, Aries, Detriment),
            (Venus, Pisces, Exaltation),
            (Venus, Virgo, Fall),
            (Mars, Aries, Domicile),
            (Mars, Scorpio, Domicile),
            (Mars, Libra, Detriment),
            (Mars, Taurus, Detriment),
            (Mars, Capricorn, Exaltation),
            (Mars, Cancer, Fall),
            (Jupiter, Sagittarius, Domicile),
            (Jupiter, Pisces, Domicile),
            (Jupiter, Gemini, Detriment),
            (Jupiter, Virgo, Detriment),
            (Jupiter, Cancer, Exaltation),
            (Jupiter, Capricorn, Fall),
            (Saturn, Capricorn, Domicile),
            (Saturn, Aquarius, Domicile),
            (Saturn, Cancer, Detriment),
            (Saturn, Leo, Detriment),
            (Saturn, Libra, Exaltation),
            (Saturn, Aries, Fall),
        ];

        table.into_iter().map(|(p, s, d)| ((p, s), d)).collect()
    };
}

/// Essential dignity of a body at the given ecliptic longitude
///
/// Pure table lookup over (planet, sign); returns `None` for placements
/// with no traditional dignity.
pub fn dignity(planet: Planet, longitude: f64) -> Option<Dignity> {
    let sign = Sign::from_longitude(longitude);
    RULERSHIPS.get(&(planet, sign)).copied()
}

/// Format a longitude zodiacally: sign glyph plus degrees within the sign
///
/// Example: 125.5 renders as `♌ 5° 30' 0"`.
pub fn format_zodiacal(longitude: f64) -> String {
    let lon = normalize_degrees(longitude);
    let sign = Sign::from_longitude(lon);
    let within = lon % 30.0;
    let deg = within.floor();
    let min = ((within - deg) * 60.0).floor();
    let sec = (((within - deg) * 60.0 - min) * 60.0).floor();
    format!("{} {}\u{00B0} {}' {}\"", sign.glyph(), deg, min, sec)
}
