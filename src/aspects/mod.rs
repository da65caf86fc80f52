//! Aspect classification between body pairs
//!
//! An aspect is a significant angular relationship between two ecliptic
//! longitudes, allowed to deviate from its exact angle by a tolerance band
//! (the "orb"). Separation is measured as the minimal circular distance so
//! pairs straddling the 0°/360° boundary classify correctly, and each
//! aspect is additionally gated by the whole-sign relationship of the pair.

use crate::canvas::Color;
use crate::zodiac::{normalize_degrees, Sign};

/// Default orb, in degrees, applied by the chart renderer
pub const DEFAULT_ORB: f64 = 5.0;

/// The five Ptolemaic aspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl Aspect {
    /// Exact angle of the aspect in degrees
    pub fn exact_angle(&self) -> f64 {
        match self {
            Aspect::Conjunction => 0.0,
            Aspect::Sextile => 60.0,
            Aspect::Square => 90.0,
            Aspect::Trine => 120.0,
            Aspect::Opposition => 180.0,
        }
    }

    /// Conventional wheel color for aspect lines
    pub fn color(&self) -> Color {
        match self {
            Aspect::Conjunction => Color::rgb(0xFF, 0xFF, 0x00),
            Aspect::Sextile => Color::rgb(0x00, 0xFF, 0xFF),
            Aspect::Square => Color::rgb(0xFF, 0x00, 0x00),
            Aspect::Trine => Color::rgb(0x00, 0xFF, 0x00),
            Aspect::Opposition => Color::rgb(0xFF, 0x00, 0xFF),
        }
    }

    /// Get the aspect's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Aspect::Conjunction => "Conjunction",
            Aspect::Sextile => "Sextile",
            Aspect::Square => "Square",
            Aspect::Trine => "Trine",
            Aspect::Opposition => "Opposition",
        }
    }
}

/// Minimal circular separation between two longitudes, in [0, 180]
pub fn separation(lon_a: f64, lon_b: f64) -> f64 {
    let diff = normalize_degrees(lon_a - lon_b);
    diff.min(360.0 - diff)
}

/// Classify the aspect between two ecliptic longitudes
///
/// Rules are tested in priority order, first match wins:
/// 1. Same sign and separation strictly under the orb: conjunction.
/// 2. Sign gap even and separation within the orb of 60°: sextile.
/// 3. Sign gap divisible by 3 and separation within the orb of 90°: square.
/// 4. Sign gap divisible by 4 and separation within the orb of 120°: trine.
/// 5. Sign gap divisible by 6 and separation within the orb of 180°:
///    opposition.
///
/// The non-conjunction bands are inclusive: at a 5° orb, a separation of
/// exactly 55° or 65° still counts as a sextile. Returns `None` when no
/// rule matches; a pair always has zero or one classification.
pub fn classify(lon_a: f64, lon_b: f64, orb: f64) -> Option<Aspect> {
    let sep = separation(lon_a, lon_b);
    let sign_a = Sign::from_longitude(lon_a);
    let sign_b = Sign::from_longitude(lon_b);
    let gap = sign_a.index() - sign_b.index();

    let within = |aspect: Aspect| (sep - aspect.exact_angle()).abs() <= orb;

    if sign_a == sign_b && sep < orb {
        Some(Aspect::Conjunction)
    } else if gap % 2 == 0 && within(Aspect::Sextile) {
        Some(Aspect::Sextile)
    } else if gap % 3 == 0 && within(Aspect::Square) {
        Some(Aspect::Square)
    } else if gap % 4 == 0 && within(Aspect::Trine) {
        Some(Aspect::Trine)
    } else if gap % 6 == 0 && within(Aspect::Opposition) {
        Some(Aspect::Opposition)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_separation_wraps_boundary() {
        // 359° and 2° are 3° apart, not 357°.
        assert_eq!(separation(359.0, 2.0), 3.0);
        assert_eq!(separation(2.0, 359.0), 3.0);
        assert_eq!(separation(350.0, 50.0), 60.0);
        assert_eq!(separation(10.0, 190.0), 180.0);
    }

    #[test]
    fn test_conjunction_same_sign_strict_orb() {
        assert_eq!(classify(10.0, 12.0, 5.0), Some(Aspect::Conjunction));
        // Exactly at the orb is excluded for conjunctions.
        assert_eq!(classify(10.0, 15.0, 5.0), None);
        // Close together but in different signs: rule 1 does not apply.
        assert_ne!(classify(29.0, 31.0, 5.0), Some(Aspect::Conjunction));
    }

    // Boundary law at a 5 degree orb: the band edges are inclusive for
    // sextile through opposition.
    #[rstest]
    #[case(10.0, 65.0, Some(Aspect::Sextile))] // separation 55
    #[case(10.0, 75.0, Some(Aspect::Sextile))] // separation 65
    #[case(10.0, 64.9, None)] // separation 54.9
    #[case(10.0, 75.1, None)] // separation 65.1
    #[case(10.0, 95.0, Some(Aspect::Square))] // separation 85
    #[case(10.0, 105.0, Some(Aspect::Square))] // separation 95
    #[case(10.0, 105.1, None)]
    #[case(10.0, 125.0, Some(Aspect::Trine))] // separation 115
    #[case(10.0, 135.0, Some(Aspect::Trine))] // separation 125
    #[case(10.0, 135.1, None)]
    #[case(10.0, 185.0, Some(Aspect::Opposition))] // separation 175
    #[case(5.0, 185.0, Some(Aspect::Opposition))] // separation 180
    #[case(10.0, 184.9, None)] // separation 174.9
    fn test_band_boundaries(
        #[case] lon_a: f64,
        #[case] lon_b: f64,
        #[case] expected: Option<Aspect>,
    ) {
        assert_eq!(classify(lon_a, lon_b, 5.0), expected);
    }

    #[test]
    fn test_exact_angles_classify() {
        assert_eq!(classify(0.0, 60.0, 5.0), Some(Aspect::Sextile));
        assert_eq!(classify(0.0, 90.0, 5.0), Some(Aspect::Square));
        assert_eq!(classify(0.0, 120.0, 5.0), Some(Aspect::Trine));
        assert_eq!(classify(0.0, 180.0, 5.0), Some(Aspect::Opposition));
    }

    #[test]
    fn test_sign_gating_blocks_out_of_sign_aspects() {
        // Separation of 62° but signs three apart: not a sextile.
        assert_eq!(classify(28.0, 90.0, 5.0), None);
        // Separation of 88° but signs two apart: blocked for square.
        assert_eq!(classify(1.0, 89.0, 5.0), None);
    }

    #[test]
    fn test_boundary_straddling_pair() {
        // 358° (Pisces) and 58° (Taurus): separation is 60, sign gap is
        // even through the wheel wrap (11 - 1 = 10).
        assert_eq!(classify(358.0, 58.0, 5.0), Some(Aspect::Sextile));
    }

    #[test]
    fn test_orb_zero_only_exact() {
        assert_eq!(classify(0.0, 60.0, 0.0), Some(Aspect::Sextile));
        assert_eq!(classify(0.0, 60.1, 0.0), None);
    }
}
