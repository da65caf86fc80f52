//! Wheel projection math and spatial hit-test hashing
//!
//! Converts ecliptic longitudes into canvas points for the chart wheel and
//! the ephemeris graph, and provides the quantized bucket index the graph
//! uses to find a rendered sample under the mouse without a nearest-neighbor
//! search.

use std::collections::HashMap;

use nalgebra::Point2;

use crate::zodiac::normalize_degrees;

/// Grid pitch, in pixels, of the hit-test buckets
///
/// Points within half a pitch of each other collide into the same bucket.
/// That lossiness is the point: it gives mouse-hover lookups a tolerance
/// radius for free.
pub const BUCKET_PITCH: f64 = 10.0;

/// Wheel rotation offset placing the ascendant on the left horizon
///
/// Computed once per render pass from the first house cusp.
pub fn wheel_rotation(first_cusp: f64) -> f64 {
    180.0 + first_cusp
}

/// Project an ecliptic longitude onto a circle of the given radius
///
/// Pure function with no failure path: the longitude and rotation offset
/// are normalized internally before the trigonometric call. The wheel runs
/// counterclockwise, so the projected angle is the rotation offset minus
/// the longitude.
pub fn project(
    longitude: f64,
    radius: f64,
    rotation_offset: f64,
    center: Point2<f64>,
) -> Point2<f64> {
    let rads = normalize_degrees(rotation_offset - longitude).to_radians();
    Point2::new(
        center.x + radius * rads.cos(),
        center.y + radius * rads.sin(),
    )
}

/// Recover the longitude that projected to `point`
///
/// Geometric inverse of [`project`] relative to a known center and rotation
/// offset; the radius drops out of the arctangent.
pub fn recover_longitude(point: Point2<f64>, rotation_offset: f64, center: Point2<f64>) -> f64 {
    let rads = (point.y - center.y).atan2(point.x - center.x);
    normalize_degrees(rotation_offset - rads.to_degrees())
}

/// Bucket key of a quantized canvas point
///
/// Both coordinates are rounded to the nearest bucket pitch and kept as an
/// independent pair, so tall canvases cannot alias unrelated (x, y) pairs
/// into one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketKey(i32, i32);

impl BucketKey {
    /// Quantize a canvas point to its bucket
    pub fn from_point(x: f64, y: f64) -> Self {
        BucketKey(
            (x / BUCKET_PITCH).round() as i32,
            (y / BUCKET_PITCH).round() as i32,
        )
    }
}

/// Bucketed point cache for hover hit-testing
///
/// Rebuilt wholesale on every render pass; inserts append on collision and
/// lookups return the first sample stored in the mouse's bucket.
#[derive(Debug)]
pub struct SpatialIndex<T> {
    buckets: HashMap<BucketKey, Vec<T>>,
    len: usize,
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpatialIndex<T> {
    pub fn new() -> Self {
        SpatialIndex {
            buckets: HashMap::new(),
            len: 0,
        }
    }

    /// Drop every cached sample
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Insert a sample at a canvas position, appending on collision
    pub fn insert(&mut self, x: f64, y: f64, value: T) {
        self.buckets
            .entry(BucketKey::from_point(x, y))
            .or_default()
            .push(value);
        self.len += 1;
    }

    /// First sample stored in the bucket containing (x, y), if any
    pub fn first_at(&self, x: f64, y: f64) -> Option<&T> {
        self.buckets
            .get(&BucketKey::from_point(x, y))
            .and_then(|samples| samples.first())
    }

    /// Iterate every cached sample in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.values().flatten()
    }

    /// Total number of cached samples across all buckets
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
