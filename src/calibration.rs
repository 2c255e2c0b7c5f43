//! Meters-per-pixel factors from an object of known physical size.

use crate::bbox::{BBox, Ltrb};

/// Typical passenger car width, in meters.
pub const AVG_VEHICLE_WIDTH_METERS: f64 = 1.7;

/// Meters per pixel, assuming `bbox` spans `meters` horizontally.
pub fn from_known_width(bbox: &BBox<Ltrb>, meters: f64) -> Option<f64> {
    scale(bbox.width() as f64, meters)
}

/// Meters per pixel, assuming `bbox` spans `meters` vertically.
pub fn from_known_height(bbox: &BBox<Ltrb>, meters: f64) -> Option<f64> {
    scale(bbox.height() as f64, meters)
}

fn scale(pixels: f64, meters: f64) -> Option<f64> {
    if pixels > 0.0 && pixels.is_finite() && meters > 0.0 && meters.is_finite() {
        Some(meters / pixels)
    } else {
        None
    }
}
