//! Geometry normalization
//!
//! Every backend reports bounding boxes in its own coordinate system. This
//! module converts them all into one convention: origin at the top-left,
//! both axes as fractions of the analyzed image in [0, 1].

use serde::{Deserialize, Serialize};

/// Width/height pair. Normalized [0, 1] units inside observation rects;
/// pixel units when describing the source image itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Bounding box in unified coordinates: top-left origin, axes in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    /// Left edge, as a fraction of the image width
    pub x_pos: f32,
    /// Top edge, as a fraction of the image height
    pub y_pos: f32,
    pub size: Size,
}

/// Axis-aligned rectangle exactly as a backend reported it, in that
/// backend's own coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RawRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Coordinate convention of a backend-reported rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateOrigin {
    /// Origin at the bottom-left, values already normalized to the unit
    /// square by the backend
    BottomLeft,
    /// Origin at the top-left, values in image pixels
    TopLeft,
}

/// Convert a backend rectangle into the unified top-left normalized form.
///
/// No clamping happens here: a backend reporting out-of-bounds geometry
/// produces out-of-range output rather than being silently corrected.
pub fn normalize_rect(
    source: RawRect,
    image_width: f32,
    image_height: f32,
    origin: CoordinateOrigin,
) -> Rect {
    match origin {
        CoordinateOrigin::BottomLeft => {
            // Incoming positions run from 1.0 (top) to 0.0 (bottom); convert
            // the other way around. x stays as reported.
            // x_pos = 1.0 - source.x;
            Rect {
                x_pos: source.x,
                y_pos: 1.0 - source.y,
                size: Size::new(source.width, source.height),
            }
        }
        CoordinateOrigin::TopLeft => Rect {
            x_pos: source.x / image_width,
            y_pos: source.y / image_height,
            size: Size::new(source.width / image_width, source.height / image_height),
        },
    }
}
