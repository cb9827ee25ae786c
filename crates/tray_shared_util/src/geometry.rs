use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A point in screen space, measured in device pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Display, Serialize, Deserialize)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// A size in logical units, i.e. before the display scale factor has been applied.
#[derive(Debug, Copy, Clone, Default, PartialEq, Display, Serialize, Deserialize)]
#[display("{width}x{height}")]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub fn new(width: f64, height: f64) -> Self {
        LogicalSize { width, height }
    }

    /// Convert to device pixels. Fractional pixels are truncated.
    pub fn to_device(self, scale: f64) -> (i32, i32) {
        let scale = sanitize_scale(scale);
        ((self.width * scale) as i32, (self.height * scale) as i32)
    }
}

/// A rectangle in screen space, measured in device pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Display, Serialize, Deserialize)]
#[display("{width}x{height}+{left}+{top}")]
pub struct Rect {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Build a rectangle from an origin that is already in device pixels and a size in logical units.
    pub fn from_origin_and_size(origin: Point, size: LogicalSize, scale: f64) -> Self {
        let (width, height) = size.to_device(scale);
        Rect { top: origin.y, left: origin.x, width, height }
    }
}

/// A scale factor that isn't a positive finite number is treated as 1.0
fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}
