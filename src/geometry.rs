//! Pixel geometry for locating the cursor relative to the dialog.

/// Point in logical (layout) units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size in logical (layout) units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Point in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in screen pixels. Right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    /// Converts a logical size to pixels with `scale`, rounding up.
    pub fn from_size(origin: PixelPoint, size: Size, scale: f64) -> Self {
        let to_pixels = |v: f64| {
            let scaled = (v * scale).ceil();
            if scaled.is_finite() && scaled > 0.0 {
                scaled.min(i32::MAX as f64) as i32
            } else {
                0
            }
        };
        Self {
            x: origin.x,
            y: origin.y,
            width: to_pixels(size.width),
            height: to_pixels(size.height),
        }
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        let x = point.x as i64;
        let y = point.y as i64;
        x >= self.x as i64
            && y >= self.y as i64
            && x < self.x as i64 + self.width as i64
            && y < self.y as i64 + self.height as i64
    }
}
