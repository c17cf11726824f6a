//! Host window services consumed by the capture.

use crate::geometry::{PixelPoint, PixelRect, Point, Size};

/// Window hosting a capture.
pub trait HostWindow {
    /// Converts a client-area point to screen pixels.
    fn point_to_screen(&self, point: Point) -> PixelPoint;

    /// Size of the client area in logical units.
    fn client_size(&self) -> Size;

    /// Physical pixels per logical unit used for layout.
    fn layout_scale(&self) -> f64;
}

/// Client area in screen pixels.
///
/// `pixel_scale` is the input backend's scale; the cursor it reports is
/// expressed in units of `layout_scale / pixel_scale`.
pub fn client_bounds(window: &dyn HostWindow, pixel_scale: f64) -> PixelRect {
    let pixel_scale = if pixel_scale > 0.0 { pixel_scale } else { 1.0 };
    PixelRect::from_size(
        window.point_to_screen(Point::ZERO),
        window.client_size(),
        window.layout_scale() / pixel_scale,
    )
}

/// Fixed window geometry, used where no live window exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticWindow {
    pub origin: PixelPoint,
    pub size: Size,
    pub layout_scale: f64,
}

impl HostWindow for StaticWindow {
    fn point_to_screen(&self, point: Point) -> PixelPoint {
        PixelPoint::new(
            self.origin.x + (point.x * self.layout_scale).round() as i32,
            self.origin.y + (point.y * self.layout_scale).round() as i32,
        )
    }

    fn client_size(&self) -> Size {
        self.size
    }

    fn layout_scale(&self) -> f64 {
        self.layout_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_bounds_at_unit_scale() {
        let window = StaticWindow {
            origin: PixelPoint::new(100, 50),
            size: Size::new(300.0, 120.0),
            layout_scale: 1.0,
        };
        let bounds = client_bounds(&window, 1.0);
        assert_eq!(bounds, PixelRect { x: 100, y: 50, width: 300, height: 120 });
    }

    #[test]
    fn test_client_bounds_divides_by_pixel_scale() {
        let window = StaticWindow {
            origin: PixelPoint::new(0, 0),
            size: Size::new(300.0, 120.0),
            layout_scale: 2.0,
        };
        let bounds = client_bounds(&window, 2.0);
        assert_eq!((bounds.width, bounds.height), (300, 120));

        let bounds = client_bounds(&window, 1.0);
        assert_eq!((bounds.width, bounds.height), (600, 240));
    }

    #[test]
    fn test_point_to_screen_scales_offsets() {
        let window = StaticWindow {
            origin: PixelPoint::new(10, 10),
            size: Size::new(1.0, 1.0),
            layout_scale: 1.5,
        };
        assert_eq!(window.point_to_screen(Point::new(10.0, 4.0)), PixelPoint::new(25, 16));
    }
}
