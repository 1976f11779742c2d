use std::f64::consts::PI;

use super::wrap::WorldWrap;
use crate::risk::LatLon;

/// Braille dots per screen pixel when sizing markers.
/// A terminal cell is roughly 8x16 px and holds 2x4 dots.
pub const DOTS_PER_PX: f64 = 0.25;

/// Visible map area: Web Mercator centered on a coordinate at an integer zoom
#[derive(Clone, Debug)]
pub struct Viewport {
    center: LatLon,
    zoom: u8,
    min_zoom: u8,
    max_zoom: u8,
    wrap: WorldWrap,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub fn new(center: LatLon, zoom: u8, min_zoom: u8, max_zoom: u8, wrap: WorldWrap, width: usize, height: usize) -> Self {
        let mut vp = Self {
            center,
            zoom,
            min_zoom,
            max_zoom: max_zoom.max(min_zoom),
            wrap,
            width,
            height,
        };
        vp.set_view(center, zoom);
        vp
    }

    pub fn center(&self) -> LatLon {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn wrap(&self) -> &WorldWrap {
        &self.wrap
    }

    pub fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Reposition the view; zoom and center are clamped to the surface bounds
    pub fn set_view(&mut self, center: LatLon, zoom: u8) {
        self.zoom = self.clamp_zoom(zoom);
        self.center = self.wrap.clamp_center(center);
    }

    /// Pixels spanned by 360 degrees of longitude.
    /// The minimum zoom fits one world across the canvas.
    pub fn scale(&self) -> f64 {
        let level = self.zoom.saturating_sub(self.min_zoom) as i32;
        2f64.powi(level) * self.width as f64
    }

    /// Marker radius in canvas dots for a radius given in screen pixels
    pub fn marker_dots(&self, radius_px: f64) -> i32 {
        (radius_px * DOTS_PER_PX).round().max(1.0) as i32
    }

    /// Center after panning by a pixel delta
    pub fn panned_center(&self, dx: i32, dy: i32) -> LatLon {
        let scale = self.scale();
        let lon = self.center.lon + dx as f64 * 360.0 / scale;
        let y = mercator_y(self.center.lat) + dy as f64 / scale;
        self.wrap.clamp_center(LatLon::new(inverse_mercator_y(y), lon))
    }

    /// Center that keeps the coordinate under (px, py) fixed after zooming
    pub fn center_for_zoom_at(&self, px: i32, py: i32, new_zoom: u8) -> LatLon {
        let anchor = self.unproject(px, py);

        let mut zoomed = self.clone();
        zoomed.zoom = self.clamp_zoom(new_zoom);
        let scale = zoomed.scale();

        let x = (anchor.lon + 180.0) / 360.0 - (px as f64 - self.width as f64 / 2.0) / scale;
        let y = mercator_y(anchor.lat) - (py as f64 - self.height as f64 / 2.0) / scale;

        self.wrap.clamp_center(LatLon::new(inverse_mercator_y(y), x * 360.0 - 180.0))
    }

    /// Project a coordinate to fractional pixel coordinates
    pub fn project_f(&self, p: LatLon) -> (f64, f64) {
        let x = (p.lon + 180.0) / 360.0;
        let y = mercator_y(p.lat);

        let center_x = (self.center.lon + 180.0) / 360.0;
        let center_y = mercator_y(self.center.lat);

        let scale = self.scale();
        (
            (x - center_x) * scale + self.width as f64 / 2.0,
            (y - center_y) * scale + self.height as f64 / 2.0,
        )
    }

    /// Project a coordinate to pixel coordinates
    pub fn project(&self, p: LatLon) -> (i32, i32) {
        let (x, y) = self.project_f(p);
        (x as i32, y as i32)
    }

    /// Unproject pixel coordinates back to a coordinate
    pub fn unproject(&self, px: i32, py: i32) -> LatLon {
        let scale = self.scale();
        let center_x = (self.center.lon + 180.0) / 360.0;
        let center_y = mercator_y(self.center.lat);

        let x = (px as f64 - self.width as f64 / 2.0) / scale + center_x;
        let y = (py as f64 - self.height as f64 / 2.0) / scale + center_y;

        LatLon::new(inverse_mercator_y(y), x * 360.0 - 180.0)
    }

    /// Check if a projected point is visible in the viewport
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= -10 && px < self.width as i32 + 10 && py >= -10 && py < self.height as i32 + 10
    }

    /// Check if a line segment might be visible (rough bounding box check)
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0 && min_x < self.width as i32 && max_y >= 0 && min_y < self.height as i32
    }
}

/// Normalized Web Mercator y in [0, 1] (north at 0)
#[inline(always)]
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.clamp(-super::wrap::MAX_LAT, super::wrap::MAX_LAT).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}

#[inline(always)]
fn inverse_mercator_y(y: f64) -> f64 {
    (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees()
}
