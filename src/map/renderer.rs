use ratatui::style::Color;

use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_disc, draw_line, draw_ring};
use crate::map::projection::Viewport;
use crate::risk::scene::{Layer, Marker, RouteLine, Scene, SceneItem};
use crate::risk::LatLon;

/// A geographic line (sequence of lon/lat coordinates, GeoJSON order)
pub type LineString = Vec<(f64, f64)>;

/// Level of detail for basemap data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lod {
    Low,    // 110m - world view
    Medium, // 50m - regional
    High,   // 10m - coastal
}

impl Lod {
    /// Select LOD based on zoom level
    pub fn from_zoom(zoom: u8) -> Self {
        if zoom < 4 {
            Lod::Low
        } else if zoom < 7 {
            Lod::Medium
        } else {
            Lod::High
        }
    }
}

/// Minimum zoom at which regular port names are drawn
const LOCATION_LABEL_ZOOM: u8 = 4;

/// Display settings for map layers
#[derive(Clone, Debug)]
pub struct DisplaySettings {
    pub show_coastlines: bool,
    pub show_routes: bool,
    pub show_labels: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_coastlines: true,
            show_routes: true,
            show_labels: true,
        }
    }
}

/// Text placed next to a marker, in character cells
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub color: Color,
}

/// Rendered output, composited back to front by the UI
pub struct MapLayers {
    pub basemap: BrailleCanvas,
    pub overlay: BrailleCanvas,
    pub labels: Vec<Label>,
}

/// Map renderer: multi-resolution coastline basemap plus the risk scene
pub struct MapRenderer {
    pub coastlines_low: Vec<LineString>,
    pub coastlines_medium: Vec<LineString>,
    pub coastlines_high: Vec<LineString>,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            coastlines_low: Vec::new(),
            coastlines_medium: Vec::new(),
            coastlines_high: Vec::new(),
            settings: DisplaySettings::default(),
        }
    }

    /// Get coastlines for the given LOD, falling back to coarser data
    fn get_coastlines(&self, lod: Lod) -> &Vec<LineString> {
        match lod {
            Lod::High => {
                if !self.coastlines_high.is_empty() {
                    &self.coastlines_high
                } else if !self.coastlines_medium.is_empty() {
                    &self.coastlines_medium
                } else {
                    &self.coastlines_low
                }
            }
            Lod::Medium => {
                if !self.coastlines_medium.is_empty() {
                    &self.coastlines_medium
                } else {
                    &self.coastlines_low
                }
            }
            Lod::Low => &self.coastlines_low,
        }
    }

    /// Render the basemap and scene onto canvases of the given character size
    pub fn render(&self, width: usize, height: usize, viewport: &Viewport, scene: &Scene<'_>) -> MapLayers {
        let mut basemap = BrailleCanvas::new(width, height);
        let mut overlay = BrailleCanvas::new(width, height);
        let mut labels = Vec::new();

        if self.settings.show_coastlines {
            basemap.set_pen(Color::DarkGray);
            let coastlines = self.get_coastlines(Lod::from_zoom(viewport.zoom()));
            // One pass per world copy so unwrapped longitudes land on land
            for &offset in viewport.wrap().copy_offsets() {
                for line in coastlines {
                    draw_basemap_line(&mut basemap, line, offset, viewport);
                }
            }
        }

        // Scene items are already in z-order; the canvas keeps the last pen
        for item in &scene.items {
            match item {
                SceneItem::Route(line) => {
                    if self.settings.show_routes {
                        draw_route(&mut overlay, line, viewport);
                    }
                }
                SceneItem::Marker(layer, marker) => {
                    let drawn = draw_marker(&mut overlay, marker, viewport);
                    if let Some((px, py)) = drawn.filter(|_| self.settings.show_labels) {
                        if let Some(label) = marker_label(*layer, marker, px, py, viewport) {
                            labels.push(label);
                        }
                    }
                }
            }
        }

        MapLayers { basemap, overlay, labels }
    }

    /// Add coastline data at a specific LOD
    pub fn add_coastline(&mut self, line: LineString, lod: Lod) {
        match lod {
            Lod::Low => self.coastlines_low.push(line),
            Lod::Medium => self.coastlines_medium.push(line),
            Lod::High => self.coastlines_high.push(line),
        }
    }

    /// Check if any data is loaded
    pub fn has_data(&self) -> bool {
        !self.coastlines_low.is_empty() || !self.coastlines_medium.is_empty() || !self.coastlines_high.is_empty()
    }

    pub fn toggle_coastlines(&mut self) {
        self.settings.show_coastlines = !self.settings.show_coastlines;
    }

    pub fn toggle_routes(&mut self) {
        self.settings.show_routes = !self.settings.show_routes;
    }

    pub fn toggle_labels(&mut self) {
        self.settings.show_labels = !self.settings.show_labels;
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a basemap linestring shifted by a longitude offset, skipping the
/// wrap-around jumps in the source data
fn draw_basemap_line(canvas: &mut BrailleCanvas, line: &LineString, offset: f64, viewport: &Viewport) {
    if line.len() < 2 {
        return;
    }

    let mut prev: Option<(i32, i32)> = None;

    for &(lon, lat) in line {
        let (px, py) = viewport.project(LatLon::new(lat, lon + offset));

        if let Some((prev_x, prev_y)) = prev {
            let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
            if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py)) {
                draw_line(canvas, prev_x, prev_y, px, py);
            }
        }

        prev = Some((px, py));
    }
}

/// Draw a smoothed route exactly as encoded; no seam handling
fn draw_route(canvas: &mut BrailleCanvas, line: &RouteLine<'_>, viewport: &Viewport) {
    let (red, green, blue) = line.route.color;
    canvas.set_pen(Color::Rgb(red, green, blue));

    let path = viewport.wrap().normalize(&line.path);
    for pair in path.windows(2) {
        let a = viewport.project(pair[0]);
        let b = viewport.project(pair[1]);
        if viewport.line_might_be_visible(a, b) {
            draw_line(canvas, a.0, a.1, b.0, b.1);
        }
    }
}

/// Paint a marker; returns its pixel center when on screen
fn draw_marker(canvas: &mut BrailleCanvas, marker: &Marker, viewport: &Viewport) -> Option<(i32, i32)> {
    let (px, py) = viewport.project(marker.center);
    let radius = viewport.marker_dots(marker.style.radius);
    if !viewport.is_visible(px, py) && !viewport.line_might_be_visible((px - radius, py - radius), (px + radius, py + radius)) {
        return None;
    }

    if marker.style.is_opaque() {
        canvas.set_pen(marker.style.fill);
        draw_disc(canvas, px, py, radius);
    }
    // Sub-dot outlines are not rasterized
    if marker.style.stroke_weight >= 1.0 {
        canvas.set_pen(marker.style.stroke);
        draw_ring(canvas, px, py, radius);
    }

    Some((px, py))
}

fn marker_label(layer: Layer, marker: &Marker, px: i32, py: i32, viewport: &Viewport) -> Option<Label> {
    let click = marker.click.as_ref()?;
    let color = match layer {
        Layer::RiskAreas => marker.style.fill,
        Layer::Locations if viewport.zoom() >= LOCATION_LABEL_ZOOM => Color::White,
        _ => return None,
    };
    if px < 0 || py < 0 {
        return None;
    }

    // Braille coords to char coords, just right of the marker
    let radius_chars = viewport.marker_dots(marker.style.radius) / 2;
    let x = u16::try_from(px / 2 + radius_chars + 1).ok()?;
    let y = u16::try_from(py / 4).ok()?;

    Some(Label {
        x,
        y,
        text: click.name.clone(),
        color,
    })
}
