use ratatui::style::Color;

use super::model::{Location, RiskArea, SizeClass};

pub const RED: Color = Color::Rgb(255, 0, 0);
pub const YELLOW: Color = Color::Rgb(255, 255, 0);
pub const GREEN: Color = Color::Rgb(0, 255, 0);
pub const OUTLINE: Color = Color::Rgb(0, 0, 0);
pub const ACCENT: Color = Color::Rgb(255, 87, 51);

/// Fixed key-risk colors. Not derived from score.
pub const RISK_COLORS: [(&str, Color); 3] = [("taiwan", RED), ("hormuz", YELLOW), ("suez", YELLOW)];
pub const DEFAULT_RISK_COLOR: Color = GREEN;

/// Key risks drawn with the large marker
pub const RISK_RADII: [(&str, f64); 1] = [("taiwan", 22.0)];
pub const DEFAULT_RISK_RADIUS: f64 = 18.0;

pub const MAJOR_RADIUS: f64 = 12.0;
pub const MINOR_RADIUS: f64 = 8.0;
pub const HIGHLIGHT_RADIUS: f64 = 30.0;

/// Regular locations at or above this score are drawn in the warning color
pub const ELEVATED_THRESHOLD: u8 = 50;

/// Resolved look of a circular marker. Radii are in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill: Color,
    pub fill_opacity: f64,
    pub stroke: Color,
    pub stroke_weight: f64,
    pub interactive: bool,
}

impl MarkerStyle {
    /// Fills below this opacity are left unpainted on the terminal canvas
    pub fn is_opaque(&self) -> bool {
        self.fill_opacity >= 0.9
    }
}

pub fn risk_color(risk_id: &str) -> Color {
    RISK_COLORS
        .iter()
        .find(|(id, _)| *id == risk_id)
        .map(|(_, c)| *c)
        .unwrap_or(DEFAULT_RISK_COLOR)
}

pub fn risk_radius(risk_id: &str) -> f64 {
    RISK_RADII
        .iter()
        .find(|(id, _)| *id == risk_id)
        .map(|(_, r)| *r)
        .unwrap_or(DEFAULT_RISK_RADIUS)
}

pub fn risk_marker(area: &RiskArea) -> MarkerStyle {
    MarkerStyle {
        radius: risk_radius(area.id),
        fill: risk_color(area.id),
        fill_opacity: 0.9,
        stroke: OUTLINE,
        stroke_weight: 0.5,
        interactive: true,
    }
}

pub fn location_marker(location: &Location) -> MarkerStyle {
    let radius = match location.size {
        SizeClass::Major => MAJOR_RADIUS,
        SizeClass::Minor => MINOR_RADIUS,
    };
    let fill = if location.risk >= ELEVATED_THRESHOLD { YELLOW } else { GREEN };

    MarkerStyle {
        radius,
        fill,
        fill_opacity: 0.9,
        stroke: OUTLINE,
        stroke_weight: 0.3,
        interactive: true,
    }
}

/// Ring framing the focused key risk
pub fn highlight_ring() -> MarkerStyle {
    MarkerStyle {
        radius: HIGHLIGHT_RADIUS,
        fill: ACCENT,
        fill_opacity: 0.2,
        stroke: ACCENT,
        stroke_weight: 1.0,
        interactive: false,
    }
}
