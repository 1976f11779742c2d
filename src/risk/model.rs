use glam::DVec2;

/// A geographic coordinate. Longitude may lie outside [-180, 180] when the
/// data encodes unwrapped travel across the antimeridian.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Pack as (lat, lon) for vector math
    #[inline(always)]
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.lat, self.lon)
    }

    #[inline(always)]
    pub fn from_vec(v: DVec2) -> Self {
        Self { lat: v.x, lon: v.y }
    }
}

/// A named hotspot rendered as a key-risk marker
#[derive(Clone, Debug)]
pub struct RiskArea {
    pub id: &'static str,
    pub name: &'static str,
    /// Display level ("Critical", "Elevated")
    pub level: &'static str,
    /// Severity 0-100
    pub score: u8,
    pub coordinates: LatLon,
    pub affected_routes: usize,
    pub details: &'static [&'static str],
    pub has_detail_page: bool,
}

/// A shipping lane shown while its risk area is focused
#[derive(Clone, Debug)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static [LatLon],
    /// Polyline color as RGB
    pub color: (u8, u8, u8),
    pub affected_volume: &'static str,
    /// Names joined against `Location::name` (and risk area names)
    pub related_points: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Major,
    Minor,
}

/// A regular (non-key-risk) port or chokepoint
#[derive(Clone, Debug)]
pub struct Location {
    pub name: &'static str,
    pub position: LatLon,
    pub risk: u8,
    pub size: SizeClass,
}
