use crate::risk::LatLon;

/// Horizontal tiling of the rendering surface.
///
/// Route and marker longitudes may run past ±180 to express continuous
/// travel across the antimeridian. The surface draws extra world copies and
/// widens its bounds so those coordinates land on visible land; it never
/// rewraps them. Instead the view center jumps by a whole world whenever it
/// drifts more than half a world from `home_lon`, so the overlay copy is
/// always the one on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldWrap {
    pub world_copies: bool,
    /// Max absolute longitude the view center may reach
    pub lon_bound: f64,
    /// Longitude of the world copy that holds the overlay data
    pub home_lon: f64,
}

impl Default for WorldWrap {
    fn default() -> Self {
        Self {
            world_copies: true,
            lon_bound: 360.0,
            home_lon: 120.0,
        }
    }
}

/// Latitude limit of the Mercator surface
pub const MAX_LAT: f64 = 85.0;

impl WorldWrap {
    /// Paths pass through unchanged: the unwrapped encoding is authoritative
    #[inline(always)]
    pub fn normalize<'a>(&self, path: &'a [LatLon]) -> &'a [LatLon] {
        path
    }

    /// Longitude offsets at which background geometry is repeated
    pub fn copy_offsets(&self) -> &'static [f64] {
        if self.world_copies {
            &[-360.0, 0.0, 360.0]
        } else {
            &[0.0]
        }
    }

    /// Keep a view center inside the surface bounds, jumping it back onto
    /// the home world copy when world copies are on
    pub fn clamp_center(&self, center: LatLon) -> LatLon {
        let mut center = center;
        if self.world_copies {
            let drift = center.lon - self.home_lon;
            if drift.abs() > 180.0 {
                center.lon -= 360.0 * ((drift + 180.0) / 360.0).floor();
            }
        }
        if self.contains(center) {
            return center;
        }
        LatLon::new(
            center.lat.clamp(-MAX_LAT, MAX_LAT),
            center.lon.clamp(-self.lon_bound, self.lon_bound),
        )
    }

    /// Whether a coordinate lies on the drawable surface
    pub fn contains(&self, p: LatLon) -> bool {
        p.lat.abs() <= MAX_LAT && p.lon.abs() <= self.lon_bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::catalog::{LOCATIONS, ROUTE_TABLE};

    #[test]
    fn test_normalize_is_identity() {
        let wrap = WorldWrap::default();
        let path = [LatLon::new(38.0, 180.0), LatLon::new(40.0, 200.0), LatLon::new(33.77, 241.81)];
        assert_eq!(wrap.normalize(&path), &path);
    }

    #[test]
    fn test_bounds_cover_catalog() {
        let wrap = WorldWrap::default();
        for (_, routes) in &ROUTE_TABLE {
            for route in routes.iter() {
                assert!(route.path.iter().all(|p| wrap.contains(*p)));
            }
        }
        assert!(LOCATIONS.iter().all(|l| wrap.contains(l.position)));
    }

    #[test]
    fn test_clamp_center() {
        let wrap = WorldWrap::default();
        assert_eq!(wrap.clamp_center(LatLon::new(89.0, 150.0)), LatLon::new(85.0, 150.0));
        assert_eq!(wrap.clamp_center(LatLon::new(20.0, 241.8)), LatLon::new(20.0, 241.8));

        let flat = WorldWrap { world_copies: false, ..WorldWrap::default() };
        assert_eq!(flat.clamp_center(LatLon::new(0.0, 400.0)), LatLon::new(0.0, 360.0));
    }

    #[test]
    fn test_center_jumps_to_home_copy() {
        let wrap = WorldWrap::default();
        // West of the seam: Los Angeles in wrapped coordinates
        let c = wrap.clamp_center(LatLon::new(34.0, -118.0));
        assert!((c.lon - 242.0).abs() < 1e-9);
        // Far east comes back by one world
        let c = wrap.clamp_center(LatLon::new(0.0, 320.0));
        assert!((c.lon - -40.0).abs() < 1e-9);
        // Within half a world of home nothing moves
        assert_eq!(wrap.clamp_center(LatLon::new(0.0, -59.0)).lon, -59.0);
    }

    #[test]
    fn test_copies() {
        assert_eq!(WorldWrap::default().copy_offsets().len(), 3);
        let flat = WorldWrap { world_copies: false, lon_bound: 180.0, home_lon: 0.0 };
        assert_eq!(flat.copy_offsets(), &[0.0]);
    }
}
