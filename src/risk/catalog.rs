//! Built-in demo tables: key risk areas, shipping routes keyed by risk id,
//! and regular port locations.
//!
//! Longitudes east of the antimeridian are stored unwrapped (`lon + 360`) so
//! trans-Pacific routes stay continuous. Route `related_points` must match a
//! `Location::name` or a `RiskArea::name` exactly.

use super::model::{LatLon, Location, RiskArea, Route, SizeClass};

macro_rules! path {
    ($(($lat:expr, $lon:expr)),* $(,)?) => {
        &[$(LatLon { lat: $lat, lon: $lon }),*]
    };
}

pub static RISK_AREAS: [RiskArea; 3] = [
    RiskArea {
        id: "taiwan",
        name: "Taiwan Strait",
        level: "Critical",
        score: 89,
        coordinates: LatLon { lat: 24.25, lon: 119.5 },
        affected_routes: 4,
        details: &[
            "Military tensions increased by 78% in the past quarter, with 23 airspace violations this month",
            "Semiconductor shipments delayed up to 14 days, affecting 65% of global advanced chip supply",
            "Major port cyber attack detected 6 hours ago",
            "Category 5 typhoon expected within 72 hours, threatening key shipping routes",
        ],
        has_detail_page: true,
    },
    RiskArea {
        id: "hormuz",
        name: "Strait of Hormuz",
        level: "Elevated",
        score: 67,
        coordinates: LatLon { lat: 26.5, lon: 56.25 },
        affected_routes: 3,
        details: &[
            "Oil shipping disruption threats rising",
            "43% of global petroleum shipping affected",
            "Regional tensions impacting shipping schedules",
        ],
        has_detail_page: false,
    },
    RiskArea {
        id: "suez",
        name: "Suez Canal",
        level: "Elevated",
        score: 58,
        coordinates: LatLon { lat: 30.0, lon: 32.5795 },
        affected_routes: 2,
        details: &[
            "Capacity constraints affecting transit times",
            "Alternative route adds 14 days to shipping",
            "Weather-related delays increased 22%",
        ],
        has_detail_page: false,
    },
];

static TAIWAN_ROUTES: [Route; 4] = [
    Route {
        name: "East Asia-US Route",
        path: path![
            (24.25, 119.5),
            (22.3193, 124.1694),
            (28.509, 135.7842),
            (35.509, 139.7842),
            (35.0, 160.0),
            (38.0, 180.0),
            (40.0, 200.0),
            (38.0, 220.0),
            (33.7701, -118.1937 + 360.0),
        ],
        color: (255, 0, 0),
        affected_volume: "32% of East Asia traffic",
        related_points: &["Taiwan Strait", "Tokyo Bay", "Los Angeles"],
    },
    Route {
        name: "Taiwan-Europe Route",
        path: path![
            (24.25, 119.5),
            (21.0, 118.0),
            (18.0, 114.0),
            (12.0, 110.0),
            (8.0, 106.0),
            (5.0, 104.0),
            (1.3521, 103.8198),
            (0.8, 102.5),
            (0.0, 100.0),
            (-2.0, 97.0),
            (-5.0, 90.0),
            (-2.0, 80.0),
            (5.0, 75.0),
            (10.0, 70.0),
            (12.0, 60.0),
            (12.0, 50.0),
            (12.5, 45.0),
            (15.0, 42.0),
            (20.0, 38.0),
            (25.0, 35.0),
            (30.0, 32.5795),
            (31.5, 30.0),
            (33.0, 28.0),
            (35.0, 25.0),
            (36.0, 20.0),
            (38.0, 15.0),
            (39.0, 10.0),
            (40.0, 6.0),
            (39.5, 3.0),
            (38.0, 0.0),
            (37.0, -3.0),
            (36.0, -5.0),
            (36.0, -6.0),
            (36.0, -8.0),
            (39.0, -10.0),
            (43.0, -9.0),
            (44.0, -3.0),
            (48.0, -5.0),
            (50.0, -2.0),
            (50.0, 2.0),
            (51.9244, 4.4777),
        ],
        color: (0, 191, 255),
        affected_volume: "41% of Asia-Europe trade",
        related_points: &["Taiwan Strait", "Singapore", "Suez Canal", "Rotterdam"],
    },
    Route {
        name: "Taiwan-Middle East Route",
        path: path![
            (24.25, 119.5),
            (21.0, 118.0),
            (18.0, 114.0),
            (12.0, 110.0),
            (8.0, 106.0),
            (5.0, 104.0),
            (1.3521, 103.8198),
            (0.8, 102.5),
            (0.0, 100.0),
            (-2.0, 97.0),
            (-5.0, 90.0),
            (-2.0, 80.0),
            (5.0, 75.0),
            (10.0, 70.0),
            (15.0, 65.0),
            (18.0, 62.0),
            (20.0, 60.0),
            (22.5, 59.5),
            (24.5, 58.0),
            (26.5, 56.25),
        ],
        color: (153, 50, 204),
        affected_volume: "35% of oil imports",
        related_points: &["Taiwan Strait", "Singapore", "Strait of Hormuz"],
    },
    Route {
        name: "Taiwan-Australia Route",
        path: path![
            (24.25, 119.5),
            (21.0, 118.0),
            (18.0, 114.0),
            (12.0, 110.0),
            (8.0, 106.0),
            (5.0, 104.0),
            (1.3521, 103.8198),
            (0.0, 104.5),
            (-3.0, 105.0),
            (-6.0, 108.0),
            (-6.5, 114.0),
            (-10.5, 120.0),
            (-10.5, 122.0),
            (-12.0, 135.0),
            (-11.0, 143.0),
            (-16.0, 146.0),
            (-20.0, 152.0),
            (-25.0, 153.5),
            (-30.0, 154.0),
            (-33.0, 152.0),
            (-33.8523, 151.1782),
        ],
        color: (50, 205, 50),
        affected_volume: "22% of Pacific shipping",
        related_points: &["Taiwan Strait", "Singapore", "Sydney"],
    },
];

static HORMUZ_ROUTES: [Route; 3] = [
    Route {
        name: "Middle East-Asia Route",
        path: path![
            (26.5, 56.25),
            (25.0, 59.0),
            (22.0, 64.0),
            (18.0, 70.0),
            (12.0, 75.0),
            (8.0, 78.0),
            (6.0, 82.0),
            (5.0, 88.0),
            (5.0, 95.0),
            (6.0, 96.0),
            (0.8, 102.5),
            (1.3521, 103.8198),
            (5.0, 107.0),
            (10.0, 112.0),
            (15.0, 115.0),
            (20.0, 118.0),
            (24.25, 119.5),
        ],
        color: (255, 127, 0),
        affected_volume: "65% of Asia oil imports",
        related_points: &["Strait of Hormuz", "Singapore", "Taiwan Strait"],
    },
    Route {
        name: "Middle East-Europe Route",
        path: path![
            (26.5, 56.25),
            (20.0, 62.0),
            (16.5, 58.25),
            (15.5, 54.5),
            (14.5, 52.5),
            (13.5, 50.0),
            (13.0, 47.0),
            (12.0, 44.0),
            (15.0, 42.0),
            (20.0, 38.5),
            (24.0, 36.5),
            (26.0, 35.0),
            (28.0, 33.5),
            (30.0, 32.5795),
            (31.5, 30.0),
            (33.0, 28.0),
            (35.0, 25.0),
            (36.0, 20.0),
            (38.0, 15.0),
            (39.0, 10.0),
            (40.0, 6.0),
            (39.5, 3.0),
            (38.0, 0.0),
            (37.0, -3.0),
            (36.0, -5.0),
            (36.0, -6.0),
            (36.0, -8.0),
            (39.0, -10.0),
            (43.0, -9.0),
            (44.0, -3.0),
            (48.0, -5.0),
            (50.0, -2.0),
            (50.0, 2.0),
            (51.9244, 4.4777),
        ],
        color: (65, 105, 225),
        affected_volume: "43% of European oil imports",
        related_points: &["Strait of Hormuz", "Suez Canal", "Rotterdam"],
    },
    Route {
        name: "Gulf-India Route",
        path: path![
            (26.5, 56.25),
            (25.0, 59.0),
            (24.0, 62.0),
            (23.0, 65.0),
            (21.0, 68.0),
            (20.0, 70.0),
            (18.9548, 72.8288),
        ],
        color: (255, 20, 147),
        affected_volume: "52% of India's oil imports",
        related_points: &["Strait of Hormuz", "Mumbai"],
    },
];

static SUEZ_ROUTES: [Route; 2] = [
    Route {
        name: "Europe-Asia Route",
        path: path![
            (51.9244, 4.4777),
            (50.0, 2.0),
            (48.0, 0.0),
            (46.0, -5.0),
            (43.0, -9.0),
            (39.0, -10.0),
            (36.0, -8.0),
            (36.0, -6.0),
            (36.0, -5.0),
            (36.5, -2.0),
            (38.0, 0.0),
            (39.5, 3.0),
            (40.0, 6.0),
            (39.0, 10.0),
            (38.0, 15.0),
            (36.0, 20.0),
            (35.0, 25.0),
            (33.0, 28.0),
            (31.5, 30.0),
            (30.0, 32.5795),
            (27.0, 34.0),
            (24.0, 36.0),
            (20.0, 38.0),
            (15.0, 41.0),
            (12.5, 45.0),
            (12.0, 50.0),
            (10.0, 55.0),
            (8.0, 65.0),
            (5.0, 75.0),
            (0.0, 85.0),
            (-2.0, 95.0),
            (0.0, 100.0),
            (0.8, 102.5),
            (1.3521, 103.8198),
            (5.0, 107.0),
            (10.0, 113.0),
            (15.0, 116.0),
            (20.0, 118.0),
            (24.25, 119.5),
        ],
        color: (30, 144, 255),
        affected_volume: "37% of container shipping",
        related_points: &["Rotterdam", "Suez Canal", "Singapore", "Taiwan Strait"],
    },
    Route {
        name: "Europe-Middle East Route",
        path: path![
            (51.9244, 4.4777),
            (50.0, 2.0),
            (48.0, 0.0),
            (46.0, -5.0),
            (43.0, -9.0),
            (39.0, -10.0),
            (36.0, -8.0),
            (36.0, -6.0),
            (36.0, -5.0),
            (36.5, -2.0),
            (38.0, 0.0),
            (39.5, 3.0),
            (40.0, 6.0),
            (39.0, 10.0),
            (38.0, 15.0),
            (36.0, 20.0),
            (35.0, 25.0),
            (33.0, 28.0),
            (31.5, 30.0),
            (30.0, 32.5795),
            (28.0, 33.5),
            (26.0, 35.0),
            (24.0, 36.5),
            (22.0, 38.5),
            (18.0, 41.0),
            (14.0, 42.5),
            (12.5, 45.0),
            (14.0, 50.0),
            (14.0, 50.0),
            (20.0, 59.0),
            (22.0, 60.0),
            (24.5, 58.0),
            (26.5, 56.25),
        ],
        color: (148, 0, 211),
        affected_volume: "45% of Mediterranean shipping",
        related_points: &["Rotterdam", "Suez Canal", "Strait of Hormuz"],
    },
];

/// Route lists keyed by risk id, in display priority order
pub static ROUTE_TABLE: [(&str, &[Route]); 3] = [
    ("taiwan", &TAIWAN_ROUTES),
    ("hormuz", &HORMUZ_ROUTES),
    ("suez", &SUEZ_ROUTES),
];

const fn loc(name: &'static str, lat: f64, lon: f64, risk: u8, size: SizeClass) -> Location {
    Location {
        name,
        position: LatLon { lat, lon },
        risk,
        size,
    }
}

pub static LOCATIONS: [Location; 20] = [
    // Major ports
    loc("Singapore", 1.3521, 103.8198, 45, SizeClass::Major),
    loc("Rotterdam", 51.9244, 4.4777, 32, SizeClass::Major),
    loc("Panama Canal", 9.08, -79.68 + 360.0, 34, SizeClass::Major),
    loc("Strait of Malacca", 2.5, 101.0, 39, SizeClass::Major),
    loc("Los Angeles", 33.7701, -118.1937 + 360.0, 41, SizeClass::Major),
    loc("Shanghai", 31.2304, 121.4737, 36, SizeClass::Major),
    // Minor ports
    loc("Tokyo Bay", 35.509, 139.7842, 34, SizeClass::Minor),
    loc("Hong Kong", 22.3193, 114.1694, 22, SizeClass::Minor),
    loc("Busan", 35.1333, 129.05, 38, SizeClass::Minor),
    loc("Sydney", -33.8523, 151.1782, 22, SizeClass::Minor),
    loc("New York", 40.6643, -74.097 + 360.0, 45, SizeClass::Minor),
    loc("Mumbai", 18.9548, 72.8288, 47, SizeClass::Minor),
    loc("Dubai", 25.2048, 55.2708, 42, SizeClass::Minor),
    loc("Jakarta", -6.2088, 106.8456, 33, SizeClass::Minor),
    loc("Manila", 14.5995, 120.9842, 39, SizeClass::Minor),
    loc("Vancouver", 49.2827, -123.1207 + 360.0, 28, SizeClass::Minor),
    loc("Santos", -23.9608, -46.3222 + 360.0, 37, SizeClass::Minor),
    loc("Lagos", 6.455, 3.3841, 21, SizeClass::Minor),
    loc("Piraeus", 37.9422, 23.6483, 31, SizeClass::Minor),
    loc("Melbourne", -37.8136, 144.9631, 24, SizeClass::Minor),
];

/// Routes configured for a risk id; unknown ids have none
pub fn routes_for(risk_id: &str) -> &'static [Route] {
    ROUTE_TABLE
        .iter()
        .find(|(id, _)| *id == risk_id)
        .map(|(_, routes)| *routes)
        .unwrap_or(&[])
}

pub fn risk_area(risk_id: &str) -> Option<&'static RiskArea> {
    RISK_AREAS.iter().find(|r| r.id == risk_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_risk_has_no_routes() {
        assert!(routes_for("panama").is_empty());
        assert!(routes_for("").is_empty());
    }

    #[test]
    fn test_route_counts() {
        assert_eq!(routes_for("taiwan").len(), 4);
        assert_eq!(routes_for("hormuz").len(), 3);
        assert_eq!(routes_for("suez").len(), 2);
    }

    #[test]
    fn test_related_points_resolve() {
        // Every join key must name a location or a key risk area
        for (_, routes) in &ROUTE_TABLE {
            for route in routes.iter() {
                for point in route.related_points {
                    let known = LOCATIONS.iter().any(|l| l.name == *point)
                        || RISK_AREAS.iter().any(|r| r.name == *point);
                    assert!(known, "{} references unknown point {}", route.name, point);
                }
            }
        }
    }

    #[test]
    fn test_location_names_unique() {
        for (i, a) in LOCATIONS.iter().enumerate() {
            for b in &LOCATIONS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_routes_have_two_waypoints() {
        for (_, routes) in &ROUTE_TABLE {
            assert!(routes.iter().all(|r| r.path.len() >= 2));
        }
    }

    #[test]
    fn test_pacific_route_stays_unwrapped() {
        let route = &routes_for("taiwan")[0];
        let last = route.path[route.path.len() - 1];
        assert!(last.lon > 180.0);
        assert!((last.lon - 241.8063).abs() < 1e-9);
    }
}
