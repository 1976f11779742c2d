//! Draw-ordered scene for one focus state.
//!
//! Items are emitted back to front: route polylines, regular location
//! markers, key-risk markers, then the focus highlight ring. Renderers paint
//! in sequence so later items win where they overlap.

use super::catalog;
use super::model::{LatLon, Location, RiskArea, Route};
use super::smoothing::smooth_path;
use super::style::{self, MarkerStyle};
use super::visibility::{self, Focus, RouteCaps};

/// Payload handed back to the host when a marker is clicked
#[derive(Clone, Debug, PartialEq)]
pub struct LocationClick {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub risk: u8,
    /// Set when the marker is a key risk area
    pub key_risk_id: Option<String>,
}

impl LocationClick {
    pub fn is_key_risk(&self) -> bool {
        self.key_risk_id.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Routes,
    Locations,
    RiskAreas,
    Highlight,
}

/// A smoothed route polyline
#[derive(Clone, Debug)]
pub struct RouteLine<'a> {
    pub route: &'a Route,
    pub path: Vec<LatLon>,
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub center: LatLon,
    pub style: MarkerStyle,
    /// None for decoration that ignores clicks
    pub click: Option<LocationClick>,
}

#[derive(Clone, Debug)]
pub enum SceneItem<'a> {
    Route(RouteLine<'a>),
    Marker(Layer, Marker),
}

impl SceneItem<'_> {
    pub fn layer(&self) -> Layer {
        match self {
            SceneItem::Route(_) => Layer::Routes,
            SceneItem::Marker(layer, _) => *layer,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene<'a> {
    pub items: Vec<SceneItem<'a>>,
}

impl<'a> Scene<'a> {
    /// Assemble the scene from explicit tables.
    pub fn build_in(
        focus: &Focus,
        risk_areas: &[RiskArea],
        table: &'a [(&str, &'a [Route])],
        locations: &'a [Location],
        caps: &RouteCaps,
        smoothing_steps: usize,
    ) -> Self {
        let visible = visibility::select_in(focus, table, locations, caps);
        let mut items = Vec::with_capacity(visible.routes.len() + visible.locations.len() + risk_areas.len() + 1);

        for route in visible.routes {
            items.push(SceneItem::Route(RouteLine {
                route,
                path: smooth_path(route.path, smoothing_steps),
            }));
        }

        for location in visible.locations {
            items.push(SceneItem::Marker(
                Layer::Locations,
                Marker {
                    center: location.position,
                    style: style::location_marker(location),
                    click: Some(LocationClick {
                        name: location.name.to_string(),
                        lat: location.position.lat,
                        lon: location.position.lon,
                        risk: location.risk,
                        key_risk_id: None,
                    }),
                },
            ));
        }

        for area in risk_areas {
            items.push(SceneItem::Marker(
                Layer::RiskAreas,
                Marker {
                    center: area.coordinates,
                    style: style::risk_marker(area),
                    click: Some(risk_click(area)),
                },
            ));
        }

        for area in risk_areas.iter().filter(|a| focus.is_focused_on(a.id)) {
            items.push(SceneItem::Marker(
                Layer::Highlight,
                Marker {
                    center: area.coordinates,
                    style: style::highlight_ring(),
                    click: None,
                },
            ));
        }

        Self { items }
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteLine<'a>> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Route(line) => Some(line),
            SceneItem::Marker(..) => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = (Layer, &Marker)> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Marker(layer, marker) => Some((*layer, marker)),
            SceneItem::Route(_) => None,
        })
    }

    /// Topmost interactive marker under a screen point.
    ///
    /// `project` maps a coordinate to screen space; `scale` converts marker
    /// pixel radii into the same units.
    pub fn hit_test<F>(&self, x: f64, y: f64, scale: f64, project: F) -> Option<&LocationClick>
    where
        F: Fn(LatLon) -> (f64, f64),
    {
        self.items.iter().rev().find_map(|item| {
            let SceneItem::Marker(_, marker) = item else {
                return None;
            };
            let click = marker.click.as_ref()?;
            if !marker.style.interactive {
                return None;
            }

            let (mx, my) = project(marker.center);
            // At least one screen unit so tiny markers stay clickable
            let r = (marker.style.radius * scale).max(1.0);
            let (dx, dy) = (x - mx, y - my);
            (dx * dx + dy * dy <= r * r).then_some(click)
        })
    }
}

impl Scene<'static> {
    /// Assemble the scene from the built-in catalog
    pub fn build(focus: &Focus, risk_areas: &[RiskArea], caps: &RouteCaps, smoothing_steps: usize) -> Self {
        Self::build_in(
            focus,
            risk_areas,
            &catalog::ROUTE_TABLE,
            &catalog::LOCATIONS,
            caps,
            smoothing_steps,
        )
    }
}

fn risk_click(area: &RiskArea) -> LocationClick {
    LocationClick {
        name: area.name.to_string(),
        lat: area.coordinates.lat,
        lon: area.coordinates.lon,
        risk: area.score,
        key_risk_id: Some(area.id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::catalog::RISK_AREAS;
    use crate::risk::smoothing::DEFAULT_STEPS;

    fn build(focus: Option<&str>) -> Scene<'static> {
        Scene::build(&Focus::from_id(focus), &RISK_AREAS, &RouteCaps::default(), DEFAULT_STEPS)
    }

    /// Identity projection, one unit per marker pixel
    fn flat(p: LatLon) -> (f64, f64) {
        (p.lon, p.lat)
    }

    #[test]
    fn test_draw_order() {
        let scene = build(Some("taiwan"));
        let layers: Vec<Layer> = scene.items.iter().map(|i| i.layer()).collect();
        assert!(layers.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(layers.first(), Some(&Layer::Routes));
        assert_eq!(layers.last(), Some(&Layer::Highlight));
    }

    #[test]
    fn test_unfocused_scene() {
        let scene = build(None);
        assert_eq!(scene.routes().count(), 0);
        let highlight = scene.markers().filter(|(l, _)| *l == Layer::Highlight).count();
        assert_eq!(highlight, 0);
        let risks = scene.markers().filter(|(l, _)| *l == Layer::RiskAreas).count();
        assert_eq!(risks, RISK_AREAS.len());
    }

    #[test]
    fn test_risk_markers_survive_unknown_focus() {
        let scene = build(Some("panama"));
        assert_eq!(scene.routes().count(), 0);
        assert!(scene.markers().all(|(l, _)| l == Layer::RiskAreas));
        assert_eq!(scene.markers().count(), RISK_AREAS.len());
    }

    #[test]
    fn test_routes_are_smoothed() {
        let scene = build(Some("hormuz"));
        for line in scene.routes() {
            assert_eq!(line.path.len(), 1 + (line.route.path.len() - 1) * DEFAULT_STEPS);
        }
    }

    #[test]
    fn test_click_regular_location() {
        let scene = build(None);
        // Lagos is isolated enough that only its own marker covers it
        let click = scene.hit_test(3.3841, 6.455, 0.1, flat).expect("hit");
        assert_eq!(click.name, "Lagos");
        assert!(!click.is_key_risk());
        assert_eq!(click.risk, 21);
    }

    #[test]
    fn test_click_key_risk_wins_over_regular() {
        let scene = build(Some("hormuz"));
        let click = scene.hit_test(56.25, 26.5, 0.1, flat).expect("hit");
        assert!(click.is_key_risk());
        assert_eq!(click.key_risk_id.as_deref(), Some("hormuz"));
        assert_eq!(click.name, "Strait of Hormuz");
        assert_eq!(click.risk, 67);
    }

    #[test]
    fn test_highlight_ring_ignores_clicks() {
        let scene = build(Some("suez"));
        // Inside the ring radius but outside the marker
        let hit = scene.hit_test(32.5795 + 2.5, 30.0, 0.1, flat);
        assert!(hit.is_none());
    }

    #[test]
    fn test_click_miss() {
        let scene = build(None);
        assert!(scene.hit_test(-150.0, -60.0, 0.1, flat).is_none());
    }
}
