use std::collections::{BTreeMap, HashSet};

use super::catalog;
use super::model::{Location, Route};

/// Which key risk area, if any, drives route and location visibility
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Unfocused,
    Focused(String),
}

impl Focus {
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some(id) => Focus::Focused(id.to_string()),
            None => Focus::Unfocused,
        }
    }

    pub fn risk_id(&self) -> Option<&str> {
        match self {
            Focus::Unfocused => None,
            Focus::Focused(id) => Some(id),
        }
    }

    pub fn is_focused_on(&self, id: &str) -> bool {
        self.risk_id() == Some(id)
    }
}

/// Per-risk cap on the number of routes drawn
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteCaps {
    caps: BTreeMap<String, usize>,
}

impl RouteCaps {
    pub fn new() -> Self {
        Self { caps: BTreeMap::new() }
    }

    pub fn set(&mut self, risk_id: &str, cap: usize) {
        self.caps.insert(risk_id.to_string(), cap);
    }

    pub fn remove(&mut self, risk_id: &str) {
        self.caps.remove(risk_id);
    }

    /// Cap for a risk, or `available` when none is configured.
    /// A cap of zero means no cap.
    pub fn limit(&self, risk_id: &str, available: usize) -> usize {
        self.caps.get(risk_id).copied().filter(|&cap| cap > 0).unwrap_or(available)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.caps.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for RouteCaps {
    fn default() -> Self {
        let mut caps = Self::new();
        caps.set("taiwan", 4);
        caps.set("hormuz", 3);
        caps.set("suez", 2);
        caps
    }
}

impl FromIterator<(String, usize)> for RouteCaps {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        Self { caps: iter.into_iter().collect() }
    }
}

/// Routes and regular locations to draw for one focus state
#[derive(Clone, Debug)]
pub struct VisibleSet<'a> {
    pub routes: &'a [Route],
    pub locations: Vec<&'a Location>,
}

/// First `cap` routes for the focused risk, in source order.
pub fn active_routes<'a>(focus: &Focus, table: &'a [(&str, &'a [Route])], caps: &RouteCaps) -> &'a [Route] {
    let Some(id) = focus.risk_id() else {
        return &[];
    };

    let routes = table
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, routes)| *routes)
        .unwrap_or(&[]);

    let limit = caps.limit(id, routes.len()).min(routes.len());
    &routes[..limit]
}

/// Union of `related_points` across the given routes
pub fn related_point_names<'a>(routes: &'a [Route]) -> HashSet<&'a str> {
    routes
        .iter()
        .flat_map(|r| r.related_points.iter().copied())
        .collect()
}

/// Resolve visibility against explicit tables.
///
/// Unfocused: every location, no routes. Focused: the capped route list and
/// only locations whose name appears in its related points. A focus id with
/// no route entry therefore shows no regular locations at all.
pub fn select_in<'a>(
    focus: &Focus,
    table: &'a [(&str, &'a [Route])],
    locations: &'a [Location],
    caps: &RouteCaps,
) -> VisibleSet<'a> {
    if let Focus::Unfocused = focus {
        return VisibleSet {
            routes: &[],
            locations: locations.iter().collect(),
        };
    }

    let routes = active_routes(focus, table, caps);
    let names = related_point_names(routes);
    let locations = locations.iter().filter(|l| names.contains(l.name)).collect();

    VisibleSet { routes, locations }
}

/// Resolve visibility against the built-in catalog
pub fn select(focus: &Focus, caps: &RouteCaps) -> VisibleSet<'static> {
    select_in(focus, &catalog::ROUTE_TABLE, &catalog::LOCATIONS, caps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &VisibleSet<'_>) -> Vec<&'static str> {
        set.locations.iter().map(|l| l.name).collect()
    }

    #[test]
    fn test_unfocused_shows_all_locations() {
        let set = select(&Focus::Unfocused, &RouteCaps::default());
        assert!(set.routes.is_empty());
        assert_eq!(set.locations.len(), catalog::LOCATIONS.len());
    }

    #[test]
    fn test_unknown_focus_shows_nothing() {
        let set = select(&Focus::from_id(Some("panama")), &RouteCaps::default());
        assert!(set.routes.is_empty());
        assert!(set.locations.is_empty());
    }

    #[test]
    fn test_taiwan_focus() {
        let set = select(&Focus::from_id(Some("taiwan")), &RouteCaps::default());
        assert_eq!(set.routes.len(), 4);

        let visible = names(&set);
        for expected in ["Singapore", "Rotterdam", "Los Angeles", "Tokyo Bay", "Sydney"] {
            assert!(visible.contains(&expected), "{expected} should be visible");
        }
        assert!(!visible.contains(&"Lagos"));
        assert!(!visible.contains(&"Mumbai"));
        assert_eq!(visible.len(), 5);
    }

    #[test]
    fn test_hormuz_cap_not_binding() {
        let set = select(&Focus::from_id(Some("hormuz")), &RouteCaps::default());
        assert_eq!(set.routes.len(), 3);
        let visible = names(&set);
        assert!(visible.contains(&"Mumbai"));
        assert!(visible.contains(&"Rotterdam"));
    }

    #[test]
    fn test_cap_takes_first_in_source_order() {
        let mut caps = RouteCaps::default();
        caps.set("taiwan", 1);
        let set = select(&Focus::from_id(Some("taiwan")), &caps);
        assert_eq!(set.routes.len(), 1);
        assert_eq!(set.routes[0].name, "East Asia-US Route");

        let mut visible = names(&set);
        visible.sort();
        assert_eq!(visible, vec!["Los Angeles", "Tokyo Bay"]);
    }

    #[test]
    fn test_missing_cap_defaults_to_full_list() {
        let mut caps = RouteCaps::default();
        caps.remove("taiwan");
        assert_eq!(caps.limit("taiwan", 4), 4);
        let set = select(&Focus::from_id(Some("taiwan")), &caps);
        assert_eq!(set.routes.len(), 4);
    }

    #[test]
    fn test_oversized_cap_is_clamped() {
        let caps: RouteCaps = [("suez".to_string(), 10)].into_iter().collect();
        let set = select(&Focus::from_id(Some("suez")), &caps);
        assert_eq!(set.routes.len(), 2);
    }

    #[test]
    fn test_zero_cap_shows_full_list() {
        let mut caps = RouteCaps::default();
        caps.set("taiwan", 0);
        assert_eq!(caps.limit("taiwan", 4), 4);
        let set = select(&Focus::from_id(Some("taiwan")), &caps);
        assert_eq!(set.routes.len(), 4);
        assert!(!set.locations.is_empty());
    }

    #[test]
    fn test_focus_accessors() {
        let focus = Focus::from_id(Some("suez"));
        assert!(focus.is_focused_on("suez"));
        assert!(!focus.is_focused_on("taiwan"));
        assert_eq!(Focus::Unfocused.risk_id(), None);
    }
}
