use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::map::{MapRenderer, Viewport, DOTS_PER_PX};
use crate::risk::catalog::{self, RISK_AREAS};
use crate::risk::model::Route;
use crate::risk::{Focus, LocationClick, RiskArea, RouteCaps, Scene, SelectionState, ViewController};
use crate::ui;

/// Application state: the dashboard that owns the selection and hosts the map
pub struct App {
    pub config: AppConfig,
    /// Center, zoom and focus; the only source of truth for the view
    pub selection: SelectionState,
    pub viewport: Viewport,
    view: ViewController,
    pub map_renderer: MapRenderer,
    pub risk_areas: Vec<RiskArea>,
    caps: RouteCaps,
    /// Scene for `scene_focus`; rebuilt only when focus changes
    scene: Scene<'static>,
    scene_focus: Option<Focus>,
    /// Inner map rectangle in terminal cells
    map_area: Rect,
    pub last_click: Option<LocationClick>,
    /// Risk id whose detail view is open
    pub detail: Option<String>,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    dragged: bool,
    /// Current mouse position for cursor marker
    pub mouse_pos: Option<(u16, u16)>,
}

impl App {
    pub fn new(config: AppConfig, width: u16, height: u16) -> Self {
        let map_area = ui::map_inner(Rect::new(0, 0, width, height));
        let selection = SelectionState::new(config.default_center(), config.initial_zoom);
        let viewport = Viewport::new(
            selection.center,
            selection.zoom,
            config.min_zoom,
            config.max_zoom,
            config.world_wrap(),
            map_area.width as usize * 2,
            map_area.height as usize * 4,
        );

        let mut app = Self {
            caps: config.route_caps(),
            config,
            selection,
            viewport,
            view: ViewController::new(),
            map_renderer: MapRenderer::new(),
            risk_areas: RISK_AREAS.to_vec(),
            scene: Scene::default(),
            scene_focus: None,
            map_area,
            last_click: None,
            detail: None,
            should_quit: false,
            last_mouse: None,
            dragged: false,
            mouse_pos: None,
        };
        app.sync();
        app
    }

    /// Push selection changes into the view and refresh the scene.
    /// Called once per frame before drawing.
    pub fn sync(&mut self) {
        self.view.apply(&self.selection, &mut self.viewport);

        if self.scene_focus.as_ref() != Some(&self.selection.focus) {
            self.scene = Scene::build(
                &self.selection.focus,
                &self.risk_areas,
                &self.caps,
                self.config.smoothing_steps,
            );
            self.scene_focus = Some(self.selection.focus.clone());
        }
    }

    pub fn scene(&self) -> &Scene<'static> {
        &self.scene
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: u16, height: u16) {
        self.map_area = ui::map_inner(Rect::new(0, 0, width, height));
        self.viewport.width = self.map_area.width as usize * 2;
        self.viewport.height = self.map_area.height as usize * 4;
        self.view.invalidate();
    }

    /// Pan the map by braille pixels
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.selection.center = self.viewport.panned_center(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.selection.zoom = self.viewport.clamp_zoom(self.selection.zoom.saturating_add(1));
    }

    pub fn zoom_out(&mut self) {
        self.selection.zoom = self.viewport.clamp_zoom(self.selection.zoom.saturating_sub(1));
    }

    /// Zoom towards a terminal cell, keeping the point under it fixed
    pub fn zoom_at(&mut self, col: u16, row: u16, zoom_in: bool) {
        let target = if zoom_in {
            self.selection.zoom.saturating_add(1)
        } else {
            self.selection.zoom.saturating_sub(1)
        };
        let zoom = self.viewport.clamp_zoom(target);
        if zoom == self.selection.zoom {
            return;
        }

        if let Some((px, py)) = self.cell_to_pixel(col, row) {
            self.selection.center = self.viewport.center_for_zoom_at(px, py, zoom);
        }
        self.selection.zoom = zoom;
    }

    /// Focus a key risk: single selection, recentered at the focus zoom
    pub fn focus_risk(&mut self, risk_id: &str) {
        let Some(area) = self.risk_areas.iter().find(|r| r.id == risk_id) else {
            debug!(risk_id, "focus request for unknown risk");
            return;
        };
        info!(risk_id, name = area.name, "risk focused");
        self.selection.center = area.coordinates;
        self.selection.zoom = self.viewport.clamp_zoom(self.config.focus_zoom);
        self.selection.focus = Focus::Focused(risk_id.to_string());
    }

    /// Focus the n-th key risk in sidebar order
    pub fn focus_index(&mut self, index: usize) {
        if let Some(id) = self.risk_areas.get(index).map(|r| r.id) {
            self.focus_risk(id);
        }
    }

    /// Move focus to the next key risk, wrapping around
    pub fn cycle_focus(&mut self) {
        if self.risk_areas.is_empty() {
            return;
        }
        let next = match self.focused_index() {
            Some(i) => (i + 1) % self.risk_areas.len(),
            None => 0,
        };
        self.focus_index(next);
    }

    pub fn focused_index(&self) -> Option<usize> {
        let id = self.selection.focus.risk_id()?;
        self.risk_areas.iter().position(|r| r.id == id)
    }

    pub fn focused_area(&self) -> Option<&RiskArea> {
        self.focused_index().map(|i| &self.risk_areas[i])
    }

    /// Return to the default center and zoom with nothing focused
    pub fn reset_view(&mut self) {
        info!("view reset");
        self.selection.center = self.config.default_center();
        self.selection.zoom = self.viewport.clamp_zoom(self.config.default_zoom);
        self.selection.focus = Focus::Unfocused;
        self.detail = None;
    }

    /// Routes currently drawn for the focused risk
    pub fn active_routes(&self) -> Vec<&'static Route> {
        self.scene.routes().map(|line| line.route).collect()
    }

    /// Marker click callback: key risks take focus (a second click on a
    /// focused risk opens its detail view); regular ports are recorded.
    pub fn on_location_click(&mut self, click: LocationClick) {
        info!(
            name = %click.name,
            lat = click.lat,
            lon = click.lon,
            risk = click.risk,
            key_risk = click.is_key_risk(),
            "location clicked"
        );

        if let Some(id) = click.key_risk_id.as_deref() {
            if self.selection.focus.is_focused_on(id) {
                self.open_detail(id);
            } else {
                self.focus_risk(id);
            }
        }
        self.last_click = Some(click);
    }

    /// Hit-test a terminal cell against the current scene
    pub fn click_at(&mut self, col: u16, row: u16) {
        let Some((px, py)) = self.cell_to_pixel(col, row) else {
            return;
        };
        // Aim at the middle of the cell's dot grid
        let (x, y) = (px as f64 + 1.0, py as f64 + 2.0);
        let viewport = &self.viewport;
        let hit = self
            .scene
            .hit_test(x, y, DOTS_PER_PX, |p| viewport.project_f(p))
            .cloned();
        if let Some(click) = hit {
            self.on_location_click(click);
        }
    }

    /// Open the detail view when the risk has one
    pub fn open_detail(&mut self, risk_id: &str) {
        let has_page = catalog::risk_area(risk_id).is_some_and(|r| r.has_detail_page);
        if has_page {
            info!(risk_id, "detail view opened");
            self.detail = Some(risk_id.to_string());
        }
    }

    pub fn open_focused_detail(&mut self) {
        if let Some(id) = self.selection.focus.risk_id().map(str::to_string) {
            self.open_detail(&id);
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail_area(&self) -> Option<&RiskArea> {
        let id = self.detail.as_deref()?;
        self.risk_areas.iter().find(|r| r.id == id)
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn mouse_down(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.dragged = false;
    }

    /// Handle mouse drag
    pub fn handle_drag(&mut self, col: u16, row: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = (last_x as i32 - col as i32) * 2;
            let dy = (last_y as i32 - row as i32) * 4;
            if dx != 0 || dy != 0 {
                self.dragged = true;
                self.pan(dx, dy);
            }
        }
        self.last_mouse = Some((col, row));
    }

    /// Button released: a press without drag is a click
    pub fn mouse_up(&mut self, col: u16, row: u16) {
        if self.last_mouse.is_some() && !self.dragged {
            self.click_at(col, row);
        }
        self.last_mouse = None;
        self.dragged = false;
    }

    /// Update mouse cursor position
    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    /// Terminal cell to braille pixel coordinates inside the map, if on it
    fn cell_to_pixel(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        let area = self.map_area;
        let inside = col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height;
        inside.then(|| (((col - area.x) as i32) * 2, ((row - area.y) as i32) * 4))
    }

    /// Mouse position relative to the map, in cells
    pub fn mouse_cell_in_map(&self) -> Option<(u16, u16)> {
        let (col, row) = self.mouse_pos?;
        let (px, py) = self.cell_to_pixel(col, row)?;
        Some(((px / 2) as u16, (py / 4) as u16))
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("z{}", self.viewport.zoom())
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        let c = self.viewport.center();
        // Display longitude in [-180, 180) even when the view sits on a copy
        let lon = (c.lon + 180.0).rem_euclid(360.0) - 180.0;
        format!(
            "{:.1}°{}, {:.1}°{}",
            c.lat.abs(),
            if c.lat >= 0.0 { "N" } else { "S" },
            lon.abs(),
            if lon >= 0.0 { "E" } else { "W" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::LatLon;

    fn app() -> App {
        App::new(AppConfig::default(), 120, 40)
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert_eq!(app.selection.focus, Focus::Unfocused);
        assert_eq!(app.viewport.center(), LatLon::new(20.0, 120.0));
        // Starts one level out; reset returns to the default zoom
        assert_eq!(app.viewport.zoom(), 2);
        assert!(app.active_routes().is_empty());
    }

    #[test]
    fn test_focus_recenters() {
        let mut app = app();
        app.focus_risk("hormuz");
        app.sync();
        assert_eq!(app.viewport.center(), LatLon::new(26.5, 56.25));
        assert_eq!(app.viewport.zoom(), 4);
        assert_eq!(app.active_routes().len(), 3);
    }

    #[test]
    fn test_single_selection() {
        let mut app = app();
        app.focus_risk("taiwan");
        app.focus_risk("suez");
        app.sync();
        assert!(app.selection.focus.is_focused_on("suez"));
        assert_eq!(app.active_routes().len(), 2);
    }

    #[test]
    fn test_unknown_focus_ignored() {
        let mut app = app();
        app.focus_risk("panama");
        assert_eq!(app.selection.focus, Focus::Unfocused);
    }

    #[test]
    fn test_cycle_focus_wraps() {
        let mut app = app();
        app.cycle_focus();
        assert_eq!(app.focused_index(), Some(0));
        app.cycle_focus();
        app.cycle_focus();
        assert_eq!(app.focused_index(), Some(2));
        app.cycle_focus();
        assert_eq!(app.focused_index(), Some(0));
    }

    #[test]
    fn test_reset_view() {
        let mut app = app();
        app.focus_risk("taiwan");
        app.zoom_in();
        app.reset_view();
        app.sync();
        assert_eq!(app.selection.focus, Focus::Unfocused);
        assert_eq!(app.viewport.center(), LatLon::new(20.0, 120.0));
        assert_eq!(app.viewport.zoom(), 3);
    }

    #[test]
    fn test_zoom_bounded() {
        let mut app = app();
        for _ in 0..20 {
            app.zoom_in();
        }
        assert_eq!(app.selection.zoom, 10);
        for _ in 0..20 {
            app.zoom_out();
        }
        assert_eq!(app.selection.zoom, 2);
    }

    #[test]
    fn test_regular_click_keeps_focus() {
        let mut app = app();
        app.on_location_click(LocationClick {
            name: "Lagos".into(),
            lat: 6.455,
            lon: 3.3841,
            risk: 21,
            key_risk_id: None,
        });
        assert_eq!(app.selection.focus, Focus::Unfocused);
        assert_eq!(app.last_click.as_ref().map(|c| c.name.as_str()), Some("Lagos"));
    }

    #[test]
    fn test_key_risk_click_focuses_then_opens_detail() {
        let mut app = app();
        let click = LocationClick {
            name: "Taiwan Strait".into(),
            lat: 24.25,
            lon: 119.5,
            risk: 89,
            key_risk_id: Some("taiwan".into()),
        };
        app.on_location_click(click.clone());
        assert!(app.selection.focus.is_focused_on("taiwan"));
        assert!(app.detail.is_none());

        app.on_location_click(click);
        assert_eq!(app.detail.as_deref(), Some("taiwan"));
        assert_eq!(app.detail_area().map(|r| r.name), Some("Taiwan Strait"));
    }

    #[test]
    fn test_no_detail_page() {
        let mut app = app();
        app.focus_risk("suez");
        app.open_focused_detail();
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_click_on_marker() {
        let mut app = app();
        app.focus_risk("hormuz");
        app.sync();

        // Hormuz sits at the view center after focusing
        let area = ui::map_inner(Rect::new(0, 0, 120, 40));
        let (px, py) = app.viewport.project(LatLon::new(26.5, 56.25));
        let col = area.x + (px / 2) as u16;
        let row = area.y + (py / 4) as u16;

        app.mouse_down(col, row);
        app.mouse_up(col, row);
        let click = app.last_click.clone().expect("clicked");
        assert_eq!(click.key_risk_id.as_deref(), Some("hormuz"));
        // Second click on an already focused risk without a detail page
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_drag_is_not_click() {
        let mut app = app();
        let area = ui::map_inner(Rect::new(0, 0, 120, 40));
        let (col, row) = (area.x + 5, area.y + 5);
        app.mouse_down(col, row);
        app.handle_drag(col + 3, row);
        app.mouse_up(col + 3, row);
        assert!(app.last_click.is_none());
        assert!(app.selection.center.lon < 120.0);
    }

    #[test]
    fn test_view_jumps_back_across_seam() {
        let mut app = app();
        // Dragged west past the antimeridian onto the Americas
        app.selection.center = LatLon::new(34.0, -118.0);
        app.sync();
        assert!((app.viewport.center().lon - 242.0).abs() < 1e-9);

        // Further panning continues from the jumped center
        app.pan(-4, 0);
        assert!(app.selection.center.lon > 180.0);
    }

    #[test]
    fn test_center_coords_wraps_display() {
        let mut app = app();
        app.selection.center = LatLon::new(33.77, 241.81);
        app.sync();
        assert_eq!(app.center_coords(), "33.8°N, 118.2°W");
    }
}
