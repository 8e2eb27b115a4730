use super::Effect;
use super::super::messages::ViewId;
use super::super::state::{App, CLICK_DRAG_TOLERANCE, WHEEL_ZOOM_STEP};
use crate::viewport::TickOutcome;
use iced::{Point, Size};
use std::time::{Duration, Instant};
use tracing::debug;

/// Frame deltas above this are treated as a stall, not one huge step.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

impl App {
    pub(super) fn handle_scene_drag_started(&mut self, position: Point, bounds: Size) {
        let now = Instant::now();
        self.viewer
            .controller
            .set_container(bounds.width, bounds.height);
        self.viewer.controller.begin_drag(now);
        self.viewer.drag_origin = Some(position);
        self.viewer.last_cursor = Some(position);
    }

    pub(super) fn handle_scene_drag_moved(&mut self, position: Point) {
        if !self.viewer.controller.is_dragging() {
            return;
        }
        let now = Instant::now();
        if let Some(last) = self.viewer.last_cursor {
            self.viewer
                .controller
                .on_drag(position.x - last.x, position.y - last.y, now);
        }
        self.viewer.last_cursor = Some(position);
    }

    pub(super) fn handle_scene_drag_ended(&mut self, position: Point, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        self.viewer.controller.end_drag(now);
        let origin = self.viewer.drag_origin.take();
        self.viewer.last_cursor = None;

        // A release that barely moved is a click; resolve it against the
        // currently visible hotspots.
        let Some(origin) = origin else { return };
        if origin.distance(position) > CLICK_DRAG_TOLERANCE {
            return;
        }
        let tier = self.zoom_tier();
        let reveal = self.viewer.radar_active(now);
        if let Some(id) = self
            .viewer
            .hotspot_at(position, tier, reveal)
            .map(|h| h.id.clone())
        {
            self.open_hotspot(&id, effects);
        }
    }

    pub(super) fn handle_scene_hovered(&mut self, bounds: Size) {
        self.viewer
            .controller
            .set_container(bounds.width, bounds.height);
        self.viewer.controller.pointer_activity(Instant::now());
    }

    pub(super) fn handle_scene_zoomed(&mut self, delta: f32, position: Point) {
        if !delta.is_finite() {
            return;
        }
        let factor = WHEEL_ZOOM_STEP.powf(delta);
        self.viewer
            .controller
            .zoom_by(factor, position.x, position.y, Instant::now());
    }

    pub(super) fn handle_minimap_clicked(&mut self, fraction: f32) {
        if !fraction.is_finite() {
            return;
        }
        let zoom = self.viewer.controller.transform().scale;
        let duration = self.jump_duration();
        self.viewer
            .controller
            .center_on(fraction, zoom, duration, Instant::now());
        debug!(fraction, "Minimap jump requested");
    }

    /// Reset the zoom to 1x in place, the panorama's natural framing.
    pub(super) fn handle_reset_view(&mut self) {
        let x = self.viewer.controller.transform().x;
        let duration = self.jump_duration();
        self.viewer
            .controller
            .request_jump(x, 1.0, duration, Instant::now());
    }

    /// Close the portal, glide to the target hotspot, and re-open the portal
    /// once the jump settles.
    pub(super) fn handle_deep_jump(&mut self, id: &str) {
        let Some(hotspot) = self.viewer.hotspot_by_id(id) else {
            debug!(id, "Deep jump target not in catalogue");
            return;
        };
        let (content_width, _) = self.viewer.controller.content();
        let center_x = hotspot.x / 100.0 * content_width + hotspot.width / 2.0;
        let fraction = (center_x / content_width).clamp(0.0, 1.0);
        let zoom = self.config.deep_jump_zoom;
        let duration = self.jump_duration();

        self.portal.close();
        self.viewer.pending_open = Some(id.to_string());
        self.viewer
            .controller
            .center_on(fraction, zoom, duration, Instant::now());
        debug!(id, fraction, zoom, "Deep jump started");
    }

    pub(super) fn handle_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            effects.push(Effect::QuitSafely);
            return;
        }

        if let Some(until) = self.viewer.radar_until {
            if now >= until {
                self.viewer.radar_until = None;
            }
        }

        let delta = self
            .viewer
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default()
            .min(MAX_FRAME_DELTA);
        self.viewer.last_tick = Some(now);

        // Animation and idle auto-scroll only run under the explore scene.
        if self.view != ViewId::Explore {
            return;
        }
        if self.viewer.controller.tick(now, delta) == TickOutcome::JumpFinished {
            if let Some(id) = self.viewer.pending_open.take() {
                self.open_hotspot(&id, effects);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::scroll_loader::LoadedScroll;
    use std::path::PathBuf;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.music_enabled = false;
        config.hotspot_source_url = None;
        config.window_width = 1280.0;
        config.window_height = 800.0;
        config
    }

    fn build_test_app() -> App {
        let scroll = LoadedScroll::empty(12_000.0, 1_000.0);
        let (mut app, _task) = App::bootstrap(
            scroll,
            test_config(),
            PathBuf::from("/tmp/handscroll-viewer-test"),
            None,
        );
        app.view = ViewId::Explore;
        app.handle_scene_hovered(Size::new(1_280.0, 744.0));
        app
    }

    fn hotspot_screen_center(app: &App, id: &str) -> Point {
        let hotspot = app.viewer.hotspot_by_id(id).expect("hotspot in catalogue");
        let (x, y, width, height) = (hotspot.x, hotspot.y, hotspot.width, hotspot.height);
        let transform = app.viewer.controller.transform();
        let scale = app.viewer.controller.draw_scale();
        let (content_width, content_height) = app.viewer.controller.content();
        Point::new(
            (x / 100.0 * content_width + width / 2.0) * scale + transform.x,
            (y / 100.0 * content_height + height / 2.0) * scale + transform.y,
        )
    }

    #[test]
    fn click_on_chapter_hotspot_opens_portal_and_records_history() {
        let mut app = build_test_app();
        let mut effects = Vec::new();
        let bounds = Size::new(1_280.0, 744.0);
        let point = hotspot_screen_center(&app, "qiyue");

        app.handle_scene_drag_started(point, bounds);
        app.handle_scene_drag_ended(point, &mut effects);

        assert_eq!(app.portal.open_id.as_deref(), Some("qiyue"));
        assert_eq!(app.history.ids.first().map(String::as_str), Some("qiyue"));
        assert!(matches!(effects.first(), Some(Effect::SaveHistory)));
    }

    #[test]
    fn drag_beyond_tolerance_is_not_a_click() {
        let mut app = build_test_app();
        let mut effects = Vec::new();
        let bounds = Size::new(1_280.0, 744.0);
        let start = hotspot_screen_center(&app, "qiyue");

        app.handle_scene_drag_started(start, bounds);
        let end = Point::new(start.x - 80.0, start.y);
        app.handle_scene_drag_moved(end);
        app.handle_scene_drag_ended(end, &mut effects);

        assert!(app.portal.open_id.is_none(), "a pan must not select a hotspot");
        assert!(effects.is_empty());
    }

    #[test]
    fn detail_hotspot_needs_the_radar_at_far_tier() {
        let mut app = build_test_app();
        let mut effects = Vec::new();
        let bounds = Size::new(1_280.0, 744.0);
        let point = hotspot_screen_center(&app, "langba");

        app.handle_scene_drag_started(point, bounds);
        app.handle_scene_drag_ended(point, &mut effects);
        assert!(
            app.portal.open_id.is_none(),
            "detail hotspots are invisible at the far tier"
        );

        app.handle_radar_activated();
        app.handle_scene_drag_started(point, bounds);
        app.handle_scene_drag_ended(point, &mut effects);
        assert_eq!(app.portal.open_id.as_deref(), Some("langba"));
    }

    #[test]
    fn deep_jump_reopens_portal_after_the_jump_settles() {
        let mut app = build_test_app();
        let mut effects = Vec::new();

        app.handle_deep_jump("dongshan");
        assert!(app.portal.open_id.is_none());
        assert_eq!(app.viewer.pending_open.as_deref(), Some("dongshan"));

        let settled = Instant::now() + Duration::from_secs(5);
        app.handle_tick(settled, &mut effects);

        assert_eq!(app.portal.open_id.as_deref(), Some("dongshan"));
        assert!(app.viewer.pending_open.is_none());
        assert!(matches!(effects.first(), Some(Effect::SaveHistory)));
    }

    #[test]
    fn minimap_click_centers_the_requested_fraction() {
        let mut app = build_test_app();
        let mut effects = Vec::new();

        app.handle_minimap_clicked(0.5);
        let settled = Instant::now() + Duration::from_secs(5);
        app.handle_tick(settled, &mut effects);

        let transform = app.viewer.controller.transform();
        let scale = app.viewer.controller.draw_scale();
        let (content_width, _) = app.viewer.controller.content();
        let center_fraction = ((640.0 - transform.x) / scale) / content_width;
        assert!(
            (center_fraction - 0.5).abs() < 0.01,
            "screen center should sit at fraction {center_fraction}"
        );
    }
}
