use crate::hotspots::{Hotspot, ZoomTier, visible_at};
use crate::scroll_loader::LoadedScroll;
use crate::viewport::ViewportController;
use iced::Point;
use iced::widget::image::Handle;
use std::time::Instant;

use super::{SEGMENT_EARLY, SEGMENT_LATE, SEGMENT_MID};

/// A panorama tile with its decoded image handle.
pub struct SceneTile {
    pub(in crate::app) handle: Handle,
    pub(in crate::app) offset_x: f32,
    pub(in crate::app) width: f32,
    pub(in crate::app) height: f32,
}

/// Scroll-scene model: the camera, the panorama, and the hotspot catalogue.
pub struct ViewerState {
    pub(in crate::app) controller: ViewportController,
    pub(in crate::app) tiles: Vec<SceneTile>,
    pub(in crate::app) hotspots: Vec<Hotspot>,
    pub(in crate::app) hotspots_loading: bool,
    pub(in crate::app) hotspot_error: Option<String>,
    pub(in crate::app) radar_until: Option<Instant>,
    pub(in crate::app) drag_origin: Option<Point>,
    pub(in crate::app) last_cursor: Option<Point>,
    /// Hotspot to open once the current jump animation settles.
    pub(in crate::app) pending_open: Option<String>,
    pub(in crate::app) last_tick: Option<Instant>,
}

impl ViewerState {
    pub(in crate::app) fn new(
        controller: ViewportController,
        scroll: &LoadedScroll,
        hotspots: Vec<Hotspot>,
    ) -> Self {
        let tiles = scroll
            .tiles
            .iter()
            .map(|tile| SceneTile {
                handle: Handle::from_path(&tile.path),
                offset_x: tile.offset_x,
                width: tile.width,
                height: tile.height,
            })
            .collect();
        ViewerState {
            controller,
            tiles,
            hotspots,
            hotspots_loading: false,
            hotspot_error: None,
            radar_until: None,
            drag_origin: None,
            last_cursor: None,
            pending_open: None,
            last_tick: None,
        }
    }

    pub(in crate::app) fn radar_active(&self, now: Instant) -> bool {
        self.radar_until.is_some_and(|until| now < until)
    }

    pub(in crate::app) fn hotspot_by_id(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    pub(in crate::app) fn visible_hotspots(
        &self,
        tier: ZoomTier,
        reveal_all: bool,
    ) -> impl Iterator<Item = &Hotspot> {
        self.hotspots
            .iter()
            .filter(move |h| visible_at(h.level, tier, reveal_all))
    }

    /// Topmost visible hotspot under a screen-space point, if any.
    pub(in crate::app) fn hotspot_at(
        &self,
        point: Point,
        tier: ZoomTier,
        reveal_all: bool,
    ) -> Option<&Hotspot> {
        let transform = self.controller.transform();
        let scale = self.controller.draw_scale();
        if scale <= 0.0 {
            return None;
        }
        let (content_width, content_height) = self.controller.content();
        let cx = (point.x - transform.x) / scale;
        let cy = (point.y - transform.y) / scale;

        self.hotspots
            .iter()
            .rev()
            .filter(|h| visible_at(h.level, tier, reveal_all))
            .find(|h| {
                let x0 = h.x / 100.0 * content_width;
                let y0 = h.y / 100.0 * content_height;
                cx >= x0 && cx <= x0 + h.width && cy >= y0 && cy <= y0 + h.height
            })
    }

    /// Narrative section label for the control strip, keyed off how far the
    /// camera has traveled along the panorama.
    pub(in crate::app) fn narrative_segment(&self) -> &'static str {
        let fraction = self.controller.offset_fraction();
        if fraction > 0.7 {
            SEGMENT_LATE
        } else if fraction > 0.4 {
            SEGMENT_MID
        } else {
            SEGMENT_EARLY
        }
    }
}
