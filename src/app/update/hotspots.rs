use super::Effect;
use super::super::messages::PortalMode;
use super::super::state::App;
use crate::hotspots::Hotspot;
use std::time::{Duration, Instant};
use tracing::{info, warn};

impl App {
    /// Open the portal on a hotspot and record the visit.
    pub(super) fn open_hotspot(&mut self, id: &str, effects: &mut Vec<Effect>) {
        let Some(hotspot) = self.viewer.hotspot_by_id(id) else {
            return;
        };
        info!(id, label = %hotspot.label, "Hotspot opened");
        self.portal.open(id);
        self.history.record(id);
        effects.push(Effect::SaveHistory);
    }

    pub(super) fn handle_hotspot_selected(&mut self, id: &str, effects: &mut Vec<Effect>) {
        self.open_hotspot(id, effects);
    }

    pub(super) fn handle_portal_closed(&mut self) {
        self.portal.close();
    }

    pub(super) fn handle_portal_mode_changed(&mut self, mode: PortalMode) {
        self.portal.mode = mode;
    }

    pub(super) fn handle_cycle_portal_mode(&mut self) {
        self.portal.mode = self.portal.mode.next();
    }

    pub(super) fn handle_portal_version_selected(&mut self, idx: usize) {
        let count = self
            .portal
            .open_id
            .as_deref()
            .and_then(|id| self.viewer.hotspot_by_id(id))
            .map(|h| h.versions.len())
            .unwrap_or(0);
        if count > 0 {
            self.portal.version = idx.min(count - 1);
        }
    }

    pub(super) fn handle_radar_activated(&mut self) {
        let duration = Duration::from_secs_f32(self.config.radar_reveal_secs);
        self.viewer.radar_until = Some(Instant::now() + duration);
        info!(secs = self.config.radar_reveal_secs, "Radar reveal armed");
    }

    pub(super) fn handle_toggle_history(&mut self) {
        self.history.visible = !self.history.visible;
    }

    pub(super) fn handle_history_entry_selected(&mut self, id: &str) {
        self.handle_deep_jump(id);
    }

    pub(super) fn handle_hotspots_loaded(
        &mut self,
        hotspots: Vec<Hotspot>,
        error: Option<String>,
    ) {
        self.viewer.hotspots_loading = false;
        if let Some(err) = &error {
            warn!("Hotspot store unavailable, using bundled catalogue: {err}");
        }
        self.viewer.hotspot_error = error;
        self.viewer.hotspots = hotspots;
        // Keep the open portal only if its hotspot survived the reload.
        if let Some(id) = self.portal.open_id.clone() {
            if self.viewer.hotspot_by_id(&id).is_none() {
                self.portal.close();
            }
        }
    }
}
