use super::super::super::messages::{Message, ViewId};
use super::super::super::state::App;
use super::super::Effect;
use tracing::info;

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::Navigate(view) => self.handle_navigate(view),
            Message::SceneDragStarted { position, bounds } => {
                self.handle_scene_drag_started(position, bounds)
            }
            Message::SceneDragMoved { position } => self.handle_scene_drag_moved(position),
            Message::SceneDragEnded { position } => {
                self.handle_scene_drag_ended(position, &mut effects)
            }
            Message::SceneHovered { bounds } => self.handle_scene_hovered(bounds),
            Message::SceneZoomed { delta, position } => self.handle_scene_zoomed(delta, position),
            Message::MinimapClicked { fraction } => self.handle_minimap_clicked(fraction),
            Message::HotspotSelected(id) => self.handle_hotspot_selected(&id, &mut effects),
            Message::PortalClosed => self.handle_portal_closed(),
            Message::PortalModeChanged(mode) => self.handle_portal_mode_changed(mode),
            Message::CyclePortalMode => self.handle_cycle_portal_mode(),
            Message::PortalVersionSelected(idx) => self.handle_portal_version_selected(idx),
            Message::RelatedHotspotSelected(id) => self.handle_deep_jump(&id),
            Message::RadarActivated => self.handle_radar_activated(),
            Message::ToggleHistory => self.handle_toggle_history(),
            Message::HistoryEntrySelected(id) => self.handle_history_entry_selected(&id),
            Message::ResetView => self.handle_reset_view(),
            Message::ToggleChat => self.handle_toggle_chat(&mut effects),
            Message::ChatInputChanged(input) => self.handle_chat_input_changed(input),
            Message::ChatSubmitted => self.handle_chat_submitted(&mut effects),
            Message::ChatReplied { request_id, result } => {
                self.handle_chat_replied(request_id, result)
            }
            Message::KnowledgeLoaded { result } => self.handle_knowledge_loaded(result),
            Message::HotspotsLoaded { hotspots, error } => {
                self.handle_hotspots_loaded(hotspots, error)
            }
            Message::ToggleMusic => self.handle_toggle_music(),
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects)
            }
            Message::WindowMoved { x, y } => self.handle_window_moved(x, y, &mut effects),
            Message::Tick(now) => self.handle_tick(now, &mut effects),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
        }

        effects
    }

    fn handle_navigate(&mut self, view: ViewId) {
        if self.view == view {
            return;
        }
        self.view = view;
        self.portal.close();
        if view != ViewId::Explore {
            self.history.visible = false;
        }
        info!(view = view.label(), "Navigated");
    }

    fn handle_toggle_music(&mut self) {
        if self.music.is_some() {
            self.stop_music();
        } else {
            self.start_music();
        }
    }

    fn handle_window_resized(&mut self, width: f32, height: f32, effects: &mut Vec<Effect>) {
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        self.config.window_width = width.max(1.0);
        self.config.window_height = height.max(1.0);
        let nav = super::super::super::state::NAV_BAR_HEIGHT;
        self.viewer
            .controller
            .set_container(width, (height - nav).max(0.0));
        effects.push(Effect::SaveConfig);
    }

    fn handle_window_moved(&mut self, x: f32, y: f32, effects: &mut Vec<Effect>) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.config.window_pos_x = Some(x);
        self.config.window_pos_y = Some(y);
        effects.push(Effect::SaveConfig);
    }
}
