mod chat;
mod constants;
mod ui;
mod viewer;

use crate::assistant::GenerationClient;
use crate::cache::{self, VisitHistory};
use crate::config::AppConfig;
use crate::hotspots::{self, ZoomTier};
use crate::music::AudioSession;
use crate::scroll_loader::LoadedScroll;
use crate::viewport::{ViewportController, ViewportSettings};
use iced::Task;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use super::messages::{Message, ViewId};
use super::update::Effect;

pub(in crate::app) use chat::{ChatMessage, ChatRole, ChatState};
pub(crate) use constants::*;
pub(in crate::app) use ui::{HistoryState, PortalState};
pub(in crate::app) use viewer::{SceneTile, ViewerState};

/// Core application state composed of sub-models.
pub struct App {
    pub(super) view: ViewId,
    pub(super) viewer: ViewerState,
    pub(super) chat: ChatState,
    pub(super) history: HistoryState,
    pub(super) portal: PortalState,
    pub(super) music: Option<AudioSession>,
    pub(super) music_error: Option<String>,
    pub(super) assistant: Option<GenerationClient>,
    /// Shared client for the hotspot store; built once so async tasks only
    /// ever clone it.
    pub(super) http: Option<reqwest::blocking::Client>,
    pub(super) config: AppConfig,
    pub(super) scroll_path: PathBuf,
}

impl App {
    pub(super) fn bootstrap(
        scroll: LoadedScroll,
        mut config: AppConfig,
        scroll_path: PathBuf,
        history: Option<VisitHistory>,
    ) -> (App, Task<Message>) {
        clamp_config(&mut config);

        let mut controller =
            ViewportController::new(scroll.width, scroll.height, viewport_settings(&config));
        controller.set_container(
            config.window_width,
            (config.window_height - NAV_BAR_HEIGHT).max(0.0),
        );

        let assistant = match GenerationClient::new(
            &config.api_base_url,
            &config.api_model,
            config.api_key.clone(),
        ) {
            Ok(client) => {
                if !client.is_configured() {
                    warn!("Generation service not configured; the chat guide will answer with a notice");
                }
                Some(client)
            }
            Err(err) => {
                warn!("Could not build the generation client: {err:#}");
                None
            }
        };

        let http = match reqwest::blocking::Client::builder().build() {
            Ok(client) => Some(client),
            Err(err) => {
                warn!("Could not build the HTTP client: {err:#}");
                None
            }
        };

        let mut app = App {
            view: ViewId::Home,
            viewer: ViewerState::new(controller, &scroll, hotspots::builtin_hotspots()),
            chat: ChatState::new(),
            history: HistoryState::new(history.map(|h| h.ids).unwrap_or_default()),
            portal: PortalState::new(),
            music: None,
            music_error: None,
            assistant,
            http,
            config,
            scroll_path,
        };

        if app.config.music_enabled {
            app.start_music();
        }

        let mut init_tasks = vec![app.run_effect(Effect::LoadKnowledge)];
        if app.config.hotspot_source_url.is_some() {
            init_tasks.push(app.run_effect(Effect::FetchHotspots));
        } else {
            warn!("No hotspot store configured; using the bundled catalogue");
        }

        info!(
            hotspots = app.viewer.hotspots.len(),
            tiles = app.viewer.tiles.len(),
            music = app.config.music_enabled,
            "Initialized app state"
        );
        (app, Task::batch(init_tasks))
    }

    /// Zoom tier of the current transform, for the visibility filter.
    pub(super) fn zoom_tier(&self) -> ZoomTier {
        ZoomTier::from_scale(
            self.viewer.controller.transform().scale,
            self.config.medium_tier_zoom,
            self.config.near_tier_zoom,
        )
    }

    pub(super) fn jump_duration(&self) -> Duration {
        Duration::from_millis(self.config.jump_duration_ms)
    }

    pub(super) fn persist_history(&self) {
        cache::save_history(
            &self.scroll_path,
            &VisitHistory {
                ids: self.history.ids.clone(),
            },
        );
    }

    pub(super) fn persist_config(&self) {
        cache::save_scroll_config(&self.scroll_path, &self.config);
    }

    pub(super) fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        match AudioSession::start(
            std::path::Path::new(&self.config.music_track),
            self.config.music_volume,
        ) {
            Ok(session) => {
                self.music = Some(session);
                self.music_error = None;
            }
            Err(err) => {
                warn!("Background music unavailable: {err:#}");
                self.music_error = Some("Background music unavailable".to_string());
            }
        }
    }

    pub(super) fn stop_music(&mut self) {
        if let Some(session) = self.music.take() {
            session.stop();
        }
    }
}

pub(super) fn viewport_settings(config: &AppConfig) -> ViewportSettings {
    ViewportSettings {
        fill_fraction: config.fill_fraction,
        overscroll: config.overscroll_px,
        min_zoom: config.min_zoom,
        max_zoom: config.max_zoom,
        idle_delay: Duration::from_secs_f32(config.idle_delay_secs),
        auto_scroll_speed: config.auto_scroll_speed,
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Sanitize the configuration once at setup. Out-of-range values clamp,
/// non-finite ones reset; nothing is re-validated per frame.
pub(super) fn clamp_config(config: &mut AppConfig) {
    fn normalize_key_binding(value: &mut String, fallback: &str) {
        let normalized = value.trim().to_ascii_lowercase();
        *value = if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized
        };
    }

    let defaults = AppConfig::default();

    config.window_width = finite_or(config.window_width, defaults.window_width).clamp(320.0, 7680.0);
    config.window_height =
        finite_or(config.window_height, defaults.window_height).clamp(240.0, 4320.0);
    config.window_pos_x = config.window_pos_x.filter(|v| v.is_finite());
    config.window_pos_y = config.window_pos_y.filter(|v| v.is_finite());

    config.fill_fraction = finite_or(config.fill_fraction, defaults.fill_fraction).clamp(0.1, 1.0);
    config.idle_delay_secs =
        finite_or(config.idle_delay_secs, defaults.idle_delay_secs).clamp(1.0, 300.0);
    config.auto_scroll_speed =
        finite_or(config.auto_scroll_speed, defaults.auto_scroll_speed).clamp(0.5, 60.0);
    config.overscroll_px = finite_or(config.overscroll_px, defaults.overscroll_px).clamp(0.0, 1000.0);
    config.jump_duration_ms = config.jump_duration_ms.min(10_000);

    config.min_zoom = finite_or(config.min_zoom, defaults.min_zoom).clamp(0.1, 10.0);
    config.max_zoom = finite_or(config.max_zoom, defaults.max_zoom).clamp(config.min_zoom, 10.0);
    config.deep_jump_zoom =
        finite_or(config.deep_jump_zoom, defaults.deep_jump_zoom).clamp(config.min_zoom, config.max_zoom);
    config.medium_tier_zoom =
        finite_or(config.medium_tier_zoom, defaults.medium_tier_zoom).max(0.1);
    config.near_tier_zoom =
        finite_or(config.near_tier_zoom, defaults.near_tier_zoom).max(config.medium_tier_zoom);
    config.radar_reveal_secs =
        finite_or(config.radar_reveal_secs, defaults.radar_reveal_secs).clamp(0.5, 30.0);

    config.scroll_width = finite_or(config.scroll_width, defaults.scroll_width).max(1.0);
    config.scroll_height = finite_or(config.scroll_height, defaults.scroll_height).max(1.0);

    config.chat_top_k = config.chat_top_k.clamp(1, 10);
    config.chat_temperature =
        finite_or(config.chat_temperature, defaults.chat_temperature).clamp(0.0, 1.0);
    config.music_volume = finite_or(config.music_volume, defaults.music_volume).clamp(0.0, 1.0);

    normalize_key_binding(&mut config.key_radar, "r");
    normalize_key_binding(&mut config.key_history, "p");
    normalize_key_binding(&mut config.key_reset_view, "f");
    normalize_key_binding(&mut config.key_cycle_mode, "c");
    normalize_key_binding(&mut config.key_close, "q");
    normalize_key_binding(&mut config.key_toggle_music, "m");
    normalize_key_binding(&mut config.key_toggle_chat, "ctrl+k");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_rejects_negative_and_non_finite_geometry() {
        let mut config = AppConfig::default();
        config.fill_fraction = -3.0;
        config.idle_delay_secs = f32::NAN;
        config.min_zoom = -1.0;
        config.max_zoom = 0.0;
        clamp_config(&mut config);

        assert!((0.1..=1.0).contains(&config.fill_fraction));
        assert_eq!(config.idle_delay_secs, AppConfig::default().idle_delay_secs);
        assert!(config.min_zoom > 0.0);
        assert!(config.max_zoom >= config.min_zoom);
        assert!((config.min_zoom..=config.max_zoom).contains(&config.deep_jump_zoom));
    }

    #[test]
    fn clamp_orders_tier_thresholds() {
        let mut config = AppConfig::default();
        config.medium_tier_zoom = 3.0;
        config.near_tier_zoom = 1.0;
        clamp_config(&mut config);
        assert!(config.near_tier_zoom >= config.medium_tier_zoom);
    }

    #[test]
    fn clamp_normalizes_key_bindings() {
        let mut config = AppConfig::default();
        config.key_radar = "  R ".to_string();
        config.key_close = String::new();
        clamp_config(&mut config);
        assert_eq!(config.key_radar, "r");
        assert_eq!(config.key_close, "q");
    }
}
