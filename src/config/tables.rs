use super::defaults;
use super::models::{AppConfig, LogLevel};
use serde::Deserialize;

/// On-disk layout: the flat [`AppConfig`] is split into named TOML tables so
/// the config file reads by concern.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    window: WindowConfig,
    #[serde(default)]
    viewer: ViewerConfig,
    #[serde(default)]
    scroll: ScrollConfig,
    #[serde(default)]
    hotspots: HotspotsConfig,
    #[serde(default)]
    chat: ChatConfig,
    #[serde(default)]
    music: MusicConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            window_width: tables.window.width,
            window_height: tables.window.height,
            window_pos_x: tables.window.pos_x,
            window_pos_y: tables.window.pos_y,
            fill_fraction: tables.viewer.fill_fraction,
            idle_delay_secs: tables.viewer.idle_delay_secs,
            auto_scroll_speed: tables.viewer.auto_scroll_speed,
            overscroll_px: tables.viewer.overscroll_px,
            jump_duration_ms: tables.viewer.jump_duration_ms,
            deep_jump_zoom: tables.viewer.deep_jump_zoom,
            min_zoom: tables.viewer.min_zoom,
            max_zoom: tables.viewer.max_zoom,
            medium_tier_zoom: tables.viewer.medium_tier_zoom,
            near_tier_zoom: tables.viewer.near_tier_zoom,
            radar_reveal_secs: tables.viewer.radar_reveal_secs,
            scroll_dir: tables.scroll.dir,
            scroll_width: tables.scroll.width,
            scroll_height: tables.scroll.height,
            hotspot_source_url: tables.hotspots.source_url,
            knowledge_path: tables.chat.knowledge_path,
            chat_top_k: tables.chat.top_k,
            chat_temperature: tables.chat.temperature,
            api_base_url: tables.chat.api_base_url,
            api_model: tables.chat.api_model,
            api_key: tables.chat.api_key,
            music_enabled: tables.music.enabled,
            music_volume: tables.music.volume,
            music_track: tables.music.track,
            show_minimap: tables.ui.show_minimap,
            show_controls: tables.ui.show_controls,
            log_level: tables.logging.log_level,
            key_radar: tables.keys.radar,
            key_history: tables.keys.history,
            key_reset_view: tables.keys.reset_view,
            key_cycle_mode: tables.keys.cycle_mode,
            key_close: tables.keys.close,
            key_toggle_music: tables.keys.toggle_music,
            key_toggle_chat: tables.keys.toggle_chat,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            window: WindowConfig {
                width: config.window_width,
                height: config.window_height,
                pos_x: config.window_pos_x,
                pos_y: config.window_pos_y,
            },
            viewer: ViewerConfig {
                fill_fraction: config.fill_fraction,
                idle_delay_secs: config.idle_delay_secs,
                auto_scroll_speed: config.auto_scroll_speed,
                overscroll_px: config.overscroll_px,
                jump_duration_ms: config.jump_duration_ms,
                deep_jump_zoom: config.deep_jump_zoom,
                min_zoom: config.min_zoom,
                max_zoom: config.max_zoom,
                medium_tier_zoom: config.medium_tier_zoom,
                near_tier_zoom: config.near_tier_zoom,
                radar_reveal_secs: config.radar_reveal_secs,
            },
            scroll: ScrollConfig {
                dir: config.scroll_dir.clone(),
                width: config.scroll_width,
                height: config.scroll_height,
            },
            hotspots: HotspotsConfig {
                source_url: config.hotspot_source_url.clone(),
            },
            chat: ChatConfig {
                knowledge_path: config.knowledge_path.clone(),
                top_k: config.chat_top_k,
                temperature: config.chat_temperature,
                api_base_url: config.api_base_url.clone(),
                api_model: config.api_model.clone(),
                api_key: config.api_key.clone(),
            },
            music: MusicConfig {
                enabled: config.music_enabled,
                volume: config.music_volume,
                track: config.music_track.clone(),
            },
            ui: UiConfig {
                show_minimap: config.show_minimap,
                show_controls: config.show_controls,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                radar: config.key_radar.clone(),
                history: config.key_history.clone(),
                reset_view: config.key_reset_view.clone(),
                cycle_mode: config.key_cycle_mode.clone(),
                close: config.key_close.clone(),
                toggle_music: config.key_toggle_music.clone(),
                toggle_chat: config.key_toggle_chat.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    width: f32,
    #[serde(default = "defaults::default_window_height")]
    height: f32,
    #[serde(default)]
    pos_x: Option<f32>,
    #[serde(default)]
    pos_y: Option<f32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: defaults::default_window_width(),
            height: defaults::default_window_height(),
            pos_x: None,
            pos_y: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ViewerConfig {
    #[serde(default = "defaults::default_fill_fraction")]
    fill_fraction: f32,
    #[serde(default = "defaults::default_idle_delay_secs")]
    idle_delay_secs: f32,
    #[serde(default = "defaults::default_auto_scroll_speed")]
    auto_scroll_speed: f32,
    #[serde(default = "defaults::default_overscroll_px")]
    overscroll_px: f32,
    #[serde(default = "defaults::default_jump_duration_ms")]
    jump_duration_ms: u64,
    #[serde(default = "defaults::default_deep_jump_zoom")]
    deep_jump_zoom: f32,
    #[serde(default = "defaults::default_min_zoom")]
    min_zoom: f32,
    #[serde(default = "defaults::default_max_zoom")]
    max_zoom: f32,
    #[serde(default = "defaults::default_medium_tier_zoom")]
    medium_tier_zoom: f32,
    #[serde(default = "defaults::default_near_tier_zoom")]
    near_tier_zoom: f32,
    #[serde(default = "defaults::default_radar_reveal_secs")]
    radar_reveal_secs: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            fill_fraction: defaults::default_fill_fraction(),
            idle_delay_secs: defaults::default_idle_delay_secs(),
            auto_scroll_speed: defaults::default_auto_scroll_speed(),
            overscroll_px: defaults::default_overscroll_px(),
            jump_duration_ms: defaults::default_jump_duration_ms(),
            deep_jump_zoom: defaults::default_deep_jump_zoom(),
            min_zoom: defaults::default_min_zoom(),
            max_zoom: defaults::default_max_zoom(),
            medium_tier_zoom: defaults::default_medium_tier_zoom(),
            near_tier_zoom: defaults::default_near_tier_zoom(),
            radar_reveal_secs: defaults::default_radar_reveal_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ScrollConfig {
    #[serde(default = "defaults::default_scroll_dir")]
    dir: String,
    #[serde(default = "defaults::default_scroll_width")]
    width: f32,
    #[serde(default = "defaults::default_scroll_height")]
    height: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            dir: defaults::default_scroll_dir(),
            width: defaults::default_scroll_width(),
            height: defaults::default_scroll_height(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct HotspotsConfig {
    #[serde(default)]
    source_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ChatConfig {
    #[serde(default = "defaults::default_knowledge_path")]
    knowledge_path: String,
    #[serde(default = "defaults::default_chat_top_k")]
    top_k: usize,
    #[serde(default = "defaults::default_chat_temperature")]
    temperature: f32,
    #[serde(default)]
    api_base_url: String,
    #[serde(default = "defaults::default_api_model")]
    api_model: String,
    #[serde(default)]
    api_key: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            knowledge_path: defaults::default_knowledge_path(),
            top_k: defaults::default_chat_top_k(),
            temperature: defaults::default_chat_temperature(),
            api_base_url: String::new(),
            api_model: defaults::default_api_model(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct MusicConfig {
    #[serde(default = "defaults::default_music_enabled")]
    enabled: bool,
    #[serde(default = "defaults::default_music_volume")]
    volume: f32,
    #[serde(default = "defaults::default_music_track")]
    track: String,
}

impl Default for MusicConfig {
    fn default() -> Self {
        MusicConfig {
            enabled: defaults::default_music_enabled(),
            volume: defaults::default_music_volume(),
            track: defaults::default_music_track(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct UiConfig {
    #[serde(default = "defaults::default_show_minimap")]
    show_minimap: bool,
    #[serde(default = "defaults::default_show_controls")]
    show_controls: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_minimap: defaults::default_show_minimap(),
            show_controls: defaults::default_show_controls(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_radar")]
    radar: String,
    #[serde(default = "defaults::default_key_history")]
    history: String,
    #[serde(default = "defaults::default_key_reset_view")]
    reset_view: String,
    #[serde(default = "defaults::default_key_cycle_mode")]
    cycle_mode: String,
    #[serde(default = "defaults::default_key_close")]
    close: String,
    #[serde(default = "defaults::default_key_toggle_music")]
    toggle_music: String,
    #[serde(default = "defaults::default_key_toggle_chat")]
    toggle_chat: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            radar: defaults::default_key_radar(),
            history: defaults::default_key_history(),
            reset_view: defaults::default_key_reset_view(),
            cycle_mode: defaults::default_key_cycle_mode(),
            close: defaults::default_key_close(),
            toggle_music: defaults::default_key_toggle_music(),
            toggle_chat: defaults::default_key_toggle_chat(),
        }
    }
}
