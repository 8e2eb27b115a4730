use serde::Deserialize;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default)]
    pub window_pos_x: Option<f32>,
    #[serde(default)]
    pub window_pos_y: Option<f32>,
    #[serde(default = "crate::config::defaults::default_fill_fraction")]
    pub fill_fraction: f32,
    #[serde(default = "crate::config::defaults::default_idle_delay_secs")]
    pub idle_delay_secs: f32,
    #[serde(default = "crate::config::defaults::default_auto_scroll_speed")]
    pub auto_scroll_speed: f32,
    #[serde(default = "crate::config::defaults::default_overscroll_px")]
    pub overscroll_px: f32,
    #[serde(default = "crate::config::defaults::default_jump_duration_ms")]
    pub jump_duration_ms: u64,
    #[serde(default = "crate::config::defaults::default_deep_jump_zoom")]
    pub deep_jump_zoom: f32,
    #[serde(default = "crate::config::defaults::default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "crate::config::defaults::default_max_zoom")]
    pub max_zoom: f32,
    #[serde(default = "crate::config::defaults::default_medium_tier_zoom")]
    pub medium_tier_zoom: f32,
    #[serde(default = "crate::config::defaults::default_near_tier_zoom")]
    pub near_tier_zoom: f32,
    #[serde(default = "crate::config::defaults::default_radar_reveal_secs")]
    pub radar_reveal_secs: f32,
    #[serde(default = "crate::config::defaults::default_scroll_dir")]
    pub scroll_dir: String,
    #[serde(default = "crate::config::defaults::default_scroll_width")]
    pub scroll_width: f32,
    #[serde(default = "crate::config::defaults::default_scroll_height")]
    pub scroll_height: f32,
    #[serde(default)]
    pub hotspot_source_url: Option<String>,
    #[serde(default = "crate::config::defaults::default_knowledge_path")]
    pub knowledge_path: String,
    #[serde(default = "crate::config::defaults::default_chat_top_k")]
    pub chat_top_k: usize,
    #[serde(default = "crate::config::defaults::default_chat_temperature")]
    pub chat_temperature: f32,
    #[serde(default)]
    pub api_base_url: String,
    #[serde(default = "crate::config::defaults::default_api_model")]
    pub api_model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "crate::config::defaults::default_music_enabled")]
    pub music_enabled: bool,
    #[serde(default = "crate::config::defaults::default_music_volume")]
    pub music_volume: f32,
    #[serde(default = "crate::config::defaults::default_music_track")]
    pub music_track: String,
    #[serde(default = "crate::config::defaults::default_show_minimap")]
    pub show_minimap: bool,
    #[serde(default = "crate::config::defaults::default_show_controls")]
    pub show_controls: bool,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_radar")]
    pub key_radar: String,
    #[serde(default = "crate::config::defaults::default_key_history")]
    pub key_history: String,
    #[serde(default = "crate::config::defaults::default_key_reset_view")]
    pub key_reset_view: String,
    #[serde(default = "crate::config::defaults::default_key_cycle_mode")]
    pub key_cycle_mode: String,
    #[serde(default = "crate::config::defaults::default_key_close")]
    pub key_close: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_music")]
    pub key_toggle_music: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_chat")]
    pub key_toggle_chat: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        use crate::config::defaults::*;
        AppConfig {
            window_width: default_window_width(),
            window_height: default_window_height(),
            window_pos_x: None,
            window_pos_y: None,
            fill_fraction: default_fill_fraction(),
            idle_delay_secs: default_idle_delay_secs(),
            auto_scroll_speed: default_auto_scroll_speed(),
            overscroll_px: default_overscroll_px(),
            jump_duration_ms: default_jump_duration_ms(),
            deep_jump_zoom: default_deep_jump_zoom(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            medium_tier_zoom: default_medium_tier_zoom(),
            near_tier_zoom: default_near_tier_zoom(),
            radar_reveal_secs: default_radar_reveal_secs(),
            scroll_dir: default_scroll_dir(),
            scroll_width: default_scroll_width(),
            scroll_height: default_scroll_height(),
            hotspot_source_url: None,
            knowledge_path: default_knowledge_path(),
            chat_top_k: default_chat_top_k(),
            chat_temperature: default_chat_temperature(),
            api_base_url: String::new(),
            api_model: default_api_model(),
            api_key: None,
            music_enabled: default_music_enabled(),
            music_volume: default_music_volume(),
            music_track: default_music_track(),
            show_minimap: default_show_minimap(),
            show_controls: default_show_controls(),
            log_level: default_log_level(),
            key_radar: default_key_radar(),
            key_history: default_key_history(),
            key_reset_view: default_key_reset_view(),
            key_cycle_mode: default_key_cycle_mode(),
            key_close: default_key_close(),
            key_toggle_music: default_key_toggle_music(),
            key_toggle_chat: default_key_toggle_chat(),
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
