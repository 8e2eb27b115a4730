pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    800.0
}

pub(crate) fn default_fill_fraction() -> f32 {
    0.8
}

pub(crate) fn default_idle_delay_secs() -> f32 {
    10.0
}

pub(crate) fn default_auto_scroll_speed() -> f32 {
    7.5
}

pub(crate) fn default_overscroll_px() -> f32 {
    120.0
}

pub(crate) fn default_jump_duration_ms() -> u64 {
    1200
}

pub(crate) fn default_deep_jump_zoom() -> f32 {
    1.5
}

pub(crate) fn default_min_zoom() -> f32 {
    1.0
}

pub(crate) fn default_max_zoom() -> f32 {
    4.0
}

pub(crate) fn default_medium_tier_zoom() -> f32 {
    1.5
}

pub(crate) fn default_near_tier_zoom() -> f32 {
    2.5
}

pub(crate) fn default_radar_reveal_secs() -> f32 {
    2.0
}

pub(crate) fn default_scroll_dir() -> String {
    "assets/tiles".to_string()
}

pub(crate) fn default_scroll_width() -> f32 {
    12_000.0
}

pub(crate) fn default_scroll_height() -> f32 {
    1_000.0
}

pub(crate) fn default_knowledge_path() -> String {
    "assets/knowledge.json".to_string()
}

pub(crate) fn default_chat_top_k() -> usize {
    3
}

pub(crate) fn default_chat_temperature() -> f32 {
    0.7
}

pub(crate) fn default_api_model() -> String {
    "gemini-2.5-flash".to_string()
}

pub(crate) fn default_music_enabled() -> bool {
    true
}

pub(crate) fn default_music_volume() -> f32 {
    0.3
}

pub(crate) fn default_music_track() -> String {
    "assets/bgm.ogg".to_string()
}

pub(crate) fn default_show_minimap() -> bool {
    true
}

pub(crate) fn default_show_controls() -> bool {
    true
}

pub(crate) fn default_log_level() -> super::models::LogLevel {
    super::models::LogLevel::Info
}

pub(crate) fn default_key_radar() -> String {
    "r".to_string()
}

pub(crate) fn default_key_history() -> String {
    "p".to_string()
}

pub(crate) fn default_key_reset_view() -> String {
    "f".to_string()
}

pub(crate) fn default_key_cycle_mode() -> String {
    "c".to_string()
}

pub(crate) fn default_key_close() -> String {
    "q".to_string()
}

pub(crate) fn default_key_toggle_music() -> String {
    "m".to_string()
}

pub(crate) fn default_key_toggle_chat() -> String {
    "ctrl+k".to_string()
}
