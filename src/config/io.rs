use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load configuration from `path`. A missing file or a parse error falls
/// back to defaults; the viewer must always be able to launch.
pub fn load_config(path: &Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(data) => match parse_config(&data) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), "Invalid configuration, using defaults: {err:#}");
                AppConfig::default()
            }
        },
        Err(_) => {
            info!(path = %path.display(), "No configuration file, using defaults");
            AppConfig::default()
        }
    }
}

pub fn parse_config(data: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(data).context("Parsing configuration TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("Serializing configuration TOML")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("").unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.window_width, defaults.window_width);
        assert_eq!(config.chat_top_k, defaults.chat_top_k);
        assert_eq!(config.key_radar, defaults.key_radar);
    }

    #[test]
    fn partial_tables_keep_unrelated_defaults() {
        let config = parse_config(
            r#"
            [viewer]
            idle_delay_secs = 4.0
            auto_scroll_speed = 3.0

            [music]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.idle_delay_secs, 4.0);
        assert_eq!(config.auto_scroll_speed, 3.0);
        assert!(!config.music_enabled);
        assert_eq!(config.chat_top_k, AppConfig::default().chat_top_k);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.idle_delay_secs = 6.5;
        config.hotspot_source_url = Some("https://example.com/hotspots".to_string());
        let text = serialize_config(&config).unwrap();
        let reparsed = parse_config(&text).unwrap();
        assert_eq!(reparsed.idle_delay_secs, 6.5);
        assert_eq!(
            reparsed.hotspot_source_url.as_deref(),
            Some("https://example.com/hotspots")
        );
    }
}
