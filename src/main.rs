//! Entry point for the handscroll viewer.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments (an optional scroll asset directory).
//! - Load user configuration from `conf/config.toml` plus per-scroll
//!   overrides from the cache.
//! - Load the tiled panorama and the persisted visit history.
//! - Launch the GUI application.

mod app;
mod assistant;
mod cache;
mod config;
mod hotspots;
mod knowledge;
mod music;
mod scroll_loader;
mod viewport;

use crate::app::run_app;
use crate::cache::{load_history, load_scroll_config};
use crate::config::load_config;
use crate::scroll_loader::load_scroll;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

static SIGINT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Drain the SIGINT flag; the reducer polls this on tick for a safe quit.
pub(crate) fn take_sigint_requested() -> bool {
    SIGINT_REQUESTED.swap(false, Ordering::SeqCst)
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let base_config = load_config(Path::new("conf/config.toml"));
    let mut config = base_config.clone();

    let scroll_path = parse_args().unwrap_or_else(|| PathBuf::from(&config.scroll_dir));
    if let Some(mut overrides) = load_scroll_config(&scroll_path) {
        info!("Loaded per-scroll overrides from cache");
        // Always honor the base config's log level, credentials and key
        // bindings so user changes take effect.
        overrides.log_level = base_config.log_level;
        overrides.api_base_url = base_config.api_base_url.clone();
        overrides.api_model = base_config.api_model.clone();
        overrides.api_key = base_config.api_key.clone();
        overrides.hotspot_source_url = base_config.hotspot_source_url.clone();
        overrides.key_radar = base_config.key_radar.clone();
        overrides.key_history = base_config.key_history.clone();
        overrides.key_reset_view = base_config.key_reset_view.clone();
        overrides.key_cycle_mode = base_config.key_cycle_mode.clone();
        overrides.key_close = base_config.key_close.clone();
        overrides.key_toggle_music = base_config.key_toggle_music.clone();
        overrides.key_toggle_chat = base_config.key_toggle_chat.clone();
        config = overrides;
    }
    set_log_level(reload_handle, config.log_level.as_filter_str());

    if let Ok(key) = env::var("GENAI_API_KEY") {
        if !key.trim().is_empty() {
            config.api_key = Some(key);
        }
    }
    if config.api_key.is_none() || config.api_base_url.is_empty() {
        warn!("Generation service not configured; the chat guide will answer with a notice");
    }

    install_signal_handler();

    info!(
        scroll = %scroll_path.display(),
        level = %config.log_level,
        "Starting handscroll viewer"
    );
    let scroll = load_scroll(&scroll_path, config.scroll_width, config.scroll_height);
    let history = load_history(&scroll_path);
    if let Some(history) = &history {
        info!(entries = history.ids.len(), "Resuming visit history");
    }

    run_app(scroll, config, scroll_path, history).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args() -> Option<PathBuf> {
    let path = env::args().nth(1).map(PathBuf::from)?;
    if !path.exists() {
        // A missing directory still opens the viewer with an empty
        // background; the scene degrades rather than refusing to start.
        warn!(path = %path.display(), "Scroll directory not found");
    }
    Some(path)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

fn install_signal_handler() {
    if let Err(err) = ctrlc::set_handler(|| {
        SIGINT_REQUESTED.store(true, Ordering::SeqCst);
    }) {
        warn!("Could not install SIGINT handler: {err}");
    }
}
