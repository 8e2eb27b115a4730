mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::cache::VisitHistory;
use crate::config::AppConfig;
use crate::scroll_loader::LoadedScroll;
use iced::{Point, Size, Theme, window};
use std::path::PathBuf;

/// Helper to launch the app with the loaded panorama.
pub fn run_app(
    scroll: LoadedScroll,
    config: AppConfig,
    scroll_path: PathBuf,
    history: Option<VisitHistory>,
) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        position: match (config.window_pos_x, config.window_pos_y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                window::Position::Specific(Point::new(x, y))
            }
            _ => window::Position::Default,
        },
        ..window::Settings::default()
    };

    iced::application("Handscroll Viewer", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|_app: &App| Theme::Dark)
        .run_with(move || App::bootstrap(scroll, config, scroll_path, history))
}
