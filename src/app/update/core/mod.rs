mod reducer;
mod runtime;
mod shortcuts;

use super::super::messages::{Message, ViewId};
use super::super::state::{App, BACKGROUND_TICK_MS, EXPLORE_TICK_MS};
use iced::event;
use iced::time;
use iced::{Subscription, Task};
use std::time::Duration;

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        // The explore scene animates every frame; elsewhere a slow tick is
        // enough for radar expiry and signal polling.
        let tick_ms = if app.view == ViewId::Explore {
            EXPLORE_TICK_MS
        } else {
            BACKGROUND_TICK_MS
        };
        Subscription::batch(vec![
            event::listen_with(runtime::runtime_event_to_message),
            time::every(Duration::from_millis(tick_ms)).map(Message::Tick),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
