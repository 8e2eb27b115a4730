use super::super::super::messages::Message;
use super::super::Effect;
use super::super::super::state::App;
use crate::assistant::friendly_error;
use crate::hotspots;
use crate::knowledge::KnowledgeBase;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use std::path::Path;
use tracing::{info, warn};

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveHistory => {
                self.persist_history();
                Task::none()
            }
            Effect::SaveConfig => {
                self.persist_config();
                Task::none()
            }
            Effect::LoadKnowledge => {
                self.chat.knowledge_loading = true;
                self.chat.knowledge_error = None;
                let path = self.config.knowledge_path.clone();
                Task::perform(
                    async move {
                        match KnowledgeBase::load(Path::new(&path)) {
                            Ok(knowledge) => Message::KnowledgeLoaded {
                                result: Ok(knowledge),
                            },
                            Err(err) => Message::KnowledgeLoaded {
                                result: Err(format!("{err:#}")),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::FetchHotspots => {
                let Some(url) = self.config.hotspot_source_url.clone() else {
                    return Task::none();
                };
                let Some(http) = self.http.clone() else {
                    warn!("No HTTP client available; keeping the bundled hotspot catalogue");
                    return Task::none();
                };
                self.viewer.hotspots_loading = true;
                self.viewer.hotspot_error = None;
                info!(%url, "Dispatching hotspot catalogue fetch");
                Task::perform(
                    async move {
                        match hotspots::fetch_hotspots(&http, &url) {
                            Ok(list) => Message::HotspotsLoaded {
                                hotspots: list,
                                error: None,
                            },
                            Err(err) => Message::HotspotsLoaded {
                                // Any store failure falls back to the bundled
                                // catalogue so the scene never comes up empty.
                                hotspots: hotspots::builtin_hotspots(),
                                error: Some(format!("{err:#}")),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::GenerateReply {
                request_id,
                question,
                context,
            } => {
                let client = self.assistant.clone();
                let temperature = self.config.chat_temperature;
                Task::perform(
                    async move {
                        let result = match client {
                            Some(client) => client
                                .generate(&question, &context, temperature)
                                .map_err(|err| {
                                    warn!("Generation call failed: {err:#}");
                                    friendly_error(&err)
                                }),
                            None => Err(
                                "The guide is not configured yet. Set the generation API key and restart."
                                    .to_string(),
                            ),
                        };
                        Message::ChatReplied { request_id, result }
                    },
                    |message| message,
                )
            }
            Effect::QuitSafely => {
                self.persist_config();
                self.persist_history();
                self.stop_music();
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Window(window::Event::Moved(position)) => Some(Message::WindowMoved {
            x: position.x,
            y: position.y,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
