use super::Effect;
use super::super::state::{App, WELCOME_MESSAGE};
use crate::knowledge::{KnowledgeBase, build_context};
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_toggle_chat(&mut self, effects: &mut Vec<Effect>) {
        self.chat.open = !self.chat.open;
        if !self.chat.open {
            return;
        }
        // Opening the panel is the explicit retry point for a corpus that
        // failed to load earlier; it is never refetched in the background.
        if !self.chat.knowledge.is_loaded() && !self.chat.knowledge_loading {
            effects.push(Effect::LoadKnowledge);
        }
        if self.chat.messages.is_empty() && self.chat.knowledge.is_loaded() {
            self.chat.push_guide(WELCOME_MESSAGE.to_string());
        }
    }

    pub(super) fn handle_chat_input_changed(&mut self, input: String) {
        self.chat.input = input;
    }

    pub(super) fn handle_chat_submitted(&mut self, effects: &mut Vec<Effect>) {
        let question = self.chat.input.trim().to_string();
        if question.is_empty() || self.chat.waiting {
            return;
        }

        let configured = self
            .assistant
            .as_ref()
            .is_some_and(|client| client.is_configured());
        self.chat.push_visitor(question.clone());
        self.chat.input.clear();
        if !configured {
            self.chat.push_guide(
                "The guide is not configured yet. Set the generation API key and restart."
                    .to_string(),
            );
            return;
        }

        self.chat.request_id = self.chat.request_id.wrapping_add(1);
        self.chat.waiting = true;

        let hits = self.chat.knowledge.search(&question, self.config.chat_top_k);
        let context = build_context(&hits);
        info!(
            question_chars = question.chars().count(),
            retrieved = hits.len(),
            request_id = self.chat.request_id,
            "Chat question submitted"
        );
        effects.push(Effect::GenerateReply {
            request_id: self.chat.request_id,
            question,
            context,
        });
    }

    pub(super) fn handle_chat_replied(&mut self, request_id: u64, result: Result<String, String>) {
        if request_id != self.chat.request_id {
            debug!(
                request_id,
                current = self.chat.request_id,
                "Dropping stale chat reply"
            );
            return;
        }
        self.chat.waiting = false;
        match result {
            Ok(answer) => self.chat.push_guide(answer),
            Err(notice) => self.chat.push_guide(notice),
        }
    }

    pub(super) fn handle_knowledge_loaded(&mut self, result: Result<KnowledgeBase, String>) {
        self.chat.knowledge_loading = false;
        match result {
            Ok(knowledge) => {
                self.chat.knowledge = knowledge;
                self.chat.knowledge_error = None;
                if self.chat.messages.is_empty() {
                    self.chat.push_guide(WELCOME_MESSAGE.to_string());
                }
            }
            Err(err) => {
                // Corpus stays empty; retrieval degrades to "no context".
                warn!("Knowledge corpus unavailable: {err}");
                self.chat.knowledge_error = Some(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::state::App;
    use crate::config::AppConfig;
    use crate::knowledge::{KnowledgeBase, KnowledgeEntry};
    use crate::scroll_loader::LoadedScroll;
    use std::path::PathBuf;

    fn build_test_app() -> App {
        let mut config = AppConfig::default();
        config.music_enabled = false;
        config.hotspot_source_url = None;
        let (app, _task) = App::bootstrap(
            LoadedScroll::empty(12_000.0, 1_000.0),
            config,
            PathBuf::from("/tmp/handscroll-chat-test"),
            None,
        );
        app
    }

    fn entry(title: &str) -> KnowledgeEntry {
        KnowledgeEntry {
            title: title.to_string(),
            content: "内容".to_string(),
            category: String::new(),
            keywords: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn unconfigured_guide_answers_with_a_notice() {
        let mut app = build_test_app();
        let mut effects = Vec::new();

        app.handle_chat_input_changed("何谓七月流火?".to_string());
        app.handle_chat_submitted(&mut effects);

        assert!(effects.is_empty(), "no generation call without credentials");
        assert!(!app.chat.waiting);
        let last = app.chat.messages.last().expect("notice appended");
        assert!(last.body.contains("not configured"));
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut app = build_test_app();
        let mut effects = Vec::new();
        app.handle_chat_input_changed("   ".to_string());
        app.handle_chat_submitted(&mut effects);
        assert!(app.chat.messages.is_empty());
        assert!(effects.is_empty());
    }

    #[test]
    fn stale_replies_are_dropped() {
        let mut app = build_test_app();
        app.chat.request_id = 2;
        app.chat.waiting = true;

        app.handle_chat_replied(1, Ok("stale".to_string()));
        assert!(app.chat.messages.is_empty());
        assert!(app.chat.waiting, "a stale reply must not settle the request");

        app.handle_chat_replied(2, Ok("current".to_string()));
        assert!(!app.chat.waiting);
        assert_eq!(app.chat.messages.last().map(|m| m.body.as_str()), Some("current"));
    }

    #[test]
    fn knowledge_load_pushes_the_welcome_once() {
        let mut app = build_test_app();
        app.handle_knowledge_loaded(Ok(KnowledgeBase::from_entries(vec![entry("七月")])));
        assert_eq!(app.chat.messages.len(), 1);

        // A reload must not repeat the greeting.
        app.handle_knowledge_loaded(Ok(KnowledgeBase::from_entries(vec![entry("东山")])));
        assert_eq!(app.chat.messages.len(), 1);
    }

    #[test]
    fn failed_corpus_load_degrades_to_no_context() {
        let mut app = build_test_app();
        app.handle_knowledge_loaded(Err("boom".to_string()));
        assert_eq!(app.chat.knowledge_error.as_deref(), Some("boom"));
        assert!(!app.chat.knowledge.is_loaded());
        assert!(app.chat.knowledge.search("七月", 3).is_empty());
    }

    #[test]
    fn reopening_the_chat_retries_a_failed_corpus_load() {
        let mut app = build_test_app();
        app.chat.knowledge_loading = false;
        app.handle_knowledge_loaded(Err("offline".to_string()));

        let mut effects = Vec::new();
        app.handle_toggle_chat(&mut effects);
        assert!(app.chat.open);
        assert!(
            matches!(effects.first(), Some(super::Effect::LoadKnowledge)),
            "opening the panel is the explicit retry point"
        );
    }
}
