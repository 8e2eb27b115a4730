use crate::knowledge::KnowledgeBase;

/// One bubble in the chat panel.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub(in crate::app) role: ChatRole,
    pub(in crate::app) body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    Visitor,
    Guide,
}

/// Chat assistant model: transcript, corpus, and in-flight request tracking.
pub struct ChatState {
    pub(in crate::app) open: bool,
    pub(in crate::app) input: String,
    pub(in crate::app) messages: Vec<ChatMessage>,
    pub(in crate::app) waiting: bool,
    /// Incremented per submit; replies carrying an older id are stale and
    /// dropped instead of mutating the transcript.
    pub(in crate::app) request_id: u64,
    pub(in crate::app) knowledge: KnowledgeBase,
    pub(in crate::app) knowledge_loading: bool,
    pub(in crate::app) knowledge_error: Option<String>,
}

impl ChatState {
    pub(in crate::app) fn new() -> Self {
        ChatState {
            open: false,
            input: String::new(),
            messages: Vec::new(),
            waiting: false,
            request_id: 0,
            knowledge: KnowledgeBase::default(),
            knowledge_loading: false,
            knowledge_error: None,
        }
    }

    pub(in crate::app) fn push_visitor(&mut self, body: String) {
        self.messages.push(ChatMessage {
            role: ChatRole::Visitor,
            body,
        });
    }

    pub(in crate::app) fn push_guide(&mut self, body: String) {
        self.messages.push(ChatMessage {
            role: ChatRole::Guide,
            body,
        });
    }
}
