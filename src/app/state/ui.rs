use super::HISTORY_LIMIT;
use super::super::messages::PortalMode;

/// Most-recent-first trail of visited hotspots.
pub struct HistoryState {
    pub(in crate::app) visible: bool,
    pub(in crate::app) ids: Vec<String>,
}

impl HistoryState {
    pub(in crate::app) fn new(ids: Vec<String>) -> Self {
        HistoryState {
            visible: false,
            ids,
        }
    }

    /// Move `id` to the front, deduplicated, capped at the history limit.
    pub(in crate::app) fn record(&mut self, id: &str) {
        self.ids.retain(|existing| existing != id);
        self.ids.insert(0, id.to_string());
        self.ids.truncate(HISTORY_LIMIT);
    }
}

/// The hotspot detail portal, when open.
pub struct PortalState {
    pub(in crate::app) open_id: Option<String>,
    pub(in crate::app) mode: PortalMode,
    pub(in crate::app) version: usize,
}

impl PortalState {
    pub(in crate::app) fn new() -> Self {
        PortalState {
            open_id: None,
            mode: PortalMode::Interpret,
            version: 0,
        }
    }

    pub(in crate::app) fn open(&mut self, id: &str) {
        self.open_id = Some(id.to_string());
        self.version = 0;
    }

    pub(in crate::app) fn close(&mut self) {
        self.open_id = None;
    }

    pub(in crate::app) fn is_open(&self) -> bool {
        self.open_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_dedups_and_keeps_most_recent_first() {
        let mut history = HistoryState::new(vec![]);
        history.record("a");
        history.record("b");
        history.record("a");
        assert_eq!(history.ids, vec!["a", "b"]);
    }

    #[test]
    fn history_is_capped() {
        let mut history = HistoryState::new(vec![]);
        for i in 0..25 {
            history.record(&format!("h-{i}"));
        }
        assert_eq!(history.ids.len(), HISTORY_LIMIT);
        assert_eq!(history.ids.first().map(String::as_str), Some("h-24"));
    }
}
