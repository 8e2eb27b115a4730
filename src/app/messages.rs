use crate::hotspots::Hotspot;
use crate::knowledge::KnowledgeBase;
use iced::keyboard::{Key, Modifiers};
use iced::{Point, Size};
use std::time::Instant;

/// Messages emitted by the UI and the runtime.
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(ViewId),
    SceneDragStarted {
        position: Point,
        bounds: Size,
    },
    SceneDragMoved {
        position: Point,
    },
    SceneDragEnded {
        position: Point,
    },
    SceneHovered {
        bounds: Size,
    },
    SceneZoomed {
        delta: f32,
        position: Point,
    },
    MinimapClicked {
        fraction: f32,
    },
    HotspotSelected(String),
    PortalClosed,
    PortalModeChanged(PortalMode),
    CyclePortalMode,
    PortalVersionSelected(usize),
    RelatedHotspotSelected(String),
    RadarActivated,
    ToggleHistory,
    HistoryEntrySelected(String),
    ResetView,
    ToggleChat,
    ChatInputChanged(String),
    ChatSubmitted,
    ChatReplied {
        request_id: u64,
        result: Result<String, String>,
    },
    KnowledgeLoaded {
        result: Result<KnowledgeBase, String>,
    },
    HotspotsLoaded {
        hotspots: Vec<Hotspot>,
        error: Option<String>,
    },
    ToggleMusic,
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    WindowMoved {
        x: f32,
        y: f32,
    },
    Tick(Instant),
    SafeQuit,
}

/// Top-level views reachable from the navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Home,
    Explore,
    Intro,
    Method,
}

impl ViewId {
    pub const ALL: [ViewId; 4] = [ViewId::Home, ViewId::Explore, ViewId::Intro, ViewId::Method];

    pub fn label(self) -> &'static str {
        match self {
            ViewId::Home => "Home",
            ViewId::Explore => "Explore",
            ViewId::Intro => "Background",
            ViewId::Method => "Method",
        }
    }
}

/// Presentation modes of the hotspot portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalMode {
    Immersive,
    Interpret,
    Compare,
}

impl PortalMode {
    pub const ALL: [PortalMode; 3] = [
        PortalMode::Immersive,
        PortalMode::Interpret,
        PortalMode::Compare,
    ];

    pub fn next(self) -> PortalMode {
        match self {
            PortalMode::Immersive => PortalMode::Interpret,
            PortalMode::Interpret => PortalMode::Compare,
            PortalMode::Compare => PortalMode::Immersive,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PortalMode::Immersive => "Immersive",
            PortalMode::Interpret => "Interpret",
            PortalMode::Compare => "Compare",
        }
    }
}
