/// Limits and fixed geometry for the viewer chrome.
pub(crate) const NAV_BAR_HEIGHT: f32 = 56.0;
pub(crate) const HISTORY_LIMIT: usize = 10;
/// A release within this many pixels of the press counts as a click.
pub(crate) const CLICK_DRAG_TOLERANCE: f32 = 6.0;
/// Multiplicative zoom applied per wheel line.
pub(crate) const WHEEL_ZOOM_STEP: f32 = 1.15;
pub(crate) const EXPLORE_TICK_MS: u64 = 16;
pub(crate) const BACKGROUND_TICK_MS: u64 = 250;

pub(crate) const WELCOME_MESSAGE: &str = "Welcome! I am the scroll's resident guide. \
Ask me about the painting's history, the poems it illustrates, or the farming year it depicts.";

/// Narrative section labels keyed off the pan position.
pub(crate) const SEGMENT_EARLY: &str = "孟春 · 于耜";
pub(crate) const SEGMENT_MID: &str = "仲秋 · 剥枣";
pub(crate) const SEGMENT_LATE: &str = "隆冬 · 授衣";
