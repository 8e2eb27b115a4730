use super::super::super::messages::{Message, ViewId};
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

/// A parsed `modifier+modifier+key` binding from the config file.
struct Shortcut {
    ctrl: bool,
    alt: bool,
    logo: bool,
    shift: bool,
    key: String,
}

impl Shortcut {
    fn parse(raw: &str, fallback: &str) -> Shortcut {
        let normalized = raw.trim().to_ascii_lowercase();
        let source = if normalized.is_empty() { fallback } else { &normalized };

        let mut shortcut = Shortcut {
            ctrl: false,
            alt: false,
            logo: false,
            shift: false,
            key: fallback.rsplit('+').next().unwrap_or(fallback).to_string(),
        };
        for token in source.split('+').map(str::trim).filter(|s| !s.is_empty()) {
            match token {
                "ctrl" | "control" => shortcut.ctrl = true,
                "alt" => shortcut.alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => shortcut.logo = true,
                "shift" => shortcut.shift = true,
                other => shortcut.key = other.replace("spacebar", "space"),
            }
        }
        shortcut
    }

    fn matches(&self, pressed: &str, modifiers: Modifiers) -> bool {
        pressed == self.key
            && modifiers.control() == self.ctrl
            && modifiers.alt() == self.alt
            && modifiers.logo() == self.logo
            && modifiers.shift() == self.shift
    }
}

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Escape) => {
                // Escape always closes the portal, independent of bindings.
                return self.portal.is_open().then_some(Message::PortalClosed);
            }
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        let binding = |raw: &str, fallback: &str, message: Message| {
            Shortcut::parse(raw, fallback)
                .matches(&pressed, modifiers)
                .then_some(message)
        };

        // Chat and music toggles work everywhere; scene shortcuts only make
        // sense while exploring.
        if let Some(message) = binding(&self.config.key_toggle_chat, "ctrl+k", Message::ToggleChat)
            .or_else(|| binding(&self.config.key_toggle_music, "m", Message::ToggleMusic))
        {
            return Some(message);
        }
        if self.view != ViewId::Explore {
            return None;
        }

        binding(&self.config.key_radar, "r", Message::RadarActivated)
            .or_else(|| binding(&self.config.key_history, "p", Message::ToggleHistory))
            .or_else(|| binding(&self.config.key_reset_view, "f", Message::ResetView))
            .or_else(|| binding(&self.config.key_cycle_mode, "c", Message::CyclePortalMode))
            .or_else(|| binding(&self.config.key_close, "q", Message::PortalClosed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_key() {
        let shortcut = Shortcut::parse("r", "x");
        assert!(shortcut.matches("r", Modifiers::empty()));
        assert!(!shortcut.matches("r", Modifiers::CTRL));
    }

    #[test]
    fn parses_modifier_chord() {
        let shortcut = Shortcut::parse("ctrl+k", "x");
        assert!(shortcut.matches("k", Modifiers::CTRL));
        assert!(!shortcut.matches("k", Modifiers::empty()));
        assert!(!shortcut.matches("k", Modifiers::CTRL | Modifiers::SHIFT));
    }

    #[test]
    fn blank_binding_uses_fallback() {
        let shortcut = Shortcut::parse("   ", "ctrl+k");
        assert!(shortcut.matches("k", Modifiers::CTRL));
    }

    #[test]
    fn spacebar_alias_normalizes() {
        let shortcut = Shortcut::parse("SpaceBar", "x");
        assert!(shortcut.matches("space", Modifiers::empty()));
    }
}
