mod panels;
mod scene;

use super::messages::{Message, ViewId};
use super::state::App;
use iced::alignment::Vertical;
use iced::widget::{Text, button, canvas, column, container, horizontal_space, row, stack, text};
use iced::{Color, Element, Length};

/// Brushed-gold accent shared across the chrome.
pub(super) const ACCENT: Color = Color::from_rgb(0.773, 0.627, 0.349);
pub(super) const PAPER: Color = Color::from_rgb(0.941, 0.902, 0.824);
pub(super) const FAINT: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.45);

/// Text with advanced shaping, required for the CJK strings on the chrome.
pub(super) fn zh<'a>(content: impl text::IntoFragment<'a>) -> Text<'a> {
    text(content).shaping(text::Shaping::Advanced)
}

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match self.view {
            ViewId::Home => self.home_view(),
            ViewId::Explore => self.explore_view(),
            ViewId::Intro => panels::intro_view(),
            ViewId::Method => panels::method_view(),
        };

        column![self.nav_bar(), body].into()
    }

    fn nav_bar(&self) -> Element<'_, Message> {
        let mut tabs = row![].spacing(6).align_y(Vertical::Center);
        for view in ViewId::ALL {
            let label = text(view.label()).size(14).color(if view == self.view {
                ACCENT
            } else {
                FAINT
            });
            tabs = tabs.push(button(label).style(button::text).on_press(Message::Navigate(view)));
        }

        let title = zh("豳风图 · Digital Handscroll").size(16).color(PAPER);

        container(
            row![title, horizontal_space(), tabs]
                .spacing(12)
                .align_y(Vertical::Center),
        )
        .padding([12.0, 16.0])
        .width(Length::Fill)
        .into()
    }

    fn home_view(&self) -> Element<'_, Message> {
        let enter = button(zh("入 卷 探 幽").size(18))
            .padding([14.0, 48.0])
            .on_press(Message::Navigate(ViewId::Explore));

        let hints = text("Shortcuts: [R] radar · [F] reset zoom · [P] history · [Esc] close")
            .size(11)
            .color(FAINT);

        container(
            column![
                zh("豳风图").size(64).color(PAPER),
                zh("数字长卷交互平台").size(18).color(ACCENT),
                zh("“七月流火，九月授衣。”").size(14).color(FAINT),
                enter,
                hints,
            ]
            .spacing(24)
            .align_x(iced::alignment::Horizontal::Center),
        )
        .center(Length::Fill)
        .into()
    }

    fn explore_view(&self) -> Element<'_, Message> {
        let scene = canvas(scene::ScrollScene { app: self })
            .width(Length::Fill)
            .height(Length::Fill);

        let mut layers: Vec<Element<'_, Message>> = vec![scene.into()];

        if self.config.show_controls {
            layers.push(self.control_strip());
        }
        if self.history.visible {
            layers.push(self.history_panel());
        }
        if self.config.show_minimap {
            layers.push(self.minimap_overlay());
        }
        if self.chat.open {
            layers.push(self.chat_panel());
        }
        if self.portal.is_open() {
            layers.push(self.portal_overlay());
        }

        stack(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn minimap_overlay(&self) -> Element<'_, Message> {
        let minimap = canvas(scene::Minimap {
            offset_fraction: self.viewer.controller.offset_fraction(),
            viewport_fraction: self.viewer.controller.viewport_fraction(),
        })
        .width(Length::Fixed(240.0))
        .height(Length::Fixed(40.0));

        container(container(minimap).style(container::rounded_box).padding(2))
            .align_x(iced::alignment::Horizontal::Right)
            .align_y(iced::alignment::Vertical::Bottom)
            .padding(24)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
