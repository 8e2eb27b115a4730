use super::super::messages::{Message, PortalMode};
use super::super::state::{App, ChatRole};
use super::{ACCENT, FAINT, PAPER, zh};
use crate::hotspots::{Hotspot, Season};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Column, button, column, container, horizontal_space, row, scrollable, text, text_input,
};
use iced::{Element, Length, Padding};

fn season_label(season: Season) -> &'static str {
    match season {
        Season::Spring => "春",
        Season::Summer => "夏",
        Season::Autumn => "秋",
        Season::Winter => "冬",
    }
}

impl App {
    pub(super) fn control_strip(&self) -> Element<'_, Message> {
        let segment = column![
            zh("当前叙事段落").size(9).color(FAINT),
            zh(self.viewer.narrative_segment()).size(18).color(PAPER),
        ]
        .spacing(2);

        let tool = |label: &'static str, message: Message, active: bool| {
            button(zh(label).size(12).color(if active { ACCENT } else { FAINT }))
                .style(button::text)
                .on_press(message)
        };

        let mut strip = row![
            segment,
            tool(
                "探测 (R)",
                Message::RadarActivated,
                self.viewer.radar_until.is_some()
            ),
            tool("足迹 (P)", Message::ToggleHistory, self.history.visible),
            tool(
                if self.music.is_some() { "乐 · 停" } else { "乐 · 播" },
                Message::ToggleMusic,
                self.music.is_some()
            ),
            tool("导览 (Ctrl+K)", Message::ToggleChat, self.chat.open),
        ]
        .spacing(18)
        .align_y(Vertical::Center);

        if self.viewer.controller.is_auto_scrolling() {
            strip = strip.push(zh("画卷缓行中…").size(10).color(ACCENT));
        }
        if self.viewer.hotspots_loading {
            strip = strip.push(zh("载入点位…").size(10).color(FAINT));
        } else if self.viewer.hotspot_error.is_some() {
            strip = strip.push(zh("点位库离线 · 使用内置数据").size(10).color(FAINT));
        }
        if let Some(err) = &self.music_error {
            strip = strip.push(text(err.as_str()).size(10).color(FAINT));
        }

        container(
            container(strip)
                .style(container::rounded_box)
                .padding([10.0, 16.0]),
        )
        .align_x(Horizontal::Left)
        .align_y(Vertical::Bottom)
        .padding(24)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    pub(super) fn history_panel(&self) -> Element<'_, Message> {
        let mut items = Column::new().spacing(6);
        if self.history.ids.is_empty() {
            items = items.push(zh("尚无足迹").size(11).color(FAINT));
        } else {
            for id in &self.history.ids {
                let label = self
                    .viewer
                    .hotspot_by_id(id)
                    .map(|h| h.label.as_str())
                    .unwrap_or(id.as_str());
                items = items.push(
                    button(zh(format!("· {label}")).size(12).color(PAPER))
                        .style(button::text)
                        .on_press(Message::HistoryEntrySelected(id.clone())),
                );
            }
        }

        let panel = column![
            zh("最近浏览").size(11).color(ACCENT),
            scrollable(items).height(Length::Fixed(220.0)),
        ]
        .spacing(8)
        .width(Length::Fixed(190.0));

        container(container(panel).style(container::rounded_box).padding(12))
            .align_x(Horizontal::Left)
            .align_y(Vertical::Bottom)
            .padding(Padding {
                top: 0.0,
                right: 0.0,
                bottom: 110.0,
                left: 24.0,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub(super) fn chat_panel(&self) -> Element<'_, Message> {
        let header = row![
            column![
                zh("智能导览").size(14).color(PAPER),
                text("Scroll Guide").size(10).color(FAINT),
            ]
            .spacing(2),
            horizontal_space(),
            button(text("×").size(16))
                .style(button::text)
                .on_press(Message::ToggleChat),
        ]
        .align_y(Vertical::Center);

        let mut transcript = Column::new().spacing(10).width(Length::Fill);
        for message in &self.chat.messages {
            let bubble = container(zh(message.body.as_str()).size(12).color(PAPER))
                .style(container::rounded_box)
                .padding(8)
                .max_width(300);
            let line = match message.role {
                ChatRole::Visitor => row![horizontal_space(), bubble],
                ChatRole::Guide => row![bubble, horizontal_space()],
            };
            transcript = transcript.push(line);
        }
        if self.chat.waiting {
            transcript = transcript.push(zh("导览员思索中…").size(11).color(FAINT));
        }

        let status: Element<'_, Message> = if self.chat.knowledge_loading {
            zh("正在装载知识库…").size(10).color(FAINT).into()
        } else if let Some(err) = &self.chat.knowledge_error {
            zh(format!("知识库不可用：{err}")).size(10).color(FAINT).into()
        } else {
            zh(format!("知识库 {} 条", self.chat.knowledge.len()))
                .size(10)
                .color(FAINT)
                .into()
        };

        let input = row![
            text_input("向导览员提问…", &self.chat.input)
                .on_input(Message::ChatInputChanged)
                .on_submit(Message::ChatSubmitted)
                .padding(8)
                .size(13),
            button(zh("送出").size(12)).on_press(Message::ChatSubmitted),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        let panel = column![
            header,
            scrollable(transcript).height(Length::Fixed(360.0)),
            status,
            input,
        ]
        .spacing(10)
        .width(Length::Fixed(340.0));

        container(container(panel).style(container::rounded_box).padding(14))
            .align_x(Horizontal::Right)
            .align_y(Vertical::Bottom)
            .padding(Padding {
                top: 0.0,
                right: 24.0,
                bottom: 90.0,
                left: 0.0,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub(super) fn portal_overlay(&self) -> Element<'_, Message> {
        let Some(hotspot) = self
            .portal
            .open_id
            .as_deref()
            .and_then(|id| self.viewer.hotspot_by_id(id))
        else {
            return column![].into();
        };

        let header = row![
            column![
                zh(hotspot.label.as_str()).size(26).color(PAPER),
                zh(format!(
                    "{} · {}",
                    hotspot.category,
                    season_label(hotspot.season)
                ))
                .size(11)
                .color(ACCENT),
            ]
            .spacing(2),
            horizontal_space(),
            button(zh("× 退出 (Q)").size(12))
                .style(button::text)
                .on_press(Message::PortalClosed),
        ]
        .align_y(Vertical::Center);

        let mut modes = row![].spacing(6);
        for mode in PortalMode::ALL {
            let label = text(mode.label()).size(12).color(if mode == self.portal.mode {
                ACCENT
            } else {
                FAINT
            });
            modes = modes.push(
                button(label)
                    .style(button::text)
                    .on_press(Message::PortalModeChanged(mode)),
            );
        }

        // One body per mode, matched exhaustively.
        let body: Element<'_, Message> = match self.portal.mode {
            PortalMode::Immersive => self.portal_immersive_body(hotspot),
            PortalMode::Interpret => self.portal_interpret_body(hotspot),
            PortalMode::Compare => self.portal_compare_body(hotspot),
        };

        let mut related = row![].spacing(8);
        for id in &hotspot.related_hotspot_ids {
            if let Some(target) = self.viewer.hotspot_by_id(id) {
                related = related.push(
                    button(zh(format!("→ {}", target.label)).size(11).color(ACCENT))
                        .style(button::text)
                        .on_press(Message::RelatedHotspotSelected(id.clone())),
                );
            }
        }

        let card = column![header, modes, body, related]
            .spacing(14)
            .width(Length::Fixed(460.0));

        container(container(card).style(container::rounded_box).padding(20))
            .center(Length::Fill)
            .into()
    }

    fn portal_immersive_body<'a>(&self, hotspot: &'a Hotspot) -> Element<'a, Message> {
        let video: Element<'a, Message> = if hotspot.video_url.is_empty() {
            zh("此点位尚无演绎影像。").size(12).color(FAINT).into()
        } else {
            zh(format!("演绎影像：{}", hotspot.video_url))
                .size(12)
                .color(PAPER)
                .into()
        };

        let mut annotations = Column::new().spacing(4);
        for annotation in &hotspot.annotations {
            annotations = annotations.push(
                zh(format!("{:>5.1}s  {}", annotation.time, annotation.text))
                    .size(11)
                    .color(FAINT),
            );
        }

        column![video, scrollable(annotations).height(Length::Fixed(140.0))]
            .spacing(10)
            .into()
    }

    fn portal_interpret_body<'a>(&self, hotspot: &'a Hotspot) -> Element<'a, Message> {
        let mut body = column![zh(hotspot.description.as_str()).size(13).color(PAPER)].spacing(10);
        if !hotspot.prompt.is_empty() {
            body = body.push(
                zh(format!("创作提示：{}", hotspot.prompt))
                    .size(11)
                    .color(FAINT),
            );
        }
        scrollable(body).height(Length::Fixed(200.0)).into()
    }

    fn portal_compare_body<'a>(&self, hotspot: &'a Hotspot) -> Element<'a, Message> {
        let original: Element<'a, Message> = match &hotspot.original_image {
            Some(image) => zh(format!("原画对照：{image}")).size(12).color(PAPER).into(),
            None => zh("此点位暂无原画对照。").size(12).color(FAINT).into(),
        };

        let mut versions = Column::new().spacing(6);
        if hotspot.versions.is_empty() {
            versions = versions.push(zh("暂无其他演绎版本。").size(11).color(FAINT));
        }
        for (idx, version) in hotspot.versions.iter().enumerate() {
            let selected = idx == self.portal.version;
            let label = zh(format!("{} · {}", version.tag, version.style_desc))
                .size(11)
                .color(if selected { ACCENT } else { FAINT });
            versions = versions.push(
                button(label)
                    .style(button::text)
                    .on_press(Message::PortalVersionSelected(idx)),
            );
        }

        column![original, versions].spacing(10).into()
    }
}

pub(super) fn intro_view<'a>() -> Element<'a, Message> {
    static_page(
        "背景 · The Scroll",
        &[
            "《豳风图》取材于《诗经·国风·豳风》，以长卷形式描绘西周豳地农人的一年：\
春耕采桑、夏锄消暑、秋获染丝、冬猎凿冰。",
            "本平台将数字化的长卷铺展为可拖拽的横向画布。画卷上的点位连接七篇诗章——\
七月、鸱鸮、东山、破斧、伐柯、九罭、狼跋——每处均可展开演绎与注解。",
            "The handscroll unrolls horizontally; drag to travel through the farming \
year, and let the view rest to watch it drift on its own.",
        ],
    )
}

pub(super) fn method_view<'a>() -> Element<'a, Message> {
    static_page(
        "方法 · The Method",
        &[
            "每个点位的演绎影像由生成模型基于原画局部与对应诗句制作，再经人工筛选定稿；\
不同版本保留了写意、墨韵等多种风格。",
            "导览问答采用检索增强：先以关键词匹配从本地知识库取出最相关的条目，\
再连同问题一并交给文本生成服务作答，因此回答可溯源、可复现。",
            "Retrieval is plain weighted substring matching over a small static corpus; \
no embeddings are involved, so identical questions always retrieve identical notes.",
        ],
    )
}

fn static_page<'a>(title: &'a str, paragraphs: &[&'a str]) -> Element<'a, Message> {
    let mut body = column![zh(title).size(24).color(PAPER)].spacing(18);
    for paragraph in paragraphs {
        body = body.push(zh(*paragraph).size(14).color(FAINT));
    }
    container(scrollable(body.max_width(720)).height(Length::Fill))
        .center_x(Length::Fill)
        .padding(32)
        .into()
}
