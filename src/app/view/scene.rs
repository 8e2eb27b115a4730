use super::super::messages::Message;
use super::super::state::App;
use super::{ACCENT, FAINT, PAPER};
use crate::hotspots::{Hotspot, HotspotLevel};
use iced::mouse;
use iced::widget::canvas;
use iced::widget::canvas::event::Status;
use iced::widget::text::Shaping;
use iced::{Color, Point, Rectangle, Size, Theme, Vector};
use std::time::Instant;

const BACKDROP: Color = Color::from_rgb(0.03, 0.03, 0.03);
const DASH: [f32; 2] = [3.0, 3.0];

/// The pannable scroll scene. All interaction is forwarded as messages; the
/// reducer owns every piece of camera state.
pub(super) struct ScrollScene<'a> {
    pub(super) app: &'a App,
}

#[derive(Default)]
pub(super) struct SceneInteraction {
    dragging: bool,
}

impl canvas::Program<Message> for ScrollScene<'_> {
    type State = SceneInteraction;

    fn update(
        &self,
        state: &mut SceneInteraction,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (Status, Option<Message>) {
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    state.dragging = true;
                    (
                        Status::Captured,
                        Some(Message::SceneDragStarted {
                            position,
                            bounds: bounds.size(),
                        }),
                    )
                } else {
                    (Status::Ignored, None)
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                // Window coordinates; keep tracking even once the cursor
                // leaves the canvas mid-drag.
                let local = Point::new(position.x - bounds.x, position.y - bounds.y);
                if state.dragging {
                    (
                        Status::Captured,
                        Some(Message::SceneDragMoved { position: local }),
                    )
                } else if cursor.is_over(bounds) {
                    (
                        Status::Ignored,
                        Some(Message::SceneHovered {
                            bounds: bounds.size(),
                        }),
                    )
                } else {
                    (Status::Ignored, None)
                }
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.dragging {
                    state.dragging = false;
                    let local = cursor
                        .position()
                        .map(|p| Point::new(p.x - bounds.x, p.y - bounds.y))
                        .unwrap_or(Point::new(f32::MIN, f32::MIN));
                    (
                        Status::Captured,
                        Some(Message::SceneDragEnded { position: local }),
                    )
                } else {
                    (Status::Ignored, None)
                }
            }
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if let Some(position) = cursor.position_in(bounds) {
                    let lines = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y,
                        mouse::ScrollDelta::Pixels { y, .. } => y / 60.0,
                    };
                    (
                        Status::Captured,
                        Some(Message::SceneZoomed {
                            delta: lines,
                            position,
                        }),
                    )
                } else {
                    (Status::Ignored, None)
                }
            }
            _ => (Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &SceneInteraction,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKDROP);

        let viewer = &self.app.viewer;
        let transform = viewer.controller.transform();
        let scale = viewer.controller.draw_scale();
        let reveal = viewer.radar_active(Instant::now());
        let tier = self.app.zoom_tier();
        let (content_width, content_height) = viewer.controller.content();

        frame.with_save(|frame| {
            frame.translate(Vector::new(transform.x, transform.y));
            frame.scale(scale);

            for tile in &viewer.tiles {
                frame.draw_image(
                    Rectangle::new(
                        Point::new(tile.offset_x, 0.0),
                        Size::new(tile.width, tile.height),
                    ),
                    canvas::Image::new(tile.handle.clone()).opacity(0.92),
                );
            }

            for hotspot in viewer.visible_hotspots(tier, reveal) {
                draw_hotspot(frame, hotspot, content_width, content_height, scale, reveal);
            }
        });

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &SceneInteraction,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

fn draw_hotspot(
    frame: &mut canvas::Frame,
    hotspot: &Hotspot,
    content_width: f32,
    content_height: f32,
    scale: f32,
    reveal: bool,
) {
    let origin = Point::new(
        hotspot.x / 100.0 * content_width,
        hotspot.y / 100.0 * content_height,
    );
    let size = Size::new(hotspot.width, hotspot.height);

    let (fill_alpha, stroke_alpha, stroke_width) = if reveal {
        (0.12, 0.7, 1.5)
    } else {
        (0.02, 0.2, 0.5)
    };
    frame.fill_rectangle(
        origin,
        size,
        Color {
            a: fill_alpha,
            ..ACCENT
        },
    );
    let outline = canvas::Path::rectangle(origin, size);
    let mut stroke = canvas::Stroke::default()
        .with_color(Color {
            a: stroke_alpha,
            ..ACCENT
        })
        .with_width(stroke_width / scale.max(0.01));
    if !reveal {
        stroke = canvas::Stroke {
            line_dash: canvas::LineDash {
                segments: &DASH,
                offset: 0,
            },
            ..stroke
        };
    }
    frame.stroke(&outline, stroke);

    let label_size = match hotspot.level {
        HotspotLevel::Chapter => 96.0,
        HotspotLevel::Scene => 72.0,
        HotspotLevel::Detail => 56.0,
    };
    frame.fill_text(canvas::Text {
        content: hotspot.category.clone(),
        position: Point::new(origin.x, origin.y + size.height + 12.0),
        color: Color { a: 0.8, ..ACCENT },
        size: iced::Pixels(36.0),
        shaping: Shaping::Advanced,
        ..canvas::Text::default()
    });
    frame.fill_text(canvas::Text {
        content: hotspot.label.clone(),
        position: Point::new(origin.x, origin.y + size.height + 56.0),
        color: PAPER,
        size: iced::Pixels(label_size),
        shaping: Shaping::Advanced,
        ..canvas::Text::default()
    });
}

/// Minimap strip: the viewport extent over the full panorama; clicking
/// recenters the camera on the clicked fraction.
pub(super) struct Minimap {
    pub(super) offset_fraction: f32,
    pub(super) viewport_fraction: f32,
}

impl canvas::Program<Message> for Minimap {
    type State = ();

    fn update(
        &self,
        _state: &mut (),
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (Status, Option<Message>) {
        if let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(position) = cursor.position_in(bounds) {
                let fraction = (position.x / bounds.width.max(1.0)).clamp(0.0, 1.0);
                return (Status::Captured, Some(Message::MinimapClicked { fraction }));
            }
        }
        (Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &(),
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgba(1.0, 1.0, 1.0, 0.05),
        );

        let width = bounds.width * self.viewport_fraction.clamp(0.02, 1.0);
        let left = bounds.width * self.offset_fraction.clamp(0.0, 1.0);
        frame.fill_rectangle(
            Point::new(left.min(bounds.width - width), 0.0),
            Size::new(width, bounds.height),
            Color { a: 0.25, ..ACCENT },
        );

        for (label, x) in [("初春", 6.0), ("隆冬", bounds.width - 34.0)] {
            frame.fill_text(canvas::Text {
                content: label.to_string(),
                position: Point::new(x, bounds.height / 2.0 - 7.0),
                color: FAINT,
                size: iced::Pixels(11.0),
                shaping: Shaping::Advanced,
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &(),
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}
