use iced::widget::{center, container, mouse_area, opaque};
use iced::{Color, Element, Theme};

use crate::Message;

/// Overlay `content` on a dimmed backdrop.
/// Clicking the backdrop emits `on_blur`.
pub fn modal<'a>(content: Element<'a, Message>, on_blur: Message) -> Element<'a, Message> {
    opaque(
        mouse_area(center(opaque(content)).style(|_theme: &Theme| container::Style {
            background: Some(
                Color {
                    a: 0.6,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }))
        .on_press(on_blur),
    )
}
