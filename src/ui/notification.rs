use iced::widget::{button, container, row, text};
use iced::{Alignment, Border, Element, Length, Theme};

use crate::state::notification::{Notification, NotificationId, Severity};
use crate::Message;

/// Bottom-right toast for the visible notification
pub fn toast(id: NotificationId, notification: &Notification) -> Element<'_, Message> {
    let severity = notification.severity;

    let card = container(
        row![
            text(&notification.message).size(18),
            button(text("×").size(18))
                .on_press(Message::DismissNotification(id))
                .style(button::text),
        ]
        .spacing(16)
        .align_y(Alignment::Center),
    )
    .padding(16)
    .max_width(480.0)
    .style(move |theme: &Theme| {
        let palette = theme.extended_palette();
        let pair = match severity {
            Severity::Success => palette.success.base,
            Severity::Error => palette.danger.base,
        };
        container::Style {
            background: Some(pair.color.into()),
            text_color: Some(pair.text),
            border: Border {
                radius: 6.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        }
    });

    container(card)
        .padding(24)
        .align_right(Length::Fill)
        .align_bottom(Length::Fill)
        .into()
}
