use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::config::Route;
use crate::Message;

/// Navigation entries shown on every page: (title, description, target)
const NAVIGATION: [(&str, &str, Route); 2] = [
    ("Employees", "View Employees", Route::Employees),
    ("Contributions", "View Contribution Dashboard", Route::Contributions),
];

/// Title block and navigation cards
pub fn header(active: Route) -> Element<'static, Message> {
    let cards = NAVIGATION.iter().fold(
        row![].spacing(32).align_y(Alignment::Center),
        |cards, &(title, description, route)| {
            let style = if route == active {
                button::primary
            } else {
                button::secondary
            };
            cards.push(
                button(
                    column![text(title).size(24), text(description).size(14)]
                        .spacing(6)
                        .align_x(Alignment::Center),
                )
                .on_press(Message::Navigate(route))
                .padding(24)
                .width(240.0)
                .style(style),
            )
        },
    );

    column![
        button(text("Compliance Dashboard").size(48))
            .on_press(Message::Navigate(Route::Home))
            .style(button::text),
        text("Contribution review").size(20),
        cards,
    ]
    .spacing(16)
    .width(Length::Fill)
    .align_x(Alignment::Center)
    .into()
}

/// Landing content
pub fn home() -> Element<'static, Message> {
    container(
        column![
            text("Description").size(32),
            text(
                "Employees are matched against public contribution records. \
                 Each match is listed as a contribution awaiting review."
            ),
            text("• Contributions: review every match and set its status; changes are saved immediately."),
            text("• Employees: open an employee to see their related contributions and submit all status changes at once."),
            text("• Statuses: To Do, Approved, Not Approved, Under Review, False Positive."),
        ]
        .spacing(12),
    )
    .padding(24)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}
