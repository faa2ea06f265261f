use iced::widget::{button, column, container, pick_list, row, scrollable, text, Column};
use iced::{Alignment, Border, Element, Length, Theme};

use crate::state::contributions::ContributionsView;
use crate::state::data::{Contribution, ContributionStatus, Employee};
use crate::state::employees::{EditableContribution, EmployeesView};
use crate::state::load::LoadState;
use crate::Message;

/// Contribution columns: (heading, width portion)
const CONTRIBUTION_COLUMNS: [(&str, u16); 7] = [
    ("First Name", 2),
    ("Last Name", 2),
    ("Email", 3),
    ("Address", 3),
    ("Amount", 1),
    ("Recipient", 2),
    ("Status", 2),
];

const EMPLOYEE_COLUMNS: [(&str, u16); 6] = [
    ("First Name", 2),
    ("Last Name", 2),
    ("Email", 3),
    ("Organization", 2),
    ("Address", 3),
    ("Actions", 2),
];

fn cell<'a>(content: impl text::IntoFragment<'a>, portion: u16) -> Element<'a, Message> {
    text(content).width(Length::FillPortion(portion)).into()
}

fn heading(columns: &[(&'static str, u16)]) -> Element<'static, Message> {
    columns
        .iter()
        .fold(row![].spacing(12), |heading, &(title, portion)| {
            heading.push(text(title).size(16).width(Length::FillPortion(portion)))
        })
        .into()
}

fn optional(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn error_text<'a>(message: &str) -> Element<'a, Message> {
    text(format!("Error: {message}")).size(20).style(text::danger).into()
}

/// One contribution row with its status picker
fn contribution_row<'a>(
    contribution: &'a Contribution,
    status: Option<ContributionStatus>,
    saving: bool,
    on_select: impl Fn(ContributionStatus) -> Message + 'a,
) -> Element<'a, Message> {
    let picker = pick_list(ContributionStatus::ALL, status, on_select)
        .placeholder("Status")
        .width(Length::Fill);

    let status_cell: Element<'a, Message> = if saving {
        column![picker, text("Saving...").size(12)].spacing(2).into()
    } else {
        picker.into()
    };

    row![
        cell(contribution.first_name.as_str(), 2),
        cell(contribution.last_name.as_str(), 2),
        cell(contribution.email.as_str(), 3),
        cell(optional(&contribution.address), 3),
        cell(contribution.amount.to_string(), 1),
        cell(optional(&contribution.recipient), 2),
        container(status_cell).width(Length::FillPortion(2)),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}

/// Contributions dashboard page
pub fn contributions(view: &ContributionsView) -> Element<'_, Message> {
    let rows = match &view.contributions {
        LoadState::Loading => return text("Loading contributions...").size(20).into(),
        LoadState::Error(message) => return error_text(message),
        LoadState::Ready(rows) => rows,
    };

    let table = rows.iter().enumerate().fold(
        Column::new().push(heading(&CONTRIBUTION_COLUMNS)).spacing(10),
        |table, (index, row)| {
            table.push(contribution_row(
                &row.contribution,
                row.status.displayed(),
                row.status.is_pending(),
                move |status| Message::StatusSelected(index, status),
            ))
        },
    );

    column![text("Contributions Dashboard").size(32), table]
        .spacing(16)
        .into()
}

/// Employees page
pub fn employees(view: &EmployeesView) -> Element<'_, Message> {
    let employees = match &view.employees {
        LoadState::Loading => return text("Loading employees...").size(20).into(),
        LoadState::Error(message) => return error_text(message),
        LoadState::Ready(employees) => employees,
    };

    let table = employees.iter().fold(
        Column::new().push(heading(&EMPLOYEE_COLUMNS)).spacing(10),
        |table, employee: &Employee| {
            table.push(
                row![
                    cell(employee.first_name.as_str(), 2),
                    cell(employee.last_name.as_str(), 2),
                    cell(employee.email.as_str(), 3),
                    cell(optional(&employee.organization_name), 2),
                    cell(optional(&employee.address), 3),
                    container(
                        button("View Related Contributions")
                            .on_press(Message::OpenDetails(employee.clone()))
                    )
                    .width(Length::FillPortion(2)),
                ]
                .spacing(12)
                .align_y(Alignment::Center),
            )
        },
    );

    column![text("Employees").size(32), table].spacing(16).into()
}

/// Body of the related-contributions dialog
pub fn employee_details<'a>(
    employee: &'a Employee,
    details: &'a LoadState<EditableContribution>,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match details {
        LoadState::Loading => text("Loading...").into(),
        LoadState::Error(message) => error_text(message),
        LoadState::Ready(rows) if rows.is_empty() => text("No contributions available.").into(),
        LoadState::Ready(rows) => scrollable(rows.iter().enumerate().fold(
            Column::new().push(heading(&CONTRIBUTION_COLUMNS)).spacing(10),
            |table, (index, row)| {
                table.push(contribution_row(
                    &row.contribution,
                    row.status,
                    false,
                    move |status| Message::DetailStatusSelected(index, status),
                ))
            },
        ))
        .height(Length::Shrink)
        .into(),
    };

    let ready = matches!(details, LoadState::Ready(_));
    let actions = row![
        button("Close")
            .on_press(Message::CloseDetails)
            .style(button::secondary),
        container(
            button("Submit Bulk Update").on_press_maybe(ready.then_some(Message::SubmitBulk))
        )
        .align_right(Length::Fill),
    ]
    .align_y(Alignment::Center);

    container(
        column![
            text(format!("Contributions for {}", employee.display_name())).size(24),
            body,
            actions,
        ]
        .spacing(20),
    )
    .padding(24)
    .max_width(1200.0)
    .max_height(640.0)
    .style(|theme: &Theme| container::Style {
        background: Some(theme.palette().background.into()),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    })
    .into()
}
