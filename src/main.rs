use clap::Parser;
use iced::widget::{column, container, scrollable, stack};
use iced::{Element, Length, Task, Theme};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod state;
mod ui;

use api::DashboardClient;
use config::{AppArgs, Config, ConfigError, Route};
use state::contributions::{ContributionsView, StatusWrite};
use state::data::{Contribution, ContributionStatus, Employee};
use state::employees::{DetailDialog, EmployeesView};
use state::notification::{Notification, NotificationId, NotificationSlot, NOTIFICATION_DURATION};

/// Identifies one mounting of a list view.
///
/// Results tagged with an older mount belong to a view that is gone and are dropped.
type MountId = u64;

/// What is shown beneath the navigation header
#[derive(Debug)]
enum Screen {
    Home,
    Employees { mount: MountId, view: EmployeesView },
    Contributions { mount: MountId, view: ContributionsView },
}

impl Screen {
    fn route(&self) -> Route {
        match self {
            Screen::Home => Route::Home,
            Screen::Employees { .. } => Route::Employees,
            Screen::Contributions { .. } => Route::Contributions,
        }
    }
}

/// Main application state
struct Dashboard {
    /// Client for the remote API, built from the startup config
    client: DashboardClient,
    screen: Screen,
    notifications: NotificationSlot,
    last_mount: MountId,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User picked a navigation entry
    Navigate(Route),
    EmployeesLoaded(MountId, Result<Vec<Employee>, String>),
    ContributionsLoaded(MountId, Result<Vec<Contribution>, String>),
    /// Status picked in the contributions table (sent immediately)
    StatusSelected(usize, ContributionStatus),
    StatusWritten(MountId, StatusWrite, Result<(), String>),
    /// User asked for an employee's related contributions
    OpenDetails(Employee),
    DetailsLoaded(MountId, String, Result<Vec<Contribution>, String>),
    /// Status picked inside the dialog (local until submitted)
    DetailStatusSelected(usize, ContributionStatus),
    CloseDetails,
    SubmitBulk,
    /// Bulk outcome, tagged with the employee whose dialog submitted it
    BulkFinished(MountId, String, Result<(), String>),
    DismissNotification(NotificationId),
}

impl Dashboard {
    /// Create a new instance of the application
    fn new(client: DashboardClient, start: Route) -> (Self, Task<Message>) {
        let mut dashboard = Dashboard {
            client,
            screen: Screen::Home,
            notifications: NotificationSlot::default(),
            last_mount: 0,
        };
        let task = dashboard.mount(start);
        (dashboard, task)
    }

    /// Replace the current screen with a fresh one for `route` and start its load
    fn mount(&mut self, route: Route) -> Task<Message> {
        self.last_mount += 1;
        let mount = self.last_mount;
        let client = self.client.clone();

        match route {
            Route::Home => {
                self.screen = Screen::Home;
                Task::none()
            }
            Route::Employees => {
                self.screen = Screen::Employees {
                    mount,
                    view: EmployeesView::new(),
                };
                Task::perform(
                    async move { client.fetch_employees().await.map_err(|e| e.to_string()) },
                    move |result| Message::EmployeesLoaded(mount, result),
                )
            }
            Route::Contributions => {
                self.screen = Screen::Contributions {
                    mount,
                    view: ContributionsView::new(),
                };
                Task::perform(
                    async move { client.fetch_contributions().await.map_err(|e| e.to_string()) },
                    move |result| Message::ContributionsLoaded(mount, result),
                )
            }
        }
    }

    /// Show a notification and schedule its auto-dismissal
    fn notify(&mut self, notification: Notification) -> Task<Message> {
        let id = self.notifications.show(notification);
        Task::perform(tokio::time::sleep(NOTIFICATION_DURATION), move |()| {
            Message::DismissNotification(id)
        })
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => {
                // Following a link to the current view keeps it mounted
                if self.screen.route() == route {
                    return Task::none();
                }
                info!("Navigating to {route:?}");
                self.mount(route)
            }
            Message::EmployeesLoaded(loaded, result) => {
                if let Screen::Employees { mount, view } = &mut self.screen {
                    if *mount == loaded {
                        view.finish_load(result);
                    }
                }
                Task::none()
            }
            Message::ContributionsLoaded(loaded, result) => {
                if let Screen::Contributions { mount, view } = &mut self.screen {
                    if *mount == loaded {
                        view.finish_load(result);
                    }
                }
                Task::none()
            }
            Message::StatusSelected(index, status) => {
                let Screen::Contributions { mount, view } = &mut self.screen else {
                    return Task::none();
                };
                let Some(write) = view.select_status(index, status) else {
                    return Task::none();
                };

                let mount = *mount;
                let client = self.client.clone();
                let email = write.email.clone();
                Task::perform(
                    async move {
                        client
                            .update_contribution_status(&email, status)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    move |result| Message::StatusWritten(mount, write.clone(), result),
                )
            }
            Message::StatusWritten(written, write, result) => {
                let notification = match &mut self.screen {
                    Screen::Contributions { mount, view } if *mount == written => {
                        view.finish_status_write(&write, result)
                    }
                    _ => return Task::none(),
                };
                self.notify(notification)
            }
            Message::OpenDetails(employee) => {
                let Screen::Employees { mount, view } = &mut self.screen else {
                    return Task::none();
                };
                let Some(email) = view.open(employee) else {
                    return Task::none();
                };

                let mount = *mount;
                let client = self.client.clone();
                Task::perform(
                    {
                        let email = email.clone();
                        async move {
                            client
                                .fetch_employee_contributions(&email)
                                .await
                                .map_err(|e| e.to_string())
                        }
                    },
                    move |result| Message::DetailsLoaded(mount, email.clone(), result),
                )
            }
            Message::DetailsLoaded(loaded, email, result) => {
                if let Screen::Employees { mount, view } = &mut self.screen {
                    if *mount == loaded {
                        view.finish_details(&email, result);
                    }
                }
                Task::none()
            }
            Message::DetailStatusSelected(index, status) => {
                if let Screen::Employees { view, .. } = &mut self.screen {
                    view.edit_status(index, status);
                }
                Task::none()
            }
            Message::CloseDetails => {
                if let Screen::Employees { view, .. } = &mut self.screen {
                    view.close();
                }
                Task::none()
            }
            Message::SubmitBulk => {
                let Screen::Employees { mount, view } = &self.screen else {
                    return Task::none();
                };
                let Some(submission) = view.bulk_request() else {
                    return Task::none();
                };

                let mount = *mount;
                let client = self.client.clone();
                let email = submission.email;
                let update = submission.update;
                Task::perform(
                    async move {
                        client
                            .bulk_update_status(&update)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    move |result| Message::BulkFinished(mount, email.clone(), result),
                )
            }
            Message::BulkFinished(finished, email, result) => {
                let notification = match &self.screen {
                    Screen::Employees { mount, view } if *mount == finished => {
                        view.finish_bulk(&email, result)
                    }
                    _ => None,
                };
                match notification {
                    Some(notification) => self.notify(notification),
                    None => Task::none(),
                }
            }
            Message::DismissNotification(id) => {
                self.notifications.dismiss(id);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let outlet: Element<Message> = match &self.screen {
            Screen::Home => ui::shell::home(),
            Screen::Employees { view, .. } => ui::tables::employees(view),
            Screen::Contributions { view, .. } => ui::tables::contributions(view),
        };

        let page = container(
            scrollable(
                column![ui::shell::header(self.screen.route()), outlet]
                    .spacing(40)
                    .padding(32),
            )
            .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill);

        let mut layers = stack![page].width(Length::Fill).height(Length::Fill);

        if let Screen::Employees {
            view:
                EmployeesView {
                    dialog: DetailDialog::Open { employee, details },
                    ..
                },
            ..
        } = &self.screen
        {
            layers = layers.push(ui::dialog::modal(
                ui::tables::employee_details(employee, details),
                Message::CloseDetails,
            ));
        }

        if let Some((id, notification)) = self.notifications.current() {
            layers = layers.push(ui::notification::toast(id, notification));
        }

        layers.into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

#[derive(Error, Debug)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("window error: {0}")]
    Ui(#[from] iced::Error),
}

fn run() -> Result<(), AppError> {
    let config = Config::from_args(AppArgs::parse())?;
    let client = DashboardClient::new(config.api_base_url.clone())?;
    let start = config.start_route;

    info!(
        "Compliance dashboard starting against {} (view: {start:?})",
        config.api_base_url
    );

    iced::application("Compliance Dashboard", Dashboard::update, Dashboard::view)
        .theme(Dashboard::theme)
        .centered()
        .run_with(move || Dashboard::new(client, start))?;

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
