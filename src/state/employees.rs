//! Employees view-model and the related-contributions dialog
//!
//! Status edits inside the dialog only touch a local working copy. Nothing
//! is sent until the operator submits the whole copy as one bulk update.

use tracing::{debug, info, warn};

use super::data::{BulkStatusEntry, BulkStatusUpdate, Contribution, ContributionStatus, Employee};
use super::load::LoadState;
use super::notification::Notification;

/// A contribution in the dialog's working copy
#[derive(Debug, Clone, PartialEq)]
pub struct EditableContribution {
    /// Record as loaded, with its `status` moved out into [`Self::status`]
    pub contribution: Contribution,
    /// Status as it will be submitted; starts as the server value
    pub status: Option<ContributionStatus>,
}

impl From<Contribution> for EditableContribution {
    fn from(mut contribution: Contribution) -> Self {
        let status = contribution.status.take();
        EditableContribution {
            contribution,
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailDialog {
    #[default]
    Closed,
    Open {
        employee: Employee,
        details: LoadState<EditableContribution>,
    },
}

impl DetailDialog {
    pub fn employee(&self) -> Option<&Employee> {
        match self {
            DetailDialog::Closed => None,
            DetailDialog::Open { employee, .. } => Some(employee),
        }
    }
}

/// A bulk update the caller must send, tagged with the dialog's employee
#[derive(Debug, Clone, PartialEq)]
pub struct BulkSubmission {
    pub email: String,
    pub update: BulkStatusUpdate,
}

#[derive(Debug, Default)]
pub struct EmployeesView {
    pub employees: LoadState<Employee>,
    pub dialog: DetailDialog,
}

impl EmployeesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish_load(&mut self, result: Result<Vec<Employee>, String>) {
        if let Err(message) = &result {
            warn!("Failed to load employees: {message}");
        }
        self.employees.finish(result);
    }

    /// Show the dialog for `employee`.
    ///
    /// Returns the email whose contributions must be fetched, or `None` when
    /// the dialog is already showing this employee.
    pub fn open(&mut self, employee: Employee) -> Option<String> {
        if self.dialog.employee().map(|e| &e.email) == Some(&employee.email) {
            return None;
        }

        let email = employee.email.clone();
        debug!("Opening related contributions for {email}");
        self.dialog = DetailDialog::Open {
            employee,
            details: LoadState::Loading,
        };
        Some(email)
    }

    pub fn close(&mut self) {
        self.dialog = DetailDialog::Closed;
    }

    /// Settle the details fetch for `email`.
    ///
    /// Dropped if the dialog was closed or moved to another employee meanwhile.
    pub fn finish_details(&mut self, email: &str, result: Result<Vec<Contribution>, String>) {
        match &mut self.dialog {
            DetailDialog::Open { employee, details } if employee.email == email => {
                if let Err(message) = &result {
                    warn!("Failed to load contributions for {email}: {message}");
                }
                details.finish(result);
            }
            _ => debug!("Discarding stale contributions for {email}"),
        }
    }

    /// Change a row of the working copy. No request is made.
    pub fn edit_status(&mut self, index: usize, status: ContributionStatus) {
        if let DetailDialog::Open { details, .. } = &mut self.dialog {
            if let Some(row) = details.items_mut().and_then(|rows| rows.get_mut(index)) {
                row.status = Some(status);
            }
        }
    }

    /// Build the bulk payload from the whole working copy.
    ///
    /// Every row is included with its current status, edited or not.
    /// `None` unless the dialog is open with its contributions loaded.
    pub fn bulk_request(&self) -> Option<BulkSubmission> {
        let DetailDialog::Open { employee, details } = &self.dialog else {
            return None;
        };

        let contributions = details
            .items()?
            .iter()
            .map(|row| BulkStatusEntry {
                contribution_id: row.contribution.id,
                contribution_status: row.status,
            })
            .collect();

        Some(BulkSubmission {
            email: employee.email.clone(),
            update: BulkStatusUpdate { contributions },
        })
    }

    /// Report the outcome of a bulk update submitted for `email`.
    ///
    /// The working copy is left as it is. Returns `None` when the dialog was
    /// closed or moved to another employee before the result arrived.
    pub fn finish_bulk(&self, email: &str, result: Result<(), String>) -> Option<Notification> {
        if self.dialog.employee().map(|e| e.email.as_str()) != Some(email) {
            debug!("Discarding bulk update result for {email}");
            return None;
        }

        Some(match result {
            Ok(()) => {
                info!("Bulk status update accepted");
                Notification::bulk_updated()
            }
            Err(message) => {
                warn!("Bulk status update failed: {message}");
                Notification::bulk_update_failed(&message)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Amount;
    use crate::state::data::ContributionStatus::*;
    use crate::state::notification::Severity;

    fn employee(name: &str) -> Employee {
        Employee {
            first_name: name.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            organization_name: Some("Acme".to_string()),
            address: None,
        }
    }

    fn contribution(id: i64, email: &str, status: Option<ContributionStatus>) -> Contribution {
        Contribution {
            id,
            first_name: "Ann".to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
            address: None,
            amount: Amount::default(),
            recipient: None,
            status,
        }
    }

    fn view_with_details() -> EmployeesView {
        let mut view = EmployeesView::new();
        view.finish_load(Ok(vec![employee("Ann"), employee("Bob"), employee("Cy")]));
        view.open(employee("Ann"));
        view.finish_details(
            "ann@x.com",
            Ok(vec![
                contribution(10, "ann@x.com", Some(ToDo)),
                contribution(11, "ann@x.com", Some(Approved)),
            ]),
        );
        view
    }

    fn detail_ids(view: &EmployeesView) -> Vec<i64> {
        match &view.dialog {
            DetailDialog::Open { details, .. } => details
                .items()
                .unwrap()
                .iter()
                .map(|row| row.contribution.id)
                .collect(),
            DetailDialog::Closed => panic!("dialog should be open"),
        }
    }

    #[test]
    fn test_employees_render_in_response_order() {
        let view = view_with_details();
        let names: Vec<_> = view
            .employees
            .items()
            .unwrap()
            .iter()
            .map(|e| e.first_name.as_str())
            .collect();
        assert_eq!(names, ["Ann", "Bob", "Cy"]);
    }

    #[test]
    fn test_fetch_error_replaces_rows() {
        let mut view = EmployeesView::new();
        view.finish_load(Err("server responded with 500 Internal Server Error".to_string()));
        assert_eq!(
            view.employees,
            LoadState::Error("server responded with 500 Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_bulk_payload_covers_every_row() {
        let mut view = view_with_details();
        view.edit_status(0, FalsePositive);

        let payload = view.bulk_request().unwrap();
        assert_eq!(payload.email, "ann@x.com");
        assert_eq!(
            payload.update.contributions,
            vec![
                BulkStatusEntry {
                    contribution_id: 10,
                    contribution_status: Some(FalsePositive),
                },
                BulkStatusEntry {
                    contribution_id: 11,
                    contribution_status: Some(Approved),
                },
            ]
        );
    }

    #[test]
    fn test_bulk_needs_loaded_details() {
        let mut view = EmployeesView::new();
        assert_eq!(view.bulk_request(), None);

        view.open(employee("Ann"));
        assert_eq!(view.bulk_request(), None);

        view.finish_details("ann@x.com", Ok(vec![]));
        assert_eq!(
            view.bulk_request(),
            Some(BulkSubmission {
                email: "ann@x.com".to_string(),
                update: BulkStatusUpdate {
                    contributions: vec![]
                },
            })
        );
    }

    #[test]
    fn test_bulk_outcome_leaves_working_copy() {
        let mut view = view_with_details();
        view.edit_status(1, NotApproved);
        let before = view.dialog.clone();

        let ok = view.finish_bulk("ann@x.com", Ok(()));
        assert_eq!(ok, Some(Notification::bulk_updated()));
        assert_eq!(view.dialog, before);

        let failed = view
            .finish_bulk("ann@x.com", Err("connection refused".to_string()))
            .unwrap();
        assert_eq!(failed.severity, Severity::Error);
        assert!(failed.message.contains("connection refused"));
        assert_eq!(view.dialog, before);
    }

    #[test]
    fn test_switching_employee_replaces_details() {
        let mut view = view_with_details();
        assert_eq!(detail_ids(&view), vec![10, 11]);

        assert_eq!(view.open(employee("Bob")), Some("bob@x.com".to_string()));
        assert!(matches!(
            &view.dialog,
            DetailDialog::Open { details: LoadState::Loading, .. }
        ));

        view.finish_details("bob@x.com", Ok(vec![contribution(20, "bob@x.com", None)]));
        assert_eq!(detail_ids(&view), vec![20]);
    }

    #[test]
    fn test_reopening_same_employee_does_not_refetch() {
        let mut view = view_with_details();
        assert_eq!(view.open(employee("Ann")), None);
        assert_eq!(detail_ids(&view), vec![10, 11]);
    }

    #[test]
    fn test_stale_details_are_discarded() {
        let mut view = EmployeesView::new();
        view.open(employee("Ann"));
        view.open(employee("Bob"));

        view.finish_details("ann@x.com", Ok(vec![contribution(10, "ann@x.com", None)]));
        assert!(matches!(
            &view.dialog,
            DetailDialog::Open { details: LoadState::Loading, .. }
        ));

        view.close();
        view.finish_details("bob@x.com", Ok(vec![contribution(20, "bob@x.com", None)]));
        assert_eq!(view.dialog, DetailDialog::Closed);
    }

    #[test]
    fn test_edits_are_local_only() {
        let mut view = view_with_details();
        view.edit_status(0, UnderReview);
        view.edit_status(5, UnderReview);

        let DetailDialog::Open { details, .. } = &view.dialog else {
            panic!("dialog should be open");
        };
        let rows = details.items().unwrap();
        assert_eq!(rows[0].status, Some(UnderReview));
        assert_eq!(rows[1].status, Some(Approved));
    }

    #[test]
    fn test_working_copy_holds_the_only_status() {
        let view = view_with_details();
        let DetailDialog::Open { details, .. } = &view.dialog else {
            panic!("dialog should be open");
        };
        for row in details.items().unwrap() {
            assert_eq!(row.contribution.status, None);
        }
    }

    #[test]
    fn test_bulk_result_after_close_is_discarded() {
        let mut view = view_with_details();
        let submission = view.bulk_request().unwrap();
        view.close();

        assert_eq!(view.finish_bulk(&submission.email, Ok(())), None);
        assert_eq!(
            view.finish_bulk(&submission.email, Err("timeout".to_string())),
            None
        );
    }

    #[test]
    fn test_bulk_result_for_previous_employee_is_discarded() {
        let mut view = view_with_details();
        let submission = view.bulk_request().unwrap();
        view.open(employee("Bob"));
        view.finish_details("bob@x.com", Ok(vec![]));

        assert_eq!(view.finish_bulk(&submission.email, Ok(())), None);
        assert_eq!(
            view.finish_bulk("bob@x.com", Ok(())),
            Some(Notification::bulk_updated())
        );
    }
}
