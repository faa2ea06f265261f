//! Contributions dashboard view-model
//!
//! Holds the contribution list and runs the single-record optimistic
//! status update: the row shows the new status before the write is sent,
//! and a failed write puts back the last status the server accepted.

use tracing::{debug, warn};

use super::data::{Contribution, ContributionStatus};
use super::load::LoadState;
use super::notification::Notification;
use super::status::{StatusCell, Ticket};

/// One row of the contributions table
///
/// `status` is the only place the row's status lives. The loaded record's own
/// `status` field is moved into the cell, so `contribution.status` is always `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionRow {
    pub contribution: Contribution,
    pub status: StatusCell,
}

impl From<Contribution> for ContributionRow {
    fn from(mut contribution: Contribution) -> Self {
        let status = StatusCell::committed(contribution.status.take());
        ContributionRow {
            contribution,
            status,
        }
    }
}

/// A remote write the caller must issue after an optimistic edit
#[derive(Debug, Clone, PartialEq)]
pub struct StatusWrite {
    pub index: usize,
    pub ticket: Ticket,
    /// The API addresses single updates by email
    pub email: String,
    pub status: ContributionStatus,
    pub display_name: String,
}

#[derive(Debug, Default)]
pub struct ContributionsView {
    pub contributions: LoadState<ContributionRow>,
}

impl ContributionsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish_load(&mut self, result: Result<Vec<Contribution>, String>) {
        if let Err(message) = &result {
            warn!("Failed to load contributions: {message}");
        }
        self.contributions.finish(result);
    }

    /// Optimistically set the status of row `index`.
    ///
    /// Returns `None` when there is nothing to send: the status is unchanged,
    /// the list is not loaded, or the row does not exist.
    pub fn select_status(
        &mut self,
        index: usize,
        status: ContributionStatus,
    ) -> Option<StatusWrite> {
        let row = self.contributions.items_mut()?.get_mut(index)?;
        let ticket = row.status.begin(status)?;

        debug!(
            "Optimistic status {} for contribution {} ({})",
            status.as_str(),
            row.contribution.id,
            row.contribution.email
        );

        Some(StatusWrite {
            index,
            ticket,
            email: row.contribution.email.clone(),
            status,
            display_name: row.contribution.display_name(),
        })
    }

    /// Settle a write returned by [`Self::select_status`]
    pub fn finish_status_write(
        &mut self,
        write: &StatusWrite,
        result: Result<(), String>,
    ) -> Notification {
        let succeeded = result.is_ok();
        if let Some(row) = self
            .contributions
            .items_mut()
            .and_then(|rows| rows.get_mut(write.index))
        {
            row.status.resolve(write.ticket, write.status, succeeded);
        }

        match result {
            Ok(()) => Notification::status_updated(&write.display_name),
            Err(message) => {
                warn!("Status update for {} failed: {message}", write.email);
                Notification::status_update_failed(&message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Amount;
    use crate::state::data::ContributionStatus::*;
    use crate::state::notification::Severity;
    use crate::state::status::CellState;
    use rstest::rstest;

    fn contribution(id: i64, email: &str, status: Option<ContributionStatus>) -> Contribution {
        Contribution {
            id,
            first_name: "Ada".to_string(),
            last_name: format!("Donor{id}"),
            email: email.to_string(),
            address: None,
            amount: Amount::default(),
            recipient: Some("Committee".to_string()),
            status,
        }
    }

    fn loaded_view() -> ContributionsView {
        let mut view = ContributionsView::new();
        view.finish_load(Ok(vec![
            contribution(1, "a@x.com", Some(ToDo)),
            contribution(2, "b@x.com", Some(UnderReview)),
            contribution(3, "c@x.com", None),
        ]));
        view
    }

    fn displayed(view: &ContributionsView, index: usize) -> Option<ContributionStatus> {
        view.contributions.items().unwrap()[index].status.displayed()
    }

    #[rstest]
    fn test_same_status_sends_nothing(
        #[values(ToDo, Approved, NotApproved, UnderReview, FalsePositive)] status: ContributionStatus,
    ) {
        let mut view = ContributionsView::new();
        view.finish_load(Ok(vec![contribution(1, "a@x.com", Some(status))]));
        assert_eq!(view.select_status(0, status), None);
    }

    #[test]
    fn test_edit_is_visible_before_write_settles() {
        let mut view = loaded_view();
        let write = view.select_status(0, Approved).unwrap();

        assert_eq!(write.email, "a@x.com");
        assert_eq!(write.status, Approved);
        assert_eq!(write.display_name, "Ada Donor1");
        assert_eq!(displayed(&view, 0), Some(Approved));
    }

    #[test]
    fn test_success_keeps_new_status() {
        let mut view = loaded_view();
        let write = view.select_status(0, Approved).unwrap();
        let notification = view.finish_status_write(&write, Ok(()));

        assert_eq!(notification, Notification::status_updated("Ada Donor1"));
        let row = &view.contributions.items().unwrap()[0];
        assert_eq!(row.status.state(), CellState::Committed(Some(Approved)));
    }

    #[test]
    fn test_replaced_status_is_not_kept_anywhere() {
        let mut view = loaded_view();
        let write = view.select_status(0, Approved).unwrap();
        view.finish_status_write(&write, Ok(()));

        let row = &view.contributions.items().unwrap()[0];
        assert_eq!(row.contribution.status, None);
        assert_eq!(row.status.state(), CellState::Committed(Some(Approved)));
    }

    #[test]
    fn test_failure_reverts_and_reports_reason() {
        let mut view = loaded_view();
        let write = view.select_status(0, Approved).unwrap();
        let notification =
            view.finish_status_write(&write, Err("server responded with 500".to_string()));

        assert_eq!(displayed(&view, 0), Some(ToDo));
        assert_eq!(notification.severity, Severity::Error);
        assert!(notification.message.contains("server responded with 500"));
    }

    #[test]
    fn test_rollback_ignores_other_rows_in_flight() {
        let mut view = loaded_view();
        let first = view.select_status(0, Approved).unwrap();
        let second = view.select_status(1, FalsePositive).unwrap();
        let third = view.select_status(2, NotApproved).unwrap();

        view.finish_status_write(&second, Ok(()));
        view.finish_status_write(&first, Err("boom".to_string()));
        view.finish_status_write(&third, Err("boom".to_string()));

        assert_eq!(displayed(&view, 0), Some(ToDo));
        assert_eq!(displayed(&view, 1), Some(FalsePositive));
        assert_eq!(displayed(&view, 2), None);
    }

    #[test]
    fn test_edits_before_load_are_ignored() {
        let mut view = ContributionsView::new();
        assert_eq!(view.select_status(0, Approved), None);

        let mut view = loaded_view();
        assert_eq!(view.select_status(10, Approved), None);
    }
}
