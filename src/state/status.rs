//! Optimistic status cell
//!
//! A contribution's status as the UI sees it. While a remote write is in
//! flight the cell remembers the last value the server accepted, so a
//! failed write always falls back to that value and never to whatever the
//! row happened to show at the time the failure arrived.

use super::data::ContributionStatus;

/// Identifies one in-flight write against a single cell
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// The server has confirmed this value (or it came from a load)
    Committed(Option<ContributionStatus>),
    /// A write for `next` is in flight; `committed` is the last server-accepted value
    Pending {
        committed: Option<ContributionStatus>,
        next: ContributionStatus,
        ticket: Ticket,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCell {
    state: CellState,
    /// Last ticket handed out; never reused for the life of the cell
    issued: Ticket,
}

impl StatusCell {
    pub fn committed(status: Option<ContributionStatus>) -> Self {
        StatusCell {
            state: CellState::Committed(status),
            issued: 0,
        }
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// The value to render right now
    pub fn displayed(&self) -> Option<ContributionStatus> {
        match self.state {
            CellState::Committed(status) => status,
            CellState::Pending { next, .. } => Some(next),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, CellState::Pending { .. })
    }

    /// Apply `next` optimistically.
    ///
    /// Returns the ticket the caller must hand back to [`StatusCell::resolve`],
    /// or `None` when `next` is already displayed and no write is needed.
    pub fn begin(&mut self, next: ContributionStatus) -> Option<Ticket> {
        if self.displayed() == Some(next) {
            return None;
        }

        let committed = match self.state {
            CellState::Committed(status) => status,
            CellState::Pending { committed, .. } => committed,
        };

        self.issued += 1;
        self.state = CellState::Pending {
            committed,
            next,
            ticket: self.issued,
        };
        Some(self.issued)
    }

    /// Settle the write identified by `ticket`.
    ///
    /// Only the most recent write decides what is displayed. An older write
    /// that succeeded still moves the committed value forward, since the
    /// server accepted it; an older write that failed changes nothing.
    pub fn resolve(&mut self, ticket: Ticket, written: ContributionStatus, succeeded: bool) {
        let CellState::Pending {
            committed,
            next,
            ticket: current,
        } = self.state
        else {
            return;
        };

        if ticket == current {
            self.state = if succeeded {
                CellState::Committed(Some(next))
            } else {
                CellState::Committed(committed)
            };
        } else if succeeded {
            self.state = CellState::Pending {
                committed: Some(written),
                next,
                ticket: current,
            };
        }
    }
}
