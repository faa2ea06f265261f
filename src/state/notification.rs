//! Transient feedback after a status write
//!
//! One notification is visible at a time; showing another replaces it.

use std::time::Duration;

/// How long a notification stays visible unless dismissed earlier
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient message shown after a status write settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn status_updated(display_name: &str) -> Self {
        Notification {
            severity: Severity::Success,
            message: format!("Status updated for {display_name}"),
        }
    }

    pub fn status_update_failed(reason: &str) -> Self {
        Notification {
            severity: Severity::Error,
            message: format!("Error updating status: {reason}"),
        }
    }

    pub fn bulk_updated() -> Self {
        Notification {
            severity: Severity::Success,
            message: "Bulk update successful".to_string(),
        }
    }

    pub fn bulk_update_failed(reason: &str) -> Self {
        Notification {
            severity: Severity::Error,
            message: format!("Error in bulk update: {reason}"),
        }
    }
}

pub type NotificationId = u64;

/// Holds at most one visible notification.
///
/// A new notification replaces the current one; nothing is queued.
#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<(NotificationId, Notification)>,
    last_id: NotificationId,
}

impl NotificationSlot {
    /// Show `notification`, replacing whatever is visible.
    /// The returned id is what an auto-dismiss timer should pass to [`Self::dismiss`].
    pub fn show(&mut self, notification: Notification) -> NotificationId {
        self.last_id += 1;
        self.current = Some((self.last_id, notification));
        self.last_id
    }

    /// Hide the notification with `id`, if it is still the visible one
    pub fn dismiss(&mut self, id: NotificationId) {
        if matches!(self.current, Some((current, _)) if current == id) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<(NotificationId, &Notification)> {
        self.current.as_ref().map(|(id, n)| (*id, n))
    }
}
