/// View helpers
///
/// Pure functions from view-model state to iced elements:
/// - `shell.rs` - header, navigation and the home page
/// - `tables.rs` - employee and contribution tables
/// - `dialog.rs` - modal overlay
/// - `notification.rs` - transient toast

pub mod dialog;
pub mod notification;
pub mod shell;
pub mod tables;
