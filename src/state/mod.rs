/// State management module
///
/// This module handles all view state, including:
/// - Records served by the dashboard API (data.rs)
/// - List fetch lifecycle (load.rs)
/// - Optimistic status cells (status.rs)
/// - The contributions and employees view-models
/// - Transient notifications (notification.rs)

pub mod contributions;
pub mod data;
pub mod employees;
pub mod load;
pub mod notification;
pub mod status;
