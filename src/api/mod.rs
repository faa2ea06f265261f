/// Dashboard API module
///
/// Talks to the remote compliance service over HTTP/JSON:
/// - `client.rs` - reqwest client, endpoints and error mapping

pub mod client;

pub use client::{ApiError, DashboardClient};
