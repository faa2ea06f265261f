//! Reqwest-backed client for the dashboard API.
//!
//! Owns transport details only: URL building, status checks and JSON
//! decoding. Every failure is reported as a single message string to the UI.

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::state::data::{BulkStatusUpdate, Contribution, ContributionStatus, Employee};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS...)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(StatusCode),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot build request URL from base {0}")]
    Endpoint(String),
}

/// Client for one dashboard API base URL. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: Client,
    base: Url,
}

impl DashboardClient {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base })
    }

    /// `GET /dashboard/employees`
    pub async fn fetch_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let url = self.endpoint(&["dashboard", "employees"])?;
        self.get_json(url).await
    }

    /// `GET /dashboard/contribution`
    pub async fn fetch_contributions(&self) -> Result<Vec<Contribution>, ApiError> {
        let url = self.endpoint(&["dashboard", "contribution"])?;
        self.get_json(url).await
    }

    /// `GET /dashboard/employee/{email}/false_positives`
    pub async fn fetch_employee_contributions(
        &self,
        email: &str,
    ) -> Result<Vec<Contribution>, ApiError> {
        let url = self.endpoint(&["dashboard", "employee", email, "false_positives"])?;
        self.get_json(url).await
    }

    /// `PUT /dashboard/contribution/{email}?contribution_status={status}`
    ///
    /// The server applies it to the most recent contribution for `email`.
    pub async fn update_contribution_status(
        &self,
        email: &str,
        status: ContributionStatus,
    ) -> Result<(), ApiError> {
        let mut url = self.endpoint(&["dashboard", "contribution", email])?;
        url.query_pairs_mut()
            .append_pair("contribution_status", status.as_str());

        info!("PUT {url}");
        let response = self.http.put(url).send().await?;
        check_status(response)?;
        Ok(())
    }

    /// `PUT /dashboard/contribution/bulk_update/status`
    pub async fn bulk_update_status(&self, update: &BulkStatusUpdate) -> Result<(), ApiError> {
        let url = self.endpoint(&["dashboard", "contribution", "bulk_update", "status"])?;

        info!(
            "PUT {url} ({} contributions)",
            update.contributions.len()
        );
        debug!("Bulk payload: {update:?}");
        let response = self.http.put(url).json(update).send().await?;
        check_status(response)?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Endpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        info!("Fetching from URL: {url}");
        let response = check_status(self.http.get(url).send().await?)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status))
    }
}
