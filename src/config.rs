//! Startup configuration
//!
//! Read once in `main` and handed to the API client; nothing reads the
//! environment after the window opens.

use clap::{Parser, ValueEnum};
use reqwest::Url;
use thiserror::Error;

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "DASHBOARD_API_URL";

/// Top level views of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Route {
    #[default]
    Home,
    Employees,
    Contributions,
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "compliance-dashboard", version, about)]
pub struct AppArgs {
    /// Base URL of the dashboard API, e.g. https://compliance.example.com/api
    #[arg(long, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// View to open at startup
    #[arg(value_enum, default_value_t = Route::Home)]
    pub view: Route,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("no API base URL configured; pass --api-url or set DASHBOARD_API_URL")]
    MissingApiUrl,

    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL without a trailing slash on its path
    pub api_base_url: Url,
    pub start_route: Route,
}

impl Config {
    pub fn from_args(args: AppArgs) -> Result<Self, ConfigError> {
        let raw = args
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingApiUrl)?;

        Ok(Config {
            api_base_url: parse_base_url(raw)?,
            start_route: args.view,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("URL must not carry a query or fragment".to_string()));
    }

    let trimmed = url.path().trim_end_matches('/').to_string();
    url.set_path(&trimmed);
    Ok(url)
}
