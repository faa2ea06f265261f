//! Shared data structures for the application state
//!
//! These structs mirror the JSON records served by the dashboard API
//! and flow between the HTTP layer and the view-models.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// An employee as listed by the dashboard (read-only)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Employee {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    /// Unique key for an employee
    pub email: String,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Employee {
    /// "First Last", as shown in notifications and dialog titles
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Review status of a contribution
///
/// The only field of a contribution the dashboard may change.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    ToDo,
    Approved,
    NotApproved,
    UnderReview,
    FalsePositive,
}

impl ContributionStatus {
    /// Every status in the order they are offered in the status picker
    pub const ALL: [ContributionStatus; 5] = [
        ContributionStatus::ToDo,
        ContributionStatus::Approved,
        ContributionStatus::NotApproved,
        ContributionStatus::UnderReview,
        ContributionStatus::FalsePositive,
    ];

    /// Wire name used in query parameters and JSON bodies
    pub fn as_str(self) -> &'static str {
        match self {
            ContributionStatus::ToDo => "to_do",
            ContributionStatus::Approved => "approved",
            ContributionStatus::NotApproved => "not_approved",
            ContributionStatus::UnderReview => "under_review",
            ContributionStatus::FalsePositive => "false_positive",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            ContributionStatus::ToDo => "To Do",
            ContributionStatus::Approved => "Approved",
            ContributionStatus::NotApproved => "Not Approved",
            ContributionStatus::UnderReview => "Under Review",
            ContributionStatus::FalsePositive => "False Positive",
        }
    }
}

// pick_list renders options through ToString
impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Monetary amount, kept exactly as the server rendered it
///
/// The API may send amounts as JSON numbers or as decimal strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Amount(String);

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, "{} $", self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Amount(n.to_string()),
            Raw::Text(s) => Amount(s),
        })
    }
}

/// A contribution record as served by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contribution {
    /// Opaque server identifier, used by bulk updates
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    /// Not unique: one employee may have many contributions
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: Amount,
    #[serde(default)]
    pub recipient: Option<String>,
    /// `None` when the server has no status set
    #[serde(default, deserialize_with = "status_or_unset")]
    pub status: Option<ContributionStatus>,
}

impl Contribution {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Display-only fields render blank rather than failing the whole list
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null`, a missing field and `""` all mean "no status yet"
fn status_or_unset<'de, D>(deserializer: D) -> Result<Option<ContributionStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => ContributionStatus::deserialize(
            serde::de::value::StrDeserializer::<D::Error>::new(value),
        )
        .map(Some),
    }
}

/// One row of a bulk status update
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BulkStatusEntry {
    pub contribution_id: i64,
    pub contribution_status: Option<ContributionStatus>,
}

/// Body of `PUT /dashboard/contribution/bulk_update/status`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BulkStatusUpdate {
    pub contributions: Vec<BulkStatusEntry>,
}
