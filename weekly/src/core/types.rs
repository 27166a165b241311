//! Task records as returned by `task export`.
//!
//! These types mirror the subset of Taskwarrior's export format the review
//! workflow reads. The external store owns the data; values here are
//! transient query results, never authoritative copies.

use serde::Deserialize;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Waiting,
    Completed,
    Deleted,
    Recurring,
    #[serde(other)]
    Other,
}

/// One task record from a structured export query.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    /// Working-set id. Stable for the duration of a session; treated as an
    /// opaque identifier by the gateway contract.
    pub id: u64,
    pub description: String,
    #[serde(default)]
    pub project: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
