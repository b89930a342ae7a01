//! Access to the hosting service's REST API.
//!
//! Everything downstream of this module talks to [`RepositoryApi`], so the
//! walker and reporters can be driven by an in-memory fake in tests.

use crate::error::Result;
use crate::model::ContributorStat;
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub mod client;
pub mod pagination;

pub use client::{ClientConfig, GitHubClient, DEFAULT_API_URL};

/// Kind of an entry in a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }
}

/// Read-only view of one repository on the hosting service.
pub trait RepositoryApi {
    /// List a directory; `""` is the repository root.
    fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>>;

    /// Raw bytes of a file, already decoded from the transport encoding.
    fn file_content(&self, path: &str) -> Result<Vec<u8>>;

    /// Author date of every commit on the default branch.
    fn commit_dates(&self) -> Result<Vec<DateTime<Utc>>>;

    /// Per-author commit totals as aggregated by the service.
    fn contributor_stats(&self) -> Result<Vec<ContributorStat>>;
}
