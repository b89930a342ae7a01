use crate::error::InsightsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const SCHEMA_VERSION: u32 = 1;

/// Label used for files without a suffix.
pub const NO_SUFFIX: &str = "no suffix";

/// `owner/name` pair identifying a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = InsightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('/');
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(InsightsError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Extension {
    /// Lowercased suffix without the leading dot.
    Suffix(String),
    None,
}

impl Extension {
    pub fn from_file_name(name: &str) -> Self {
        Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(|s| Extension::Suffix(s.to_lowercase()))
            .unwrap_or(Extension::None)
    }

    pub fn label(&self) -> String {
        match self {
            Extension::Suffix(s) => format!(".{s}"),
            Extension::None => NO_SUFFIX.to_string(),
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<String> for Extension {
    fn from(label: String) -> Self {
        match label.strip_prefix('.') {
            Some(s) => Extension::Suffix(s.to_string()),
            None => Extension::None,
        }
    }
}

impl From<Extension> for String {
    fn from(ext: Extension) -> Self {
        ext.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
    pub extension: Extension,
    pub line_count: u64,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, name: impl Into<String>, line_count: u64) -> Self {
        let name = name.into();
        Self {
            path: path.into(),
            extension: Extension::from_file_name(&name),
            name,
            line_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStat {
    pub login: String,
    pub total_commits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStats {
    pub extension: Extension,
    pub file_count: u64,
    pub line_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerReport {
    pub count: usize,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManagerReport {
    pub managers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitActivity {
    pub total_commits: usize,
    pub last_commit: DateTime<Utc>,
    pub last_5_years: usize,
    pub last_year: usize,
    pub last_91_days: usize,
    pub last_31_days: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorSummary {
    pub total_contributors: usize,
    pub top: Vec<ContributorStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub total_files: usize,
    pub extensions: Vec<ExtensionStats>,
    pub docker: DockerReport,
    pub package_managers: PackageManagerReport,
    pub commits: CommitActivity,
    pub contributors: ContributorSummary,
}
