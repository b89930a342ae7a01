use crate::config::InsightsConfig;
use crate::github::DEFAULT_API_URL;
use crate::model::RepoSlug;
use crate::report::{PackageManagerTable, DEFAULT_TOP};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "repo-insights")]
#[command(about = "Descriptive statistics for a GitHub repository")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Full path of the repository (<owner>/<name>)")]
    pub repo: RepoSlug,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "Access token provided by GitHub"
    )]
    pub token: String,

    #[arg(
        long,
        env = "GITHUB_API_URL",
        default_value = DEFAULT_API_URL,
        help = "Base URL of the API (GitHub Enterprise: https://host/api/v3)"
    )]
    pub api_url: String,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, default_value_t = DEFAULT_TOP, help = "Number of top contributors to list")]
    pub top: usize,

    #[arg(long, help = "JSON file mapping marker file names to package manager labels")]
    pub markers: Option<PathBuf>,

    #[arg(long, default_value_t = 30, help = "HTTP timeout in seconds")]
    pub timeout: u64,

    #[arg(long, help = "Disable progress indicators")]
    pub no_progress: bool,

    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug)"
    )]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn into_config(self) -> Result<InsightsConfig> {
        let markers = match &self.markers {
            Some(path) => PackageManagerTable::from_json_file(path)
                .with_context(|| format!("Failed to load marker table from {}", path.display()))?,
            None => PackageManagerTable::default(),
        };

        Ok(InsightsConfig {
            repo: self.repo,
            api_url: self.api_url,
            token: self.token,
            timeout: Duration::from_secs(self.timeout),
            top: self.top,
            markers,
            json: self.json,
            progress: !self.no_progress,
        })
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::init(self.verbose);
        let config = self.into_config()?;
        crate::report::exec(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_repo() {
        assert!(Cli::try_parse_from(["repo-insights", "--token", "t"]).is_err());
    }

    #[test]
    fn rejects_malformed_repo() {
        let err = Cli::try_parse_from(["repo-insights", "--repo", "nope", "--token", "t"]);
        assert!(err.is_err());
    }

    #[test]
    fn defaults_resolve_into_config() {
        let cli = Cli::try_parse_from([
            "repo-insights",
            "--repo",
            "octo/hello",
            "--token",
            "t",
            "--api-url",
            "http://localhost:1",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.repo.to_string(), "octo/hello");
        assert_eq!(config.top, DEFAULT_TOP);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.markers, PackageManagerTable::default());
        assert!(config.progress);
        assert!(!config.json);
    }

    #[test]
    fn missing_marker_file_is_reported() {
        let cli = Cli::try_parse_from([
            "repo-insights",
            "--repo",
            "octo/hello",
            "--token",
            "t",
            "--markers",
            "/definitely/not/here.json",
        ])
        .unwrap();
        assert!(cli.into_config().is_err());
    }
}
