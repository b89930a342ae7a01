use crate::github::ClientConfig;
use crate::model::RepoSlug;
use crate::report::PackageManagerTable;
use std::time::Duration;

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct InsightsConfig {
    pub repo: RepoSlug,
    pub api_url: String,
    pub token: String,
    pub timeout: Duration,
    pub top: usize,
    pub markers: PackageManagerTable,
    pub json: bool,
    pub progress: bool,
}

impl InsightsConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.token.clone())
            .with_base_url(self.api_url.clone())
            .with_timeout(self.timeout)
    }
}
