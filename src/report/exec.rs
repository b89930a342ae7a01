use super::{
    aggregate_extensions, bucket_commits, detect_package_managers, find_docker_files,
    output_json, output_report, rank_contributors, PackageManagerTable,
};
use crate::config::InsightsConfig;
use crate::error::Result;
use crate::github::{GitHubClient, RepositoryApi};
use crate::model::{InsightsOutput, RepoSlug, SCHEMA_VERSION};
use crate::walker::walk_repository;
use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::info;

/// Run the walk and every reporter against `api`, relative to `now`.
pub fn collect_insights(
    api: &dyn RepositoryApi,
    repo: &RepoSlug,
    markers: &PackageManagerTable,
    top: usize,
    now: DateTime<Utc>,
    show_progress: bool,
) -> Result<InsightsOutput> {
    let records = walk_repository(api, show_progress)?;

    let extensions = aggregate_extensions(&records);
    let docker = find_docker_files(&records);
    let package_managers = detect_package_managers(&records, markers);
    info!(
        "{} extensions, {} docker files, {} package managers",
        extensions.len(),
        docker.count,
        package_managers.managers.len()
    );

    let dates = api.commit_dates()?;
    let commits = bucket_commits(&repo.to_string(), &dates, now)?;

    let contributors = rank_contributors(api.contributor_stats()?, top);

    Ok(InsightsOutput {
        version: SCHEMA_VERSION,
        generated_at: now,
        repository: repo.to_string(),
        total_files: records.len(),
        extensions,
        docker,
        package_managers,
        commits,
        contributors,
    })
}

pub fn exec(config: InsightsConfig) -> anyhow::Result<()> {
    let client = GitHubClient::new(&config.client_config(), config.repo.clone())
        .context("Failed to create API client")?;

    let now = Utc::now();
    let insights = collect_insights(
        &client,
        client.repo(),
        &config.markers,
        config.top,
        now,
        config.progress && !config.json,
    )
    .with_context(|| format!("Failed to collect insights for {}", config.repo))?;

    if config.json {
        output_json(&insights)?;
    } else {
        output_report(&insights, now)?;
    }

    Ok(())
}
