use crate::model::{
    CommitActivity, ContributorSummary, DockerReport, ExtensionStats, InsightsOutput,
    PackageManagerReport,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;

const RULE_WIDTH: usize = 50;

pub fn output_json(output: &InsightsOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

pub fn output_report(output: &InsightsOutput, now: DateTime<Utc>) -> Result<()> {
    println!(
        "{} {}",
        style("Repository").bold(),
        style(&output.repository).cyan()
    );
    println!("Total files: {}\n", style(output.total_files).cyan());

    output_extensions(&output.extensions);
    output_docker(&output.docker);
    output_package_managers(&output.package_managers);
    output_commits(&output.commits, now);
    output_contributors(&output.contributors);
    Ok(())
}

fn heading(title: &str) {
    println!("{}", style(title).bold());
    println!("{}", "─".repeat(RULE_WIDTH));
}

pub fn output_extensions(stats: &[ExtensionStats]) {
    heading("File Extensions");
    println!(
        "{:<20} {:>10} {:>12}",
        style("Extension").bold(),
        style("Files").bold(),
        style("Lines").bold()
    );
    for s in stats {
        println!(
            "{:<20} {:>10} {:>12}",
            s.extension.label(),
            s.file_count,
            s.line_count
        );
    }
    println!();
}

pub fn output_docker(report: &DockerReport) {
    heading("Docker Files");
    println!("Docker-related files: {}", style(report.count).cyan());
    for name in &report.files {
        println!("  {name}");
    }
    println!();
}

pub fn output_package_managers(report: &PackageManagerReport) {
    heading("Package Managers");
    if report.managers.is_empty() {
        println!("  {}", style("none detected").dim());
    }
    for manager in &report.managers {
        println!("  {}", style(manager).green());
    }
    println!();
}

pub fn output_commits(activity: &CommitActivity, now: DateTime<Utc>) {
    heading("Commit Activity");
    let age = (now - activity.last_commit)
        .to_std()
        .map(|d| std::time::Duration::from_secs(d.as_secs() / 3600 * 3600))
        .map(|d| format!("{} ago", humantime::format_duration(d)))
        .unwrap_or_else(|_| "in the future".to_string());
    println!(
        "Last commit: {} ({})",
        style(activity.last_commit.format("%Y-%m-%d %H:%M:%S UTC")).cyan(),
        style(age).dim()
    );
    println!("Total commits:       {:>8}", activity.total_commits);
    println!("Last 5 years:        {:>8}", activity.last_5_years);
    println!("Last year:           {:>8}", activity.last_year);
    println!("Last 91 days:        {:>8}", activity.last_91_days);
    println!("Last 31 days:        {:>8}", activity.last_31_days);
    println!();
}

pub fn output_contributors(summary: &ContributorSummary) {
    heading("Contributors");
    println!("Contributors: {}", style(summary.total_contributors).cyan());
    if !summary.top.is_empty() {
        println!("{:<30} {:>10}", style("Top by commits").bold(), style("Commits").bold());
        for c in &summary.top {
            println!("{:<30} {:>10}", c.login, style(c.total_commits).yellow());
        }
    }
}
