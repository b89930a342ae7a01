use crate::model::{ContributorStat, ContributorSummary};

pub const DEFAULT_TOP: usize = 5;

/// Contributor count plus the `top` largest committers.
///
/// The sort is stable, so equal totals keep the order the service returned.
pub fn rank_contributors(mut contributors: Vec<ContributorStat>, top: usize) -> ContributorSummary {
    let total_contributors = contributors.len();
    contributors.sort_by(|a, b| b.total_commits.cmp(&a.total_commits));
    contributors.truncate(top);
    ContributorSummary {
        total_contributors,
        top: contributors,
    }
}
