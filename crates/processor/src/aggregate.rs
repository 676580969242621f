//! Aggregates over a collection of enriched PRs

use std::collections::BTreeMap;

use common::models::{AgingDistribution, EnrichedPr};

/// Number of PRs each person is a requested reviewer on
pub fn review_load(prs: &[EnrichedPr]) -> BTreeMap<String, usize> {
    let mut load = BTreeMap::new();
    for reviewer in prs.iter().flat_map(|pr| &pr.pr.requested_reviewers) {
        *load.entry(reviewer.login.clone()).or_insert(0) += 1;
    }
    load
}

/// Histogram of PR ages. Every PR lands in exactly one bucket.
pub fn aging_distribution(prs: &[EnrichedPr]) -> AgingDistribution {
    prs.iter()
        .fold(AgingDistribution::default(), |mut dist, pr| {
            match pr.age_in_days {
                d if d < 1 => dist.less_than_one_day += 1,
                1..=3 => dist.one_to_three_days += 1,
                4..=7 => dist.three_to_seven_days += 1,
                _ => dist.more_than_seven_days += 1,
            }
            dist
        })
}

/// Mean time-in-review over PRs that have one.
///
/// PRs without a substantive review are left out of both sum and count. No
/// data averages to 0.
pub fn average_review_time<'a>(prs: impl IntoIterator<Item = &'a EnrichedPr>) -> f64 {
    let (sum, count) = prs
        .into_iter()
        .filter_map(|pr| pr.time_in_review_hours)
        .fold((0i64, 0usize), |(sum, count), hours| (sum + hours, count + 1));

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// `average_review_time` per repository name
pub fn average_review_time_by_repo(prs: &[EnrichedPr]) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<&str, Vec<&EnrichedPr>> = BTreeMap::new();
    for pr in prs {
        groups.entry(pr.repository.as_str()).or_default().push(pr);
    }

    groups
        .into_iter()
        .map(|(repo, group)| (repo.to_string(), average_review_time(group)))
        .collect()
}
