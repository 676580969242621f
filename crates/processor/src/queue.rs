//! Review queue: filtering, facets and ordering of open PRs

use std::cmp::Ordering;
use std::collections::BTreeSet;

use common::models::EnrichedPr;
use serde::{Deserialize, Serialize};

/// Narrow the queue; unset fields match everything
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueFilter {
    pub repository: Option<String>,
    pub author: Option<String>,
    pub reviewer: Option<String>,
}

impl QueueFilter {
    pub fn matches(&self, pr: &EnrichedPr) -> bool {
        if let Some(repo) = wanted(&self.repository) {
            if pr.repository != repo {
                return false;
            }
        }
        if let Some(author) = wanted(&self.author) {
            if pr.author() != author {
                return false;
            }
        }
        if let Some(reviewer) = wanted(&self.reviewer) {
            if !pr.is_requested_reviewer(reviewer) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, prs: Vec<EnrichedPr>) -> Vec<EnrichedPr> {
        prs.into_iter().filter(|pr| self.matches(pr)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Age,
    Author,
    Repository,
    Title,
    Comments,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Queue ordering, oldest first by default
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct QueueSort {
    #[serde(default)]
    pub field: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl QueueSort {
    fn compare(&self, a: &EnrichedPr, b: &EnrichedPr) -> Ordering {
        let ord = match self.field {
            SortField::Age => a.age_in_days.cmp(&b.age_in_days),
            SortField::Author => a.author().cmp(b.author()),
            SortField::Repository => a.repository.cmp(&b.repository),
            SortField::Title => a.pr.title.cmp(&b.pr.title),
            SortField::Comments => a.pr.comments.cmp(&b.pr.comments),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    /// Stable: PRs that compare equal keep their input order
    pub fn apply(&self, prs: &mut [EnrichedPr]) {
        prs.sort_by(|a, b| self.compare(a, b));
    }
}

/// Distinct values available to filter on, each sorted
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct QueueFacets {
    pub repositories: Vec<String>,
    pub authors: Vec<String>,
    pub reviewers: Vec<String>,
}

pub fn facets(prs: &[EnrichedPr]) -> QueueFacets {
    let repositories: BTreeSet<&str> = prs.iter().map(|pr| pr.repository.as_str()).collect();
    let authors: BTreeSet<&str> = prs.iter().map(|pr| pr.author()).collect();
    let reviewers: BTreeSet<&str> = prs
        .iter()
        .flat_map(|pr| pr.pr.requested_reviewers.iter().map(|r| r.login.as_str()))
        .collect();

    QueueFacets {
        repositories: owned(repositories),
        authors: owned(authors),
        reviewers: owned(reviewers),
    }
}

fn owned(values: BTreeSet<&str>) -> Vec<String> {
    values.into_iter().map(String::from).collect()
}

/// An empty filter value means "any"
fn wanted(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}
