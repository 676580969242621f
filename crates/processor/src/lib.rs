//! PR analytics: metrics, review status, alerts and aggregate statistics
//!
//! Everything except `collect` is pure and takes the reference instant as a
//! parameter.

pub mod aggregate;
pub mod alerts;
pub mod collect;
pub mod enrich;
pub mod metrics;
pub mod queue;
pub mod review_status;
pub mod stats;
pub mod trends;

#[cfg(test)]
mod enrich_test;
#[cfg(test)]
mod stats_test;
#[cfg(test)]
mod test_support;

pub use collect::{CollectError, Collector};
pub use enrich::enrich_pr;
pub use queue::{QueueFacets, QueueFilter, QueueSort};
pub use stats::calculate_stats;
