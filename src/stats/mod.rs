// Aggregation functions over fetched data.
// Pure, single-pass derivations; no upstream access.

pub mod repos;
pub mod streak;

pub use repos::{RepositoryAggregate, group_by_repository};
pub use streak::{Streak, calculate_streak, longest_streak};
