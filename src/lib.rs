// Aggregation backend for a GitHub profile dashboard.
// Fetches the user profile, contribution calendar, and recent commits
// through a short-lived response cache and derives streak and
// per-repository statistics for the presentation layer to render.

pub mod cache;
pub mod error;
pub mod github;
pub mod service;
pub mod stats;
pub mod util;

pub use error::{GitfolioError, Result};
pub use service::{ProfileOverview, ProfileService};
