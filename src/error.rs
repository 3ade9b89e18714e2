// Error types for the gitfolio aggregation layer.
// Maps GitHub API failures onto a small taxonomy callers can match on.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitfolioError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("Missing GITHUB_TOKEN environment variable")]
    MissingToken,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// Calendar fetches fail with this fixed message; the triggering
    /// error stays attached as the source so callers can still tell a
    /// rate-limit exhaustion from a transport failure.
    #[error("failed to fetch commit data")]
    CommitData {
        #[source]
        source: Box<GitfolioError>,
    },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GitfolioError>;
