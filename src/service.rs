// Profile aggregation service.
// The inbound contract for the presentation layer: cached fetches plus
// derived statistics assembled into one overview.

use std::time::Duration;

use crate::cache::ResponseCache;
use crate::error::Result;
use crate::github::{CommitRecord, ContributionsCollection, GitHubClient, UserProfile};
use crate::stats::{RepositoryAggregate, Streak, calculate_streak, group_by_repository};

/// Everything the profile page needs, fetched and derived in one call.
#[derive(Debug, Clone)]
pub struct ProfileOverview {
    pub profile: UserProfile,
    pub contributions: ContributionsCollection,
    pub streak: Streak,
    pub commits: Vec<CommitRecord>,
    pub repositories: Vec<RepositoryAggregate>,
}

/// Cached access to the GitHub endpoints.
pub struct ProfileService {
    cache: ResponseCache,
    base_url: Option<String>,
}

impl ProfileService {
    /// Create a service with the default 5-minute response cache.
    pub fn new() -> Self {
        Self::with_cache(ResponseCache::new())
    }

    /// Create a service with a custom cache TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_cache(ResponseCache::with_ttl(ttl))
    }

    /// Create a service around an existing response cache.
    pub fn with_cache(cache: ResponseCache) -> Self {
        Self {
            cache,
            base_url: None,
        }
    }

    /// Point the service at an alternate API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn client(&self, token: &str) -> Result<GitHubClient> {
        match &self.base_url {
            Some(base) => GitHubClient::with_base_url(token, base),
            None => GitHubClient::new(token),
        }
    }

    /// Fetch the authenticated user's profile, cached by token.
    pub async fn fetch_cached_user_profile(&self, token: &str) -> Result<UserProfile> {
        self.cache
            .profiles
            .get_or_fetch(token, || async {
                let mut client = self.client(token)?;
                client.fetch_user_profile().await
            })
            .await
    }

    /// Fetch the trailing-year contributions for `username`, cached by
    /// username.
    pub async fn fetch_cached_contribution_calendar(
        &self,
        username: &str,
        token: &str,
    ) -> Result<ContributionsCollection> {
        self.cache
            .calendars
            .get_or_fetch(username, || async {
                let mut client = self.client(token)?;
                client.fetch_contribution_calendar(username).await
            })
            .await
    }

    /// Fetch the last week of authored commits for `username`, cached by
    /// username.
    pub async fn fetch_cached_commit_messages(
        &self,
        username: &str,
        token: &str,
    ) -> Result<Vec<CommitRecord>> {
        self.cache
            .commits
            .get_or_fetch(username, || async {
                let mut client = self.client(token)?;
                client.fetch_commit_messages(username).await
            })
            .await
    }

    /// Assemble the full overview: the profile resolves the login, then
    /// the calendar and commit fetches run concurrently, then statistics
    /// are derived.
    ///
    /// Any fetch failure fails the whole assembly; `try_join!` drops the
    /// other in-flight fetch on the first error, so no partial data is
    /// returned.
    pub async fn fetch_profile_overview(&self, token: &str) -> Result<ProfileOverview> {
        let profile = self.fetch_cached_user_profile(token).await?;
        let username = profile.login.clone();

        let (contributions, commits) = tokio::try_join!(
            self.fetch_cached_contribution_calendar(&username, token),
            self.fetch_cached_commit_messages(&username, token),
        )?;

        let streak = calculate_streak(&contributions.contribution_calendar);
        let repositories = group_by_repository(&commits);

        Ok(ProfileOverview {
            profile,
            contributions,
            streak,
            commits,
            repositories,
        })
    }
}

impl Default for ProfileService {
    fn default() -> Self {
        Self::new()
    }
}
