// GitHub API endpoint functions.
// Typed operations for the user profile, contribution calendar, and
// recent commit search.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{GitfolioError, Result};

use super::client::GitHubClient;
use super::types::{
    CommitRecord, ContributionsCollection, RateLimitInfo, RepositoryRef, UserProfile,
};

/// Warn when the GraphQL quota drops below this many remaining requests.
const RATE_LIMIT_WARN_THRESHOLD: u64 = 10;

/// Media type required by the commit search endpoint.
const COMMIT_SEARCH_MEDIA_TYPE: &str = "application/vnd.github.cloak-preview+json";

/// Contribution window for the calendar query, in days.
const CALENDAR_WINDOW_DAYS: i64 = 365;

/// Author-date window for the commit search, in days.
const COMMIT_WINDOW_DAYS: i64 = 7;

const CONTRIBUTIONS_QUERY: &str = "\
query ($username: String!, $from: DateTime!, $to: DateTime!) {
  rateLimit {
    limit
    cost
    remaining
    resetAt
  }
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      totalCommitContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
      totalRepositoriesWithContributedCommits
      contributionCalendar {
        totalContributions
        colors
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}";

/// GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

/// Variables for the contributions query.
#[derive(Debug, Serialize)]
struct ContributionsVariables<'a> {
    username: &'a str,
    from: String,
    to: String,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorItem>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorItem {
    message: String,
}

/// Payload of the contributions query.
#[derive(Debug, Deserialize)]
struct ContributionsData {
    #[serde(rename = "rateLimit")]
    rate_limit: RateLimitInfo,
    user: Option<ContributionsUser>,
}

#[derive(Debug, Deserialize)]
struct ContributionsUser {
    #[serde(rename = "contributionsCollection")]
    contributions_collection: ContributionsCollection,
}

/// Response wrapper for the commit search.
#[derive(Debug, Deserialize)]
struct CommitSearchResponse {
    items: Vec<CommitSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CommitSearchItem {
    sha: String,
    commit: CommitDetail,
    repository: RepositoryRef,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    author: CommitAuthor,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    date: DateTime<Utc>,
}

impl CommitSearchItem {
    fn into_record(self) -> CommitRecord {
        CommitRecord {
            message: self.commit.message,
            date: self.commit.author.date,
            repository: self.repository,
            hash: self.sha,
        }
    }
}

impl GitHubClient {
    /// Fetch the authenticated user's profile.
    pub async fn fetch_user_profile(&mut self) -> Result<UserProfile> {
        let response = self.get("/user").await?;
        let profile: UserProfile = response.json().await?;
        Ok(profile)
    }

    /// Fetch the trailing-year contribution calendar for `username`.
    ///
    /// Failures on this path surface as [`GitfolioError::CommitData`] with
    /// the triggering error chained as the source and logged.
    pub async fn fetch_contribution_calendar(
        &mut self,
        username: &str,
    ) -> Result<ContributionsCollection> {
        match self.contribution_calendar_inner(username).await {
            Ok(collection) => Ok(collection),
            Err(source) => {
                error!(username, %source, "contribution calendar fetch failed");
                Err(GitfolioError::CommitData {
                    source: Box::new(source),
                })
            }
        }
    }

    async fn contribution_calendar_inner(
        &mut self,
        username: &str,
    ) -> Result<ContributionsCollection> {
        let to = Utc::now();
        let from = to - Duration::days(CALENDAR_WINDOW_DAYS);
        let request = GraphqlRequest {
            query: CONTRIBUTIONS_QUERY,
            variables: ContributionsVariables {
                username,
                from: from.to_rfc3339_opts(SecondsFormat::Secs, true),
                to: to.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        };

        let response = self.post_graphql(&request).await?;
        let body = response.text().await?;
        let envelope: GraphqlResponse<ContributionsData> = serde_json::from_str(&body)?;

        if let Some(err) = envelope.errors.first() {
            return Err(GitfolioError::Graphql(err.message.clone()));
        }
        let data = envelope
            .data
            .ok_or_else(|| GitfolioError::Graphql("response carried no data".to_string()))?;

        let rate_limit = &data.rate_limit;
        debug!(
            remaining = rate_limit.remaining,
            limit = rate_limit.limit,
            "GraphQL rate limit"
        );
        if rate_limit.remaining < RATE_LIMIT_WARN_THRESHOLD {
            warn!(
                remaining = rate_limit.remaining,
                reset_at = %rate_limit.reset_at,
                "approaching GitHub API rate limit"
            );
        }

        let user = data
            .user
            .ok_or_else(|| GitfolioError::Graphql(format!("no such user: {}", username)))?;
        Ok(user.contributions_collection)
    }

    /// Search commits authored by `username` over the last 7 days,
    /// newest first. Date bounds are computed in UTC.
    pub async fn fetch_commit_messages(&mut self, username: &str) -> Result<Vec<CommitRecord>> {
        let since = (Utc::now() - Duration::days(COMMIT_WINDOW_DAYS))
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let query = format!("author:{} author-date:>{}", username, since);
        let params = [
            ("q", query.as_str()),
            ("sort", "author-date"),
            ("order", "desc"),
        ];

        let response = self
            .get_with_media_type("/search/commits", &params, COMMIT_SEARCH_MEDIA_TYPE)
            .await?;
        let wrapper: CommitSearchResponse = response.json().await?;
        Ok(wrapper
            .items
            .into_iter()
            .map(CommitSearchItem::into_record)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_search_response_maps_to_records() {
        let json = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "sha": "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3",
                    "commit": {
                        "message": "Add streak calculation",
                        "author": { "date": "2024-03-04T10:15:00Z" }
                    },
                    "repository": {
                        "name": "gitfolio",
                        "owner": { "login": "octocat" }
                    }
                },
                {
                    "sha": "de9f2c7fd25e1b3afad3e85a0bd17d9b100db4b3",
                    "commit": {
                        "message": "Fix cache expiry",
                        "author": { "date": "2024-03-03T22:05:00Z" }
                    },
                    "repository": {
                        "name": "dotfiles",
                        "owner": { "login": "octocat" }
                    }
                }
            ]
        }"#;

        let wrapper: CommitSearchResponse = serde_json::from_str(json).unwrap();
        let records: Vec<CommitRecord> = wrapper
            .items
            .into_iter()
            .map(CommitSearchItem::into_record)
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "Add streak calculation");
        assert_eq!(records[0].short_hash(), "a94a8fe");
        assert_eq!(records[0].repository.name, "gitfolio");
        assert_eq!(records[1].repository.owner.login, "octocat");
    }

    #[test]
    fn test_graphql_envelope_with_errors() {
        let json = r#"{
            "data": null,
            "errors": [ { "message": "Could not resolve to a User" } ]
        }"#;

        let envelope: GraphqlResponse<ContributionsData> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors[0].message, "Could not resolve to a User");
    }

    #[test]
    fn test_graphql_envelope_with_data() {
        let json = r#"{
            "data": {
                "rateLimit": {
                    "limit": 5000,
                    "cost": 1,
                    "remaining": 4999,
                    "resetAt": "2024-03-04T11:00:00Z"
                },
                "user": {
                    "contributionsCollection": {
                        "totalCommitContributions": 10,
                        "totalPullRequestContributions": 2,
                        "totalPullRequestReviewContributions": 1,
                        "totalRepositoriesWithContributedCommits": 3,
                        "contributionCalendar": {
                            "totalContributions": 13,
                            "colors": [],
                            "weeks": []
                        }
                    }
                }
            }
        }"#;

        let envelope: GraphqlResponse<ContributionsData> = serde_json::from_str(json).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.rate_limit.remaining, 4999);
        let user = data.user.unwrap();
        assert_eq!(
            user.contributions_collection.total_commit_contributions,
            10
        );
    }
}
