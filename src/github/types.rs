// GitHub API response types.
// Defines structs for deserializing REST and GraphQL responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Profile of the authenticated user from the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: String,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
    pub plan: Option<Plan>,
}

/// Account plan details (only returned for the authenticated user).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    #[serde(default)]
    pub private_repos: u64,
}

/// Rate limit block returned alongside GraphQL queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub limit: u64,
    pub cost: u64,
    pub remaining: u64,
    pub reset_at: DateTime<Utc>,
}

/// Contribution totals for the trailing year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub total_commit_contributions: u64,
    pub total_pull_request_contributions: u64,
    pub total_pull_request_review_contributions: u64,
    pub total_repositories_with_contributed_commits: u64,
    pub contribution_calendar: ContributionCalendar,
}

/// Week-bucketed calendar of daily contribution counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    #[serde(default)]
    pub colors: Vec<String>,
    pub weeks: Vec<ContributionWeek>,
}

/// One calendar week, in chronological order within the calendar.
/// Boundary weeks may hold fewer than 7 days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

/// A single day's contribution count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u64,
    pub date: NaiveDate,
}

/// A commit authored by the user within the search window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub message: String,
    pub date: DateTime<Utc>,
    pub repository: RepositoryRef,
    /// Full 40-hex commit hash.
    pub hash: String,
}

impl CommitRecord {
    /// Display form of the hash: the first 7 characters.
    pub fn short_hash(&self) -> &str {
        &self.hash[..self.hash.len().min(7)]
    }
}

/// Repository a commit belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    pub owner: Owner,
}

/// GitHub user or organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// Rate limit counters from REST response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_from_rest_json() {
        let json = r#"{
            "login": "octocat",
            "name": "The Octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231",
            "html_url": "https://github.com/octocat",
            "company": "@github",
            "blog": "github.blog",
            "location": "San Francisco",
            "bio": null,
            "public_repos": 8,
            "public_gists": 8,
            "followers": 9999,
            "following": 9,
            "plan": { "name": "pro", "private_repos": 9999 }
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.name.as_deref(), Some("The Octocat"));
        assert!(profile.bio.is_none());
        assert_eq!(profile.public_repos, 8);
        assert_eq!(profile.plan.unwrap().name, "pro");
    }

    #[test]
    fn test_contributions_collection_from_graphql_json() {
        let json = r##"{
            "totalCommitContributions": 1200,
            "totalPullRequestContributions": 87,
            "totalPullRequestReviewContributions": 40,
            "totalRepositoriesWithContributedCommits": 12,
            "contributionCalendar": {
                "totalContributions": 1327,
                "colors": ["#9be9a8", "#40c463", "#30a14e", "#216e39"],
                "weeks": [
                    {
                        "contributionDays": [
                            { "contributionCount": 3, "date": "2024-01-01" },
                            { "contributionCount": 0, "date": "2024-01-02" }
                        ]
                    },
                    { "contributionDays": [] }
                ]
            }
        }"##;

        let collection: ContributionsCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.total_commit_contributions, 1200);

        let calendar = &collection.contribution_calendar;
        assert_eq!(calendar.total_contributions, 1327);
        assert_eq!(calendar.colors.len(), 4);
        assert_eq!(calendar.weeks.len(), 2);
        assert_eq!(calendar.weeks[0].contribution_days[0].contribution_count, 3);
        assert!(calendar.weeks[1].contribution_days.is_empty());
    }

    #[test]
    fn test_short_hash_truncates_to_seven() {
        let commit = CommitRecord {
            message: "Fix parser".to_string(),
            date: Utc::now(),
            repository: RepositoryRef {
                name: "gitfolio".to_string(),
                owner: Owner {
                    login: "octocat".to_string(),
                },
            },
            hash: "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3".to_string(),
        };

        assert_eq!(commit.short_hash(), "a94a8fe");
    }
}
