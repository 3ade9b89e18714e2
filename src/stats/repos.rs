// Commit grouping by repository.
// Counts how many commits in the current result set belong to each repo.

use std::collections::HashMap;

use crate::github::{CommitRecord, RepositoryRef};

/// A repository with the number of matching commits.
#[derive(Debug, Clone)]
pub struct RepositoryAggregate {
    pub repository: RepositoryRef,
    pub count: usize,
}

/// Group commits by repository name, in first-seen order.
///
/// The first commit's repository metadata is retained for each group;
/// later duplicates only increment the count.
pub fn group_by_repository(commits: &[CommitRecord]) -> Vec<RepositoryAggregate> {
    let mut groups: Vec<RepositoryAggregate> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for commit in commits {
        match index.get(commit.repository.name.as_str()) {
            Some(&i) => groups[i].count += 1,
            None => {
                index.insert(commit.repository.name.as_str(), groups.len());
                groups.push(RepositoryAggregate {
                    repository: commit.repository.clone(),
                    count: 1,
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Owner;
    use chrono::Utc;

    fn commit(repo: &str, owner: &str) -> CommitRecord {
        CommitRecord {
            message: format!("commit in {}", repo),
            date: Utc::now(),
            repository: RepositoryRef {
                name: repo.to_string(),
                owner: Owner {
                    login: owner.to_string(),
                },
            },
            hash: "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3".to_string(),
        }
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let commits = vec![
            commit("alpha", "octocat"),
            commit("beta", "octocat"),
            commit("alpha", "octocat"),
            commit("alpha", "octocat"),
            commit("gamma", "octocat"),
        ];

        let groups = group_by_repository(&commits);

        let names: Vec<&str> = groups.iter().map(|g| g.repository.name.as_str()).collect();
        let counts: Vec<usize> = groups.iter().map(|g| g.count).collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
        assert_eq!(counts, [3, 1, 1]);
    }

    #[test]
    fn test_counts_sum_to_input_length() {
        let commits = vec![
            commit("alpha", "octocat"),
            commit("beta", "octocat"),
            commit("alpha", "octocat"),
        ];

        let groups = group_by_repository(&commits);

        let total: usize = groups.iter().map(|g| g.count).sum();
        assert_eq!(total, commits.len());
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_first_seen_metadata_is_retained() {
        let commits = vec![commit("alpha", "octocat"), commit("alpha", "hubot")];

        let groups = group_by_repository(&commits);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].repository.owner.login, "octocat");
        assert_eq!(groups[0].count, 2);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_by_repository(&[]).is_empty());
    }
}
