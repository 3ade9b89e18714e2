// Diagnostic CLI entry point.
// Fetches the authenticated user's profile overview and prints a
// plain-text summary. The dashboard itself renders elsewhere.

use gitfolio::util::ensure_valid_url;
use gitfolio::{GitfolioError, ProfileService, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let token = std::env::var("GITHUB_TOKEN").map_err(|_| GitfolioError::MissingToken)?;

    let service = ProfileService::new();
    let overview = service.fetch_profile_overview(&token).await?;

    let profile = &overview.profile;
    println!(
        "{} ({})",
        profile.name.as_deref().unwrap_or(&profile.login),
        profile.login
    );
    if let Some(bio) = &profile.bio {
        println!("{}", bio);
    }
    if let Some(blog) = profile.blog.as_deref().filter(|b| !b.is_empty()) {
        println!("{}", ensure_valid_url(blog));
    }
    println!(
        "repos: {}  gists: {}  followers: {}  following: {}",
        profile.public_repos, profile.public_gists, profile.followers, profile.following
    );

    let calendar = &overview.contributions.contribution_calendar;
    println!(
        "{} contributions in the last year, streak: {} weeks (best {})",
        calendar.total_contributions, overview.streak.current_streak, overview.streak.max_streak
    );

    println!("commits this week by repository:");
    for group in &overview.repositories {
        println!("  {}: {}", group.repository.name, group.count);
    }
    for commit in &overview.commits {
        println!(
            "  {} {} [{}]",
            commit.short_hash(),
            commit.message.lines().next().unwrap_or(""),
            commit.repository.name
        );
    }

    Ok(())
}
