// Weekly contribution streaks.
// A week counts as active when any of its days has a contribution.

use crate::github::{ContributionCalendar, ContributionWeek};

/// Longest and trailing runs of consecutive active weeks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streak {
    pub max_streak: u32,
    pub current_streak: u32,
}

/// Compute the longest and current weekly contribution streaks over the
/// calendar, in one pass in chronological order.
pub fn calculate_streak(calendar: &ContributionCalendar) -> Streak {
    let mut current_streak = 0;
    let mut max_streak = 0;

    for week in &calendar.weeks {
        if is_active(week) {
            current_streak += 1;

            if current_streak > max_streak {
                max_streak = current_streak;
            }
        } else {
            current_streak = 0;
        }
    }

    Streak {
        max_streak,
        current_streak,
    }
}

/// Variant returning only the longest streak.
pub fn longest_streak(calendar: &ContributionCalendar) -> u32 {
    calculate_streak(calendar).max_streak
}

/// A week with no days has no contribution and is inactive.
fn is_active(week: &ContributionWeek) -> bool {
    week.contribution_days
        .iter()
        .any(|day| day.contribution_count > 0)
}
