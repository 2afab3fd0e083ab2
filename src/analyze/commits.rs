use crate::types::metadata::CommitRecord;
use chrono::{DateTime, Months, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Consistency {
    High,
    Medium,
    Low,
    None,
}

impl std::fmt::Display for Consistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Consistency::High => write!(f, "high"),
            Consistency::Medium => write!(f, "medium"),
            Consistency::Low => write!(f, "low"),
            Consistency::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitReport {
    pub total: usize,
    pub recent_count: usize,
    pub very_recent_count: usize,
    pub consistency: Consistency,
    pub avg_message_length: u32,
    pub meaningful_percentage: u32,
    pub recent_activity: bool,
}

impl Default for CommitReport {
    fn default() -> Self {
        Self {
            total: 0,
            recent_count: 0,
            very_recent_count: 0,
            consistency: Consistency::None,
            avg_message_length: 0,
            meaningful_percentage: 0,
            recent_activity: false,
        }
    }
}

/// Throwaway messages: whole-string "update", "fix", or a single character.
fn throwaway_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"(?is)^(update|fix|.)$").expect("pattern must compile"))
}

pub fn is_meaningful_message(message: &str) -> bool {
    message.chars().count() > 10 && !throwaway_pattern().is_match(message)
}

/// Classify commit recency and message quality. `now` is passed explicitly
/// so the windows are deterministic under test; they are calendar months,
/// not fixed day counts.
pub fn analyze_commits(commits: &[CommitRecord], now: DateTime<Utc>) -> CommitReport {
    if commits.is_empty() {
        return CommitReport::default();
    }

    let one_month_ago = now.checked_sub_months(Months::new(1)).unwrap_or(now);
    let three_months_ago = now.checked_sub_months(Months::new(3)).unwrap_or(now);

    let recent_count = commits
        .iter()
        .filter(|c| c.author_date().is_some_and(|date| date > three_months_ago))
        .count();
    let very_recent_count = commits
        .iter()
        .filter(|c| c.author_date().is_some_and(|date| date > one_month_ago))
        .count();

    let total = commits.len();
    let total_message_chars: usize = commits
        .iter()
        .map(|c| c.message().chars().count())
        .sum();
    let avg_message_length = (total_message_chars as f64 / total as f64).round() as u32;

    let meaningful_count = commits
        .iter()
        .filter(|c| is_meaningful_message(c.message()))
        .count();
    let meaningful_percentage =
        (meaningful_count as f64 / total as f64 * 100.0).round() as u32;

    let consistency = if recent_count > 20 {
        Consistency::High
    } else if recent_count > 10 {
        Consistency::Medium
    } else {
        Consistency::Low
    };

    CommitReport {
        total,
        recent_count,
        very_recent_count,
        consistency,
        avg_message_length,
        meaningful_percentage,
        recent_activity: very_recent_count > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::metadata::{CommitAuthor, CommitDetail};
    use chrono::TimeZone;

    fn commit(message: &str, date: DateTime<Utc>) -> CommitRecord {
        CommitRecord {
            sha: None,
            commit: CommitDetail {
                message: message.to_string(),
                author: Some(CommitAuthor { date }),
            },
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn days_before(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        now - chrono::Duration::days(days)
    }

    #[test]
    fn empty_history_is_classified_as_none() {
        let report = analyze_commits(&[], fixed_now());
        assert_eq!(report.consistency, Consistency::None);
        assert_eq!(report.total, 0);
        assert!(!report.recent_activity);
    }

    #[test]
    fn recency_windows_split_one_and_three_months() {
        let now = fixed_now();
        let commits = vec![
            commit("implement feature gate", days_before(now, 5)),
            commit("rework scoring thresholds", days_before(now, 60)),
            commit("initial import of the project", days_before(now, 400)),
        ];
        let report = analyze_commits(&commits, now);
        assert_eq!(report.recent_count, 2);
        assert_eq!(report.very_recent_count, 1);
        assert!(report.recent_activity);
        assert_eq!(report.consistency, Consistency::Low);
    }

    #[test]
    fn more_than_twenty_recent_commits_is_high() {
        let now = fixed_now();
        let commits: Vec<_> = (0..21)
            .map(|i| commit("add incremental improvements", days_before(now, i)))
            .collect();
        let report = analyze_commits(&commits, now);
        assert_eq!(report.consistency, Consistency::High);
    }

    #[test]
    fn eleven_recent_commits_is_medium() {
        let now = fixed_now();
        let commits: Vec<_> = (0..11)
            .map(|i| commit("refine commit analyzer rules", days_before(now, i)))
            .collect();
        let report = analyze_commits(&commits, now);
        assert_eq!(report.consistency, Consistency::Medium);
    }

    #[test]
    fn throwaway_messages_are_not_meaningful() {
        assert!(!is_meaningful_message("update"));
        assert!(!is_meaningful_message("Fix"));
        assert!(!is_meaningful_message("x"));
        assert!(!is_meaningful_message("short msg"));
        assert!(is_meaningful_message("add commit message analyzer"));
    }

    #[test]
    fn meaningful_percentage_and_average_length_round() {
        let now = fixed_now();
        let commits = vec![
            commit("add structured scoring pipeline", days_before(now, 1)),
            commit("fix", days_before(now, 2)),
            commit("wip", days_before(now, 3)),
        ];
        let report = analyze_commits(&commits, now);
        // 1 of 3 meaningful -> 33.3 rounds to 33
        assert_eq!(report.meaningful_percentage, 33);
        // lengths 31, 3, 3 -> mean 12.33 rounds to 12
        assert_eq!(report.avg_message_length, 12);
    }

    #[test]
    fn commits_without_author_dates_never_count_as_recent() {
        let now = fixed_now();
        let undated = CommitRecord {
            sha: None,
            commit: CommitDetail {
                message: "imported without metadata".to_string(),
                author: None,
            },
        };
        let report = analyze_commits(&[undated], now);
        assert_eq!(report.recent_count, 0);
        assert_eq!(report.total, 1);
        assert_eq!(report.consistency, Consistency::Low);
    }
}
