/// Tags offered by `/cf_problems`. Discord caps a choice list at 25 entries.
pub const PROBLEM_TAGS: [&str; 17] = [
    "dp",
    "math",
    "greedy",
    "graphs",
    "binary search",
    "brute force",
    "strings",
    "trees",
    "number theory",
    "geometry",
    "sortings",
    "implementation",
    "data structures",
    "combinatorics",
    "constructive algorithms",
    "two pointers",
    "bitmasks",
];

/// Ratings offered by `/cf_problems`.
pub const RATING_LADDER: [u32; 25] = [
    800, 900, 1000, 1100, 1200, 1300, 1400, 1500, 1600, 1700, 1800, 1900, 2000, 2100, 2500, 2600,
    2700, 2800, 2900, 3000, 3100, 3200, 3300, 3400, 3500,
];

/// One problem from the Codeforces problemset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub contest_id: Option<u64>,
    pub index: String,
    pub name: String,
    pub tags: Vec<String>,
    pub rating: Option<u32>,
    pub problem_type: Option<String>,
}

impl Problem {
    pub fn url(&self) -> Option<String> {
        self.contest_id.map(|contest_id| {
            format!(
                "https://codeforces.com/problemset/problem/{}/{}",
                contest_id, self.index
            )
        })
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Lifecycle stage of a contest as reported by `contest.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestPhase {
    Before,
    Coding,
    PendingSystemTest,
    SystemTest,
    Finished,
    Unknown,
}

impl ContestPhase {
    pub fn from_api(value: &str) -> Self {
        match value {
            "BEFORE" => ContestPhase::Before,
            "CODING" => ContestPhase::Coding,
            "PENDING_SYSTEM_TEST" => ContestPhase::PendingSystemTest,
            "SYSTEM_TEST" => ContestPhase::SystemTest,
            "FINISHED" => ContestPhase::Finished,
            _ => ContestPhase::Unknown,
        }
    }

    pub fn as_api_str(&self) -> &'static str {
        match self {
            ContestPhase::Before => "BEFORE",
            ContestPhase::Coding => "CODING",
            ContestPhase::PendingSystemTest => "PENDING_SYSTEM_TEST",
            ContestPhase::SystemTest => "SYSTEM_TEST",
            ContestPhase::Finished => "FINISHED",
            ContestPhase::Unknown => "UNKNOWN",
        }
    }

    /// Not started yet or currently running.
    pub fn is_upcoming_or_running(&self) -> bool {
        matches!(self, ContestPhase::Before | ContestPhase::Coding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    pub id: u64,
    pub name: String,
    pub contest_type: String,
    pub phase: ContestPhase,
    pub start_time_seconds: Option<i64>,
    pub duration_seconds: i64,
    /// Seconds since the start; negative while the contest is upcoming.
    pub relative_time_seconds: Option<i64>,
}

impl Contest {
    /// Offset from the start in whole hours, floored.
    ///
    /// This is the "Left Time" value shown on contest embeds and the key
    /// `/cf_contests` sorts on.
    pub fn hours_remaining(&self) -> Option<i64> {
        self.relative_time_seconds.map(|s| s.div_euclid(3600))
    }

    pub fn duration_hours(&self) -> i64 {
        self.duration_seconds.div_euclid(3600)
    }

    pub fn url(&self) -> String {
        format!("https://codeforces.com/contest/{}", self.id)
    }
}
