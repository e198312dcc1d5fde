use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub total_bytes: u64,
    pub last_updated: Option<DateTime<Utc>>,
    pub download_count: u64,
}

/// Server-side ordering for the competition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetitionSort {
    LatestDeadline,
}

impl CompetitionSort {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            CompetitionSort::LatestDeadline => "latestDeadline",
        }
    }
}
