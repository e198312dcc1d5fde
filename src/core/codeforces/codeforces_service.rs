// Business rules for the Codeforces commands. No HTTP and no Discord in here:
// the client is injected through `CodeforcesClient` and results go back as
// plain domain models.

use async_trait::async_trait;
use thiserror::Error;

use super::codeforces_models::{Contest, Problem};
use crate::core::query::{filter_items, require_results, sample_random, sort_items, SortDirection};
use crate::core::relay::RelayError;

/// Number of random problems picked per `/cf_problems` invocation.
pub const PROBLEM_SAMPLE_SIZE: usize = 5;

const NO_PROBLEMS_NOTICE: &str = "No problems found matching the given criteria.";
const NO_CONTESTS_NOTICE: &str = "No upcoming contests found.";
const SERVICE_NAME: &str = "Codeforces";

/// Errors raised while talking to the Codeforces API.
#[derive(Debug, Error)]
pub enum CodeforcesError {
    #[error("Codeforces returned HTTP {0}")]
    Status(u16),
    #[error("Codeforces rejected the request: {0}")]
    Rejected(String),
    #[error("Codeforces request failed: {0}")]
    Transport(String),
    #[error("Malformed Codeforces payload: {0}")]
    Decode(String),
}

/// The two read-only endpoints the service needs.
#[async_trait]
pub trait CodeforcesClient: Send + Sync {
    async fn fetch_problems(&self) -> Result<Vec<Problem>, CodeforcesError>;
    async fn fetch_contests(&self) -> Result<Vec<Contest>, CodeforcesError>;
}

/// Filter parameters for `/cf_problems`. `None` means "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemQuery {
    pub tag: Option<String>,
    pub rating: Option<u32>,
}

impl ProblemQuery {
    pub fn matches(&self, problem: &Problem) -> bool {
        if let Some(tag) = &self.tag {
            if !problem.has_tag(tag) {
                return false;
            }
        }
        if let Some(rating) = self.rating {
            if problem.rating != Some(rating) {
                return false;
            }
        }
        true
    }
}

pub struct CodeforcesService<C: CodeforcesClient> {
    client: C,
}

impl<C: CodeforcesClient> CodeforcesService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Up to five random problems matching `query`.
    pub async fn find_problems(&self, query: &ProblemQuery) -> Result<Vec<Problem>, RelayError> {
        let problems = self.client.fetch_problems().await.map_err(|err| {
            tracing::warn!(error = %err, "Failed to fetch Codeforces problems");
            RelayError::UpstreamUnavailable {
                service: SERVICE_NAME,
                resource: "problems",
            }
        })?;

        let total = problems.len();
        let matching = filter_items(problems, |p| query.matches(p));
        tracing::debug!(
            total,
            matching = matching.len(),
            tag = ?query.tag,
            rating = ?query.rating,
            "Filtered Codeforces problems"
        );

        let matching = require_results(matching, NO_PROBLEMS_NOTICE)?;
        Ok(sample_random(matching, PROBLEM_SAMPLE_SIZE))
    }

    /// Contests that haven't finished yet, by descending hours remaining.
    pub async fn upcoming_contests(&self) -> Result<Vec<Contest>, RelayError> {
        let contests = self.client.fetch_contests().await.map_err(|err| {
            tracing::warn!(error = %err, "Failed to fetch Codeforces contests");
            RelayError::UpstreamUnavailable {
                service: SERVICE_NAME,
                resource: "contests",
            }
        })?;

        let upcoming = filter_items(contests, |c| c.phase.is_upcoming_or_running());
        let mut upcoming = require_results(upcoming, NO_CONTESTS_NOTICE)?;
        sort_items(
            &mut upcoming,
            |c| c.hours_remaining().unwrap_or(i64::MIN),
            SortDirection::Descending,
        );
        Ok(upcoming)
    }
}
