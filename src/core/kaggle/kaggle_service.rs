use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::kaggle_models::{Competition, CompetitionSort, Dataset};
use crate::core::query::{require_results, sample_random, sort_items, SortDirection};
use crate::core::relay::RelayError;

/// Competitions shown per `/kaggle_competitions` invocation.
pub const COMPETITION_LIMIT: usize = 5;
/// Random datasets picked per `/kaggle_datasets` invocation.
pub const DATASET_SAMPLE_SIZE: usize = 5;
/// Result pages fetched per dataset search.
pub const DATASET_PAGES: u32 = 2;

const NO_COMPETITIONS_NOTICE: &str = "No competitions found.";

/// Errors raised by the Kaggle client. Their text is shown to users verbatim.
#[derive(Debug, Error)]
pub enum KaggleError {
    #[error("Kaggle returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request to Kaggle failed: {0}")]
    Transport(String),
    #[error("unexpected Kaggle response: {0}")]
    Decode(String),
}

/// The slice of the Kaggle API the bot uses.
#[async_trait]
pub trait KaggleClient: Send + Sync {
    async fn list_competitions(
        &self,
        sort_by: CompetitionSort,
    ) -> Result<Vec<Competition>, KaggleError>;
    async fn list_datasets(&self, search: &str, page: u32) -> Result<Vec<Dataset>, KaggleError>;
}

pub struct KaggleService<C: KaggleClient> {
    client: C,
}

impl<C: KaggleClient> KaggleService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The five competitions with the nearest deadlines.
    pub async fn latest_competitions(&self) -> Result<Vec<Competition>, RelayError> {
        let competitions = self
            .client
            .list_competitions(CompetitionSort::LatestDeadline)
            .await
            .map_err(|err| client_error("Kaggle competitions", err))?;

        let mut competitions = require_results(competitions, NO_COMPETITIONS_NOTICE)?;
        // Competitions without a deadline go last.
        sort_items(
            &mut competitions,
            |c| c.deadline.unwrap_or(DateTime::<Utc>::MAX_UTC),
            SortDirection::Ascending,
        );
        competitions.truncate(COMPETITION_LIMIT);
        Ok(competitions)
    }

    /// Up to five random datasets matching `query`, most downloaded first.
    pub async fn search_datasets(&self, query: &str) -> Result<Vec<Dataset>, RelayError> {
        let mut datasets = Vec::new();
        for page in 1..=DATASET_PAGES {
            let batch = self
                .client
                .list_datasets(query, page)
                .await
                .map_err(|err| client_error("Kaggle datasets", err))?;
            tracing::debug!(query, page, count = batch.len(), "Fetched Kaggle dataset page");
            datasets.extend(batch);
        }

        let datasets = require_results(datasets, format!("No datasets found for '{}'.", query))?;
        let mut picked = sample_random(datasets, DATASET_SAMPLE_SIZE);
        sort_items(&mut picked, |d| d.download_count, SortDirection::Descending);
        Ok(picked)
    }
}

fn client_error(resource: &'static str, err: KaggleError) -> RelayError {
    tracing::warn!(resource, error = %err, "Kaggle client call failed");
    RelayError::UpstreamClientError {
        resource,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeKaggle {
        competitions: Vec<Competition>,
        pages: Vec<Vec<Dataset>>,
        fail_with: Option<String>,
        requested_pages: Mutex<Vec<(String, u32)>>,
    }

    #[async_trait]
    impl KaggleClient for FakeKaggle {
        async fn list_competitions(
            &self,
            sort_by: CompetitionSort,
        ) -> Result<Vec<Competition>, KaggleError> {
            assert_eq!(sort_by, CompetitionSort::LatestDeadline);
            match &self.fail_with {
                Some(msg) => Err(KaggleError::Transport(msg.clone())),
                None => Ok(self.competitions.clone()),
            }
        }

        async fn list_datasets(
            &self,
            search: &str,
            page: u32,
        ) -> Result<Vec<Dataset>, KaggleError> {
            self.requested_pages
                .lock()
                .unwrap()
                .push((search.to_string(), page));
            if let Some(msg) = &self.fail_with {
                return Err(KaggleError::Transport(msg.clone()));
            }
            Ok(self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn competition(title: &str, day: Option<u32>) -> Competition {
        Competition {
            title: title.to_string(),
            description: None,
            deadline: day.map(|d| Utc.with_ymd_and_hms(2030, 1, d, 23, 59, 0).unwrap()),
            category: Some("Featured".to_string()),
            url: format!("https://www.kaggle.com/competitions/{title}"),
        }
    }

    fn dataset(title: &str, downloads: u64) -> Dataset {
        Dataset {
            title: title.to_string(),
            description: None,
            url: format!("https://www.kaggle.com/datasets/{title}"),
            total_bytes: 1024,
            last_updated: None,
            download_count: downloads,
        }
    }

    #[tokio::test]
    async fn competitions_sorted_by_deadline_and_capped() {
        let service = KaggleService::new(FakeKaggle {
            competitions: vec![
                competition("late", Some(20)),
                competition("undated", None),
                competition("first", Some(1)),
                competition("mid", Some(10)),
                competition("second", Some(2)),
                competition("third", Some(3)),
                competition("last", Some(28)),
            ],
            ..Default::default()
        });

        let titles: Vec<_> = service
            .latest_competitions()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third", "mid", "late"]);
    }

    #[tokio::test]
    async fn no_competitions_is_empty_result() {
        let service = KaggleService::new(FakeKaggle::default());
        assert_eq!(
            service.latest_competitions().await.unwrap_err(),
            RelayError::EmptyResult("No competitions found.".to_string())
        );
    }

    #[tokio::test]
    async fn client_errors_are_reported_verbatim() {
        let service = KaggleService::new(FakeKaggle {
            fail_with: Some("401 Unauthorized".to_string()),
            ..Default::default()
        });

        let err = service.latest_competitions().await.unwrap_err();
        assert_eq!(
            err.notice(),
            "An error occurred while fetching Kaggle competitions: request to Kaggle failed: 401 Unauthorized"
        );
    }

    #[tokio::test]
    async fn datasets_fetch_two_pages_and_sort_by_downloads() {
        let service = KaggleService::new(FakeKaggle {
            pages: vec![
                vec![dataset("a", 10), dataset("b", 300)],
                vec![dataset("c", 42)],
            ],
            ..Default::default()
        });

        let picked = service.search_datasets("titanic").await.unwrap();
        let downloads: Vec<_> = picked.iter().map(|d| d.download_count).collect();
        assert_eq!(downloads, vec![300, 42, 10]);
        assert_eq!(
            *service.client.requested_pages.lock().unwrap(),
            vec![("titanic".to_string(), 1), ("titanic".to_string(), 2)]
        );
    }

    #[tokio::test]
    async fn datasets_sample_at_most_five() {
        let service = KaggleService::new(FakeKaggle {
            pages: vec![
                (0..20).map(|i| dataset(&format!("p1-{i}"), i)).collect(),
                (0..20).map(|i| dataset(&format!("p2-{i}"), 100 + i)).collect(),
            ],
            ..Default::default()
        });

        let picked = service.search_datasets("weather").await.unwrap();
        assert_eq!(picked.len(), 5);
        assert!(picked
            .windows(2)
            .all(|w| w[0].download_count >= w[1].download_count));
    }

    #[tokio::test]
    async fn empty_search_names_the_query() {
        let service = KaggleService::new(FakeKaggle::default());

        let err = service.search_datasets("zzzz").await.unwrap_err();
        assert_eq!(err.notice(), "No datasets found for 'zzzz'.");
        assert_eq!(service.client.requested_pages.lock().unwrap().len(), 2);
    }
}
