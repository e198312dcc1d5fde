use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::kaggle::{Competition, CompetitionSort, Dataset, KaggleClient, KaggleError};

pub const DEFAULT_BASE_URL: &str = "https://www.kaggle.com/api/v1";

const SITE_URL: &str = "https://www.kaggle.com";
/// Longest error body echoed back to users.
const MAX_ERROR_BODY: usize = 200;

/// Kaggle REST client authenticated with a username and API key.
pub struct KaggleApiClient {
    client: Client,
    base_url: String,
    username: String,
    key: String,
}

impl KaggleApiClient {
    pub fn new(
        base_url: &str,
        username: String,
        key: String,
        timeout: Option<Duration>,
    ) -> Result<Self, KaggleError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_static("CodeA2ZBot/1.0"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| KaggleError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            key,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/{}", self.base_url, path))
            .basic_auth(&self.username, Some(&self.key))
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, KaggleError> {
        let resp = req
            .send()
            .await
            .map_err(|e| KaggleError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let mut body = resp.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
                body.push_str("...");
            }
            return Err(KaggleError::Status { status, body });
        }

        resp.json()
            .await
            .map_err(|e| KaggleError::Decode(e.to_string()))
    }

    fn map_competition(api: ApiCompetition) -> Competition {
        let url = api
            .url
            .filter(|u| !u.is_empty())
            .or_else(|| api.reference.as_deref().map(competition_url))
            .unwrap_or_else(|| format!("{}/competitions", SITE_URL));

        Competition {
            title: api
                .title
                .unwrap_or_else(|| "Untitled competition".to_string()),
            description: api.description,
            deadline: parse_timestamp(api.deadline.as_deref()),
            category: api.category,
            url,
        }
    }

    fn map_dataset(api: ApiDataset) -> Dataset {
        let url = api
            .url
            .filter(|u| !u.is_empty())
            .or_else(|| api.reference.as_deref().map(dataset_url))
            .unwrap_or_else(|| format!("{}/datasets", SITE_URL));

        Dataset {
            title: api.title.unwrap_or_else(|| "Untitled dataset".to_string()),
            description: api
                .description
                .filter(|d| !d.trim().is_empty())
                .or(api.subtitle),
            url,
            total_bytes: api.total_bytes.unwrap_or_default(),
            last_updated: parse_timestamp(api.last_updated.as_deref()),
            download_count: api.download_count.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl KaggleClient for KaggleApiClient {
    async fn list_competitions(
        &self,
        sort_by: CompetitionSort,
    ) -> Result<Vec<Competition>, KaggleError> {
        tracing::debug!(sort_by = sort_by.as_api_str(), "Requesting Kaggle competitions");
        let req = self
            .get("competitions/list")
            .query(&[("sortBy", sort_by.as_api_str()), ("page", "1")]);

        let competitions: Vec<ApiCompetition> = self.send_json(req).await?;
        Ok(competitions
            .into_iter()
            .map(Self::map_competition)
            .collect())
    }

    async fn list_datasets(&self, search: &str, page: u32) -> Result<Vec<Dataset>, KaggleError> {
        tracing::debug!(search, page, "Requesting Kaggle datasets");
        let page = page.to_string();
        let req = self
            .get("datasets/list")
            .query(&[("search", search), ("page", page.as_str())]);

        let datasets: Vec<ApiDataset> = self.send_json(req).await?;
        Ok(datasets.into_iter().map(Self::map_dataset).collect())
    }
}

fn competition_url(reference: &str) -> String {
    if reference.starts_with("http") {
        reference.to_string()
    } else {
        format!("{}/competitions/{}", SITE_URL, reference)
    }
}

fn dataset_url(reference: &str) -> String {
    if reference.starts_with("http") {
        reference.to_string()
    } else {
        format!("{}/datasets/{}", SITE_URL, reference)
    }
}

/// Kaggle emits both RFC 3339 and zone-less ISO timestamps; the latter are UTC.
fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCompetition {
    #[serde(rename = "ref")]
    reference: Option<String>,
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    deadline: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiDataset {
    #[serde(rename = "ref")]
    reference: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    description: Option<String>,
    url: Option<String>,
    total_bytes: Option<u64>,
    last_updated: Option<String>,
    download_count: Option<u64>,
}
