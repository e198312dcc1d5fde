use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::codeforces::{CodeforcesClient, CodeforcesError, Contest, ContestPhase, Problem};

pub const DEFAULT_BASE_URL: &str = "https://codeforces.com/api";

/// Client for the two public Codeforces endpoints the bot reads.
pub struct CodeforcesApiClient {
    client: Client,
    base_url: String,
}

impl CodeforcesApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, CodeforcesError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_static("CodeA2ZBot/1.0"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CodeforcesError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{base}/{method}` and unwrap the `{status, comment, result}` envelope.
    async fn call<T: DeserializeOwned>(&self, method: &str) -> Result<T, CodeforcesError> {
        let url = format!("{}/{}", self.base_url, method);
        tracing::debug!(%url, "Requesting Codeforces API");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CodeforcesError::Transport(e.to_string()))?;

        if resp.status() != StatusCode::OK {
            return Err(CodeforcesError::Status(resp.status().as_u16()));
        }

        let envelope: ApiEnvelope<T> = resp
            .json()
            .await
            .map_err(|e| CodeforcesError::Decode(e.to_string()))?;

        if envelope.status != "OK" {
            return Err(CodeforcesError::Rejected(
                envelope.comment.unwrap_or(envelope.status),
            ));
        }

        envelope
            .result
            .ok_or_else(|| CodeforcesError::Decode(format!("{} returned no result", method)))
    }

    fn map_problem(api: ApiProblem) -> Problem {
        Problem {
            contest_id: api.contest_id,
            index: api.index.unwrap_or_default(),
            name: api.name.unwrap_or_else(|| "Untitled problem".to_string()),
            tags: api.tags.unwrap_or_default(),
            rating: api.rating,
            problem_type: api.problem_type,
        }
    }

    fn map_contest(api: ApiContest) -> Contest {
        Contest {
            id: api.id,
            name: api.name.unwrap_or_else(|| format!("Contest {}", api.id)),
            contest_type: api.contest_type.unwrap_or_else(|| "Unknown".to_string()),
            phase: api
                .phase
                .as_deref()
                .map(ContestPhase::from_api)
                .unwrap_or(ContestPhase::Unknown),
            start_time_seconds: api.start_time_seconds,
            duration_seconds: api.duration_seconds.unwrap_or_default(),
            relative_time_seconds: api.relative_time_seconds,
        }
    }
}

#[async_trait]
impl CodeforcesClient for CodeforcesApiClient {
    async fn fetch_problems(&self) -> Result<Vec<Problem>, CodeforcesError> {
        let result: ApiProblemset = self.call("problemset.problems").await?;
        let problems: Vec<Problem> = result.problems.into_iter().map(Self::map_problem).collect();
        tracing::info!(count = problems.len(), "Fetched Codeforces problemset");
        Ok(problems)
    }

    async fn fetch_contests(&self) -> Result<Vec<Contest>, CodeforcesError> {
        let result: Vec<ApiContest> = self.call("contest.list").await?;
        let contests: Vec<Contest> = result.into_iter().map(Self::map_contest).collect();
        tracing::info!(count = contests.len(), "Fetched Codeforces contest list");
        Ok(contests)
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    comment: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiProblemset {
    #[serde(default)]
    problems: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiProblem {
    contest_id: Option<u64>,
    index: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    problem_type: Option<String>,
    rating: Option<u32>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiContest {
    id: u64,
    name: Option<String>,
    #[serde(rename = "type")]
    contest_type: Option<String>,
    phase: Option<String>,
    duration_seconds: Option<i64>,
    start_time_seconds: Option<i64>,
    relative_time_seconds: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codeforces::{CodeforcesService, ProblemQuery};
    use crate::core::relay::RelayError;

    fn client_for(server: &mockito::Server) -> CodeforcesApiClient {
        CodeforcesApiClient::new(&server.url(), None).unwrap()
    }

    #[tokio::test]
    async fn fetch_problems_parses_problemset() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"status":"OK","result":{"problems":[
            {"contestId":1520,"index":"E","name":"Arranging The Sheep","type":"PROGRAMMING","rating":1400,"tags":["greedy","math"]},
            {"contestId":1,"index":"A","name":"Theatre Square","type":"PROGRAMMING","tags":[]}
        ],"problemStatistics":[]}}"#;

        server
            .mock("GET", "/problemset.problems")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let problems = client_for(&server).fetch_problems().await.unwrap();
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].contest_id, Some(1520));
        assert_eq!(problems[0].tags, vec!["greedy", "math"]);
        assert_eq!(problems[0].rating, Some(1400));
        assert_eq!(problems[1].rating, None);
    }

    #[tokio::test]
    async fn fetch_contests_maps_phases() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"status":"OK","result":[
            {"id":1901,"name":"Round A","type":"CF","phase":"BEFORE","frozen":false,"durationSeconds":7200,"startTimeSeconds":1700000000,"relativeTimeSeconds":-3600},
            {"id":1900,"name":"Round B","type":"ICPC","phase":"FINISHED","frozen":false,"durationSeconds":10800,"startTimeSeconds":1690000000,"relativeTimeSeconds":10000000}
        ]}"#;

        server
            .mock("GET", "/contest.list")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let contests = client_for(&server).fetch_contests().await.unwrap();
        assert_eq!(contests.len(), 2);
        assert_eq!(contests[0].phase, ContestPhase::Before);
        assert_eq!(contests[1].phase, ContestPhase::Finished);
        assert_eq!(contests[1].contest_type, "ICPC");
    }

    #[tokio::test]
    async fn non_ok_status_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/contest.list")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"FAILED","comment":"Call limit exceeded"}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch_contests().await.unwrap_err();
        assert!(matches!(err, CodeforcesError::Rejected(ref c) if c == "Call limit exceeded"));
    }

    #[tokio::test]
    async fn malformed_payload_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/problemset.problems")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = client_for(&server).fetch_problems().await.unwrap_err();
        assert!(matches!(err, CodeforcesError::Decode(_)));
    }

    #[tokio::test]
    async fn service_unavailable_reports_try_again_later() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/problemset.problems")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let service = CodeforcesService::new(client_for(&server));
        let query = ProblemQuery {
            tag: Some("dp".to_string()),
            rating: Some(1200),
        };
        let err = service.find_problems(&query).await.unwrap_err();

        assert_eq!(
            err,
            RelayError::UpstreamUnavailable {
                service: "Codeforces",
                resource: "problems"
            }
        );
        assert_eq!(
            err.notice(),
            "Failed to fetch problems from Codeforces API. Please try again later."
        );
        mock.assert_async().await;
    }
}
