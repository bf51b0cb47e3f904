//! Recommendation backend API: the trait the workflows talk to and its HTTP implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::{log_api_request, log_api_result};
use super::catalog::Genre;
use super::content::{FeedbackEntry, FeedbackSubmission, Recommendation, Song};

const USER_AGENT: &str = concat!("playlist-rs/", env!("CARGO_PKG_VERSION"));

/// Operations the backend offers. Workflows only ever see this trait.
#[async_trait]
pub trait RecommenderApi: Send + Sync {
    /// `GET /api/genre/{genre}/songs`
    async fn list_songs(&self, genre: Genre) -> Result<Vec<Song>, ApiError>;

    /// `POST /api/recommendations`
    async fn recommend(&self, song: &str) -> Result<Vec<Recommendation>, ApiError>;

    /// `GET /api/feedback`
    async fn list_feedback(&self) -> Result<Vec<FeedbackEntry>, ApiError>;

    /// `POST /api/feedback`
    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct SongsResponse {
    #[serde(default)]
    songs: Vec<Song>,
}

#[derive(Serialize)]
struct RecommendationRequest<'a> {
    audio_path: &'a str,
}

#[derive(Deserialize)]
struct RecommendationsResponse {
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

#[derive(Deserialize)]
struct FeedbackListResponse {
    #[serde(default)]
    feedback: Vec<FeedbackEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct SubmitReceipt {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "FeedbackID", default)]
    feedback_id: Option<String>,
}

/// [`RecommenderApi`] over HTTP/JSON
#[derive(Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::debug!(base_url = %base_url, ?timeout, "HTTP API client initialized");

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::Transport(error.to_string())
        }
    }

    /// Sends the request and returns the raw response if its status is a success
    async fn send(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                operation,
                status = status.as_u16(),
                body = %body,
                "API returned non-success status"
            );
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout(self.timeout)
                } else {
                    ApiError::Decode(e.to_string())
                }
            })
    }
}

#[async_trait]
impl RecommenderApi for HttpApiClient {
    async fn list_songs(&self, genre: Genre) -> Result<Vec<Song>, ApiError> {
        let url = self.endpoint(&["api", "genre", genre.as_str(), "songs"])?;
        log_api_request!("list_songs", url = %url, %genre);

        let result = self
            .send_json::<SongsResponse>("list_songs", self.http.get(url))
            .await
            .map(|body| body.songs);
        log_api_result!("list_songs", result);
        result
    }

    async fn recommend(&self, song: &str) -> Result<Vec<Recommendation>, ApiError> {
        let url = self.endpoint(&["api", "recommendations"])?;
        log_api_request!("recommend", url = %url, song);

        let request = self
            .http
            .post(url)
            .json(&RecommendationRequest { audio_path: song });
        let result = self
            .send_json::<RecommendationsResponse>("recommend", request)
            .await
            .map(|body| body.recommendations);
        log_api_result!("recommend", result);
        result
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackEntry>, ApiError> {
        let url = self.endpoint(&["api", "feedback"])?;
        log_api_request!("list_feedback", url = %url);

        let result = self
            .send_json::<FeedbackListResponse>("list_feedback", self.http.get(url))
            .await
            .map(|body| body.feedback);
        log_api_result!("list_feedback", result);
        result
    }

    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "feedback"])?;
        log_api_request!("submit_feedback", url = %url, rating = submission.rating);

        let result = match self
            .send("submit_feedback", self.http.post(url).json(submission))
            .await
        {
            Ok(response) => {
                // The confirmation body is optional; only log what we can read of it.
                let body = response.text().await.unwrap_or_default();
                let receipt: SubmitReceipt = serde_json::from_str(&body).unwrap_or_default();
                tracing::debug!(
                    feedback_id = receipt.feedback_id.as_deref().unwrap_or("-"),
                    message = receipt.message.as_deref().unwrap_or("-"),
                    "Feedback accepted"
                );
                Ok(())
            }
            Err(e) => Err(e),
        };
        log_api_result!("submit_feedback", result);
        result
    }
}
