//! Similarity recommendations for a selected song

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{self, BoxFuture, FutureExt};

use crate::error::WorkflowError;
use super::api_client::RecommenderApi;
use super::content::Recommendations;
use super::workflow::{lock, run_request, Outcome, RequestTracker, WorkflowState};

const RECOMMENDATIONS_ERROR: &str = "Unable to fetch recommendations. Please try again later.";

#[derive(Default)]
struct Inner {
    state: WorkflowState<Recommendations>,
    requests: RequestTracker,
}

/// Requests recommendations for one song at a time.
///
/// The trigger is disabled while a request is loading: further calls are
/// ignored until it settles. A failed request keeps the previous results.
#[derive(Clone)]
pub struct RecommendationWorkflow {
    api: Arc<dyn RecommenderApi>,
    inner: Arc<Mutex<Inner>>,
    timeout: Duration,
}

impl RecommendationWorkflow {
    pub fn new(api: Arc<dyn RecommenderApi>, timeout: Duration) -> Self {
        Self {
            api,
            inner: Arc::new(Mutex::new(Inner::default())),
            timeout,
        }
    }

    /// Asks the backend for songs similar to `song`.
    ///
    /// No-op for an empty song or while a previous request is loading.
    pub fn request_recommendations(&self, song: &str) -> BoxFuture<'static, ()> {
        if song.trim().is_empty() {
            tracing::debug!("No song selected, not requesting recommendations");
            return future::ready(()).boxed();
        }

        let ticket = {
            let mut inner = lock(&self.inner);
            if inner.state.loading {
                tracing::debug!(song, "Recommendation request already in flight");
                return future::ready(()).boxed();
            }
            inner.state.start();
            inner.requests.issue()
        };
        tracing::debug!(song, sequence = ticket.sequence(), "Requesting recommendations");

        let api = Arc::clone(&self.api);
        let inner = Arc::clone(&self.inner);
        let timeout = self.timeout;
        let song = song.to_string();

        async move {
            let outcome = run_request(&ticket, timeout, api.recommend(&song)).await;

            let mut guard = lock(&inner);
            let result = match outcome {
                Outcome::Aborted => {
                    tracing::debug!(song = %song, "Recommendation request aborted");
                    return;
                }
                Outcome::Finished(result) => result,
            };
            if !guard.requests.complete(&ticket) {
                tracing::debug!(song = %song, "Discarding stale recommendations");
                return;
            }

            match result {
                Ok(items) => {
                    tracing::info!(song = %song, count = items.len(), "Recommendations received");
                    guard.state.succeed(Recommendations::new(items));
                }
                Err(e) => {
                    tracing::error!(song = %song, error = %e, "Failed to fetch recommendations");
                    guard
                        .state
                        .fail(WorkflowError::network(RECOMMENDATIONS_ERROR, e));
                }
            }
        }
        .boxed()
    }

    /// Whether the trigger is currently disabled
    pub fn is_busy(&self) -> bool {
        lock(&self.inner).state.loading
    }

    /// Aborts the in-flight request; previous results stay
    pub fn cancel(&self) {
        let mut inner = lock(&self.inner);
        if inner.requests.cancel() {
            inner.state.settle();
            tracing::debug!("Recommendation request cancelled");
        }
    }

    pub fn snapshot(&self) -> WorkflowState<Recommendations> {
        lock(&self.inner).state.clone()
    }
}
