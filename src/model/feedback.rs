//! Feedback list and the "leave a comment" form

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{self, BoxFuture, FutureExt};

use crate::error::{ValidationError, WorkflowError};
use super::api_client::RecommenderApi;
use super::content::{FeedbackEntry, FeedbackForm, FeedbackSubmission, FormField};
use super::workflow::{lock, run_request, with_timeout, Outcome, RequestTracker, WorkflowState};

const FETCH_ERROR: &str = "Unable to fetch feedback. Please try again later.";
const SUBMIT_ERROR: &str = "Unable to submit feedback. Please try again later.";

pub const MAX_STARS: u8 = 5;

/// Star selector with a hover preview kept apart from the committed value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StarRating {
    /// Stars highlighted while hovering; 0 when nothing is hovered
    pub preview: u8,
    /// Stars the user actually picked; this is what gets submitted
    pub committed: u8,
}

impl StarRating {
    /// What the selector shows: the preview while hovering, else the committed value
    pub fn displayed(&self) -> u8 {
        if self.preview > 0 { self.preview } else { self.committed }
    }

    pub fn is_lit(&self, star: u8) -> bool {
        star >= 1 && star <= self.displayed()
    }
}

/// Public state of the feedback section
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedbackState {
    /// Entries in backend order (newest first)
    pub entries: WorkflowState<Vec<FeedbackEntry>>,
    pub form: FeedbackForm,
    pub rating: StarRating,
    pub submitting: bool,
    /// Why the last submission was rejected or failed; the list refresh never touches it
    pub submit_error: Option<WorkflowError>,
}

#[derive(Default)]
struct Inner {
    state: FeedbackState,
    refreshes: RequestTracker,
}

/// Lists feedback and submits new entries.
///
/// A successful submission resets the form and then refreshes the list; a
/// failed one keeps whatever the user typed.
#[derive(Clone)]
pub struct FeedbackWorkflow {
    api: Arc<dyn RecommenderApi>,
    inner: Arc<Mutex<Inner>>,
    timeout: Duration,
}

impl FeedbackWorkflow {
    pub fn new(api: Arc<dyn RecommenderApi>, timeout: Duration) -> Self {
        Self {
            api,
            inner: Arc::new(Mutex::new(Inner::default())),
            timeout,
        }
    }

    /// Replaces the list with what the backend currently holds
    pub fn refresh(&self) -> BoxFuture<'static, ()> {
        let ticket = {
            let mut inner = lock(&self.inner);
            inner.state.entries.start();
            inner.refreshes.issue()
        };
        tracing::debug!(sequence = ticket.sequence(), "Refreshing feedback");

        let api = Arc::clone(&self.api);
        let inner = Arc::clone(&self.inner);
        let timeout = self.timeout;

        async move {
            let outcome = run_request(&ticket, timeout, api.list_feedback()).await;

            let mut guard = lock(&inner);
            let Outcome::Finished(result) = outcome else {
                tracing::debug!("Feedback refresh aborted");
                return;
            };
            if !guard.refreshes.complete(&ticket) {
                tracing::debug!(sequence = ticket.sequence(), "Discarding stale feedback list");
                return;
            }

            match result {
                Ok(entries) => {
                    tracing::info!(count = entries.len(), "Feedback loaded");
                    guard.state.entries.succeed(entries);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to fetch feedback");
                    guard.state.entries.fail(WorkflowError::network(FETCH_ERROR, e));
                }
            }
        }
        .boxed()
    }

    /// Validates and submits `submission`.
    ///
    /// Validation failures are recorded and returned without any request
    /// being made. On success the form and star rating are reset, then the
    /// list is refreshed once.
    pub fn submit(&self, submission: FeedbackSubmission) -> BoxFuture<'static, Result<(), WorkflowError>> {
        {
            let mut inner = lock(&self.inner);
            let check = if inner.state.submitting {
                Err(ValidationError::SubmissionInProgress)
            } else {
                submission.validate()
            };
            if let Err(e) = check {
                tracing::debug!(error = %e, "Feedback rejected before submission");
                let error = WorkflowError::from(e);
                inner.state.submit_error = Some(error.clone());
                return future::ready(Err(error)).boxed();
            }
            inner.state.submitting = true;
            inner.state.submit_error = None;
        }
        tracing::debug!(rating = submission.rating, "Submitting feedback");

        let this = self.clone();

        async move {
            let result = with_timeout(this.timeout, this.api.submit_feedback(&submission)).await;

            match result {
                Ok(()) => {
                    {
                        let mut inner = lock(&this.inner);
                        inner.state.submitting = false;
                        inner.state.form = FeedbackForm::default();
                        inner.state.rating = StarRating::default();
                    }
                    tracing::info!(rating = submission.rating, "Feedback submitted");
                    this.refresh().await;
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to submit feedback");
                    let error = WorkflowError::network(SUBMIT_ERROR, e);
                    let mut inner = lock(&this.inner);
                    inner.state.submitting = false;
                    inner.state.submit_error = Some(error.clone());
                    Err(error)
                }
            }
        }
        .boxed()
    }

    /// Submits what is currently in the form
    pub fn submit_form(&self) -> BoxFuture<'static, Result<(), WorkflowError>> {
        let submission = FeedbackSubmission::from(&lock(&self.inner).state.form);
        self.submit(submission)
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        *lock(&self.inner).state.form.field_mut(field) = value.into();
    }

    pub fn push_char(&self, field: FormField, c: char) {
        lock(&self.inner).state.form.field_mut(field).push(c);
    }

    pub fn pop_char(&self, field: FormField) {
        lock(&self.inner).state.form.field_mut(field).pop();
    }

    /// Hovering star `star`: highlight 1..=star without committing
    pub fn preview_rating(&self, star: u8) {
        lock(&self.inner).state.rating.preview = star.min(MAX_STARS);
    }

    /// Pointer left the stars
    pub fn clear_preview(&self) {
        lock(&self.inner).state.rating.preview = 0;
    }

    /// Picks `star` stars: the selector and the form's rating change together
    pub fn commit_rating(&self, star: u8) {
        let star = star.min(MAX_STARS);
        let mut inner = lock(&self.inner);
        inner.state.rating.committed = star;
        inner.state.form.rating = star;
    }

    pub fn displayed_rating(&self) -> u8 {
        lock(&self.inner).state.rating.displayed()
    }

    /// Drops the recorded submission error once the user has seen it
    pub fn dismiss_error(&self) {
        lock(&self.inner).state.submit_error = None;
    }

    pub fn cancel_refresh(&self) {
        let mut inner = lock(&self.inner);
        if inner.refreshes.cancel() {
            inner.state.entries.settle();
        }
    }

    pub fn snapshot(&self) -> FeedbackState {
        lock(&self.inner).state.clone()
    }
}
