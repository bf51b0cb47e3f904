//! Request/response bookkeeping shared by the three workflows

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{ApiError, WorkflowError};

/// Public state of one request/response cycle.
///
/// `loading` and `error` are never both set once a request has settled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkflowState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<WorkflowError>,
}

impl<T> WorkflowState<T> {
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub(crate) fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.data = data;
        self.loading = false;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, error: WorkflowError) {
        self.loading = false;
        self.error = Some(error);
    }

    /// Back to idle without a result (the request was aborted)
    pub(crate) fn settle(&mut self) {
        self.loading = false;
    }
}

/// Stamp carried by one issued request
#[derive(Clone, Debug)]
pub(crate) struct Ticket {
    sequence: u64,
    token: CancellationToken,
}

impl Ticket {
    pub(crate) fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Issues monotonically increasing request stamps and remembers the abort
/// handle of the one request that is current.
#[derive(Debug, Default)]
pub(crate) struct RequestTracker {
    sequence: u64,
    in_flight: Option<CancellationToken>,
}

impl RequestTracker {
    /// Supersedes (and aborts) whatever was in flight
    pub(crate) fn issue(&mut self) -> Ticket {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.sequence += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        Ticket {
            sequence: self.sequence,
            token,
        }
    }

    pub(crate) fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.sequence == self.sequence && !ticket.token.is_cancelled()
    }

    /// Marks `ticket` finished. Returns false if its response is stale and must be dropped.
    pub(crate) fn complete(&mut self, ticket: &Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Aborts the current request. Returns whether one was in flight.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}

pub(crate) enum Outcome<T> {
    Finished(Result<T, ApiError>),
    Aborted,
}

/// Bounds `request` by `timeout`; expiry surfaces as [`ApiError::Timeout`]
pub(crate) async fn with_timeout<T, F>(timeout: Duration, request: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(timeout, request).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout(timeout)),
    }
}

/// Runs a request under its ticket: aborted as soon as the ticket is cancelled
pub(crate) async fn run_request<T, F>(ticket: &Ticket, timeout: Duration, request: F) -> Outcome<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;
        _ = ticket.token.cancelled() => Outcome::Aborted,
        result = with_timeout(timeout, request) => Outcome::Finished(result),
    }
}

/// Workflow state locks are never held across an await, so a poisoned lock
/// still holds consistent data.
pub(crate) fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
