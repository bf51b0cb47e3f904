//! Scripted in-memory backend for unit tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::ApiError;
use crate::model::{FeedbackEntry, FeedbackSubmission, Genre, Recommendation, RecommenderApi, Song};

#[derive(Default)]
pub(crate) struct FakeApi {
    songs: Mutex<HashMap<Genre, Result<Vec<Song>, ApiError>>>,
    song_gates: Mutex<HashMap<Genre, Arc<Notify>>>,
    hanging_genres: Mutex<HashSet<Genre>>,
    recommendations: Mutex<HashMap<Song, Result<Vec<Recommendation>, ApiError>>>,
    recommendation_gate: Mutex<Option<Arc<Notify>>>,
    feedback: Mutex<Vec<FeedbackEntry>>,
    feedback_failure: Mutex<Option<ApiError>>,
    submit_failure: Mutex<Option<ApiError>>,
    hanging_submit: AtomicBool,
    song_calls: AtomicUsize,
    recommend_calls: AtomicUsize,
    list_feedback_calls: AtomicUsize,
    submit_calls: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_songs(&self, genre: Genre, songs: Vec<Song>) {
        self.songs.lock().unwrap().insert(genre, Ok(songs));
    }

    pub(crate) fn fail_songs(&self, genre: Genre, error: ApiError) {
        self.songs.lock().unwrap().insert(genre, Err(error));
    }

    pub(crate) fn songs_for(&self, genre: Genre) -> Vec<Song> {
        match self.songs.lock().unwrap().get(&genre) {
            Some(Ok(songs)) => songs.clone(),
            _ => Vec::new(),
        }
    }

    /// Holds the response for `genre` until the returned notifier fires
    pub(crate) fn gate_songs(&self, genre: Genre) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.song_gates.lock().unwrap().insert(genre, gate.clone());
        gate
    }

    /// Requests for `genre` never resolve
    pub(crate) fn hang_songs(&self, genre: Genre) {
        self.hanging_genres.lock().unwrap().insert(genre);
    }

    pub(crate) fn set_recommendations(&self, song: &str, items: Vec<Recommendation>) {
        self.recommendations.lock().unwrap().insert(song.to_string(), Ok(items));
    }

    pub(crate) fn fail_recommendations(&self, song: &str, error: ApiError) {
        self.recommendations.lock().unwrap().insert(song.to_string(), Err(error));
    }

    pub(crate) fn gate_recommendations(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.recommendation_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub(crate) fn seed_feedback(&self, entries: Vec<FeedbackEntry>) {
        *self.feedback.lock().unwrap() = entries;
    }

    pub(crate) fn fail_feedback(&self, error: Option<ApiError>) {
        *self.feedback_failure.lock().unwrap() = error;
    }

    pub(crate) fn fail_submit(&self, error: Option<ApiError>) {
        *self.submit_failure.lock().unwrap() = error;
    }

    /// Submissions never resolve
    pub(crate) fn hang_submit(&self) {
        self.hanging_submit.store(true, Ordering::SeqCst);
    }

    pub(crate) fn song_calls(&self) -> usize {
        self.song_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn recommend_calls(&self) -> usize {
        self.recommend_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn list_feedback_calls(&self) -> usize {
        self.list_feedback_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn entry(id: &str, name: &str, rating: u8) -> FeedbackEntry {
    FeedbackEntry {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        comments: format!("comment from {name}"),
        rating,
        timestamp: "2024-11-02T10:15:30".to_string(),
    }
}

pub(crate) fn clip(name: &str) -> Recommendation {
    Recommendation {
        file_name: name.to_string(),
        link: format!("/f/{name}"),
    }
}

#[async_trait]
impl RecommenderApi for FakeApi {
    async fn list_songs(&self, genre: Genre) -> Result<Vec<Song>, ApiError> {
        self.song_calls.fetch_add(1, Ordering::SeqCst);

        let hangs = self.hanging_genres.lock().unwrap().contains(&genre);
        if hangs {
            std::future::pending::<()>().await;
        }
        let gate = self.song_gates.lock().unwrap().get(&genre).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.songs
            .lock()
            .unwrap()
            .get(&genre)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn recommend(&self, song: &str) -> Result<Vec<Recommendation>, ApiError> {
        self.recommend_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.recommendation_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.recommendations
            .lock()
            .unwrap()
            .get(song)
            .cloned()
            .unwrap_or(Err(ApiError::Status(404)))
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackEntry>, ApiError> {
        self.list_feedback_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.feedback_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self.feedback.lock().unwrap().clone())
    }

    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> Result<(), ApiError> {
        let n = self.submit_calls.fetch_add(1, Ordering::SeqCst) + 1;

        if self.hanging_submit.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        if let Some(error) = self.submit_failure.lock().unwrap().clone() {
            return Err(error);
        }

        // Newest first, as the backend sorts by timestamp descending
        let mut stored = entry(&format!("fb-{n}"), &submission.name, submission.rating);
        stored.email = Some(submission.email.clone());
        stored.comments = submission.comments.clone();
        self.feedback.lock().unwrap().insert(0, stored);
        Ok(())
    }
}
