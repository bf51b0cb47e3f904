//! Genre → song list discovery

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};

use crate::error::WorkflowError;
use super::api_client::RecommenderApi;
use super::catalog::{Genre, GenreCatalog};
use super::content::Song;
use super::workflow::{lock, run_request, Outcome, RequestTracker, WorkflowState};

const SONGS_ERROR: &str = "Unable to load songs. Please try again later.";

/// Public state of song discovery
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongDiscoveryState {
    /// Genre most recently requested
    pub genre: Option<Genre>,
    pub songs: WorkflowState<Vec<Song>>,
    pub selected_song: Option<Song>,
}

#[derive(Default)]
struct Inner {
    state: SongDiscoveryState,
    requests: RequestTracker,
}

/// Fetches the songs of a genre and owns the song selection.
///
/// Changing genre invalidates the previous list and selection immediately;
/// only the response for the most recently requested genre is applied.
#[derive(Clone)]
pub struct SongDiscoveryWorkflow {
    api: Arc<dyn RecommenderApi>,
    inner: Arc<Mutex<Inner>>,
    timeout: Duration,
}

impl SongDiscoveryWorkflow {
    pub fn new(api: Arc<dyn RecommenderApi>, timeout: Duration) -> Self {
        Self {
            api,
            inner: Arc::new(Mutex::new(Inner::default())),
            timeout,
        }
    }

    /// Startup step: load the default genre so the list opens populated
    pub fn initialize(&self) -> BoxFuture<'static, ()> {
        self.select_genre(GenreCatalog::default_genre())
    }

    /// Switches to `genre` and fetches its songs.
    ///
    /// The selection, list and error are reset before this returns; the
    /// returned future performs the fetch.
    pub fn select_genre(&self, genre: Genre) -> BoxFuture<'static, ()> {
        let ticket = {
            let mut inner = lock(&self.inner);
            inner.state.genre = Some(genre);
            inner.state.selected_song = None;
            inner.state.songs.data.clear();
            inner.state.songs.start();
            inner.requests.issue()
        };
        tracing::debug!(%genre, sequence = ticket.sequence(), "Loading songs for genre");

        let api = Arc::clone(&self.api);
        let inner = Arc::clone(&self.inner);
        let timeout = self.timeout;

        async move {
            let outcome = run_request(&ticket, timeout, api.list_songs(genre)).await;

            let mut guard = lock(&inner);
            let result = match outcome {
                Outcome::Aborted => {
                    tracing::debug!(%genre, sequence = ticket.sequence(), "Song request aborted");
                    return;
                }
                Outcome::Finished(result) => result,
            };
            if !guard.requests.complete(&ticket) {
                tracing::debug!(%genre, sequence = ticket.sequence(), "Discarding stale song list");
                return;
            }

            match result {
                Ok(songs) => {
                    tracing::info!(%genre, count = songs.len(), "Songs loaded");
                    guard.state.songs.succeed(songs);
                }
                Err(e) => {
                    tracing::error!(%genre, error = %e, "Failed to load songs");
                    guard.state.songs.data.clear();
                    guard.state.songs.fail(WorkflowError::network(SONGS_ERROR, e));
                }
            }
        }
        .boxed()
    }

    /// Selects a song from the current list. Returns false if it is not in the list.
    pub fn select_song(&self, song: &str) -> bool {
        let mut inner = lock(&self.inner);
        if !inner.state.songs.data.iter().any(|s| s == song) {
            tracing::debug!(song, "Ignoring selection of song outside current list");
            return false;
        }
        inner.state.selected_song = Some(song.to_string());
        true
    }

    pub fn selected_song(&self) -> Option<Song> {
        lock(&self.inner).state.selected_song.clone()
    }

    /// Aborts the in-flight song request, if any
    pub fn cancel(&self) {
        let mut inner = lock(&self.inner);
        if inner.requests.cancel() {
            inner.state.songs.settle();
            tracing::debug!("Song request cancelled");
        }
    }

    pub fn snapshot(&self) -> SongDiscoveryState {
        lock(&self.inner).state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ErrorKind};
    use crate::test_support::FakeApi;

    fn workflow(api: &Arc<FakeApi>) -> SongDiscoveryWorkflow {
        SongDiscoveryWorkflow::new(api.clone(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn every_genre_loads_its_fetched_songs() {
        let api = Arc::new(FakeApi::new());
        for genre in Genre::ALL {
            api.set_songs(genre, vec![format!("{genre}.00001.wav"), format!("{genre}.00002.wav")]);
        }
        api.set_songs(Genre::Pop, vec![]);
        let discovery = workflow(&api);

        for genre in Genre::ALL {
            discovery.select_genre(genre).await;
            let state = discovery.snapshot();
            assert_eq!(state.genre, Some(genre));
            assert_eq!(state.songs.data, api.songs_for(genre));
            assert!(!state.songs.loading);
            assert!(state.songs.error.is_none());
        }
    }

    #[tokio::test]
    async fn jazz_scenario() {
        let api = Arc::new(FakeApi::new());
        api.set_songs(Genre::Jazz, vec!["a.wav".into(), "b.wav".into()]);
        let discovery = workflow(&api);

        discovery.select_genre(Genre::Jazz).await;

        let state = discovery.snapshot();
        assert_eq!(state.songs.data, vec!["a.wav".to_string(), "b.wav".to_string()]);
        assert!(!state.songs.loading);
        assert_eq!(state.songs.error, None);
    }

    #[tokio::test]
    async fn genre_change_clears_selection_before_fetching() {
        let api = Arc::new(FakeApi::new());
        api.set_songs(Genre::Blues, vec!["blues.1.wav".into()]);
        api.set_songs(Genre::Rock, vec!["rock.1.wav".into()]);
        let discovery = workflow(&api);

        discovery.initialize().await;
        assert!(discovery.select_song("blues.1.wav"));

        let pending = discovery.select_genre(Genre::Rock);
        let state = discovery.snapshot();
        assert_eq!(state.selected_song, None);
        assert!(state.songs.data.is_empty());
        assert!(state.songs.loading);

        pending.await;
        assert_eq!(discovery.snapshot().songs.data, vec!["rock.1.wav".to_string()]);
        assert_eq!(discovery.selected_song(), None);
    }

    #[tokio::test]
    async fn initialize_uses_first_catalog_genre() {
        let api = Arc::new(FakeApi::new());
        api.set_songs(Genre::Blues, vec!["blues.00000.wav".into()]);
        let discovery = workflow(&api);

        discovery.initialize().await;

        assert_eq!(discovery.snapshot().genre, Some(Genre::Blues));
        assert_eq!(api.song_calls(), 1);
    }

    #[tokio::test]
    async fn failure_sets_error_and_leaves_list_empty() {
        let api = Arc::new(FakeApi::new());
        api.fail_songs(Genre::Metal, ApiError::Status(404));
        let discovery = workflow(&api);

        discovery.select_genre(Genre::Metal).await;

        let state = discovery.snapshot();
        assert!(state.songs.data.is_empty());
        assert!(!state.songs.loading);
        let error = state.songs.error.expect("error recorded");
        assert_eq!(error.kind(), ErrorKind::Network);
        assert_eq!(error.to_string(), SONGS_ERROR);
    }

    #[tokio::test]
    async fn error_is_cleared_by_next_genre_selection() {
        let api = Arc::new(FakeApi::new());
        api.fail_songs(Genre::Metal, ApiError::Transport("refused".into()));
        api.set_songs(Genre::Disco, vec!["d.wav".into()]);
        let discovery = workflow(&api);

        discovery.select_genre(Genre::Metal).await;
        let pending = discovery.select_genre(Genre::Disco);
        assert!(discovery.snapshot().songs.error.is_none());
        pending.await;

        assert_eq!(discovery.snapshot().songs.data, vec!["d.wav".to_string()]);
    }

    #[tokio::test]
    async fn stale_response_never_overwrites_newer_genre() {
        let api = Arc::new(FakeApi::new());
        api.set_songs(Genre::Jazz, vec!["jazz.wav".into()]);
        api.set_songs(Genre::Rock, vec!["rock.wav".into()]);
        let jazz_gate = api.gate_songs(Genre::Jazz);
        let discovery = workflow(&api);

        let jazz = discovery.select_genre(Genre::Jazz);
        let rock = discovery.select_genre(Genre::Rock);

        let release = async {
            rock.await;
            jazz_gate.notify_one();
        };
        tokio::join!(jazz, release);

        let state = discovery.snapshot();
        assert_eq!(state.genre, Some(Genre::Rock));
        assert_eq!(state.songs.data, vec!["rock.wav".to_string()]);
        assert!(!state.songs.loading);
    }

    #[tokio::test]
    async fn select_song_rejects_unknown_songs() {
        let api = Arc::new(FakeApi::new());
        api.set_songs(Genre::Blues, vec!["a.wav".into()]);
        let discovery = workflow(&api);
        discovery.initialize().await;

        assert!(!discovery.select_song("zzz.wav"));
        assert_eq!(discovery.selected_song(), None);
        assert!(discovery.select_song("a.wav"));
        assert_eq!(discovery.selected_song(), Some("a.wav".to_string()));
    }

    #[tokio::test]
    async fn timeout_becomes_network_error() {
        let api = Arc::new(FakeApi::new());
        api.hang_songs(Genre::Reggae);
        let discovery = SongDiscoveryWorkflow::new(api.clone(), Duration::from_millis(30));

        discovery.select_genre(Genre::Reggae).await;

        let state = discovery.snapshot();
        assert!(!state.songs.loading);
        assert!(state.songs.error.as_ref().is_some_and(WorkflowError::is_timeout));
    }

    #[tokio::test]
    async fn cancel_settles_without_error() {
        let api = Arc::new(FakeApi::new());
        api.hang_songs(Genre::Country);
        let discovery = workflow(&api);

        let pending = discovery.select_genre(Genre::Country);
        discovery.cancel();
        pending.await;

        let state = discovery.snapshot();
        assert!(!state.songs.loading);
        assert!(state.songs.error.is_none());
    }
}
