//! Controller actions that start workflow requests.
//!
//! Each action runs the synchronous part of its workflow operation right
//! away and spawns the network part, so key presses are applied in order
//! while the UI keeps redrawing.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::ValidationError;
use crate::model::{ActiveSection, Genre, NoticeLevel};
use super::AppController;

const SUBMITTED_NOTICE: &str = "Thank you! Your feedback has been submitted.";

impl AppController {
    pub async fn load_genre(&self, genre: Genre) -> JoinHandle<()> {
        tracing::debug!(%genre, "Genre selected");
        self.model.focus_genre(genre).await;
        tokio::spawn(self.model.discovery.select_genre(genre))
    }

    /// Enter on the genre list
    pub async fn load_highlighted_genre(&self) -> JoinHandle<()> {
        let genre = self.model.highlighted_genre().await;
        self.load_genre(genre).await
    }

    /// Enter on the song list
    pub async fn select_highlighted_song(&self) {
        if let Some(song) = self.model.highlighted_song().await {
            if self.model.discovery.select_song(&song) {
                tracing::info!(song = %song, "Song selected");
            }
        }
    }

    /// Requests recommendations for the selected song.
    ///
    /// Returns `None` when nothing was started: a request is already
    /// loading, or no song is selected (a notice is shown instead).
    pub async fn generate_recommendations(&self) -> Option<JoinHandle<()>> {
        if self.model.recommendations.is_busy() {
            tracing::debug!("Generate ignored, recommendations still loading");
            return None;
        }

        let Some(song) = self.model.discovery.selected_song() else {
            self.model
                .set_notice(NoticeLevel::Error, ValidationError::NoSongSelected.to_string())
                .await;
            return None;
        };

        self.model.reset_recommendation_cursor().await;
        let request = self.model.recommendations.request_recommendations(&song);
        self.model.set_active_section(ActiveSection::Recommendations).await;
        Some(tokio::spawn(request))
    }

    pub fn refresh_feedback(&self) -> JoinHandle<()> {
        tokio::spawn(self.model.feedback.refresh())
    }

    /// Submits the form and reports the outcome as a notice
    pub fn submit_feedback(&self) -> JoinHandle<()> {
        let submission = self.model.feedback.submit_form();
        let model = Arc::clone(&self.model);

        tokio::spawn(async move {
            match submission.await {
                Ok(()) => model.set_notice(NoticeLevel::Info, SUBMITTED_NOTICE).await,
                Err(e) => model.set_notice(NoticeLevel::Error, e.to_string()).await,
            }
        })
    }

    /// Aborts every in-flight request
    pub fn cancel_requests(&self) {
        self.model.discovery.cancel();
        self.model.recommendations.cancel();
        self.model.feedback.cancel_refresh();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::{AppModel, FormField};
    use crate::test_support::{clip, entry, FakeApi};

    fn controller(api: &Arc<FakeApi>) -> AppController {
        let model = AppModel::new(api.clone(), Duration::from_secs(5), "http://127.0.0.1:5001");
        AppController::new(Arc::new(model))
    }

    #[tokio::test]
    async fn initialize_loads_blues_and_feedback() {
        let api = Arc::new(FakeApi::new());
        api.set_songs(Genre::Blues, vec!["blues.00000.wav".into()]);
        api.seed_feedback(vec![entry("1", "Al", 4)]);
        let controller = controller(&api);

        controller.initialize().await;

        let snapshot = controller.model.snapshot().await;
        assert_eq!(snapshot.discovery.genre, Some(Genre::Blues));
        assert_eq!(snapshot.discovery.songs.data.len(), 1);
        assert_eq!(snapshot.feedback.entries.data.len(), 1);
    }

    #[tokio::test]
    async fn generate_without_selection_shows_notice() {
        let api = Arc::new(FakeApi::new());
        let controller = controller(&api);

        let started = controller.generate_recommendations().await;

        assert!(started.is_none());
        assert_eq!(api.recommend_calls(), 0);
        let notice = controller.model.get_ui_state().await.notice.expect("notice shown");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Select a song first.");
    }

    #[tokio::test]
    async fn generate_uses_selected_song() {
        let api = Arc::new(FakeApi::new());
        api.set_songs(Genre::Jazz, vec!["a.wav".into(), "b.wav".into()]);
        api.set_recommendations("a.wav", vec![clip("a.wav"), clip("c.wav")]);
        let controller = controller(&api);

        controller.load_genre(Genre::Jazz).await.await.unwrap();
        controller.select_highlighted_song().await;
        let handle = controller.generate_recommendations().await.expect("request started");
        handle.await.unwrap();

        let snapshot = controller.model.snapshot().await;
        assert_eq!(snapshot.ui.active_section, ActiveSection::Recommendations);
        assert_eq!(snapshot.recommendations.data.len(), 2);
    }

    #[tokio::test]
    async fn submit_success_reports_and_refreshes() {
        let api = Arc::new(FakeApi::new());
        let controller = controller(&api);
        let feedback = &controller.model.feedback;
        feedback.set_field(FormField::Name, "Al");
        feedback.set_field(FormField::Email, "a@x.com");
        feedback.set_field(FormField::Comments, "Great");
        feedback.commit_rating(4);

        controller.submit_feedback().await.unwrap();

        assert_eq!(api.submit_calls(), 1);
        assert_eq!(api.list_feedback_calls(), 1);
        let snapshot = controller.model.snapshot().await;
        assert_eq!(snapshot.feedback.entries.data[0].name, "Al");
        assert_eq!(snapshot.ui.notice.map(|n| n.level), Some(NoticeLevel::Info));
    }

    #[tokio::test]
    async fn invalid_submit_reports_validation_message() {
        let api = Arc::new(FakeApi::new());
        let controller = controller(&api);

        controller.submit_feedback().await.unwrap();

        assert_eq!(api.submit_calls(), 0);
        let notice = controller.model.get_ui_state().await.notice.expect("notice shown");
        assert_eq!(notice.message, "Please fill in all fields.");
    }
}
