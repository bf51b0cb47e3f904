//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::api_client::RecommenderApi;
use super::catalog::{Genre, GenreCatalog};
use super::content::{Recommendations, Song};
use super::feedback::{FeedbackState, FeedbackWorkflow, MAX_STARS};
use super::recommendation::RecommendationWorkflow;
use super::song_discovery::{SongDiscoveryState, SongDiscoveryWorkflow};
use super::types::{ActiveSection, FormRow, Notice, NoticeLevel, UiState};
use super::workflow::WorkflowState;

const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Everything the view needs for one frame
#[derive(Clone, Debug)]
pub struct AppSnapshot {
    pub discovery: SongDiscoveryState,
    pub recommendations: WorkflowState<Recommendations>,
    pub feedback: FeedbackState,
    pub ui: UiState,
    pub api_url: String,
}

/// Main application model: the three workflows plus front-end state
pub struct AppModel {
    pub discovery: SongDiscoveryWorkflow,
    pub recommendations: RecommendationWorkflow,
    pub feedback: FeedbackWorkflow,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
    api_url: String,
}

impl AppModel {
    pub fn new(api: Arc<dyn RecommenderApi>, request_timeout: Duration, api_url: impl Into<String>) -> Self {
        Self {
            discovery: SongDiscoveryWorkflow::new(Arc::clone(&api), request_timeout),
            recommendations: RecommendationWorkflow::new(Arc::clone(&api), request_timeout),
            feedback: FeedbackWorkflow::new(api, request_timeout),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
            api_url: api_url.into(),
        }
    }

    /// Collects the workflows' public state with cursors clamped to the lists
    pub async fn snapshot(&self) -> AppSnapshot {
        let discovery = self.discovery.snapshot();
        let recommendations = self.recommendations.snapshot();
        let feedback = self.feedback.snapshot();

        let mut ui = self.ui_state.lock().await.clone();
        ui.genre_selected = ui.genre_selected.min(GenreCatalog::len().saturating_sub(1));
        ui.song_selected = ui.song_selected.min(discovery.songs.data.len().saturating_sub(1));
        ui.recommendation_selected = ui
            .recommendation_selected
            .min(recommendations.data.len().saturating_sub(1));
        ui.feedback_selected = ui.feedback_selected.min(feedback.entries.data.len().saturating_sub(1));

        AppSnapshot {
            discovery,
            recommendations,
            feedback,
            ui,
            api_url: self.api_url.clone(),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        let next = state.active_section.next();
        self.leave_section(&mut state, next);
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        let prev = state.active_section.prev();
        self.leave_section(&mut state, prev);
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        self.leave_section(&mut state, section);
    }

    fn leave_section(&self, state: &mut UiState, to: ActiveSection) {
        if state.active_section == ActiveSection::Form && to != ActiveSection::Form {
            self.feedback.clear_preview();
        }
        state.active_section = to;
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Genres => {
                state.genre_selected = state.genre_selected.saturating_sub(1);
            }
            ActiveSection::Songs => {
                state.song_selected = state.song_selected.saturating_sub(1);
            }
            ActiveSection::Recommendations => {
                state.recommendation_selected = state.recommendation_selected.saturating_sub(1);
            }
            ActiveSection::Feedback => {
                state.feedback_selected = state.feedback_selected.saturating_sub(1);
            }
            ActiveSection::Form => {
                let row = state.form_row.prev();
                self.move_form_row(&mut state, row);
            }
        }
    }

    pub async fn move_selection_down(&self) {
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Genres => {
                if state.genre_selected + 1 < GenreCatalog::len() {
                    state.genre_selected += 1;
                }
            }
            ActiveSection::Songs => {
                let len = self.discovery.snapshot().songs.data.len();
                if state.song_selected + 1 < len {
                    state.song_selected += 1;
                }
            }
            ActiveSection::Recommendations => {
                let len = self.recommendations.snapshot().data.len();
                if state.recommendation_selected + 1 < len {
                    state.recommendation_selected += 1;
                }
            }
            ActiveSection::Feedback => {
                let len = self.feedback.snapshot().entries.data.len();
                if state.feedback_selected + 1 < len {
                    state.feedback_selected += 1;
                }
            }
            ActiveSection::Form => {
                let row = state.form_row.next();
                self.move_form_row(&mut state, row);
            }
        }
    }

    fn move_form_row(&self, state: &mut UiState, row: FormRow) {
        if state.form_row == FormRow::Rating && row != FormRow::Rating {
            self.feedback.clear_preview();
        }
        state.form_row = row;
    }

    /// Genre under the cursor in the genre list
    pub async fn highlighted_genre(&self) -> Genre {
        let index = self.ui_state.lock().await.genre_selected;
        GenreCatalog::get(index).unwrap_or_else(GenreCatalog::default_genre)
    }

    /// Song under the cursor in the song list
    pub async fn highlighted_song(&self) -> Option<Song> {
        let index = self.ui_state.lock().await.song_selected;
        self.discovery.snapshot().songs.data.get(index).cloned()
    }

    /// Cursor onto `genre`, song cursor back to the top (a new list is incoming)
    pub async fn focus_genre(&self, genre: Genre) {
        let mut state = self.ui_state.lock().await;
        state.genre_selected = genre.index();
        state.song_selected = 0;
    }

    pub async fn reset_recommendation_cursor(&self) {
        self.ui_state.lock().await.recommendation_selected = 0;
    }

    pub async fn form_row(&self) -> FormRow {
        self.ui_state.lock().await.form_row
    }

    /// Moves the hover preview one star left or right, staying within 1..=5
    pub fn step_rating_preview(&self, forward: bool) {
        let current = self.feedback.displayed_rating();
        let star = if forward {
            (current + 1).min(MAX_STARS)
        } else {
            current.saturating_sub(1).max(1)
        };
        self.feedback.preview_rating(star);
    }

    /// Commits whatever the selector currently shows
    pub fn commit_rating_preview(&self) {
        let star = self.feedback.displayed_rating().max(1);
        self.feedback.commit_rating(star);
        self.feedback.clear_preview();
    }

    pub async fn set_notice(&self, level: NoticeLevel, message: impl Into<String>) {
        let mut state = self.ui_state.lock().await;
        state.notice = Some(Notice {
            level,
            message: message.into(),
        });
        state.notice_timestamp = Some(Instant::now());
    }

    pub async fn clear_notice(&self) {
        let mut state = self.ui_state.lock().await;
        state.notice = None;
        state.notice_timestamp = None;
    }

    pub async fn has_notice(&self) -> bool {
        self.ui_state.lock().await.notice.is_some()
    }

    pub async fn auto_clear_old_notices(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.notice_timestamp {
            if timestamp.elapsed() > NOTICE_TTL {
                state.notice = None;
                state.notice_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{clip, FakeApi};

    fn model(api: &Arc<FakeApi>) -> AppModel {
        AppModel::new(api.clone(), Duration::from_secs(5), "http://127.0.0.1:5001")
    }

    #[tokio::test]
    async fn genre_cursor_stays_in_catalog() {
        let api = Arc::new(FakeApi::new());
        let model = model(&api);

        model.move_selection_up().await;
        assert_eq!(model.highlighted_genre().await, Genre::Blues);

        for _ in 0..20 {
            model.move_selection_down().await;
        }
        assert_eq!(model.highlighted_genre().await, Genre::Pop);
    }

    #[tokio::test]
    async fn song_cursor_is_bounded_by_loaded_list() {
        let api = Arc::new(FakeApi::new());
        api.set_songs(Genre::Blues, vec!["a.wav".into(), "b.wav".into()]);
        let model = model(&api);
        model.discovery.initialize().await;
        model.set_active_section(ActiveSection::Songs).await;

        for _ in 0..5 {
            model.move_selection_down().await;
        }

        assert_eq!(model.highlighted_song().await.as_deref(), Some("b.wav"));
    }

    #[tokio::test]
    async fn snapshot_clamps_cursor_after_list_shrinks() {
        let api = Arc::new(FakeApi::new());
        api.set_recommendations("a.wav", vec![clip("a.wav"), clip("b.wav"), clip("c.wav")]);
        api.set_recommendations("z.wav", vec![clip("z.wav")]);
        let model = model(&api);
        model.recommendations.request_recommendations("a.wav").await;
        model.set_active_section(ActiveSection::Recommendations).await;
        model.move_selection_down().await;
        model.move_selection_down().await;

        model.recommendations.request_recommendations("z.wav").await;

        assert_eq!(model.snapshot().await.ui.recommendation_selected, 0);
    }

    #[tokio::test]
    async fn leaving_rating_row_clears_preview() {
        let api = Arc::new(FakeApi::new());
        let model = model(&api);
        model.set_active_section(ActiveSection::Form).await;
        for _ in 0..3 {
            model.move_selection_down().await;
        }
        assert_eq!(model.form_row().await, FormRow::Rating);

        model.step_rating_preview(true);
        model.step_rating_preview(true);
        assert_eq!(model.feedback.snapshot().rating.preview, 2);

        model.move_selection_down().await;
        let rating = model.feedback.snapshot().rating;
        assert_eq!(rating.preview, 0);
        assert_eq!(rating.committed, 0);
    }

    #[tokio::test]
    async fn commit_takes_the_previewed_star() {
        let api = Arc::new(FakeApi::new());
        let model = model(&api);

        for _ in 0..7 {
            model.step_rating_preview(true);
        }
        model.commit_rating_preview();

        let state = model.feedback.snapshot();
        assert_eq!(state.rating.committed, MAX_STARS);
        assert_eq!(state.rating.preview, 0);
        assert_eq!(state.form.rating, MAX_STARS);
    }

    #[tokio::test]
    async fn stale_notice_is_cleared() {
        let api = Arc::new(FakeApi::new());
        let model = model(&api);
        model.set_notice(NoticeLevel::Info, "Feedback submitted").await;

        model.auto_clear_old_notices().await;
        assert!(model.has_notice().await);

        model.ui_state.lock().await.notice_timestamp = Instant::now().checked_sub(Duration::from_secs(6));
        model.auto_clear_old_notices().await;
        assert!(!model.has_notice().await);
    }
}
