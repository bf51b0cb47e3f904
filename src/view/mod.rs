//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! Everything is drawn from one [`AppSnapshot`] per frame.
//!
//! - `utils`: Shared helpers (list rendering, styles, stars)
//! - `layout`: Top bar and the genre/song column
//! - `results`: Recommendation panel
//! - `feedback`: Feedback list and form
//! - `status`: Bottom activity bar
//! - `overlays`: Notices and the help popup

mod utils;
mod layout;
mod results;
mod feedback;
mod status;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::AppSnapshot;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, snapshot: &AppSnapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Selection + backend
                Constraint::Min(0),    // Panels
                Constraint::Length(3), // Activity
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], snapshot);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(28), // Genres + songs
                Constraint::Percentage(36), // Recommendations
                Constraint::Percentage(36), // Feedback
            ])
            .split(chunks[1]);

        layout::render_sidebar(frame, main_chunks[0], snapshot);
        results::render_recommendations(frame, main_chunks[1], snapshot);
        feedback::render_feedback_panel(frame, main_chunks[2], snapshot);

        status::render_status_bar(frame, chunks[2], snapshot);

        if snapshot.ui.notice.is_some() {
            overlays::render_notice(frame, &snapshot.ui);
        }

        if snapshot.ui.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
