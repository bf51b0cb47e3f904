//! Bottom status bar

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::AppSnapshot;

pub fn render_status_bar(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let busy = Style::default().fg(Color::Yellow);
    let idle = Style::default().fg(Color::DarkGray);

    let activity = |label: &'static str, loading: bool| {
        Span::styled(format!(" {} {} ", if loading { "⟳" } else { "·" }, label), if loading { busy } else { idle })
    };

    let status = Line::from(vec![
        activity("songs", snapshot.discovery.songs.loading),
        activity("recommendations", snapshot.recommendations.loading),
        activity("feedback", snapshot.feedback.entries.loading || snapshot.feedback.submitting),
    ]);

    let hints = Line::from(" Tab sections | g generate | r refresh | h help | q quit ").right_aligned();

    let bar = Paragraph::new(status).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Activity ")
            .title_bottom(hints),
    );
    frame.render_widget(bar, area);
}
