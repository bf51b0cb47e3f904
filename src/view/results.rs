//! Recommendation panel

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, AppSnapshot};
use super::utils::{
    empty_item, item_style, panel_block, render_scrollable_list, status_item, status_title,
    truncate_string,
};

pub fn render_recommendations(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Results
            Constraint::Length(4), // Link of the highlighted clip
        ])
        .split(area);

    let ui = &snapshot.ui;
    let is_focused = ui.active_section == ActiveSection::Recommendations;
    let state = &snapshot.recommendations;
    let width = chunks[0].width.saturating_sub(10) as usize;

    let items: Vec<ListItem> = if !state.data.is_empty() {
        // Element 0 is the user's own pick, not a peer of the ranked results
        let mut items = Vec::with_capacity(state.data.len() + 1);
        if let Some(clip) = state.data.matching_clip() {
            items.push(
                ListItem::new(Line::from(vec![
                    Span::styled("Your selection  ", Style::default().fg(Color::Yellow)),
                    Span::raw(truncate_string(&clip.file_name, width)),
                ]))
                .style(item_style(ui.recommendation_selected == 0, is_focused)),
            );
        }
        items.extend(state.data.alternatives().iter().enumerate().map(|(i, clip)| {
            let rank = i + 1;
            ListItem::new(format!("{:>3}. {}", rank, truncate_string(&clip.file_name, width)))
                .style(item_style(ui.recommendation_selected == rank, is_focused))
        }));
        items
    } else if let Some(item) = status_item(state) {
        vec![item]
    } else {
        vec![empty_item("Select a song and press g to get recommendations")]
    };

    let title = if state.data.is_empty() {
        " Recommendations ".to_string()
    } else {
        format!(" Recommendations ({}) ", state.data.alternatives().len())
    };
    let mut block = panel_block(&title, is_focused);
    if !state.data.is_empty() {
        if let Some(status) = status_title(state) {
            block = block.title_bottom(status);
        }
    }
    render_scrollable_list(frame, chunks[0], items, ui.recommendation_selected, block);

    let link = state
        .data
        .get(ui.recommendation_selected)
        .map(|clip| clip.link.as_str())
        .unwrap_or("");
    let link = Paragraph::new(link.to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Link "));
    frame.render_widget(link, chunks[1]);
}
