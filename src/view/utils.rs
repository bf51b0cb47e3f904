//! Utility functions for rendering UI components

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Padding},
    Frame,
};

use crate::model::{FeedbackEntry, WorkflowState, MAX_STARS};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// `width` x `height` box in the middle of `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

pub fn panel_block(title: &str, is_focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused))
}

/// Style of a list row: the cursor row is bold, and green while the list has focus
pub fn item_style(is_cursor: bool, is_focused: bool) -> Style {
    if is_cursor && is_focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if is_cursor {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn status_text<T>(state: &WorkflowState<T>) -> Option<(String, Color)> {
    if state.loading {
        Some(("Loading...".to_string(), Color::Yellow))
    } else {
        state.error_message().map(|message| (message, Color::Red))
    }
}

/// Placeholder row for a list with nothing to show yet
pub fn status_item<T>(state: &WorkflowState<T>) -> Option<ListItem<'static>> {
    status_text(state).map(|(text, color)| ListItem::new(text).style(Style::default().fg(color)))
}

/// Loading or error marker for the panel border, so rows already shown stay visible
pub fn status_title<T>(state: &WorkflowState<T>) -> Option<Line<'static>> {
    status_text(state).map(|(text, color)| Line::styled(format!(" {text} "), Style::default().fg(color)))
}

pub fn empty_item(text: &str) -> ListItem<'static> {
    ListItem::new(text.to_string()).style(Style::default().fg(Color::DarkGray))
}

/// `★★★☆☆` for 3 of 5
pub fn stars(lit: u8) -> String {
    (1..=MAX_STARS)
        .map(|star| if star <= lit { '★' } else { '☆' })
        .collect()
}

pub fn format_timestamp(entry: &FeedbackEntry) -> String {
    match entry.submitted_at() {
        Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
        None => entry.timestamp.clone(),
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}
