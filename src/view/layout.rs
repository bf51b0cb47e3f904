//! Layout rendering (top bar, genre and song lists)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, AppSnapshot, GenreCatalog};
use super::utils::{
    empty_item, item_style, panel_block, render_scrollable_list, status_item, truncate_string,
};

pub fn render_top_bar(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Current selection
            Constraint::Length(34), // Backend
        ])
        .split(area);

    let selection = match (&snapshot.discovery.genre, &snapshot.discovery.selected_song) {
        (_, Some(song)) => Line::from(vec![
            Span::raw("Song: "),
            Span::styled(song.clone(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled("  (g to generate)", Style::default().fg(Color::DarkGray)),
        ]),
        (Some(genre), None) => Line::from(vec![
            Span::raw("Genre: "),
            Span::styled(genre.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled("  Pick a song and press Enter", Style::default().fg(Color::DarkGray)),
        ]),
        (None, None) => Line::from(Span::styled(
            "Pick a genre to begin",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let title = Paragraph::new(selection).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Playlist Generator ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(title, chunks[0]);

    let backend_width = chunks[1].width.saturating_sub(4) as usize;
    let backend = Paragraph::new(truncate_string(&snapshot.api_url, backend_width))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Backend "));
    frame.render_widget(backend, chunks[1]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let genre_rows = GenreCatalog::len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(genre_rows), // All genres + 2 borderlines
            Constraint::Min(0),             // Songs fill remaining space
        ])
        .split(area);

    render_genres(frame, chunks[0], snapshot);
    render_songs(frame, chunks[1], snapshot);
}

fn render_genres(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let ui = &snapshot.ui;
    let is_focused = ui.active_section == ActiveSection::Genres;

    let items: Vec<ListItem> = GenreCatalog::genres()
        .iter()
        .enumerate()
        .map(|(i, genre)| {
            let marker = if snapshot.discovery.genre == Some(*genre) { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, genre)).style(item_style(i == ui.genre_selected, is_focused))
        })
        .collect();

    render_scrollable_list(frame, area, items, ui.genre_selected, panel_block(" Genres ", is_focused));
}

fn render_songs(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let ui = &snapshot.ui;
    let is_focused = ui.active_section == ActiveSection::Songs;
    let songs = &snapshot.discovery.songs;
    let width = area.width.saturating_sub(6) as usize;

    let title = match snapshot.discovery.genre {
        Some(genre) => format!(" Songs · {} ({}) ", genre, songs.data.len()),
        None => " Songs ".to_string(),
    };

    let items: Vec<ListItem> = if let Some(item) = status_item(songs) {
        vec![item]
    } else if songs.data.is_empty() {
        vec![empty_item("No songs in this genre")]
    } else {
        songs
            .data
            .iter()
            .enumerate()
            .map(|(i, song)| {
                let is_selected = snapshot.discovery.selected_song.as_deref() == Some(song.as_str());
                let marker = if is_selected { "♪ " } else { "  " };
                let style = item_style(i == ui.song_selected, is_focused);
                let style = if is_selected { style.fg(Color::Cyan) } else { style };
                ListItem::new(format!("{}{}", marker, truncate_string(song, width))).style(style)
            })
            .collect()
    };

    render_scrollable_list(frame, area, items, ui.song_selected, panel_block(&title, is_focused));
}
