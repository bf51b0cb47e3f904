//! Feedback list and the "Leave a Comment" form

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{ListItem, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, AppSnapshot, FormField, FormRow};
use super::utils::{
    empty_item, format_timestamp, item_style, panel_block, render_scrollable_list, stars,
    status_item, status_title, truncate_string,
};

pub fn render_feedback_panel(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),     // Feedback list
            Constraint::Length(8), // Form: 5 rows + hint + borders
        ])
        .split(area);

    render_feedback_list(frame, chunks[0], snapshot);
    render_form(frame, chunks[1], snapshot);
}

fn render_feedback_list(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let ui = &snapshot.ui;
    let is_focused = ui.active_section == ActiveSection::Feedback;
    let entries = &snapshot.feedback.entries;
    let width = area.width.saturating_sub(4) as usize;

    // Earlier entries stay listed while a refresh runs or after one fails
    let items: Vec<ListItem> = if !entries.data.is_empty() {
        entries
            .data
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = item_style(i == ui.feedback_selected, is_focused);
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(entry.name.clone(), style),
                        Span::raw("  "),
                        Span::styled(stars(entry.rating), Style::default().fg(Color::Yellow)),
                        Span::styled(
                            format!("  {}", format_timestamp(entry)),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                    Line::from(Span::raw(format!("  {}", truncate_string(&entry.comments, width.saturating_sub(2))))),
                ])
            })
            .collect()
    } else if let Some(item) = status_item(entries) {
        vec![item]
    } else {
        vec![empty_item("No feedback yet. Be the first!")]
    };

    let title = format!(" Feedback ({}) ", entries.data.len());
    let mut block = panel_block(&title, is_focused);
    if !entries.data.is_empty() {
        if let Some(status) = status_title(entries) {
            block = block.title_bottom(status);
        }
    }
    render_scrollable_list(frame, area, items, ui.feedback_selected, block);
}

fn render_form(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let ui = &snapshot.ui;
    let is_focused = ui.active_section == ActiveSection::Form;
    let feedback = &snapshot.feedback;
    let width = area.width.saturating_sub(16) as usize;

    let label_style = |row: FormRow| {
        if is_focused && ui.form_row == row {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let cursor = |row: FormRow| if is_focused && ui.form_row == row { "▏" } else { "" };

    let text_rows = [
        (FormRow::Name, FormField::Name, "Name"),
        (FormRow::Email, FormField::Email, "Email"),
        (FormRow::Comments, FormField::Comments, "Comments"),
    ];
    let mut lines: Vec<Line> = text_rows
        .into_iter()
        .map(|(row, field, label)| {
            let value = feedback.form.field(field);
            // Keep the end of long input visible while typing
            let len = value.chars().count();
            let shown: String = value.chars().skip(len.saturating_sub(width)).collect();
            Line::from(vec![
                Span::styled(format!("{:>9}: ", label), label_style(row)),
                Span::raw(shown),
                Span::styled(cursor(row), Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    // Stars show the hover preview while on the rating row
    let rating = feedback.rating;
    lines.push(Line::from(vec![
        Span::styled(format!("{:>9}: ", "Rating"), label_style(FormRow::Rating)),
        Span::styled(stars(rating.displayed()), Style::default().fg(Color::Yellow)),
        Span::styled(
            if rating.preview > 0 && rating.preview != rating.committed {
                "  (Enter to pick)"
            } else {
                ""
            },
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let submit_text = if feedback.submitting { "[ Submitting... ]" } else { "[ Submit ]" };
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(11)),
        Span::styled(submit_text, label_style(FormRow::Submit)),
    ]));

    lines.push(match &feedback.submit_error {
        Some(error) => Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(
            "↑↓ rows · ←→ stars · Ctrl+S submit",
            Style::default().fg(Color::DarkGray),
        )),
    });

    let form = Paragraph::new(lines).block(panel_block(" Leave a Comment ", is_focused));
    frame.render_widget(form, area);
}
