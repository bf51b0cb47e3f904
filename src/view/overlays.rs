//! Overlay rendering (notices, help popup)

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{NoticeLevel, UiState};
use super::utils::centered_rect;

pub fn render_notice(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref notice) = ui_state.notice {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

        // Calculate how many lines the message will take when wrapped
        let line_count = notice.message.chars().count().div_ceil(inner_width) as u16;

        // Height: top border (1) + message lines + bottom border (1)
        let popup_height = (2 + line_count.max(1)).min(area.height.saturating_sub(4));

        let popup_area = centered_rect(area, popup_width, popup_height);

        let (color, title) = match notice.level {
            NoticeLevel::Info => (Color::Green, " Done (Esc to dismiss) "),
            NoticeLevel::Error => (Color::Red, " Error (Esc to dismiss) "),
        };

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let notice_widget = Paragraph::new(notice.message.clone())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title)
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(notice_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Load genre / Select song"),
        ("", ""),
        ("", "── Recommendations ──"),
        ("G", "Generate for selected song"),
        ("X", "Cancel pending requests"),
        ("", ""),
        ("", "── Feedback ──"),
        ("R", "Refresh feedback"),
        ("Enter", "Next field / Submit"),
        ("← / →", "Preview stars"),
        ("Enter / Space", "Pick rating"),
        ("Ctrl+S", "Submit feedback"),
        ("", ""),
        ("", "── General ──"),
        ("Esc", "Dismiss message"),
        ("H", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_area = centered_rect(
        area,
        62.min(area.width),
        (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4)),
    );
    frame.render_widget(Clear, popup_area);

    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);

    let lines: Vec<Line> = keybindings
        .into_iter()
        .map(|(key, desc)| match key {
            // Section header or spacer
            "" => Line::from(Span::styled(format!("{:^38}", desc), heading)),
            _ => Line::from(vec![
                Span::styled(format!("{:>18}", key), key_style),
                Span::raw("  "),
                Span::raw(desc),
            ]),
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );

    frame.render_widget(help_text, popup_area);
}
