//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, FormRow};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Help popup swallows everything until closed
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        // Esc dismisses the notice first, then a lingering submission error
        if key.code == KeyCode::Esc {
            if model.has_notice().await {
                model.clear_notice().await;
            } else {
                model.feedback.dismiss_error();
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        if ui_state.active_section == ActiveSection::Form && self.handle_form_key(key, ui_state.form_row).await {
            return Ok(());
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Enter => match ui_state.active_section {
                ActiveSection::Genres => {
                    self.load_highlighted_genre().await;
                }
                ActiveSection::Songs => {
                    self.select_highlighted_song().await;
                }
                _ => {}
            },
            // Generate recommendations for the selected song
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.generate_recommendations().await;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.refresh_feedback();
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                self.cancel_requests();
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }

    /// Keys specific to the feedback form. Returns true when the key was consumed.
    async fn handle_form_key(&self, key: KeyEvent, row: FormRow) -> bool {
        let model = &self.model;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') if ctrl => {
                self.submit_feedback();
                return true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') if ctrl => {
                model.set_should_quit(true).await;
                return true;
            }
            _ => {}
        }

        if let Some(field) = row.field() {
            return match key.code {
                KeyCode::Char(c) if !ctrl => {
                    model.feedback.push_char(field, c);
                    true
                }
                KeyCode::Backspace => {
                    model.feedback.pop_char(field);
                    true
                }
                KeyCode::Enter => {
                    model.move_selection_down().await;
                    true
                }
                _ => false,
            };
        }

        match (row, key.code) {
            (FormRow::Rating, KeyCode::Left) => {
                model.step_rating_preview(false);
                true
            }
            (FormRow::Rating, KeyCode::Right) => {
                model.step_rating_preview(true);
                true
            }
            (FormRow::Rating, KeyCode::Enter | KeyCode::Char(' ')) => {
                model.commit_rating_preview();
                true
            }
            (FormRow::Submit, KeyCode::Enter) => {
                self.submit_feedback();
                true
            }
            _ => false,
        }
    }
}
