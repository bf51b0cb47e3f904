//! Core type definitions for the terminal front-end

use std::time::Instant;

use super::content::FormField;

/// Which panel of the UI currently has focus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveSection {
    #[default]
    Genres,
    Songs,
    Recommendations,
    Feedback,
    Form,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Genres => ActiveSection::Songs,
            ActiveSection::Songs => ActiveSection::Recommendations,
            ActiveSection::Recommendations => ActiveSection::Feedback,
            ActiveSection::Feedback => ActiveSection::Form,
            ActiveSection::Form => ActiveSection::Genres,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Genres => ActiveSection::Form,
            ActiveSection::Songs => ActiveSection::Genres,
            ActiveSection::Recommendations => ActiveSection::Songs,
            ActiveSection::Feedback => ActiveSection::Recommendations,
            ActiveSection::Form => ActiveSection::Feedback,
        }
    }
}

/// Row of the "Leave a Comment" form that has the cursor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormRow {
    #[default]
    Name,
    Email,
    Comments,
    Rating,
    Submit,
}

impl FormRow {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Comments,
            Self::Comments => Self::Rating,
            Self::Rating => Self::Submit,
            Self::Submit => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Submit,
            Self::Email => Self::Name,
            Self::Comments => Self::Email,
            Self::Rating => Self::Comments,
            Self::Submit => Self::Rating,
        }
    }

    /// The text field edited on this row, if it is one
    pub fn field(self) -> Option<FormField> {
        match self {
            Self::Name => Some(FormField::Name),
            Self::Email => Some(FormField::Email),
            Self::Comments => Some(FormField::Comments),
            Self::Rating | Self::Submit => None,
        }
    }
}

/// Severity of a transient notice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub genre_selected: usize,
    pub song_selected: usize,
    pub recommendation_selected: usize,
    pub feedback_selected: usize,
    pub form_row: FormRow,
    pub notice: Option<Notice>,
    pub notice_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_cycle_both_ways() {
        let mut section = ActiveSection::default();
        for _ in 0..5 {
            section = section.next();
        }
        assert_eq!(section, ActiveSection::Genres);
        assert_eq!(ActiveSection::Genres.prev(), ActiveSection::Form);
        assert_eq!(ActiveSection::Form.next().prev(), ActiveSection::Form);
    }

    #[test]
    fn only_text_rows_map_to_fields() {
        assert_eq!(FormRow::Email.field(), Some(FormField::Email));
        assert_eq!(FormRow::Rating.field(), None);
        assert_eq!(FormRow::Submit.next(), FormRow::Name);
    }
}
