//! Data returned by the recommendation backend and sent back to it

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// A song identifier (the audio file name the backend knows it by)
pub type Song = String;

/// A playable clip returned by the recommender
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub file_name: String,
    pub link: String,
}

/// Ordered recommendation results.
///
/// Element 0 is the clip matching the song the user picked; the rest are
/// ranked alternatives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recommendations(Vec<Recommendation>);

impl Recommendations {
    pub fn new(items: Vec<Recommendation>) -> Self {
        Self(items)
    }

    /// The clip for the selected song itself
    pub fn matching_clip(&self) -> Option<&Recommendation> {
        self.0.first()
    }

    /// Ranked recommendations, excluding the matching clip
    pub fn alternatives(&self) -> &[Recommendation] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[Recommendation] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Recommendation> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Recommendation>> for Recommendations {
    fn from(items: Vec<Recommendation>) -> Self {
        Self(items)
    }
}

/// A stored feedback record, as the backend lists it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    #[serde(rename = "FeedbackID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Comments")]
    pub comments: String,
    #[serde(rename = "Rating", deserialize_with = "deserialize_rating")]
    pub rating: u8,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,
}

impl FeedbackEntry {
    /// Submission time, when the backend timestamp parses
    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        self.timestamp
            .parse::<NaiveDateTime>()
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.timestamp)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
    }
}

/// Ratings come back either as numbers or as numeric strings
fn deserialize_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Number(f64),
        Text(String),
    }

    let value = match RawRating::deserialize(deserializer)? {
        RawRating::Number(n) => n,
        RawRating::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom)?,
    };
    Ok(value.round().clamp(0.0, 5.0) as u8)
}

/// Text inputs of the feedback form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Comments,
}

/// What the user has typed into the feedback form so far
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub name: String,
    pub email: String,
    pub comments: String,
    pub rating: u8,
}

impl FeedbackForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Comments => &self.comments,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Comments => &mut self.comments,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body of a feedback creation request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackSubmission {
    pub name: String,
    pub email: String,
    pub comments: String,
    pub rating: u8,
}

impl FeedbackSubmission {
    /// Checks done before anything is sent
    pub fn validate(&self) -> Result<(), ValidationError> {
        let blank = |s: &str| s.trim().is_empty();
        if blank(&self.name) || blank(&self.email) || blank(&self.comments) || self.rating == 0 {
            return Err(ValidationError::MissingFields);
        }
        if self.rating > 5 {
            return Err(ValidationError::InvalidRating(self.rating));
        }
        if !self.email.contains('@') || !self.email.contains('.') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

impl From<&FeedbackForm> for FeedbackSubmission {
    fn from(form: &FeedbackForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            comments: form.comments.clone(),
            rating: form.rating,
        }
    }
}
