//! Model module - Application state and data types
//!
//! Everything below the terminal front-end lives here, organized by
//! responsibility:
//!
//! - `catalog`: the fixed genre list
//! - `content`: songs, recommendations, feedback entries and the form
//! - `api_client`: the backend trait and its HTTP implementation
//! - `workflow`: request bookkeeping shared by the workflows
//! - `song_discovery`, `recommendation`, `feedback`: the three workflows
//! - `types`: front-end state (focus, cursors, notices)
//! - `app_model`: the application model the controller and view share

mod api_client;
mod app_model;
mod catalog;
mod content;
mod feedback;
mod recommendation;
mod song_discovery;
mod types;
mod workflow;

pub use api_client::{HttpApiClient, RecommenderApi};

pub use catalog::{Genre, GenreCatalog, UnknownGenre};

pub use content::{
    FeedbackEntry, FeedbackForm, FeedbackSubmission, FormField, Recommendation,
    Recommendations, Song,
};

pub use workflow::WorkflowState;
pub use song_discovery::{SongDiscoveryState, SongDiscoveryWorkflow};
pub use recommendation::RecommendationWorkflow;
pub use feedback::{FeedbackState, FeedbackWorkflow, StarRating, MAX_STARS};

pub use types::{ActiveSection, FormRow, Notice, NoticeLevel, UiState};

pub use app_model::{AppModel, AppSnapshot};
