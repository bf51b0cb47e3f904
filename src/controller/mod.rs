//! Controller module - Application logic and event handling
//!
//! The controller turns user input into workflow operations. It is organized
//! into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `workflows`: Actions that start workflow requests in the background

mod input;
mod workflows;

use std::sync::Arc;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
}

impl AppController {
    pub fn new(model: Arc<AppModel>) -> Self {
        Self { model }
    }

    /// Startup: load the default genre and the feedback list side by side
    pub async fn initialize(&self) {
        tracing::info!("Loading initial songs and feedback");
        futures::join!(self.model.discovery.initialize(), self.model.feedback.refresh());
    }
}
