//! Terminal client for the audio-similarity playlist generator.
//!
//! The library holds everything below the terminal front-end:
//!
//! - `model`: genre catalog, API client, the three request workflows and
//!   the application model the view renders from
//! - `controller`: maps user actions onto workflow operations
//! - `view`: ratatui rendering of an [`model::AppSnapshot`]
//! - `config` / `logging`: ambient setup used by the binary

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;
