#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod api;
pub mod assistants;
pub mod auth;
pub mod config;
pub mod error;
pub mod messages;
pub mod orchestrator;
pub mod runs;
pub mod shutdown;
pub mod stores;
pub mod transcribe;

pub use config::Config;
pub use error::{R2g2Error, Result};
pub use orchestrator::{Orchestrator, RunOutput, RunRequest};
