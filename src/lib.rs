pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

pub use adapters::GeminiClient;
pub use config::{AppConfig, CliConfig};
pub use crate::core::{input::ItineraryForm, organizer::ItineraryService};
pub use utils::error::{OrganizerError, Result};
