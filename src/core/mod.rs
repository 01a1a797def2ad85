pub mod input;
pub mod organizer;
pub mod prompt;

pub use crate::domain::model::{
    DurationPreset, ItineraryResult, PromptRequest, RawItineraryInput, TripDuration,
};
pub use crate::domain::ports::{CompletionClient, ConfigProvider};
pub use crate::utils::error::Result;
