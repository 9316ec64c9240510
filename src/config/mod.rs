//! Configuration module for Podnews.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{NewsPrompts, Prompts};
pub use settings::{
    AudioSettings, CaptionSettings, Capabilities, Credentials, GeneralSettings,
    GenerationSettings, PromptSettings, ServerSettings, Settings, SpeechSettings,
};
