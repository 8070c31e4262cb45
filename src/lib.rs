/// character-creator library
///
/// Generates fantasy characters into a notes vault, using the notes in
/// chosen folders as context.

pub mod config;
pub mod core;
pub mod error;
pub mod llm;
pub mod settings;
pub mod vault;

// Re-exports for convenience
pub use config::AppConfig;
pub use error::{CreatorError, Result};
pub use settings::{Settings, SettingsStore};
