/// Core functionality modules
///
/// Contains the generation pipeline: context collection, prompt assembly,
/// and writing the generated character into the vault.

pub mod context_collector;
pub mod note_writer;
pub mod notifier;
pub mod prompt_builder;

pub use context_collector::{ContextCollector, MAX_CONTEXT_CHARS, TRUNCATION_MARKER};
pub use note_writer::{GenerationOutcome, NoteWriter};
pub use notifier::{ConsoleNotifier, Notifier};
pub use prompt_builder::build_instructions;
