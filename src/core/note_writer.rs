// Creates a character note in a folder
//
// Collect context, build instructions, generate, write. Every failure ends in
// a notification; nothing propagates out of create_character.

use crate::core::context_collector::ContextCollector;
use crate::core::notifier::Notifier;
use crate::core::prompt_builder::build_instructions;
use crate::error::Result;
use crate::llm::{CharacterGenerator, GeneratedCharacter};
use crate::settings::Settings;
use crate::vault::{FolderNode, NoteTree};
use std::sync::Arc;
use tracing::{error, info};

pub const MSG_STARTED: &str = "Creating a character for you.";
pub const MSG_EMPTY: &str = "Failed to generate a character for you.";
pub const MSG_FAILED: &str = "Error creating character note.";

/// How a generation request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Note written at `path`
    Created { name: String, path: String },
    /// The generator produced nothing usable
    Empty,
    /// Context, generation, or the write failed
    Failed(String),
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Created { .. })
    }
}

pub struct NoteWriter {
    tree: Arc<dyn NoteTree>,
    generator: Arc<dyn CharacterGenerator>,
    notifier: Arc<dyn Notifier>,
}

impl NoteWriter {
    pub fn new(
        tree: Arc<dyn NoteTree>,
        generator: Arc<dyn CharacterGenerator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            tree,
            generator,
            notifier,
        }
    }

    /// Generate a character and write it into `target`
    ///
    /// The note is named after the character and holds the raw description.
    /// The settings template is not applied here.
    pub async fn create_character(
        &self,
        settings: &Settings,
        target: &FolderNode,
    ) -> GenerationOutcome {
        self.notifier.notify(MSG_STARTED);

        let character = match self.generate(settings).await {
            Ok(Some(character)) => character,
            Ok(None) => {
                self.notifier.notify(MSG_EMPTY);
                return GenerationOutcome::Empty;
            }
            Err(e) => {
                error!(error = %e, "character generation failed");
                self.notifier.notify(MSG_FAILED);
                return GenerationOutcome::Failed(e.user_message());
            }
        };

        let path = target.child_path(&character.file_name());
        match self.tree.create(&path, &character.description).await {
            Ok(file) => {
                info!(path = %file.path, "character note created");
                self.notifier.notify(&format!(
                    "Character {} created in \"{}\"",
                    character.name,
                    target.display_path()
                ));
                GenerationOutcome::Created {
                    name: character.name,
                    path: file.path,
                }
            }
            Err(e) => {
                error!(error = %e, path = %path, "failed to create character note");
                self.notifier.notify(MSG_FAILED);
                GenerationOutcome::Failed(e.user_message())
            }
        }
    }

    async fn generate(&self, settings: &Settings) -> Result<Option<GeneratedCharacter>> {
        let context = ContextCollector::new(self.tree.as_ref())
            .collect(&settings.context_folders)
            .await?;
        let instructions = build_instructions(&context);
        self.generator.generate(&instructions).await
    }
}
