/// Character generator seam

use crate::error::Result;
use crate::llm::character::GeneratedCharacter;
use async_trait::async_trait;

/// Fixed user input sent with every generation request
pub const GENERATION_INPUT: &str = "Generate a character.";

/// Something that can turn instructions into a character
#[async_trait]
pub trait CharacterGenerator: Send + Sync {
    /// Ok(None) when the service declined or produced nothing schema-conformant
    async fn generate(&self, instructions: &str) -> Result<Option<GeneratedCharacter>>;
}
