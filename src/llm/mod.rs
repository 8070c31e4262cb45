/// Generative API
///
/// The character type, its output schema, and the client that asks the
/// language model for one.

pub mod character;
pub mod generator;
pub mod openai;

pub use character::{character_schema, GeneratedCharacter};
pub use generator::{CharacterGenerator, GENERATION_INPUT};
pub use openai::OpenAiGenerator;
