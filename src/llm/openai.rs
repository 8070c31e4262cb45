// OpenAI Responses API client
//
// One request per generation: instructions + fixed input, output constrained
// to the character JSON schema. No retries, no client-side timeout.

use crate::config::AppConfig;
use crate::error::{CreatorError, Result};
use crate::llm::character::{character_schema, GeneratedCharacter, SCHEMA_NAME};
use crate::llm::generator::{CharacterGenerator, GENERATION_INPUT};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
    text: TextConfig,
}

#[derive(Debug, Serialize)]
struct TextConfig {
    format: TextFormat,
}

#[derive(Debug, Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    strict: bool,
    schema: Value,
}

pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str, config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            api_base: config.api_base.clone(),
            model: config.model.clone(),
        }
    }

    fn request_body<'a>(&'a self, instructions: &'a str) -> ResponsesRequest<'a> {
        ResponsesRequest {
            model: &self.model,
            instructions,
            input: GENERATION_INPUT,
            text: TextConfig {
                format: TextFormat {
                    kind: "json_schema",
                    name: SCHEMA_NAME,
                    strict: true,
                    schema: character_schema(),
                },
            },
        }
    }
}

#[async_trait]
impl CharacterGenerator for OpenAiGenerator {
    async fn generate(&self, instructions: &str) -> Result<Option<GeneratedCharacter>> {
        if self.api_key.trim().is_empty() {
            return Err(CreatorError::Config(
                "no API key set; run `settings api-key <key>` first".to_string(),
            ));
        }

        let url = format!("{}/responses", self.api_base);
        debug!(url = %url, model = %self.model, "requesting character");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(instructions))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), body = %body, "generation response");

        if !status.is_success() {
            return Err(CreatorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Value = serde_json::from_str(&body)?;
        let character = parse_response(&parsed);
        if let Some(c) = &character {
            info!(name = %c.name, "character generated");
        }
        Ok(character)
    }
}

/// Pull the structured character out of a Responses API payload
///
/// None for incomplete responses, refusals, or output text that does not
/// match the schema.
pub fn parse_response(response: &Value) -> Option<GeneratedCharacter> {
    if response["status"].as_str() == Some("incomplete") {
        warn!(
            reason = %response["incomplete_details"]["reason"],
            "generation response incomplete"
        );
        return None;
    }

    let mut text = String::new();
    let messages = response["output"]
        .as_array()?
        .iter()
        .filter(|item| item["type"] == "message");

    for message in messages {
        for part in message["content"].as_array().into_iter().flatten() {
            match part["type"].as_str() {
                Some("output_text") => text.push_str(part["text"].as_str().unwrap_or_default()),
                Some("refusal") => {
                    warn!(refusal = %part["refusal"], "generation refused");
                    return None;
                }
                _ => {}
            }
        }
    }

    if text.is_empty() {
        warn!("generation response had no output text");
        return None;
    }

    GeneratedCharacter::from_output(&text)
}
