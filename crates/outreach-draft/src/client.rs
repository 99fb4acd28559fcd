//! Ollama HTTP client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use outreach_model::WeddingDetails;

use crate::MessageDrafter;
use crate::error::{DraftError, Result};
use crate::prompt::{PromptVariant, build_prompt};

/// Timeout for drafting one message.
const DRAFT_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the connection check.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for listing models.
const MODELS_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for a model smoke test.
const TEST_MODEL_TIMEOUT: Duration = Duration::from_secs(30);
/// Large models can take minutes to download.
const PULL_TIMEOUT: Duration = Duration::from_secs(300);

const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Sampling options sent with a generate request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl GenerateOptions {
    /// High-variety sampling for outreach drafts.
    pub fn creative(seed: u32) -> Self {
        Self {
            temperature: 1.2,
            top_p: Some(0.95),
            top_k: Some(50),
            repeat_penalty: Some(1.3),
            seed: Some(seed),
        }
    }

    /// Near-deterministic sampling for smoke tests.
    pub fn precise() -> Self {
        Self {
            temperature: 0.1,
            top_p: None,
            top_k: None,
            repeat_penalty: None,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    name: &'a str,
    stream: bool,
}

/// Client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    root: String,
    model: String,
}

impl OllamaClient {
    /// Creates a client. `base` may be the server root or the full
    /// `/api/generate` URL.
    pub fn new(base: &str, model: &str) -> Result<Self> {
        let root = server_root(base);
        if root.is_empty() {
            return Err(DraftError::NotConfigured("no Ollama base URL provided"));
        }
        let http = Client::builder()
            .build()
            .map_err(|e| DraftError::from_request(&root, e))?;
        Ok(Self {
            http,
            root,
            model: model.trim().to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }

    /// Runs one non-streaming generation and returns the raw text.
    pub fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: GenerateOptions,
        timeout: Duration,
    ) -> Result<String> {
        if model.is_empty() {
            return Err(DraftError::NotConfigured("no model selected"));
        }
        let url = self.url(GENERATE_PATH);
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options,
        };
        let response = self
            .http
            .post(&url)
            .timeout(timeout)
            .json(&body)
            .send()
            .map_err(|e| DraftError::from_request(&url, e))?;
        if !response.status().is_success() {
            return Err(DraftError::HttpStatus {
                status: response.status().as_u16(),
            });
        }
        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| DraftError::from_request(&url, e))?;
        Ok(parsed.response.trim().to_string())
    }

    /// Checks that the server answers.
    pub fn test_connection(&self) -> Result<()> {
        self.get_tags(CONNECTION_TIMEOUT).map(|_| ())
    }

    /// Installed model names without tag suffix, deduplicated and sorted.
    pub fn list_models(&self) -> Result<Vec<String>> {
        let tags = self.get_tags(MODELS_TIMEOUT)?;
        Ok(model_names(tags.models.iter().map(|tag| tag.name.as_str())))
    }

    /// Downloads a model; blocks until the server finishes.
    pub fn pull_model(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::NotConfigured("no model name provided"));
        }
        let url = self.url("/api/pull");
        info!(model = name, "pulling model");
        let response = self
            .http
            .post(&url)
            .timeout(PULL_TIMEOUT)
            .json(&PullRequest {
                name,
                stream: false,
            })
            .send()
            .map_err(|e| DraftError::from_request(&url, e))?;
        if !response.status().is_success() {
            return Err(DraftError::HttpStatus {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    /// Asks a model for a trivial completion.
    pub fn test_model(&self, name: &str) -> Result<String> {
        let name = name.trim();
        let text = self.generate(
            name,
            "Hello, can you generate a simple greeting?",
            GenerateOptions::precise(),
            TEST_MODEL_TIMEOUT,
        )?;
        if text.is_empty() {
            return Err(DraftError::EmptyResponse {
                model: name.to_string(),
            });
        }
        Ok(text)
    }

    fn get_tags(&self, timeout: Duration) -> Result<TagsResponse> {
        let url = self.url("/api/tags");
        debug!(url = %url, "querying models");
        let response = self
            .http
            .get(&url)
            .timeout(timeout)
            .send()
            .map_err(|e| DraftError::from_request(&url, e))?;
        if !response.status().is_success() {
            return Err(DraftError::HttpStatus {
                status: response.status().as_u16(),
            });
        }
        response
            .json()
            .map_err(|e| DraftError::from_request(&url, e))
    }
}

impl MessageDrafter for OllamaClient {
    fn draft(&self, first_name: &str, details: &WeddingDetails) -> Result<String> {
        let variant = PromptVariant::random(&mut rand::thread_rng());
        debug!(
            style = variant.style,
            scenario = variant.scenario,
            seed = variant.seed,
            "drafting message"
        );
        let prompt = build_prompt(first_name, details, &variant);
        self.generate(
            &self.model,
            &prompt,
            GenerateOptions::creative(variant.seed),
            DRAFT_TIMEOUT,
        )
    }
}

/// Server root from a configured base URL.
fn server_root(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    trimmed
        .strip_suffix(GENERATE_PATH)
        .unwrap_or(trimmed)
        .to_string()
}

/// Strips `:tag` suffixes, drops duplicates and sorts.
pub fn model_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut models: Vec<String> = names
        .into_iter()
        .filter_map(|name| name.split(':').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    models.sort();
    models.dedup();
    models
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_accepts_generate_url() {
        assert_eq!(server_root("http://localhost:11434/"), "http://localhost:11434");
        assert_eq!(
            server_root("http://localhost:11434/api/generate"),
            "http://localhost:11434"
        );
    }

    #[test]
    fn blank_base_is_not_configured() {
        assert!(matches!(
            OllamaClient::new("  ", "llama2"),
            Err(DraftError::NotConfigured(_))
        ));
    }

    #[test]
    fn model_names_drop_tags() {
        let names = model_names(["mistral:7b", "llama2:latest", "llama2:13b", ""]);
        assert_eq!(names, vec!["llama2", "mistral"]);
    }

    #[test]
    fn creative_options_serialize_all_fields() {
        let json = serde_json::to_value(GenerateOptions::creative(1234)).unwrap();
        assert_eq!(json["seed"], 1234);
        assert_eq!(json["top_k"], 50);
        let json = serde_json::to_value(GenerateOptions::precise()).unwrap();
        assert!(json.get("seed").is_none());
    }
}
