use log::{info, warn};
use serde::Deserialize;

use crate::services::ai_service::AiServiceError;

/// A model identifier usable for generation, in both its fully-qualified
/// and short form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCandidate {
    pub full_name: String,
    pub short_name: String,
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ModelDescriptor {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "supportedGenerationMethods")]
    supported_generation_methods: Vec<String>,
}

/// Queries the provider's model catalog and ranks what the credential may
/// actually invoke. Stateless beyond the outbound call.
pub struct ModelResolver {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ModelResolver {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self { client, base_url, api_key }
    }

    /// Models supporting content generation, in listing order. Credential
    /// rejection and a disabled API are terminal; every other failure
    /// degrades to an empty list so the caller can fall back to the static
    /// model names.
    pub async fn list_generation_models(&self) -> Result<Vec<ModelCandidate>, AiServiceError> {
        let url = format!("{}/v1/models?key={}", self.base_url, self.api_key);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => return Err(AiServiceError::Timeout),
            Err(err) => {
                warn!("Model listing request failed: {}", err);
                return Ok(Vec::new());
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AiServiceError::Authorization(
                "API key is invalid or does not have permission to list models".to_string(),
            ));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AiServiceError::CapabilityUnavailable(
                "Generative Language API is not enabled for this project".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Model listing returned {}: {}", status, body);
            return Ok(Vec::new());
        }

        let listing: ModelListResponse = match response.json().await {
            Ok(listing) => listing,
            Err(err) => {
                warn!("Malformed model listing payload: {}", err);
                return Ok(Vec::new());
            }
        };

        let candidates: Vec<ModelCandidate> = listing
            .models
            .into_iter()
            .filter(|m| {
                m.name.contains("gemini")
                    && m.supported_generation_methods
                        .iter()
                        .any(|method| method == "generateContent")
            })
            .map(|m| {
                let short_name = m.name.strip_prefix("models/").unwrap_or(&m.name).to_string();
                ModelCandidate { full_name: m.name, short_name }
            })
            .collect();

        info!(
            "Models with generateContent support: {:?}",
            candidates.iter().map(|c| c.short_name.as_str()).collect::<Vec<_>>()
        );
        Ok(candidates)
    }
}
