use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::itinerary::{GenerationStamp, Itinerary};
use crate::models::trip::TripRequest;
use crate::services::destination_catalog::DestinationCatalog;
use crate::services::itinerary_normalizer::ItineraryNormalizer;
use crate::services::mock_itinerary_service::MockItineraryService;
use crate::services::model_resolver::{ModelCandidate, ModelResolver};
use crate::services::response_parser::ResponseParser;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_TRIP_DAYS: u32 = 15;
const DEFAULT_MAX_PARTY_SIZE: u32 = 12;
const ERROR_SNIPPET_CHARS: usize = 300;

#[derive(Debug)]
pub enum AiServiceError {
    Validation(String),
    Configuration(String),
    Authorization(String),
    CapabilityUnavailable(String),
    QuotaExceeded(String),
    Provider(String),
    Parse(String),
    Timeout,
}

impl fmt::Display for AiServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiServiceError::Validation(msg) => write!(f, "Invalid trip request: {}", msg),
            AiServiceError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            AiServiceError::Authorization(msg) => write!(f, "Authorization error: {}", msg),
            AiServiceError::CapabilityUnavailable(msg) => {
                write!(f, "Capability unavailable: {}", msg)
            }
            AiServiceError::QuotaExceeded(msg) => write!(f, "Quota exceeded: {}", msg),
            AiServiceError::Provider(msg) => write!(f, "Provider error: {}", msg),
            AiServiceError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AiServiceError::Timeout => write!(f, "AI provider request timed out"),
        }
    }
}

impl Error for AiServiceError {}

impl From<reqwest::Error> for AiServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiServiceError::Timeout
        } else {
            AiServiceError::Provider(err.to_string())
        }
    }
}

impl AiServiceError {
    /// Failure classes that must stop the cascade instead of advancing to
    /// the next candidate.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AiServiceError::Authorization(_)
                | AiServiceError::CapabilityUnavailable(_)
                | AiServiceError::QuotaExceeded(_)
        )
    }
}

#[derive(Debug, Clone)]
pub struct AiServiceConfig {
    pub api_key: Option<String>,
    pub model_override: Option<String>,
    pub fallback_models: Vec<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub max_trip_days: u32,
    pub max_party_size: u32,
}

impl Default for AiServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_override: None,
            fallback_models: vec![
                "gemini-1.5-pro".to_string(),
                "gemini-1.5-flash".to_string(),
                "gemini-pro".to_string(),
            ],
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_trip_days: DEFAULT_MAX_TRIP_DAYS,
            max_party_size: DEFAULT_MAX_PARTY_SIZE,
        }
    }
}

impl AiServiceConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty());
        config.model_override = env::var("GEMINI_MODEL").ok().filter(|m| !m.trim().is_empty());
        if let Ok(base_url) = env::var("GEMINI_API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(secs) = env::var("GEMINI_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()) {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPath {
    Client,
    Rest,
}

impl AttemptPath {
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptPath::Client => "client",
            AttemptPath::Rest => "rest",
        }
    }
}

/// One (model, path) pair of the cascade, tried in order.
struct Attempt {
    model: String,
    path: AttemptPath,
}

// Managed-client request/response shapes for the v1beta endpoint.

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// The itinerary generation engine. Resolves usable models once per
/// request, cascades over (model, path) attempts until one succeeds, and
/// degrades to the deterministic synthesizer when generation is impossible.
pub struct AiService {
    config: AiServiceConfig,
    client: reqwest::Client,
    resolver: Option<ModelResolver>,
    parser: ResponseParser,
    synthesizer: MockItineraryService,
}

impl AiService {
    pub fn new(config: AiServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_default();

        if config.api_key.is_none() {
            warn!("GEMINI_API_KEY is not configured; itineraries will be synthesized offline");
        }

        let resolver = config.api_key.as_ref().map(|key| {
            ModelResolver::new(client.clone(), config.base_url.clone(), key.clone())
        });
        let synthesizer =
            MockItineraryService::new(DestinationCatalog::new(), config.max_trip_days);

        Self {
            config,
            client,
            resolver,
            parser: ResponseParser::new(),
            synthesizer,
        }
    }

    pub fn from_env() -> Self {
        Self::new(AiServiceConfig::from_env())
    }

    /// Generate a complete itinerary for the request. Customizations are
    /// merged shallowly over the trip fields before anything else happens.
    ///
    /// Worst case this returns the synthesizer's output; the only errors a
    /// caller sees are validation problems, credential/capability problems
    /// surfaced by the resolver, and timeouts.
    pub async fn generate_itinerary(
        &self,
        request: &TripRequest,
        customizations: Option<&serde_json::Map<String, Value>>,
    ) -> Result<Itinerary, AiServiceError> {
        let request = match customizations {
            Some(overrides) if !overrides.is_empty() => apply_customizations(request, overrides)?,
            _ => request.clone(),
        };
        self.validate_request(&request)?;

        let Some(resolver) = self.resolver.as_ref() else {
            info!(
                "No AI credential configured; synthesizing itinerary for {}",
                request.destination
            );
            return Ok(self
                .synthesizer
                .synthesize(&request, Some("AI credential not configured".to_string())));
        };

        let prompt = self.build_prompt(&request);

        let resolved = resolver.list_generation_models().await?;
        let models = self.candidate_models(resolved);

        match self.run_cascade(&models, &prompt).await {
            Ok((document, model, path)) => {
                match ItineraryNormalizer::normalize(document, &request, &self.synthesizer) {
                    Ok(mut itinerary) => {
                        itinerary.generation = Some(GenerationStamp::ai(&model, path.as_str()));
                        Ok(itinerary)
                    }
                    Err(err) => {
                        warn!("Normalization rejected model output: {}", err);
                        Ok(self
                            .synthesizer
                            .synthesize(&request, Some(format!("model output rejected: {}", err))))
                    }
                }
            }
            Err(AiServiceError::Timeout) => Err(AiServiceError::Timeout),
            Err(err) => {
                error!("All generation attempts failed: {}", err);
                Ok(self.synthesizer.synthesize(&request, Some(err.to_string())))
            }
        }
    }

    fn validate_request(&self, request: &TripRequest) -> Result<(), AiServiceError> {
        if request.destination.trim().is_empty() {
            return Err(AiServiceError::Validation("destination is required".to_string()));
        }
        if request.adults == 0 {
            return Err(AiServiceError::Validation(
                "at least one adult traveler is required".to_string(),
            ));
        }
        if request.party_size() > self.config.max_party_size {
            return Err(AiServiceError::Validation(format!(
                "party of {} exceeds the maximum of {}",
                request.party_size(),
                self.config.max_party_size
            )));
        }
        if let Some(days) = request.derived_day_count() {
            if days > self.config.max_trip_days {
                return Err(AiServiceError::Validation(format!(
                    "trip of {} days exceeds the maximum of {}",
                    days, self.config.max_trip_days
                )));
            }
        }
        Ok(())
    }

    /// Resolver output wins; an empty resolution degrades to the static
    /// fallback names. A configured model override is always tried first.
    fn candidate_models(&self, resolved: Vec<ModelCandidate>) -> Vec<String> {
        let mut models: Vec<String> = if resolved.is_empty() {
            warn!("Model listing unusable; trying common model names as fallback");
            self.config.fallback_models.clone()
        } else {
            resolved.into_iter().map(|c| c.short_name).collect()
        };

        if let Some(preferred) = self.config.model_override.as_deref() {
            let preferred = clean_model_name(preferred).to_string();
            models.retain(|m| *m != preferred);
            models.insert(0, preferred);
        }
        models
    }

    /// Consume (model, path) attempts in order. The first attempt that
    /// yields parseable JSON wins; terminal failures stop the cascade;
    /// timeouts propagate so cancellation never degrades silently.
    async fn run_cascade(
        &self,
        models: &[String],
        prompt: &str,
    ) -> Result<(Value, String, AttemptPath), AiServiceError> {
        let attempts: Vec<Attempt> = models
            .iter()
            .flat_map(|model| {
                [
                    Attempt { model: model.clone(), path: AttemptPath::Client },
                    Attempt { model: model.clone(), path: AttemptPath::Rest },
                ]
            })
            .collect();

        let mut last_error: Option<AiServiceError> = None;

        for attempt in &attempts {
            info!(
                "Attempting generation with model {} via {} path",
                attempt.model,
                attempt.path.as_str()
            );
            let outcome = match attempt.path {
                AttemptPath::Client => self.generate_via_client(&attempt.model, prompt).await,
                AttemptPath::Rest => self.generate_via_rest(&attempt.model, prompt).await,
            };

            match outcome {
                Ok(text) => match self.parser.extract_json(&text) {
                    Ok(document) => {
                        info!(
                            "Generated itinerary using model {} via {} path",
                            attempt.model,
                            attempt.path.as_str()
                        );
                        return Ok((document, attempt.model.clone(), attempt.path));
                    }
                    Err(err) => {
                        warn!(
                            "Model {} produced unparseable output via {} path: {}",
                            attempt.model,
                            attempt.path.as_str(),
                            err
                        );
                        last_error = Some(err);
                    }
                },
                Err(AiServiceError::Timeout) => return Err(AiServiceError::Timeout),
                Err(err) if err.is_terminal() => {
                    warn!(
                        "Generation stopped at model {} ({} path): {}",
                        attempt.model,
                        attempt.path.as_str(),
                        err
                    );
                    last_error = Some(err);
                    break;
                }
                Err(err) => {
                    warn!(
                        "Model {} failed via {} path: {}",
                        attempt.model,
                        attempt.path.as_str(),
                        err
                    );
                    last_error = Some(err);
                }
            }
        }

        Err(exhaustion_error(models.len(), last_error))
    }

    /// Managed-client path: typed payload against the v1beta endpoint,
    /// credential in a header.
    async fn generate_via_client(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<String, AiServiceError> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url,
            clean_model_name(model)
        );

        let payload = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
            generation_config: GenerationConfig { temperature: 0.7, max_output_tokens: 8192 },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(AiServiceError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let body: GenerateContentResponse =
            response.json().await.map_err(AiServiceError::from)?;
        body.candidates
            .into_iter()
            .find_map(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AiServiceError::Provider("empty response from model".to_string()))
    }

    /// Raw-transport path: minimal payload against the v1 endpoint,
    /// credential as a query parameter.
    async fn generate_via_rest(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<String, AiServiceError> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/v1/models/{}:generateContent?key={}",
            self.config.base_url,
            clean_model_name(model),
            api_key
        );

        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(AiServiceError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let data: Value = response.json().await.map_err(AiServiceError::from)?;
        data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                AiServiceError::Provider("invalid response format from API".to_string())
            })
    }

    fn api_key(&self) -> Result<&str, AiServiceError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| AiServiceError::Configuration("GEMINI_API_KEY is missing".to_string()))
    }

    fn build_prompt(&self, request: &TripRequest) -> String {
        let num_days = request
            .derived_day_count()
            .map(|n| n.clamp(1, self.config.max_trip_days))
            .unwrap_or(5);

        let date_array: Vec<String> = match request.start_date {
            Some(start) => (0..num_days)
                .map(|i| (start + chrono::Duration::days(i64::from(i))).format("%Y-%m-%d").to_string())
                .collect(),
            None => Vec::new(),
        };

        let travel_dates = request
            .dates
            .clone()
            .or_else(|| match (request.start_date, request.end_date) {
                (Some(start), Some(end)) => Some(format!("{} to {}", start, end)),
                _ => None,
            })
            .unwrap_or_else(|| "Not specified".to_string());

        let mut prompt = String::new();
        prompt.push_str(
            "You are an expert senior travel planner. Create a detailed, day-by-day itinerary in JSON format.\n\n",
        );
        prompt.push_str(&format!("Destination: {}\n", request.destination));
        prompt.push_str(&format!("Travel Dates: {}\n", travel_dates));
        prompt.push_str(&format!(
            "Budget Range: {}\n",
            request.budget.as_deref().unwrap_or("Not specified")
        ));
        prompt.push_str(&format!(
            "Travellers: {} adults, {} children\n",
            request.adults, request.children
        ));
        prompt.push_str(&format!(
            "Nearest Airport: {}\n",
            request.airport.as_deref().unwrap_or("Not specified")
        ));
        prompt.push_str(&format!(
            "Nearest Railway Station: {}\n",
            request.railway.as_deref().unwrap_or("Not specified")
        ));
        prompt.push_str(&format!(
            "Traveler Preferences: {}\n",
            request.preferences.as_deref().unwrap_or("None specified")
        ));
        prompt.push_str(&format!("Number of Days: {}\n", num_days));

        prompt.push_str(
            "\nIMPORTANT: You MUST respond with ONLY valid JSON in this exact format (no markdown, no code blocks, just pure JSON):\n\n",
        );
        prompt.push_str(concat!(
            "{\n",
            "  \"destination\": \"City name\",\n",
            "  \"duration\": \"N days\",\n",
            "  \"budget\": \"Budget range\",\n",
            "  \"startDate\": \"YYYY-MM-DD\",\n",
            "  \"endDate\": \"YYYY-MM-DD\",\n",
            "  \"days\": [\n",
            "    {\n",
            "      \"day\": 1,\n",
            "      \"date\": \"YYYY-MM-DD\",\n",
            "      \"city\": \"City name\",\n",
            "      \"activities\": [\n",
            "        {\n",
            "          \"time\": \"9:00 AM\",\n",
            "          \"title\": \"Activity name\",\n",
            "          \"type\": \"activity\",\n",
            "          \"location\": \"Location name\",\n",
            "          \"duration\": \"2 hours\",\n",
            "          \"notes\": \"Brief description or notes\"\n",
            "        }\n",
            "      ],\n",
            "      \"alternatives\": [\n",
            "        {\n",
            "          \"title\": \"Alternative activity name\",\n",
            "          \"type\": \"activity\"\n",
            "        }\n",
            "      ]\n",
            "    }\n",
            "  ]\n",
            "}\n",
        ));

        prompt.push_str("\nRequirements:\n");
        prompt.push_str(&format!(
            "- Generate exactly {} days in the \"days\" array\n",
            num_days
        ));
        if date_array.is_empty() {
            prompt.push_str("- Include a date field for each day (YYYY-MM-DD format)\n");
        } else {
            let assignments: Vec<String> = date_array
                .iter()
                .enumerate()
                .map(|(i, d)| format!("Day {} = {}", i + 1, d))
                .collect();
            prompt.push_str(&format!(
                "- Assign dates to each day: {}\n",
                assignments.join(", ")
            ));
        }
        prompt.push_str(
            "- Each day must have at least 3-5 activities covering morning, afternoon, and evening\n",
        );
        prompt.push_str(
            "- Activity types can be: \"activity\", \"food\", \"transport\", \"accommodation\", \"sightseeing\"\n",
        );
        prompt.push_str("- Include realistic times (e.g., \"9:00 AM\", \"2:30 PM\", \"7:00 PM\")\n");
        prompt.push_str(
            "- Include a \"duration\" field for each activity (e.g., \"2 hours\", \"45 minutes\")\n",
        );
        prompt.push_str(&format!(
            "- Use real places, restaurants, and attractions in {}\n",
            request.destination
        ));
        prompt.push_str("- Provide specific locations (neighborhoods, areas, or landmarks)\n");
        prompt.push_str("- Include 2-3 alternatives per day\n");
        prompt.push_str(
            "- Make activities realistic and sequential (consider travel time between locations)\n",
        );
        prompt.push_str("- Keep notes brief but informative\n");
        prompt.push_str("\nReturn ONLY the JSON object, nothing else.\n");
        prompt
    }
}

fn clean_model_name(model: &str) -> &str {
    model.strip_prefix("models/").unwrap_or(model)
}

fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_SNIPPET_CHARS).collect()
}

fn classify_status(status: reqwest::StatusCode, body: &str) -> AiServiceError {
    match status.as_u16() {
        401 | 403 => AiServiceError::Authorization(format!(
            "credential rejected ({}): {}",
            status,
            truncate_body(body)
        )),
        429 => AiServiceError::QuotaExceeded(format!(
            "rate or usage limit hit ({}): {}",
            status,
            truncate_body(body)
        )),
        _ => AiServiceError::Provider(format!("HTTP {}: {}", status.as_u16(), truncate_body(body))),
    }
}

/// Diagnostic for a fully exhausted cascade. Not-found failures point at a
/// disabled API; quota failures are reported as such; the rest stay generic.
fn exhaustion_error(tried: usize, last_error: Option<AiServiceError>) -> AiServiceError {
    match last_error {
        Some(err @ AiServiceError::Authorization(_)) => err,
        Some(err @ AiServiceError::CapabilityUnavailable(_)) => err,
        Some(err @ AiServiceError::QuotaExceeded(_)) => err,
        Some(AiServiceError::Provider(msg)) if msg.contains("404") => {
            AiServiceError::CapabilityUnavailable(format!(
                "models not found after {} candidate(s); the API is likely not enabled ({})",
                tried, msg
            ))
        }
        Some(err) => AiServiceError::Provider(format!(
            "all {} candidate model(s) failed; last error: {}",
            tried, err
        )),
        None => AiServiceError::Provider("no generation attempts were possible".to_string()),
    }
}

fn apply_customizations(
    request: &TripRequest,
    customizations: &serde_json::Map<String, Value>,
) -> Result<TripRequest, AiServiceError> {
    let mut value = serde_json::to_value(request)
        .map_err(|err| AiServiceError::Validation(err.to_string()))?;
    if let Value::Object(fields) = &mut value {
        for (key, override_value) in customizations {
            fields.insert(key.clone(), override_value.clone());
        }
    }
    serde_json::from_value(value)
        .map_err(|err| AiServiceError::Validation(format!("invalid customization: {}", err)))
}
