// 🤖 Name Generator - prompt → AI text endpoint → parsed suggestions
//
// The AI endpoint is an opaque collaborator behind `TextGenerator`.
// Any failure (transport, HTTP status, empty text, bad JSON) is logged
// and replaced with the static fallback list. No retries.

use crate::birth_chart::BirthChart;
use crate::config::{http_client, DEFAULT_HTTP_TIMEOUT};
use crate::error::{NamvedaError, Result};
use crate::prompts::{
    build_astrology_prompt, build_name_prompt, build_sibling_prompt, AstrologyFilters,
    NameFilters, Prompt, SiblingFilters,
};
use crate::suggestions::{
    fallback_astrology_names, fallback_names, fallback_sibling_names, parse_suggestions, Gender,
    NameSuggestion, SuggestionSource,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

// ============================================================================
// COLLABORATOR
// ============================================================================

/// Generative text endpoint: prompt + system instruction → raw text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String>;
}

// ============================================================================
// GEMINI CLIENT
// ============================================================================

pub const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_url, api_key, DEFAULT_HTTP_TIMEOUT)
    }

    pub fn with_timeout(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(GeminiClient {
            http: http_client(timeout)?,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Request body for `generateContent`
    pub fn request_body(prompt: &str, system_instruction: &str) -> serde_json::Value {
        json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ],
            "systemInstruction": {
                "parts": [ { "text": system_instruction } ]
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

/// Text of the first part of the first candidate, or "" when absent
fn first_candidate_text(response: GeminiResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .unwrap_or_default()
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(prompt, system_instruction))
            .send()
            .await
            .map_err(|e| NamvedaError::Generation(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NamvedaError::Generation(format!(
                "endpoint returned HTTP {}",
                status
            )));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| NamvedaError::Generation(format!("unreadable response: {}", e)))?;

        Ok(first_candidate_text(body))
    }
}

// ============================================================================
// GENERATION FLOWS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedNames {
    pub names: Vec<NameSuggestion>,
    pub source: SuggestionSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstrologyNames {
    pub chart: BirthChart,
    pub names: Vec<NameSuggestion>,
    pub source: SuggestionSource,
}

/// Call the generator and parse; on any failure use `fallback`
async fn generate_or_fallback(
    generator: &dyn TextGenerator,
    prompt: &Prompt,
    flow: &str,
    fallback: impl FnOnce() -> Vec<NameSuggestion>,
) -> GeneratedNames {
    let outcome = match generator.generate(&prompt.text, prompt.system_instruction).await {
        Ok(raw) => parse_suggestions(&raw, prompt.limit),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(names) => {
            tracing::info!(flow, count = names.len(), "generated name suggestions");
            GeneratedNames {
                names,
                source: SuggestionSource::Ai,
            }
        }
        Err(e) => {
            tracing::warn!(flow, error = %e, "name generation failed, using fallback list");
            GeneratedNames {
                names: fallback(),
                source: SuggestionSource::Fallback,
            }
        }
    }
}

/// General name search (up to 15). Errors only on invalid filters.
pub async fn generate_names(
    generator: &dyn TextGenerator,
    filters: &NameFilters,
) -> Result<GeneratedNames> {
    let prompt = build_name_prompt(filters)?;
    let gender = Gender::from_str_lossy(&filters.gender);

    Ok(generate_or_fallback(generator, &prompt, "names", || fallback_names(gender)).await)
}

/// Astrology-aligned names (up to 12) with the chart they were built from
pub async fn generate_astrological_names(
    generator: &dyn TextGenerator,
    filters: &AstrologyFilters,
) -> Result<AstrologyNames> {
    let (prompt, chart) = build_astrology_prompt(filters)?;
    let gender = Gender::from_str_lossy(&filters.gender);

    let generated =
        generate_or_fallback(generator, &prompt, "astrology", || fallback_astrology_names(gender))
            .await;

    Ok(AstrologyNames {
        chart,
        names: generated.names,
        source: generated.source,
    })
}

/// Sibling-matching names (up to 12)
pub async fn generate_sibling_names(
    generator: &dyn TextGenerator,
    filters: &SiblingFilters,
) -> Result<GeneratedNames> {
    let prompt = build_sibling_prompt(filters)?;
    let gender = Gender::from_str_lossy(&filters.new_baby_gender);

    Ok(generate_or_fallback(generator, &prompt, "sibling", || fallback_sibling_names(gender)).await)
}

// ============================================================================
// TESTS
// ============================================================================
