// 📜 Name Suggestions - parse AI replies, fall back to static tables

use crate::error::{NamvedaError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// ============================================================================
// SUGGESTION RECORD
// ============================================================================

/// One suggested name as returned by the AI endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSuggestion {
    pub name: String,

    #[serde(default)]
    pub meaning: String,

    #[serde(default)]
    pub origin: String,

    #[serde(default)]
    pub pronunciation: String,

    /// male / female / unisex
    #[serde(default)]
    pub gender: String,

    /// Astrology flow only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub astrological_significance: Option<String>,

    /// Sibling flow only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_reason: Option<String>,
}

impl NameSuggestion {
    pub fn new(name: &str, meaning: &str, origin: &str, pronunciation: &str, gender: &str) -> Self {
        NameSuggestion {
            name: name.to_string(),
            meaning: meaning.to_string(),
            origin: origin.to_string(),
            pronunciation: pronunciation.to_string(),
            gender: gender.to_string(),
            astrological_significance: None,
            match_reason: None,
        }
    }

    /// Builder pattern: add astrological significance
    pub fn with_astrological_significance(mut self, significance: &str) -> Self {
        self.astrological_significance = Some(significance.to_string());
        self
    }

    /// Builder pattern: add sibling match reason
    pub fn with_match_reason(mut self, reason: &str) -> Self {
        self.match_reason = Some(reason.to_string());
        self
    }
}

/// Where a list of suggestions came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Ai,
    Fallback,
}

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

impl Gender {
    /// Exact key lookup (`male` / `female`); any other value counts as unisex
    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unisex,
        }
    }
}

// ============================================================================
// RESPONSE PARSING
// ============================================================================

fn code_fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"```json\n?|\n?```").expect("static regex"))
}

/// Remove Markdown code fences (```json ... ```) and surrounding whitespace
pub fn strip_code_fences(raw: &str) -> String {
    code_fence_pattern().replace_all(raw, "").trim().to_string()
}

/// Parse raw AI text into at most `limit` suggestions
pub fn parse_suggestions(raw: &str, limit: usize) -> Result<Vec<NameSuggestion>> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(NamvedaError::Generation("empty response text".to_string()));
    }

    let mut suggestions: Vec<NameSuggestion> = serde_json::from_str(&cleaned)
        .map_err(|e| NamvedaError::Generation(format!("malformed suggestion JSON: {}", e)))?;

    suggestions.truncate(limit);
    Ok(suggestions)
}

// ============================================================================
// FALLBACK TABLES
// ============================================================================

pub fn fallback_names(gender: Gender) -> Vec<NameSuggestion> {
    match gender {
        Gender::Male => vec![
            NameSuggestion::new(
                "Arjun",
                "Bright, shining, white, silver",
                "Sanskrit/Hindu",
                "AR-jun",
                "male",
            ),
            NameSuggestion::new(
                "Kiran",
                "Ray of light, beam of light",
                "Sanskrit/Hindu",
                "KEE-ran",
                "male",
            ),
        ],
        Gender::Female => vec![
            NameSuggestion::new(
                "Anaya",
                "Caring, guardian, protected",
                "Sanskrit/Hindu",
                "ah-NAH-ya",
                "female",
            ),
            NameSuggestion::new("Priya", "Beloved, dear one", "Sanskrit/Hindu", "PREE-ya", "female"),
        ],
        Gender::Unisex => vec![NameSuggestion::new(
            "Avani",
            "Earth, nature",
            "Sanskrit/Hindu",
            "ah-VAH-nee",
            "unisex",
        )],
    }
}

pub fn fallback_astrology_names(gender: Gender) -> Vec<NameSuggestion> {
    let suggestion = match gender {
        Gender::Male => NameSuggestion::new(
            "Surya",
            "Sun, solar energy, illumination",
            "Sanskrit/Vedic",
            "SOOR-ya",
            "male",
        )
        .with_astrological_significance("Aligned with solar energy and leadership qualities"),
        Gender::Female => NameSuggestion::new(
            "Chandra",
            "Moon, lunar energy, intuition",
            "Sanskrit/Vedic",
            "CHAN-dra",
            "female",
        )
        .with_astrological_significance("Connected to lunar cycles and emotional wisdom"),
        Gender::Unisex => NameSuggestion::new(
            "Tara",
            "Star, celestial light",
            "Sanskrit/Vedic",
            "TAH-ra",
            "unisex",
        )
        .with_astrological_significance("Represents stellar influence and cosmic guidance"),
    };
    vec![suggestion]
}

pub fn fallback_sibling_names(gender: Gender) -> Vec<NameSuggestion> {
    let suggestion = match gender {
        Gender::Male => NameSuggestion::new(
            "Arjun",
            "Bright, shining, white",
            "Sanskrit/Hindu",
            "AR-jun",
            "male",
        )
        .with_match_reason("Classic Indian name with strong, clear pronunciation"),
        Gender::Female => NameSuggestion::new(
            "Anaya",
            "Caring, guardian",
            "Sanskrit/Hindu",
            "ah-NAH-ya",
            "female",
        )
        .with_match_reason("Melodic name with beautiful meaning"),
        Gender::Unisex => NameSuggestion::new(
            "Avani",
            "Earth, nature",
            "Sanskrit/Hindu",
            "ah-VAH-nee",
            "unisex",
        )
        .with_match_reason("Nature-inspired name with universal appeal"),
    };
    vec![suggestion]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_NAMES: &str = r#"[
        {"name": "Ira", "meaning": "Earth", "origin": "Sanskrit", "pronunciation": "EE-ra", "gender": "female"},
        {"name": "Veer", "meaning": "Brave", "origin": "Sanskrit", "pronunciation": "VEER", "gender": "male"}
    ]"#;

    #[test]
    fn test_strip_code_fences() {
        let raw = "```json\n[1, 2]\n```";
        assert_eq!(strip_code_fences(raw), "[1, 2]");

        let bare = "```[1]```";
        assert_eq!(strip_code_fences(bare), "[1]");

        assert_eq!(strip_code_fences("  [3]  "), "[3]");
    }

    #[test]
    fn test_parse_fenced_response() {
        let raw = format!("```json\n{}\n```", TWO_NAMES);
        let names = parse_suggestions(&raw, 15).unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(names[0].name, "Ira");
        assert_eq!(names[1].pronunciation, "VEER");
        assert_eq!(names[0].match_reason, None);
    }

    #[test]
    fn test_parse_truncates_to_limit() {
        let names = parse_suggestions(TWO_NAMES, 1).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].name, "Ira");
    }

    #[test]
    fn test_parse_optional_fields() {
        let raw = r#"[{"name": "Tara", "meaning": "Star", "origin": "Sanskrit",
            "pronunciation": "TAH-ra", "gender": "unisex",
            "astrologicalSignificance": "Stellar"}]"#;
        let names = parse_suggestions(raw, 12).unwrap();
        assert_eq!(names[0].astrological_significance.as_deref(), Some("Stellar"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_suggestions("", 15).is_err());
        assert!(parse_suggestions("Sorry, I cannot help with that.", 15).is_err());
        assert!(parse_suggestions(r#"{"name": "Solo"}"#, 15).is_err());
    }

    #[test]
    fn test_gender_lookup() {
        assert_eq!(Gender::from_str_lossy("male"), Gender::Male);
        assert_eq!(Gender::from_str_lossy("female"), Gender::Female);
        assert_eq!(Gender::from_str_lossy("Male"), Gender::Unisex);
        assert_eq!(Gender::from_str_lossy(" female "), Gender::Unisex);
        assert_eq!(Gender::from_str_lossy("boy"), Gender::Unisex);
        assert_eq!(Gender::from_str_lossy("unisex"), Gender::Unisex);
        assert_eq!(Gender::from_str_lossy("any"), Gender::Unisex);
    }

    #[test]
    fn test_fallback_tables() {
        let male = fallback_names(Gender::Male);
        assert_eq!(male.len(), 2);
        assert!(male.iter().all(|s| s.gender == "male"));

        let astro = fallback_astrology_names(Gender::Female);
        assert_eq!(astro[0].name, "Chandra");
        assert!(astro[0].astrological_significance.is_some());

        let sibling = fallback_sibling_names(Gender::Unisex);
        assert_eq!(sibling[0].name, "Avani");
        assert!(sibling[0].match_reason.is_some());
    }

    #[test]
    fn test_source_serialization() {
        assert_eq!(serde_json::to_string(&SuggestionSource::Ai).unwrap(), "\"ai\"");
        assert_eq!(
            serde_json::to_string(&SuggestionSource::Fallback).unwrap(),
            "\"fallback\""
        );
    }
}
