// ✍️ Prompt Builders - request filters → AI prompt + system instruction
//
// Three flows, each with its own limit:
// - General names   (15)
// - Astrology names (12) - birth chart computed here, not trusted from client
// - Sibling names   (12)

use crate::birth_chart::{compute_birth_chart, BirthChart, BirthDate};
use crate::error::{NamvedaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const NAME_LIMIT: usize = 15;
pub const ASTROLOGY_LIMIT: usize = 12;
pub const SIBLING_LIMIT: usize = 12;

/// Prompt and system instruction ready for the text generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub system_instruction: &'static str,
    pub limit: usize,
}

fn require_gender(gender: &str) -> Result<()> {
    if gender.trim().is_empty() {
        return Err(NamvedaError::validation("gender is required"));
    }
    Ok(())
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ============================================================================
// GENERAL NAMES
// ============================================================================

pub const NAME_SYSTEM_INSTRUCTION: &str = "You are an expert baby name consultant with deep knowledge of names from various cultures, religions, and traditions. You specialize in creating unique, meaningful names that blend different inspirations while respecting cultural significance.

Always respond with a valid JSON array of exactly 15 name objects. Each object must have:
- name: string (the actual name)
- meaning: string (detailed meaning and significance)
- origin: string (cultural/religious origin)
- pronunciation: string (phonetic pronunciation guide)
- gender: string (male/female/unisex)

Ensure names are:
- Pronounceable and pleasant sounding
- Culturally appropriate and respectful
- Unique but not bizarre
- Meaningful and significant";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameFilters {
    #[serde(default)]
    pub inspirations: Vec<String>,

    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    pub religions: Vec<String>,

    #[serde(default)]
    pub styles: Vec<String>,

    #[serde(default)]
    pub min_length: Option<u32>,

    #[serde(default)]
    pub max_length: Option<u32>,

    #[serde(default)]
    pub starting_letter: Option<String>,

    #[serde(default)]
    pub ending_letter: Option<String>,

    #[serde(default)]
    pub desired_meaning: Option<String>,
}

impl NameFilters {
    /// Lower length bound; 0 counts as unset
    pub fn min_length(&self) -> Option<u32> {
        self.min_length.filter(|v| *v > 0)
    }

    /// Upper length bound; 0 counts as unset
    pub fn max_length(&self) -> Option<u32> {
        self.max_length.filter(|v| *v > 0)
    }

    pub fn validate(&self) -> Result<()> {
        require_gender(&self.gender)?;

        if let (Some(min), Some(max)) = (self.min_length(), self.max_length()) {
            if min > max {
                return Err(NamvedaError::validation(format!(
                    "minLength ({}) is greater than maxLength ({})",
                    min, max
                )));
            }
        }
        Ok(())
    }
}

pub fn build_name_prompt(filters: &NameFilters) -> Result<Prompt> {
    filters.validate()?;

    let mut prompt = String::from("Generate 15 unique baby names based on these preferences:\n\n");

    let inspirations = clean_list(&filters.inspirations);
    if !inspirations.is_empty() {
        let _ = writeln!(prompt, "Inspirations to blend: {}", inspirations.join(", "));
    }

    let _ = writeln!(prompt, "Gender: {}", filters.gender.trim());

    if !filters.religions.is_empty() {
        let _ = writeln!(
            prompt,
            "Religious/Cultural background: {}",
            filters.religions.join(", ")
        );
    }

    if !filters.styles.is_empty() {
        let _ = writeln!(prompt, "Style preferences: {}", filters.styles.join(", "));
    }

    if filters.min_length().is_some() || filters.max_length().is_some() {
        let bound = |b: Option<u32>| b.map_or_else(|| "any".to_string(), |v| v.to_string());
        let _ = writeln!(
            prompt,
            "Name length: {} to {} characters",
            bound(filters.min_length()),
            bound(filters.max_length())
        );
    }

    if let Some(letter) = blank_to_none(&filters.starting_letter) {
        let _ = writeln!(prompt, "Must start with: {}", letter);
    }

    if let Some(letter) = blank_to_none(&filters.ending_letter) {
        let _ = writeln!(prompt, "Must end with: {}", letter);
    }

    if let Some(meaning) = blank_to_none(&filters.desired_meaning) {
        let _ = writeln!(prompt, "Desired meaning/theme: {}", meaning);
    }

    prompt.push_str(
        "\nCreate names that are:
  - Unique and creative (not just common names from lists)
  - Culturally respectful and appropriate
  - Easy to pronounce
  - Meaningful and significant
  - Harmonious when combining inspirations

  Return as a JSON array with the exact structure specified.",
    );

    Ok(Prompt {
        text: prompt,
        system_instruction: NAME_SYSTEM_INSTRUCTION,
        limit: NAME_LIMIT,
    })
}

// ============================================================================
// ASTROLOGY NAMES
// ============================================================================

pub const ASTROLOGY_SYSTEM_INSTRUCTION: &str = "You are an expert in Vedic astrology, Western astrology, Chinese zodiac, and numerology with deep knowledge of how celestial influences affect naming traditions across cultures.

Always respond with a valid JSON array of exactly 12 astrologically aligned name objects. Each object must have:
- name: string (the suggested name)
- meaning: string (detailed meaning and significance)
- origin: string (cultural/religious origin)
- pronunciation: string (phonetic pronunciation guide)
- gender: string (male/female/unisex)
- astrologicalSignificance: string (specific explanation of astrological alignment)

Ensure suggestions:
- Are aligned with the specified astrological system and birth data
- Respect traditional astrological naming principles
- Have meaningful connections to celestial influences
- Are culturally appropriate and authentic
- Include specific astrological reasoning for each name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AstrologySystem {
    #[default]
    Vedic,
    Western,
    Chinese,
    Numerology,
}

impl AstrologySystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            AstrologySystem::Vedic => "vedic",
            AstrologySystem::Western => "western",
            AstrologySystem::Chinese => "chinese",
            AstrologySystem::Numerology => "numerology",
        }
    }

    fn focus(&self) -> &'static str {
        match self {
            AstrologySystem::Vedic => "Focus on Vedic astrology principles:
- Names that harmonize with the Nakshatra
- Sanskrit origins and meanings
- Planetary influences and gemstone connections
- Ayurvedic elemental balance",
            AstrologySystem::Western => "Focus on Western astrology principles:
- Names that align with zodiac sign characteristics
- Elemental associations (Fire, Earth, Air, Water)
- Planetary rulerships and influences
- Seasonal and mythological connections",
            AstrologySystem::Chinese => "Focus on Chinese zodiac principles:
- Names that complement the animal year characteristics
- Five element theory (Wood, Fire, Earth, Metal, Water)
- Yin/Yang balance considerations
- Traditional Chinese naming wisdom",
            AstrologySystem::Numerology => "Focus on numerological principles:
- Names that harmonize with the life path number
- Letter-to-number correspondences
- Vibrational frequencies and meanings
- Karmic and destiny number influences",
        }
    }
}

impl std::str::FromStr for AstrologySystem {
    type Err = NamvedaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "vedic" => Ok(AstrologySystem::Vedic),
            "western" => Ok(AstrologySystem::Western),
            "chinese" => Ok(AstrologySystem::Chinese),
            "numerology" => Ok(AstrologySystem::Numerology),
            other => Err(NamvedaError::validation(format!(
                "unknown astrology system: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstrologyFilters {
    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    pub astrology_system: AstrologySystem,

    /// ISO `YYYY-MM-DD`
    #[serde(default)]
    pub birth_date: String,

    #[serde(default)]
    pub birth_time: Option<String>,

    #[serde(default)]
    pub birth_place: Option<String>,
}

impl AstrologyFilters {
    /// Parsed birth data; fails on a missing or impossible date
    pub fn birth(&self) -> Result<BirthDate> {
        let mut birth = BirthDate::parse(&self.birth_date)?;
        if let Some(time) = &self.birth_time {
            birth = birth.with_time(time.as_str());
        }
        if let Some(place) = &self.birth_place {
            birth = birth.with_place(place.as_str());
        }
        Ok(birth)
    }
}

/// Build the astrology prompt, returning the chart it was built from
pub fn build_astrology_prompt(filters: &AstrologyFilters) -> Result<(Prompt, BirthChart)> {
    let birth = filters.birth()?;
    require_gender(&filters.gender)?;

    let chart = compute_birth_chart(birth.date);

    let mut prompt = String::from("Generate 12 names aligned with this astrological profile:\n\n");

    let _ = writeln!(prompt, "Birth Date: {}", birth.date.format("%Y-%m-%d"));
    if let Some(time) = &birth.time {
        let _ = writeln!(prompt, "Birth Time: {}", time);
    }
    if let Some(place) = &birth.place {
        let _ = writeln!(prompt, "Birth Place: {}", place);
    }

    let _ = writeln!(prompt, "Gender: {}", filters.gender.trim());
    let _ = writeln!(prompt, "Astrology System: {}\n", filters.astrology_system.as_str());

    prompt.push_str("Astrological Data:\n");
    let _ = writeln!(prompt, "- Life Path Number: {}", chart.life_path_number);
    let _ = writeln!(prompt, "- Numerology Meaning: {}", chart.life_path_meaning);
    let _ = writeln!(prompt, "- Zodiac Sign: {}", chart.zodiac_sign);
    let _ = writeln!(prompt, "- Nakshatra: {}", chart.nakshatra);
    let _ = writeln!(prompt, "- Chinese Zodiac: {}\n", chart.chinese_zodiac_animal);

    prompt.push_str(filters.astrology_system.focus());
    prompt.push_str(
        "\n\nFor each name, provide specific astrological reasoning explaining how it aligns with the birth chart and chosen system.",
    );

    Ok((
        Prompt {
            text: prompt,
            system_instruction: ASTROLOGY_SYSTEM_INSTRUCTION,
            limit: ASTROLOGY_LIMIT,
        },
        chart,
    ))
}

// ============================================================================
// SIBLING NAMES
// ============================================================================

pub const SIBLING_SYSTEM_INSTRUCTION: &str = "You are an expert in sibling name harmony and family naming traditions. You specialize in finding names that create beautiful, balanced sibling sets while respecting cultural significance and family preferences.

Always respond with a valid JSON array of exactly 12 sibling name objects. Each object must have:
- name: string (the suggested sibling name)
- meaning: string (detailed meaning and significance)
- origin: string (cultural/religious origin)
- pronunciation: string (phonetic pronunciation guide)
- gender: string (male/female/unisex)
- matchReason: string (specific explanation of why this name harmonizes with the existing siblings)

Ensure suggestions:
- Create harmonious sibling sets (rhythmic, cultural, or thematic matches)
- Are culturally appropriate and respectful
- Sound pleasant when said together with existing names
- Have meaningful connections or complementary meanings
- Avoid names that are too similar or rhyme awkwardly";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingFilters {
    #[serde(default)]
    pub existing_names: Vec<String>,

    #[serde(default)]
    pub new_baby_gender: String,

    #[serde(default)]
    pub matching_preferences: Vec<String>,
}

pub fn build_sibling_prompt(filters: &SiblingFilters) -> Result<Prompt> {
    let existing = clean_list(&filters.existing_names);
    if existing.is_empty() {
        return Err(NamvedaError::validation(
            "at least one existing sibling name is required",
        ));
    }
    require_gender(&filters.new_baby_gender)?;

    let mut prompt = String::from(
        "Generate 12 perfect sibling names that harmonize with these existing children's names:\n\n",
    );

    let _ = writeln!(prompt, "Existing siblings: {}", existing.join(", "));
    let _ = writeln!(prompt, "New baby gender: {}", filters.new_baby_gender.trim());

    if !filters.matching_preferences.is_empty() {
        let _ = writeln!(
            prompt,
            "Prioritize these matching styles: {}",
            filters.matching_preferences.join(", ")
        );
    }

    prompt.push_str(
        "\nAnalyze the existing names for:
- Cultural/ethnic origins and traditions
- Syllable patterns and rhythm
- Phonetic qualities and sound harmony
- Name lengths and structures
- Meanings and thematic connections
- Modern vs traditional balance

Create sibling names that:
- Sound harmonious when said together with existing names
- Maintain consistent cultural or stylistic themes
- Have complementary or related meanings when possible
- Follow similar rhythmic or phonetic patterns
- Create a balanced and beautiful sibling set

For each suggestion, explain specifically why it's a perfect match for the existing sibling names.",
    );

    Ok(Prompt {
        text: prompt,
        system_instruction: SIBLING_SYSTEM_INSTRUCTION,
        limit: SIBLING_LIMIT,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_prompt_minimal() {
        let filters = NameFilters {
            gender: "female".to_string(),
            ..Default::default()
        };
        let prompt = build_name_prompt(&filters).unwrap();

        assert!(prompt.text.starts_with("Generate 15 unique baby names"));
        assert!(prompt.text.contains("Gender: female\n"));
        assert!(!prompt.text.contains("Inspirations to blend"));
        assert!(!prompt.text.contains("Name length"));
        assert_eq!(prompt.limit, NAME_LIMIT);
        assert_eq!(prompt.system_instruction, NAME_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_name_prompt_full() {
        let filters = NameFilters {
            inspirations: vec!["Aria".to_string(), "  ".to_string(), "Lakshmi".to_string()],
            gender: "unisex".to_string(),
            religions: vec!["Hindu".to_string(), "Jain".to_string()],
            styles: vec!["Modern".to_string()],
            min_length: None,
            max_length: Some(6),
            starting_letter: Some("A".to_string()),
            ending_letter: Some("".to_string()),
            desired_meaning: Some("light".to_string()),
        };
        let prompt = build_name_prompt(&filters).unwrap();

        assert!(prompt.text.contains("Inspirations to blend: Aria, Lakshmi\n"));
        assert!(prompt.text.contains("Religious/Cultural background: Hindu, Jain\n"));
        assert!(prompt.text.contains("Style preferences: Modern\n"));
        assert!(prompt.text.contains("Name length: any to 6 characters\n"));
        assert!(prompt.text.contains("Must start with: A\n"));
        assert!(!prompt.text.contains("Must end with"));
        assert!(prompt.text.contains("Desired meaning/theme: light\n"));
    }

    #[test]
    fn test_name_prompt_requires_gender() {
        let err = build_name_prompt(&NameFilters::default()).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_name_prompt_zero_length_is_unset() {
        let both_zero = NameFilters {
            gender: "male".to_string(),
            min_length: Some(0),
            max_length: Some(0),
            ..Default::default()
        };
        let prompt = build_name_prompt(&both_zero).unwrap();
        assert!(!prompt.text.contains("Name length"));

        let zero_min = NameFilters {
            gender: "male".to_string(),
            min_length: Some(0),
            max_length: Some(7),
            ..Default::default()
        };
        let prompt = build_name_prompt(&zero_min).unwrap();
        assert!(prompt.text.contains("Name length: any to 7 characters\n"));
    }

    #[test]
    fn test_name_prompt_rejects_inverted_length() {
        let filters = NameFilters {
            gender: "male".to_string(),
            min_length: Some(8),
            max_length: Some(4),
            ..Default::default()
        };
        assert!(build_name_prompt(&filters).is_err());
    }

    #[test]
    fn test_astrology_prompt_includes_chart() {
        let filters = AstrologyFilters {
            gender: "male".to_string(),
            astrology_system: AstrologySystem::Western,
            birth_date: "2000-01-01".to_string(),
            birth_time: Some("06:30".to_string()),
            birth_place: None,
        };
        let (prompt, chart) = build_astrology_prompt(&filters).unwrap();

        assert_eq!(chart.life_path_number, 4);
        assert!(prompt.text.contains("Birth Date: 2000-01-01\n"));
        assert!(prompt.text.contains("Birth Time: 06:30\n"));
        assert!(!prompt.text.contains("Birth Place"));
        assert!(prompt.text.contains("Astrology System: western\n"));
        assert!(prompt.text.contains("- Life Path Number: 4\n"));
        assert!(prompt.text.contains("- Zodiac Sign: Capricorn\n"));
        assert!(prompt.text.contains("- Nakshatra: Ashwini\n"));
        assert!(prompt.text.contains("- Chinese Zodiac: Dragon\n"));
        assert!(prompt.text.contains("Focus on Western astrology principles"));
        assert_eq!(prompt.limit, ASTROLOGY_LIMIT);
    }

    #[test]
    fn test_astrology_system_focus_blocks() {
        for (system, marker) in [
            (AstrologySystem::Vedic, "harmonize with the Nakshatra"),
            (AstrologySystem::Chinese, "Five element theory"),
            (AstrologySystem::Numerology, "harmonize with the life path number"),
        ] {
            let filters = AstrologyFilters {
                gender: "female".to_string(),
                astrology_system: system,
                birth_date: "1990-06-15".to_string(),
                ..Default::default()
            };
            let (prompt, _) = build_astrology_prompt(&filters).unwrap();
            assert!(prompt.text.contains(marker), "{:?} missing focus", system);
        }
    }

    #[test]
    fn test_astrology_prompt_rejects_bad_date() {
        let filters = AstrologyFilters {
            gender: "female".to_string(),
            birth_date: "2023-02-29".to_string(),
            ..Default::default()
        };
        assert!(build_astrology_prompt(&filters).is_err());
    }

    #[test]
    fn test_astrology_system_parse() {
        assert_eq!("Vedic".parse::<AstrologySystem>().unwrap(), AstrologySystem::Vedic);
        assert!("tarot".parse::<AstrologySystem>().is_err());
    }

    #[test]
    fn test_sibling_prompt() {
        let filters = SiblingFilters {
            existing_names: vec!["Aarav".to_string(), " ".to_string(), "Diya".to_string()],
            new_baby_gender: "female".to_string(),
            matching_preferences: vec!["Same origin".to_string()],
        };
        let prompt = build_sibling_prompt(&filters).unwrap();

        assert!(prompt.text.contains("Existing siblings: Aarav, Diya\n"));
        assert!(prompt.text.contains("New baby gender: female\n"));
        assert!(prompt.text.contains("Prioritize these matching styles: Same origin\n"));
        assert_eq!(prompt.system_instruction, SIBLING_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_sibling_prompt_requires_names() {
        let filters = SiblingFilters {
            existing_names: vec!["   ".to_string()],
            new_baby_gender: "male".to_string(),
            matching_preferences: vec![],
        };
        assert!(build_sibling_prompt(&filters).is_err());
    }
}
