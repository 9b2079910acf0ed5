// Namveda - Baby Name Suggestion Service - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod birth_chart;    // Pure date → numerology / zodiac / Nakshatra
pub mod config;
pub mod error;
pub mod generator;      // AI text endpoint + fallback
pub mod payment;        // Donation orders + checkout options
pub mod prompts;
pub mod suggestions;

#[cfg(feature = "server")]
pub mod api;

#[cfg(any(feature = "cli", feature = "server"))]
pub mod logging;

// Re-export commonly used types
pub use birth_chart::{
    BirthChart, BirthDate, ChineseZodiac, Nakshatra, NumerologyResult, ZodiacSign,
    calculate_chinese_zodiac, calculate_nakshatra, calculate_numerology, calculate_zodiac_sign,
    compute_birth_chart, numerology_meaning, reduce_to_life_path,
};
pub use config::{AiConfig, Config, PaymentConfig};
pub use error::{NamvedaError, Result};
pub use generator::{
    AstrologyNames, GeminiClient, GeneratedNames, TextGenerator,
    generate_astrological_names, generate_names, generate_sibling_names,
};
pub use payment::{
    CheckoutOptions, DonationOrder, DonationRequest, Order, OrderRequest, PaymentGateway,
    RazorpayClient, create_donation_order,
};
pub use prompts::{
    AstrologyFilters, AstrologySystem, NameFilters, Prompt, SiblingFilters,
    build_astrology_prompt, build_name_prompt, build_sibling_prompt,
};
pub use suggestions::{Gender, NameSuggestion, SuggestionSource, parse_suggestions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
