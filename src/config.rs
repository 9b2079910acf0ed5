// ⚙️ Configuration - read once from the environment

use crate::error::{NamvedaError, Result};
use crate::generator::DEFAULT_GEMINI_URL;
use crate::payment::DEFAULT_RAZORPAY_URL;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Per-request limit for calls to the AI endpoint and the payment gateway
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Outbound HTTP client with a whole-request timeout
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| NamvedaError::Config(format!("failed to build HTTP client: {}", e)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfig {
    pub api_url: String,
    pub key_id: String,
    pub key_secret: String,
    /// Key id shown to the checkout widget
    pub public_key_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub ai: AiConfig,
    /// None when no gateway credentials are configured
    pub payment: Option<PaymentConfig>,
}

impl Config {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Load from an explicit variable map
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("GEMINI_API_KEY").ok_or_else(|| {
            NamvedaError::Config("GEMINI_API_KEY must be set".to_string())
        })?;

        let ai = AiConfig {
            api_url: get("GEMINI_API_URL").unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
            api_key,
        };

        let payment = match (get("RAZORPAY_KEY_ID"), get("RAZORPAY_KEY_SECRET")) {
            (Some(key_id), Some(key_secret)) => Some(PaymentConfig {
                api_url: get("RAZORPAY_API_URL")
                    .unwrap_or_else(|| DEFAULT_RAZORPAY_URL.to_string()),
                public_key_id: get("RAZORPAY_PUBLIC_KEY_ID").unwrap_or_else(|| key_id.clone()),
                key_id,
                key_secret,
            }),
            (None, None) => None,
            _ => {
                return Err(NamvedaError::Config(
                    "RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET must be set together".to_string(),
                ))
            }
        };

        Ok(Config {
            bind_addr: get("NAMVEDA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            ai,
            payment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(&vars(&[("GEMINI_API_KEY", "abc")])).unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.ai.api_url, DEFAULT_GEMINI_URL);
        assert_eq!(config.ai.api_key, "abc");
        assert!(config.payment.is_none());
    }

    #[test]
    fn test_missing_ai_key() {
        assert!(Config::from_vars(&vars(&[])).is_err());
        assert!(Config::from_vars(&vars(&[("GEMINI_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_payment_config() {
        let config = Config::from_vars(&vars(&[
            ("GEMINI_API_KEY", "abc"),
            ("RAZORPAY_KEY_ID", "rzp_id"),
            ("RAZORPAY_KEY_SECRET", "rzp_secret"),
        ]))
        .unwrap();

        let payment = config.payment.unwrap();
        assert_eq!(payment.public_key_id, "rzp_id");
        assert_eq!(payment.api_url, DEFAULT_RAZORPAY_URL);
    }

    #[test]
    fn test_partial_payment_config_rejected() {
        let result = Config::from_vars(&vars(&[
            ("GEMINI_API_KEY", "abc"),
            ("RAZORPAY_KEY_ID", "rzp_id"),
        ]));
        assert!(result.is_err());
    }
}
