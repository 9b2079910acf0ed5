// ⚠️ Error types shared by every layer of the service

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NamvedaError {
    /// Request data failed validation (bad date, missing gender, amount too low)
    #[error("validation failed: {0}")]
    Validation(String),

    /// The AI text endpoint failed or returned something unusable
    #[error("name generation failed: {0}")]
    Generation(String),

    /// The payment gateway rejected or failed the order call
    #[error("payment gateway error: {0}")]
    Payment(String),

    /// Missing or malformed configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl NamvedaError {
    pub fn validation(message: impl Into<String>) -> Self {
        NamvedaError::Validation(message.into())
    }

    /// True when the caller sent bad input (maps to HTTP 400)
    pub fn is_client_error(&self) -> bool {
        matches!(self, NamvedaError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, NamvedaError>;
