//! Error types for HealthChat.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Profile collection errors.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Step {step} is incomplete: {reason}")]
    StepIncomplete { step: String, reason: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Consent is required before continuing")]
    ConsentRequired,

    #[error("At least one health domain must be selected")]
    NoDomains,

    #[error("Cannot move from step {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },

    #[error("Input closed on channel {name}")]
    InputClosed { name: String },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
