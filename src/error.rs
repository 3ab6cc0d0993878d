use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoachError>;

#[derive(Error, Debug)]
pub enum CoachError {
    /// The completion request itself did not succeed (non-success status
    /// or the request could not be delivered after retries).
    #[error("AI request failed ({status}): {message}")]
    Transport { status: u16, message: String },

    /// The completion response body could not be read as a stream.
    #[error("AI response stream unavailable: {0}")]
    StreamUnavailable(String),

    /// Backend (auth/storage) API returned a non-success status.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("LLM provider error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration parsing error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for errors that fit no other category.
    #[error("{0}")]
    Other(String),
}

impl CoachError {
    /// Returns a short actionable hint for common failures.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CoachError::NotSignedIn => Some(rust_i18n::t!("error.hint.not_signed_in").to_string()),
            CoachError::Auth(_) => Some(rust_i18n::t!("error.hint.auth").to_string()),
            CoachError::Config(msg) if msg.contains("api_key") => {
                Some(rust_i18n::t!("error.hint.api_key").to_string())
            }
            CoachError::Config(msg) if msg.contains("backend") => {
                Some(rust_i18n::t!("error.hint.backend_config").to_string())
            }
            CoachError::Transport { status: 401, .. } => {
                Some(rust_i18n::t!("error.hint.api_key").to_string())
            }
            CoachError::Transport { status: 429, .. } => {
                Some(rust_i18n::t!("error.hint.rate_limited").to_string())
            }
            CoachError::Transport { status, .. } if *status >= 500 => {
                Some(rust_i18n::t!("error.hint.service_unavailable").to_string())
            }
            CoachError::Network(_) | CoachError::StreamUnavailable(_) => {
                Some(rust_i18n::t!("error.hint.network").to_string())
            }
            CoachError::Backend { status: 401, .. } | CoachError::Backend { status: 403, .. } => {
                Some(rust_i18n::t!("error.hint.session_expired").to_string())
            }
            _ => None,
        }
    }
}
