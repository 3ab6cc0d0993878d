//! Global constants.

/// LLM defaults.
pub mod llm {
    /// Default completion model (free OpenRouter tier).
    pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-maverick:free";

    /// Default sampling temperature.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Referer header sent with completion requests (required by OpenRouter).
    pub const APP_REFERER: &str = "https://pitchcoach.app";

    /// X-Title header sent with completion requests.
    pub const APP_TITLE: &str = "Pitch Negotiation Assistant";
}

/// Chat session defaults.
pub mod chat {
    /// Maximum number of history messages sent as model context.
    pub const DEFAULT_HISTORY_LIMIT: usize = 40;

    /// Input that ends an interactive session.
    pub const QUIT_COMMAND: &str = "/quit";
}

/// Subscription plan identifiers (storage values, not display names).
pub mod plan {
    pub const BASIC: &str = "basic";
    pub const PREMIUM: &str = "premium";
}

/// UI limits.
pub mod ui {
    /// Maximum length of an error body shown to the user.
    pub const ERROR_PREVIEW_LENGTH: usize = 500;
}
