//! Command implementations.
//!
//! # Modules
//! - `chat` - Interactive coach session with streaming replies.
//! - `sessions` - Conversation history management.
//! - `account` - Sign-in / sign-up / sign-out flows.
//! - `plan` - Subscription plan selector.
//! - `dashboard` - Admin overview.
//! - `init` - Configuration initialization.

/// Auth flows (login, signup, logout, password reset).
pub mod account;
/// Interactive coach chat flow.
pub mod chat;
/// Admin overview command.
pub mod dashboard;
/// Configuration initialization command.
pub mod init;
/// Subscription plan command.
pub mod plan;
/// Conversation history commands.
pub mod sessions;

use crate::backend::BackendClient;
use crate::backend::session::require_session;
use crate::backend::types::Session;
use crate::config::AppConfig;
use crate::error::Result;

/// Builds a backend client authenticated with the stored session.
pub(crate) fn signed_in_client(config: &AppConfig) -> Result<(BackendClient, Session)> {
    let session = require_session()?;
    let mut client = BackendClient::new(&config.backend, &config.network)?;
    client.set_access_token(&session.access_token);
    Ok((client, session))
}
