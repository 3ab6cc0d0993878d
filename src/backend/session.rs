//! Local session persistence.
//!
//! The access token is stored next to the config file so a signed-in user
//! stays signed in across invocations.

use std::fs;
use std::path::PathBuf;

use super::types::Session;
use crate::error::{CoachError, Result};

/// Returns the session file path (`<config_dir>/session.json`).
pub fn session_path() -> Result<PathBuf> {
    crate::config::get_config_dir()
        .map(|dir| dir.join("session.json"))
        .ok_or_else(|| CoachError::Config("Failed to determine config directory".to_string()))
}

/// Persists the session, restricting permissions on Unix.
pub fn save_session(session: &Session) -> Result<()> {
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(session)?)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Loads the stored session, if any. A corrupt file is treated as absent.
pub fn load_session() -> Result<Option<Session>> {
    let path = session_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    match serde_json::from_str(&content) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            tracing::warn!("Ignoring corrupt session file: {}", e);
            Ok(None)
        }
    }
}

/// Removes the stored session.
pub fn clear_session() -> Result<()> {
    let path = session_path()?;
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

/// Loads the stored session and rejects a missing or expired one.
pub fn require_session() -> Result<Session> {
    match load_session()? {
        Some(session) if !session.is_expired() => Ok(session),
        Some(_) => Err(CoachError::Auth(
            rust_i18n::t!("auth.session_expired").to_string(),
        )),
        None => Err(CoachError::NotSignedIn),
    }
}
