// Configuration loading.
//
// Layers, from lowest to highest priority:
// 1. Defaults (serde defaults on the structs)
// 2. Config file (~/.config/pitchcoach/config.toml)
// 3. Environment variables (PITCHCOACH__* with double-underscore nesting,
//    e.g. PITCHCOACH__UI__COLORED=false)
//
// `OPENROUTER_API_KEY` is honored as a fallback for `llm.api_key` so the
// key can stay out of the config file entirely.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;

use super::structs::AppConfig;
use crate::error::Result;

/// Loads the application configuration from the default file location.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(get_config_path().as_deref())
}

/// Loads configuration from an explicit file path (tests use this to avoid
/// touching the user's real config).
pub fn load_config_from(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path
        && path.exists()
    {
        builder = builder.add_source(File::from(path.to_path_buf()).format(FileFormat::Toml));
    }

    builder = builder.add_source(
        Environment::with_prefix("PITCHCOACH")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let mut app_config: AppConfig = config.try_deserialize()?;

    if app_config.llm.api_key.is_none()
        && let Ok(key) = std::env::var("OPENROUTER_API_KEY")
        && !key.trim().is_empty()
    {
        app_config.llm.api_key = Some(key);
    }

    app_config.validate()?;
    Ok(app_config)
}

/// Returns the config file path (`~/.config/pitchcoach/config.toml` on
/// Linux).
pub fn get_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pitchcoach").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Returns the config directory path.
pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pitchcoach").map(|dirs| dirs.config_dir().to_path_buf())
}
