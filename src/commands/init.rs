//! Writes a starter configuration file.

use std::fs;

use crate::config::{AppConfig, get_config_path};
use crate::error::{CoachError, Result};
use crate::ui;

const CONFIG_TEMPLATE: &str = include_str!("../../demos/config.toml.example");

/// Creates `config.toml` in the platform config directory.
pub fn run(force: bool, config: &AppConfig) -> Result<()> {
    let colored = config.ui.colored;
    let path = get_config_path().ok_or_else(|| {
        CoachError::Config(rust_i18n::t!("init.no_config_dir").to_string())
    })?;

    if path.exists() && !force {
        ui::warning(
            &rust_i18n::t!("init.already_exists", path = path.display()),
            colored,
        );
        println!("{}", ui::info(&rust_i18n::t!("init.force_hint"), colored));
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, CONFIG_TEMPLATE)?;

    // The file may hold an API key later on
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
    }

    ui::success(
        &rust_i18n::t!("init.created", path = path.display()),
        colored,
    );
    println!("{}", ui::info(&rust_i18n::t!("init.next_steps"), colored));
    Ok(())
}
