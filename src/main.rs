#[macro_use]
extern crate rust_i18n;

use pitchcoach::*;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use cli::{Cli, Commands, SessionsAction};
use tokio::runtime::Runtime;

// Initialize i18n for binary crate
i18n!("locales", fallback = "en");

fn main() -> Result<()> {
    human_panic::setup_panic!();

    // reqwest is built without a default TLS provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    // Locale must be set before clap renders help text
    init_locale_early();

    let cli = parse_cli_localized()?;

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    // `init` must run even when the existing config is broken
    let config = match &cli.command {
        Commands::Init { .. } => config::load_config().unwrap_or_default(),
        _ => config::load_config()?,
    };

    let rt = Runtime::new()?;
    rt.block_on(async {
        let outcome = match cli.command {
            Commands::Chat { ref session, new } => {
                commands::chat::run(session.as_deref(), new, &config).await
            }
            Commands::Sessions { action } => match action {
                SessionsAction::List => commands::sessions::list(&config).await,
                SessionsAction::Rename { ref id, ref title } => {
                    commands::sessions::rename(id, title, &config).await
                }
                SessionsAction::Delete { ref id, yes } => {
                    commands::sessions::delete(id, yes, &config).await
                }
            },
            Commands::Login { reset } => commands::account::login(reset, &config).await,
            Commands::Signup => commands::account::signup(&config).await,
            Commands::Logout => commands::account::logout(&config).await,
            Commands::Plan { ref set } => commands::plan::run(set.as_deref(), &config).await,
            Commands::Dashboard => commands::dashboard::run(&config).await,
            Commands::Init { force } => commands::init::run(force, &config),
        };

        if let Err(e) = outcome {
            match e {
                error::CoachError::UserCancelled => {
                    // Not an error, just stop
                    std::process::exit(0);
                }
                _ => {
                    ui::error(&e.to_string(), config.ui.colored);
                    if let Some(suggestion) = e.suggestion() {
                        println!();
                        println!("{}", ui::info(&suggestion, config.ui.colored));
                    }
                    std::process::exit(1);
                }
            }
        }
        Ok(())
    })
}

/// Parse CLI arguments with localized help text
///
/// Uses clap's derive + runtime override pattern:
/// 1. Get Command from derive macro (type-safe parsing)
/// 2. Override help text at runtime with rust_i18n::t!()
/// 3. Parse and reconstruct the Cli struct
fn parse_cli_localized() -> Result<Cli> {
    let cmd = Cli::command()
        .about(rust_i18n::t!("cli.about").to_string())
        .mut_arg("verbose", |arg| {
            arg.help(rust_i18n::t!("cli.verbose").to_string())
        })
        .mut_subcommand("chat", |cmd| {
            cmd.about(rust_i18n::t!("cli.chat").to_string())
                .mut_arg("session", |arg| {
                    arg.help(rust_i18n::t!("cli.chat.session").to_string())
                })
                .mut_arg("new", |arg| {
                    arg.help(rust_i18n::t!("cli.chat.new").to_string())
                })
        })
        .mut_subcommand("sessions", |cmd| {
            cmd.about(rust_i18n::t!("cli.sessions").to_string())
                .mut_subcommand("list", |s| {
                    s.about(rust_i18n::t!("cli.sessions.list").to_string())
                })
                .mut_subcommand("rename", |s| {
                    s.about(rust_i18n::t!("cli.sessions.rename").to_string())
                        .mut_arg("id", |arg| {
                            arg.help(rust_i18n::t!("cli.sessions.rename.id").to_string())
                        })
                        .mut_arg("title", |arg| {
                            arg.help(rust_i18n::t!("cli.sessions.rename.title").to_string())
                        })
                })
                .mut_subcommand("delete", |s| {
                    s.about(rust_i18n::t!("cli.sessions.delete").to_string())
                        .mut_arg("id", |arg| {
                            arg.help(rust_i18n::t!("cli.sessions.delete.id").to_string())
                        })
                        .mut_arg("yes", |arg| {
                            arg.help(rust_i18n::t!("cli.sessions.delete.yes").to_string())
                        })
                })
        })
        .mut_subcommand("login", |cmd| {
            cmd.about(rust_i18n::t!("cli.login").to_string())
                .mut_arg("reset", |arg| {
                    arg.help(rust_i18n::t!("cli.login.reset").to_string())
                })
        })
        .mut_subcommand("signup", |cmd| {
            cmd.about(rust_i18n::t!("cli.signup").to_string())
        })
        .mut_subcommand("logout", |cmd| {
            cmd.about(rust_i18n::t!("cli.logout").to_string())
        })
        .mut_subcommand("plan", |cmd| {
            cmd.about(rust_i18n::t!("cli.plan").to_string())
                .mut_arg("set", |arg| {
                    arg.help(rust_i18n::t!("cli.plan.set").to_string())
                })
        })
        .mut_subcommand("dashboard", |cmd| {
            cmd.about(rust_i18n::t!("cli.dashboard").to_string())
        })
        .mut_subcommand("init", |cmd| {
            cmd.about(rust_i18n::t!("cli.init").to_string())
                .mut_arg("force", |arg| {
                    arg.help(rust_i18n::t!("cli.init.force").to_string())
                })
        });

    let matches = cmd.get_matches();
    Cli::from_arg_matches(&matches)
        .map_err(|e| anyhow::anyhow!("Failed to parse CLI arguments: {}", e))
}

/// Initialize locale early in the startup process
///
/// Priority order:
/// 1. Environment variable PITCHCOACH_UI_LANGUAGE (highest priority)
/// 2. Configuration file ui.language
/// 3. System locale detection
/// 4. Fallback to French
fn init_locale_early() {
    let locale = std::env::var("PITCHCOACH_UI_LANGUAGE")
        .ok()
        .or_else(|| get_language_from_config().ok())
        .or_else(detect_system_locale)
        .unwrap_or_else(|| "fr".to_string());

    rust_i18n::set_locale(&locale);
}

/// Attempt to read language setting from config file
///
/// This is a lightweight read that only parses the ui.language field
/// without loading or validating the entire configuration.
fn get_language_from_config() -> Result<String> {
    let config_path = config::get_config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if !config_path.exists() {
        return Err(anyhow::anyhow!("Config file not found"));
    }

    let content = std::fs::read_to_string(&config_path)?;
    let parsed: toml::Value = toml::from_str(&content)?;

    if let Some(language) = parsed
        .get("ui")
        .and_then(|ui| ui.get("language"))
        .and_then(|lang| lang.as_str())
    {
        Ok(language.to_string())
    } else {
        Err(anyhow::anyhow!("ui.language not found in config"))
    }
}

/// Detect system locale using sys-locale crate
///
/// Returns locale in BCP 47 format (e.g., "fr", "fr-FR", "en-US")
fn detect_system_locale() -> Option<String> {
    sys_locale::get_locale().map(|locale| locale.replace('_', "-"))
}
