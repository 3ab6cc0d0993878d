//! # pitchcoach
//!
//! AI negotiation coach in your terminal.
//!
//! Streams coaching replies token by token, keeps your sessions in a
//! hosted backend, and speaks French by default (English via
//! `ui.language = "en"`).
//!
//! ## Quick start
//! ```bash
//! cargo install pitchcoach
//!
//! pitchcoach init
//! pitchcoach signup
//! pitchcoach login
//! pitchcoach chat
//! ```
//!
//! ## Core modules
//! - [`llm`] - Completion provider interface, streaming assembly
//! - [`backend`] - Auth, sessions, conversations, subscriptions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration management
//! - [`error`] - Unified error type
//! - [`ui`] - Terminal output helpers
//!
//! ## Configuration
//! Config file location:
//! - Linux: `~/.config/pitchcoach/config.toml`
//! - macOS: `~/Library/Application Support/pitchcoach/config.toml`
//! - Windows: `%APPDATA%\pitchcoach\config\config.toml`
//!
//! Example:
//! ```toml
//! [llm]
//! model = "meta-llama/llama-4-maverick:free"
//!
//! [backend]
//! url = "https://your-project.supabase.co"
//! anon_key = "eyJ..."
//! ```

#[macro_use]
extern crate rust_i18n;

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod llm;
pub mod ui;

// Initialize i18n for library modules
i18n!("locales", fallback = "en");
