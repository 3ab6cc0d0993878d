//! Sign-in, sign-up, and sign-out flows.

use crate::backend::BackendClient;
use crate::backend::session::{clear_session, load_session, save_session};
use crate::config::AppConfig;
use crate::error::Result;
use crate::ui::{self, Spinner};

/// Signs in with email/password and stores the session locally.
///
/// With `reset`, sends a password-recovery email instead.
pub async fn login(reset: bool, config: &AppConfig) -> Result<()> {
    let colored = config.ui.colored;
    let mut client = BackendClient::new(&config.backend, &config.network)?;

    if reset {
        let email = ui::text(&rust_i18n::t!("auth.email_prompt"))?;
        client.reset_password(email.trim()).await?;
        ui::success(&rust_i18n::t!("auth.reset_sent", email = email.trim()), colored);
        return Ok(());
    }

    let email = ui::text(&rust_i18n::t!("auth.email_prompt"))?;
    let password = ui::password(&rust_i18n::t!("auth.password_prompt"))?;

    let spinner = Spinner::new(&rust_i18n::t!("auth.signing_in"));
    let session = client.sign_in(email.trim(), &password).await?;
    spinner.finish_and_clear();

    save_session(&session)?;
    ui::success(
        &rust_i18n::t!(
            "auth.signed_in",
            email = session.email.as_deref().unwrap_or(email.trim())
        ),
        colored,
    );
    Ok(())
}

/// Registers a new account.
pub async fn signup(config: &AppConfig) -> Result<()> {
    let colored = config.ui.colored;
    let client = BackendClient::new(&config.backend, &config.network)?;

    let full_name = ui::text(&rust_i18n::t!("auth.full_name_prompt"))?;
    let email = ui::text(&rust_i18n::t!("auth.email_prompt"))?;
    let password = ui::password(&rust_i18n::t!("auth.password_prompt"))?;

    let spinner = Spinner::new(&rust_i18n::t!("auth.signing_up"));
    client
        .sign_up(email.trim(), &password, full_name.trim())
        .await?;
    spinner.finish_and_clear();

    ui::success(&rust_i18n::t!("auth.signed_up"), colored);
    println!("{}", ui::info(&rust_i18n::t!("auth.confirm_email_hint"), colored));
    Ok(())
}

/// Revokes the session server-side (best effort) and clears the local
/// token.
pub async fn logout(config: &AppConfig) -> Result<()> {
    let colored = config.ui.colored;

    if let Some(session) = load_session()? {
        let mut client = BackendClient::new(&config.backend, &config.network)?;
        client.set_access_token(&session.access_token);
        if let Err(e) = client.sign_out().await {
            tracing::warn!("Server-side sign-out failed: {}", e);
        }
    }

    clear_session()?;
    ui::success(&rust_i18n::t!("auth.signed_out"), colored);
    Ok(())
}
