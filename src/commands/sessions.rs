//! Conversation history management.

use colored::Colorize;

use crate::config::AppConfig;
use crate::error::{CoachError, Result};
use crate::ui;

/// Lists the user's conversations, newest first.
pub async fn list(config: &AppConfig) -> Result<()> {
    let colored = config.ui.colored;
    let (client, session) = super::signed_in_client(config)?;

    let conversations = client.list_conversations(&session.user_id).await?;
    if conversations.is_empty() {
        println!("{}", ui::info(&rust_i18n::t!("sessions.none"), colored));
        return Ok(());
    }

    for conversation in &conversations {
        let date = conversation.created_at.format("%Y-%m-%d %H:%M");
        if colored {
            println!(
                "{}  {}  {}",
                conversation.id.bright_black(),
                date.to_string().bright_black(),
                conversation.title.bold()
            );
        } else {
            println!("{}  {}  {}", conversation.id, date, conversation.title);
        }
    }
    Ok(())
}

/// Renames a conversation.
pub async fn rename(id: &str, title: &str, config: &AppConfig) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoachError::InvalidInput(
            rust_i18n::t!("sessions.empty_title").to_string(),
        ));
    }

    let (client, session) = super::signed_in_client(config)?;
    let conversation = client
        .rename_conversation(id, &session.user_id, title)
        .await?;
    ui::success(
        &rust_i18n::t!("sessions.renamed", title = conversation.title.as_str()),
        config.ui.colored,
    );
    Ok(())
}

/// Deletes a conversation (asks for confirmation unless `yes`).
pub async fn delete(id: &str, yes: bool, config: &AppConfig) -> Result<()> {
    let colored = config.ui.colored;
    let (client, session) = super::signed_in_client(config)?;

    let conversation = client.get_conversation(id, &session.user_id).await?;
    if !yes {
        let confirmed = ui::confirm(
            &rust_i18n::t!("sessions.confirm_delete", title = conversation.title.as_str()),
            false,
        )?;
        if !confirmed {
            return Err(CoachError::UserCancelled);
        }
    }

    client.delete_conversation(id, &session.user_id).await?;
    ui::success(
        &rust_i18n::t!("sessions.deleted", title = conversation.title.as_str()),
        colored,
    );
    Ok(())
}
