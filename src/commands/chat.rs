//! Interactive coach session.
//!
//! Resumes or creates a conversation, replays its history, then loops:
//! read user input, persist it, stream the coach reply live, persist the
//! reply.

use colored::Colorize;

use crate::backend::BackendClient;
use crate::backend::types::{Conversation, MessageRole};
use crate::config::AppConfig;
use crate::constants;
use crate::error::{CoachError, Result};
use crate::llm::provider::create_provider;
use crate::llm::{ChatMessage, CompletionProvider, prompt};
use crate::ui::{self, StreamingOutput};

pub async fn run(session_id: Option<&str>, new: bool, config: &AppConfig) -> Result<()> {
    let colored = config.ui.colored;
    let (client, session) = super::signed_in_client(config)?;
    let provider = create_provider(config)?;
    let locale = rust_i18n::locale().to_string();

    let conversation = pick_conversation(&client, &session.user_id, session_id, new).await?;
    ui::step(
        "chat",
        &rust_i18n::t!("chat.opened", title = conversation.title.as_str()),
        colored,
    );

    // Replay stored history and keep it as model context
    let stored = client.list_messages(&conversation.id).await?;
    let mut history: Vec<ChatMessage> = Vec::with_capacity(stored.len());
    for message in &stored {
        replay_message(message.role, &message.content, colored);
        history.push(ChatMessage {
            role: message.role.into(),
            content: message.content.clone(),
        });
    }

    println!();
    println!(
        "{}",
        ui::info(&rust_i18n::t!("chat.quit_hint"), colored)
    );

    loop {
        let input = match ui::text(&rust_i18n::t!("chat.you_label")) {
            Ok(input) => input,
            Err(CoachError::UserCancelled) => break,
            Err(e) => return Err(e),
        };
        let input = input.trim().to_string();
        if input.is_empty() || input == constants::chat::QUIT_COMMAND {
            break;
        }

        client
            .add_message(&conversation.id, MessageRole::User, &input)
            .await?;

        let context = trimmed_history(&history, config.chat.history_limit);
        let messages = prompt::build_chat_messages(&locale, context, &input);

        println!("{}", ui::coach_label(colored));
        let reply = match stream_reply(provider.as_ref(), &messages, colored).await {
            Ok(reply) => reply,
            Err(e) => {
                // The stream printer already showed the error; offer the
                // localized fallback line and keep the session alive.
                tracing::debug!("Streaming reply failed: {}", e);
                ui::warning(&rust_i18n::t!("chat.error_fallback"), colored);
                history.push(ChatMessage::user(&input));
                continue;
            }
        };

        history.push(ChatMessage::user(&input));
        if reply.is_empty() {
            // Zero fragments is a successful-but-empty outcome
            ui::warning(&rust_i18n::t!("chat.empty_reply"), colored);
            continue;
        }

        client
            .add_message(&conversation.id, MessageRole::Assistant, &reply)
            .await?;
        history.push(ChatMessage::assistant(&reply));
    }

    ui::success(&rust_i18n::t!("chat.session_ended"), colored);
    Ok(())
}

/// Streams one reply, printing deltas as they arrive.
async fn stream_reply(
    provider: &dyn CompletionProvider,
    messages: &[ChatMessage],
    colored: bool,
) -> Result<String> {
    let handle = provider.stream_chat(messages).await?;
    let mut output = StreamingOutput::new(colored);
    output.process(handle).await
}

/// Resolves which conversation to chat in.
async fn pick_conversation(
    client: &BackendClient,
    user_id: &str,
    session_id: Option<&str>,
    new: bool,
) -> Result<Conversation> {
    if let Some(id) = session_id {
        return client.get_conversation(id, user_id).await;
    }
    if new {
        return client.create_conversation(user_id, None).await;
    }

    let existing = client.list_conversations(user_id).await?;
    if existing.is_empty() {
        return client.create_conversation(user_id, None).await;
    }

    let new_label = rust_i18n::t!("chat.new_session").to_string();
    let mut options = vec![new_label.clone()];
    options.extend(existing.iter().map(|c| c.title.clone()));

    let choice = ui::select(&rust_i18n::t!("chat.pick_session"), options)?;
    if choice == new_label {
        client.create_conversation(user_id, None).await
    } else {
        // Titles are generated sequentially, so matching on the title is
        // unambiguous in practice; fall back to the newest on a tie.
        existing
            .into_iter()
            .find(|c| c.title == choice)
            .ok_or_else(|| CoachError::Other("Selected conversation disappeared".to_string()))
    }
}

fn replay_message(role: MessageRole, content: &str, colored: bool) {
    match role {
        MessageRole::User => {
            let label = rust_i18n::t!("chat.you_label").to_string();
            if colored {
                println!("{} {}", label.bold(), content);
            } else {
                println!("{} {}", label, content);
            }
        }
        MessageRole::Assistant => {
            println!("{}", ui::coach_label(colored));
            if colored {
                println!("{}", content.yellow());
            } else {
                println!("{}", content);
            }
        }
    }
}

/// Keeps only the most recent messages as model context.
fn trimmed_history(history: &[ChatMessage], limit: usize) -> &[ChatMessage] {
    let start = history.len().saturating_sub(limit);
    &history[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trimmed_history_keeps_most_recent() {
        let history: Vec<ChatMessage> = (0..5)
            .map(|i| ChatMessage::user(format!("m{}", i)))
            .collect();

        let trimmed = trimmed_history(&history, 2);
        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed[0].content, "m3");
        assert_eq!(trimmed[1].content, "m4");

        let all = trimmed_history(&history, 10);
        assert_eq!(all.len(), 5);
    }
}
