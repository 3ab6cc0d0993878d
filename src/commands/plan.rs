//! Subscription plan selector.

use crate::backend::types::Plan;
use crate::config::AppConfig;
use crate::error::{CoachError, Result};
use crate::ui;

/// Shows the current plan; with `set`, switches to the named plan.
pub async fn run(set: Option<&str>, config: &AppConfig) -> Result<()> {
    let colored = config.ui.colored;
    let (client, session) = super::signed_in_client(config)?;

    let current = client
        .ensure_subscription(&session.user_id, Plan::Basic)
        .await?;

    let target = match set {
        Some(name) => name
            .parse::<Plan>()
            .map_err(CoachError::InvalidInput)?,
        None => {
            println!(
                "{}",
                ui::info(
                    &rust_i18n::t!("plan.current", plan = current.plan.label()),
                    colored
                )
            );
            let options = vec![Plan::Basic, Plan::Premium];
            match ui::select(&rust_i18n::t!("plan.pick"), options) {
                Ok(plan) => plan,
                Err(CoachError::UserCancelled) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    };

    if target == current.plan {
        println!(
            "{}",
            ui::info(
                &rust_i18n::t!("plan.already_on", plan = target.label()),
                colored
            )
        );
        return Ok(());
    }

    let updated = client.change_plan(&session.user_id, target).await?;
    ui::success(
        &rust_i18n::t!("plan.changed", plan = updated.plan.label()),
        colored,
    );
    Ok(())
}
