//! Admin overview of users, plans, and activity.
//!
//! Whether the listing succeeds depends on the backend's row policies;
//! regular accounts only see their own rows.

use colored::Colorize;

use crate::backend::types::Plan;
use crate::config::AppConfig;
use crate::error::Result;
use crate::ui::{self, Spinner};

pub async fn run(config: &AppConfig) -> Result<()> {
    let colored = config.ui.colored;
    let (client, _session) = super::signed_in_client(config)?;

    let spinner = Spinner::new(&rust_i18n::t!("dashboard.loading"));
    let profiles = client.list_profiles().await?;
    spinner.finish_and_clear();

    if profiles.is_empty() {
        println!("{}", ui::info(&rust_i18n::t!("dashboard.empty"), colored));
        return Ok(());
    }

    println!(
        "{}",
        ui::info(
            &rust_i18n::t!("dashboard.user_count", count = profiles.len()),
            colored
        )
    );

    for profile in &profiles {
        let plan = match client.get_subscription(&profile.id).await? {
            Some(subscription) => subscription.plan,
            None => Plan::Basic,
        };
        let conversations = client.list_conversations(&profile.id).await?;

        let name = profile
            .full_name
            .as_deref()
            .or(profile.email.as_deref())
            .unwrap_or(profile.id.as_str());
        let detail = rust_i18n::t!(
            "dashboard.user_line",
            plan = plan.label(),
            sessions = conversations.len()
        );
        if colored {
            println!("  {}  {}", name.bold(), detail.bright_black());
        } else {
            println!("  {}  {}", name, detail);
        }
    }
    Ok(())
}
