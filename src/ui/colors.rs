use colored::Colorize;

/// Prints a success message (green check).
pub fn success(msg: &str, colored: bool) {
    if colored {
        println!("{} {}", "✓".green().bold(), msg.green());
    } else {
        println!("✓ {}", msg);
    }
}

/// Prints an error message (red cross).
pub fn error(msg: &str, colored: bool) {
    if colored {
        eprintln!("{} {}", "✗".red().bold(), msg.red());
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Prints a warning message (yellow).
pub fn warning(msg: &str, colored: bool) {
    if colored {
        println!("{} {}", "⚠".yellow().bold(), msg.yellow());
    } else {
        println!("⚠ {}", msg);
    }
}

/// Formats an info message (blue).
pub fn info(msg: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "ℹ".blue().bold(), msg.blue())
    } else {
        format!("ℹ {}", msg)
    }
}

/// Prints a dimmed step hint.
pub fn step(step: &str, msg: &str, colored: bool) {
    if colored {
        println!(
            "{} {}",
            format!("[{}]", step).bright_black().bold(),
            msg.bright_black()
        );
    } else {
        println!("[{}] {}", step, msg);
    }
}

/// Truncates a raw error body to a displayable preview.
pub fn error_preview(body: &str) -> String {
    let limit = crate::constants::ui::ERROR_PREVIEW_LENGTH;
    if body.chars().count() <= limit {
        body.to_string()
    } else {
        let cut: String = body.chars().take(limit).collect();
        format!("{}...", cut)
    }
}

/// Formats the coach speaker label shown before a streamed reply.
pub fn coach_label(colored: bool) -> String {
    let label = rust_i18n::t!("chat.coach_label").to_string();
    if colored {
        label.cyan().bold().to_string()
    } else {
        label
    }
}
