use clap::{Parser, Subcommand, builder::styling};

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser)]
#[command(name = "pitchcoach")]
#[command(author, version, long_about = None)]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start or resume a coaching session
    Chat {
        /// Resume a specific session by id
        #[arg(short, long)]
        session: Option<String>,

        /// Start a fresh session without prompting
        #[arg(short, long)]
        new: bool,
    },

    /// Manage saved coaching sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsAction,
    },

    /// Sign in to your account
    Login {
        /// Send a password-reset email instead of signing in
        #[arg(short, long)]
        reset: bool,
    },

    /// Create a new account
    Signup,

    /// Sign out and clear the stored session
    Logout,

    /// Show or change your subscription plan
    Plan {
        /// Plan to switch to: basic | premium
        set: Option<String>,
    },

    /// Overview of users, plans and activity
    Dashboard,

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List your sessions, newest first
    List,

    /// Rename a session
    Rename {
        /// Session id
        id: String,

        /// New title
        title: String,
    },

    /// Delete a session and its messages
    Delete {
        /// Session id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}
