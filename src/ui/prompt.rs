//! Interactive prompt helpers built on inquire.

use inquire::{Confirm, Password, Select, Text};

use crate::error::{CoachError, Result};

/// Asks for a line of text; an interrupted prompt maps to
/// [`CoachError::UserCancelled`].
pub fn text(message: &str) -> Result<String> {
    Text::new(message).prompt().map_err(map_cancel)
}

/// Asks for a line of text with a pre-filled default.
pub fn text_with_default(message: &str, default: &str) -> Result<String> {
    Text::new(message)
        .with_default(default)
        .prompt()
        .map_err(map_cancel)
}

/// Asks for a password without echoing.
pub fn password(message: &str) -> Result<String> {
    Password::new(message)
        .without_confirmation()
        .prompt()
        .map_err(map_cancel)
}

/// Asks a yes/no question.
pub fn confirm(message: &str, default: bool) -> Result<bool> {
    Confirm::new(message)
        .with_default(default)
        .prompt()
        .map_err(map_cancel)
}

/// Asks the user to pick one option.
pub fn select<T: std::fmt::Display>(message: &str, options: Vec<T>) -> Result<T> {
    Select::new(message, options).prompt().map_err(map_cancel)
}

fn map_cancel(e: inquire::InquireError) -> CoachError {
    match e {
        inquire::InquireError::OperationCanceled
        | inquire::InquireError::OperationInterrupted => CoachError::UserCancelled,
        other => CoachError::Prompt(other),
    }
}
