pub mod message_commands;
pub mod user_commands;

use thiserror::Error;

/// Errors caused by the caller's input, reported back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserInputError {
    #[error("Validation notEmpty on {0} failed")]
    Empty(&'static str),
    #[error("Validation isEmail on email failed")]
    InvalidEmail,
    #[error("Validation len on password failed")]
    PasswordLength,
    #[error("{0} must be unique")]
    Duplicate(&'static str),
    #[error("No user found with this login credentials.")]
    InvalidCredentials,
}

impl UserInputError {
    pub fn code(&self) -> &'static str {
        match self {
            UserInputError::InvalidCredentials => "INVALID_CREDENTIALS",
            _ => "VALIDATION_FAILED",
        }
    }
}
