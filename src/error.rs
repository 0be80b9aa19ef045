use reqwest::StatusCode;
use thiserror::Error;

/// Field names used in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Amount,
    Date,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Date => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing {}", .0.as_str())]
    MissingField(Field),
    #[error("amount '{0}' is not a number")]
    InvalidAmount(String),
}

impl ValidationError {
    /// Message shown to the user in the error alert.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "Please fill out all fields, including the date.",
            ValidationError::InvalidAmount(_) => "Amount must be a valid number.",
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("calendar request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("calendar API responded {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl NotifyError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NotifyError::Status { .. } => "Failed to log transaction.",
            NotifyError::Transport(_) => "An error occurred while logging the transaction.",
        }
    }
}
