//! Login form core module.
//!
//! This module contains the login submission pipeline, including:
//! - Form data model (Credentials, SubmissionState, StatusMessage, FieldError)
//! - Field validation (`validate`)
//! - Identifier input masking (`mask`)
//! - Status message lifecycle (`message`)
//! - The submission controller state machine (`controller`)

mod controller;
mod mask;
mod message;
mod validate;

pub use controller::LoginController;
pub use mask::mask_identifier_input;
pub use message::MessagePresenter;
pub use validate::{is_valid_identifier, is_valid_password};

use chrono::{DateTime, Utc};

/// Shown on a field left empty at submission time.
pub const MSG_REQUIRED_FIELD: &str = "Required field";

/// Shown on an identifier that is neither email-shaped nor a national ID.
pub const MSG_INVALID_IDENTIFIER: &str = "Enter a valid e-mail or ID number";

/// Shown on a password shorter than the minimum length.
pub const MSG_PASSWORD_TOO_SHORT: &str = "Minimum 6 characters";

/// Banner text for a completed sign-in.
pub const MSG_LOGIN_SUCCESS: &str = "Signed in successfully.";

/// Banner fallback when the server rejects without a message of its own.
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Banner text when the server could not be reached or answered garbage.
pub const MSG_CONNECTION_FAILED: &str = "Could not connect to the server. Please try again.";

/// Values read from the form at submission time.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
    pub remember: bool,
}

/// Specify the login form input fields.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Identifier,
    Password,
}

/// Inline validation message attached to one specific input. At most one
/// exists per field at a time.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Specify submission attempt state. Starts in `Idle`; enters `Submitting`
/// only after local validation passes; a failed attempt implicitly returns
/// to `Idle` on the next submit trigger.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Specify status banner flavor.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The single transient banner communicating submission success or failure.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl StatusMessage {
    /// Return a new message stamped with the current time.
    ///
    pub fn new(kind: StatusKind, text: &str) -> Self {
        StatusMessage {
            kind,
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_state_transitions_are_distinct() {
        assert_eq!(SubmissionState::Idle, SubmissionState::Idle);
        assert_ne!(SubmissionState::Idle, SubmissionState::Submitting);
        assert_ne!(SubmissionState::Submitting, SubmissionState::Succeeded);
        assert_ne!(SubmissionState::Succeeded, SubmissionState::Failed);
    }

    #[test]
    fn test_status_message_new() {
        let message = StatusMessage::new(StatusKind::Error, "Invalid credentials.");
        assert_eq!(message.kind, StatusKind::Error);
        assert_eq!(message.text, "Invalid credentials.");
    }

    #[test]
    fn test_field_error_per_field() {
        let error = FieldError {
            field: Field::Identifier,
            message: MSG_REQUIRED_FIELD.to_string(),
        };
        assert_eq!(error.field, Field::Identifier);
        assert_ne!(error.field, Field::Password);
        assert_eq!(error.message, "Required field");
    }

    #[test]
    fn test_credentials_equality() {
        let credentials = Credentials {
            identifier: "user@example.com".to_string(),
            password: "secret1".to_string(),
            remember: false,
        };
        assert_eq!(credentials, credentials.clone());
    }
}
