//! Per-field checks applied to client and session inputs/patches before they
//! are merged into the ledger.

use thiserror::Error;

const MAX_TEXT_LEN: usize = 200;
const MAX_NOTES_LEN: usize = 2_000;
/// One day; anything longer is a typo in the booking form.
const MAX_DURATION_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Empty(&'static str),

    #[error("{field} is too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },

    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),

    #[error("Session duration must be between 1 and 1440 minutes, got {0}")]
    InvalidDuration(u32),
}

pub fn validate_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    validate_text("email", email)?;

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| ValidationError::InvalidEmail(email.to_string()))?;
    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Phone numbers are free-form ("(555) 123-4567"); only the length is bounded.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "phone",
            max: MAX_TEXT_LEN,
        });
    }
    Ok(())
}

pub fn validate_duration(minutes: u32) -> Result<(), ValidationError> {
    if minutes == 0 || minutes > MAX_DURATION_MINUTES {
        return Err(ValidationError::InvalidDuration(minutes));
    }
    Ok(())
}

pub fn validate_notes(notes: &str) -> Result<(), ValidationError> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes",
            max: MAX_NOTES_LEN,
        });
    }
    Ok(())
}
