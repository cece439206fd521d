pub mod prompt;

use crate::roster::{normalize_email, Roster};
use std::fmt;

// Re-export prompt functions for convenience
pub use prompt::{gate_interactive, prompt_for_email};

#[derive(Debug, PartialEq)]
pub enum GateError {
    EmptyEmail,
    NotRegistered(String),
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::EmptyEmail => write!(f, "Email cannot be empty"),
            GateError::NotRegistered(email) => {
                write!(f, "{} is not on the candidate roster", email)
            }
        }
    }
}

impl std::error::Error for GateError {}

/// Existence check against the roster. Deliberately not an authentication
/// mechanism: knowing a registered email is the whole credential.
///
/// Returns the normalized email on success, which is the key all
/// subsequent roster operations use.
pub fn authorize(roster: &Roster, email: &str) -> Result<String, GateError> {
    let normalized = normalize_email(email);
    if normalized.is_empty() {
        return Err(GateError::EmptyEmail);
    }
    if roster.contains(&normalized) {
        Ok(normalized)
    } else {
        Err(GateError::NotRegistered(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_email_passes() {
        let mut roster = Roster::new();
        roster.register("ada@example.com", None);
        assert_eq!(
            authorize(&roster, "ada@example.com"),
            Ok("ada@example.com".to_string())
        );
    }

    #[test]
    fn test_authorize_normalizes() {
        let mut roster = Roster::new();
        roster.register("ada@example.com", None);
        assert_eq!(
            authorize(&roster, "  ADA@Example.com "),
            Ok("ada@example.com".to_string())
        );
    }

    #[test]
    fn test_unknown_email_rejected() {
        let roster = Roster::new();
        assert_eq!(
            authorize(&roster, "ghost@example.com"),
            Err(GateError::NotRegistered("ghost@example.com".to_string()))
        );
    }

    #[test]
    fn test_empty_email_rejected() {
        let roster = Roster::new();
        assert_eq!(authorize(&roster, "   "), Err(GateError::EmptyEmail));
    }
}
