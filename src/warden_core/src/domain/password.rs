use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

/// A non-empty password candidate.
///
/// Strength rules are left to whichever backend stores the credential; the
/// identity provider enforces its own pool policy.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Copy with surrounding whitespace removed.
    pub fn trimmed(&self) -> Password {
        Password(Secret::from(self.0.expose_secret().trim().to_owned()))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().trim().is_empty() {
            return Err(UserError::MissingField("Password"));
        }
        Ok(Self(value))
    }
}
