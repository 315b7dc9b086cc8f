use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{email::Email, password::Password};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("{0} field is empty.")]
    MissingField(&'static str),
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("Invalid user id.")]
    InvalidUserId,
    #[error("Unknown user status: {0}")]
    UnknownStatus(String),
}

/// Unwrap an optional request field, treating blank strings as absent.
pub fn required(
    value: Option<Secret<String>>,
    field: &'static str,
) -> Result<Secret<String>, UserError> {
    match value {
        Some(value) if !value.expose_secret().trim().is_empty() => Ok(value),
        _ => Err(UserError::MissingField(field)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for UserId {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| UserError::InvalidUserId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UserError::MissingField("Name"));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

impl FromStr for UserStatus {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(UserError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Registration input handed to a `UserStore`. The store owns hashing.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password: Password,
}

/// A persisted local user.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    password_hash: Secret<String>,
    status: UserStatus,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: Email,
        password_hash: Secret<String>,
        status: UserStatus,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            status,
        }
    }

    /// Rebuild a user from raw stored columns.
    pub fn parse(
        id: Uuid,
        name: String,
        email: Secret<String>,
        password_hash: Secret<String>,
        status: &str,
    ) -> Result<Self, UserError> {
        Ok(Self {
            id: UserId::from(id),
            name: UserName::try_from(name)?,
            email: Email::try_from(email)?,
            password_hash,
            status: status.parse()?,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.as_str().to_owned(),
            email: self.email.as_str().to_owned(),
            status: self.status,
        }
    }
}

/// Public projection of a user; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
}
