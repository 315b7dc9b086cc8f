//! Value types exchanged with the managed identity provider.
//!
//! Provider payloads are decoded into these structures with every optional
//! field spelled out, so an absent field shows up as `None` at decode time.

use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::{email::Email, user::UserError};

pub const NEW_PASSWORD_REQUIRED: &str = "NEW_PASSWORD_REQUIRED";

const MINIMUM_PASSWORD_LENGTH: u8 = 8;
const REFRESH_TOKEN_VALIDITY_DAYS: u32 = 30;
const EXPLICIT_AUTH_FLOWS: [&str; 4] = [
    "ALLOW_ADMIN_USER_PASSWORD_AUTH",
    "ALLOW_CUSTOM_AUTH",
    "ALLOW_USER_SRP_AUTH",
    "ALLOW_REFRESH_TOKEN_AUTH",
];

/// Which pool and app client a request is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRouting {
    pub client_id: String,
    pub pool_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreName(String);

impl StoreName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StoreName {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UserError::MissingField("Store name"));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaAttribute {
    pub name: &'static str,
    pub data_type: &'static str,
    pub mutable: bool,
    pub required: bool,
}

/// Everything needed to provision one tenant pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPoolSpec {
    pub pool_name: String,
    pub allow_admin_create_user_only: bool,
    pub minimum_password_length: u8,
    pub schema: Vec<SchemaAttribute>,
    pub username_attributes: Vec<&'static str>,
    pub case_sensitive_usernames: bool,
}

impl UserPoolSpec {
    /// The name embeds `timestamp`, so two calls for the same store yield two
    /// distinct pools.
    pub fn for_store(store_name: &StoreName, store_id: i64, timestamp: i64) -> Self {
        Self {
            pool_name: format!("pool-{store_id}-{}-{timestamp}", store_name.as_str()),
            allow_admin_create_user_only: true,
            minimum_password_length: MINIMUM_PASSWORD_LENGTH,
            schema: vec![
                SchemaAttribute {
                    name: "store_name",
                    data_type: "String",
                    mutable: true,
                    required: false,
                },
                SchemaAttribute {
                    name: "email",
                    data_type: "String",
                    mutable: false,
                    required: true,
                },
            ],
            username_attributes: vec!["email"],
            case_sensitive_usernames: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolClientSpec {
    pub client_name: String,
    pub user_pool_id: String,
    pub explicit_auth_flows: Vec<&'static str>,
    pub generate_secret: bool,
    pub refresh_token_validity_days: u32,
    pub prevent_user_existence_errors: bool,
}

impl PoolClientSpec {
    pub fn for_store(
        store_name: &StoreName,
        store_id: i64,
        timestamp: i64,
        user_pool_id: String,
    ) -> Self {
        Self {
            client_name: format!("client-{store_id}-{}-{timestamp}", store_name.as_str()),
            user_pool_id,
            explicit_auth_flows: EXPLICIT_AUTH_FLOWS.to_vec(),
            generate_secret: false,
            refresh_token_validity_days: REFRESH_TOKEN_VALIDITY_DAYS,
            prevent_user_existence_errors: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCredentials {
    pub pool_id: String,
    pub client_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}

/// Answer to an initiate-auth or respond-to-challenge call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthResponse {
    pub challenge_name: Option<String>,
    pub session: Option<String>,
    pub authentication_result: Option<AuthenticationResult>,
}

impl InitiateAuthResponse {
    pub fn requires_new_password(&self) -> bool {
        self.challenge_name.as_deref() == Some(NEW_PASSWORD_REQUIRED)
    }

    pub fn id_token(&self) -> Option<&str> {
        self.authentication_result.as_ref()?.id_token.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.authentication_result.as_ref()?.access_token.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserAttribute {
    pub name: String,
    pub value: Option<String>,
}

impl UserAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// A user as reported back by the provider after admin creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderUser {
    pub username: String,
    #[serde(default)]
    pub attributes: Vec<UserAttribute>,
    pub user_status: Option<String>,
}

impl ProviderUser {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .and_then(|attribute| attribute.value.as_deref())
    }
}

/// Admin-side user creation request. The provider mails the temporary
/// password to `email`.
#[derive(Debug, Clone)]
pub struct NewFederatedUser {
    pub pool_id: String,
    pub email: Email,
    pub temporary_password: Secret<String>,
    pub attributes: Vec<UserAttribute>,
}

/// Outcome of a federated login step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FederatedSession {
    Authenticated {
        cognito_username: String,
    },
    ChallengePending {
        cognito_session: String,
        email: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FederatedUser {
    pub name: String,
    pub email: String,
    pub cognito_username: String,
    pub cognito_id: String,
}
