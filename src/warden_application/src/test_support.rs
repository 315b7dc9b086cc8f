//! Hand-rolled doubles shared by the use case tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use warden_core::{
    Email, IdentityProvider, IdentityProviderError, InitiateAuthResponse, NewFederatedUser,
    NewUser, Password, PoolClientSpec, PoolRouting, ProviderUser, SessionClaims, TokenCodec,
    TokenCodecError, User, UserId, UserName, UserStatus, UserStore, UserStoreError, UserPoolSpec,
};

pub fn email(value: &str) -> Email {
    Email::try_from(Secret::from(value.to_owned())).unwrap()
}

pub fn password(value: &str) -> Password {
    Password::try_from(Secret::from(value.to_owned())).unwrap()
}

/// Stores passwords verbatim in the hash slot.
#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl MockUserStore {
    pub fn with_user(name: &str, address: &str, secret: &str, status: UserStatus) -> Self {
        let user = User::new(
            UserId::new(),
            UserName::try_from(name.to_owned()).unwrap(),
            email(address),
            Secret::from(secret.to_owned()),
            status,
        );
        let mut users = HashMap::new();
        users.insert(user.email().clone(), user);
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn only_user(&self) -> User {
        let users = self.users.read().await;
        assert_eq!(users.len(), 1);
        users.values().next().cloned().unwrap()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let stored = User::new(
            UserId::new(),
            user.name,
            user.email.clone(),
            user.password.as_ref().clone(),
            UserStatus::Active,
        );
        users.insert(user.email, stored.clone());
        Ok(stored)
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let user = users
            .get(email)
            .filter(|user| user.status().is_active())
            .ok_or(UserStoreError::UserNotFound)?;
        if user.password_hash().expose_secret() != password.as_ref().expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(user.clone())
    }

    async fn get_active_user(&self, id: &UserId, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(email)
            .filter(|user| user.id() == id && user.status().is_active())
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_status(&self, id: &UserId, status: UserStatus) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|user| user.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.set_status(status);
        Ok(())
    }
}

/// Tokens look like `<user id>|<email>`.
pub struct MockTokenCodec;

impl TokenCodec for MockTokenCodec {
    fn mint(&self, user_id: &UserId, email: &Email) -> Result<String, TokenCodecError> {
        Ok(format!("{user_id}|{}", email.as_str()))
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, TokenCodecError> {
        let (id, email) = token.split_once('|').ok_or(TokenCodecError::InvalidToken)?;
        Ok(SessionClaims {
            user_id: id.parse().map_err(|_| TokenCodecError::InvalidToken)?,
            email: email.to_owned(),
            iat: 0,
            exp: i64::MAX,
        })
    }
}

fn scripted<T: Clone>(slot: &Result<T, String>) -> Result<T, IdentityProviderError> {
    slot.clone().map_err(|message| IdentityProviderError::Service {
        kind: "NotAuthorizedException".to_owned(),
        message,
    })
}

fn unscripted<T>() -> Result<T, String> {
    Err("not scripted".to_owned())
}

/// Identity provider double answering every call from a fixed script and
/// recording the calls it saw.
pub struct ScriptedProvider {
    pub pool_id: Result<String, String>,
    pub client_id: Result<String, String>,
    pub initiate_auth: Result<InitiateAuthResponse, String>,
    pub challenge: Result<InitiateAuthResponse, String>,
    pub created_user: Result<ProviderUser, String>,
    pub change_password_status: Result<u16, String>,
    pub forgot_password: Result<(), String>,
    pub confirm_forgot_password: Result<(), String>,
    pub calls: Mutex<Vec<String>>,
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self {
            pool_id: unscripted(),
            client_id: unscripted(),
            initiate_auth: unscripted(),
            challenge: unscripted(),
            created_user: unscripted(),
            change_password_status: unscripted(),
            forgot_password: unscripted(),
            confirm_forgot_password: unscripted(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedProvider {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn create_user_pool(&self, spec: &UserPoolSpec) -> Result<String, IdentityProviderError> {
        self.record(format!("create_user_pool:{}", spec.pool_name));
        scripted(&self.pool_id)
    }

    async fn create_user_pool_client(
        &self,
        spec: &PoolClientSpec,
    ) -> Result<String, IdentityProviderError> {
        self.record(format!(
            "create_user_pool_client:{}:{}",
            spec.client_name, spec.user_pool_id
        ));
        scripted(&self.client_id)
    }

    async fn admin_initiate_auth(
        &self,
        routing: &PoolRouting,
        username: &Email,
        password: &Password,
    ) -> Result<InitiateAuthResponse, IdentityProviderError> {
        self.record(format!(
            "admin_initiate_auth:{}:{}:{}:{}",
            routing.client_id,
            routing.pool_id,
            username.as_str(),
            password.as_ref().expose_secret()
        ));
        scripted(&self.initiate_auth)
    }

    async fn respond_to_new_password_challenge(
        &self,
        client_id: &str,
        username: &Email,
        new_password: &Password,
        session: &Secret<String>,
    ) -> Result<InitiateAuthResponse, IdentityProviderError> {
        self.record(format!(
            "respond_to_new_password_challenge:{client_id}:{}:{}:{}",
            username.as_str(),
            new_password.as_ref().expose_secret(),
            session.expose_secret()
        ));
        scripted(&self.challenge)
    }

    async fn admin_create_user(
        &self,
        user: &NewFederatedUser,
    ) -> Result<ProviderUser, IdentityProviderError> {
        let attributes: Vec<String> = user
            .attributes
            .iter()
            .map(|a| format!("{}={}", a.name, a.value.clone().unwrap_or_default()))
            .collect();
        self.record(format!(
            "admin_create_user:{}:{}:{}:{}",
            user.pool_id,
            user.email.as_str(),
            user.temporary_password.expose_secret().len(),
            attributes.join(",")
        ));
        scripted(&self.created_user)
    }

    async fn change_password(
        &self,
        access_token: &Secret<String>,
        previous_password: &Password,
        proposed_password: &Password,
    ) -> Result<u16, IdentityProviderError> {
        self.record(format!(
            "change_password:{}:{}:{}",
            access_token.expose_secret(),
            previous_password.as_ref().expose_secret(),
            proposed_password.as_ref().expose_secret()
        ));
        scripted(&self.change_password_status)
    }

    async fn forgot_password(
        &self,
        client_id: &str,
        username: &Email,
    ) -> Result<(), IdentityProviderError> {
        self.record(format!("forgot_password:{client_id}:{}", username.as_str()));
        scripted(&self.forgot_password)
    }

    async fn confirm_forgot_password(
        &self,
        client_id: &str,
        username: &Email,
        password: &Password,
        confirmation_code: &Secret<String>,
    ) -> Result<(), IdentityProviderError> {
        self.record(format!(
            "confirm_forgot_password:{client_id}:{}:{}:{}",
            username.as_str(),
            password.as_ref().expose_secret(),
            confirmation_code.expose_secret()
        ));
        scripted(&self.confirm_forgot_password)
    }
}

/// An unsigned JWT-shaped string whose payload names `username`.
pub fn id_token_for(username: &str) -> String {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    let payload = serde_json::json!({ "sub": username, "cognito:username": username });
    format!(
        "eyJhbGciOiJSUzI1NiJ9.{}.sig",
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

pub fn authenticated(username: &str) -> InitiateAuthResponse {
    serde_json::from_value(serde_json::json!({
        "AuthenticationResult": {
            "IdToken": id_token_for(username),
            "AccessToken": "access-token",
            "RefreshToken": "refresh-token",
            "ExpiresIn": 3600,
            "TokenType": "Bearer"
        }
    }))
    .unwrap()
}

pub fn new_password_challenge(session: &str) -> InitiateAuthResponse {
    serde_json::from_value(serde_json::json!({
        "ChallengeName": "NEW_PASSWORD_REQUIRED",
        "Session": session,
        "ChallengeParameters": {}
    }))
    .unwrap()
}
