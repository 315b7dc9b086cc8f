use chrono::Utc;
use reqwest::{
    Client, Url,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use warden_core::{
    Email, IdentityProvider, IdentityProviderError, InitiateAuthResponse, NEW_PASSWORD_REQUIRED,
    NewFederatedUser, Password, PoolClientSpec, PoolRouting, ProviderUser, UserAttribute,
    UserPoolSpec,
};

use super::sigv4::{self, Credentials, SignableRequest};
use crate::config::CognitoSettings;

const SERVICE: &str = "cognito-idp";
const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const AMZ_TARGET_HEADER: &str = "X-Amz-Target";
const AMZ_DATE_HEADER: &str = "X-Amz-Date";
const ADMIN_NO_SRP_AUTH: &str = "ADMIN_NO_SRP_AUTH";
const DELIVERY_MEDIUM_EMAIL: &str = "EMAIL";
const PREVENT_USER_EXISTENCE_ERRORS: &str = "ENABLED";
const REFRESH_TOKEN_UNIT: &str = "days";

/// Identity provider client speaking the Cognito JSON 1.1 protocol.
///
/// Every call is a signed `POST /` whose operation is named by the
/// `X-Amz-Target` header. Requests are signed with a long-lived access key
/// pair only; temporary credentials are not supported.
#[derive(Clone)]
pub struct CognitoClient {
    http_client: Client,
    endpoint: Url,
    host: String,
    region: String,
    access_key_id: Secret<String>,
    secret_access_key: Secret<String>,
}

impl CognitoClient {
    pub fn new(settings: &CognitoSettings, http_client: Client) -> Result<Self, IdentityProviderError> {
        let endpoint = Url::parse(&settings.endpoint())
            .map_err(|e| IdentityProviderError::Transport(e.to_string()))?;
        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_owned(),
            (None, _) => {
                return Err(IdentityProviderError::Transport(format!(
                    "endpoint {endpoint} has no host"
                )));
            }
        };

        Ok(Self {
            http_client,
            endpoint,
            host,
            region: settings.region.clone(),
            access_key_id: settings.access_key_id.clone(),
            secret_access_key: settings.secret_access_key.clone(),
        })
    }

    async fn send<B: Serialize>(
        &self,
        operation: &str,
        body: &B,
    ) -> Result<(u16, Vec<u8>), IdentityProviderError> {
        let payload =
            serde_json::to_vec(body).map_err(|e| IdentityProviderError::Transport(e.to_string()))?;
        let target = format!("{TARGET_PREFIX}.{operation}");

        let signed = sigv4::sign(
            &Credentials {
                access_key_id: &self.access_key_id,
                secret_access_key: &self.secret_access_key,
            },
            &self.region,
            SERVICE,
            &SignableRequest {
                host: &self.host,
                content_type: AMZ_JSON_CONTENT_TYPE,
                target: &target,
                payload: &payload,
            },
            Utc::now(),
        )?;

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .header(AMZ_TARGET_HEADER, &target)
            .header(AMZ_DATE_HEADER, signed.amz_date)
            .header(AUTHORIZATION, signed.authorization)
            .body(payload)
            .send()
            .await
            .map_err(|e| IdentityProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| IdentityProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            let error = service_error(status.as_u16(), &bytes);
            tracing::warn!(operation, status = status.as_u16(), error = %error, "identity provider call failed");
            return Err(error);
        }

        Ok((status.as_u16(), bytes.to_vec()))
    }

    async fn call<B: Serialize, R: DeserializeOwned>(
        &self,
        operation: &str,
        body: &B,
    ) -> Result<R, IdentityProviderError> {
        let (_, bytes) = self.send(operation, body).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| IdentityProviderError::InvalidResponse(e.to_string()))
    }
}

#[derive(Deserialize)]
struct ErrorDocument {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

fn service_error(status: u16, body: &[u8]) -> IdentityProviderError {
    match serde_json::from_slice::<ErrorDocument>(body) {
        Ok(document) => {
            let kind = document
                .kind
                .map(|kind| kind.rsplit('#').next().unwrap_or_default().to_owned())
                .unwrap_or_else(|| format!("HTTP {status}"));
            let message = document.message.unwrap_or_else(|| kind.clone());
            IdentityProviderError::Service { kind, message }
        }
        Err(_) => IdentityProviderError::InvalidResponse(format!(
            "status {status}: {}",
            String::from_utf8_lossy(body)
        )),
    }
}

#[async_trait::async_trait]
impl IdentityProvider for CognitoClient {
    #[tracing::instrument(name = "CognitoClient::create_user_pool", skip_all)]
    async fn create_user_pool(&self, spec: &UserPoolSpec) -> Result<String, IdentityProviderError> {
        let request = CreateUserPoolRequest {
            pool_name: &spec.pool_name,
            admin_create_user_config: AdminCreateUserConfig {
                allow_admin_create_user_only: spec.allow_admin_create_user_only,
            },
            policies: Policies {
                password_policy: PasswordPolicy {
                    minimum_length: spec.minimum_password_length,
                },
            },
            schema: spec
                .schema
                .iter()
                .map(|attribute| SchemaAttributeType {
                    name: attribute.name,
                    attribute_data_type: attribute.data_type,
                    mutable: attribute.mutable,
                    required: attribute.required,
                })
                .collect(),
            username_attributes: &spec.username_attributes,
            username_configuration: UsernameConfiguration {
                case_sensitive: spec.case_sensitive_usernames,
            },
        };

        let response: CreateUserPoolResponse = self.call("CreateUserPool", &request).await?;
        Ok(response.user_pool.id)
    }

    #[tracing::instrument(name = "CognitoClient::create_user_pool_client", skip_all)]
    async fn create_user_pool_client(
        &self,
        spec: &PoolClientSpec,
    ) -> Result<String, IdentityProviderError> {
        let request = CreateUserPoolClientRequest {
            client_name: &spec.client_name,
            user_pool_id: &spec.user_pool_id,
            explicit_auth_flows: &spec.explicit_auth_flows,
            generate_secret: spec.generate_secret,
            refresh_token_validity: spec.refresh_token_validity_days,
            token_validity_units: TokenValidityUnits {
                refresh_token: REFRESH_TOKEN_UNIT,
            },
            prevent_user_existence_errors: spec
                .prevent_user_existence_errors
                .then_some(PREVENT_USER_EXISTENCE_ERRORS),
        };

        let response: CreateUserPoolClientResponse =
            self.call("CreateUserPoolClient", &request).await?;
        Ok(response.user_pool_client.client_id)
    }

    #[tracing::instrument(name = "CognitoClient::admin_initiate_auth", skip_all)]
    async fn admin_initiate_auth(
        &self,
        routing: &PoolRouting,
        username: &Email,
        password: &Password,
    ) -> Result<InitiateAuthResponse, IdentityProviderError> {
        let request = AdminInitiateAuthRequest {
            auth_flow: ADMIN_NO_SRP_AUTH,
            client_id: &routing.client_id,
            user_pool_id: &routing.pool_id,
            auth_parameters: AuthParameters {
                username: username.as_str(),
                password: password.as_ref().expose_secret(),
            },
        };

        self.call("AdminInitiateAuth", &request).await
    }

    #[tracing::instrument(name = "CognitoClient::respond_to_new_password_challenge", skip_all)]
    async fn respond_to_new_password_challenge(
        &self,
        client_id: &str,
        username: &Email,
        new_password: &Password,
        session: &Secret<String>,
    ) -> Result<InitiateAuthResponse, IdentityProviderError> {
        let request = RespondToAuthChallengeRequest {
            challenge_name: NEW_PASSWORD_REQUIRED,
            client_id,
            session: session.expose_secret(),
            challenge_responses: NewPasswordChallengeResponses {
                username: username.as_str(),
                new_password: new_password.as_ref().expose_secret(),
            },
        };

        self.call("RespondToAuthChallenge", &request).await
    }

    #[tracing::instrument(name = "CognitoClient::admin_create_user", skip_all)]
    async fn admin_create_user(
        &self,
        user: &NewFederatedUser,
    ) -> Result<ProviderUser, IdentityProviderError> {
        let request = AdminCreateUserRequest {
            user_pool_id: &user.pool_id,
            username: user.email.as_str(),
            temporary_password: user.temporary_password.expose_secret(),
            desired_delivery_mediums: [DELIVERY_MEDIUM_EMAIL],
            user_attributes: &user.attributes,
        };

        let response: AdminCreateUserResponse = self.call("AdminCreateUser", &request).await?;
        Ok(response.user)
    }

    #[tracing::instrument(name = "CognitoClient::change_password", skip_all)]
    async fn change_password(
        &self,
        access_token: &Secret<String>,
        previous_password: &Password,
        proposed_password: &Password,
    ) -> Result<u16, IdentityProviderError> {
        let request = ChangePasswordRequest {
            access_token: access_token.expose_secret(),
            previous_password: previous_password.as_ref().expose_secret(),
            proposed_password: proposed_password.as_ref().expose_secret(),
        };

        let (status, _) = self.send("ChangePassword", &request).await?;
        Ok(status)
    }

    #[tracing::instrument(name = "CognitoClient::forgot_password", skip_all)]
    async fn forgot_password(
        &self,
        client_id: &str,
        username: &Email,
    ) -> Result<(), IdentityProviderError> {
        let request = ForgotPasswordRequest {
            client_id,
            username: username.as_str(),
        };

        self.send("ForgotPassword", &request).await?;
        Ok(())
    }

    #[tracing::instrument(name = "CognitoClient::confirm_forgot_password", skip_all)]
    async fn confirm_forgot_password(
        &self,
        client_id: &str,
        username: &Email,
        password: &Password,
        confirmation_code: &Secret<String>,
    ) -> Result<(), IdentityProviderError> {
        let request = ConfirmForgotPasswordRequest {
            client_id,
            username: username.as_str(),
            confirmation_code: confirmation_code.expose_secret(),
            password: password.as_ref().expose_secret(),
        };

        self.send("ConfirmForgotPassword", &request).await?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateUserPoolRequest<'a> {
    pool_name: &'a str,
    admin_create_user_config: AdminCreateUserConfig,
    policies: Policies,
    schema: Vec<SchemaAttributeType<'a>>,
    username_attributes: &'a [&'static str],
    username_configuration: UsernameConfiguration,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AdminCreateUserConfig {
    allow_admin_create_user_only: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Policies {
    password_policy: PasswordPolicy,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PasswordPolicy {
    minimum_length: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SchemaAttributeType<'a> {
    name: &'a str,
    attribute_data_type: &'a str,
    mutable: bool,
    required: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UsernameConfiguration {
    case_sensitive: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateUserPoolResponse {
    user_pool: UserPoolType,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UserPoolType {
    id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateUserPoolClientRequest<'a> {
    client_name: &'a str,
    user_pool_id: &'a str,
    explicit_auth_flows: &'a [&'static str],
    generate_secret: bool,
    refresh_token_validity: u32,
    token_validity_units: TokenValidityUnits,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevent_user_existence_errors: Option<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TokenValidityUnits {
    refresh_token: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateUserPoolClientResponse {
    user_pool_client: UserPoolClientType,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UserPoolClientType {
    client_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AdminInitiateAuthRequest<'a> {
    auth_flow: &'static str,
    client_id: &'a str,
    user_pool_id: &'a str,
    auth_parameters: AuthParameters<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct AuthParameters<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RespondToAuthChallengeRequest<'a> {
    challenge_name: &'static str,
    client_id: &'a str,
    session: &'a str,
    challenge_responses: NewPasswordChallengeResponses<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct NewPasswordChallengeResponses<'a> {
    username: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AdminCreateUserRequest<'a> {
    user_pool_id: &'a str,
    username: &'a str,
    temporary_password: &'a str,
    desired_delivery_mediums: [&'static str; 1],
    user_attributes: &'a [UserAttribute],
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AdminCreateUserResponse {
    user: ProviderUser,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ChangePasswordRequest<'a> {
    access_token: &'a str,
    previous_password: &'a str,
    proposed_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ForgotPasswordRequest<'a> {
    client_id: &'a str,
    username: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmForgotPasswordRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    confirmation_code: &'a str,
    password: &'a str,
}
