use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, CONFIG_FILE, DEFAULT_JWT_TIME_TO_LIVE_SECONDS, env,
    prod,
};

/// Settings for the whole auth service, loaded once at startup.
///
/// Sources, lowest precedence first: built-in defaults, `config/base.json`
/// (optional), `WARDEN__*` variables, then the well-known variables such as
/// `JWT_SECRET` and `DATABASE_URL`. A `.env` file is read first if present.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub allowed_origins: Option<AllowedOrigins>,
    pub postgres: PostgresSettings,
    pub cognito: CognitoSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub time_to_live: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

/// Connection settings for the managed identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct CognitoSettings {
    pub region: String,
    /// Overrides the regional endpoint, e.g. for a local stand-in.
    #[serde(default)]
    pub endpoint: Option<String>,
    pub access_key_id: Secret<String>,
    pub secret_access_key: Secret<String>,
    pub timeout_in_millis: u64,
}

impl CognitoSettings {
    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://cognito-idp.{}.amazonaws.com", self.region),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// CORS origins, configured as one comma separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderValue> {
        self.0.iter()
    }
}

impl TryFrom<String> for AllowedOrigins {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let origins = value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| HeaderValue::from_str(origin).map_err(|e| format!("{origin}: {e}")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(origins))
    }
}

impl AuthServiceSetting {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default("auth.jwt.time_to_live", DEFAULT_JWT_TIME_TO_LIVE_SECONDS)?
            .set_default("cognito.region", prod::cognito::REGION)?
            .set_default("cognito.timeout_in_millis", prod::cognito::TIMEOUT_IN_MILLIS)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator(CONFIG_ENV_SEPARATOR)
                    .separator(CONFIG_ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt.secret", std::env::var(env::JWT_SECRET_ENV_VAR).ok())?
            .set_override_option("postgres.url", std::env::var(env::DATABASE_URL_ENV_VAR).ok())?
            .set_override_option(
                "cognito.access_key_id",
                std::env::var(env::AWS_ACCESS_KEY_ENV_VAR).ok(),
            )?
            .set_override_option(
                "cognito.secret_access_key",
                std::env::var(env::AWS_SECRET_KEY_ENV_VAR).ok(),
            )?
            .set_override_option("cognito.region", std::env::var(env::AWS_REGION_ENV_VAR).ok())?
            .set_override_option(
                "allowed_origins",
                std::env::var(env::AUTH_SERVICE_ALLOWED_ORIGINS_ENV_VAR).ok(),
            )?
            .build()?
            .try_deserialize()
    }
}
