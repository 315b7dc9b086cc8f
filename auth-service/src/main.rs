use color_eyre::eyre::{Result, eyre};
use reqwest::Client as HttpClient;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use warden::{
    AuthService, CognitoClient, JwtAuthConfig, PostgresUserStore,
    adapters::config::AuthServiceSetting, configure_postgresql,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration
    let config = AuthServiceSetting::load()?;

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql(&config.postgres.url).await?;
    let user_store = PostgresUserStore::new(pg_pool);

    // Create identity provider client
    let http_client = HttpClient::builder()
        .timeout(config.cognito.timeout())
        .build()?;
    let identity_provider = CognitoClient::new(&config.cognito, http_client)
        .map_err(|e| eyre!("Failed to build identity provider client: {e}"))?;

    let jwt_config = JwtAuthConfig {
        jwt_secret: config.auth.jwt.secret.clone(),
        token_ttl_in_seconds: config.auth.jwt.time_to_live,
    };

    let auth_service = AuthService::new(user_store, identity_provider, jwt_config);

    // Run as standalone server
    let listener = tokio::net::TcpListener::bind(&config.application.address).await?;
    tracing::info!("Starting warden auth service...");

    auth_service
        .run_standalone(listener, config.allowed_origins.clone())
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
