use axum::{
    Router,
    http::{HeaderValue, Method, request},
    middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use warden_adapters::{
    BearerTokenValidator, JwtAuthConfig, JwtTokenCodec, config::AllowedOrigins,
};
use warden_axum::{
    LocalAuthState, require_auth,
    routes::{
        app_login, app_register, change_password, cognito_login, cognito_register, create_pool,
        force_password_change, forgot_password, index, reset_password,
    },
};
use warden_core::{IdentityProvider, UserStore};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main authentication service that provides all auth-related routes
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService with the provided store, identity provider
    /// and session token settings
    ///
    /// # Arguments
    /// * `user_store` - Store for local users (must be Clone)
    /// * `identity_provider` - Client for the managed identity provider (must be Clone)
    /// * `jwt_config` - Secret and lifetime of local session tokens
    ///
    /// # Note on Architecture
    /// `/app/*` and `/` are public. Every `/cognito*` route sits behind the
    /// bearer token layer, which re-checks the token's user on each request.
    pub fn new<U, P>(user_store: U, identity_provider: P, jwt_config: JwtAuthConfig) -> Self
    where
        U: UserStore + Clone + 'static,
        P: IdentityProvider + Clone + 'static,
    {
        let token_codec = JwtTokenCodec::new(jwt_config);
        let validator = BearerTokenValidator::new(user_store.clone(), token_codec.clone());

        let protected = Router::new()
            .route("/cognito/create", post(create_pool::<P>))
            .route("/cognito-user/create", post(cognito_register::<P>))
            .route("/cognito-user/login", post(cognito_login::<P>))
            .route(
                "/cognito-user/force-password-change",
                post(force_password_change::<P>),
            )
            .route("/cognito-user/forgot-password", post(forgot_password::<P>))
            .route("/cognito-user/reset-password", post(reset_password::<P>))
            .route("/cognito-user/change-password", post(change_password::<P>))
            .with_state(identity_provider)
            .route_layer(middleware::from_fn_with_state(
                validator,
                require_auth::<BearerTokenValidator<U, JwtTokenCodec>>,
            ));

        let router = Router::new()
            .route("/", get(index))
            .route("/app/login", post(app_login::<U, JwtTokenCodec>))
            .route("/app/register", post(app_register::<U, JwtTokenCodec>))
            .with_state(LocalAuthState {
                user_store,
                token_codec,
            })
            .merge(protected);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a nested router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    ///
    /// # Returns
    /// An Axum Router that can be nested into another application
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
