use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use warden_core::{AuthValidator, AuthenticatedUser};

use crate::error::ApiError;

/// Route layer for protected routes.
///
/// On success the [`AuthenticatedUser`] is placed in the request extensions
/// and the inner handler runs; otherwise the inner handler is never called.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/cognito/create", post(create_pool::<P>))
///     .with_state(provider)
///     .route_layer(axum::middleware::from_fn_with_state(validator, require_auth::<V>));
/// ```
pub async fn require_auth<V>(
    State(validator): State<V>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    V: AuthValidator<Claims = AuthenticatedUser, RequestParts = http::request::Parts>,
    V::Error: Into<ApiError>,
{
    let (parts, body) = request.into_parts();

    let user = validator.validate(&parts).await.map_err(Into::into)?;

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
