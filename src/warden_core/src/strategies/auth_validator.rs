use async_trait::async_trait;

/// Trait for validating authentication on protected routes.
///
/// Validators pull credentials out of the request parts, verify them and
/// produce the identity that downstream handlers see.
///
/// # Implementation Note
///
/// The validator receives `RequestParts` (headers, method, URI, extensions)
/// rather than the full request so that non-`Sync` bodies never need to cross
/// an await point.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// The identity extracted from a valid request.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts: Send + Sync;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Validate authentication from the request parts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credentials are present
    /// - The credentials are invalid or expired
    /// - The identity they name is no longer allowed in
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
