//! Axum surface for the warden auth service.
//!
//! Routes parse request bodies into domain types, run the matching use case
//! and answer with the `{message, data}` envelope. Every failure goes through
//! [`ApiError`], which owns the status-code mapping.
//!
//! # Architecture
//!
//! ```text
//! request ──► require_auth (protected routes only)
//!         ──► route: body + header parsing
//!         ──► warden_application use case
//!         ──► ApiResponse | ApiError ──► envelope
//! ```

pub mod envelope;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

pub use envelope::{ApiResponse, Envelope};
pub use error::ApiError;
pub use middleware::require_auth;
pub use routes::LocalAuthState;
