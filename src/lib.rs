//! # Warden - Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the auth service components.
//! Use this crate to get access to all authentication functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! warden = { path = "../warden" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `PoolRouting`, etc.
//! - **Ports**: `UserStore`, `TokenCodec`, `IdentityProvider`
//! - **Use cases**: `LoginUseCase`, `CreatePoolUseCase`, `FederatedLoginUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `HashMapUserStore`, `CognitoClient`, `JwtTokenCodec`
//! - **Service**: `AuthService` - The main entry point for the auth service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use warden_core::*;
}

pub use warden_core::{
    AuthenticatedUser, Email, FederatedSession, FederatedUser, NewUser, Password, PoolCredentials,
    PoolRouting, User, UserError, UserId, UserName, UserProfile, UserStatus,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository and service trait definitions
pub mod ports {
    pub use warden_core::{
        IdentityProvider, IdentityProviderError, TokenCodec, TokenCodecError, UserStore,
        UserStoreError,
    };
}

pub use ports::{IdentityProvider, TokenCodec, UserStore, UserStoreError};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use warden_application::*;
}

pub use warden_application::{
    ChangePasswordUseCase, CreatePoolUseCase, FederatedLoginUseCase, FederatedRegisterUseCase,
    ForcePasswordChangeUseCase, ForgotPasswordUseCase, LoginUseCase, RegisterUseCase,
    ResetPasswordUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Axum route handlers and middleware
    pub mod http {
        pub use warden_axum::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use warden_adapters::persistence::*;
    }

    /// Identity provider client
    pub mod identity {
        pub use warden_adapters::identity::*;
    }

    /// JWT authentication utilities
    pub mod auth {
        pub use warden_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use warden_adapters::config::*;
    }
}

pub use warden_adapters::{
    BearerTokenValidator, CognitoClient, HashMapUserStore, JwtAuthConfig, JwtTokenCodec,
    PostgresUserStore,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use warden_auth_service::{AuthService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
