//! # Bridgekeeper - External Identity Source Bridge
//!
//! This is a facade crate that re-exports all public APIs from the bridge components.
//! Use this crate to get access to all authentication functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! bridgekeeper = { path = "../bridgekeeper" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Username`, `ExternalUser`, `CredentialRequest`, `AuthenticatedPrincipal`, etc.
//! - **Ports**: `IdentitySource`, `RequestContext`
//! - **Provider trait**: `AuthenticationProvider`
//! - **Use cases**: `SignOnUseCase`, `RefreshUserUseCase`, `ProviderManager`
//! - **Adapters**: `ExternalLoginProvider`, `HttpIdentitySource`, `InMemoryIdentitySource`, etc.

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use bridgekeeper_core::*;
}

// Re-export most commonly used core types at the root level
pub use bridgekeeper_core::{
    AuthenticatedPrincipal, AuthenticationFailure, CorrelationKey, CredentialRequest,
    ExternalUser, FailureKind, MappedRole, Principal, RoleMapper, Token, Username,
};

// ============================================================================
// Ports
// ============================================================================

/// Traits implemented by identity sources and framework integrations
pub mod ports {
    pub use bridgekeeper_core::{
        AuthenticationProvider, IdentitySource, IdentitySourceError, RequestContext,
        SignOnOutcome,
    };
}

pub use bridgekeeper_core::{
    AuthenticationProvider, IdentitySource, IdentitySourceError, RequestContext, SignOnOutcome,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use bridgekeeper_application::*;
}

pub use bridgekeeper_application::{ProviderManager, RefreshUserUseCase, SignOnUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Authentication providers
    pub mod authentication {
        pub use bridgekeeper_adapters::authentication::*;
    }

    /// Identity source implementations
    pub mod identity {
        pub use bridgekeeper_adapters::identity::*;
    }

    /// Request context implementations
    pub mod request_context {
        pub use bridgekeeper_adapters::request_context::*;
    }

    /// Configuration
    pub mod config {
        pub use bridgekeeper_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use bridgekeeper_adapters::{
    authentication::ExternalLoginProvider,
    config::BridgeSettings,
    identity::{HttpIdentitySource, InMemoryIdentitySource},
    request_context::{FormRequestContext, NoRequestContext},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
