//! # Vouch - Verify-then-authenticate for the admin dashboard
//!
//! This is a facade crate that re-exports all public APIs from the auth service components.
//! Use this crate to get access to the whole gate in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! vouch = { path = "../vouch" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, `VerificationToken`, etc.
//! - **Port traits**: `UserStore`, `VerificationTokenStore`, `EmailClient`, `PasswordScheme`, `Clock`
//! - **Use cases**: `SignupUseCase`, `LoginUseCase`, `RedeemVerificationUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `HashMapVerificationTokenStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService` - The main entry point for the auth service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use vouch_core::*;
}

// Re-export most commonly used core types at the root level
pub use vouch_core::{
    Account, AccountSummary, Email, EmailError, Password, PasswordError, TokenError, TokenValue,
    VERIFICATION_TOKEN_TTL, VerificationToken,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use vouch_core::{
        Clock, EmailClient, PasswordScheme, UserStore, UserStoreError, VerificationTokenStore,
        VerificationTokenStoreError,
    };
}

// Re-export port traits at root level
pub use self::core::{
    Clock, EmailClient, PasswordScheme, UserStore, UserStoreError, VerificationTokenStore,
    VerificationTokenStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use vouch_application::*;
}

// Re-export use cases at root level
pub use vouch_application::{
    IssueVerificationUseCase, LoginUseCase, RedeemVerificationUseCase, ResendVerificationUseCase,
    SignupUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use vouch_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use vouch_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use vouch_adapters::email::*;
    }

    /// Password hashing
    pub mod password {
        pub use vouch_adapters::password::*;
    }

    /// Wall-clock time source
    pub mod clock {
        pub use vouch_adapters::clock::*;
    }

    /// Configuration
    pub mod config {
        pub use vouch_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use vouch_adapters::{
    Argon2Scheme, SystemClock,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        HashMapUserStore, HashMapVerificationTokenStore, PostgresUserStore,
        PostgresVerificationTokenStore,
    },
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use vouch_auth_service::{AuthService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
