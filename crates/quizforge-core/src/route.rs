//! Navigation gating based on credential validity.
//!
//! The guard runs before any protected content is produced. Authentication
//! status always derives from the [`TokenStore`] validity check, never from
//! which route is currently rendered.

use crate::TRACING_TARGET_ROUTE;
use crate::auth::TokenStore;

/// Path prefixes that require a valid credential.
pub const PROTECTED_PATHS: [&str; 5] = [
    "/dashboard",
    "/profile",
    "/quiz/create",
    "/quiz/",
    "/sessions",
];

/// Paths that are only accessible without a valid credential.
pub const AUTH_PATHS: [&str; 2] = ["/login", "/register"];

/// How a requested path is classified before the credential is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires a valid credential.
    Protected,
    /// Login/registration pages, for unauthenticated visitors only.
    AuthOnly,
    /// No gating.
    Public,
}

/// The guard's verdict for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the navigation proceed.
    Allow,
    /// Protected path without a valid credential.
    RedirectToLogin,
    /// Auth-only path while already signed in.
    RedirectToDashboard,
}

/// Classifies a path against the protected prefix set and the exact
/// auth-only paths.
pub fn classify(path: &str) -> RouteClass {
    if PROTECTED_PATHS.iter().any(|prefix| path.starts_with(prefix)) {
        RouteClass::Protected
    } else if AUTH_PATHS.contains(&path) {
        RouteClass::AuthOnly
    } else {
        RouteClass::Public
    }
}

/// Request-time gate deciding allow / redirect for every navigation.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    tokens: TokenStore,
}

impl RouteGuard {
    /// Creates a guard over the given credential store.
    pub fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }

    /// Decides the outcome for one requested path.
    ///
    /// The credential is read from storage at decision time. A malformed
    /// credential is treated identically to an absent one; this never
    /// panics and never passes an invalid credential through.
    pub fn decide(&self, path: &str) -> RouteDecision {
        let class = classify(path);
        let valid = self.tokens.is_valid();

        let decision = match (class, valid) {
            (RouteClass::Protected, false) => RouteDecision::RedirectToLogin,
            (RouteClass::AuthOnly, true) => RouteDecision::RedirectToDashboard,
            _ => RouteDecision::Allow,
        };

        tracing::debug!(
            target: TRACING_TARGET_ROUTE,
            path,
            class = ?class,
            credential_valid = valid,
            decision = ?decision,
            "Route guard decision"
        );

        decision
    }
}
