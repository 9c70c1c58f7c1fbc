//! HTTP middleware and extractors for the portal.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. [`navigation_middleware`] (reload sessions, localize error bodies)
//! 4. Route extractors ([`RequireAdmin`] on admin routes)

pub mod auth;
pub mod navigation;

pub use auth::{AdminAuthRejection, OptionalAdmin, RequireAdmin};
pub use navigation::{MessageKey, navigation_middleware};
