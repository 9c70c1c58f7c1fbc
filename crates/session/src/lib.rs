//! Nour Session - the client session and authorization core.
//!
//! # Components
//!
//! - [`store`] - Durable key-value persistence (`MemoryStore`, `FileStore`)
//! - [`verifier`] - Decides whether submitted admin credentials are accepted
//! - [`session`] - Dual-role (admin / donor) session store
//! - [`client`] - HTTP pipeline that authorizes requests and normalizes failures
//! - [`guard`] - Admin area route guard
//! - [`notifications`] - Per-role notification center
//! - [`preferences`] - Persisted language and theme
//! - [`translate`] - Translator interface for user-facing strings
//!
//! # Data Flow
//!
//! ```text
//! login form → verifier → SessionStore (memory + persisted store)
//!                              │
//!          ┌───────────────────┼────────────────────┐
//!          ▼                   ▼                    ▼
//!      ApiClient          RouteGuard       NotificationCenter::sync_with
//!  (Bearer token,       (redirect to       (seed once per active role)
//!   401 → evict all)     /admin/login)
//! ```
//!
//! # Single-writer discipline
//!
//! [`SessionStore`] and [`NotificationCenter`] are cheap handles around shared
//! state. Every mutation takes the state's write lock, applies the in-memory
//! change and the persisted write, then releases it, so readers never observe
//! a session without its token or a half-seeded notification list.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod notifications;
pub mod preferences;
pub mod session;
pub mod store;
pub mod translate;
pub mod verifier;

pub use client::{
    ApiClient, ApiRequest, ApiResponse, HttpTransport, MockTransport, NormalizedError, Transport,
    TransportError,
};
pub use config::SessionConfig;
pub use error::{AuthError, StoreError};
pub use guard::{GuardDecision, LoginRedirect, RouteGuard};
pub use models::{AdminSession, DonorProfile, DonorSession, NotificationRecord};
pub use notifications::NotificationCenter;
pub use preferences::Preferences;
pub use session::{SessionSnapshot, SessionStore};
pub use store::{FileStore, MemoryStore, PersistedStore};
pub use translate::{Catalog, Translator};
pub use verifier::{AdminIdentity, ConfiguredVerifier, CredentialVerifier};
