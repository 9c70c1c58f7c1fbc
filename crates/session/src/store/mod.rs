//! Durable key-value persistence.
//!
//! The session core persists four keys (two session/token pairs) plus the
//! display preferences. Pairs must change together, so writes go through
//! [`PersistedStore::apply`] with a batch of [`StoreOp`]s that the backend
//! applies as one unit.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Persisted key names.
pub mod keys {
    /// Serialized [`AdminSession`](crate::models::AdminSession).
    pub const ADMIN_SESSION: &str = "admin_session";

    /// Admin bearer token.
    pub const ADMIN_TOKEN: &str = "admin_token";

    /// Serialized [`DonorSession`](crate::models::DonorSession).
    pub const DONOR_SESSION: &str = "donor_session";

    /// Donor bearer token.
    pub const DONOR_TOKEN: &str = "donor_token";

    /// Display language preference.
    pub const LANGUAGE: &str = "language";

    /// Color scheme preference.
    pub const THEME: &str = "theme";
}

/// A single write in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// Insert or overwrite a key.
    Set(&'static str, String),
    /// Remove a key (no-op when absent).
    Remove(&'static str),
}

/// Synchronous key-value store that survives reloads.
///
/// Reads are synchronous so session state is available immediately at
/// construction; there is no loading state anywhere in the core.
pub trait PersistedStore: Send + Sync {
    /// Read a key.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Apply a batch of writes as one unit.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the batch cannot be persisted. On error no
    /// operation of the batch is visible.
    fn apply(&self, ops: Vec<StoreOp>) -> Result<(), StoreError>;
}
