//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use nour_session::translate::Catalog;
use nour_session::{NotificationCenter, Preferences, SessionStore, StoreError};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    sessions: SessionStore,
    notifications: NotificationCenter,
}

impl AppState {
    #[must_use]
    pub fn new(sessions: SessionStore, notifications: NotificationCenter) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                sessions,
                notifications,
            }),
        }
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    /// Catalog for the locale saved in the user's preferences.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the preferences cannot be read.
    pub fn catalog(&self) -> Result<Catalog, StoreError> {
        let preferences = Preferences::load(self.inner.sessions.persisted().as_ref())?;
        Ok(Catalog::new(preferences.locale))
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.inner.sessions.clone()
    }
}
