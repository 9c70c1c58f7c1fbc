//! Dual-role session store.
//!
//! Holds zero-or-one admin session and zero-or-one donor session, each
//! paired with its own bearer token. The two roles are independent state
//! machines:
//!
//! ```text
//!            login                      photo update / re-login
//! LoggedOut ───────► LoggedIn ◄──────────────────────────────┐
//!     ▲                 │ └──────────────────────────────────┘
//!     └──── logout ─────┘
//! ```
//!
//! The only coupling is [`SessionStore::evict_all`], which the HTTP
//! pipeline calls on a 401 to log both roles out.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use nour_core::{Credential, Phone, Photo, Role, Token};

use crate::error::{AuthError, StoreError};
use crate::models::{AdminSession, DonorProfile, DonorSession};
use crate::store::{MemoryStore, PersistedStore, StoreOp, keys};
use crate::verifier::{ConfiguredVerifier, CredentialVerifier};

/// A session together with the token issued for it.
#[derive(Debug, Clone)]
struct Authenticated<S> {
    session: S,
    token: Token,
}

#[derive(Debug, Default)]
struct SessionState {
    admin: Option<Authenticated<AdminSession>>,
    donor: Option<Authenticated<DonorSession>>,
}

/// Point-in-time view of both roles, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub is_admin: bool,
    pub is_donor_logged_in: bool,
    pub admin: Option<AdminSession>,
    pub donor: Option<DonorSession>,
}

/// Handle to the application's session state.
///
/// Cheap to clone; every clone shares the same state. Construct one per
/// application and hand it to the HTTP pipeline, the route guard and the
/// layout.
///
/// All mutations hold the state lock across both the persisted write and the
/// in-memory update, and persist first: if the write fails, memory is left
/// untouched and the error is returned.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    persisted: Arc<dyn PersistedStore>,
    verifier: Box<dyn CredentialVerifier>,
    state: RwLock<SessionState>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("is_admin", &self.is_admin())
            .field("is_donor_logged_in", &self.is_donor_logged_in())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Open the store, hydrating both roles from `persisted`.
    ///
    /// A role whose session object and token are not both present (or whose
    /// session object cannot be decoded) is treated as logged out and the
    /// leftover keys are removed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the persisted store cannot be read or the
    /// clean-up write fails.
    pub fn open(
        persisted: Arc<dyn PersistedStore>,
        verifier: impl CredentialVerifier + 'static,
    ) -> Result<Self, StoreError> {
        let state = SessionState {
            admin: read_pair(persisted.as_ref(), Role::Admin)?,
            donor: read_pair(persisted.as_ref(), Role::Donor)?,
        };

        Ok(Self {
            inner: Arc::new(SessionStoreInner {
                persisted,
                verifier: Box::new(verifier),
                state: RwLock::new(state),
            }),
        })
    }

    /// A logged-out store over a fresh [`MemoryStore`] with the default
    /// admin credential.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                persisted: Arc::new(MemoryStore::new()),
                verifier: Box::new(ConfiguredVerifier::default()),
                state: RwLock::new(SessionState::default()),
            }),
        }
    }

    /// The persisted store backing this session.
    #[must_use]
    pub fn persisted(&self) -> &Arc<dyn PersistedStore> {
        &self.inner.persisted
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Log the administrator in.
    ///
    /// On success a fresh token is generated and the session/token pair is
    /// persisted in one batch. A rejected credential changes nothing, no
    /// matter how often it is retried.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the pair does not match,
    /// or [`AuthError::Store`] if the session cannot be persisted.
    #[instrument(skip(self, password))]
    pub fn login_admin(&self, email: &str, password: &str) -> Result<AdminSession, AuthError> {
        let identity = self
            .inner
            .verifier
            .verify_admin(email, password)
            .inspect_err(|_| tracing::warn!("Admin login rejected"))?;

        let session = AdminSession::start(identity, Utc::now());
        let token = Token::generate(Role::Admin);

        let mut state = self.write_state();
        self.inner
            .persisted
            .apply(set_pair(Role::Admin, &session, &token)?)?;
        state.admin = Some(Authenticated {
            session: session.clone(),
            token,
        });

        tracing::info!("Admin logged in");
        Ok(session)
    }

    /// Log the administrator out. No-op when not logged in.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the persisted pair cannot be cleared.
    #[instrument(skip(self))]
    pub fn logout_admin(&self) -> Result<(), StoreError> {
        let mut state = self.write_state();
        if state.admin.is_none() {
            return Ok(());
        }
        self.inner.persisted.apply(clear_pair(Role::Admin))?;
        state.admin = None;

        tracing::info!("Admin logged out");
        Ok(())
    }

    /// Replace the administrator's photo, keeping every other field.
    ///
    /// The pair is re-read from the persisted store first, so a logout made
    /// by another process sharing the store is honoured. Returns the updated
    /// session, or `None` when no admin is logged in.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the updated session cannot be persisted.
    pub fn update_admin_photo(&self, photo: Photo) -> Result<Option<AdminSession>, StoreError> {
        let mut state = self.write_state();
        state.admin = read_pair(self.inner.persisted.as_ref(), Role::Admin)?;
        let Some(current) = state.admin.as_mut() else {
            return Ok(None);
        };

        let mut updated = current.session.clone();
        updated.photo = Some(photo);
        self.inner
            .persisted
            .apply(set_pair(Role::Admin, &updated, &current.token)?)?;
        current.session = updated.clone();

        Ok(Some(updated))
    }

    // =========================================================================
    // Donor
    // =========================================================================

    /// Log a donor in.
    ///
    /// Always accepted: the phone was verified upstream. Supplying a profile
    /// `name` marks the donor as a first-time registrant (`is_new`).
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the session cannot be persisted.
    #[instrument(skip(self, profile))]
    pub fn login_donor(
        &self,
        phone: Phone,
        profile: Option<DonorProfile>,
    ) -> Result<DonorSession, StoreError> {
        let session = DonorSession::start(phone, profile, Utc::now());
        let token = Token::generate(Role::Donor);

        let mut state = self.write_state();
        self.inner
            .persisted
            .apply(set_pair(Role::Donor, &session, &token)?)?;
        state.donor = Some(Authenticated {
            session: session.clone(),
            token,
        });

        tracing::info!(is_new = session.is_new, "Donor logged in");
        Ok(session)
    }

    /// Log the donor out. No-op when not logged in.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the persisted pair cannot be cleared.
    #[instrument(skip(self))]
    pub fn logout_donor(&self) -> Result<(), StoreError> {
        let mut state = self.write_state();
        if state.donor.is_none() {
            return Ok(());
        }
        self.inner.persisted.apply(clear_pair(Role::Donor))?;
        state.donor = None;

        tracing::info!("Donor logged out");
        Ok(())
    }

    /// Replace the donor's photo, keeping every other field.
    ///
    /// Like [`SessionStore::update_admin_photo`], re-reads the persisted pair
    /// first. Returns the updated session, or `None` when no donor is logged in.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the updated session cannot be persisted.
    pub fn update_donor_photo(&self, photo: Photo) -> Result<Option<DonorSession>, StoreError> {
        let mut state = self.write_state();
        state.donor = read_pair(self.inner.persisted.as_ref(), Role::Donor)?;
        let Some(current) = state.donor.as_mut() else {
            return Ok(None);
        };

        let mut updated = current.session.clone();
        updated.photo = Some(photo);
        self.inner
            .persisted
            .apply(set_pair(Role::Donor, &updated, &current.token)?)?;
        current.session = updated.clone();

        Ok(Some(updated))
    }

    // =========================================================================
    // Shared
    // =========================================================================

    /// Log both roles out at once.
    ///
    /// Used on authorization failure: a 401 on any request invalidates every
    /// session, whichever role issued it.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the persisted pairs cannot be cleared.
    #[instrument(skip(self))]
    pub fn evict_all(&self) -> Result<(), StoreError> {
        let mut state = self.write_state();
        let mut ops = clear_pair(Role::Admin);
        ops.extend(clear_pair(Role::Donor));
        self.inner.persisted.apply(ops)?;
        *state = SessionState::default();

        tracing::warn!("All sessions evicted");
        Ok(())
    }

    /// Re-read both roles from the persisted store.
    ///
    /// This is how changes made by another process sharing the store become
    /// visible here; nothing is synchronized automatically.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the persisted store cannot be read.
    pub fn reload(&self) -> Result<(), StoreError> {
        let mut state = self.write_state();
        let persisted = self.inner.persisted.as_ref();
        *state = SessionState {
            admin: read_pair(persisted, Role::Admin)?,
            donor: read_pair(persisted, Role::Donor)?,
        };
        Ok(())
    }

    /// The credential for outgoing requests: admin beats donor.
    #[must_use]
    pub fn credential(&self) -> Credential {
        let state = self.read_state();
        Credential::resolve(
            state.admin.as_ref().map(|a| &a.token),
            state.donor.as_ref().map(|d| &d.token),
        )
    }

    /// The token to attach to outgoing requests, if any.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.credential().into_token()
    }

    /// Whether an administrator is logged in.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read_state().admin.is_some()
    }

    /// Whether a donor is logged in.
    #[must_use]
    pub fn is_donor_logged_in(&self) -> bool {
        self.read_state().donor.is_some()
    }

    /// Whether `role` is logged in.
    #[must_use]
    pub fn is_active(&self, role: Role) -> bool {
        match role {
            Role::Admin => self.is_admin(),
            Role::Donor => self.is_donor_logged_in(),
        }
    }

    /// The current admin session.
    #[must_use]
    pub fn admin(&self) -> Option<AdminSession> {
        self.read_state().admin.as_ref().map(|a| a.session.clone())
    }

    /// The current donor session.
    #[must_use]
    pub fn donor(&self) -> Option<DonorSession> {
        self.read_state().donor.as_ref().map(|d| d.session.clone())
    }

    /// Both roles at once, read under a single lock.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.read_state();
        SessionSnapshot {
            is_admin: state.admin.is_some(),
            is_donor_logged_in: state.donor.is_some(),
            admin: state.admin.as_ref().map(|a| a.session.clone()),
            donor: state.donor.as_ref().map(|d| d.session.clone()),
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

const fn pair_keys(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Admin => (keys::ADMIN_SESSION, keys::ADMIN_TOKEN),
        Role::Donor => (keys::DONOR_SESSION, keys::DONOR_TOKEN),
    }
}

fn set_pair<S: Serialize>(role: Role, session: &S, token: &Token) -> Result<Vec<StoreOp>, StoreError> {
    let (session_key, token_key) = pair_keys(role);
    Ok(vec![
        StoreOp::Set(session_key, serde_json::to_string(session)?),
        StoreOp::Set(token_key, token.expose().to_owned()),
    ])
}

fn clear_pair(role: Role) -> Vec<StoreOp> {
    let (session_key, token_key) = pair_keys(role);
    vec![StoreOp::Remove(session_key), StoreOp::Remove(token_key)]
}

/// Read one role's pair, healing any half-present or unreadable state to
/// logged-out.
fn read_pair<S: DeserializeOwned>(
    persisted: &dyn PersistedStore,
    role: Role,
) -> Result<Option<Authenticated<S>>, StoreError> {
    let (session_key, token_key) = pair_keys(role);
    let session = persisted.get(session_key)?;
    let token = persisted.get(token_key)?.filter(|t| !t.is_empty());

    match (session, token) {
        (None, None) => Ok(None),
        (Some(raw), Some(token)) => match serde_json::from_str::<S>(&raw) {
            Ok(session) => Ok(Some(Authenticated {
                session,
                token: Token::new(token),
            })),
            Err(e) => {
                tracing::warn!(%role, error = %e, "Discarding unreadable persisted session");
                persisted.apply(clear_pair(role))?;
                Ok(None)
            }
        },
        (session, token) => {
            tracing::warn!(
                %role,
                has_session = session.is_some(),
                has_token = token.is_some(),
                "Discarding orphaned session state"
            );
            persisted.apply(clear_pair(role))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use nour_core::Email;

    use crate::config::AdminCredentialConfig;

    const ADMIN_EMAIL: &str = "admin@nour.org";
    const ADMIN_PASSWORD: &str = "admin123";

    fn store_with(memory: &Arc<MemoryStore>) -> SessionStore {
        SessionStore::open(memory.clone(), ConfiguredVerifier::default()).unwrap()
    }

    fn phone() -> Phone {
        Phone::parse("01000000000").unwrap()
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    impl PersistedStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn apply(&self, _ops: Vec<StoreOp>) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_admin_login_success() {
        let memory = Arc::new(MemoryStore::new());
        let store = store_with(&memory);

        let before = Utc::now();
        let session = store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();

        assert!(session.logged_in_at >= before);
        assert_eq!(session.email, Email::parse(ADMIN_EMAIL).unwrap());
        assert!(store.is_admin());
        assert!(matches!(store.credential(), Credential::Admin(_)));

        let token = store.token().unwrap();
        assert_eq!(
            memory.get(keys::ADMIN_TOKEN).unwrap().as_deref(),
            Some(token.expose())
        );
        assert!(memory.get(keys::ADMIN_SESSION).unwrap().is_some());
    }

    #[test]
    fn test_admin_login_generates_fresh_tokens() {
        let store = SessionStore::in_memory();

        store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let first = store.token().unwrap();
        store.logout_admin().unwrap();
        store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let second = store.token().unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_admin_login_rejection_mutates_nothing() {
        let memory = Arc::new(MemoryStore::new());
        let store = store_with(&memory);

        for _ in 0..3 {
            let err = store.login_admin("wrong@x.com", "bad").unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
            assert_eq!(err.to_string(), "البريد الإلكتروني أو كلمة المرور غير صحيحة");
        }

        assert!(!store.is_admin());
        assert!(store.token().is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_rejection_keeps_existing_admin_session() {
        let store = SessionStore::in_memory();
        store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let token = store.token().unwrap();

        assert!(store.login_admin(ADMIN_EMAIL, "nope").is_err());

        assert!(store.is_admin());
        assert_eq!(store.token().unwrap(), token);
    }

    #[test]
    fn test_custom_admin_credential() {
        let credential = AdminCredentialConfig {
            email: "ops@nour.org".to_string(),
            password: "s3cret-pass".to_string().into(),
            ..AdminCredentialConfig::default()
        };
        let store = SessionStore::open(
            Arc::new(MemoryStore::new()),
            ConfiguredVerifier::new(credential),
        )
        .unwrap();

        assert!(store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).is_err());
        assert!(store.login_admin("ops@nour.org", "s3cret-pass").is_ok());
    }

    #[test]
    fn test_donor_login_tracks_last_call() {
        let store = SessionStore::in_memory();
        assert!(!store.is_donor_logged_in());

        store.login_donor(phone(), None).unwrap();
        assert!(store.is_donor_logged_in());

        store.logout_donor().unwrap();
        assert!(!store.is_donor_logged_in());

        store.logout_donor().unwrap();
        assert!(!store.is_donor_logged_in());

        store.login_donor(phone(), None).unwrap();
        store.login_donor(phone(), None).unwrap();
        assert!(store.is_donor_logged_in());
    }

    #[test]
    fn test_donor_login_accepts_any_parsed_phone() {
        let store = SessionStore::in_memory();
        for raw in ["1234567", "+123456789012345", "010-0000 0000"] {
            let session = store.login_donor(Phone::parse(raw).unwrap(), None).unwrap();
            assert_eq!(store.donor().unwrap().phone, session.phone);
        }
    }

    #[test]
    fn test_donor_is_new_only_with_name() {
        let store = SessionStore::in_memory();

        let profile = DonorProfile {
            name: Some("X".to_string()),
            ..DonorProfile::default()
        };
        assert!(store.login_donor(phone(), Some(profile)).unwrap().is_new);
        assert!(!store.login_donor(phone(), None).unwrap().is_new);
    }

    #[test]
    fn test_token_precedence() {
        let store = SessionStore::in_memory();
        assert_eq!(store.credential(), Credential::None);

        store.login_donor(phone(), None).unwrap();
        let donor_token = store.token().unwrap();
        assert_eq!(store.credential(), Credential::Donor(donor_token.clone()));

        store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let admin_token = store.token().unwrap();
        assert_ne!(admin_token, donor_token);
        assert!(matches!(store.credential(), Credential::Admin(_)));

        store.logout_admin().unwrap();
        assert_eq!(store.token(), Some(donor_token));
    }

    #[test]
    fn test_roles_are_independent() {
        let store = SessionStore::in_memory();
        store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        store.login_donor(phone(), None).unwrap();

        store.logout_donor().unwrap();
        assert!(store.is_admin());

        store.login_donor(phone(), None).unwrap();
        store.logout_admin().unwrap();
        assert!(store.is_donor_logged_in());
    }

    #[test]
    fn test_photo_update_preserves_fields() {
        let memory = Arc::new(MemoryStore::new());
        let store = store_with(&memory);
        let photo = Photo::from_bytes("image/png", b"png").unwrap();

        assert!(store.update_admin_photo(photo.clone()).unwrap().is_none());

        let before = store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let token = store.token().unwrap();
        let after = store.update_admin_photo(photo.clone()).unwrap().unwrap();

        assert_eq!(after.photo.as_ref(), Some(&photo));
        assert_eq!(
            AdminSession {
                photo: None,
                ..after.clone()
            },
            before
        );
        assert_eq!(store.token().unwrap(), token);
        assert_eq!(store.admin().unwrap(), after);

        let persisted: AdminSession =
            serde_json::from_str(&memory.get(keys::ADMIN_SESSION).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, after);
    }

    #[test]
    fn test_donor_photo_update() {
        let store = SessionStore::in_memory();
        let photo = Photo::from_bytes("image/jpeg", b"jpg").unwrap();

        assert!(store.update_donor_photo(photo.clone()).unwrap().is_none());

        let before = store.login_donor(phone(), None).unwrap();
        let after = store.update_donor_photo(photo).unwrap().unwrap();
        assert_eq!(after.phone, before.phone);
        assert_eq!(after.logged_in_at, before.logged_in_at);
        assert!(after.photo.is_some());
    }

    #[test]
    fn test_photo_update_after_logout_elsewhere() {
        let memory = Arc::new(MemoryStore::new());
        let portal = store_with(&memory);
        portal.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        portal.login_donor(phone(), None).unwrap();
        let cli = store_with(&memory);

        cli.logout_admin().unwrap();
        cli.logout_donor().unwrap();

        let photo = Photo::from_bytes("image/png", b"png").unwrap();
        assert!(portal.update_admin_photo(photo.clone()).unwrap().is_none());
        assert!(portal.update_donor_photo(photo).unwrap().is_none());

        assert!(!portal.is_admin());
        assert!(!portal.is_donor_logged_in());
        assert!(memory.get(keys::ADMIN_SESSION).unwrap().is_none());
        assert!(memory.get(keys::ADMIN_TOKEN).unwrap().is_none());
        assert!(memory.get(keys::DONOR_SESSION).unwrap().is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_photo_update_writes_both_keys() {
        let memory = Arc::new(MemoryStore::new());
        let store = store_with(&memory);
        store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let token = store.token().unwrap();

        let photo = Photo::from_bytes("image/png", b"png").unwrap();
        store.update_admin_photo(photo).unwrap().unwrap();

        assert_eq!(
            memory.get(keys::ADMIN_TOKEN).unwrap().as_deref(),
            Some(token.expose())
        );
        assert!(memory.get(keys::ADMIN_SESSION).unwrap().is_some());
    }

    #[test]
    fn test_evict_all_clears_both_pairs() {
        let memory = Arc::new(MemoryStore::new());
        let store = store_with(&memory);
        store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        store.login_donor(phone(), None).unwrap();
        assert_eq!(memory.len(), 4);

        store.evict_all().unwrap();

        assert!(!store.is_admin());
        assert!(!store.is_donor_logged_in());
        assert!(store.token().is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_open_hydrates_from_persisted_state() {
        let memory = Arc::new(MemoryStore::new());
        let first = store_with(&memory);
        first.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        first.login_donor(phone(), None).unwrap();
        let token = first.token().unwrap();

        let second = store_with(&memory);
        assert!(second.is_admin());
        assert!(second.is_donor_logged_in());
        assert_eq!(second.token().unwrap(), token);
    }

    #[test]
    fn test_open_heals_orphans() {
        let memory = Arc::new(MemoryStore::with_entries([
            (keys::ADMIN_TOKEN, "admin-orphan"),
            (keys::DONOR_SESSION, "{\"not\":\"a session\"}"),
            (keys::DONOR_TOKEN, "donor-token"),
        ]));

        let store = store_with(&memory);

        assert!(!store.is_admin());
        assert!(!store.is_donor_logged_in());
        assert_eq!(store.credential(), Credential::None);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_reload_observes_other_writer() {
        let memory = Arc::new(MemoryStore::new());
        let tab_a = store_with(&memory);
        let tab_b = store_with(&memory);

        tab_a.login_donor(phone(), None).unwrap();
        assert!(!tab_b.is_donor_logged_in());

        tab_b.reload().unwrap();
        assert!(tab_b.is_donor_logged_in());

        tab_a.logout_donor().unwrap();
        assert!(tab_b.is_donor_logged_in());
        tab_b.reload().unwrap();
        assert!(!tab_b.is_donor_logged_in());
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let store = SessionStore::open(Arc::new(ReadOnlyStore), ConfiguredVerifier::default())
            .unwrap();

        assert!(matches!(
            store.login_admin(ADMIN_EMAIL, ADMIN_PASSWORD),
            Err(AuthError::Store(_))
        ));
        assert!(store.login_donor(phone(), None).is_err());
        assert!(!store.is_admin());
        assert!(!store.is_donor_logged_in());
    }

    #[test]
    fn test_snapshot() {
        let store = SessionStore::in_memory();
        store.login_donor(phone(), None).unwrap();

        let snapshot = store.snapshot();
        assert!(!snapshot.is_admin);
        assert!(snapshot.is_donor_logged_in);
        assert!(snapshot.admin.is_none());
        assert_eq!(snapshot.donor, store.donor());
    }
}
