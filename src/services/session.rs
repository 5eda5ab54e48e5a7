//! Session manager: the single source of truth for the current actor.
//!
//! ARCHITECTURE
//! ============
//! One `SessionManager` owns the in-memory session and the durable store;
//! every mutation (login, register, logout, profile update) flows through it.
//! The backend is an injected [`AuthApi`], so the demo backend and test mocks
//! swap in without a second login code path. The manager is constructed once
//! at startup and handed to whatever needs it; there is no ambient global.
//!
//! TRADE-OFFS
//! ==========
//! Login and register persist the new session document before touching
//! memory. A store failure therefore surfaces as an error with memory
//! unchanged, rather than leaving an authenticated session that would vanish
//! on restart.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::types::{ApiError, AuthApi, BusinessProfile, RegisterForm, Role, User};
use crate::services::validate::{ValidationErrors, validate_registration};
use crate::storage::{PersistedSession, SessionStore, StoreError};

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Error)]
pub enum AuthError {
    /// The registration form failed validation; no request was made.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The operation requires an active session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// A login or register request is already in flight on this manager.
    #[error("another submit is already in flight")]
    SubmitInFlight,

    /// The backend rejected the credentials or the registration.
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("network error: {0}")]
    Network(String),

    /// Carries the API error's own description (status line, parse failure).
    #[error("{0}")]
    Server(String),

    #[error("session store failed: {0}")]
    Store(#[from] StoreError),
}

impl From<ApiError> for AuthError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::InvalidCredentials(message) => AuthError::InvalidCredentials(message),
            ApiError::Network(message) => AuthError::Network(message),
            ApiError::Server { .. } | ApiError::Parse(_) | ApiError::ClientBuild(_) => {
                AuthError::Server(e.to_string())
            }
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// In-memory session snapshot. `authenticated` implies `user` is present;
/// hydration discards any stored document that violates that.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub authenticated: bool,
    pub remember_me: bool,
}

impl Session {
    fn from_persisted(doc: PersistedSession) -> Self {
        match doc.user {
            Some(user) if doc.is_authenticated => Self {
                user: Some(user),
                authenticated: true,
                remember_me: doc.remember_me,
            },
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }
}

/// Fields a profile update may change. `None` leaves the field as it is;
/// setting `business` replaces the whole profile.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub business: Option<BusinessProfile>,
}

impl UserUpdate {
    fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(business) = &self.business {
            user.business = Some(business.clone());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.business.is_none()
    }
}

// =============================================================================
// MANAGER
// =============================================================================

pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    session: Mutex<Session>,
    submit_in_flight: AtomicBool,
}

/// Releases the submit flag when the request finishes, error paths included.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl SessionManager {
    /// Builds a manager and hydrates its session from the store. An
    /// unreadable store logs a warning and starts anonymous.
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn SessionStore>) -> Self {
        let session = match store.load() {
            Ok(doc) => Session::from_persisted(doc),
            Err(e) => {
                warn!(error = %e, "session store unreadable; starting anonymous");
                Session::default()
            }
        };
        Self {
            api,
            store,
            session: Mutex::new(session),
            submit_in_flight: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_submit(&self) -> Result<InFlightGuard<'_>, AuthError> {
        if self.submit_in_flight.swap(true, Ordering::AcqRel) {
            return Err(AuthError::SubmitInFlight);
        }
        Ok(InFlightGuard {
            flag: &self.submit_in_flight,
        })
    }

    /// Persists the new session, then updates memory.
    fn commit(&self, user: User, remember_me: bool) -> Result<Session, AuthError> {
        let doc = PersistedSession::authenticated(user, remember_me);
        self.store.save(&doc)?;
        let session = Session::from_persisted(doc);
        *self.lock() = session.clone();
        Ok(session)
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Authenticates against the backend. One request, no retry; on failure
    /// neither memory nor the store changes.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on rejection,
    /// [`AuthError::Network`] / [`AuthError::Server`] on transport or backend
    /// failure, [`AuthError::SubmitInFlight`] when another submit is still
    /// running, and [`AuthError::Store`] when persisting the session fails.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Session, AuthError> {
        let _guard = self.begin_submit()?;

        let payload = match self.api.login(email, password).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "login rejected");
                return Err(e.into());
            }
        };

        let session = self.commit(payload.user, remember_me)?;
        if let Some(user) = &session.user {
            info!(email = %user.email, role = %user.role, "login succeeded");
        }
        Ok(session)
    }

    /// Validates the form, then registers against the backend. Validation
    /// failures never reach the network.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] with field-keyed messages, or the
    /// same set of failures as [`SessionManager::login`].
    pub async fn register(&self, form: &RegisterForm) -> Result<Session, AuthError> {
        validate_registration(form).map_err(AuthError::Validation)?;

        let _guard = self.begin_submit()?;

        let payload = match self.api.register(form).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "registration rejected");
                return Err(e.into());
            }
        };

        let session = self.commit(payload.user, false)?;
        if let Some(user) = &session.user {
            info!(email = %user.email, role = %user.role, "registration succeeded");
        }
        Ok(session)
    }

    /// Ends the session. The backend is notified best-effort; local state is
    /// cleared regardless, so logout cannot be blocked by the network.
    pub async fn logout(&self) -> Session {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "logout notify failed; clearing local session anyway");
        }
        if let Err(e) = self.store.clear() {
            error!(error = %e, "session store clear failed; durable copy may remain");
        }

        let mut session = self.lock();
        *session = Session::default();
        info!("logged out");
        session.clone()
    }

    /// Shallow-merges `update` into the current user and re-persists.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no session is active and
    /// [`AuthError::Store`] when persisting fails (memory is left unchanged).
    pub fn update_user(&self, update: &UserUpdate) -> Result<Session, AuthError> {
        let mut session = self.lock();
        let Some(user) = session.user.as_ref() else {
            return Err(AuthError::NotAuthenticated);
        };

        let mut merged = user.clone();
        update.apply_to(&mut merged);

        let doc = PersistedSession::authenticated(merged, session.remember_me);
        self.store.save(&doc)?;
        *session = Session::from_persisted(doc);
        info!("profile updated");
        Ok(session.clone())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.lock().clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().authenticated
    }

    #[must_use]
    pub fn remember_me(&self) -> bool {
        self.lock().remember_me
    }

    /// Membership test against the user's permission set; false when
    /// anonymous, never an error.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.lock()
            .user
            .as_ref()
            .is_some_and(|user| user.has_permission(permission))
    }

    /// Exact role test; false when anonymous.
    #[must_use]
    pub fn is_role(&self, role: Role) -> bool {
        self.lock().role() == Some(role)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
