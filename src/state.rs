//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` bundles the composed services every command needs: the session
//! manager (auth state + persistence), the curated slug registry, and the
//! seeded provider catalog. The registry and catalog are immutable after
//! startup, so clones share them through `Arc` without locking.

use std::sync::Arc;

use crate::routing::SlugRegistry;
use crate::services::SessionManager;
use crate::services::directory::{self, ServiceProvider};

/// Composed services handed to command handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
    pub registry: Arc<SlugRegistry>,
    pub providers: Arc<Vec<ServiceProvider>>,
}

impl AppState {
    #[must_use]
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            session,
            registry: Arc::new(SlugRegistry::builtin()),
            providers: Arc::new(directory::seed_providers()),
        }
    }
}
