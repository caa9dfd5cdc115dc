//! Application state for Axum handlers.

use festival_core::FestivalStore;
use std::fmt;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap: the store and the admin token are reference-counted.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn FestivalStore>,
    admin_token: Option<Arc<str>>,
}

impl AppState {
    /// Create state around a store. Admin endpoints stay disabled until a
    /// token is configured with [`AppState::with_admin_token`].
    #[must_use]
    pub fn new(store: Arc<dyn FestivalStore>) -> Self {
        Self {
            store,
            admin_token: None,
        }
    }

    /// Enable admin endpoints for callers presenting `token`.
    ///
    /// Blank tokens are ignored so that admin access cannot be granted with
    /// an empty bearer value.
    #[must_use]
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.admin_token = (!token.trim().is_empty()).then(|| Arc::from(token));
        self
    }

    /// The event and registration store.
    #[must_use]
    pub fn store(&self) -> &dyn FestivalStore {
        self.store.as_ref()
    }

    /// Configured admin token, if admin endpoints are enabled.
    #[must_use]
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("admin_enabled", &self.admin_token.is_some())
            .finish_non_exhaustive()
    }
}
