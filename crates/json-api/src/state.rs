//! State

use std::sync::Arc;

use tantika_app::context::AppContext;

/// HTTP concerns that shape responses rather than domain behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HttpSettings {
    pub(crate) secure_cookies: bool,
    pub(crate) session_ttl_hours: i32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            secure_cookies: false,
            session_ttl_hours: 24 * 7,
        }
    }
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) http: HttpSettings,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, http: HttpSettings) -> Self {
        Self { app, http }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, http: HttpSettings) -> Arc<Self> {
        Arc::new(Self::new(app, http))
    }
}
