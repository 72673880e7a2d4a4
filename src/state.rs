use std::sync::Arc;

use crate::application::services::{AuthService, RedirectService};
use crate::domain::authorizer::Authorizer;
use crate::domain::repositories::RedirectStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService<dyn RedirectStore>>,
    pub auth_service: Arc<AuthService>,
    /// Where `/` redirects to.
    pub home_url: Arc<str>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RedirectStore>,
        authorizer: Arc<dyn Authorizer>,
        home_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            redirect_service: Arc::new(RedirectService::new(store)),
            auth_service: Arc::new(AuthService::new(authorizer)),
            home_url: home_url.into(),
        }
    }
}
