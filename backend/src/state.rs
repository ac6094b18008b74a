//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything in here is built once at startup and read-only afterwards;
//! cloning only bumps reference counts.

use crate::config::AppConfig;
use crate::services::AuthService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Authentication core with its store, token issuer and hasher
    pub auth: AuthService,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Present when `metrics.enabled` is set
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(auth: AuthService, config: AppConfig) -> Self {
        Self {
            auth,
            config: Arc::new(config),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryUserStore;

    fn test_state() -> AppState {
        let mut config = AppConfig::default();
        config.password.bcrypt_cost = crate::auth::MIN_BCRYPT_COST;
        let auth = AuthService::from_config(Arc::new(InMemoryUserStore::new()), &config).unwrap();
        AppState::new(auth, config)
    }

    #[test]
    fn test_state_clone_shares_config() {
        let state = test_state();
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(cloned.metrics.is_none());
    }

    #[tokio::test]
    async fn test_token_service_is_ready() {
        let state = test_state();
        let profile = state
            .auth()
            .register("Alice", "a@x.com", "pw123")
            .await
            .unwrap();
        let token = state.auth().login("a@x.com", "pw123").await.unwrap();
        assert_eq!(state.auth().verify_token(&token).unwrap().id, profile.id);
    }
}
