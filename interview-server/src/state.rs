//! Shared application state for the interview server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use interview_core::{AuthConfig, CredentialIssuer, SessionManager};

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Owner of every interview session
    pub session_manager: Arc<SessionManager>,
    /// Issues and checks per-session bearer credentials
    pub issuer: Arc<CredentialIssuer>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState with default components (mock assessor,
    /// in-memory reports, development secret)
    pub fn new() -> Self {
        Self::with_components(
            Arc::new(SessionManager::default()),
            Arc::new(CredentialIssuer::new(AuthConfig::default())),
        )
    }

    /// Create AppState with custom components
    pub fn with_components(
        session_manager: Arc<SessionManager>,
        issuer: Arc<CredentialIssuer>,
    ) -> Self {
        Self {
            session_manager,
            issuer,
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_new() {
        let state = AppState::new();
        assert!(state.uptime_seconds() >= 0);
        assert!(state.issuer.config().uses_dev_secret());
    }

    #[tokio::test]
    async fn test_app_state_with_components() {
        let manager = Arc::new(SessionManager::default());
        manager.start_profile(None).await.unwrap();

        let state = AppState::with_components(
            manager,
            Arc::new(CredentialIssuer::new(AuthConfig::new("secret"))),
        );
        assert_eq!(state.session_manager.session_count().await, 1);
    }
}
