use std::sync::Arc;

use crate::config::{simulate, LatencyConfig};
use crate::db::{load_record, save_record, KeyValueStore, USER_KEY};
use crate::error::ServiceError;
use crate::models::user::User;

/// Tracks the signed-in user as a single record in the local store.
///
/// Credentials are not checked: any non-blank email and password sign in.
/// A real deployment swaps this for actual verification behind the same
/// method signatures.
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    latency: LatencyConfig,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>, latency: LatencyConfig) -> Self {
        Self { store, latency }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        simulate(self.latency.login).await;

        if email.trim().is_empty() || password.is_empty() {
            log::info!("Rejected sign-in with missing credentials");
            return Err(ServiceError::InvalidCredentials);
        }

        let user = User::from_email(email);
        save_record(self.store.as_ref(), USER_KEY, &user).await?;
        log::info!("User {} signed in", user.id);
        Ok(user)
    }

    /// Clears the session. Safe to call when nobody is signed in.
    pub async fn logout(&self) -> Result<(), ServiceError> {
        self.store.remove(USER_KEY).await?;
        log::info!("Session cleared");
        Ok(())
    }

    pub async fn get_me(&self) -> Result<User, ServiceError> {
        simulate(self.latency.session_lookup).await;

        load_record::<User>(self.store.as_ref(), USER_KEY)
            .await?
            .ok_or(ServiceError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn service() -> SessionService {
        SessionService::new(Arc::new(MemoryStore::new()), LatencyConfig::none())
    }

    #[tokio::test]
    async fn login_persists_session() {
        let sessions = service();
        let user = sessions.login("a@b.com", "x").await.unwrap();
        assert_eq!(user.name, "A");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(sessions.get_me().await.unwrap(), user);
    }

    #[tokio::test]
    async fn blank_credentials_are_rejected() {
        let sessions = service();
        assert!(matches!(
            sessions.login("", "secret").await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            sessions.login("a@b.com", "").await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            sessions.get_me().await,
            Err(ServiceError::NotAuthenticated)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn login_waits_for_simulated_latency() {
        let sessions = SessionService::new(Arc::new(MemoryStore::new()), LatencyConfig::default());
        let started = tokio::time::Instant::now();
        sessions.login("a@b.com", "x").await.unwrap();
        assert!(started.elapsed() >= LatencyConfig::default().login);
    }
}
