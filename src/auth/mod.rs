pub mod commands;
pub mod credentials;
pub mod session_store;

use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::error::{AppError, AppResult};
pub use credentials::{CredentialProvider, Role, StaticCredentials, User};
pub use session_store::{SessionStore, SESSION_FILE};

/// Login/logout over an injected credential provider, with the session
/// mirrored to durable storage on every change.
pub struct AuthController {
    provider: Arc<dyn CredentialProvider>,
    store: SessionStore,
}

impl AuthController {
    pub fn new(provider: Arc<dyn CredentialProvider>, store: SessionStore) -> Self {
        Self { provider, store }
    }

    /// The rehydrated session, if one survived from a previous run.
    pub fn current_user(&self) -> Option<User> {
        self.store.current()
    }

    pub fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let role = self
            .provider
            .verify(username, password)
            .ok_or_else(|| AppError::validation("Invalid username or password"))?;

        let user = User {
            username: username.to_string(),
            password: password.to_string(),
            role,
        };

        self.store.save(user.clone())?;

        info!("User {} signed in", user.username);
        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        if let Some(user) = self.store.current() {
            info!("User {} signed out", user.username);
        }
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(dir: &tempfile::TempDir) -> AuthController {
        let store = SessionStore::new(dir.path().join(SESSION_FILE)).unwrap();
        AuthController::new(Arc::new(StaticCredentials::new()), store)
    }

    #[test]
    fn failed_login_persists_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let auth = controller(&dir);

        let err = auth.login("nobody@example.com", "nope").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(auth.current_user().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[test]
    fn successful_login_persists_and_logout_clears() {
        let dir = tempfile::tempdir().unwrap();
        let auth = controller(&dir);

        let user = auth
            .login("sahilsheikh.dev@gmail.com", "SaH!l_93#Dev")
            .unwrap();
        assert_eq!(user.role, Role::Caller);
        assert!(dir.path().join(SESSION_FILE).exists());
        assert_eq!(auth.current_user().map(|u| u.username), Some(user.username));

        auth.logout().unwrap();
        assert!(auth.current_user().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());
    }
}
