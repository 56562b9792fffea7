use anyhow::{Context, Result};
use std::{fs, path::PathBuf, sync::RwLock};

use super::credentials::User;

/// Name of the single durable session entry in the app data dir.
pub const SESSION_FILE: &str = "session.json";

/// Durable session persistence: one JSON file holding the signed-in user,
/// or no file at all. Present means authenticated on the next launch.
pub struct SessionStore {
    path: PathBuf,
    data: RwLock<Option<User>>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {}", path.display()))?;
            // A corrupt session file falls back to signed-out rather than
            // blocking startup.
            serde_json::from_str(&contents).ok()
        } else {
            None
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn current(&self) -> Option<User> {
        self.data.read().unwrap().clone()
    }

    /// Persist a fresh session, overwriting any prior one.
    pub fn save(&self, user: User) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        let serialized = serde_json::to_string_pretty(&user)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;
        *guard = Some(user);
        Ok(())
    }

    /// Clear memory and disk unconditionally. Missing file is fine.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        *guard = None;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::Role;

    fn sample_user() -> User {
        User {
            username: "agent@example.com".into(),
            password: "s3cret".into(),
            role: Role::Caller,
        }
    }

    #[test]
    fn save_then_rehydrate_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);

        let store = SessionStore::new(path.clone()).unwrap();
        assert!(store.current().is_none());
        store.save(sample_user()).unwrap();

        let reloaded = SessionStore::new(path).unwrap();
        assert_eq!(reloaded.current(), Some(sample_user()));
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);

        let store = SessionStore::new(path.clone()).unwrap();
        store.save(sample_user()).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(store.current().is_none());
        assert!(!path.exists());

        // Clearing an already-signed-out store is a no-op.
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_session_file_means_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        std::fs::write(&path, "not json").unwrap();

        let store = SessionStore::new(path).unwrap();
        assert!(store.current().is_none());
    }
}
