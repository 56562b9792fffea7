use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Caller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Caller => "caller",
            Role::Admin => "admin",
        }
    }
}

/// A signed-in agent. The password is kept only because the session file
/// round-trips the whole record; nothing re-checks it after login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Seam for identity lookup. The shipped provider is a static in-memory
/// list; swapping in a real identity backend only requires another
/// implementation of this trait.
pub trait CredentialProvider: Send + Sync {
    /// Exact-match check. Returns the role on success and nothing on
    /// failure; callers get no distinction between unknown user and
    /// wrong password.
    fn verify(&self, username: &str, password: &str) -> Option<Role>;
}

/// Hardcoded caller credentials. Replace with real agent accounts before
/// deploying.
pub struct StaticCredentials {
    users: Vec<User>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self {
            users: vec![
                user("sahilsheikh.dev@gmail.com", "SaH!l_93#Dev", Role::Caller),
                user("anandniranjane99@gmail.com", "An@nd_99$Nj", Role::Caller),
                user("sohel.khanp27@gmail.com", "SoH3l#27_K", Role::Caller),
                user("rohitsoge143@gmail.com", "R0h!t_143$S", Role::Caller),
            ],
        }
    }

    #[cfg(test)]
    pub fn with_users(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Option<Role> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(|u| u.role)
    }
}

fn user(username: &str, password: &str, role: Role) -> User {
    User {
        username: username.to_string(),
        password: password.to_string(),
        role,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> StaticCredentials {
        StaticCredentials::with_users(vec![user("agent@example.com", "s3cret", Role::Caller)])
    }

    #[test]
    fn matching_credentials_return_role() {
        assert_eq!(
            provider().verify("agent@example.com", "s3cret"),
            Some(Role::Caller)
        );
    }

    #[test]
    fn wrong_password_and_unknown_user_are_indistinguishable() {
        let p = provider();
        assert_eq!(p.verify("agent@example.com", "wrong"), None);
        assert_eq!(p.verify("nobody@example.com", "s3cret"), None);
    }

    #[test]
    fn comparison_is_exact() {
        let p = provider();
        assert_eq!(p.verify("Agent@Example.com", "s3cret"), None);
        assert_eq!(p.verify("agent@example.com", "S3cret"), None);
    }
}
