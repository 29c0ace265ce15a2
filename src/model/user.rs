use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a registered user, issued by the backend at sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    #[serde(rename = "Faculty Member")]
    FacultyMember,
    Teacher,
}

/// Public profile stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Default delivery location offered at checkout.
    pub department: String,
    pub role: Role,
}

/// Payload for registering a new account.
#[derive(Clone)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: Role,
    pub password: String,
}

impl std::fmt::Debug for SignUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUp")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("department", &self.department)
            .field("role", &self.role)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Credential row: the profile plus an argon2 password hash, keyed by email.
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub password_hash: String,
    pub profile: UserProfile,
}
