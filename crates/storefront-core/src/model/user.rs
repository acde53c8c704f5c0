// ── Account domain types ──

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// The signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
}

impl User {
    /// Name to greet the user with: their name, else their email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: SecretString,
}
