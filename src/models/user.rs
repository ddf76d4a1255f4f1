use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// Builds the session user for an email address.
    ///
    /// The id is stable per (case-insensitive) email so trips created in an
    /// earlier session still belong to the same user after logging back in.
    pub fn from_email(email: &str) -> Self {
        let email = email.trim();
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, email.to_lowercase().as_bytes());

        Self {
            id: format!("user-{}", id.simple()),
            name: display_name(email),
            email: email.to_string(),
        }
    }
}

/// Local-part of the email with its first word character upper-cased.
fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut chars = local.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => {
            std::iter::once(first.to_ascii_uppercase()).chain(chars).collect()
        }
        _ => local.to_string(),
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserResponse {
    pub user: User,
}
