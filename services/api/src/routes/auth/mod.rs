use axum::{
    routing::{get, post, put},
    Router,
};
use postgres_models::models::UserProfile;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

mod login;
mod me;
mod profile;
mod signup;

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup::handler))
        .route("/login", post(login::handler))
        .route("/me", get(me::handler))
        .route("/profile", put(profile::handler))
}

/// Emails are compared case-insensitively.
fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        None
    } else {
        Some(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Asha@Example.COM "), Some("asha@example.com".to_string()));
        assert_eq!(normalize_email("   "), None);
        assert_eq!(normalize_email("not-an-email"), None);
    }
}
