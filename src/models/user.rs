// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's profile as issued by the identity service.
///
/// Produced only by the service (`/auth/validate` nests it under `user`,
/// `/users/:id` returns it bare with `id` instead of `sub`). Replaced
/// wholesale on every refresh, never field-patched locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Subject id from the token claims; `/users/:id` echoes it as `id`.
    #[serde(alias = "id")]
    pub sub: i64,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Token issued-at, epoch seconds. Carried for display only - expiry is
    /// enforced by the service, never compared locally.
    #[serde(default)]
    pub iat: i64,
    /// Token expiry, epoch seconds. See `iat`.
    #[serde(default)]
    pub exp: i64,
}

impl UserProfile {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Token issue time, for display purposes
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// Token expiry time, for display purposes
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Response from `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Response from `GET /auth/validate`; the profile is nested under `user`
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateResponse {
    pub user: UserProfile,
}

/// Request body for `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Response from `POST /users`, echoed back to the caller on sign-up.
///
/// `id` is optional on the wire: the controller treats a missing id as a
/// protocol violation even when the request itself succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub id: Option<i64>,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Loyalty balance granted at registration
    #[serde(rename = "washCoins", default)]
    pub wash_coins: i64,
}

// ============================================================================
// Tests
// ============================================================================
