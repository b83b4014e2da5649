//! API client for the WashPass identity service.
//!
//! This module provides the `IdentityApi` trait describing the four remote
//! operations the session controller needs, and `IdentityClient`, the
//! reqwest-backed implementation.
//!
//! The client is stateless: the bearer token is supplied explicitly per call
//! by the session controller and never read from storage, so the client can
//! be tested in isolation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::models::{LoginResponse, SignupRequest, SignupResponse, UserProfile, ValidateResponse};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The four identity-service operations used by the session controller.
///
/// All are idempotent with respect to local state; implementations hold no
/// session state of their own.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Exchange credentials for an access token
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Exchange a token for the authoritative current user profile.
    /// Doubles as a liveness check for the token.
    async fn validate(&self, token: &str) -> Result<UserProfile, ApiError>;

    /// Create a new account
    async fn register(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError>;

    /// Fetch a user's profile by id
    async fn fetch_profile(&self, user_id: i64) -> Result<UserProfile, ApiError>;
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// API client for the WashPass identity service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new API client against the given service base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl IdentityApi for IdentityClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.url("/auth/login");
        debug!(%url, "sending login request");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn validate(&self, token: &str) -> Result<UserProfile, ApiError> {
        let url = self.url("/auth/validate");
        debug!(%url, "validating session token");

        let response = self.client.get(&url).bearer_auth(token).send().await?;

        let response = Self::check_response(response).await?;
        let validated: ValidateResponse = response.json().await?;
        Ok(validated.user)
    }

    async fn register(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        let url = self.url("/users");
        debug!(%url, email = %request.email, "sending registration request");

        let response = self.client.post(&url).json(request).send().await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn fetch_profile(&self, user_id: i64) -> Result<UserProfile, ApiError> {
        let url = self.url(&format!("/users/{}", user_id));
        debug!(%url, "fetching user profile");

        let response = self.client.get(&url).send().await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = IdentityClient::new("http://10.0.0.5:3000/").unwrap();
        assert_eq!(client.url("/auth/login"), "http://10.0.0.5:3000/auth/login");

        let client = IdentityClient::new("http://10.0.0.5:3000").unwrap();
        assert_eq!(client.url("/users/7"), "http://10.0.0.5:3000/users/7");
    }

    #[test]
    fn test_login_request_body_shape() {
        let body = serde_json::to_value(LoginRequest {
            email: "a@b.com",
            password: "Passw0rd",
        })
        .unwrap();
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["password"], "Passw0rd");
    }
}
