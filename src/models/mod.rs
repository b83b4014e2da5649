//! Data models for the WashPass identity service.
//!
//! This module contains the wire and domain types exchanged with the
//! service:
//!
//! - `UserProfile`: the authenticated user's profile
//! - `LoginResponse`, `ValidateResponse`: authentication payloads
//! - `SignupRequest`, `SignupResponse`: registration payloads

pub mod user;

pub use user::{LoginResponse, SignupRequest, SignupResponse, UserProfile, ValidateResponse};
