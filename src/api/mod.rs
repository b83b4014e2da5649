//! HTTP surface of the WashPass identity service.
//!
//! `IdentityApi` is the trait seam the session controller depends on;
//! `IdentityClient` is the reqwest implementation. Errors are mapped to the
//! `ApiError` taxonomy by HTTP status.

pub mod client;
pub mod error;

pub use client::{IdentityApi, IdentityClient};
pub use error::ApiError;
