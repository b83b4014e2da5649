//! washpass-session - client-side authentication session core for the
//! WashPass mobile app.
//!
//! This crate establishes, persists, validates and tears down the user's
//! signed-in session against the WashPass identity service. It exposes a
//! single observable [`auth::SessionState`] to the rest of the application
//! and orchestrates the five session operations through
//! [`auth::SessionController`]:
//!
//! - sign-in, sign-up, silent restore (auto-sign-in), sign-out, and a
//!   passive profile refresh
//!
//! UI concerns (forms, navigation, toasts) live in the embedding
//! application; it subscribes to state changes via
//! [`auth::SessionHandle::watch`] and to operation pulses via
//! [`auth::SessionHandle::pulses`], and owns all presentation of loading
//! and failure.
//!
//! # Example
//!
//! ```no_run
//! use washpass_session::auth::SessionController;
//! use washpass_session::config::Config;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let controller = SessionController::from_config(&config)?;
//!
//! // At app start, try to restore the previous session silently.
//! match controller.auto_sign_in().await {
//!     Ok(profile) => println!("welcome back, {}", profile.full_name),
//!     Err(_) => { /* render the signed-out flow */ }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiError, IdentityApi, IdentityClient};
pub use auth::{SessionController, SessionError, SessionHandle, SessionState, SessionStatus};
pub use models::UserProfile;
