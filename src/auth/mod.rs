//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionState` / `SessionHandle`: the observable session state machine
//! - `TokenStore` / `KeyringTokenStore`: secure OS-level token storage
//! - `SessionController`: orchestration of the five session operations
//!
//! The controller is the only writer of session state and the only reader
//! and writer of the stored token.

pub mod controller;
pub mod state;
pub mod store;

pub use controller::{SessionController, SessionError};
pub use state::{SessionEvent, SessionHandle, SessionState, SessionStatus};
pub use store::{KeyringTokenStore, StoreError, TokenStore};
