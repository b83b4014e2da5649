//! Observable session state and its transition table.
//!
//! The state machine every lifecycle operation drives:
//!
//! ```text
//! Initial --(invoke)--> Loading --(ok)--> Success --(always)--> Initial
//!                       Loading --(err)--> Failure --(always)--> Initial
//! ```
//!
//! `Initial` is both the start and the resting terminal state; `Loading`,
//! `Success` and `Failure` are transient. Only `is_signed_in`/`user` persist
//! as the durable outcome of an operation.
//!
//! Transitions are pure: `SessionState::apply` consumes a `SessionEvent` and
//! produces the next state, with no side effects. Network and storage live in
//! the controller that sequences events.

use serde::Serialize;
use tokio::sync::{broadcast, watch};

use crate::models::UserProfile;

/// Buffered pulses per subscriber before the oldest is dropped
const PULSE_CHANNEL_CAPACITY: usize = 16;

/// Lifecycle phase of the most recent operation, not a durable property of
/// the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Initial,
    Loading,
    Success,
    Failure,
}

/// Named transition dispatched by the session controller
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// An operation started
    Loading,
    /// Sign-in or auto-sign-in completed with a validated profile
    SignedIn(UserProfile),
    /// Registration completed; deliberately does not establish a session
    SignedUp,
    /// Sign-out completed
    SignedOut,
    /// The operation in flight failed
    Failure,
    /// Always-transition back to the resting state
    Reset,
    /// Passive profile refresh; bypasses the status pulse entirely
    UserRefreshed(UserProfile),
}

/// The aggregate observed by the rest of the application.
///
/// Invariant: `is_signed_in == true` implies `user` is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    #[serde(rename = "isSignedIn")]
    pub is_signed_in: bool,
    pub user: Option<UserProfile>,
    pub status: SessionStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            is_signed_in: false,
            user: None,
            status: SessionStatus::Initial,
        }
    }
}

impl SessionState {
    /// Pure transition function: `(state, event) -> state`
    pub fn apply(&self, event: &SessionEvent) -> SessionState {
        match event {
            SessionEvent::Loading => SessionState {
                status: SessionStatus::Loading,
                ..self.clone()
            },
            SessionEvent::SignedIn(profile) => SessionState {
                is_signed_in: true,
                user: Some(profile.clone()),
                status: SessionStatus::Success,
            },
            SessionEvent::SignedUp => SessionState {
                status: SessionStatus::Success,
                ..self.clone()
            },
            SessionEvent::SignedOut => SessionState {
                is_signed_in: false,
                user: None,
                status: SessionStatus::Success,
            },
            // Failure always clears the session, never just the status
            SessionEvent::Failure => SessionState {
                is_signed_in: false,
                user: None,
                status: SessionStatus::Failure,
            },
            SessionEvent::Reset => SessionState {
                status: SessionStatus::Initial,
                ..self.clone()
            },
            SessionEvent::UserRefreshed(profile) => SessionState {
                user: Some(profile.clone()),
                ..self.clone()
            },
        }
    }
}

/// Process-wide observable session container.
///
/// The polled state rides a `watch` channel, which only keeps the latest
/// value - fine for "what is the session now", lossy for the momentary
/// Success/Failure pulse. The pulse is therefore also published on a
/// `broadcast` channel so observers that care about operation completion
/// (spinners, toasts) never miss it.
pub struct SessionHandle {
    state: watch::Sender<SessionState>,
    pulses: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let (pulses, _) = broadcast::channel(PULSE_CHANNEL_CAPACITY);
        Self { state, pulses }
    }

    /// Snapshot of the current session state
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes (latest-value semantics)
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Subscribe to the one-shot event stream of dispatched transitions
    pub fn pulses(&self) -> broadcast::Receiver<SessionEvent> {
        self.pulses.subscribe()
    }

    /// Apply a transition and notify both channels
    pub(crate) fn dispatch(&self, event: SessionEvent) {
        self.state.send_modify(|state| *state = state.apply(&event));
        // Send fails only when nobody is subscribed, which is fine
        let _ = self.pulses.send(event);
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
