//! Observable session events
//!
//! Emitted by the session controller on a broadcast channel so an embedding
//! shell can mirror menu state without reaching into the controller.

use serde::{Deserialize, Serialize};

use crate::bookmarks::CheckpointKind;
use crate::flows::FlowKind;

/// Events emitted by the session controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Focus was gained and the conversation was started
    SessionStarted {
        /// Whether a stored map was found at session start
        map_available: bool,
    },

    /// Focus was lost and the session torn down
    SessionEnded,

    /// The conversation reported reaching a checkpoint
    CheckpointReached { name: String },

    /// A checkpoint jump request was issued to the engine
    NavigationIssued { target: CheckpointKind },

    /// A navigation attempt failed and the direct action ran instead
    NavigationFellBack { target: CheckpointKind },

    /// The idle deadline was armed
    IdleTimerArmed { timeout_ms: u64 },

    /// The idle deadline was cancelled
    IdleTimerCancelled,

    /// The idle deadline elapsed without the operator choosing
    IdleTimedOut,

    /// Control was handed off to a follow-up flow
    FlowLaunched { flow: FlowKind },

    /// The robot refused to grant focus
    FocusRefused { reason: String },
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::SessionStarted { map_available } => {
                write!(f, "SESSION_STARTED (map_available: {})", map_available)
            }
            SessionEvent::SessionEnded => write!(f, "SESSION_ENDED"),
            SessionEvent::CheckpointReached { name } => {
                write!(f, "CHECKPOINT_REACHED ({})", name)
            }
            SessionEvent::NavigationIssued { target } => {
                write!(f, "NAVIGATION_ISSUED ({})", target)
            }
            SessionEvent::NavigationFellBack { target } => {
                write!(f, "NAVIGATION_FELL_BACK ({})", target)
            }
            SessionEvent::IdleTimerArmed { timeout_ms } => {
                write!(f, "IDLE_TIMER_ARMED ({}ms)", timeout_ms)
            }
            SessionEvent::IdleTimerCancelled => write!(f, "IDLE_TIMER_CANCELLED"),
            SessionEvent::IdleTimedOut => write!(f, "IDLE_TIMED_OUT"),
            SessionEvent::FlowLaunched { flow } => write!(f, "FLOW_LAUNCHED ({})", flow),
            SessionEvent::FocusRefused { reason } => {
                write!(f, "FOCUS_REFUSED ({})", reason)
            }
        }
    }
}
