//! External dialogue engine contract
//!
//! The engine is an opaque collaborator: it resolves a script's checkpoints,
//! reports reaching them, and accepts non-blocking jump requests. All
//! mutating calls are fire-and-forget; the menu never waits for the engine
//! to confirm anything.

use std::collections::HashMap;

use crate::bookmarks::Checkpoint;

use super::Subscription;

/// Priority of a jump request relative to ongoing autonomous behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionImportance {
    /// Interrupts lower-priority autonomous behavior
    High,
    /// Yields to ongoing behavior
    Low,
}

/// Urgency of a jump request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionValidity {
    /// Accepted right now or dropped, never queued
    Immediate,
    /// May be queued behind ongoing behavior
    Delayed,
}

/// Opaque name of a dialogue script resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptResource(String);

impl ScriptResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Callback invoked when the conversation reports reaching a checkpoint
pub type CheckpointReachedFn = Box<dyn Fn(String) + Send + Sync>;

/// Callback invoked once when the conversation actually starts
pub type ConversationStartedFn = Box<dyn Fn() + Send + Sync>;

/// Events surfaced by the conversation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    /// The conversation is running; fires once per session
    Started,
    /// A named checkpoint in the script was reached
    CheckpointReached { name: String },
}

/// The dialogue engine the robot grants access to while focus is held
pub trait ConversationEngine: Send + Sync {
    /// Resolve the script's checkpoints; one synchronous call, no retries
    fn load_script(&self, script: &ScriptResource) -> HashMap<String, Checkpoint>;

    /// Set a script variable
    fn set_variable(&self, name: &str, value: &str);

    /// Enable or disable the autonomous reaction attached to a checkpoint
    fn set_autonomous_reaction_enabled(&self, checkpoint: &Checkpoint, enabled: bool);

    /// Request a jump to a checkpoint; issuance is fire-and-forget
    fn go_to_checkpoint(
        &self,
        checkpoint: &Checkpoint,
        importance: ReactionImportance,
        validity: ReactionValidity,
    );

    /// Register a checkpoint-reached callback; dropped via the returned handle
    fn on_checkpoint_reached(&self, callback: CheckpointReachedFn) -> Subscription;

    /// Register a conversation-started callback; dropped via the returned handle
    fn on_conversation_started(&self, callback: ConversationStartedFn) -> Subscription;

    /// Start the conversation; returns before it actually begins
    fn start_conversation(&self);
}
