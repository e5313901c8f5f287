//! Conversation engine contract and callback subscriptions

mod engine;
mod subscription;

pub use engine::{
    CheckpointReachedFn, ConversationEngine, ConversationEvent, ConversationStartedFn,
    ReactionImportance, ReactionValidity, ScriptResource,
};
pub use subscription::Subscription;
