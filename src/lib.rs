//! map-menu: conversation-driven map menu controller for a mobile robot
//!
//! The menu lets an operator choose between creating a new map and using the
//! existing one, by voice or by touching the menu controls, and navigates
//! back to the start of the conversation after a few seconds of silence.
//!
//! This crate is the in-process reactive controller only:
//! - Explicit session state machine across one focus-acquisition window
//! - One navigation gate shared by voice, UI, and timer triggers
//! - Cancellable single-shot idle deadline
//! - Registry binding script checkpoints to menu actions
//!
//! The dialogue engine, the menu widgets, the map store, and the follow-up
//! flows are external collaborators injected through the traits in
//! [`conversation`], [`ui`], [`maps`], and [`flows`]. The embedding process
//! feeds focus lifecycle, conversation, and UI inputs through the
//! controller's input channel and runs its dispatch loop.

pub mod bookmarks;
pub mod config;
pub mod conversation;
pub mod events;
pub mod flows;
pub mod maps;
pub mod navigation;
pub mod session;
pub mod timer;
pub mod ui;

pub use bookmarks::{BookmarkRegistry, Checkpoint, CheckpointKind};
pub use config::{ConfigError, MenuConfig};
pub use conversation::{
    ConversationEngine, ConversationEvent, ReactionImportance, ReactionValidity, ScriptResource,
    Subscription,
};
pub use events::SessionEvent;
pub use flows::{FlowKind, FlowLauncher};
pub use maps::MapStore;
pub use navigation::NavigationGate;
pub use session::{FocusContext, MenuInput, MenuState, SessionController, UiAction};
pub use timer::IdleTimer;
pub use ui::{MenuControl, MenuUi};
