//! Bookmark registry built once per session from the dialogue script
//!
//! The conversation engine reports reaching checkpoints by name; the menu
//! only reacts to a closed set of them. Unknown names are dropped at build
//! time, missing names simply make later lookups fail.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conversation::{ConversationEngine, ScriptResource};

/// The checkpoints the menu script is expected to define
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointKind {
    /// Opening of the menu conversation
    Start,
    /// The "create a map" branch was chosen
    Create,
    /// End of the "create a map" branch
    CreateEnd,
    /// The "use the existing map" branch was chosen
    Use,
    /// End of the "use the existing map" branch
    UseEnd,
    /// Proposal mentioning the stored map
    Map,
    /// The script asks for the idle timer to be armed
    StartTimer,
    /// The script asks for the idle timer to be cancelled
    StopTimer,
}

impl CheckpointKind {
    /// The name the script uses for this checkpoint
    pub fn name(&self) -> &'static str {
        match self {
            CheckpointKind::Start => "start",
            CheckpointKind::Create => "create",
            CheckpointKind::CreateEnd => "create_end",
            CheckpointKind::Use => "use",
            CheckpointKind::UseEnd => "use_end",
            CheckpointKind::Map => "map",
            CheckpointKind::StartTimer => "start_timer",
            CheckpointKind::StopTimer => "stop_timer",
        }
    }

    /// Resolve a script-side name; `None` for names the menu does not know
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(CheckpointKind::Start),
            "create" => Some(CheckpointKind::Create),
            "create_end" => Some(CheckpointKind::CreateEnd),
            "use" => Some(CheckpointKind::Use),
            "use_end" => Some(CheckpointKind::UseEnd),
            "map" => Some(CheckpointKind::Map),
            "start_timer" => Some(CheckpointKind::StartTimer),
            "stop_timer" => Some(CheckpointKind::StopTimer),
            _ => None,
        }
    }
}

impl fmt::Display for CheckpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque handle to a named point in the dialogue script
///
/// Obtained from the engine when the script is loaded and immutable from
/// then on. The token is engine-assigned and only meaningful to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    name: Arc<str>,
    token: u64,
}

impl Checkpoint {
    pub fn new(name: impl Into<Arc<str>>, token: u64) -> Self {
        Self {
            name: name.into(),
            token,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

/// Immutable mapping from checkpoint kind to engine handle for one session
#[derive(Debug, Default)]
pub struct BookmarkRegistry {
    checkpoints: HashMap<CheckpointKind, Checkpoint>,
}

impl BookmarkRegistry {
    /// Load the registry from the engine; a single synchronous call
    ///
    /// An empty or partial script is not an error here: lookups for the
    /// missing checkpoints fail later and callers fall back.
    pub fn load(engine: &dyn ConversationEngine, script: &ScriptResource) -> Self {
        let loaded = engine.load_script(script);
        debug!(script = script.name(), count = loaded.len(), "script loaded");
        Self::from_names(loaded)
    }

    /// Build the registry from already-resolved checkpoints
    pub fn from_names(loaded: HashMap<String, Checkpoint>) -> Self {
        let mut checkpoints = HashMap::new();
        for (name, checkpoint) in loaded {
            match CheckpointKind::from_name(&name) {
                Some(kind) => {
                    checkpoints.insert(kind, checkpoint);
                }
                None => {
                    debug!(%name, "script defines a checkpoint the menu does not use");
                }
            }
        }
        Self { checkpoints }
    }

    pub fn get(&self, kind: CheckpointKind) -> Option<&Checkpoint> {
        self.checkpoints.get(&kind)
    }

    pub fn contains(&self, kind: CheckpointKind) -> bool {
        self.checkpoints.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
