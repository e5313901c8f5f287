//! Navigation gate shared by voice, UI, and timer triggers
//!
//! Every attempt to move the conversation goes through one gate, so the
//! input modalities cannot desynchronize: whichever path cannot reach its
//! checkpoint falls back the same way.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::bookmarks::{BookmarkRegistry, Checkpoint, CheckpointKind};
use crate::conversation::{ConversationEngine, ReactionImportance, ReactionValidity};

struct SessionBinding {
    registry: Arc<BookmarkRegistry>,
    engine: Arc<dyn ConversationEngine>,
}

/// Attempts checkpoint jumps against the current session, if any
///
/// The binding is installed at focus gain and cleared at focus loss; the
/// idle timer's worker context navigates through the same gate as the
/// dispatch context.
pub struct NavigationGate {
    session: RwLock<Option<SessionBinding>>,
}

impl NavigationGate {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    /// Bind the session's registry and engine at focus gain
    pub fn install(&self, registry: Arc<BookmarkRegistry>, engine: Arc<dyn ConversationEngine>) {
        if let Ok(mut session) = self.session.write() {
            *session = Some(SessionBinding { registry, engine });
        }
    }

    /// Drop the session binding at focus loss; idempotent
    pub fn clear(&self) {
        if let Ok(mut session) = self.session.write() {
            session.take();
        }
    }

    /// Try to move the conversation to `kind`
    ///
    /// Returns `false` with no side effect when no session is bound or the
    /// script does not define the checkpoint; this is the designed fallback
    /// path, not an error. On success the jump request is issued
    /// fire-and-forget with High importance and Immediate validity, without
    /// waiting for the engine to confirm arrival.
    pub fn try_go_to(&self, kind: CheckpointKind) -> bool {
        let bound: Option<(Checkpoint, Arc<dyn ConversationEngine>)> = match self.session.read() {
            Ok(session) => session.as_ref().and_then(|binding| {
                binding
                    .registry
                    .get(kind)
                    .cloned()
                    .map(|checkpoint| (checkpoint, Arc::clone(&binding.engine)))
            }),
            Err(_) => None,
        };

        let Some((checkpoint, engine)) = bound else {
            debug!(checkpoint = %kind, "navigation skipped, no session or checkpoint");
            return false;
        };

        engine.go_to_checkpoint(
            &checkpoint,
            ReactionImportance::High,
            ReactionValidity::Immediate,
        );
        debug!(checkpoint = %kind, "checkpoint jump issued");
        true
    }
}

impl Default for NavigationGate {
    fn default() -> Self {
        Self::new()
    }
}
