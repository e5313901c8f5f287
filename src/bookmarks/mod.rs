//! Checkpoint handles and the per-session bookmark registry

mod registry;

pub use registry::{BookmarkRegistry, Checkpoint, CheckpointKind};
