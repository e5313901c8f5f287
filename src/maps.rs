//! Map presence predicate

/// Injected capability answering whether a stored map already exists
///
/// Decides which proposal the menu opens with and whether the "use the
/// existing map" branch is offered at all.
pub trait MapStore: Send + Sync {
    fn map_exists(&self) -> bool;
}
