//! Cancellable single-shot idle deadline

mod idle;

pub use idle::IdleTimer;
