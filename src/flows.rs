//! Follow-up flow collaborators
//!
//! Once a choice is made the menu hands off to one of two flows; launching
//! them and terminating the application are external glue.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two flows the menu can hand off to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Drive around and build a new map
    Mapping,
    /// Localize the robot in the stored map
    Localization,
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowKind::Mapping => write!(f, "mapping"),
            FlowKind::Localization => write!(f, "localization"),
        }
    }
}

/// Launches the follow-up flows and terminates the application
pub trait FlowLauncher: Send + Sync {
    fn start_mapping(&self);

    fn start_localization(&self);

    /// Tear down the whole application context (the menu's close action)
    fn terminate(&self);
}
