//! Session controller for one focus-acquisition window

mod controller;

pub use controller::{FocusContext, MenuInput, MenuState, SessionController, UiAction};
