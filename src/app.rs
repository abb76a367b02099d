//! Application module: exposes the view model drawn by the TUI.
//!
//! `App` is the controller's `Surface`: it keeps whatever the controller last
//! showed, plus terminal-only state such as the list cursor and the path
//! prompt.

mod model;

pub use model::*;
