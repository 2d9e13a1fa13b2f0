// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::Editor)
    clippy::module_name_repetitions
)]

//! # mpad
//!
//! A small modal text editor for the terminal.
//!
//! mpad edits one file at a time with:
//! - vi-style Normal, Insert and Command modes
//! - Soft wrapping of long lines, with tabs expanded to a stop of 4
//! - Incremental C highlighting that survives multi-line comments
//!
//! ## Architecture
//!
//! mpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`editor`]: Lines, the buffer and editing operations
//! - [`highlight`]: Incremental syntax highlighting
//! - [`ui`]: Screen mapping, scrolling and drawing
//! - [`app`]: Modes, commands and the main loop
//! - [`config`]: Saved default flags

pub mod app;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Buffer, Editor};
    pub use crate::ui::viewport::Viewport;
}
