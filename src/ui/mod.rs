//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`screen`]: Logical position to terminal cell mapping
//! - [`viewport`]: Scroll position of the text area
//! - [`style`]: Theming and colors

pub mod screen;
pub mod style;
pub mod viewport;

mod render;
mod status;

pub use render::{line_number_width, render};
pub use status::status_text;
