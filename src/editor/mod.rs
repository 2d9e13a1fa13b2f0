//! Text storage and editing.
//!
//! A [`Buffer`] owns an ordered list of [`Line`]s, each holding raw bytes
//! and a cached highlight classification. [`Editor`] pairs a buffer with a
//! cursor and a dirty flag and keeps highlighting current after each edit.

mod buffer;
mod error;
mod line;
mod state;

pub use buffer::{Buffer, Cursor, Direction};
pub use error::DumpError;
pub use line::{DEFAULT_LINE_CAPACITY, Line};
pub use state::Editor;
