use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while writing a buffer out.
///
/// Neither variant is fatal: the buffer is left untouched and the caller
/// reports the error to the user.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The destination could not be opened or created.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination accepted only part of the content.
    #[error("short write: {0}")]
    ShortWrite(#[source] io::Error),
}
