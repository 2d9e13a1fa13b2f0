//! Colon-command parsing.

use std::path::PathBuf;

use thiserror::Error;

/// A command entered on the `:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:q` / `:quit`, refused while the buffer is dirty.
    Quit,
    /// `:q!`
    ForceQuit,
    /// `:w` or `:w <path>`. A path rebinds the buffer's file name.
    Write(Option<PathBuf>),
    /// `:wq`, quits only if the write succeeds.
    WriteQuit,
    /// `:<n>`, 1-based line number.
    GoToLine(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: :w <path>")]
    MissingPath,
}

/// Parse the text typed after `:`. Blank input is not a command.
///
/// # Errors
///
/// Returns [`CommandError`] for unrecognized input or a `:w ` with no path.
pub fn parse(input: &str) -> Result<Option<Command>, CommandError> {
    let cmd = input.trim_start();
    let command = match cmd {
        "" => return Ok(None),
        "q" | "quit" => Command::Quit,
        "q!" => Command::ForceQuit,
        "w" => Command::Write(None),
        "wq" => Command::WriteQuit,
        _ => {
            if let Some(rest) = cmd.strip_prefix("w ") {
                let path = rest.trim();
                if path.is_empty() {
                    return Err(CommandError::MissingPath);
                }
                Command::Write(Some(PathBuf::from(path)))
            } else if cmd.bytes().all(|b| b.is_ascii_digit())
                && let Ok(line) = cmd.parse::<usize>()
            {
                Command::GoToLine(line)
            } else {
                return Err(CommandError::Unknown(cmd.to_string()));
            }
        }
    };
    Ok(Some(command))
}
