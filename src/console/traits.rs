use std::fmt::Display;
use std::path::PathBuf;

use miette::Result;

/// Base trait of every terminal backend.
///
/// Backends are shared between the command being run and the mediators that
/// print into them, so all methods take `&self`.
pub trait TerminalBackend {
    /// Initialize the terminal backend.
    fn setup(&self) -> Result<()>;

    /// Clean up the terminal backend.
    fn destroy(&self) -> Result<()>;
}

/// Allows backends to print out content and newlines.
pub trait LogBackend {
    /// Print a new empty line into the log.
    fn log_newline(&self);

    /// Print a string into the log, followed by a new line.
    fn log_println<D: Display>(&self, content: D);
}

/// Allows saving `LogBackend`'s log output to file (in addition to the terminal).
pub trait LogToFileBackend {
    fn enable_saving_logs_to_file(&self, log_file_path: PathBuf) -> Result<()>;

    fn disable_saving_logs_to_file(&self) -> Result<()>;
}
