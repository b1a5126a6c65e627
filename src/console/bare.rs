use std::cell::RefCell;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use miette::{miette, Context, IntoDiagnostic, Result};

use super::log_file::{initialize_log_file_for_log_output, LogFileWriter};
use super::{LogBackend, LogToFileBackend, TerminalBackend};

/// A bare-bones backend that linearly prints all activity to the console
/// (and optionally mirrors it, without colours, into a log file).
pub struct BareTerminalBackend {
    log_file_output: RefCell<Option<LogFileWriter>>,
}

impl BareTerminalBackend {
    pub fn new() -> Self {
        Self {
            log_file_output: RefCell::new(None),
        }
    }

    fn write_to_log_file(&self, content: &str) {
        let mut log_file_output = self.log_file_output.borrow_mut();

        let Some(writer) = log_file_output.as_mut() else {
            return;
        };

        if let Err(error) = writeln!(writer, "{}", content) {
            tracing::warn!(error = %error, "could not write to log file, disabling it");
            *log_file_output = None;
        }
    }
}

impl Default for BareTerminalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalBackend for BareTerminalBackend {
    fn setup(&self) -> Result<()> {
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        // If logging to file was enabled, we should disable it before this backend is dropped,
        // otherwise we risk failing to flush to file.
        self.disable_saving_logs_to_file()
    }
}

impl LogBackend for BareTerminalBackend {
    fn log_newline(&self) {
        println!();
        self.write_to_log_file("");
    }

    fn log_println<D: Display>(&self, content: D) {
        let content_string = content.to_string();

        println!("{}", content_string);
        self.write_to_log_file(&content_string);
    }
}

impl LogToFileBackend for BareTerminalBackend {
    fn enable_saving_logs_to_file(&self, log_file_path: PathBuf) -> Result<()> {
        let writer = initialize_log_file_for_log_output(&log_file_path)?;

        tracing::debug!(path = %log_file_path.display(), "saving logs to file");
        self.log_file_output.replace(Some(writer));

        Ok(())
    }

    fn disable_saving_logs_to_file(&self) -> Result<()> {
        if let Some(mut writer) = self.log_file_output.take() {
            writer
                .flush()
                .into_diagnostic()
                .wrap_err_with(|| miette!("Could not flush log file."))?;
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::style::Stylize;

    use super::*;

    #[test]
    fn log_file_receives_lines_without_colours() {
        let directory = tempfile::tempdir().unwrap();
        let log_path = directory.path().join("bare.log");

        let terminal = BareTerminalBackend::new();
        terminal.setup().unwrap();
        terminal
            .enable_saving_logs_to_file(log_path.clone())
            .unwrap();

        terminal.log_println("plain line");
        terminal.log_println("red line".red());
        terminal.destroy().unwrap();

        let contents = fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("plain line\n"));
        assert!(contents.contains("red line\n"));
        assert!(!contents.contains('\u{1b}'));
    }
}
