use std::path::PathBuf;

use chrono::Local;
use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::traits::ResolvableConfiguration;
use crate::utilities::get_running_executable_directory;


#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    /// `tracing` filter directives, e.g. `info` or `conduit_core=trace,warn`.
    pub level: String,

    pub default_log_output_path: Option<PathBuf>,
}


#[derive(Deserialize, Clone)]
pub(crate) struct UnresolvedLoggingConfiguration {
    level: String,

    default_log_output_path: Option<PathBuf>,
}


impl ResolvableConfiguration for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;

    fn resolve(self) -> miette::Result<Self::Resolved> {
        let level = self.level.trim().to_string();
        if level.is_empty() {
            return Err(ConfigurationError::InvalidValue {
                key: "logging.level",
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        let default_log_output_path = self
            .default_log_output_path
            .map(|output_path| replace_path_placeholders(&output_path.to_string_lossy()))
            .transpose()?;

        Ok(LoggingConfiguration {
            level,
            default_log_output_path,
        })
    }
}

/// Replace `{SELF}` (the executable directory) and `{DATETIME}` (the current local time).
fn replace_path_placeholders(path: &str) -> miette::Result<PathBuf> {
    let mut path = path.to_string();

    if path.contains("{SELF}") {
        let executable_directory = get_running_executable_directory()?
            .to_string_lossy()
            .to_string();

        path = path.replace("{SELF}", &executable_directory);
    }

    if path.contains("{DATETIME}") {
        let formatted_time_now = Local::now().format("%Y-%m-%d_%H-%M-%S");
        path = path.replace("{DATETIME}", &formatted_time_now.to_string());
    }

    Ok(PathBuf::from(path))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_placeholder_is_expanded() {
        let path = replace_path_placeholders("logs/run_{DATETIME}.log").unwrap();
        let path = path.to_string_lossy();

        assert!(path.starts_with("logs/run_"));
        assert!(!path.contains("{DATETIME}"));
        assert!(path.ends_with(".log"));
    }

    #[test]
    fn plain_paths_are_kept() {
        let path = replace_path_placeholders("/tmp/conduit.log").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/conduit.log"));
    }

    #[test]
    fn empty_level_is_rejected() {
        let unresolved = UnresolvedLoggingConfiguration {
            level: "   ".to_string(),
            default_log_output_path: None,
        };

        assert!(unresolved.resolve().is_err());
    }
}
