use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigurationError {
    #[error("Failed to load configuration file \"{file_path}\".")]
    FileLoadError {
        file_path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error(
        "Failed to parse configuration file \
        \"{file_path}\" as TOML: {error}."
    )]
    FileFormatError {
        file_path: PathBuf,
        error: Box<toml::de::Error>,
    },

    #[error("Invalid value for \"{key}\": {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
