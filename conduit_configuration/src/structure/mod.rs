//! Module containing the entire configuration structure for
//! the `conduit` demo application.

pub mod counter;
pub mod logging;

use std::fs;
use std::path::{Path, PathBuf};

use miette::{miette, Context, Result};
use serde::Deserialize;

use crate::counter::{CounterConfiguration, UnresolvedCounterConfiguration};
use crate::error::ConfigurationError;
use crate::logging::{LoggingConfiguration, UnresolvedLoggingConfiguration};
use crate::traits::{ResolvableConfiguration, ResolvableWithContextConfiguration};
use crate::utilities::get_default_configuration_file_path;

/// This struct contains the entire `conduit` configuration.
#[derive(Clone, Debug)]
pub struct Configuration {
    pub logging: LoggingConfiguration,

    pub counter: CounterConfiguration,

    pub configuration_file_path: PathBuf,
}

#[derive(Deserialize, Clone)]
struct UnresolvedConfiguration {
    logging: UnresolvedLoggingConfiguration,

    counter: UnresolvedCounterConfiguration,
}

impl Configuration {
    pub fn load_from_path<P: AsRef<Path>>(configuration_file_path: P) -> Result<Configuration> {
        let configuration_file_path = configuration_file_path.as_ref();

        let configuration_string = fs::read_to_string(configuration_file_path).map_err(|error| {
            ConfigurationError::FileLoadError {
                file_path: configuration_file_path.to_path_buf(),
                error,
            }
        })?;

        let configuration_file_path = dunce::canonicalize(configuration_file_path)
            .map_err(|error| ConfigurationError::FileLoadError {
                file_path: configuration_file_path.to_path_buf(),
                error,
            })?;

        Configuration::load_from_str(&configuration_string, configuration_file_path)
    }

    /// Parse and resolve configuration contents that were read from `configuration_file_path`.
    pub fn load_from_str(
        configuration_string: &str,
        configuration_file_path: PathBuf,
    ) -> Result<Configuration> {
        let unresolved_configuration: UnresolvedConfiguration =
            toml::from_str(configuration_string).map_err(|error| {
                ConfigurationError::FileFormatError {
                    file_path: configuration_file_path.clone(),
                    error: Box::new(error),
                }
            })?;

        unresolved_configuration
            .resolve(configuration_file_path)
            .wrap_err_with(|| miette!("Invalid configuration."))
    }

    pub fn load_default_path() -> Result<Configuration> {
        Configuration::load_from_path(get_default_configuration_file_path().wrap_err_with(
            || miette!("Could not get default configuration file path."),
        )?)
    }
}

impl ResolvableWithContextConfiguration for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = PathBuf;

    fn resolve(self, configuration_file_path: PathBuf) -> Result<Self::Resolved> {
        let logging = self.logging.resolve()?;
        let counter = self.counter.resolve()?;

        Ok(Configuration {
            logging,
            counter,
            configuration_file_path,
        })
    }
}
