use std::env::args;
use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};

/// Inspect the first command line argument to find out the directory the program resides in.
///
/// If the executable lives in cargo's `./target/debug` directory and the grandparent directory
/// contains `Cargo.toml`, the grandparent (project) directory is returned instead.
///
///  <project directory>
///  |-- target
///  |   |-- debug
///  |       |- conduit(.exe)
///  |- Cargo.toml
///  |- ...
pub fn get_running_executable_directory() -> Result<PathBuf> {
    let current_args = args()
        .next()
        .ok_or_else(|| miette!("Could not get first commandline argument!"))?;

    let executable_directory = dunce::canonicalize(current_args)
        .into_diagnostic()
        .wrap_err_with(|| {
            miette!("Could not canonicalize running executable path.")
        })?
        .parent()
        .ok_or_else(|| miette!("Could not get executable's directory."))?
        .to_path_buf();

    let is_in_debug_directory = executable_directory
        .file_name()
        .is_some_and(|name| name == "debug");

    if is_in_debug_directory {
        let target_directory = executable_directory
            .parent()
            .ok_or_else(|| miette!("Could not get the parent directory."))?;

        let is_in_target_directory = target_directory
            .file_name()
            .is_some_and(|name| name == "target");

        if is_in_target_directory {
            let project_directory = target_directory.parent().ok_or_else(|| {
                miette!("Could not get grandparent directory.")
            })?;

            if Path::new(project_directory).join("Cargo.toml").exists() {
                return Ok(project_directory.to_path_buf());
            }
        }
    }

    Ok(executable_directory)
}

/// Returns the default configuration filepath: `./data/configuration.toml`, relative to
/// the executable directory (see [`get_running_executable_directory`]).
pub fn get_default_configuration_file_path() -> Result<PathBuf> {
    let configuration_filepath = get_running_executable_directory()
        .wrap_err_with(|| miette!("Could not get the executable directory."))?
        .join("data")
        .join("configuration.toml");

    if !configuration_filepath.is_file() {
        return Err(miette!(
            "Could not find configuration.toml in data directory: {:?}",
            configuration_filepath
        ));
    }

    dunce::canonicalize(configuration_filepath)
        .into_diagnostic()
        .wrap_err_with(|| {
            miette!("Could not canonicalize the configuration.toml file path.")
        })
}
