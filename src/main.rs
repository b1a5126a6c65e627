use std::path::PathBuf;
use std::process::exit;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use conduit_configuration::Configuration;
use crossterm::style::Stylize;
use miette::{miette, Context, Result};

use crate::commands::RunOptions;
use crate::console::{BareTerminalBackend, LogBackend, LogToFileBackend, TerminalBackend};
use crate::globals::VERBOSE;

mod commands;
mod console;
mod counter;
mod globals;
mod logging;

pub const CONDUIT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Subcommand)]
enum CLICommand {
    #[command(
        name = "run",
        about = "Wire up the counter application, send it a few notifications and shut it down."
    )]
    Run(RunArgs),

    #[command(
        name = "show-config",
        about = "Loads, validates and prints the current configuration."
    )]
    ShowConfig,
}

#[derive(Args)]
struct RunArgs {
    #[arg(
        long = "increments",
        default_value_t = 3,
        help = "How many increment notifications to send."
    )]
    increments: u32,

    #[arg(
        long = "step",
        allow_negative_numbers = true,
        help = "Step to send with each increment. \
                Without this option, the configured default step is used."
    )]
    step: Option<i64>,

    #[arg(
        long = "reset",
        help = "Send a reset notification after all the increments."
    )]
    reset: bool,

    #[arg(
        long = "log-to-file",
        help = "Path to the log file. If this is unset, \
                the configured default_log_output_path is used (if any)."
    )]
    log_to_file: Option<PathBuf>,
}

#[derive(Parser)]
#[command(
    name = "conduit",
    about = "A mediator/observer notification framework with a small counter demo.",
    version
)]
struct CLIArgs {
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        help = "Optionally a path to your configuration file. Without this option, \
                conduit tries to load ./data/configuration.toml (relative to the binary)."
    )]
    config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        help = "Increase the verbosity of output."
    )]
    verbose: bool,

    #[command(subcommand)]
    command: CLICommand,
}

/// Load and return the configuration, given the command line arguments
/// (`-c`/`--config` can override the load path).
fn get_configuration(args: &CLIArgs) -> Result<Configuration> {
    match &args.config {
        Some(configuration_file_path) => Configuration::load_from_path(configuration_file_path),
        None => Configuration::load_default_path(),
    }
}

/// Initializes the terminal backend and executes the given CLI command.
fn run_requested_cli_command(args: CLIArgs, configuration: &Configuration) -> Result<()> {
    let terminal = Rc::new(BareTerminalBackend::new());

    match args.command {
        CLICommand::Run(run_args) => {
            if let Some(log_file_path) = run_args
                .log_to_file
                .or_else(|| configuration.logging.default_log_output_path.clone())
            {
                terminal
                    .enable_saving_logs_to_file(log_file_path)
                    .wrap_err_with(|| miette!("Failed to enable logging to disk."))?;
            }

            terminal
                .setup()
                .wrap_err_with(|| miette!("Failed to set up terminal backend."))?;


            let options = RunOptions {
                increments: run_args.increments,
                step: run_args.step,
                reset: run_args.reset,
            };

            let result = commands::cmd_run(configuration, &terminal, &options)
                .wrap_err_with(|| miette!("Failed to execute run command to completion."));
            if let Err(error) = &result {
                terminal.log_println(format!("{error:?}").dark_red());
            }


            terminal
                .destroy()
                .wrap_err_with(|| miette!("Failed to destroy terminal backend."))?;

            match result {
                Ok(_) => Ok(()),
                Err(_) => Err(miette!("The run command did not complete.")),
            }
        }
        CLICommand::ShowConfig => {
            terminal
                .setup()
                .wrap_err_with(|| miette!("Failed to set up terminal backend."))?;

            commands::cmd_show_config(configuration, terminal.as_ref());

            terminal
                .destroy()
                .wrap_err_with(|| miette!("Failed to destroy terminal backend."))
        }
    }
}

/// Entry function for `conduit`.
///
/// Parses CLI arguments, loads the configuration file and starts executing the requested command.
fn main() -> Result<()> {
    let args = CLIArgs::parse();
    VERBOSE.set(args.verbose);

    let configuration = get_configuration(&args)
        .wrap_err_with(|| miette!("Could not load configuration."))?;

    logging::initialize_tracing(&configuration.logging, args.verbose)?;
    tracing::debug!(
        path = %configuration.configuration_file_path.display(),
        "configuration loaded"
    );

    match run_requested_cli_command(args, &configuration) {
        Ok(_) => exit(0),
        Err(error) => {
            eprintln!("{:?}", error);
            exit(1);
        }
    }
}
