use conduit_configuration::Configuration;
use crossterm::style::Stylize;

use crate::console::LogBackend;

pub fn cmd_show_config<L: LogBackend>(configuration: &Configuration, terminal: &L) {
    terminal.log_println("CONFIGURATION".bold().underlined());
    terminal.log_println(format!(
        "(using {})",
        configuration
            .configuration_file_path
            .to_string_lossy()
            .to_string()
            .yellow()
            .italic()
    ));
    terminal.log_newline();


    // Logging
    terminal.log_println("- logging -".cyan());
    terminal.log_println(format!("  level = {}", configuration.logging.level));
    terminal.log_println(format!(
        "  default_log_output_path = {}",
        match &configuration.logging.default_log_output_path {
            Some(path) => path.to_string_lossy().to_string(),
            None => "(none)".to_string(),
        }
    ));
    terminal.log_newline();


    // Counter
    terminal.log_println("- counter -".cyan());
    terminal.log_println(format!(
        "  initial_value = {}",
        configuration.counter.initial_value
    ));
    terminal.log_println(format!(
        "  default_step = {}",
        configuration.counter.default_step
    ));
    terminal.log_newline();
}
