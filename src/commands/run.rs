use std::rc::Rc;

use conduit_configuration::Configuration;
use crossterm::style::Stylize;
use miette::{miette, Context, Result};

use crate::console::LogBackend;
use crate::counter::{
    build_counter_facade,
    CounterBody,
    CounterProxy,
    INCREMENT,
    RESET,
    SHUTDOWN,
    STARTUP,
};

/// What `run` should do with the counter once it is wired up.
pub struct RunOptions {
    pub increments: u32,
    pub step: Option<i64>,
    pub reset: bool,
}

/// Wire up the counter application, drive it and tear it down again.
///
/// Returns the final counter value (taken before shutdown removes the proxy).
pub fn cmd_run<L>(
    configuration: &Configuration,
    terminal: &Rc<L>,
    options: &RunOptions,
) -> Result<i64>
where
    L: LogBackend + 'static,
{
    let facade = build_counter_facade(&configuration.counter, terminal.clone());

    facade
        .send_notification(STARTUP, None, None)
        .wrap_err_with(|| miette!("Failed to start the counter application."))?;

    let counter = facade
        .retrieve_proxy_as::<CounterProxy>(CounterProxy::NAME)?
        .ok_or_else(|| miette!("Startup did not register the counter proxy."))?;

    terminal.log_println(format!(
        "Counter starts at {}.",
        counter.value().to_string().bold()
    ));

    for _ in 0..options.increments {
        let body = options.step.map(|step| CounterBody::Step { step });

        facade
            .send_notification(INCREMENT, body, None)
            .wrap_err_with(|| miette!("Failed to increment the counter."))?;
    }

    if options.reset {
        facade
            .send_notification(RESET, None, None)
            .wrap_err_with(|| miette!("Failed to reset the counter."))?;
    }

    let final_value = counter.value();

    facade
        .send_notification(SHUTDOWN, None, None)
        .wrap_err_with(|| miette!("Failed to shut the counter application down."))?;

    terminal.log_println(format!(
        "Final value: {}",
        final_value.to_string().bold().green()
    ));

    Ok(final_value)
}


#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fmt::Display;
    use std::path::PathBuf;

    use conduit_configuration::counter::CounterConfiguration;
    use conduit_configuration::logging::LoggingConfiguration;

    use super::*;

    #[derive(Default)]
    struct RecordingBackend {
        lines: RefCell<Vec<String>>,
    }

    impl LogBackend for RecordingBackend {
        fn log_newline(&self) {
            self.lines.borrow_mut().push(String::new());
        }

        fn log_println<D: Display>(&self, content: D) {
            self.lines.borrow_mut().push(content.to_string());
        }
    }

    fn configuration(initial_value: i64, default_step: i64) -> Configuration {
        Configuration {
            logging: LoggingConfiguration {
                level: "info".to_string(),
                default_log_output_path: None,
            },
            counter: CounterConfiguration {
                initial_value,
                default_step,
            },
            configuration_file_path: PathBuf::from("test.toml"),
        }
    }

    #[test]
    fn default_step_is_used_without_an_explicit_one() {
        let terminal = Rc::new(RecordingBackend::default());
        let options = RunOptions {
            increments: 3,
            step: None,
            reset: false,
        };

        let final_value = cmd_run(&configuration(1, 2), &terminal, &options).unwrap();
        assert_eq!(final_value, 7);

        let lines = terminal.lines.borrow();
        assert!(lines.iter().any(|line| line.contains("Console detached.")));
    }

    #[test]
    fn explicit_step_and_reset() {
        let terminal = Rc::new(RecordingBackend::default());
        let options = RunOptions {
            increments: 2,
            step: Some(-4),
            reset: true,
        };

        let final_value = cmd_run(&configuration(5, 1), &terminal, &options).unwrap();
        assert_eq!(final_value, 5);
    }

    #[test]
    fn overflow_is_reported() {
        let terminal = Rc::new(RecordingBackend::default());
        let options = RunOptions {
            increments: 1,
            step: Some(1),
            reset: false,
        };

        assert!(cmd_run(&configuration(i64::MAX, 1), &terminal, &options).is_err());
    }
}
