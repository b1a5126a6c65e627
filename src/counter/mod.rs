//! A small counter application wired through a [`Facade`].
//!
//! - `CounterProxy` (model) holds the value and announces every change,
//! - `ConsoleMediator` (view) prints changes into a terminal backend,
//! - the commands (controller) translate requests into proxy calls.

use std::rc::Rc;

use conduit_configuration::counter::CounterConfiguration;
use conduit_core::{Facade, MacroCommand};
use serde::Serialize;

pub use self::commands::*;
pub use self::mediator::*;
pub use self::proxy::*;
use crate::console::LogBackend;

mod commands;
mod mediator;
mod proxy;

/*
 * Notification names
 */
pub const STARTUP: &str = "startup";
pub const SHUTDOWN: &str = "shutdown";
pub const INCREMENT: &str = "increment";
pub const RESET: &str = "reset";
pub const COUNTER_CHANGED: &str = "counter_changed";

/*
 * Notification types (attached to `COUNTER_CHANGED`)
 */
pub const CHANGE_TYPE_INCREMENT: &str = "increment";
pub const CHANGE_TYPE_RESET: &str = "reset";


/// Body of every notification sent in the counter application.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CounterBody {
    /// Requested change (body of `INCREMENT`).
    Step { step: i64 },

    /// Announced change (body of `COUNTER_CHANGED`).
    Changed { previous: i64, current: i64 },
}

pub type CounterFacade = Facade<CounterBody>;


/// Create a facade with the counter commands registered.
///
/// Nothing else is registered until `STARTUP` is sent: the startup macro command
/// registers the proxy and attaches the console mediator to `terminal`.
pub fn build_counter_facade<L>(
    configuration: &CounterConfiguration,
    terminal: Rc<L>,
) -> Rc<CounterFacade>
where
    L: LogBackend + 'static,
{
    let facade: Rc<CounterFacade> = Facade::new();

    let initial_value = configuration.initial_value;
    facade.register_command(STARTUP, move || {
        let terminal = terminal.clone();

        Box::new(
            MacroCommand::new()
                .with_sub_command(move || Box::new(PrepareModelCommand { initial_value }))
                .with_sub_command(move || {
                    Box::new(PrepareViewCommand {
                        terminal: terminal.clone(),
                    })
                }),
        )
    });

    let default_step = configuration.default_step;
    facade.register_command(INCREMENT, move || Box::new(IncrementCommand { default_step }));
    facade.register_command(RESET, || Box::new(ResetCommand));
    facade.register_command(SHUTDOWN, || Box::new(ShutdownCommand::<L>::new()));

    facade
}


#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fmt::Display;

    use super::*;

    /// Collects printed lines instead of writing them to the terminal.
    #[derive(Default)]
    struct RecordingBackend {
        lines: RefCell<Vec<String>>,
    }

    impl LogBackend for RecordingBackend {
        fn log_newline(&self) {
            self.lines.borrow_mut().push(String::new());
        }

        fn log_println<D: Display>(&self, content: D) {
            self.lines
                .borrow_mut()
                .push(strip_ansi_escapes::strip_str(&content.to_string()));
        }
    }

    fn configuration() -> CounterConfiguration {
        CounterConfiguration {
            initial_value: 10,
            default_step: 5,
        }
    }

    #[test]
    fn startup_registers_model_and_view() {
        let terminal = Rc::new(RecordingBackend::default());
        let facade = build_counter_facade(&configuration(), terminal.clone());

        assert!(!facade.has_proxy(CounterProxy::NAME));
        assert!(!facade.has_mediator(CONSOLE_MEDIATOR_NAME));

        facade.send_notification(STARTUP, None, None).unwrap();

        assert!(facade.has_proxy(CounterProxy::NAME));
        assert!(facade.has_mediator(CONSOLE_MEDIATOR_NAME));
        assert_eq!(terminal.lines.borrow().len(), 1);
    }

    #[test]
    fn increments_and_reset_are_printed_by_the_console() {
        let terminal = Rc::new(RecordingBackend::default());
        let facade = build_counter_facade(&configuration(), terminal.clone());

        facade.send_notification(STARTUP, None, None).unwrap();
        facade.send_notification(INCREMENT, None, None).unwrap();
        facade
            .send_notification(INCREMENT, Some(CounterBody::Step { step: -3 }), None)
            .unwrap();
        facade.send_notification(RESET, None, None).unwrap();

        let counter = facade
            .retrieve_proxy_as::<CounterProxy>(CounterProxy::NAME)
            .unwrap()
            .unwrap();
        assert_eq!(counter.value(), 10);

        let lines = terminal.lines.borrow();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("10 -> 15"));
        assert!(lines[2].contains("15 -> 12"));
        assert!(lines[3].contains("12 -> 10"));
    }

    #[test]
    fn shutdown_detaches_the_console_and_removes_the_model() {
        let terminal = Rc::new(RecordingBackend::default());
        let facade = build_counter_facade(&configuration(), terminal.clone());

        facade.send_notification(STARTUP, None, None).unwrap();
        assert_eq!(Rc::strong_count(&terminal), 3);

        facade.send_notification(SHUTDOWN, None, None).unwrap();

        assert!(!facade.has_mediator(CONSOLE_MEDIATOR_NAME));
        assert!(!facade.has_proxy(CounterProxy::NAME));

        // Only the startup command factory still holds the terminal.
        assert_eq!(Rc::strong_count(&terminal), 2);

        let printed_lines = terminal.lines.borrow().len();
        facade.send_notification(INCREMENT, None, None).unwrap_err();
        assert_eq!(terminal.lines.borrow().len(), printed_lines);
    }
}
