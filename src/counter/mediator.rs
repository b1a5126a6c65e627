use std::rc::Rc;

use conduit_core::{Mediator, MediatorComponent, Notification};
use crossterm::style::Stylize;
use miette::{miette, Context, IntoDiagnostic, Result};

use super::{CounterBody, COUNTER_CHANGED};
use crate::console::LogBackend;
use crate::globals::is_verbose_enabled;

pub const CONSOLE_MEDIATOR_NAME: &str = "console";

/// Prints counter changes into a terminal backend (its view component).
pub struct ConsoleMediator<L> {
    component: MediatorComponent<Rc<L>>,
}

impl<L: LogBackend> ConsoleMediator<L> {
    pub fn new(terminal: Rc<L>) -> Self {
        Self {
            component: MediatorComponent::new(CONSOLE_MEDIATOR_NAME, Some(terminal)),
        }
    }

    /// Detach the terminal, returning it if one was attached.
    pub fn detach_terminal(&self) -> Option<Rc<L>> {
        self.component.take_view_component()
    }

    fn print_change(
        &self,
        terminal: &L,
        notification: &Notification<CounterBody>,
    ) -> Result<()> {
        let Some(body @ CounterBody::Changed { previous, current }) = notification.body()
        else {
            return Err(miette!(
                "{} notification without a change body.",
                notification.name()
            ));
        };

        let change_type = notification.notification_type().unwrap_or("change");

        terminal.log_println(format!(
            "{} {} -> {} {}",
            "counter".cyan().bold(),
            previous,
            current.to_string().bold(),
            format!("({})", change_type).dark_grey(),
        ));

        if is_verbose_enabled() {
            let body_json = serde_json::to_string(body)
                .into_diagnostic()
                .wrap_err_with(|| miette!("Could not serialize notification body."))?;

            terminal.log_println(format!("  body: {}", body_json).dark_grey());
        }

        Ok(())
    }
}

impl<L: LogBackend> Mediator<CounterBody> for ConsoleMediator<L> {
    fn mediator_name(&self) -> &str {
        self.component.mediator_name()
    }

    fn list_notification_interests(&self) -> Vec<String> {
        vec![COUNTER_CHANGED.to_string()]
    }

    fn handle_notification(&self, notification: &Notification<CounterBody>) -> Result<()> {
        match self
            .component
            .with_view_component(|terminal| self.print_change(terminal, notification))
        {
            Some(result) => result,
            None => {
                tracing::debug!(
                    notification = notification.name(),
                    "console has no terminal attached"
                );
                Ok(())
            }
        }
    }

    fn on_register(&self) -> Result<()> {
        self.component.with_view_component(|terminal| {
            terminal.log_println("Console attached.".green());
        });

        Ok(())
    }

    fn on_remove(&self) -> Result<()> {
        self.component.with_view_component(|terminal| {
            terminal.log_println("Console detached.".yellow());
        });

        Ok(())
    }
}
