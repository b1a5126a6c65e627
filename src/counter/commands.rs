use std::marker::PhantomData;
use std::rc::Rc;

use conduit_core::{Command, Notification};
use miette::{miette, Result};

use super::{
    ConsoleMediator,
    CounterBody,
    CounterFacade,
    CounterProxy,
    CONSOLE_MEDIATOR_NAME,
};
use crate::console::LogBackend;

fn retrieve_counter(facade: &CounterFacade) -> Result<Rc<CounterProxy>> {
    facade
        .retrieve_proxy_as::<CounterProxy>(CounterProxy::NAME)?
        .ok_or_else(|| miette!("The counter proxy is not registered (was startup sent?)."))
}


/// Registers the counter proxy.
pub struct PrepareModelCommand {
    pub initial_value: i64,
}

impl Command<CounterBody> for PrepareModelCommand {
    fn execute(&self, facade: &CounterFacade, _: &Notification<CounterBody>) -> Result<()> {
        facade.register_proxy(Rc::new(CounterProxy::new(
            self.initial_value,
            facade.notifier(),
        )))
    }
}


/// Registers the console mediator with the given terminal as its view component.
pub struct PrepareViewCommand<L> {
    pub terminal: Rc<L>,
}

impl<L: LogBackend + 'static> Command<CounterBody> for PrepareViewCommand<L> {
    fn execute(&self, facade: &CounterFacade, _: &Notification<CounterBody>) -> Result<()> {
        facade.register_mediator(Rc::new(ConsoleMediator::new(self.terminal.clone())))
    }
}


/// Adds the requested step (or the configured default one) to the counter.
pub struct IncrementCommand {
    pub default_step: i64,
}

impl Command<CounterBody> for IncrementCommand {
    fn execute(
        &self,
        facade: &CounterFacade,
        notification: &Notification<CounterBody>,
    ) -> Result<()> {
        let step = match notification.body() {
            Some(CounterBody::Step { step }) => *step,
            Some(other) => {
                return Err(miette!("Unexpected increment body: {:?}", other));
            }
            None => self.default_step,
        };

        retrieve_counter(facade)?.add(step)
    }
}


pub struct ResetCommand;

impl Command<CounterBody> for ResetCommand {
    fn execute(&self, facade: &CounterFacade, _: &Notification<CounterBody>) -> Result<()> {
        retrieve_counter(facade)?.reset()
    }
}


/// Removes the console mediator (detaching its terminal) and the counter proxy.
pub struct ShutdownCommand<L> {
    _terminal: PhantomData<L>,
}

impl<L> ShutdownCommand<L> {
    pub fn new() -> Self {
        Self {
            _terminal: PhantomData,
        }
    }
}

impl<L> Default for ShutdownCommand<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LogBackend + 'static> Command<CounterBody> for ShutdownCommand<L> {
    fn execute(&self, facade: &CounterFacade, _: &Notification<CounterBody>) -> Result<()> {
        let console = facade.retrieve_mediator_as::<ConsoleMediator<L>>(CONSOLE_MEDIATOR_NAME)?;

        facade.remove_mediator(CONSOLE_MEDIATOR_NAME)?;
        if let Some(console) = console {
            console.detach_terminal();
        }

        facade.remove_proxy(CounterProxy::NAME)?;

        Ok(())
    }
}
