use std::rc::Rc;

use miette::Result;

use crate::{Facade, Notification};

/// Stateless handler executed by the [`Controller`](crate::Controller)
/// whenever a notification it is bound to is sent.
///
/// A fresh instance is created from its factory for every execution.
pub trait Command<B> {
    fn execute(&self, facade: &Facade<B>, notification: &Notification<B>) -> Result<()>;
}

/// Creates a new command instance for each execution.
pub type CommandFactory<B> = Rc<dyn Fn() -> Box<dyn Command<B>>>;

/// A command that runs an ordered list of sub-commands.
///
/// Every sub-command is instantiated and executed in insertion order with the
/// same notification. The first failing sub-command stops the rest.
pub struct MacroCommand<B> {
    sub_commands: Vec<CommandFactory<B>>,
}

impl<B: 'static> MacroCommand<B> {
    pub fn new() -> Self {
        Self {
            sub_commands: Vec::new(),
        }
    }

    /// Builder-style variant of [`Self::add_sub_command`].
    pub fn with_sub_command<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Command<B>> + 'static,
    {
        self.add_sub_command(factory);
        self
    }

    pub fn add_sub_command<F>(&mut self, factory: F)
    where
        F: Fn() -> Box<dyn Command<B>> + 'static,
    {
        self.sub_commands.push(Rc::new(factory));
    }

    pub fn len(&self) -> usize {
        self.sub_commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sub_commands.is_empty()
    }
}

impl<B: 'static> Default for MacroCommand<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: 'static> Command<B> for MacroCommand<B> {
    fn execute(&self, facade: &Facade<B>, notification: &Notification<B>) -> Result<()> {
        for factory in self.sub_commands.iter() {
            let sub_command = factory();
            sub_command.execute(facade, notification)?;
        }

        Ok(())
    }
}
