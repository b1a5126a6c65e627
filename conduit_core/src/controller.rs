use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use miette::Result;

use crate::{
    Command,
    CommandFactory,
    Facade,
    FacadeError,
    Notification,
    NotifyContext,
    Observer,
    View,
};

/// Command registry: maps notification names to command factories.
///
/// For each registered name the controller holds exactly one observer on
/// the [`View`], bound to itself. Commands therefore run on the same bus and
/// in the same registration order as mediators.
pub struct Controller<B> {
    weak_self: Weak<Self>,

    view: Rc<View<B>>,

    /// The facade handed to every executed command.
    facade: Weak<Facade<B>>,

    command_map: RefCell<HashMap<String, CommandFactory<B>>>,
}

impl<B: 'static> Controller<B> {
    pub fn new(view: Rc<View<B>>, facade: Weak<Facade<B>>) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            weak_self: weak_self.clone(),
            view,
            facade,
            command_map: RefCell::new(HashMap::new()),
        })
    }

    /// Bind a command factory to a notification name.
    ///
    /// Registering a name again replaces the factory but does not add
    /// another observer.
    pub fn register_command<S, F>(&self, notification_name: S, factory: F)
    where
        S: Into<String>,
        F: Fn() -> Box<dyn Command<B>> + 'static,
    {
        let notification_name = notification_name.into();

        let previous = self
            .command_map
            .borrow_mut()
            .insert(notification_name.clone(), Rc::new(factory));

        if previous.is_none() {
            let observer =
                Observer::from_weak(self.weak_self.clone(), |controller, notification| {
                    controller.execute_command(notification)
                });

            self.view
                .register_observer(notification_name.as_str(), observer);
        }

        tracing::debug!(notification = %notification_name, "registered command");
    }

    /// Instantiate and execute the command bound to the notification's name.
    ///
    /// Does nothing if no command is bound to it.
    pub fn execute_command(&self, notification: &Notification<B>) -> Result<()> {
        let factory = match self.command_map.borrow().get(notification.name()) {
            Some(factory) => factory.clone(),
            None => return Ok(()),
        };

        let facade = self.facade.upgrade().ok_or(FacadeError::Unavailable)?;

        tracing::trace!(notification = notification.name(), "executing command");

        let command = factory();
        command.execute(&facade, notification)
    }

    pub fn has_command(&self, notification_name: &str) -> bool {
        self.command_map.borrow().contains_key(notification_name)
    }

    /// Unbind the command for the notification name (and stop observing it).
    pub fn remove_command(&self, notification_name: &str) {
        let removed = self
            .command_map
            .borrow_mut()
            .remove(notification_name);

        if removed.is_some() {
            self.view.remove_observer(
                notification_name,
                NotifyContext::of_weak(&self.weak_self),
            );

            tracing::debug!(notification = notification_name, "removed command");
        }
    }
}
