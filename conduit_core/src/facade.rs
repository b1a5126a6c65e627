use std::rc::{Rc, Weak};

use miette::Result;

use crate::{
    Command,
    Controller,
    Mediator,
    Model,
    Notification,
    Notifier,
    Proxy,
    RegistryError,
    View,
};

/// Single entry point to the [`Model`], [`View`] and [`Controller`] of one
/// application.
///
/// Whoever wires the application owns the returned `Rc`; dropping it tears
/// down all three registries. Collaborators that need to send notifications
/// get a weak [`Notifier`] from [`Facade::notifier`].
pub struct Facade<B> {
    weak_self: Weak<Self>,

    model: Model,

    view: Rc<View<B>>,

    controller: Rc<Controller<B>>,
}

impl<B: 'static> Facade<B> {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|weak_self| {
            let view = Rc::new(View::new());
            let controller = Controller::new(view.clone(), weak_self.clone());

            Self {
                weak_self: weak_self.clone(),
                model: Model::new(),
                view,
                controller,
            }
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn view(&self) -> &View<B> {
        &self.view
    }

    pub fn controller(&self) -> &Controller<B> {
        &self.controller
    }

    /// A weak handle for sending notifications through this facade.
    pub fn notifier(&self) -> Notifier<B> {
        Notifier::new(self.weak_self.clone())
    }

    /*
     * Notifications
     */

    /// Build a notification and dispatch it to every interested observer
    /// (mediators and commands alike).
    pub fn send_notification<S: Into<String>>(
        &self,
        notification_name: S,
        body: Option<B>,
        notification_type: Option<&str>,
    ) -> Result<()> {
        let notification = Notification::with_parts(
            notification_name,
            body,
            notification_type.map(str::to_string),
        );

        self.notify_observers(&notification)
    }

    pub fn notify_observers(&self, notification: &Notification<B>) -> Result<()> {
        self.view.notify_observers(notification)
    }

    /*
     * Proxies
     */

    pub fn register_proxy<P: Proxy + 'static>(&self, proxy: Rc<P>) -> Result<()> {
        self.model.register_proxy(proxy)
    }

    pub fn retrieve_proxy(&self, proxy_name: &str) -> Option<Rc<dyn Proxy>> {
        self.model.retrieve_proxy(proxy_name)
    }

    pub fn retrieve_proxy_as<P: Proxy + 'static>(
        &self,
        proxy_name: &str,
    ) -> Result<Option<Rc<P>>, RegistryError> {
        self.model.retrieve_proxy_as(proxy_name)
    }

    pub fn has_proxy(&self, proxy_name: &str) -> bool {
        self.model.has_proxy(proxy_name)
    }

    pub fn remove_proxy(&self, proxy_name: &str) -> Result<Option<Rc<dyn Proxy>>> {
        self.model.remove_proxy(proxy_name)
    }

    /*
     * Mediators
     */

    pub fn register_mediator<M: Mediator<B> + 'static>(&self, mediator: Rc<M>) -> Result<()> {
        self.view.register_mediator(mediator)
    }

    pub fn retrieve_mediator(&self, mediator_name: &str) -> Option<Rc<dyn Mediator<B>>> {
        self.view.retrieve_mediator(mediator_name)
    }

    pub fn retrieve_mediator_as<M: Mediator<B> + 'static>(
        &self,
        mediator_name: &str,
    ) -> Result<Option<Rc<M>>, RegistryError> {
        self.view.retrieve_mediator_as(mediator_name)
    }

    pub fn has_mediator(&self, mediator_name: &str) -> bool {
        self.view.has_mediator(mediator_name)
    }

    pub fn remove_mediator(&self, mediator_name: &str) -> Result<Option<Rc<dyn Mediator<B>>>> {
        self.view.remove_mediator(mediator_name)
    }

    /*
     * Commands
     */

    pub fn register_command<S, F>(&self, notification_name: S, factory: F)
    where
        S: Into<String>,
        F: Fn() -> Box<dyn Command<B>> + 'static,
    {
        self.controller.register_command(notification_name, factory)
    }

    pub fn has_command(&self, notification_name: &str) -> bool {
        self.controller.has_command(notification_name)
    }

    pub fn remove_command(&self, notification_name: &str) {
        self.controller.remove_command(notification_name)
    }
}
