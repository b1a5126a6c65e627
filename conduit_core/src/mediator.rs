use std::cell::{Ref, RefCell};

use miette::Result;

use crate::Notification;

/// Name used by mediators that only ever exist once.
pub const DEFAULT_MEDIATOR_NAME: &str = "Mediator";

/// A named collaborator that sits between one view component and the
/// notification bus.
///
/// When registered with a [`View`](crate::View), it is asked once for its
/// interests and then receives every notification with a matching name
/// until it is removed.
///
/// All methods take `&self`: a mediator can be re-entered (a handler that
/// sends a notification the same mediator is interested in gets called again
/// before returning), so any mutable state should live behind a `RefCell`
/// that is not borrowed across a send.
pub trait Mediator<B> {
    /// Registry key. Must stay constant for the lifetime of the instance.
    fn mediator_name(&self) -> &str;

    /// Notification names this mediator wants to receive.
    ///
    /// Must return the same set for as long as the mediator is registered.
    fn list_notification_interests(&self) -> Vec<String> {
        Vec::new()
    }

    /// Called for each notification matching one of the interests.
    fn handle_notification(&self, _notification: &Notification<B>) -> Result<()> {
        Ok(())
    }

    /// Called by the view after all of this mediator's observers are live.
    fn on_register(&self) -> Result<()> {
        Ok(())
    }

    /// Called by the view after this mediator has stopped receiving notifications.
    fn on_remove(&self) -> Result<()> {
        Ok(())
    }
}


/// Reusable name + view component holder for [`Mediator`] implementors.
///
/// The view component is opaque to the framework; it is only stored here so
/// the owning mediator (and whoever wires it) can attach, read and detach it.
pub struct MediatorComponent<C> {
    mediator_name: String,
    view_component: RefCell<Option<C>>,
}

impl<C> MediatorComponent<C> {
    pub fn new<S: Into<String>>(mediator_name: S, view_component: Option<C>) -> Self {
        Self {
            mediator_name: mediator_name.into(),
            view_component: RefCell::new(view_component),
        }
    }

    /// A component named [`DEFAULT_MEDIATOR_NAME`].
    pub fn with_default_name(view_component: Option<C>) -> Self {
        Self::new(DEFAULT_MEDIATOR_NAME, view_component)
    }

    pub fn mediator_name(&self) -> &str {
        &self.mediator_name
    }

    pub fn has_view_component(&self) -> bool {
        self.view_component.borrow().is_some()
    }

    /// Borrow the view component.
    ///
    /// The returned guard must be dropped before the component is replaced.
    pub fn view_component_ref(&self) -> Option<Ref<'_, C>> {
        Ref::filter_map(self.view_component.borrow(), Option::as_ref).ok()
    }

    /// Run `function` with the view component, if one is attached.
    pub fn with_view_component<R, F: FnOnce(&C) -> R>(&self, function: F) -> Option<R> {
        self.view_component.borrow().as_ref().map(function)
    }

    /// Replace the view component, returning the previous one.
    pub fn set_view_component(&self, view_component: Option<C>) -> Option<C> {
        self.view_component.replace(view_component)
    }

    /// Detach the view component.
    pub fn take_view_component(&self) -> Option<C> {
        self.view_component.borrow_mut().take()
    }
}

impl<C: Clone> MediatorComponent<C> {
    pub fn view_component(&self) -> Option<C> {
        self.view_component.borrow().clone()
    }
}
