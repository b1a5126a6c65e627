use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use linked_hash_map::LinkedHashMap;
use miette::Result;

use crate::{Mediator, Notification, NotifyContext, Observer, RegistryError};

/// A mediator as stored by the view, along with the interests sampled when
/// it was registered.
struct RegisteredMediator<B> {
    mediator: Rc<dyn Mediator<B>>,

    /// The same allocation as `mediator`, kept for typed lookups.
    mediator_any: Rc<dyn Any>,

    interests: Vec<String>,
}

/// Mediator registry and notification dispatcher.
///
/// Holds two maps:
/// - mediator name to mediator (in registration order),
/// - notification name to the ordered list of observers for that name.
///
/// No `RefCell` borrow is held while calling into a mediator or observer,
/// so handlers are free to call back into the view.
pub struct View<B> {
    mediator_map: RefCell<LinkedHashMap<String, RegisteredMediator<B>>>,
    observer_map: RefCell<HashMap<String, Vec<Observer<B>>>>,
}

impl<B: 'static> View<B> {
    pub fn new() -> Self {
        Self {
            mediator_map: RefCell::new(LinkedHashMap::new()),
            observer_map: RefCell::new(HashMap::new()),
        }
    }

    /// Append `observer` to the list for `notification_name`.
    ///
    /// No deduplication is performed.
    pub fn register_observer<S: Into<String>>(
        &self,
        notification_name: S,
        observer: Observer<B>,
    ) {
        self.observer_map
            .borrow_mut()
            .entry(notification_name.into())
            .or_default()
            .push(observer);
    }

    /// Remove the first observer for `notification_name` bound to `notify_context`.
    ///
    /// Does nothing if there is no such observer. The list entry is dropped
    /// entirely once its last observer is gone.
    pub fn remove_observer(&self, notification_name: &str, notify_context: NotifyContext) {
        let mut observer_map = self.observer_map.borrow_mut();

        let Some(observers) = observer_map.get_mut(notification_name) else {
            return;
        };

        if let Some(index) = observers
            .iter()
            .position(|observer| observer.compare_notify_context(notify_context))
        {
            observers.remove(index);
        }

        if observers.is_empty() {
            observer_map.remove(notification_name);
        }
    }

    /// Notify every observer registered for the notification's name, in order.
    ///
    /// The list is copied before the first observer runs: observers added or
    /// removed by a handler only affect later dispatches. The first handler
    /// error aborts this pass and is returned as-is.
    pub fn notify_observers(&self, notification: &Notification<B>) -> Result<()> {
        let observers: Vec<Observer<B>> =
            match self.observer_map.borrow().get(notification.name()) {
                Some(observers) => observers.clone(),
                None => return Ok(()),
            };

        tracing::trace!(
            notification = notification.name(),
            observers = observers.len(),
            "dispatching notification"
        );

        for observer in &observers {
            observer.notify(notification)?;
        }

        Ok(())
    }

    /// Register a mediator and wire its notification interests.
    ///
    /// If a mediator with the same name is already registered, this does
    /// nothing (the new mediator is neither stored nor notified of anything).
    ///
    /// `on_register` runs after all observers are live, so the mediator may
    /// send notifications to itself from there.
    pub fn register_mediator<M>(&self, mediator: Rc<M>) -> Result<()>
    where
        M: Mediator<B> + 'static,
    {
        let mediator_name = mediator.mediator_name().to_string();

        if self.has_mediator(&mediator_name) {
            tracing::debug!(
                mediator = %mediator_name,
                "mediator already registered, ignoring"
            );
            return Ok(());
        }

        let interests = mediator.list_notification_interests();

        let mediator_dyn: Rc<dyn Mediator<B>> = mediator.clone();
        let mediator_any: Rc<dyn Any> = mediator;

        {
            let mut mediator_map = self.mediator_map.borrow_mut();

            // Listing interests may have re-entered the view.
            if mediator_map.contains_key(&mediator_name) {
                return Ok(());
            }

            mediator_map.insert(
                mediator_name.clone(),
                RegisteredMediator {
                    mediator: mediator_dyn.clone(),
                    mediator_any,
                    interests: interests.clone(),
                },
            );
        }

        if !interests.is_empty() {
            let observer = Observer::new(&mediator_dyn, |mediator, notification| {
                mediator.handle_notification(notification)
            });

            for interest in interests.iter() {
                self.register_observer(interest.as_str(), observer.clone());
            }
        }

        tracing::debug!(
            mediator = %mediator_name,
            interests = ?interests,
            "registered mediator"
        );

        mediator_dyn.on_register()
    }

    pub fn retrieve_mediator(&self, mediator_name: &str) -> Option<Rc<dyn Mediator<B>>> {
        self.mediator_map
            .borrow()
            .get(mediator_name)
            .map(|registered| registered.mediator.clone())
    }

    /// Retrieve a mediator as its concrete type.
    ///
    /// Returns `Ok(None)` if nothing is registered under the name and
    /// [`RegistryError::TypeMismatch`] if something of another type is.
    pub fn retrieve_mediator_as<M>(
        &self,
        mediator_name: &str,
    ) -> Result<Option<Rc<M>>, RegistryError>
    where
        M: Mediator<B> + 'static,
    {
        let mediator_any = match self.mediator_map.borrow().get(mediator_name) {
            Some(registered) => registered.mediator_any.clone(),
            None => return Ok(None),
        };

        mediator_any
            .downcast::<M>()
            .map(Some)
            .map_err(|_| RegistryError::TypeMismatch {
                name: mediator_name.to_string(),
                expected_type: type_name::<M>(),
            })
    }

    /// Remove a mediator, returning it if it was registered.
    ///
    /// The mediator's observers are removed and the map entry is dropped
    /// before `on_remove` runs.
    pub fn remove_mediator(
        &self,
        mediator_name: &str,
    ) -> Result<Option<Rc<dyn Mediator<B>>>> {
        let (mediator, registered_interests) =
            match self.mediator_map.borrow().get(mediator_name) {
                Some(registered) => {
                    (registered.mediator.clone(), registered.interests.clone())
                }
                None => return Ok(None),
            };

        let current_interests = mediator.list_notification_interests();
        if !is_same_interest_set(&registered_interests, &current_interests) {
            tracing::warn!(
                mediator = mediator_name,
                registered = ?registered_interests,
                current = ?current_interests,
                "mediator interests changed while registered, \
                 removing the ones it was registered with"
            );
        }

        let notify_context = NotifyContext::of(&mediator);
        for interest in registered_interests.iter() {
            self.remove_observer(interest, notify_context);
        }

        {
            let mut mediator_map = self.mediator_map.borrow_mut();

            let is_still_same_mediator =
                mediator_map.get(mediator_name).is_some_and(|registered| {
                    NotifyContext::of(&registered.mediator) == notify_context
                });

            if is_still_same_mediator {
                mediator_map.remove(mediator_name);
            }
        }

        tracing::debug!(mediator = mediator_name, "removed mediator");

        mediator.on_remove()?;

        Ok(Some(mediator))
    }

    pub fn has_mediator(&self, mediator_name: &str) -> bool {
        self.mediator_map.borrow().contains_key(mediator_name)
    }

    /// Names of all registered mediators, in registration order.
    pub fn mediator_names(&self) -> Vec<String> {
        self.mediator_map.borrow().keys().cloned().collect()
    }

    /// Returns `true` if at least one observer is registered for the name.
    pub fn has_observers(&self, notification_name: &str) -> bool {
        self.observer_map.borrow().contains_key(notification_name)
    }

    pub fn observer_count(&self, notification_name: &str) -> usize {
        self.observer_map
            .borrow()
            .get(notification_name)
            .map_or(0, Vec::len)
    }
}

impl<B: 'static> Default for View<B> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_same_interest_set(first: &[String], second: &[String]) -> bool {
    let first: HashSet<&String> = first.iter().collect();
    let second: HashSet<&String> = second.iter().collect();

    first == second
}
