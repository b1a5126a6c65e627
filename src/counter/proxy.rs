use std::cell::Cell;

use conduit_core::{Notifier, Proxy};
use miette::{Diagnostic, Result};
use thiserror::Error;

use super::{CounterBody, CHANGE_TYPE_INCREMENT, CHANGE_TYPE_RESET, COUNTER_CHANGED};

#[derive(Error, Debug, Diagnostic)]
pub enum CounterError {
    #[error("Adding {step} to {value} would overflow the counter.")]
    Overflow { value: i64, step: i64 },
}

/// Holds the counter value. Every change is announced with a `COUNTER_CHANGED`
/// notification whose type tells increments and resets apart.
pub struct CounterProxy {
    value: Cell<i64>,
    initial_value: i64,
    notifier: Notifier<CounterBody>,
}

impl CounterProxy {
    pub const NAME: &'static str = "counter";

    pub fn new(initial_value: i64, notifier: Notifier<CounterBody>) -> Self {
        Self {
            value: Cell::new(initial_value),
            initial_value,
            notifier,
        }
    }

    pub fn value(&self) -> i64 {
        self.value.get()
    }

    pub fn add(&self, step: i64) -> Result<()> {
        let previous = self.value.get();
        let current = previous
            .checked_add(step)
            .ok_or(CounterError::Overflow {
                value: previous,
                step,
            })?;

        self.set(previous, current, CHANGE_TYPE_INCREMENT)
    }

    /// Return to the initial value.
    pub fn reset(&self) -> Result<()> {
        let previous = self.value.get();
        self.set(previous, self.initial_value, CHANGE_TYPE_RESET)
    }

    fn set(&self, previous: i64, current: i64, change_type: &str) -> Result<()> {
        self.value.set(current);

        self.notifier.send_notification(
            COUNTER_CHANGED,
            Some(CounterBody::Changed { previous, current }),
            Some(change_type),
        )
    }
}

impl Proxy for CounterProxy {
    fn proxy_name(&self) -> &str {
        Self::NAME
    }

    fn on_register(&self) -> Result<()> {
        tracing::debug!(value = self.value.get(), "counter proxy registered");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use conduit_core::{Facade, Notification};

    use super::*;

    #[test]
    fn overflow_is_reported_and_value_kept() {
        let facade: std::rc::Rc<Facade<CounterBody>> = Facade::new();
        let counter = CounterProxy::new(i64::MAX - 1, facade.notifier());

        counter.add(1).unwrap();
        let error = counter.add(1).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<CounterError>(),
            Some(CounterError::Overflow { .. })
        ));
        assert_eq!(counter.value(), i64::MAX);
    }

    #[test]
    fn changes_are_announced_with_their_type() {
        use std::cell::RefCell;
        use std::rc::Rc;

        use conduit_core::Mediator;

        struct Listener(RefCell<Vec<Notification<CounterBody>>>);

        impl Mediator<CounterBody> for Listener {
            fn mediator_name(&self) -> &str {
                "listener"
            }

            fn list_notification_interests(&self) -> Vec<String> {
                vec![COUNTER_CHANGED.to_string()]
            }

            fn handle_notification(&self, notification: &Notification<CounterBody>) -> Result<()> {
                self.0.borrow_mut().push(notification.clone());
                Ok(())
            }
        }

        let facade: Rc<Facade<CounterBody>> = Facade::new();
        let listener = Rc::new(Listener(RefCell::new(Vec::new())));
        facade.register_mediator(listener.clone()).unwrap();

        let counter = CounterProxy::new(3, facade.notifier());
        counter.add(4).unwrap();
        counter.reset().unwrap();

        let seen = listener.0.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].notification_type(), Some(CHANGE_TYPE_INCREMENT));
        assert_eq!(
            seen[0].body(),
            Some(&CounterBody::Changed {
                previous: 3,
                current: 7
            })
        );
        assert_eq!(seen[1].notification_type(), Some(CHANGE_TYPE_RESET));
        assert_eq!(
            seen[1].body(),
            Some(&CounterBody::Changed {
                previous: 7,
                current: 3
            })
        );
    }
}
