use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

use miette::Result;

use crate::Notification;

/// Identity of the object an [`Observer`] is bound to.
///
/// Two contexts are equal iff they point at the same allocation,
/// regardless of the concrete (or trait object) type used to build them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NotifyContext(*const ());

impl NotifyContext {
    pub fn of<C: ?Sized>(context: &Rc<C>) -> Self {
        Self(Rc::as_ptr(context) as *const ())
    }

    pub fn of_weak<C: ?Sized>(context: &Weak<C>) -> Self {
        Self(Weak::as_ptr(context) as *const ())
    }
}


type NotifyMethod<B> = Rc<dyn Fn(&Notification<B>) -> Result<()>>;

/// A (callback, context) pair registered against one notification name.
///
/// Observers built with [`Observer::new`] keep their context alive for as
/// long as they exist, which is what lets a dispatch pass reach a mediator
/// that was removed earlier in the same pass. [`Observer::from_weak`] is for
/// contexts that themselves own the view (and would otherwise form a cycle);
/// once such a context is dropped, notifying the observer does nothing.
pub struct Observer<B> {
    notify_method: NotifyMethod<B>,
    notify_context: NotifyContext,
}

impl<B: 'static> Observer<B> {
    /// Bind `notify_method` to `notify_context`. The method receives the
    /// context as its receiver each time the observer is notified.
    pub fn new<C, F>(notify_context: &Rc<C>, notify_method: F) -> Self
    where
        C: ?Sized + 'static,
        F: Fn(&C, &Notification<B>) -> Result<()> + 'static,
    {
        let context = notify_context.clone();

        Self {
            notify_method: Rc::new(move |notification: &Notification<B>| {
                notify_method(&*context, notification)
            }),
            notify_context: NotifyContext::of(notify_context),
        }
    }

    /// Same as [`Observer::new`], but only holds a `Weak` to the context.
    pub fn from_weak<C, F>(notify_context: Weak<C>, notify_method: F) -> Self
    where
        C: ?Sized + 'static,
        F: Fn(&C, &Notification<B>) -> Result<()> + 'static,
    {
        let context_identity = NotifyContext::of_weak(&notify_context);

        let bound_method = move |notification: &Notification<B>| {
            match notify_context.upgrade() {
                Some(context) => notify_method(&*context, notification),
                None => {
                    tracing::trace!(
                        notification = notification.name(),
                        "observer context dropped, skipping"
                    );
                    Ok(())
                }
            }
        };

        Self {
            notify_method: Rc::new(bound_method),
            notify_context: context_identity,
        }
    }
}

impl<B> Observer<B> {
    /// Invoke the wrapped callback with the given notification.
    pub fn notify(&self, notification: &Notification<B>) -> Result<()> {
        (self.notify_method)(notification)
    }

    /// Returns `true` if this observer is bound to `context`.
    pub fn compare_notify_context(&self, context: NotifyContext) -> bool {
        self.notify_context == context
    }

    pub fn notify_context(&self) -> NotifyContext {
        self.notify_context
    }
}

impl<B> Clone for Observer<B> {
    fn clone(&self) -> Self {
        Self {
            notify_method: self.notify_method.clone(),
            notify_context: self.notify_context,
        }
    }
}

impl<B> PartialEq for Observer<B> {
    fn eq(&self, other: &Self) -> bool {
        self.notify_context == other.notify_context
    }
}

impl<B> Eq for Observer<B> {}

impl<B> Debug for Observer<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer")
            .field("notify_context", &self.notify_context)
            .finish_non_exhaustive()
    }
}
