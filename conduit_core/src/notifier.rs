use std::rc::{Rc, Weak};

use miette::Result;

use crate::{Facade, FacadeError};

/// Cloneable handle used by mediators, proxies and commands to send
/// notifications without keeping the [`Facade`] alive.
pub struct Notifier<B> {
    facade: Weak<Facade<B>>,
}

impl<B: 'static> Notifier<B> {
    pub fn new(facade: Weak<Facade<B>>) -> Self {
        Self { facade }
    }

    /// The facade this notifier sends through.
    pub fn facade(&self) -> Result<Rc<Facade<B>>, FacadeError> {
        self.facade.upgrade().ok_or(FacadeError::Unavailable)
    }

    /// Build and send a notification.
    ///
    /// Fails with [`FacadeError::Unavailable`] once the facade is gone.
    pub fn send_notification<S: Into<String>>(
        &self,
        notification_name: S,
        body: Option<B>,
        notification_type: Option<&str>,
    ) -> Result<()> {
        self.facade()?
            .send_notification(notification_name, body, notification_type)
    }
}

impl<B> Clone for Notifier<B> {
    fn clone(&self) -> Self {
        Self {
            facade: self.facade.clone(),
        }
    }
}
