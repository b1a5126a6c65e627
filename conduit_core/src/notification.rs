use std::fmt::{Debug, Display, Formatter};

/// A named, immutable event broadcast through the [`View`](crate::View).
///
/// `B` is the body type chosen by the application (usually an enum).
/// The name is the dispatch key; body and type are optional extras
/// that observers may inspect.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Notification<B> {
    name: String,
    body: Option<B>,
    notification_type: Option<String>,
}

impl<B> Notification<B> {
    /// Create a notification with only a name.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            body: None,
            notification_type: None,
        }
    }

    /// Create a notification with every field specified.
    pub fn with_parts<N: Into<String>>(
        name: N,
        body: Option<B>,
        notification_type: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            body,
            notification_type,
        }
    }

    /// Builder-style: attach a body.
    pub fn with_body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builder-style: attach a type tag.
    pub fn with_type<T: Into<String>>(mut self, notification_type: T) -> Self {
        self.notification_type = Some(notification_type.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    pub fn notification_type(&self) -> Option<&str> {
        self.notification_type.as_deref()
    }

    /// Consume the notification, returning its body.
    pub fn into_body(self) -> Option<B> {
        self.body
    }
}

impl<B: Debug> Display for Notification<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Notification Name: {}", self.name)?;

        match &self.body {
            Some(body) => write!(f, "\nBody: {:?}", body)?,
            None => write!(f, "\nBody: null")?,
        }

        match &self.notification_type {
            Some(notification_type) => write!(f, "\nType: {}", notification_type),
            None => write!(f, "\nType: null"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_all_parts() {
        let notification = Notification::new("refresh")
            .with_body(42u32)
            .with_type("partial");

        assert_eq!(notification.name(), "refresh");
        assert_eq!(notification.body(), Some(&42));
        assert_eq!(notification.notification_type(), Some("partial"));
    }

    #[test]
    fn display_lists_missing_parts_as_null() {
        let notification: Notification<u8> = Notification::new("ping");

        assert_eq!(
            notification.to_string(),
            "Notification Name: ping\nBody: null\nType: null"
        );
    }

    #[test]
    fn display_includes_debug_body() {
        let notification = Notification::with_parts(
            "set_title",
            Some("hello"),
            Some("text".to_string()),
        );

        assert_eq!(
            notification.to_string(),
            "Notification Name: set_title\nBody: \"hello\"\nType: text"
        );
    }
}
