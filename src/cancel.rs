use core::fmt;
use std::error::Error;

/// The signal value recording that an operation was deliberately abandoned.
///
/// A `Cancel` is created once per cancellation event, by the
/// [`CancelSource`][crate::CancelSource] that fired. Observers tell a
/// cancellation apart from a transport or server failure by type (pattern
/// matching), never by inspecting the rendered message.
#[derive(Clone, PartialEq, Eq)]
pub struct Cancel {
    message: Option<String>,
}

impl Cancel {
    pub(crate) fn new(message: Option<String>) -> Self {
        Self { message }
    }

    /// The reason supplied to `cancel`, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Debug for Cancel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cancel")
            .field("message", &self.message)
            .finish()
    }
}

impl fmt::Display for Cancel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "Operation canceled: {}", message),
            None => "Operation canceled".fmt(f),
        }
    }
}

impl Error for Cancel {}
