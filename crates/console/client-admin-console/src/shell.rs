//! User interaction seam between the views and a front end.

use crate::route::Route;

/// Blocking user interactions a view may need while handling an action.
pub trait Shell: Send + Sync {
    /// Ask the user to confirm a destructive or sensitive action.
    fn confirm(&self, prompt: &str) -> bool;

    /// Report a failed action. Blocks until acknowledged.
    fn alert(&self, message: &str);

    /// Report a successful action.
    fn notify(&self, message: &str);

    /// Show a freshly rotated secret exactly once, warning that it cannot be
    /// retrieved again. Implementations must not retain it.
    fn disclose_secret(&self, secret: &str);
}

/// Result of a user action on a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user declined the confirmation, or there was nothing to act on.
    Cancelled,
    /// Local validation failed; no request was sent.
    Invalid,
    /// The request failed; view state is unchanged.
    Failed,
    /// The action succeeded and the view stays where it is.
    Completed,
    /// The action succeeded and the console should move to another route.
    Navigate(Route),
}

impl Outcome {
    pub fn navigation(&self) -> Option<&Route> {
        match self {
            Self::Navigate(route) => Some(route),
            _ => None,
        }
    }
}
