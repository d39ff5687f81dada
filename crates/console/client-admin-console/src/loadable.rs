//! Fetch state shared by the views.

/// State of data a view fetched on mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Loaded(T),
    /// Load failed; holds the user-facing message.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Decides whether a completed response may still be applied to a view.
///
/// Every load issues a new ticket. Issuing, invalidating or detaching
/// supersedes all earlier tickets, so only the newest request of a mounted
/// view is ever applied.
#[derive(Debug, Default)]
pub struct RequestGuard {
    generation: u64,
    detached: bool,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.detached && ticket.0 == self.generation
    }

    /// Supersede any outstanding request.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// The owning view was unmounted; nothing may be applied any more.
    pub fn detach(&mut self) {
        self.detached = true;
        self.generation += 1;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_ticket_wins() {
        let mut guard = RequestGuard::new();
        let first = guard.issue();
        assert!(guard.is_current(first));

        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_invalidate_and_detach() {
        let mut guard = RequestGuard::new();
        let ticket = guard.issue();
        guard.invalidate();
        assert!(!guard.is_current(ticket));

        let ticket = guard.issue();
        guard.detach();
        assert!(guard.is_detached());
        assert!(!guard.is_current(ticket));

        let late = guard.issue();
        assert!(!guard.is_current(late));
    }

    #[test]
    fn test_loadable_accessors() {
        let mut state: Loadable<Vec<u8>> = Loadable::Loading;
        assert!(state.is_loading());
        assert!(state.loaded().is_none());

        state = Loadable::Loaded(vec![1]);
        state.loaded_mut().unwrap().push(2);
        assert_eq!(state.loaded(), Some(&vec![1, 2]));

        let failed: Loadable<()> = Loadable::Failed("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));
    }
}
