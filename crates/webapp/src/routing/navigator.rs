//! Navigation side effects.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Moves the user between screens.
///
/// Controllers never navigate on their own; they call into this collaborator
/// so the surrounding shell (browser history, CLI, tests) decides what a
/// navigation means.
pub trait Navigator: Send + Sync {
    /// Navigate to the path built from `commands` (joined with `/`).
    fn navigate(&self, commands: &[&str]);

    /// Return to the previous screen.
    fn back(&self);
}

/// A recorded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(String),
    Back,
}

/// In-memory history stack.
///
/// Keeps the visited paths and a log of every navigation call, which the CLI
/// reports and tests assert on.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    state: Mutex<HistoryState>,
}

#[derive(Debug, Default)]
struct HistoryState {
    stack: Vec<String>,
    log: Vec<Navigation>,
}

impl HistoryNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A history whose current screen is `path`.
    #[must_use]
    pub fn starting_at(path: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                stack: vec![path.into()],
                log: Vec::new(),
            }),
        }
    }

    /// The current path, if any.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.lock().stack.last().cloned()
    }

    /// Every navigation so far, oldest first.
    #[must_use]
    pub fn log(&self) -> Vec<Navigation> {
        self.lock().log.clone()
    }

    /// Whether `back` was called at least once.
    #[must_use]
    pub fn went_back(&self) -> bool {
        self.lock().log.contains(&Navigation::Back)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, commands: &[&str]) {
        let path = commands.join("/");
        debug!(path = %path, "Navigate");
        let mut state = self.lock();
        state.stack.push(path.clone());
        state.log.push(Navigation::To(path));
    }

    fn back(&self) {
        let mut state = self.lock();
        let left = state.stack.pop();
        debug!(from = ?left, "Navigate back");
        state.log.push(Navigation::Back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_and_back() {
        let navigator = HistoryNavigator::starting_at("customer");
        navigator.navigate(&["customer", "456", "edit"]);
        assert_eq!(navigator.current().as_deref(), Some("customer/456/edit"));

        navigator.back();
        assert_eq!(navigator.current().as_deref(), Some("customer"));
        assert!(navigator.went_back());
        assert_eq!(
            navigator.log(),
            vec![
                Navigation::To("customer/456/edit".to_string()),
                Navigation::Back,
            ]
        );
    }

    #[test]
    fn test_back_on_empty_history_is_recorded() {
        let navigator = HistoryNavigator::new();
        navigator.back();
        assert_eq!(navigator.current(), None);
        assert_eq!(navigator.log(), vec![Navigation::Back]);
    }
}
