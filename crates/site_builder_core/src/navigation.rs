//! crates/site_builder_core/src/navigation.rs
//!
//! A headless `Navigator` that tracks the current location and every
//! navigation made, the way a browser history would.

use parking_lot::Mutex;

use crate::ports::Navigator;

/// How a location was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    Push,
    Replace,
    Reload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub path: String,
    pub kind: NavigationKind,
}

#[derive(Debug)]
pub struct HistoryNavigator {
    visits: Mutex<Vec<Visit>>,
    current: Mutex<String>,
}

impl HistoryNavigator {
    pub fn new(start: &str) -> Self {
        Self {
            visits: Mutex::new(Vec::new()),
            current: Mutex::new(start.to_string()),
        }
    }

    pub fn current(&self) -> String {
        self.current.lock().clone()
    }

    pub fn visits(&self) -> Vec<Visit> {
        self.visits.lock().clone()
    }

    /// The most recent navigation, if any happened.
    pub fn last(&self) -> Option<Visit> {
        self.visits.lock().last().cloned()
    }

    fn record(&self, path: String, kind: NavigationKind) {
        tracing::debug!(path = %path, ?kind, "navigating");
        *self.current.lock() = path.clone();
        self.visits.lock().push(Visit { path, kind });
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, path: &str) {
        self.record(path.to_string(), NavigationKind::Push);
    }

    fn replace(&self, path: &str) {
        self.record(path.to_string(), NavigationKind::Replace);
    }

    fn reload(&self) {
        let path = self.current();
        self.record(path, NavigationKind::Reload);
    }
}
