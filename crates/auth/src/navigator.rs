//! Outbound navigation port.

use std::sync::Mutex;

/// The navigation system the guard redirects through.
///
/// Redirects are fire-and-forget: the guard never waits on or inspects the
/// result.
pub trait Navigator {
    /// Set the active path to `path`.
    fn set_path(&self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn set_path(&self, path: &str) {
        (**self).set_path(path)
    }
}

impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    fn set_path(&self, path: &str) {
        (**self).set_path(path)
    }
}

/// Navigator that remembers every path it was asked to activate.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requested paths, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.paths
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// The most recently requested path.
    pub fn current(&self) -> Option<String> {
        self.history().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn set_path(&self, path: &str) {
        let mut paths = self
            .paths
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        paths.push(path.to_string());
    }
}
