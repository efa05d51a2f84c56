use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Global busy indicator. Each request holds a guard; the spinner stays up
/// until the last guard is dropped, so overlapping requests cannot hide it
/// early.
#[derive(Clone, Debug, Default)]
pub struct Loader {
    active: Arc<AtomicUsize>,
}

#[must_use = "the loader hides as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LoaderGuard {
    active: Arc<AtomicUsize>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoaderGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        LoaderGuard {
            active: self.active.clone(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.active() > 0
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for LoaderGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
