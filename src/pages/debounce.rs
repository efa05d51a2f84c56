use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delays an action until input has been quiet for `delay`; only the most
/// recent trigger settles.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

#[derive(Debug)]
pub struct DebounceTicket {
    id: u64,
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn trigger(&self) -> DebounceTicket {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        DebounceTicket {
            id,
            delay: self.delay,
            generation: self.generation.clone(),
        }
    }
}

impl DebounceTicket {
    /// Waits out the delay; true when no newer trigger happened meanwhile.
    pub async fn settled(self) -> bool {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.generation.load(Ordering::SeqCst) == self.id
    }
}
