use std::sync::atomic::{AtomicUsize, Ordering};

use contrast_core::{Error, Provider, Result, Selector, Task};

/// Default selection policy: always the first provider in construction
/// order. Deterministic, so single-provider sessions and multi-provider
/// sessions without an explicit strategy behave reproducibly.
pub struct FirstConfigured;

impl Selector for FirstConfigured {
    fn select(&self, task: Task, available: &[Provider]) -> Result<Provider> {
        available
            .first()
            .copied()
            .ok_or(Error::NoProviderAvailable { task })
    }
}

/// Rotates through the configured providers call by call. Mostly useful
/// for spreading exploratory traffic; adaptive (latency- or cost-based)
/// strategies would implement [`Selector`] the same way.
#[derive(Default)]
pub struct RoundRobin {
    next: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Selector for RoundRobin {
    fn select(&self, task: Task, available: &[Provider]) -> Result<Provider> {
        if available.is_empty() {
            return Err(Error::NoProviderAvailable { task });
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % available.len();
        Ok(available[index])
    }
}
