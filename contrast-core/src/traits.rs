use async_trait::async_trait;

use crate::domain::provider::Provider;
use crate::domain::task::{Task, TaskKind};
use crate::error::Result;

/// One constructed (task, provider) handler.
///
/// Implementations validate their configuration at construction time and
/// surface every vendor-side failure from `execute`; they do not retry
/// and do not swallow errors.
#[async_trait]
pub trait ProviderHandler<K: TaskKind>: Send + Sync {
    fn provider(&self) -> Provider;

    async fn execute(&self, request: &K::Request) -> Result<K::Response>;
}

impl<K: TaskKind> std::fmt::Debug for dyn ProviderHandler<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderHandler")
            .field("provider", &self.provider())
            .finish()
    }
}

pub type DynHandler<K> = Box<dyn ProviderHandler<K>>;

/// Strategy that picks one provider when the caller does not pin one.
///
/// Must return a member of `available` and fail with
/// [`Error::NoProviderAvailable`](crate::Error::NoProviderAvailable) on an
/// empty set.
pub trait Selector: Send + Sync {
    fn select(&self, task: Task, available: &[Provider]) -> Result<Provider>;
}
