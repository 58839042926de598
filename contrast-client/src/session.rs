use std::collections::HashMap;
use std::time::Instant;

use futures::future;
use tracing::{debug, warn};

use contrast_core::{
    DynHandler, Error, Provider, Result, Selector, SessionConfig, Task, TaskKind, TaskMetadata,
};
use contrast_metrics::TaskScorer;
use contrast_providers::RegisteredTask;

use crate::selector::FirstConfigured;

/// Dispatch and evaluation engine for one task.
///
/// A session is bound for its lifetime to one task and a fixed, ordered
/// set of providers whose handlers are constructed eagerly up front.
/// After construction the session is stateless per call: every
/// `request`/`evaluate` produces a fresh [`TaskMetadata`] the caller
/// owns.
pub struct TaskSession<K: TaskKind> {
    providers: Vec<Provider>,
    handlers: HashMap<Provider, DynHandler<K>>,
    selector: Box<dyn Selector>,
}

impl<K: TaskKind> std::fmt::Debug for TaskSession<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSession")
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}

impl<K: TaskKind + TaskScorer> TaskSession<K> {
    /// Builds a session from the registry with the default selector.
    ///
    /// All-or-nothing: if any provider's handler fails to construct the
    /// whole session fails, so a ready session can always serve every
    /// provider it advertises.
    pub fn new(providers: &[Provider], config: &SessionConfig) -> Result<Self>
    where
        K: RegisteredTask,
    {
        Self::with_selector(providers, config, Box::new(FirstConfigured))
    }

    pub fn with_selector(
        providers: &[Provider],
        config: &SessionConfig,
        selector: Box<dyn Selector>,
    ) -> Result<Self>
    where
        K: RegisteredTask,
    {
        let mut handlers = Vec::with_capacity(providers.len());
        for &provider in providers {
            let handler = K::construct(provider, config)
                .map_err(|e| Error::session_construction(K::TASK, provider, e))?;
            handlers.push((provider, handler));
        }
        Self::from_handlers(handlers, Some(selector))
    }

    /// Builds a session from already-constructed handlers, bypassing the
    /// registry. The handler order fixes the selection order.
    pub fn from_handlers(
        handlers: Vec<(Provider, DynHandler<K>)>,
        selector: Option<Box<dyn Selector>>,
    ) -> Result<Self> {
        if handlers.is_empty() {
            return Err(Error::EmptyProviderSet { task: K::TASK });
        }
        let providers: Vec<Provider> = handlers.iter().map(|(provider, _)| *provider).collect();
        Ok(Self {
            providers,
            handlers: handlers.into_iter().collect(),
            selector: selector.unwrap_or_else(|| Box::new(FirstConfigured)),
        })
    }

    pub fn task(&self) -> Task {
        K::TASK
    }

    /// Providers in construction order.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    fn handler_for(&self, provider: Provider) -> Result<&DynHandler<K>> {
        self.handlers
            .get(&provider)
            .ok_or(Error::UnknownProvider { provider })
    }

    /// Single-provider execution.
    ///
    /// With `provider` pinned the request goes exactly there; otherwise
    /// the selector picks one from the configured set. Handler failures
    /// propagate as-is: there is no implicit fallback, callers wanting
    /// resilience use [`evaluate`](Self::evaluate) or re-pin. A failure
    /// while scoring against `reference` never fails the call; the
    /// metadata just carries no metrics.
    pub async fn request(
        &self,
        body: &K::Request,
        provider: Option<Provider>,
        reference: Option<&K::Response>,
    ) -> Result<(K::Response, TaskMetadata)> {
        let provider = match provider {
            Some(pinned) => {
                self.handler_for(pinned)?;
                pinned
            }
            None => self.selector.select(K::TASK, &self.providers)?,
        };
        debug!(task = %K::TASK, %provider, "dispatching request");
        self.call_provider(provider, body, reference).await
    }

    /// Fan-out across every configured provider with the same body.
    ///
    /// Providers run concurrently and fail independently: a failing
    /// provider is logged and omitted from the result map, never
    /// aborting its siblings. Absence from the map therefore means "this
    /// provider failed", not "empty response".
    pub async fn evaluate(
        &self,
        body: &K::Request,
        reference: Option<&K::Response>,
    ) -> HashMap<Provider, (K::Response, TaskMetadata)> {
        let calls = self.providers.iter().map(|&provider| async move {
            (provider, self.call_provider(provider, body, reference).await)
        });

        let mut results = HashMap::new();
        for (provider, outcome) in future::join_all(calls).await {
            match outcome {
                Ok(pair) => {
                    results.insert(provider, pair);
                }
                Err(error) => {
                    warn!(
                        task = %K::TASK,
                        %provider,
                        %error,
                        "provider failed during evaluation; omitting from results"
                    );
                }
            }
        }
        results
    }

    async fn call_provider(
        &self,
        provider: Provider,
        body: &K::Request,
        reference: Option<&K::Response>,
    ) -> Result<(K::Response, TaskMetadata)> {
        let handler = self.handler_for(provider)?;

        // latency covers the handler call only, not selection or scoring
        let started = Instant::now();
        let response = handler.execute(body).await?;
        let latency = started.elapsed();

        let mut metadata = TaskMetadata::new(K::TASK, provider, latency);
        if let Some(reference) = reference {
            match K::score(reference, &response) {
                Ok(report) => metadata = metadata.with_metrics(report),
                Err(error) => warn!(
                    task = %K::TASK,
                    %provider,
                    %error,
                    "metrics computation failed; returning response without metrics"
                ),
            }
        }

        Ok((response, metadata))
    }
}
