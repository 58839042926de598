use thiserror::Error;

use crate::domain::provider::Provider;
use crate::domain::task::Task;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown provider {provider} for this session")]
    UnknownProvider { provider: Provider },

    #[error("provider {provider} does not support {task}")]
    UnsupportedTask { provider: Provider, task: Task },

    #[error("missing configuration key `{key}`")]
    Configuration { key: String },

    #[error("failed to construct {task} session: provider {provider}: {source}")]
    SessionConstruction {
        task: Task,
        provider: Provider,
        #[source]
        source: Box<Error>,
    },

    #[error("{task} session constructed with an empty provider set")]
    EmptyProviderSet { task: Task },

    #[error("no provider available for {task}")]
    NoProviderAvailable { task: Task },

    #[error("{provider} request for {task} failed: {message}")]
    Execution {
        provider: Provider,
        task: Task,
        message: String,
    },

    #[error("metrics computation failed: {0}")]
    Metrics(String),

    #[error("transport error: {0}")]
    Http(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps a handler-construction failure into the all-or-nothing
    /// session construction error.
    pub fn session_construction(task: Task, provider: Provider, source: Error) -> Self {
        Error::SessionConstruction {
            task,
            provider,
            source: Box::new(source),
        }
    }

    pub fn execution(provider: Provider, task: Task, message: impl Into<String>) -> Self {
        Error::Execution {
            provider,
            task,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
