use contrast_core::{
    DocumentReconstruction, DynHandler, Error, Ocr, Provider, Result, SentimentAnalysis,
    SessionConfig, Task, TaskKind, Transcription, Translation,
};

use crate::adapters::{
    Api4AiOcr, AzureDocumentReconstruction, AzureOcr, AzureSentimentAnalysis, AzureTranscription,
    AzureTranslation, GcpOcr, GcpSentimentAnalysis, GcpTranslation, ModernMtTranslation,
    OpenAiTranscription, SentisightOcr,
};

/// Capability table: which tasks each provider declares support for.
///
/// The constructor matches in [`RegisteredTask`] are the source of truth;
/// this table mirrors them and a registry test keeps the two in sync.
pub fn supported_tasks(provider: Provider) -> &'static [Task] {
    match provider {
        Provider::Gcp => &[Task::Ocr, Task::SentimentAnalysis, Task::Translation],
        Provider::Azure => &[
            Task::DocumentReconstruction,
            Task::Ocr,
            Task::SentimentAnalysis,
            Task::Transcription,
            Task::Translation,
        ],
        Provider::ModernMt => &[Task::Translation],
        Provider::OpenAi => &[Task::Transcription],
        Provider::Sentisight => &[Task::Ocr],
        Provider::Api4Ai => &[Task::Ocr],
    }
}

pub fn supported_providers(task: Task) -> Vec<Provider> {
    Provider::ALL
        .into_iter()
        .filter(|provider| supported_tasks(*provider).contains(&task))
        .collect()
}

/// Per-task handler construction.
///
/// One exhaustive match over the closed provider set per task: adding a
/// provider or task without deciding every pairing fails to compile.
/// Construction is eager by design; missing credentials or language
/// configuration surface here, not on the first request.
pub trait RegisteredTask: TaskKind {
    fn construct(provider: Provider, config: &SessionConfig) -> Result<DynHandler<Self>>;
}

fn unsupported<T>(provider: Provider, task: Task) -> Result<T> {
    Err(Error::UnsupportedTask { provider, task })
}

impl RegisteredTask for SentimentAnalysis {
    fn construct(provider: Provider, config: &SessionConfig) -> Result<DynHandler<Self>> {
        match provider {
            Provider::Gcp => Ok(Box::new(GcpSentimentAnalysis::from_config(config)?)),
            Provider::Azure => Ok(Box::new(AzureSentimentAnalysis::from_config(config)?)),
            Provider::ModernMt | Provider::OpenAi | Provider::Sentisight | Provider::Api4Ai => {
                unsupported(provider, Self::TASK)
            }
        }
    }
}

impl RegisteredTask for Translation {
    fn construct(provider: Provider, config: &SessionConfig) -> Result<DynHandler<Self>> {
        match provider {
            Provider::Gcp => Ok(Box::new(GcpTranslation::from_config(config)?)),
            Provider::Azure => Ok(Box::new(AzureTranslation::from_config(config)?)),
            Provider::ModernMt => Ok(Box::new(ModernMtTranslation::from_config(config)?)),
            Provider::OpenAi | Provider::Sentisight | Provider::Api4Ai => {
                unsupported(provider, Self::TASK)
            }
        }
    }
}

impl RegisteredTask for Ocr {
    fn construct(provider: Provider, config: &SessionConfig) -> Result<DynHandler<Self>> {
        match provider {
            Provider::Gcp => Ok(Box::new(GcpOcr::from_config(config)?)),
            Provider::Azure => Ok(Box::new(AzureOcr::from_config(config)?)),
            Provider::Sentisight => Ok(Box::new(SentisightOcr::from_config(config)?)),
            Provider::Api4Ai => Ok(Box::new(Api4AiOcr::from_config(config)?)),
            Provider::ModernMt | Provider::OpenAi => unsupported(provider, Self::TASK),
        }
    }
}

impl RegisteredTask for Transcription {
    fn construct(provider: Provider, config: &SessionConfig) -> Result<DynHandler<Self>> {
        match provider {
            Provider::Azure => Ok(Box::new(AzureTranscription::from_config(config)?)),
            Provider::OpenAi => Ok(Box::new(OpenAiTranscription::from_config(config)?)),
            Provider::Gcp | Provider::ModernMt | Provider::Sentisight | Provider::Api4Ai => {
                unsupported(provider, Self::TASK)
            }
        }
    }
}

impl RegisteredTask for DocumentReconstruction {
    fn construct(provider: Provider, config: &SessionConfig) -> Result<DynHandler<Self>> {
        match provider {
            Provider::Azure => Ok(Box::new(AzureDocumentReconstruction::from_config(config)?)),
            Provider::Gcp
            | Provider::ModernMt
            | Provider::OpenAi
            | Provider::Sentisight
            | Provider::Api4Ai => unsupported(provider, Self::TASK),
        }
    }
}
