use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use contrast_client::TaskSession;
use contrast_core::{
    keys, DynHandler, Error, Metric, Ocr, OcrRequest, OcrResponse, Provider, ProviderHandler,
    Result, SentimentAnalysis, SentimentAnalysisRequest, SentimentAnalysisResponse, SessionConfig,
    Task, Translation, TranslationRequest, TranslationResponse,
};

// ===== mock handlers =====

struct StaticSentiment {
    provider: Provider,
    score: f64,
    delay: Duration,
}

impl StaticSentiment {
    fn boxed(provider: Provider, score: f64) -> (Provider, DynHandler<SentimentAnalysis>) {
        (
            provider,
            Box::new(Self {
                provider,
                score,
                delay: Duration::ZERO,
            }),
        )
    }

    fn boxed_with_delay(
        provider: Provider,
        score: f64,
        delay: Duration,
    ) -> (Provider, DynHandler<SentimentAnalysis>) {
        (
            provider,
            Box::new(Self {
                provider,
                score,
                delay,
            }),
        )
    }
}

#[async_trait]
impl ProviderHandler<SentimentAnalysis> for StaticSentiment {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn execute(&self, _request: &SentimentAnalysisRequest) -> Result<SentimentAnalysisResponse> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(SentimentAnalysisResponse { score: self.score })
    }
}

struct FailingSentiment {
    provider: Provider,
}

impl FailingSentiment {
    fn boxed(provider: Provider) -> (Provider, DynHandler<SentimentAnalysis>) {
        (provider, Box::new(Self { provider }))
    }
}

#[async_trait]
impl ProviderHandler<SentimentAnalysis> for FailingSentiment {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn execute(&self, _request: &SentimentAnalysisRequest) -> Result<SentimentAnalysisResponse> {
        Err(Error::execution(
            self.provider,
            Task::SentimentAnalysis,
            "simulated outage",
        ))
    }
}

struct StaticTranslation {
    provider: Provider,
    text: &'static str,
}

#[async_trait]
impl ProviderHandler<Translation> for StaticTranslation {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn execute(&self, _request: &TranslationRequest) -> Result<TranslationResponse> {
        Ok(TranslationResponse {
            text: self.text.to_string(),
        })
    }
}

struct StaticOcr {
    provider: Provider,
    text: &'static str,
}

#[async_trait]
impl ProviderHandler<Ocr> for StaticOcr {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn execute(&self, _request: &OcrRequest) -> Result<OcrResponse> {
        Ok(OcrResponse {
            all_text: self.text.to_string(),
            bounding_boxes: vec![],
        })
    }
}

fn sentiment_session(
    handlers: Vec<(Provider, DynHandler<SentimentAnalysis>)>,
) -> TaskSession<SentimentAnalysis> {
    TaskSession::from_handlers(handlers, None).unwrap()
}

// ===== selection and routing =====

#[tokio::test]
async fn unpinned_requests_select_the_first_provider_every_time() {
    let session = sentiment_session(vec![
        StaticSentiment::boxed(Provider::Gcp, 0.9),
        StaticSentiment::boxed(Provider::Azure, -0.7),
    ]);

    for _ in 0..5 {
        let (response, metadata) = session
            .request(&SentimentAnalysisRequest::new("text"), None, None)
            .await
            .unwrap();
        assert_eq!(metadata.provider, Provider::Gcp);
        assert_eq!(response.score, 0.9);
    }
}

#[tokio::test]
async fn pinned_requests_route_to_the_pinned_provider() {
    let session = sentiment_session(vec![
        StaticSentiment::boxed(Provider::Gcp, 0.9),
        StaticSentiment::boxed(Provider::Azure, -0.7),
    ]);

    let (response, metadata) = session
        .request(&SentimentAnalysisRequest::new("text"), Some(Provider::Azure), None)
        .await
        .unwrap();

    assert_eq!(metadata.provider, Provider::Azure);
    assert_eq!(response.score, -0.7);
    assert_eq!(metadata.task, Task::SentimentAnalysis);
}

#[tokio::test]
async fn pinning_a_provider_outside_the_session_fails() {
    let session = sentiment_session(vec![StaticSentiment::boxed(Provider::Gcp, 0.5)]);

    let err = session
        .request(&SentimentAnalysisRequest::new("text"), Some(Provider::ModernMt), None)
        .await
        .unwrap_err();

    match err {
        Error::UnknownProvider { provider } => assert_eq!(provider, Provider::ModernMt),
        other => panic!("expected UnknownProvider, got {other:?}"),
    }
}

#[tokio::test]
async fn request_propagates_handler_failures() {
    let session = sentiment_session(vec![FailingSentiment::boxed(Provider::Gcp)]);

    let err = session
        .request(&SentimentAnalysisRequest::new("text"), None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Execution { .. }));
}

// ===== construction =====

#[test]
fn empty_provider_set_is_rejected() {
    match TaskSession::<SentimentAnalysis>::from_handlers(vec![], None) {
        Err(Error::EmptyProviderSet { task }) => assert_eq!(task, Task::SentimentAnalysis),
        other => panic!("expected EmptyProviderSet, got {other:?}"),
    }
}

#[test]
fn registry_construction_succeeds_with_full_config() {
    let config = SessionConfig::new()
        .with_api_key(Provider::ModernMt, "k")
        .set(keys::TARGET_LANGUAGE, "it");

    let session = TaskSession::<Translation>::new(&[Provider::ModernMt], &config).unwrap();
    assert_eq!(session.providers(), &[Provider::ModernMt]);
    assert_eq!(session.task(), Task::Translation);
}

#[test]
fn construction_is_all_or_nothing() {
    // modern_mt is fully configured, gcp is missing its key
    let config = SessionConfig::new()
        .with_api_key(Provider::ModernMt, "k")
        .set(keys::TARGET_LANGUAGE, "it");

    let err = TaskSession::<Translation>::new(&[Provider::ModernMt, Provider::Gcp], &config)
        .unwrap_err();

    match err {
        Error::SessionConstruction {
            task,
            provider,
            source,
        } => {
            assert_eq!(task, Task::Translation);
            assert_eq!(provider, Provider::Gcp);
            assert!(matches!(*source, Error::Configuration { .. }));
        }
        other => panic!("expected SessionConstruction, got {other:?}"),
    }
}

#[test]
fn unsupported_provider_fails_session_construction() {
    let config = SessionConfig::new()
        .with_api_key(Provider::Sentisight, "k")
        .set(keys::TARGET_LANGUAGE, "it");

    let err = TaskSession::<Translation>::new(&[Provider::Sentisight], &config).unwrap_err();
    match err {
        Error::SessionConstruction { source, .. } => {
            assert!(matches!(*source, Error::UnsupportedTask { .. }));
        }
        other => panic!("expected SessionConstruction, got {other:?}"),
    }
}

// ===== evaluate fan-out =====

#[tokio::test]
async fn evaluate_isolates_failing_providers() {
    let session = sentiment_session(vec![
        StaticSentiment::boxed(Provider::Gcp, 0.9),
        StaticSentiment::boxed(Provider::Azure, -0.7),
        FailingSentiment::boxed(Provider::OpenAi),
    ]);

    let results = session
        .evaluate(&SentimentAnalysisRequest::new("text"), None)
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[&Provider::Gcp].0.score, 0.9);
    assert_eq!(results[&Provider::Azure].0.score, -0.7);
    assert!(!results.contains_key(&Provider::OpenAi));
}

#[tokio::test]
async fn evaluate_with_every_provider_failing_returns_an_empty_map() {
    let session = sentiment_session(vec![
        FailingSentiment::boxed(Provider::Gcp),
        FailingSentiment::boxed(Provider::Azure),
    ]);

    let results = session
        .evaluate(&SentimentAnalysisRequest::new("text"), None)
        .await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn evaluate_scores_each_provider_against_the_shared_reference() {
    let session = sentiment_session(vec![
        StaticSentiment::boxed(Provider::Gcp, 0.9),
        StaticSentiment::boxed(Provider::Azure, 0.5),
    ]);
    let reference = SentimentAnalysisResponse { score: 1.0 };

    let results = session
        .evaluate(&SentimentAnalysisRequest::new("text"), Some(&reference))
        .await;

    let gcp_metrics = results[&Provider::Gcp].1.metrics.as_ref().unwrap();
    let azure_metrics = results[&Provider::Azure].1.metrics.as_ref().unwrap();
    assert!((gcp_metrics.metrics[&Metric::ScoreAbsoluteError] - 0.1).abs() < 1e-9);
    assert!((azure_metrics.metrics[&Metric::ScoreAbsoluteError] - 0.5).abs() < 1e-9);
}

// ===== latency =====

#[tokio::test]
async fn latency_covers_the_handler_call() {
    let delay = Duration::from_millis(50);
    let session = sentiment_session(vec![StaticSentiment::boxed_with_delay(
        Provider::Gcp,
        0.1,
        delay,
    )]);

    let (_, metadata) = session
        .request(&SentimentAnalysisRequest::new("text"), None, None)
        .await
        .unwrap();

    assert!(metadata.latency >= delay, "latency was {:?}", metadata.latency);
}

#[tokio::test]
async fn latency_is_recorded_per_provider_in_evaluate() {
    let session = sentiment_session(vec![
        StaticSentiment::boxed_with_delay(Provider::Gcp, 0.1, Duration::from_millis(30)),
        StaticSentiment::boxed(Provider::Azure, 0.2),
    ]);

    let results = session
        .evaluate(&SentimentAnalysisRequest::new("text"), None)
        .await;

    assert!(results[&Provider::Gcp].1.latency >= Duration::from_millis(30));
    assert!(results[&Provider::Azure].1.latency < results[&Provider::Gcp].1.latency);
}

// ===== metrics plumbing =====

#[tokio::test]
async fn no_reference_means_no_metrics() {
    let session = TaskSession::<Ocr>::from_handlers(
        vec![(
            Provider::Sentisight,
            Box::new(StaticOcr {
                provider: Provider::Sentisight,
                text: "HELLO",
            }),
        )],
        None,
    )
    .unwrap();

    let (_, metadata) = session
        .request(&OcrRequest::new(vec![0u8; 4]), None, None)
        .await
        .unwrap();

    assert!(metadata.metrics.is_none());
}

#[tokio::test]
async fn matching_reference_yields_zero_error_rate() {
    let session = TaskSession::<Ocr>::from_handlers(
        vec![(
            Provider::Sentisight,
            Box::new(StaticOcr {
                provider: Provider::Sentisight,
                text: "HELLO",
            }),
        )],
        None,
    )
    .unwrap();
    let reference = OcrResponse {
        all_text: "HELLO".to_string(),
        bounding_boxes: vec![],
    };

    let (_, metadata) = session
        .request(&OcrRequest::new(vec![0u8; 4]), None, Some(&reference))
        .await
        .unwrap();

    let report = metadata.metrics.expect("metrics should be present");
    assert_eq!(report.metrics[&Metric::CharacterErrorRate], 0.0);
}

#[tokio::test]
async fn metrics_failures_never_fail_the_call() {
    let session = TaskSession::<Translation>::from_handlers(
        vec![(
            Provider::ModernMt,
            Box::new(StaticTranslation {
                provider: Provider::ModernMt,
                text: "bonjour",
            }),
        )],
        None,
    )
    .unwrap();
    // whitespace-only reference normalizes to empty and makes scoring fail
    let reference = TranslationResponse {
        text: "   ".to_string(),
    };

    let (response, metadata) = session
        .request(&TranslationRequest::new("hello"), None, Some(&reference))
        .await
        .unwrap();

    assert_eq!(response.text, "bonjour");
    assert!(metadata.metrics.is_none());
}
