use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use contrast_core::{
    keys, DocumentReconstruction, DocumentReconstructionRequest, DocumentReconstructionResponse,
    Error, Ocr, OcrBoundingBox, OcrRequest, OcrResponse, Provider, ProviderHandler, Result,
    SentimentAnalysis, SentimentAnalysisRequest, SentimentAnalysisResponse, SessionConfig, Task,
    Transcription, TranscriptionRequest, TranscriptionResponse, Translation, TranslationRequest,
    TranslationResponse,
};

use crate::adapters::{base_endpoint, read_json, send};
use crate::source::load_media;

const DEFAULT_TRANSLATOR_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";
const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

const ANALYZE_POLL_INTERVAL: Duration = Duration::from_millis(500);
const ANALYZE_MAX_POLLS: usize = 60;

fn cognitive_endpoint(config: &SessionConfig, region: &str) -> String {
    base_endpoint(
        config,
        Provider::Azure,
        &format!("https://{region}.api.cognitive.microsoft.com"),
    )
}

// Task::SentimentAnalysis

pub struct AzureSentimentAnalysis {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl AzureSentimentAnalysis {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let region = config.require(keys::AZURE_REGION)?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Azure)?.to_string(),
            endpoint: cognitive_endpoint(config, region),
        })
    }
}

#[derive(Deserialize)]
struct SentimentReply {
    results: SentimentResults,
}

#[derive(Deserialize)]
struct SentimentResults {
    documents: Vec<SentimentDocument>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SentimentDocument {
    confidence_scores: ConfidenceScores,
}

#[derive(Deserialize)]
struct ConfidenceScores {
    positive: f64,
    negative: f64,
}

#[async_trait]
impl ProviderHandler<SentimentAnalysis> for AzureSentimentAnalysis {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    async fn execute(&self, request: &SentimentAnalysisRequest) -> Result<SentimentAnalysisResponse> {
        let url = format!("{}/language/:analyze-text", self.endpoint);
        let payload = json!({
            "kind": "SentimentAnalysis",
            "analysisInput": {
                "documents": [{"id": "1", "language": "en", "text": request.text}],
            },
        });

        let response = send(
            Provider::Azure,
            Task::SentimentAnalysis,
            self.client
                .post(&url)
                .query(&[("api-version", "2023-04-01")])
                .header(API_KEY_HEADER, &self.api_key)
                .json(&payload),
        )
        .await?;
        let reply: SentimentReply =
            read_json(Provider::Azure, Task::SentimentAnalysis, response).await?;

        let document = reply.results.documents.into_iter().next().ok_or_else(|| {
            Error::execution(
                Provider::Azure,
                Task::SentimentAnalysis,
                "empty sentiment result",
            )
        })?;

        Ok(SentimentAnalysisResponse {
            score: document.confidence_scores.positive - document.confidence_scores.negative,
        })
    }
}

// Task::Translation

pub struct AzureTranslation {
    client: reqwest::Client,
    api_key: String,
    region: String,
    endpoint: String,
    target_language: String,
    source_language: Option<String>,
}

impl AzureTranslation {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Azure)?.to_string(),
            region: config.require(keys::AZURE_REGION)?.to_string(),
            endpoint: base_endpoint(config, Provider::Azure, DEFAULT_TRANSLATOR_ENDPOINT),
            target_language: config.target_language()?.to_string(),
            source_language: config.source_language().map(str::to_string),
        })
    }
}

#[derive(Deserialize)]
struct TranslateItem {
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
struct TranslatedText {
    text: String,
}

#[async_trait]
impl ProviderHandler<Translation> for AzureTranslation {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    async fn execute(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        let url = format!("{}/translate", self.endpoint);
        let mut query = vec![
            ("api-version".to_string(), "3.0".to_string()),
            ("to".to_string(), self.target_language.clone()),
        ];
        if let Some(source) = &self.source_language {
            query.push(("from".to_string(), source.clone()));
        }

        let response = send(
            Provider::Azure,
            Task::Translation,
            self.client
                .post(&url)
                .query(&query)
                .header(API_KEY_HEADER, &self.api_key)
                .header(REGION_HEADER, &self.region)
                .json(&json!([{"text": request.text}])),
        )
        .await?;
        let reply: Vec<TranslateItem> =
            read_json(Provider::Azure, Task::Translation, response).await?;

        let text = reply
            .into_iter()
            .next()
            .and_then(|item| item.translations.into_iter().next())
            .map(|t| t.text)
            .ok_or_else(|| {
                Error::execution(Provider::Azure, Task::Translation, "empty translation result")
            })?;

        Ok(TranslationResponse { text })
    }
}

// Task::Ocr

pub struct AzureOcr {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl AzureOcr {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let region = config.require(keys::AZURE_REGION)?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Azure)?.to_string(),
            endpoint: cognitive_endpoint(config, region),
        })
    }
}

#[derive(Deserialize)]
struct OcrReply {
    #[serde(default)]
    regions: Vec<OcrRegion>,
}

#[derive(Deserialize)]
struct OcrRegion {
    #[serde(default)]
    lines: Vec<OcrLine>,
}

#[derive(Deserialize)]
struct OcrLine {
    #[serde(default)]
    words: Vec<OcrWord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OcrWord {
    bounding_box: String,
    text: String,
}

/// Azure reports word boxes as `"left,top,width,height"`.
fn parse_bounding_box(raw: &str) -> Result<Vec<(i32, i32)>> {
    let parts: Vec<i32> = raw
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| {
            Error::execution(Provider::Azure, Task::Ocr, format!("malformed bounding box `{raw}`"))
        })?;
    if parts.len() != 4 {
        return Err(Error::execution(
            Provider::Azure,
            Task::Ocr,
            format!("malformed bounding box `{raw}`"),
        ));
    }
    let (left, top, width, height) = (parts[0], parts[1], parts[2], parts[3]);
    Ok(vec![
        (left, top),
        (left + width, top),
        (left + width, top + height),
        (left, top + height),
    ])
}

#[async_trait]
impl ProviderHandler<Ocr> for AzureOcr {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    async fn execute(&self, request: &OcrRequest) -> Result<OcrResponse> {
        let image = load_media(&self.client, &request.image).await?;

        let url = format!("{}/vision/v3.2/ocr", self.endpoint);
        let response = send(
            Provider::Azure,
            Task::Ocr,
            self.client
                .post(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .header("Content-Type", "application/octet-stream")
                .body(image),
        )
        .await?;
        let reply: OcrReply = read_json(Provider::Azure, Task::Ocr, response).await?;

        let mut lines = Vec::new();
        let mut bounding_boxes = Vec::new();
        for region in reply.regions {
            for line in region.lines {
                let mut words = Vec::with_capacity(line.words.len());
                for word in line.words {
                    bounding_boxes.push(OcrBoundingBox {
                        text: word.text.clone(),
                        coordinates: parse_bounding_box(&word.bounding_box)?,
                    });
                    words.push(word.text);
                }
                lines.push(words.join(" "));
            }
        }

        Ok(OcrResponse {
            all_text: lines.join("\n"),
            bounding_boxes,
        })
    }
}

// Task::Transcription

pub struct AzureTranscription {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    language: String,
}

impl AzureTranscription {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let region = config.require(keys::AZURE_REGION)?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Azure)?.to_string(),
            endpoint: base_endpoint(
                config,
                Provider::Azure,
                &format!("https://{region}.stt.speech.microsoft.com"),
            ),
            language: config.source_language().unwrap_or("en-US").to_string(),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpeechReply {
    recognition_status: String,
    #[serde(default)]
    display_text: String,
}

#[async_trait]
impl ProviderHandler<Transcription> for AzureTranscription {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    async fn execute(&self, request: &TranscriptionRequest) -> Result<TranscriptionResponse> {
        let audio = load_media(&self.client, &request.audio).await?;

        let url = format!(
            "{}/speech/recognition/conversation/cognitiveservices/v1",
            self.endpoint
        );
        let response = send(
            Provider::Azure,
            Task::Transcription,
            self.client
                .post(&url)
                .query(&[("language", self.language.as_str())])
                .header(API_KEY_HEADER, &self.api_key)
                .header("Content-Type", "audio/wav")
                .body(audio),
        )
        .await?;
        let reply: SpeechReply = read_json(Provider::Azure, Task::Transcription, response).await?;

        if reply.recognition_status != "Success" {
            return Err(Error::execution(
                Provider::Azure,
                Task::Transcription,
                format!("recognition status {}", reply.recognition_status),
            ));
        }

        Ok(TranscriptionResponse {
            text: reply.display_text,
        })
    }
}

// Task::DocumentReconstruction

pub struct AzureDocumentReconstruction {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl AzureDocumentReconstruction {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let region = config.require(keys::AZURE_REGION)?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Azure)?.to_string(),
            endpoint: cognitive_endpoint(config, region),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeStatus {
    status: String,
    analyze_result: Option<AnalyzeResult>,
}

#[derive(Deserialize)]
struct AnalyzeResult {
    content: String,
}

#[async_trait]
impl ProviderHandler<DocumentReconstruction> for AzureDocumentReconstruction {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    async fn execute(
        &self,
        request: &DocumentReconstructionRequest,
    ) -> Result<DocumentReconstructionResponse> {
        let document = load_media(&self.client, &request.document).await?;

        let url = format!(
            "{}/documentintelligence/documentModels/prebuilt-layout:analyze",
            self.endpoint
        );
        let response = send(
            Provider::Azure,
            Task::DocumentReconstruction,
            self.client
                .post(&url)
                .query(&[
                    ("api-version", "2024-02-29-preview"),
                    ("outputContentFormat", "markdown"),
                ])
                .header(API_KEY_HEADER, &self.api_key)
                .header("Content-Type", "application/octet-stream")
                .body(document),
        )
        .await?;

        let operation_url = response
            .headers()
            .get("operation-location")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::execution(
                    Provider::Azure,
                    Task::DocumentReconstruction,
                    "missing operation-location header",
                )
            })?;

        // Analysis is asynchronous on the vendor side; poll until it
        // settles.
        for _ in 0..ANALYZE_MAX_POLLS {
            let response = send(
                Provider::Azure,
                Task::DocumentReconstruction,
                self.client
                    .get(&operation_url)
                    .header(API_KEY_HEADER, &self.api_key),
            )
            .await?;
            let status: AnalyzeStatus =
                read_json(Provider::Azure, Task::DocumentReconstruction, response).await?;

            match status.status.as_str() {
                "succeeded" => {
                    let content = status.analyze_result.map(|r| r.content).ok_or_else(|| {
                        Error::execution(
                            Provider::Azure,
                            Task::DocumentReconstruction,
                            "succeeded without analyzeResult",
                        )
                    })?;
                    return Ok(DocumentReconstructionResponse { markdown: content });
                }
                "failed" => {
                    return Err(Error::execution(
                        Provider::Azure,
                        Task::DocumentReconstruction,
                        "analysis failed",
                    ));
                }
                _ => tokio::time::sleep(ANALYZE_POLL_INTERVAL).await,
            }
        }

        Err(Error::execution(
            Provider::Azure,
            Task::DocumentReconstruction,
            "timed out waiting for analysis",
        ))
    }
}
