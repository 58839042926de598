use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use contrast_core::{
    Error, Ocr, OcrBoundingBox, OcrRequest, OcrResponse, Provider, ProviderHandler, Result,
    SentimentAnalysis, SentimentAnalysisRequest, SentimentAnalysisResponse, SessionConfig, Task,
    Translation, TranslationRequest, TranslationResponse,
};

use crate::adapters::{base_endpoint, read_json, send};
use crate::source::load_media;

const DEFAULT_LANGUAGE_ENDPOINT: &str = "https://language.googleapis.com";
const DEFAULT_TRANSLATION_ENDPOINT: &str = "https://translation.googleapis.com";
const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com";

// Task::SentimentAnalysis

pub struct GcpSentimentAnalysis {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GcpSentimentAnalysis {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Gcp)?.to_string(),
            endpoint: base_endpoint(config, Provider::Gcp, DEFAULT_LANGUAGE_ENDPOINT),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentReply {
    document_sentiment: DocumentSentiment,
}

#[derive(Deserialize)]
struct DocumentSentiment {
    score: f64,
}

#[async_trait]
impl ProviderHandler<SentimentAnalysis> for GcpSentimentAnalysis {
    fn provider(&self) -> Provider {
        Provider::Gcp
    }

    async fn execute(&self, request: &SentimentAnalysisRequest) -> Result<SentimentAnalysisResponse> {
        let url = format!("{}/v1/documents:analyzeSentiment", self.endpoint);
        let payload = json!({
            "document": {"type": "PLAIN_TEXT", "content": request.text},
            "encodingType": "UTF8",
        });

        let response = send(
            Provider::Gcp,
            Task::SentimentAnalysis,
            self.client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&payload),
        )
        .await?;
        let reply: AnalyzeSentimentReply =
            read_json(Provider::Gcp, Task::SentimentAnalysis, response).await?;

        Ok(SentimentAnalysisResponse {
            score: reply.document_sentiment.score,
        })
    }
}

// Task::Translation

pub struct GcpTranslation {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    target_language: String,
    source_language: Option<String>,
}

impl GcpTranslation {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Gcp)?.to_string(),
            endpoint: base_endpoint(config, Provider::Gcp, DEFAULT_TRANSLATION_ENDPOINT),
            target_language: config.target_language()?.to_string(),
            source_language: config.source_language().map(str::to_string),
        })
    }
}

#[derive(Deserialize)]
struct TranslateReply {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<TranslatedItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedItem {
    translated_text: String,
}

#[async_trait]
impl ProviderHandler<Translation> for GcpTranslation {
    fn provider(&self) -> Provider {
        Provider::Gcp
    }

    async fn execute(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        let url = format!("{}/language/translate/v2", self.endpoint);
        let mut payload = json!({
            "q": request.text,
            "target": self.target_language,
            "format": "text",
        });
        if let Some(source) = &self.source_language {
            payload["source"] = json!(source);
        }

        let response = send(
            Provider::Gcp,
            Task::Translation,
            self.client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&payload),
        )
        .await?;
        let reply: TranslateReply = read_json(Provider::Gcp, Task::Translation, response).await?;

        let translation = reply.data.translations.into_iter().next().ok_or_else(|| {
            Error::execution(Provider::Gcp, Task::Translation, "empty translation result")
        })?;

        Ok(TranslationResponse {
            text: translation.translated_text,
        })
    }
}

// Task::Ocr

pub struct GcpOcr {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GcpOcr {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Gcp)?.to_string(),
            endpoint: base_endpoint(config, Provider::Gcp, DEFAULT_VISION_ENDPOINT),
        })
    }
}

#[derive(Deserialize)]
struct AnnotateReply {
    responses: Vec<AnnotateResponse>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AnnotateResponse {
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    error: Option<GcpStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextAnnotation {
    description: String,
    bounding_poly: Option<BoundingPoly>,
}

#[derive(Deserialize)]
struct BoundingPoly {
    #[serde(default)]
    vertices: Vec<Vertex>,
}

#[derive(Deserialize)]
struct Vertex {
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
}

#[derive(Deserialize)]
struct GcpStatus {
    message: String,
}

#[async_trait]
impl ProviderHandler<Ocr> for GcpOcr {
    fn provider(&self) -> Provider {
        Provider::Gcp
    }

    async fn execute(&self, request: &OcrRequest) -> Result<OcrResponse> {
        let image = load_media(&self.client, &request.image).await?;

        let url = format!("{}/v1/images:annotate", self.endpoint);
        let payload = json!({
            "requests": [{
                "image": {"content": BASE64.encode(&image)},
                "features": [{"type": "TEXT_DETECTION"}],
            }],
        });

        let response = send(
            Provider::Gcp,
            Task::Ocr,
            self.client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&payload),
        )
        .await?;
        let reply: AnnotateReply = read_json(Provider::Gcp, Task::Ocr, response).await?;

        let annotation = reply.responses.into_iter().next().unwrap_or_default();
        if let Some(error) = annotation.error {
            return Err(Error::execution(Provider::Gcp, Task::Ocr, error.message));
        }

        // The first annotation carries the whole-image text; the rest are
        // per-fragment boxes.
        let mut annotations = annotation.text_annotations.into_iter();
        let all_text = annotations
            .next()
            .map(|a| a.description.trim().to_string())
            .unwrap_or_default();
        let bounding_boxes = annotations
            .map(|a| OcrBoundingBox {
                text: a.description,
                coordinates: a
                    .bounding_poly
                    .map(|poly| poly.vertices.iter().map(|v| (v.x, v.y)).collect())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(OcrResponse {
            all_text,
            bounding_boxes,
        })
    }
}
