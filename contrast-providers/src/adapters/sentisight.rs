use async_trait::async_trait;
use serde::Deserialize;

use contrast_core::{
    Ocr, OcrBoundingBox, OcrRequest, OcrResponse, Provider, ProviderHandler, Result,
    SessionConfig, Task,
};

use crate::adapters::{base_endpoint, read_json, send};
use crate::source::load_media;

const DEFAULT_ENDPOINT: &str = "https://platform.sentisight.ai";
const API_KEY_HEADER: &str = "X-Auth-token";

pub struct SentisightOcr {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    language: String,
}

impl SentisightOcr {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Sentisight)?.to_string(),
            endpoint: base_endpoint(config, Provider::Sentisight, DEFAULT_ENDPOINT),
            language: config.source_language().unwrap_or("en").to_string(),
        })
    }
}

#[derive(Deserialize)]
struct TextSegment {
    label: String,
    #[serde(default)]
    points: Vec<SegmentPoint>,
}

#[derive(Deserialize)]
struct SegmentPoint {
    x: i32,
    y: i32,
}

#[async_trait]
impl ProviderHandler<Ocr> for SentisightOcr {
    fn provider(&self) -> Provider {
        Provider::Sentisight
    }

    async fn execute(&self, request: &OcrRequest) -> Result<OcrResponse> {
        let image = load_media(&self.client, &request.image).await?;

        let url = format!("{}/api/pm-predict/Text-recognition", self.endpoint);
        let response = send(
            Provider::Sentisight,
            Task::Ocr,
            self.client
                .post(&url)
                .query(&[("lang", self.language.as_str())])
                .header(API_KEY_HEADER, &self.api_key)
                .header("Content-Type", "application/octet-stream")
                .body(image),
        )
        .await?;
        let segments: Vec<TextSegment> = read_json(Provider::Sentisight, Task::Ocr, response).await?;

        let all_text = segments
            .iter()
            .map(|segment| segment.label.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let bounding_boxes = segments
            .into_iter()
            .map(|segment| OcrBoundingBox {
                coordinates: segment.points.iter().map(|p| (p.x, p.y)).collect(),
                text: segment.label,
            })
            .collect();

        Ok(OcrResponse {
            all_text,
            bounding_boxes,
        })
    }
}
