use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use contrast_core::{
    Ocr, OcrRequest, OcrResponse, Provider, ProviderHandler, Result, SessionConfig, Task,
};

use crate::adapters::{base_endpoint, read_json, send};
use crate::source::load_media;

const DEFAULT_ENDPOINT: &str = "https://ocr43.p.rapidapi.com";
const API_KEY_HEADER: &str = "X-RapidAPI-Key";

pub struct Api4AiOcr {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl Api4AiOcr {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::Api4Ai)?.to_string(),
            endpoint: base_endpoint(config, Provider::Api4Ai, DEFAULT_ENDPOINT),
        })
    }
}

#[derive(Deserialize)]
struct OcrReply {
    #[serde(default)]
    results: Vec<OcrResult>,
}

#[derive(Deserialize)]
struct OcrResult {
    #[serde(default)]
    entities: Vec<EntityGroup>,
}

#[derive(Deserialize)]
struct EntityGroup {
    #[serde(default)]
    objects: Vec<EntityObject>,
}

#[derive(Deserialize)]
struct EntityObject {
    #[serde(default)]
    entities: Vec<Entity>,
}

#[derive(Deserialize)]
struct Entity {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ProviderHandler<Ocr> for Api4AiOcr {
    fn provider(&self) -> Provider {
        Provider::Api4Ai
    }

    async fn execute(&self, request: &OcrRequest) -> Result<OcrResponse> {
        let image = load_media(&self.client, &request.image).await?;

        let form = Form::new().part(
            "image",
            Part::bytes(image).file_name(request.image.file_name()),
        );

        let url = format!("{}/v1/results", self.endpoint);
        let response = send(
            Provider::Api4Ai,
            Task::Ocr,
            self.client
                .post(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .multipart(form),
        )
        .await?;
        let reply: OcrReply = read_json(Provider::Api4Ai, Task::Ocr, response).await?;

        let mut fragments = Vec::new();
        for result in reply.results {
            for group in result.entities {
                for object in group.objects {
                    for entity in object.entities {
                        if !entity.text.is_empty() {
                            fragments.push(entity.text);
                        }
                    }
                }
            }
        }

        Ok(OcrResponse {
            all_text: fragments.join("\n"),
            // api4ai only reports whole-object boxes, not per-fragment
            // polygons
            bounding_boxes: Vec::new(),
        })
    }
}
