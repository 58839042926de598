use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use contrast_core::{
    Error, Provider, ProviderHandler, Result, SessionConfig, Task, Translation,
    TranslationRequest, TranslationResponse,
};

use crate::adapters::{base_endpoint, read_json, send};

const DEFAULT_ENDPOINT: &str = "https://api.modernmt.com";
const API_KEY_HEADER: &str = "MMT-ApiKey";

pub struct ModernMtTranslation {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    target_language: String,
    source_language: Option<String>,
}

impl ModernMtTranslation {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::ModernMt)?.to_string(),
            endpoint: base_endpoint(config, Provider::ModernMt, DEFAULT_ENDPOINT),
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
    translation: String,
}

#[async_trait]
impl ProviderHandler<Translation> for ModernMtTranslation {
    fn provider(&self) -> Provider {
        Provider::ModernMt
    }

    async fn execute(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        let url = format!("{}/translate", self.endpoint);
        let mut payload = json!({
            "q": request.text,
            "target": self.target_language,
        });
        if let Some(source) = &self.source_language {
            payload["source"] = json!(source);
        }

        let response = send(
            Provider::ModernMt,
            Task::Translation,
            self.client
                .post(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .json(&payload),
        )
        .await?;
        let reply: TranslateReply =
            read_json(Provider::ModernMt, Task::Translation, response).await?;

        if reply.data.translation.is_empty() {
            return Err(Error::execution(
                Provider::ModernMt,
                Task::Translation,
                "empty translation result",
            ));
        }

        Ok(TranslationResponse {
            text: reply.data.translation,
        })
    }
}
