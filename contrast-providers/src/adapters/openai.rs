use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use contrast_core::{
    Provider, ProviderHandler, Result, SessionConfig, Task, Transcription, TranscriptionRequest,
    TranscriptionResponse,
};

use crate::adapters::{base_endpoint, read_json, send};
use crate::source::load_media;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
const TRANSCRIPTION_MODEL: &str = "whisper-1";

pub struct OpenAiTranscription {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiTranscription {
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key(Provider::OpenAi)?.to_string(),
            endpoint: base_endpoint(config, Provider::OpenAi, DEFAULT_ENDPOINT),
        })
    }
}

#[derive(Deserialize)]
struct TranscriptionReply {
    text: String,
}

#[async_trait]
impl ProviderHandler<Transcription> for OpenAiTranscription {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn execute(&self, request: &TranscriptionRequest) -> Result<TranscriptionResponse> {
        let audio = load_media(&self.client, &request.audio).await?;

        let form = Form::new()
            .text("model", TRANSCRIPTION_MODEL)
            .part("file", Part::bytes(audio).file_name(request.audio.file_name()));

        let url = format!("{}/v1/audio/transcriptions", self.endpoint);
        let response = send(
            Provider::OpenAi,
            Task::Transcription,
            self.client
                .post(&url)
                .bearer_auth(&self.api_key)
                .multipart(form),
        )
        .await?;
        let reply: TranscriptionReply =
            read_json(Provider::OpenAi, Task::Transcription, response).await?;

        Ok(TranscriptionResponse { text: reply.text })
    }
}
