pub mod api4ai;
pub mod azure;
pub mod gcp;
pub mod modernmt;
pub mod openai;
pub mod sentisight;

pub use api4ai::*;
pub use azure::*;
pub use gcp::*;
pub use modernmt::*;
pub use openai::*;
pub use sentisight::*;

use contrast_core::{Error, Provider, Result, SessionConfig, Task};
use serde::de::DeserializeOwned;

/// Vendor base URL, honoring the per-provider endpoint override used by
/// tests.
pub(crate) fn base_endpoint(config: &SessionConfig, provider: Provider, default: &str) -> String {
    config
        .endpoint_override(provider)
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

/// Sends a vendor request and turns transport failures and non-success
/// statuses into execution errors carrying the response body.
pub(crate) async fn send(
    provider: Provider,
    task: Task,
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::execution(provider, task, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::execution(provider, task, format!("{status}: {body}")));
    }
    Ok(response)
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: Provider,
    task: Task,
    response: reqwest::Response,
) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| Error::execution(provider, task, format!("malformed response: {e}")))
}
