use contrast_core::{Error, MediaSource, Result};

/// Resolves a media reference to raw bytes.
///
/// URLs are fetched with the handler's HTTP client, paths are read from
/// disk, bytes pass through untouched.
pub async fn load_media(client: &reqwest::Client, source: &MediaSource) -> Result<Vec<u8>> {
    match source {
        MediaSource::Url(url) => {
            let response = client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| Error::Http(format!("fetching {url}: {e}")))?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::Http(format!("fetching {url}: {status}")));
            }
            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::Http(format!("reading {url}: {e}")))?;
            Ok(bytes.to_vec())
        }
        MediaSource::Path(path) => Ok(tokio::fs::read(path).await?),
        MediaSource::Bytes(bytes) => Ok(bytes.clone()),
    }
}
