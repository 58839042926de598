use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// A reference to binary media (image, audio, document) handed to a task
/// request. Adapters resolve it to raw bytes before calling the vendor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    Url(Url),
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl MediaSource {
    /// File name to report to vendors that want one (multipart uploads).
    pub fn file_name(&self) -> String {
        match self {
            MediaSource::Url(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|name| !name.is_empty())
                .unwrap_or("upload")
                .to_string(),
            MediaSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string()),
            MediaSource::Bytes(_) => "upload".to_string(),
        }
    }
}

impl From<Url> for MediaSource {
    fn from(url: Url) -> Self {
        MediaSource::Url(url)
    }
}

impl From<PathBuf> for MediaSource {
    fn from(path: PathBuf) -> Self {
        MediaSource::Path(path)
    }
}

impl From<Vec<u8>> for MediaSource {
    fn from(bytes: Vec<u8>) -> Self {
        MediaSource::Bytes(bytes)
    }
}
