use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of vendor backends.
///
/// Which tasks each provider can serve is declared by the registry's
/// capability table, not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    // major cloud providers
    Gcp,
    Azure,

    // translation providers
    ModernMt,

    // transcription providers
    OpenAi,

    // ocr providers
    Sentisight,
    #[serde(rename = "api4ai")]
    Api4Ai,
}

impl Provider {
    pub const ALL: [Provider; 6] = [
        Provider::Gcp,
        Provider::Azure,
        Provider::ModernMt,
        Provider::OpenAi,
        Provider::Sentisight,
        Provider::Api4Ai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gcp => "gcp",
            Provider::Azure => "azure",
            Provider::ModernMt => "modern_mt",
            Provider::OpenAi => "open_ai",
            Provider::Sentisight => "sentisight",
            Provider::Api4Ai => "api4ai",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
