pub mod config;
pub mod document_reconstruction;
pub mod metadata;
pub mod ocr;
pub mod provider;
pub mod sentiment_analysis;
pub mod source;
pub mod task;
pub mod transcription;
pub mod translation;

pub use config::*;
pub use document_reconstruction::*;
pub use metadata::*;
pub use ocr::*;
pub use provider::*;
pub use sentiment_analysis::*;
pub use source::*;
pub use task::*;
pub use transcription::*;
pub use translation::*;
