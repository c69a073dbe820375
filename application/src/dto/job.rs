use serde::{Deserialize, Serialize};
use validator::Validate;

use scribe_domain::{Transcription, Translation};

/// Inbound job request as it appears on the wire.
///
/// `is_translate` keeps the lenient string-typed flag of the original
/// contract; it is parsed into [`JobMode`] immediately after validation
/// and never consulted again.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TranscriptionJobRequest {
    #[validate(length(min = 1, max = 1024))]
    pub key: String,
    #[serde(default)]
    pub is_translate: Option<String>,
    #[serde(default)]
    pub translate_to: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobMode {
    Transcribe,
    Translate,
}

impl TranscriptionJobRequest {
    /// Only the exact text `"true"` selects translation mode; any other
    /// value, including absence, means transcription.
    pub fn mode(&self) -> JobMode {
        if self.is_translate.as_deref() == Some("true") {
            JobMode::Translate
        } else {
            JobMode::Transcribe
        }
    }

    pub fn into_transcribe_request(self) -> TranscribeJobRequest {
        TranscribeJobRequest { key: self.key }
    }

    pub fn into_translate_request(self) -> TranslateJobRequest {
        TranslateJobRequest {
            key: self.key,
            target_language: self.translate_to.unwrap_or_else(|| "English".to_string()),
            transcript_payload: self.transcript.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscribeJobRequest {
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct TranslateJobRequest {
    pub key: String,
    pub target_language: String,
    pub transcript_payload: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub message: String,
    pub result: JobResult,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum JobResult {
    Transcription(Transcription),
    Translation(Translation),
}
