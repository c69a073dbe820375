use serde::{Deserialize, Serialize};

/// Status value written to a job record once its result is persisted.
pub const STATUS_COMPLETE: &str = "COMPLETE";

/// Result of running the speech model over a stored audio object.
///
/// `english` equals `transcript` when the detected language is already
/// English; otherwise it holds the model's translate-to-English rendition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcription {
    pub language: String,
    pub transcript: String,
    pub english: String,
}

impl Transcription {
    pub fn is_english(&self) -> bool {
        self.language == crate::languages::ENGLISH
    }
}

/// Result of translating an English transcript into a target language.
///
/// `language` is the human-readable target language name as requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub language: String,
    pub transcript: String,
}

/// Durable record for one audio object, keyed by its object-storage key.
///
/// Created once by a transcription, then optionally extended in place by
/// translations; the key never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub key: String,
    #[serde(rename = "statusCode")]
    pub status_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated: Option<Translation>,
}

impl JobRecord {
    pub fn completed(key: impl Into<String>, transcription: Transcription) -> Self {
        Self {
            key: key.into(),
            status_code: STATUS_COMPLETE.to_string(),
            transcript: Some(transcription),
            translated: None,
        }
    }
}

/// Model-ready audio: mono f32 samples at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub sample_rate_hz: u32,
    pub samples: Vec<f32>,
}

impl AudioClip {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate_hz == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate_hz as f32
    }
}

/// Transcript decoded in the language the speech model detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTranscript {
    pub language: String,
    pub text: String,
}
