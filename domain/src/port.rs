use async_trait::async_trait;

use crate::{AudioClip, DetectedTranscript, DomainError, Transcription, Translation};

/// Object storage holding the audio objects and, in archive mode, the
/// uploaded transcript files.
#[async_trait]
pub trait ObjectStorePort: Send + Sync {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, DomainError>;
    async fn store(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError>;
}

/// Decodes raw stored audio bytes into the model-ready representation.
pub trait AudioDecoderPort: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<AudioClip, DomainError>;
}

/// Pretrained speech model: language detection plus decoding, and the
/// model's own translate-to-English task as a separate invocation.
#[async_trait]
pub trait SpeechModelPort: Send + Sync {
    async fn transcribe(&self, audio: &AudioClip) -> Result<DetectedTranscript, DomainError>;
    async fn translate_to_english(&self, audio: &AudioClip) -> Result<String, DomainError>;
}

/// Pretrained text translation model. `target_locale` must be one of the
/// locale codes from [`crate::languages::SUPPORTED_LANGUAGES`].
#[async_trait]
pub trait TranslationPort: Send + Sync {
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String, DomainError>;
}

/// Durable record store keyed by the audio object's key.
///
/// `put_transcription` creates the record; `attach_translation` updates
/// it in place and must fail with [`DomainError::NotFound`] when no
/// record exists for the key.
#[async_trait]
pub trait RecordStorePort: Send + Sync {
    async fn put_transcription(
        &self,
        key: &str,
        transcription: &Transcription,
    ) -> Result<(), DomainError>;
    async fn attach_translation(
        &self,
        key: &str,
        translation: &Translation,
    ) -> Result<(), DomainError>;
}

/// Where a finished transcription goes: the record store, or a text file
/// uploaded next to the audio object.
#[async_trait]
pub trait TranscriptSink: Send + Sync {
    async fn persist(&self, key: &str, transcription: &Transcription) -> Result<(), DomainError>;
}
