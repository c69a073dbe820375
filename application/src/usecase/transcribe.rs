use std::sync::Arc;

use async_trait::async_trait;

use scribe_domain::{
    languages, AudioDecoderPort, ObjectStorePort, SpeechModelPort, Transcription, TranscriptSink,
};

use crate::{ApplicationError, TranscribeJobRequest};

#[async_trait]
pub trait TranscribeUseCase: Send + Sync {
    async fn transcribe(
        &self,
        request: TranscribeJobRequest,
    ) -> Result<Transcription, ApplicationError>;
}

pub struct TranscribeUseCaseImpl {
    object_store: Arc<dyn ObjectStorePort>,
    decoder: Arc<dyn AudioDecoderPort>,
    speech: Arc<dyn SpeechModelPort>,
    sink: Arc<dyn TranscriptSink>,
}

impl TranscribeUseCaseImpl {
    pub fn new(
        object_store: Arc<dyn ObjectStorePort>,
        decoder: Arc<dyn AudioDecoderPort>,
        speech: Arc<dyn SpeechModelPort>,
        sink: Arc<dyn TranscriptSink>,
    ) -> Self {
        Self {
            object_store,
            decoder,
            speech,
            sink,
        }
    }
}

#[async_trait]
impl TranscribeUseCase for TranscribeUseCaseImpl {
    async fn transcribe(
        &self,
        request: TranscribeJobRequest,
    ) -> Result<Transcription, ApplicationError> {
        let TranscribeJobRequest { key } = request;
        tracing::debug!(key = %key, "starting transcription job");

        let bytes = self.object_store.fetch(&key).await?;
        let audio = self.decoder.decode(&bytes)?;
        tracing::debug!(
            key = %key,
            duration_secs = audio.duration_secs(),
            "audio decoded"
        );

        let detected = self.speech.transcribe(&audio).await?;
        let english = if detected.language == languages::ENGLISH {
            detected.text.clone()
        } else {
            self.speech.translate_to_english(&audio).await?
        };

        let transcription = Transcription {
            language: detected.language,
            transcript: detected.text,
            english,
        };
        self.sink.persist(&key, &transcription).await?;

        tracing::debug!(
            key = %key,
            language = %transcription.language,
            "transcription job completed"
        );
        Ok(transcription)
    }
}
