use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use scribe_domain::{languages, RecordStorePort, Translation, TranslationPort};

use crate::{ApplicationError, TranslateJobRequest};

#[async_trait]
pub trait TranslateUseCase: Send + Sync {
    async fn translate(
        &self,
        request: TranslateJobRequest,
    ) -> Result<Translation, ApplicationError>;
}

pub struct TranslateUseCaseImpl {
    translator: Arc<dyn TranslationPort>,
    records: Arc<dyn RecordStorePort>,
}

impl TranslateUseCaseImpl {
    pub fn new(translator: Arc<dyn TranslationPort>, records: Arc<dyn RecordStorePort>) -> Self {
        Self {
            translator,
            records,
        }
    }
}

#[async_trait]
impl TranslateUseCase for TranslateUseCaseImpl {
    async fn translate(
        &self,
        request: TranslateJobRequest,
    ) -> Result<Translation, ApplicationError> {
        let TranslateJobRequest {
            key,
            target_language,
            transcript_payload,
        } = request;

        let Some(locale) = languages::locale_for(&target_language) else {
            return Err(ApplicationError::validation(format!(
                "{target_language} is not a supported target language"
            )));
        };
        let english_text = extract_english(&transcript_payload)?;

        tracing::debug!(
            key = %key,
            target_language = %target_language,
            locale,
            "starting translation job"
        );

        let translated = self.translator.translate(&english_text, locale).await?;
        let translation = Translation {
            language: target_language,
            transcript: translated,
        };
        self.records.attach_translation(&key, &translation).await?;

        tracing::debug!(key = %key, language = %translation.language, "translation job completed");
        Ok(translation)
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptPayload {
    #[serde(default)]
    english: String,
}

fn extract_english(payload: &str) -> Result<String, ApplicationError> {
    if payload.trim().is_empty() {
        return Err(ApplicationError::validation(
            "an English transcript is required for translation",
        ));
    }
    let parsed: TranscriptPayload = serde_json::from_str(payload).map_err(|err| {
        ApplicationError::validation(format!("transcript payload is not valid JSON: {err}"))
    })?;
    if parsed.english.trim().is_empty() {
        return Err(ApplicationError::validation(
            "transcript payload has no english text",
        ));
    }
    Ok(parsed.english)
}
