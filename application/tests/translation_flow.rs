use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use scribe_application::{
    ApplicationError, TranslateJobRequest, TranslateUseCase, TranslateUseCaseImpl,
};
use scribe_domain::{
    DomainError, JobRecord, RecordStorePort, Transcription, Translation, TranslationPort,
};

struct UppercasingTranslator {
    calls: AtomicUsize,
}

impl UppercasingTranslator {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TranslationPort for UppercasingTranslator {
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{target_locale}] {}", text.to_uppercase()))
    }
}

/// In-memory record store with the same create/update semantics as the
/// real one: updates require an existing record and never drop fields.
#[derive(Default)]
struct InMemoryRecordStore {
    records: Mutex<HashMap<String, JobRecord>>,
}

#[async_trait]
impl RecordStorePort for InMemoryRecordStore {
    async fn put_transcription(
        &self,
        key: &str,
        transcription: &Transcription,
    ) -> Result<(), DomainError> {
        self.records
            .lock()
            .expect("record lock")
            .insert(key.to_string(), JobRecord::completed(key, transcription.clone()));
        Ok(())
    }

    async fn attach_translation(
        &self,
        key: &str,
        translation: &Translation,
    ) -> Result<(), DomainError> {
        let mut records = self.records.lock().expect("record lock");
        let record = records
            .get_mut(key)
            .ok_or_else(|| DomainError::not_found(&format!("no record for key {key}")))?;
        record.status_code = scribe_domain::STATUS_COMPLETE.to_string();
        record.translated = Some(translation.clone());
        Ok(())
    }
}

fn usecase(
    translator: Arc<UppercasingTranslator>,
    records: Arc<InMemoryRecordStore>,
) -> TranslateUseCaseImpl {
    TranslateUseCaseImpl::new(translator, records)
}

fn translate_request(target_language: &str, payload: &str) -> TranslateJobRequest {
    TranslateJobRequest {
        key: "a.wav".to_string(),
        target_language: target_language.to_string(),
        transcript_payload: payload.to_string(),
    }
}

#[tokio::test]
async fn unsupported_language_fails_validation_without_side_effects() {
    let translator = Arc::new(UppercasingTranslator::new());
    let records = Arc::new(InMemoryRecordStore::default());
    let usecase = usecase(translator.clone(), records.clone());

    let error = usecase
        .translate(translate_request("Klingon", r#"{"english": "hello"}"#))
        .await
        .expect_err("unsupported language rejected");

    match error {
        ApplicationError::Validation(message) => assert!(message.contains("Klingon")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    assert!(records.records.lock().expect("record lock").is_empty());
}

#[tokio::test]
async fn empty_transcript_payload_fails_validation_before_the_model() {
    let translator = Arc::new(UppercasingTranslator::new());
    let records = Arc::new(InMemoryRecordStore::default());
    let usecase = usecase(translator.clone(), records);

    let error = usecase
        .translate(translate_request("German", ""))
        .await
        .expect_err("empty payload rejected");

    assert!(matches!(error, ApplicationError::Validation(_)));
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn translation_updates_the_existing_record_in_place() {
    let translator = Arc::new(UppercasingTranslator::new());
    let records = Arc::new(InMemoryRecordStore::default());

    records
        .put_transcription(
            "a.wav",
            &Transcription {
                language: "en".to_string(),
                transcript: "hello world".to_string(),
                english: "hello world".to_string(),
            },
        )
        .await
        .expect("seed record");

    let usecase = usecase(translator, records.clone());
    let translation = usecase
        .translate(translate_request(
            "German",
            r#"{"english": "hello world"}"#,
        ))
        .await
        .expect("translation succeeds");

    assert_eq!(translation.language, "German");
    assert_eq!(translation.transcript, "[de_DE] HELLO WORLD");

    let stored = records.records.lock().expect("record lock");
    let record = stored.get("a.wav").expect("record still present");
    assert_eq!(record.status_code, "COMPLETE");
    assert!(record.transcript.is_some(), "transcript field preserved");
    assert_eq!(record.translated.as_ref(), Some(&translation));
}

#[tokio::test]
async fn translating_an_unknown_key_surfaces_not_found() {
    let translator = Arc::new(UppercasingTranslator::new());
    let records = Arc::new(InMemoryRecordStore::default());
    let usecase = usecase(translator, records);

    let error = usecase
        .translate(translate_request("French", r#"{"english": "hi"}"#))
        .await
        .expect_err("missing record rejected");

    assert!(matches!(
        error,
        ApplicationError::Domain(DomainError::NotFound { .. })
    ));
}
