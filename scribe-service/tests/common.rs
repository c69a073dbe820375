#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Client;

use scribe_application::{TranscribeUseCaseImpl, TranslateUseCaseImpl};
use scribe_domain::{
    AudioClip, AudioDecoderPort, DetectedTranscript, DomainError, JobRecord, ObjectStorePort,
    RecordStorePort, SpeechModelPort, Transcription, TranscriptSink, Translation,
    TranslationPort,
};
use scribe_http_server::AppState;
use scribe_infra_record_dynamo::RecordStoreSink;
use scribe_infra_store_s3::TextFileArchiveSink;

/// Speech model double returning one scripted result regardless of the
/// audio content.
pub struct ScriptedSpeechModel {
    pub language: String,
    pub text: String,
    pub english: String,
}

impl ScriptedSpeechModel {
    pub fn new(language: &str, text: &str, english: &str) -> Arc<Self> {
        Arc::new(Self {
            language: language.to_string(),
            text: text.to_string(),
            english: english.to_string(),
        })
    }
}

#[async_trait]
impl SpeechModelPort for ScriptedSpeechModel {
    async fn transcribe(&self, _audio: &AudioClip) -> Result<DetectedTranscript, DomainError> {
        Ok(DetectedTranscript {
            language: self.language.clone(),
            text: self.text.clone(),
        })
    }

    async fn translate_to_english(&self, _audio: &AudioClip) -> Result<String, DomainError> {
        Ok(self.english.clone())
    }
}

#[derive(Default)]
pub struct InMemoryObjectStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl InMemoryObjectStore {
    pub fn with_object(key: &str) -> Arc<Self> {
        let store = Self::default();
        store
            .objects
            .lock()
            .expect("objects lock")
            .insert(key.to_string(), vec![0u8; 64]);
        Arc::new(store)
    }
}

#[async_trait]
impl ObjectStorePort for InMemoryObjectStore {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, DomainError> {
        self.objects
            .lock()
            .expect("objects lock")
            .get(key)
            .cloned()
            .ok_or_else(|| {
                DomainError::external_service_error(
                    "object-store",
                    &format!("object {key} not found"),
                )
            })
    }

    async fn store(
        &self,
        key: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), DomainError> {
        self.uploads
            .lock()
            .expect("uploads lock")
            .push((key.to_string(), body));
        Ok(())
    }
}

pub struct PassthroughDecoder;

impl AudioDecoderPort for PassthroughDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AudioClip, DomainError> {
        Ok(AudioClip {
            sample_rate_hz: 16_000,
            samples: vec![0.0; bytes.len()],
        })
    }
}

/// Record store double with the production create/update semantics.
#[derive(Default)]
pub struct InMemoryRecordStore {
    pub records: Mutex<HashMap<String, JobRecord>>,
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
            .expect("records lock")
            .insert(key.to_string(), JobRecord::completed(key, transcription.clone()));
        Ok(())
    }

    async fn attach_translation(
        &self,
        key: &str,
        translation: &Translation,
    ) -> Result<(), DomainError> {
        let mut records = self.records.lock().expect("records lock");
        let record = records
            .get_mut(key)
            .ok_or_else(|| DomainError::not_found(&format!("no record for key {key}")))?;
        record.translated = Some(translation.clone());
        Ok(())
    }
}

pub struct EchoTranslator;

#[async_trait]
impl TranslationPort for EchoTranslator {
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String, DomainError> {
        Ok(format!("[{target_locale}] {text}"))
    }
}

/// State wired like a record-store deployment, with doubles in place of
/// the AWS and model adapters.
pub fn record_store_state(
    objects: Arc<InMemoryObjectStore>,
    speech: Arc<ScriptedSpeechModel>,
    records: Arc<InMemoryRecordStore>,
) -> AppState {
    let sink = Arc::new(RecordStoreSink::new(records.clone()));
    AppState {
        transcribe: Arc::new(TranscribeUseCaseImpl::new(
            objects,
            Arc::new(PassthroughDecoder),
            speech,
            sink,
        )),
        translate: Some(Arc::new(TranslateUseCaseImpl::new(
            Arc::new(EchoTranslator),
            records,
        ))),
    }
}

/// State wired like an archive deployment: text-file sink, no
/// translation mode.
pub fn archive_state(
    objects: Arc<InMemoryObjectStore>,
    speech: Arc<ScriptedSpeechModel>,
) -> AppState {
    let sink = Arc::new(TextFileArchiveSink::new(
        objects.clone() as Arc<dyn ObjectStorePort>
    ));
    AppState {
        transcribe: Arc::new(TranscribeUseCaseImpl::new(
            objects,
            Arc::new(PassthroughDecoder),
            speech,
            sink,
        )),
        translate: None,
    }
}

pub async fn setup_test_server(state: AppState) -> (String, Client) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let router = scribe_http_server::router(state);
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    (format!("http://{addr}"), Client::new())
}
