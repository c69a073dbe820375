use std::sync::Arc;

use anyhow::Error;

use scribe_application::{
    TranscribeUseCase, TranscribeUseCaseImpl, TranslateUseCase, TranslateUseCaseImpl,
};
use scribe_configuration::{AppConfig, SinkMode};
use scribe_domain::{ObjectStorePort, RecordStorePort, SpeechModelPort, TranscriptSink};
use scribe_http_server::AppState;
use scribe_infra_audio::WavAudioDecoder;
#[cfg(feature = "whisper-runtime")]
use scribe_infra_asr_whisper::{WhisperAdapterConfig, WhisperSpeechModel};
use scribe_infra_record_dynamo::{DynamoRecordStore, RecordStoreSink};
use scribe_infra_store_s3::{S3ObjectStore, TextFileArchiveSink};
use scribe_infra_translate_marian::{MarianAdapterConfig, MarianTranslationAdapter};

pub async fn build_and_run(config: AppConfig) -> Result<(), Error> {
    let app = Application::new(config).await?;
    app.run().await
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

impl Application {
    pub async fn new(config: AppConfig) -> Result<Self, Error> {
        #[cfg(feature = "whisper-runtime")]
        tracing::info!("whisper runtime feature enabled");
        #[cfg(not(feature = "whisper-runtime"))]
        tracing::warn!(
            "service compiled without `whisper-runtime`; transcription will return fallback text"
        );
        #[cfg(feature = "whisper-cuda")]
        tracing::info!("whisper backend: CUDA");
        #[cfg(feature = "whisper-vulkan")]
        tracing::info!("whisper backend: Vulkan");
        #[cfg(all(
            feature = "whisper-runtime",
            not(feature = "whisper-cuda"),
            not(feature = "whisper-vulkan")
        ))]
        tracing::info!("whisper backend: CPU");

        let sink_mode = config.service.sink_mode()?;
        tracing::info!(
            sink = %config.service.sink,
            asr_model_path = %config.service.asr.model_path,
            table = %config.service.storage.table,
            "initializing transcription application"
        );

        let aws_config = load_aws_config(&config).await;
        let object_store = Arc::new(S3ObjectStore::new(
            aws_sdk_s3::Client::new(&aws_config),
            config.service.storage.bucket_env.clone(),
        ));
        let decoder = Arc::new(WavAudioDecoder::default());
        let speech = build_speech_model(&config);

        let (sink, translate): (Arc<dyn TranscriptSink>, Option<Arc<dyn TranslateUseCase>>) =
            match sink_mode {
                SinkMode::RecordStore => {
                    let records: Arc<dyn RecordStorePort> = Arc::new(DynamoRecordStore::new(
                        aws_sdk_dynamodb::Client::new(&aws_config),
                        config.service.storage.table.clone(),
                    ));
                    let translator = Arc::new(MarianTranslationAdapter::new(MarianAdapterConfig {
                        model_dir: config.service.translation.model_dir.clone(),
                        model_id: config.service.translation.model_id.clone(),
                        device: config.service.translation.device.clone(),
                    }));
                    (
                        Arc::new(RecordStoreSink::new(records.clone())),
                        Some(Arc::new(TranslateUseCaseImpl::new(translator, records))
                            as Arc<dyn TranslateUseCase>),
                    )
                }
                SinkMode::ObjectStore => (
                    Arc::new(TextFileArchiveSink::new(
                        object_store.clone() as Arc<dyn ObjectStorePort>
                    )),
                    None,
                ),
            };

        let transcribe: Arc<dyn TranscribeUseCase> = Arc::new(TranscribeUseCaseImpl::new(
            object_store,
            decoder,
            speech,
            sink,
        ));

        Ok(Self {
            config,
            state: AppState {
                transcribe,
                translate,
            },
        })
    }

    pub async fn run(self) -> Result<(), Error> {
        tracing::info!(
            host = %self.config.server.host,
            port = self.config.server.port,
            "starting transcription HTTP server"
        );

        scribe_http_server::serve(self.state, &self.config.server.host, self.config.server.port)
            .await
            .map_err(|err| anyhow::anyhow!("server startup failed: {err}"))
    }
}

async fn load_aws_config(config: &AppConfig) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = &config.service.storage.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.service.storage.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}

#[cfg(feature = "whisper-runtime")]
fn build_speech_model(config: &AppConfig) -> Arc<dyn SpeechModelPort> {
    Arc::new(WhisperSpeechModel::new(WhisperAdapterConfig {
        model_path: config.service.asr.model_path.clone(),
        threads: config.service.asr.threads,
        temperature: config.service.asr.temperature,
    }))
}

#[cfg(not(feature = "whisper-runtime"))]
fn build_speech_model(_config: &AppConfig) -> Arc<dyn SpeechModelPort> {
    Arc::new(fallback::FallbackSpeechModel)
}

#[cfg(not(feature = "whisper-runtime"))]
mod fallback {
    use async_trait::async_trait;

    use scribe_domain::{AudioClip, DetectedTranscript, DomainError, SpeechModelPort};

    /// Stands in when the service is compiled without a speech runtime.
    pub struct FallbackSpeechModel;

    #[async_trait]
    impl SpeechModelPort for FallbackSpeechModel {
        async fn transcribe(&self, audio: &AudioClip) -> Result<DetectedTranscript, DomainError> {
            Ok(DetectedTranscript {
                language: scribe_domain::languages::ENGLISH.to_string(),
                text: format!(
                    "[no speech runtime compiled; {:.1}s of audio ignored]",
                    audio.duration_secs()
                ),
            })
        }

        async fn translate_to_english(&self, audio: &AudioClip) -> Result<String, DomainError> {
            self.transcribe(audio).await.map(|detected| detected.text)
        }
    }
}
