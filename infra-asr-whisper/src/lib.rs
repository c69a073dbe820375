use std::sync::Mutex;

use async_trait::async_trait;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use scribe_domain::{AudioClip, DetectedTranscript, DomainError, SpeechModelPort};

#[derive(Debug, Clone)]
pub struct WhisperAdapterConfig {
    pub model_path: String,
    pub threads: usize,
    pub temperature: f32,
}

/// Whisper task selected per invocation: decode in the detected
/// language, or the model's own translate-to-English task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Transcribe,
    TranslateToEnglish,
}

pub struct WhisperSpeechModel {
    config: WhisperAdapterConfig,
    runtime: Mutex<WhisperRuntime>,
}

struct WhisperRuntime {
    context: Option<WhisperContext>,
}

impl WhisperSpeechModel {
    pub fn new(config: WhisperAdapterConfig) -> Self {
        Self {
            config,
            runtime: Mutex::new(WhisperRuntime { context: None }),
        }
    }

    fn run(&self, audio: &AudioClip, task: Task) -> Result<(String, String), DomainError> {
        let mut runtime = self
            .runtime
            .lock()
            .map_err(|_| DomainError::internal_error("whisper runtime lock poisoned"))?;

        if runtime.context.is_none() {
            let whisper_context = WhisperContext::new_with_params(
                &self.config.model_path,
                WhisperContextParameters::default(),
            )
            .map_err(|err| {
                DomainError::external_service_error(
                    "whisper",
                    &format!("failed to load model: {err}"),
                )
            })?;
            tracing::info!(model_path = %self.config.model_path, "whisper model loaded");
            runtime.context = Some(whisper_context);
        }

        let whisper_context = runtime
            .context
            .as_ref()
            .ok_or_else(|| DomainError::internal_error("whisper context unavailable"))?;

        let mut state = whisper_context.create_state().map_err(|err| {
            DomainError::external_service_error(
                "whisper",
                &format!("failed to create state: {err}"),
            )
        })?;

        // Deterministic decoding: greedy sampling at the configured
        // temperature (0 by default), language auto-detected.
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(self.config.threads as i32);
        params.set_language(None);
        params.set_translate(task == Task::TranslateToEnglish);
        params.set_temperature(self.config.temperature);
        params.set_token_timestamps(false);
        params.set_print_realtime(false);
        params.set_print_progress(false);
        params.set_print_timestamps(false);
        params.set_print_special(false);

        state.full(params, &audio.samples).map_err(|err| {
            DomainError::external_service_error("whisper", &format!("full decode failed: {err}"))
        })?;

        let mut pieces = Vec::new();
        for idx in 0..state.full_n_segments() {
            let Some(segment) = state.get_segment(idx) else {
                continue;
            };
            let text = segment
                .to_str_lossy()
                .map(|cow| cow.trim().to_string())
                .unwrap_or_default();
            if !text.is_empty() {
                pieces.push(text);
            }
        }
        let text = pieces.join(" ");

        let lang_id = state.full_lang_id_from_state().map_err(|err| {
            DomainError::external_service_error(
                "whisper",
                &format!("detected language unavailable: {err}"),
            )
        })?;
        let language = whisper_rs::get_lang_str(lang_id)
            .map(str::to_string)
            .ok_or_else(|| {
                DomainError::external_service_error(
                    "whisper",
                    &format!("unknown language id {lang_id}"),
                )
            })?;

        tracing::debug!(
            language = %language,
            segment_count = state.full_n_segments(),
            translate = task == Task::TranslateToEnglish,
            "whisper decode finished"
        );

        Ok((language, text))
    }
}

#[async_trait]
impl SpeechModelPort for WhisperSpeechModel {
    async fn transcribe(&self, audio: &AudioClip) -> Result<DetectedTranscript, DomainError> {
        let (language, text) = self.run(audio, Task::Transcribe)?;
        Ok(DetectedTranscript { language, text })
    }

    async fn translate_to_english(&self, audio: &AudioClip) -> Result<String, DomainError> {
        let (_, text) = self.run(audio, Task::TranslateToEnglish)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_model_file_surfaces_a_model_load_failure() {
        let model = WhisperSpeechModel::new(WhisperAdapterConfig {
            model_path: "/nonexistent/ggml-small.bin".to_string(),
            threads: 1,
            temperature: 0.0,
        });
        let audio = AudioClip {
            sample_rate_hz: 16_000,
            samples: vec![0.0; 16_000],
        };

        let error = model
            .transcribe(&audio)
            .await
            .expect_err("load should fail");
        assert!(matches!(error, DomainError::ExternalService { .. }));
    }
}
