use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::marian;
use tokenizers::Tokenizer;

use scribe_domain::{DomainError, TranslationPort};

#[derive(Debug, Clone)]
pub struct MarianAdapterConfig {
    /// Directory holding model.safetensors, config.json, tokenizer.json
    /// and tokenizer-dec.json.
    pub model_dir: String,
    /// Hub model id used when the directory is absent.
    pub model_id: String,
    /// `auto`, `cpu` or `cuda`.
    pub device: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DevicePreference {
    Auto,
    Cpu,
    Cuda,
}

impl FromStr for DevicePreference {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda),
            other => Err(DomainError::configuration_error(&format!(
                "unknown translation device `{other}`"
            ))),
        }
    }
}

/// Translation over a Marian-family multilingual MT model. Weights load
/// lazily on first use and stay resident for warm invocations; the
/// output language is forced by prefixing the source text with the
/// model's target-language token.
pub struct MarianTranslationAdapter {
    config: MarianAdapterConfig,
    runtime: Mutex<MarianRuntime>,
}

struct MarianRuntime {
    translator: Option<LoadedTranslator>,
}

struct LoadedTranslator {
    model: marian::MTModel,
    model_config: marian::Config,
    source_tokenizer: Tokenizer,
    target_tokenizer: Tokenizer,
    device: Device,
}

impl MarianTranslationAdapter {
    pub fn new(config: MarianAdapterConfig) -> Self {
        Self {
            config,
            runtime: Mutex::new(MarianRuntime { translator: None }),
        }
    }

    fn translate_with_runtime(
        &self,
        text: &str,
        target_locale: &str,
    ) -> Result<String, DomainError> {
        let mut runtime = self
            .runtime
            .lock()
            .map_err(|_| DomainError::internal_error("translator runtime lock poisoned"))?;

        if runtime.translator.is_none() {
            runtime.translator = Some(load_translator(&self.config)?);
        }
        let translator = runtime
            .translator
            .as_mut()
            .ok_or_else(|| DomainError::internal_error("translator unavailable"))?;

        let input = format!(">>{}<< {}", primary_subtag(target_locale), text);
        let encoding = translator
            .source_tokenizer
            .encode(input.as_str(), true)
            .map_err(|err| tokenizer_err(&format!("failed to encode input: {err}")))?;
        let mut token_ids: Vec<u32> = encoding.get_ids().to_vec();
        if token_ids.last() != Some(&translator.model_config.eos_token_id) {
            token_ids.push(translator.model_config.eos_token_id);
        }

        let tokens = Tensor::new(token_ids.as_slice(), &translator.device)
            .and_then(|tensor| tensor.unsqueeze(0))
            .map_err(model_err)?;
        let encoder_xs = translator
            .model
            .encoder()
            .forward(&tokens, 0)
            .map_err(model_err)?;

        // Greedy decoding, matching the deterministic setting of the
        // speech side.
        let mut logits_processor = LogitsProcessor::new(0, None, None);
        let mut output_ids = vec![translator.model_config.decoder_start_token_id];
        for index in 0..translator.model_config.max_position_embeddings {
            let context_size = if index >= 1 { 1 } else { output_ids.len() };
            let start_pos = output_ids.len().saturating_sub(context_size);
            let input_ids = Tensor::new(&output_ids[start_pos..], &translator.device)
                .and_then(|tensor| tensor.unsqueeze(0))
                .map_err(model_err)?;
            let logits = translator
                .model
                .decode(&input_ids, &encoder_xs, start_pos)
                .map_err(model_err)?;
            let logits = logits
                .squeeze(0)
                .and_then(|logits| {
                    let last = logits.dim(0)? - 1;
                    logits.get(last)
                })
                .map_err(model_err)?;
            let token = logits_processor.sample(&logits).map_err(model_err)?;
            if token == translator.model_config.eos_token_id
                || token == translator.model_config.forced_eos_token_id
            {
                break;
            }
            output_ids.push(token);
        }
        translator.model.reset_kv_cache();

        let translated = translator
            .target_tokenizer
            .decode(&output_ids[1..], true)
            .map_err(|err| tokenizer_err(&format!("failed to decode output: {err}")))?;
        Ok(translated.trim().to_string())
    }
}

#[async_trait]
impl TranslationPort for MarianTranslationAdapter {
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String, DomainError> {
        self.translate_with_runtime(text, target_locale)
    }
}

struct ModelFiles {
    weights: PathBuf,
    config: PathBuf,
    source_tokenizer: PathBuf,
    target_tokenizer: PathBuf,
}

impl ModelFiles {
    fn in_dir(dir: &Path) -> Self {
        Self {
            weights: dir.join("model.safetensors"),
            config: dir.join("config.json"),
            source_tokenizer: dir.join("tokenizer.json"),
            target_tokenizer: dir.join("tokenizer-dec.json"),
        }
    }

    fn all_present(&self) -> bool {
        self.weights.is_file()
            && self.config.is_file()
            && self.source_tokenizer.is_file()
            && self.target_tokenizer.is_file()
    }
}

fn load_translator(config: &MarianAdapterConfig) -> Result<LoadedTranslator, DomainError> {
    let preference: DevicePreference = config.device.parse()?;
    let device = initialize_device(preference)?;
    let files = resolve_model_files(&config.model_dir, &config.model_id)?;

    let config_content = std::fs::read_to_string(&files.config).map_err(|err| {
        DomainError::external_service_error(
            "translator",
            &format!("failed to read model config: {err}"),
        )
    })?;
    let model_config: marian::Config = serde_json::from_str(&config_content).map_err(|err| {
        DomainError::external_service_error(
            "translator",
            &format!("failed to parse model config: {err}"),
        )
    })?;

    let source_tokenizer = Tokenizer::from_file(&files.source_tokenizer)
        .map_err(|err| tokenizer_err(&format!("failed to load source tokenizer: {err}")))?;
    let target_tokenizer = Tokenizer::from_file(&files.target_tokenizer)
        .map_err(|err| tokenizer_err(&format!("failed to load target tokenizer: {err}")))?;

    let vb = unsafe {
        VarBuilder::from_mmaped_safetensors(&[files.weights.clone()], DType::F32, &device)
    }
    .map_err(model_err)?;
    let model = marian::MTModel::new(&model_config, vb).map_err(model_err)?;

    tracing::info!(
        weights = %files.weights.display(),
        device = ?device,
        "translation model loaded"
    );

    Ok(LoadedTranslator {
        model,
        model_config,
        source_tokenizer,
        target_tokenizer,
        device,
    })
}

fn resolve_model_files(model_dir: &str, model_id: &str) -> Result<ModelFiles, DomainError> {
    let local = ModelFiles::in_dir(Path::new(model_dir));
    if local.all_present() {
        return Ok(local);
    }

    tracing::info!(
        model_id,
        model_dir,
        "translation model not found locally, fetching from the hub"
    );
    let api = hf_hub::api::sync::Api::new().map_err(|err| {
        DomainError::external_service_error("translator", &format!("hub client failed: {err}"))
    })?;
    let repo = api.repo(hf_hub::Repo::model(model_id.to_string()));
    let get = |file: &str| {
        repo.get(file).map_err(|err| {
            DomainError::external_service_error(
                "translator",
                &format!("failed to fetch {file}: {err}"),
            )
        })
    };

    Ok(ModelFiles {
        weights: get("model.safetensors")?,
        config: get("config.json")?,
        source_tokenizer: get("tokenizer.json")?,
        target_tokenizer: get("tokenizer-dec.json")?,
    })
}

fn initialize_device(preference: DevicePreference) -> Result<Device, DomainError> {
    match preference {
        DevicePreference::Cpu => Ok(Device::Cpu),
        DevicePreference::Cuda => {
            if candle_core::utils::cuda_is_available() {
                Device::new_cuda(0)
                    .map_err(|err| DomainError::configuration_error(&err.to_string()))
            } else {
                Err(DomainError::configuration_error(
                    "CUDA requested but not available",
                ))
            }
        }
        DevicePreference::Auto => {
            if candle_core::utils::cuda_is_available() {
                tracing::info!("auto-selecting CUDA device");
                Device::new_cuda(0)
                    .map_err(|err| DomainError::configuration_error(&err.to_string()))
            } else {
                tracing::info!("auto-selecting CPU device (CUDA not available)");
                Ok(Device::Cpu)
            }
        }
    }
}

/// Target-language token for a locale code, e.g. `de_DE` → `>>de<<`.
fn primary_subtag(locale: &str) -> String {
    locale
        .split('_')
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase()
}

fn model_err(err: candle_core::Error) -> DomainError {
    DomainError::external_service_error("translator", &err.to_string())
}

fn tokenizer_err(message: &str) -> DomainError {
    DomainError::external_service_error("translator", message)
}
