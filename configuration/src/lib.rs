use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type AppConfig = ScribeConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScribeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub asr: AsrRuntimeConfig,
    #[serde(default)]
    pub translation: TranslationRuntimeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Where finished transcriptions go: `record-store` or `object-store`.
    #[serde(default = "default_sink")]
    pub sink: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsrRuntimeConfig {
    #[serde(default = "default_asr_model_path")]
    pub model_path: String,
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default)]
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRuntimeConfig {
    /// Local directory holding model.safetensors, config.json and the
    /// source/target tokenizer files.
    #[serde(default = "default_translation_model_dir")]
    pub model_dir: String,
    /// Hub model id used when the local directory is absent.
    #[serde(default = "default_translation_model_id")]
    pub model_id: String,
    /// `auto`, `cpu` or `cuda`.
    #[serde(default = "default_device")]
    pub device: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Environment variable naming the audio bucket, resolved per
    /// invocation.
    #[serde(default = "default_bucket_env")]
    pub bucket_env: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default)]
    pub region: Option<String>,
    /// Override for local stacks (minio, dynamodb-local).
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkMode {
    RecordStore,
    ObjectStore,
}

impl ServiceConfig {
    pub fn sink_mode(&self) -> Result<SinkMode, ConfigError> {
        match self.sink.trim() {
            "record-store" => Ok(SinkMode::RecordStore),
            "object-store" => Ok(SinkMode::ObjectStore),
            other => Err(ConfigError::Invalid {
                field: "service.sink".to_string(),
                message: format!("`{other}` is not `record-store` or `object-store`"),
            }),
        }
    }
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            asr: AsrRuntimeConfig::default(),
            translation: TranslationRuntimeConfig::default(),
            storage: StorageConfig::default(),
            sink: default_sink(),
        }
    }
}

impl Default for AsrRuntimeConfig {
    fn default() -> Self {
        Self {
            model_path: default_asr_model_path(),
            threads: default_threads(),
            temperature: 0.0,
        }
    }
}

impl Default for TranslationRuntimeConfig {
    fn default() -> Self {
        Self {
            model_dir: default_translation_model_dir(),
            model_id: default_translation_model_id(),
            device: default_device(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_env: default_bucket_env(),
            table: default_table(),
            region: None,
            endpoint_url: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Defaults overridden by `SCRIBE_*` environment variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = ScribeConfig::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut ScribeConfig) -> Result<(), ConfigError> {
    if let Ok(host) = std::env::var("SCRIBE_SERVER_HOST") {
        config.server.host = host;
    }
    if let Ok(port) = std::env::var("SCRIBE_SERVER_PORT") {
        config.server.port = port.parse().map_err(|_| ConfigError::Invalid {
            field: "server.port".to_string(),
            message: format!("`{port}` is not a port number"),
        })?;
    }
    if let Ok(level) = std::env::var("SCRIBE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(path) = std::env::var("SCRIBE_ASR_MODEL_PATH") {
        config.service.asr.model_path = path;
    }
    if let Ok(threads) = std::env::var("SCRIBE_ASR_THREADS") {
        config.service.asr.threads = threads.parse().map_err(|_| ConfigError::Invalid {
            field: "service.asr.threads".to_string(),
            message: format!("`{threads}` is not a thread count"),
        })?;
    }
    if let Ok(dir) = std::env::var("SCRIBE_TRANSLATION_MODEL_DIR") {
        config.service.translation.model_dir = dir;
    }
    if let Ok(device) = std::env::var("SCRIBE_TRANSLATION_DEVICE") {
        config.service.translation.device = device;
    }
    if let Ok(table) = std::env::var("SCRIBE_STORAGE_TABLE") {
        config.service.storage.table = table;
    }
    if let Ok(region) = std::env::var("SCRIBE_STORAGE_REGION") {
        config.service.storage.region = Some(region);
    }
    if let Ok(endpoint) = std::env::var("SCRIBE_STORAGE_ENDPOINT_URL") {
        config.service.storage.endpoint_url = Some(endpoint);
    }
    if let Ok(sink) = std::env::var("SCRIBE_SINK") {
        config.service.sink = sink;
    }
    config.service.sink_mode()?;
    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level when set.
pub fn setup_logging(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}


fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sink() -> String {
    "record-store".to_string()
}

fn default_asr_model_path() -> String {
    "models/ggml-small.bin".to_string()
}

fn default_threads() -> usize {
    4
}

fn default_translation_model_dir() -> String {
    "models/opus-mt-en-mul".to_string()
}

fn default_translation_model_id() -> String {
    "Helsinki-NLP/opus-mt-en-mul".to_string()
}

fn default_device() -> String {
    "auto".to_string()
}

fn default_bucket_env() -> String {
    "BUCKET_NAME".to_string()
}

fn default_table() -> String {
    "transcripts".to_string()
}
