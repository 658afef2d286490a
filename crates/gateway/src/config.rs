use common::{env_opt, env_or, env_parse};
use inference::InferenceConfig;
use std::path::PathBuf;

pub use common::Environment;

pub const DEFAULT_THRESHOLD: f32 = 0.5;
pub const DEFAULT_JPEG_QUALITY: u8 = 75;
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Per-request detection defaults shared by every handler.
#[derive(Debug, Clone)]
pub struct DetectSettings {
    pub default_threshold: f32,
    pub jpeg_quality: u8,
    pub model_path: String,
}

impl Default for DetectSettings {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            model_path: inference::config::DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub addr: String,
    pub static_dir: PathBuf,
    pub max_body_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:5000".to_string(),
            static_dir: PathBuf::from("static"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub environment: Environment,
    pub http: HttpConfig,
    pub detect: DetectSettings,
    pub font_path: Option<String>,
    pub otel_endpoint: Option<String>,
    pub inference: InferenceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::from_env();
        let inference = InferenceConfig::from_env()?;

        let http_defaults = HttpConfig::default();
        let http = HttpConfig {
            addr: env_or("GATEWAY_ADDR", &http_defaults.addr),
            static_dir: PathBuf::from(env_or("STATIC_DIR", "static")),
            max_body_bytes: env_parse("MAX_BODY_BYTES", http_defaults.max_body_bytes)?,
        };

        let default_threshold: f32 = env_parse("DEFAULT_THRESHOLD", DEFAULT_THRESHOLD)?;
        if !default_threshold.is_finite() {
            anyhow::bail!("DEFAULT_THRESHOLD must be a finite number");
        }

        let jpeg_quality: u8 = env_parse("JPEG_QUALITY", DEFAULT_JPEG_QUALITY)?;
        if !(1..=100).contains(&jpeg_quality) {
            anyhow::bail!("JPEG_QUALITY must be between 1 and 100, got {}", jpeg_quality);
        }

        Ok(Self {
            environment,
            http,
            detect: DetectSettings {
                default_threshold,
                jpeg_quality,
                model_path: inference.model_path.clone(),
            },
            font_path: env_opt("FONT_PATH"),
            otel_endpoint: env_opt("OTEL_EXPORTER_OTLP_ENDPOINT"),
            inference,
        })
    }
}
