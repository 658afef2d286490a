use common::{env_or, env_parse};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MODEL_PATH: &str = "models/fasterrcnn_model_best.onnx";

/// Where the model runs. `Auto` tries CUDA and silently falls back to CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionProvider {
    Auto,
    Cpu,
    Cuda,
}

impl ExecutionProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionProvider::Auto => "auto",
            ExecutionProvider::Cpu => "cpu",
            ExecutionProvider::Cuda => "cuda",
        }
    }
}

impl fmt::Display for ExecutionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct UnknownProvider(String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not a supported execution provider. Use `auto`, `cpu` or `cuda`.",
            self.0
        )
    }
}

impl std::error::Error for UnknownProvider {}

impl FromStr for ExecutionProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "cpu" => Ok(Self::Cpu),
            "cuda" | "gpu" => Ok(Self::Cuda),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Tensor names of the exported detector.
#[derive(Debug, Clone)]
pub struct TensorNames {
    pub input: String,
    pub boxes: String,
    pub labels: String,
    pub scores: String,
}

impl Default for TensorNames {
    fn default() -> Self {
        Self {
            input: "images".to_string(),
            boxes: "boxes".to_string(),
            labels: "labels".to_string(),
            scores: "scores".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub model_path: String,
    pub provider: ExecutionProvider,
    pub intra_threads: usize,
    pub tensor_names: TensorNames,
}

impl InferenceConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = TensorNames::default();

        Ok(Self {
            model_path: env_or("MODEL_PATH", DEFAULT_MODEL_PATH),
            provider: env_parse("EXECUTION_PROVIDER", ExecutionProvider::Auto)?,
            intra_threads: env_parse("INTRA_THREADS", 4)?,
            tensor_names: TensorNames {
                input: env_or("MODEL_INPUT_NAME", &defaults.input),
                boxes: env_or("MODEL_BOXES_NAME", &defaults.boxes),
                labels: env_or("MODEL_LABELS_NAME", &defaults.labels),
                scores: env_or("MODEL_SCORES_NAME", &defaults.scores),
            },
        })
    }

    /// Create default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            model_path: "/models/model.onnx".to_string(),
            provider: ExecutionProvider::Cpu,
            intra_threads: 1,
            tensor_names: TensorNames::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("auto".parse::<ExecutionProvider>().unwrap(), ExecutionProvider::Auto);
        assert_eq!("CPU".parse::<ExecutionProvider>().unwrap(), ExecutionProvider::Cpu);
        assert_eq!("gpu".parse::<ExecutionProvider>().unwrap(), ExecutionProvider::Cuda);
        assert!("tpu".parse::<ExecutionProvider>().is_err());
    }

    #[test]
    fn test_default_tensor_names_match_torchvision_export() {
        let config = InferenceConfig::test_default();
        assert_eq!(config.tensor_names.input, "images");
        assert_eq!(config.tensor_names.boxes, "boxes");
        assert_eq!(config.tensor_names.labels, "labels");
        assert_eq!(config.tensor_names.scores, "scores");
    }
}
