use super::{InferenceBackend, InferenceOutput};
use crate::config::{ExecutionProvider, InferenceConfig, TensorNames};
use anyhow::Context;
use ndarray::{Array, IxDyn};
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};

pub struct OrtBackend {
    session: Session,
    names: TensorNames,
}

impl OrtBackend {
    pub fn load(config: &InferenceConfig) -> anyhow::Result<Self> {
        // Initialize ORT environment (idempotent)
        let _ = ort::init().commit();

        let mut builder = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads)?;

        match config.provider {
            ExecutionProvider::Cuda => {
                tracing::info!("Initializing ONNX Runtime with CUDA execution provider");
                builder = builder.with_execution_providers([
                    ort::execution_providers::CUDAExecutionProvider::default()
                        .with_device_id(0)
                        .build()
                        .error_on_failure(),
                ])?;
            }
            ExecutionProvider::Auto => {
                tracing::info!("Initializing ONNX Runtime, CUDA if available else CPU");
                builder = builder.with_execution_providers([
                    ort::execution_providers::CUDAExecutionProvider::default()
                        .with_device_id(0)
                        .build(),
                ])?;
            }
            ExecutionProvider::Cpu => {
                tracing::info!("Initializing ONNX Runtime with CPU execution provider");
            }
        }

        let session = builder
            .commit_from_file(&config.model_path)
            .with_context(|| format!("failed to load model from {}", config.model_path))?;

        tracing::info!(model_path = %config.model_path, "Model loaded");
        Ok(Self {
            session,
            names: config.tensor_names.clone(),
        })
    }
}

impl InferenceBackend for OrtBackend {
    fn infer(&mut self, image: &Array<f32, IxDyn>) -> anyhow::Result<InferenceOutput> {
        let outputs = self.session.run(ort::inputs![
            self.names.input.as_str() => TensorRef::from_array_view(image.view())?
        ])?;

        let output = |name: &str| {
            outputs
                .get(name)
                .with_context(|| format!("model has no output named '{}'", name))
        };

        let boxes = output(&self.names.boxes)?.try_extract_array::<f32>()?;
        let labels = output(&self.names.labels)?.try_extract_array::<i64>()?;
        let scores = output(&self.names.scores)?.try_extract_array::<f32>()?;

        Ok(InferenceOutput {
            boxes: boxes.into_owned(),
            labels: labels.into_owned(),
            scores: scores.into_owned(),
        })
    }
}
