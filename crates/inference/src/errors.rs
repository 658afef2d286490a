use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("model inference failed: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("unexpected model output shape: {0}")]
    OutputShape(String),

    #[error("model returned class id {0} outside the label set")]
    UnknownClass(i64),
}
