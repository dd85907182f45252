use thiserror::Error;

use crate::env::EnvError;

#[derive(Error, Debug)]
pub enum GymError {
    #[error("Env {0} not found in registry")]
    UnknownEnvironment(String),
    #[error("unsupported environment state or action type: {observation}, {action}")]
    UnsupportedSpace { observation: String, action: String },
    #[error("unsupported predictor: {0}")]
    UnsupportedPredictor(&'static str),
    #[error("predictor returned unknown action label {0:?}")]
    UnknownActionLabel(String),
    #[error("cannot feed an empty batch, replay memory holds no transitions")]
    EmptyBatch,
    #[error("image observations have no per-feature normalization")]
    NoFeatureNormalization,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error("batch tensors could not be assembled: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
