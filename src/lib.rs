pub mod action_selection;
pub mod config;
pub mod env;
pub mod error;
pub mod feeder;
pub mod normalization;
pub mod predictor;
pub mod replay_memory;
pub mod transition;
pub mod utils;
pub mod workspace;

mod episode;
mod gym;

pub use config::{GymConfig, ModelType, ReservoirStrategy};
pub use error::GymError;
pub use gym::GymEnvironment;
