mod cart_pole;
mod frozen_lake;
mod registry;
mod space;

use enum_dispatch::enum_dispatch;
use fxhash::FxHashMap;
use ndarray::ArrayD;
use thiserror::Error;

pub use cart_pole::CartPoleEnv;
pub use frozen_lake::FrozenLakeEnv;
pub use registry::{make, registered_ids, REGISTRY};
pub use space::{EnvDescriptor, ObservationKind, Space};

/// Observation handed back by an environment, a vector or an image.
pub type State = ArrayD<f32>;

/// Auxiliary diagnostics returned alongside every step.
pub type Info = FxHashMap<String, f32>;

/// `(next_state, reward, terminal, info)`
pub type StepResult = (State, f32, bool, Info);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("environment is not ready to receive actions, reset it first")]
    EnvNotReady,
    #[error("action {action} is outside the action space of size {size}")]
    InvalidAction { action: usize, size: usize },
}

#[enum_dispatch]
pub trait Environment {
    fn reset(&mut self) -> Result<State, EnvError>;
    fn step(&mut self, action: usize) -> Result<StepResult, EnvError>;
    fn render(&self) -> String;
    fn observation_space(&self) -> Space;
    fn action_space(&self) -> Space;
}

/// Every environment that can be created by id through [`make`].
#[derive(Debug, Clone)]
#[enum_dispatch(Environment)]
pub enum RegisteredEnv {
    CartPole(CartPoleEnv),
    FrozenLake(FrozenLakeEnv),
}
