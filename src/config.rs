use std::fmt;
use std::str::FromStr;

use crate::error::GymError;

/// How possible-next-action data is shaped for the training graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    DiscreteAction,
    ParametricAction,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::DiscreteAction => "discrete",
            ModelType::ParametricAction => "parametric",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discrete" => Ok(ModelType::DiscreteAction),
            "parametric" => Ok(ModelType::ParametricAction),
            other => Err(GymError::InvalidConfig(format!(
                "unknown model type {other:?}, expected \"discrete\" or \"parametric\""
            ))),
        }
    }
}

/// Cadence used to pick which overflow transitions enter a full memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservoirStrategy {
    /// Geometric gaps with success probability `capacity / memory_num`,
    /// frozen at the moment of each replacement.
    #[default]
    GeometricSkip,
    /// Li's Algorithm L, every item survives with probability exactly
    /// `capacity / memory_num`.
    AlgorithmL,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GymConfig {
    /// Fraction of the time the agent selects a random action during training.
    pub epsilon: f32,
    /// Upper bound on the number of transitions kept in replay memory.
    pub max_replay_memory_size: usize,
    pub reservoir: ReservoirStrategy,
    /// Seeds every random source of the adapter; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for GymConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.2,
            max_replay_memory_size: 10_000,
            reservoir: ReservoirStrategy::default(),
            seed: None,
        }
    }
}

impl GymConfig {
    pub fn validate(&self) -> Result<(), GymError> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(GymError::InvalidConfig(format!(
                "epsilon must be within [0, 1], got {}",
                self.epsilon
            )));
        }
        if self.max_replay_memory_size == 0 {
            return Err(GymError::InvalidConfig(
                "max_replay_memory_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Derives a distinct seed per random source so that seeded runs do not
    /// share one stream between memory, policy and environment.
    pub(crate) fn sub_seed(&self, stream: u64) -> Option<u64> {
        self.seed
            .map(|seed| seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(stream))
    }
}
