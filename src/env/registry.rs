use crate::error::GymError;

use super::{CartPoleEnv, FrozenLakeEnv, RegisteredEnv};

pub const REGISTRY: [&str; 3] = ["CartPole-v0", "CartPole-v1", "FrozenLake-v0"];

pub fn registered_ids() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().copied()
}

/// Creates a registered environment by id. Whether the adapter can drive it
/// is checked separately, against its spaces.
pub fn make(id: &str, seed: Option<u64>) -> Result<RegisteredEnv, GymError> {
    match id {
        "CartPole-v0" => Ok(CartPoleEnv::new(200, seed).into()),
        "CartPole-v1" => Ok(CartPoleEnv::new(500, seed).into()),
        "FrozenLake-v0" => Ok(FrozenLakeEnv::new(&FrozenLakeEnv::MAP_4X4, 100).into()),
        _ => Err(GymError::UnknownEnvironment(id.to_string())),
    }
}
