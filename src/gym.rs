use ndarray::Array1;
use tracing::info;

use crate::action_selection::EpsilonGreedyPolicy;
use crate::config::GymConfig;
use crate::env::{self, EnvDescriptor, Environment, RegisteredEnv, State};
use crate::error::GymError;
use crate::normalization::{default_normalizer, Normalization};
use crate::predictor::DecisionMaker;
use crate::replay_memory::{Insertion, ReplayMemory};
use crate::transition::{Transition, TransitionColumns};

/// Wraps an environment together with the replay memory its episodes fill
/// and the epsilon-greedy policy that drives them.
#[derive(Debug)]
pub struct GymEnvironment<E: Environment = RegisteredEnv> {
    pub(crate) env: E,
    pub(crate) descriptor: EnvDescriptor,
    pub(crate) policy: EpsilonGreedyPolicy,
    pub(crate) replay_memory: ReplayMemory<Transition>,
}

impl GymEnvironment<RegisteredEnv> {
    /// Creates the adapter for a registered environment id.
    pub fn from_id(id: &str, config: GymConfig) -> Result<Self, GymError> {
        let env = env::make(id, config.sub_seed(2))?;
        let adapter = Self::new(env, config)?;
        info!(
            env = id,
            action_dim = adapter.descriptor.action_dim,
            observation = ?adapter.descriptor.observation,
            "created gym environment"
        );
        Ok(adapter)
    }
}

impl<E: Environment> GymEnvironment<E> {
    /// Fails when the observation space is not a rank 1 or rank 3 `Box` or
    /// the action space is not `Discrete`.
    pub fn new(env: E, config: GymConfig) -> Result<Self, GymError> {
        config.validate()?;
        let descriptor = EnvDescriptor::from_spaces(&env.observation_space(), &env.action_space())?;
        let policy = EpsilonGreedyPolicy::new(config.epsilon, &descriptor, config.sub_seed(1));
        let replay_memory = ReplayMemory::new(
            config.max_replay_memory_size,
            config.reservoir,
            config.sub_seed(0),
        )?;
        Ok(Self {
            env,
            descriptor,
            policy,
            replay_memory,
        })
    }

    pub fn descriptor(&self) -> &EnvDescriptor {
        &self.descriptor
    }

    pub fn action_dim(&self) -> usize {
        self.descriptor.action_dim
    }

    pub fn state_dim(&self) -> Option<usize> {
        self.descriptor.state_dim()
    }

    pub fn img(&self) -> bool {
        self.descriptor.is_image()
    }

    pub fn epsilon(&self) -> f32 {
        self.policy.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f32) {
        self.policy.epsilon = epsilon;
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn replay_memory(&self) -> &ReplayMemory<Transition> {
        &self.replay_memory
    }

    pub fn replay_memory_mut(&mut self) -> &mut ReplayMemory<Transition> {
        &mut self.replay_memory
    }

    pub fn actions(&self) -> &[String] {
        self.policy.action_labels()
    }

    /// Default normalization of every state feature.
    pub fn normalization(&self) -> Result<Normalization, GymError> {
        let state_dim = self.state_dim().ok_or(GymError::NoFeatureNormalization)?;
        Ok(default_normalizer(0..state_dim))
    }

    /// Default normalization of every action feature, keyed after the state
    /// features.
    pub fn normalization_action(&self) -> Result<Normalization, GymError> {
        let state_dim = self.state_dim().ok_or(GymError::NoFeatureNormalization)?;
        Ok(default_normalizer(
            state_dim..state_dim + self.descriptor.action_dim,
        ))
    }

    /// One-hot action for `state`; `test` disables exploration.
    pub fn policy(
        &mut self,
        decision_maker: DecisionMaker<'_>,
        state: &State,
        test: bool,
    ) -> Result<Array1<f32>, GymError> {
        self.policy.choose_action(decision_maker, state, !test)
    }

    pub fn insert_into_memory(&mut self, transition: Transition) -> Insertion {
        self.replay_memory.insert(transition)
    }

    pub fn sample_memories(&mut self, batch_size: usize) -> TransitionColumns<'_> {
        self.replay_memory.sample_columns(batch_size)
    }
}
