#![allow(dead_code)]

use gym_adapter::env::{EnvError, Environment, Info, Space, State, StepResult};
use gym_adapter::predictor::{DiscreteDecisionMaker, FeatureMap, ValueEstimator};
use ndarray::{Array1, ArrayD, IxDyn};

/// Pays 1.0 per step and terminates after `episode_len` steps. The state is
/// the step counter repeated over every feature.
pub struct ScriptedEnv {
    pub state_dim: usize,
    pub action_dim: usize,
    pub episode_len: usize,
    pub t: usize,
    pub actions_taken: Vec<usize>,
    pub renders: std::cell::Cell<usize>,
}

impl ScriptedEnv {
    pub fn new(state_dim: usize, action_dim: usize, episode_len: usize) -> Self {
        Self {
            state_dim,
            action_dim,
            episode_len,
            t: 0,
            actions_taken: vec![],
            renders: std::cell::Cell::new(0),
        }
    }

    fn observation(&self) -> State {
        Array1::from_elem(self.state_dim, self.t as f32).into_dyn()
    }
}

impl Environment for ScriptedEnv {
    fn reset(&mut self) -> Result<State, EnvError> {
        self.t = 0;
        Ok(self.observation())
    }

    fn step(&mut self, action: usize) -> Result<StepResult, EnvError> {
        if action >= self.action_dim {
            return Err(EnvError::InvalidAction {
                action,
                size: self.action_dim,
            });
        }
        self.actions_taken.push(action);
        self.t += 1;
        Ok((self.observation(), 1.0, self.t >= self.episode_len, Info::default()))
    }

    fn render(&self) -> String {
        self.renders.set(self.renders.get() + 1);
        format!("t={}", self.t)
    }

    fn observation_space(&self) -> Space {
        Space::vector(self.state_dim, 0.0, f32::INFINITY)
    }

    fn action_space(&self) -> Space {
        Space::Discrete(self.action_dim)
    }
}

/// Image observations of shape `(height, width, 3)`, one step per episode.
pub struct ImageEnv {
    pub height: usize,
    pub width: usize,
}

impl Environment for ImageEnv {
    fn reset(&mut self) -> Result<State, EnvError> {
        Ok(ArrayD::zeros(IxDyn(&[self.height, self.width, 3])))
    }

    fn step(&mut self, _action: usize) -> Result<StepResult, EnvError> {
        Ok((
            ArrayD::from_elem(IxDyn(&[self.height, self.width, 3]), 255.0),
            0.5,
            true,
            Info::default(),
        ))
    }

    fn render(&self) -> String {
        String::new()
    }

    fn observation_space(&self) -> Space {
        Space::image(self.height, self.width, 3)
    }

    fn action_space(&self) -> Space {
        Space::Discrete(2)
    }
}

/// Spaces only, for creation checks.
pub struct SpacesOnly {
    pub observation: Space,
    pub action: Space,
}

impl Environment for SpacesOnly {
    fn reset(&mut self) -> Result<State, EnvError> {
        Err(EnvError::EnvNotReady)
    }

    fn step(&mut self, _action: usize) -> Result<StepResult, EnvError> {
        Err(EnvError::EnvNotReady)
    }

    fn render(&self) -> String {
        String::new()
    }

    fn observation_space(&self) -> Space {
        self.observation.clone()
    }

    fn action_space(&self) -> Space {
        self.action.clone()
    }
}

/// Always answers the same action label.
pub struct FixedLabel(pub &'static str);

impl DiscreteDecisionMaker for FixedLabel {
    fn decide(&self, _state: &FeatureMap) -> String {
        self.0.to_string()
    }
}

/// Prefers the action whose key is `favourite`.
pub struct Favourite(pub usize);

impl ValueEstimator for Favourite {
    fn estimate(&self, _state: &FeatureMap, action: &FeatureMap) -> f32 {
        if action.contains_key(&self.0) {
            1.0
        } else {
            0.0
        }
    }
}
